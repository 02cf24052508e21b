use std::borrow::Cow;

use fmtastic::{Subscript, Superscript};
use nalgebra::Complex;
use smallvec::{SmallVec, smallvec};

use crate::{BernsteinError, Interval, PolySum, poly_sum::impl_poly_sum};

// Use SmallVec to avoid heap allocations for the common low degrees.
pub(crate) type Coeffs = SmallVec<[f64; 16]>;

/// Tolerance, in units of least precision, for the "numerically equal" checks.
pub const DEFAULT_ULPS: u32 = 4;

pub(crate) fn s_equal(a: f64, b: f64) -> bool {
    approx::ulps_eq!(a, b, max_ulps = DEFAULT_ULPS)
}

pub(crate) fn s_zero(a: f64) -> bool {
    s_equal(a, 0.0)
}

/// Selector for the single basis polynomial `B^N_k`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Basic {
    k: usize,
    n: usize,
}

impl Basic {
    pub fn new(k: usize, n: usize) -> Self {
        Self { k, n }
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn n(&self) -> usize {
        self.n
    }
}

/// Sum of Bernstein basis polynomials of degree `N` on `[xmin, xmax]`:
/// `f(x) = Σ c_k C(N, k) t^k (1 - t)^(N - k)` with `t = (x - xmin) / (xmax - xmin)`.
#[derive(Clone, Debug, PartialEq)]
pub struct Bernstein {
    // Never empty: degree N has N+1 coefficients.
    pub(crate) coeffs: Coeffs,

    pub(crate) domain: Interval,
}

impl Default for Bernstein {
    fn default() -> Self {
        Self::from_parts(smallvec![0.0], Interval::UNIT)
    }
}

impl Bernstein {
    /// The zero polynomial of the given degree.
    pub fn zeros(degree: usize, xmin: f64, xmax: f64) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        Ok(Self::from_parts(smallvec![0.0; degree + 1], domain))
    }

    /// Create a polynomial from its `N + 1` coefficients.
    ///
    /// The sequence is copied; swapped bounds are reordered.
    pub fn new(
        coeffs: impl IntoIterator<Item = f64>,
        xmin: f64,
        xmax: f64,
    ) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        Self::with_domain(coeffs, domain)
    }

    pub fn with_domain(
        coeffs: impl IntoIterator<Item = f64>,
        domain: Interval,
    ) -> Result<Self, BernsteinError> {
        let coeffs: Coeffs = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            return Err(BernsteinError::EmptyCoefficients);
        }
        Ok(Self { coeffs, domain })
    }

    /// The basis polynomial `B^N_k`; the zero polynomial of degree `N` when `k > N`.
    pub fn basic(basic: Basic, xmin: f64, xmax: f64) -> Result<Self, BernsteinError> {
        let mut poly = Self::zeros(basic.n(), xmin, xmax)?;
        poly.set_par(basic.k(), 1.0);
        Ok(poly)
    }

    /// Build `Π (x - r_i) Π (x - c_j)(x - c_j*)` on `[xmin, xmax]`.
    ///
    /// Only one root of each complex-conjugate pair is given.
    pub fn from_roots(
        xmin: f64,
        xmax: f64,
        real: &[f64],
        complex: &[Complex<f64>],
    ) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        let (a, b) = (domain.xmin(), domain.xmax());

        let mut result = Self::constant(1.0, domain);
        for &r in real {
            // Blossom of (x - r) at the interval edges.
            let factor = Self::from_parts(smallvec![a - r, b - r], domain);
            result = result.multiply(&factor);
        }
        for c in complex {
            // x^2 - 2 Re(c) x + |c|^2, blossom f(u, v) = uv - Re(c)(u + v) + |c|^2
            let blossom = |u: f64, v: f64| u * v - c.re * (u + v) + c.norm_sqr();
            let factor =
                Self::from_parts(smallvec![blossom(a, a), blossom(a, b), blossom(b, b)], domain);
            result = result.multiply(&factor);
        }
        Ok(result)
    }

    /// The same polynomial expressed on another interval.
    ///
    /// Works for sub-intervals as well as for extrapolation beyond the current interval.
    pub fn resampled(&self, xmin: f64, xmax: f64) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        Ok(self.resample(domain))
    }

    pub(crate) fn resample(&self, domain: Interval) -> Self {
        if domain == self.domain {
            return self.clone();
        }
        let t0 = self.domain.t(domain.xmin());
        let t1 = self.domain.t(domain.xmax());

        let mut coeffs = self.coeffs.clone();
        if t1 != 0.0 {
            de_casteljau_lower(&mut coeffs, t1);
            // Don't forget to re-normalize t0
            de_casteljau_upper(&mut coeffs, t0 / t1);
        } else {
            // t0 < t1 = 0, so 1 - t0 is never zero.
            de_casteljau_upper(&mut coeffs, t0);
            de_casteljau_lower(&mut coeffs, (t1 - t0) / (1.0 - t0));
        }
        Self::from_parts(coeffs, domain)
    }

    pub(crate) fn from_parts(coeffs: Coeffs, domain: Interval) -> Self {
        debug_assert!(!coeffs.is_empty(), "Bernstein polynomial without coefficients");
        Self { coeffs, domain }
    }

    pub(crate) fn constant(value: f64, domain: Interval) -> Self {
        Self::from_parts(smallvec![value], domain)
    }

    /// Borrow `other` when it shares this interval, otherwise resample it onto this interval.
    pub(crate) fn aligned<'a>(&self, other: &'a Bernstein) -> Cow<'a, Bernstein> {
        if other.domain == self.domain {
            Cow::Borrowed(other)
        } else {
            Cow::Owned(other.resample(self.domain))
        }
    }

    pub fn xmin(&self) -> f64 {
        self.domain.xmin()
    }

    pub fn xmax(&self) -> f64 {
        self.domain.xmax()
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    pub fn degree(&self) -> usize {
        self.coeffs.len() - 1
    }

    pub fn pars(&self) -> &[f64] {
        &self.coeffs
    }

    /// Coefficient `k`, or zero when `k > degree`.
    pub fn par(&self, k: usize) -> f64 {
        self.coeffs.get(k).copied().unwrap_or(0.0)
    }

    /// Set coefficient `k`, returns false when `k` is out of range.
    pub fn set_par(&mut self, k: usize, value: f64) -> bool {
        PolySum::set_par(self, k, value)
    }

    /// Global to canonical coordinate.
    pub fn t(&self, x: f64) -> f64 {
        self.domain.t(x)
    }

    /// Canonical to global coordinate.
    pub fn x(&self, t: f64) -> f64 {
        self.domain.x(t)
    }

    /// Value of the polynomial at `x`, extrapolating outside the interval.
    pub fn evaluate(&self, x: f64) -> f64 {
        casteljau(&self.coeffs, self.domain.t(x))
    }

    /// Value of the polynomial at `x`, or zero outside `[xmin, xmax]`.
    pub fn eval(&self, x: f64) -> f64 {
        if self.domain.contains(x) {
            self.evaluate(x)
        } else {
            0.0
        }
    }

    /// Are all coefficients so small that `c_k + c == c`?
    pub fn is_small(&self, c: f64) -> bool {
        self.coeffs.iter().all(|&p| p + c == c)
    }

    pub fn is_constant(&self) -> bool {
        let first = self.coeffs[0];
        self.coeffs.iter().all(|&c| s_equal(c, first))
    }

    /// Non-decreasing control polygon. Sufficient, not necessary, for an increasing function.
    pub fn is_increasing(&self) -> bool {
        self.coeffs.windows(2).all(|w| w[0] <= w[1])
    }

    /// Non-increasing control polygon. Sufficient, not necessary, for a decreasing function.
    pub fn is_decreasing(&self) -> bool {
        self.coeffs.windows(2).all(|w| w[0] >= w[1])
    }

    pub fn is_monotonic(&self) -> bool {
        self.is_increasing() || self.is_decreasing()
    }

    /// Replace the polynomial with the constant `value`, keeping the degree.
    pub fn assign_constant(&mut self, value: f64) {
        self.coeffs.iter_mut().for_each(|c| *c = value);
    }
}

impl_poly_sum!(Bernstein);

impl core::fmt::Display for Bernstein {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let n = self.degree();
        for (k, c) in self.coeffs.iter().enumerate() {
            if k > 0 {
                write!(f, " + ")?;
            }
            write!(f, "{}·B{}{}", c, Subscript(k), Superscript(n))?;
        }
        write!(f, " on [{}, {}]", self.xmin(), self.xmax())
    }
}

/// Near-zero predicate for polynomials relative to a scale:
/// true when `norm + scale == scale` in working precision.
#[derive(Clone, Copy, Debug)]
pub struct Tiny {
    scale: f64,
}

impl Tiny {
    pub fn new(scale: f64) -> Self {
        Self {
            scale: scale.abs(),
        }
    }

    pub fn is_tiny(&self, poly: &Bernstein) -> bool {
        poly.norm(0.0) + self.scale == self.scale
    }
}

/// de Casteljau summation of `Σ p_k B^N_k(t)` for a raw coefficient sequence.
pub fn casteljau(pars: &[f64], t: f64) -> f64 {
    match pars.len() {
        0 => 0.0,
        1 => pars[0],
        2 => (1.0 - t) * pars[0] + t * pars[1],
        _ => {
            let mut work: Coeffs = pars.iter().copied().collect();
            de_casteljau_upper(&mut work, t);
            work[0]
        }
    }
}

/// After the call `control_points` describe the same polynomial on `[0, t]`.
pub(crate) fn de_casteljau_lower(control_points: &mut [f64], t: f64) {
    let s = 1.0 - t;
    let size = control_points.len();
    for n in 1..size {
        for i in (n..size).rev() {
            control_points[i] = s * control_points[i - 1] + t * control_points[i];
        }
    }
}

/// After the call `control_points` describe the same polynomial on `[t, 1]`.
pub(crate) fn de_casteljau_upper(control_points: &mut [f64], t: f64) {
    let s = 1.0 - t;
    let size = control_points.len();
    for k in 1..size {
        for i in 0..(size - k) {
            control_points[i] = s * control_points[i] + t * control_points[i + 1];
        }
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for Bernstein {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        1e-10
    }

    /// Compares as functions: the lower-degree operand is elevated first.
    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        if !approx::AbsDiffEq::abs_diff_eq(&self.domain, &other.domain, epsilon) {
            return false;
        }
        let n = self.degree().max(other.degree());
        let a = self.elevate(n - self.degree());
        let b = other.elevate(n - other.degree());
        a.coeffs
            .iter()
            .zip(b.coeffs.iter())
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }
}
