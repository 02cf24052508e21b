use fmtastic::Superscript;
use smallvec::smallvec;

use crate::{
    Bernstein, BernsteinError, Interval, bernstein::Coeffs, binomial_coefficient, binomial_row,
    poly_sum::impl_poly_sum,
};

/// Polynomial in the power basis, `p(x) = Σ p_i x^i`.
///
/// The interval is only used when converting to a [`Bernstein`] polynomial.
#[derive(Clone, PartialEq)]
pub struct Polynomial {
    pub(crate) coeffs: Coeffs,
    domain: Interval,
}

impl Polynomial {
    pub fn new(
        coeffs: impl IntoIterator<Item = f64>,
        xmin: f64,
        xmax: f64,
    ) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        let coeffs: Coeffs = coeffs.into_iter().collect();
        if coeffs.is_empty() {
            return Err(BernsteinError::EmptyCoefficients);
        }
        Ok(Self { coeffs, domain })
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

    /// Horner evaluation, valid everywhere.
    pub fn evaluate(&self, x: f64) -> f64 {
        self.coeffs.iter().rev().fold(0.0, |acc, &c| acc * x + c)
    }

    /// Product of two polynomials, kept on this interval.
    pub fn multiply(&self, other: &Polynomial) -> Polynomial {
        Polynomial {
            coeffs: convolve(&self.coeffs, &other.coeffs),
            domain: self.domain,
        }
    }
}

impl_poly_sum!(Polynomial);

impl core::fmt::Debug for Polynomial {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let mut first = true;
        for (i, &c) in self.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            if !first {
                write!(f, " + ")?;
            }
            first = false;
            match i {
                0 => write!(f, "{c}")?,
                1 => write!(f, "{c}·x")?,
                _ => write!(f, "{c}·x{}", Superscript(i))?,
            }
        }
        if first {
            write!(f, "0")?;
        }
        Ok(())
    }
}

impl From<&Polynomial> for Bernstein {
    fn from(poly: &Polynomial) -> Self {
        // x = xmin + Δ t
        let domain = poly.domain;
        let power_t = substitute(&poly.coeffs, domain.xmin(), domain.length());
        Bernstein::from_parts(from_power(&power_t), domain)
    }
}

impl From<&Bernstein> for Polynomial {
    fn from(poly: &Bernstein) -> Self {
        // t = (x - xmin) / Δ
        let domain = poly.domain;
        let (power_t, _) = to_power(&poly.coeffs);
        let length = domain.length();
        let coeffs = substitute(&power_t, -domain.xmin() / length, 1.0 / length);
        Polynomial { coeffs, domain }
    }
}

/// Bernstein coefficients of degree `N` to power coefficients in `t`, together with a
/// bound on the magnitude of the terms summed into each of them.
pub(crate) fn to_power(coeffs: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let n = coeffs.len() - 1;
    let row_n = binomial_row(n);
    let mut power = Vec::with_capacity(n + 1);
    let mut bound = Vec::with_capacity(n + 1);
    for i in 0..=n {
        let row_i = binomial_row(i);
        let (mut sum, mut abs) = (0.0, 0.0);
        for (k, &c) in coeffs[..=i].iter().enumerate() {
            let term = row_i[k] * c;
            sum += if (i - k) % 2 == 0 { term } else { -term };
            abs += term.abs();
        }
        power.push(row_n[i] * sum);
        bound.push(row_n[i] * abs);
    }
    (power, bound)
}

/// Power coefficients in `t` to Bernstein coefficients of the same degree.
///
/// Uses `t^i = Σ_{k >= i} C(k, i) / C(N, i) B^N_k`.
pub(crate) fn from_power(power: &[f64]) -> Coeffs {
    let n = power.len() - 1;
    let row_n = binomial_row(n);
    (0..=n)
        .map(|k| {
            power[..=k]
                .iter()
                .enumerate()
                .map(|(i, a)| a * binomial_coefficient(k, i) / row_n[i])
                .sum()
        })
        .collect()
}

/// Coefficients in `u` of `Σ b_j s^j` with `s = alpha + beta u`.
fn substitute(coeffs: &[f64], alpha: f64, beta: f64) -> Coeffs {
    let n = coeffs.len();
    let mut result: Coeffs = smallvec![0.0; n];
    for (j, &b) in coeffs.iter().enumerate() {
        if b == 0.0 {
            continue;
        }
        for (i, r) in result[..=j].iter_mut().enumerate() {
            *r += b
                * binomial_coefficient(j, i)
                * alpha.powi((j - i) as i32)
                * beta.powi(i as i32);
        }
    }
    result
}

fn convolve(a: &[f64], b: &[f64]) -> Coeffs {
    let mut result: Coeffs = smallvec![0.0; a.len() + b.len() - 1];
    for (i, &x) in a.iter().enumerate() {
        for (j, &y) in b.iter().enumerate() {
            result[i + j] += x * y;
        }
    }
    result
}
