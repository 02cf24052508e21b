use smallvec::smallvec;

use crate::{
    Bernstein, BernsteinError, Interval, bernstein::Coeffs, binomial_row,
    poly_sum::impl_poly_sum,
};

/// `Σ c_k P_k(s)` with Legendre polynomials `P_k` and `s` mapping `[xmin, xmax]` onto `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct LegendreSum {
    pub(crate) coeffs: Coeffs,
    domain: Interval,
}

/// `Σ c_k T_k(s)` with Chebyshev polynomials `T_k` and `s` mapping `[xmin, xmax]` onto `[-1, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct ChebyshevSum {
    pub(crate) coeffs: Coeffs,
    domain: Interval,
}

fn collect_coeffs(coeffs: impl IntoIterator<Item = f64>) -> Result<Coeffs, BernsteinError> {
    let coeffs: Coeffs = coeffs.into_iter().collect();
    if coeffs.is_empty() {
        return Err(BernsteinError::EmptyCoefficients);
    }
    Ok(coeffs)
}

impl LegendreSum {
    pub fn new(
        coeffs: impl IntoIterator<Item = f64>,
        xmin: f64,
        xmax: f64,
    ) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        Ok(Self {
            coeffs: collect_coeffs(coeffs)?,
            domain,
        })
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    /// Bonnet recurrence, valid everywhere.
    pub fn evaluate(&self, x: f64) -> f64 {
        let s = 2.0 * self.domain.t(x) - 1.0;
        let (mut prev, mut current) = (0.0, 1.0);
        let mut sum = 0.0;
        for (k, &c) in self.coeffs.iter().enumerate() {
            sum += c * current;
            let kf = k as f64;
            let next = ((2.0 * kf + 1.0) * s * current - kf * prev) / (kf + 1.0);
            prev = current;
            current = next;
        }
        sum
    }
}

impl ChebyshevSum {
    pub fn new(
        coeffs: impl IntoIterator<Item = f64>,
        xmin: f64,
        xmax: f64,
    ) -> Result<Self, BernsteinError> {
        let domain = Interval::new(xmin, xmax)?;
        Ok(Self {
            coeffs: collect_coeffs(coeffs)?,
            domain,
        })
    }

    pub fn domain(&self) -> Interval {
        self.domain
    }

    /// Clenshaw summation, valid everywhere.
    pub fn evaluate(&self, x: f64) -> f64 {
        let s = 2.0 * self.domain.t(x) - 1.0;
        let (mut b1, mut b2) = (0.0, 0.0);
        for &c in self.coeffs[1..].iter().rev() {
            let b0 = c + 2.0 * s * b1 - b2;
            b2 = b1;
            b1 = b0;
        }
        self.coeffs[0] + s * b1 - b2
    }
}

impl_poly_sum!(LegendreSum);
impl_poly_sum!(ChebyshevSum);

impl From<&LegendreSum> for Bernstein {
    fn from(sum: &LegendreSum) -> Self {
        let n = sum.coeffs.len() - 1;
        let mut result = Bernstein::from_parts(smallvec![0.0; n + 1], sum.domain);
        for (k, &c) in sum.coeffs.iter().enumerate() {
            if c == 0.0 {
                continue;
            }
            // P_k(2t - 1) = Σ_j (-1)^(k+j) C(k, j) B^k_j(t)
            let coeffs = binomial_row(k)
                .into_iter()
                .enumerate()
                .map(|(j, b)| if (k + j) % 2 == 0 { c * b } else { -c * b })
                .collect();
            let term = Bernstein::from_parts(coeffs, sum.domain).elevate(n - k);
            result += &term;
        }
        result
    }
}

impl From<&ChebyshevSum> for Bernstein {
    fn from(sum: &ChebyshevSum) -> Self {
        let domain = sum.domain;
        let s = Bernstein::from_parts(smallvec![-1.0, 1.0], domain);

        let mut result = Bernstein::constant(sum.coeffs[0], domain);
        let mut previous = Bernstein::constant(1.0, domain);
        let mut current = s.clone();
        for &c in &sum.coeffs[1..] {
            result += &(&current * c);
            let next = &(&s * &current) * 2.0 - &previous;
            previous = std::mem::replace(&mut current, next);
        }
        result
    }
}
