use nalgebra::{DMatrix, DVector};
use smallvec::{SmallVec, smallvec};

use crate::{
    Bernstein, BernsteinError,
    bernstein::{Coeffs, s_zero},
    binomial_coefficient, binomial_row,
};

impl Bernstein {
    /// The same polynomial with its degree raised by `r`. Exact.
    pub fn elevate(&self, r: usize) -> Bernstein {
        if r == 0 {
            return self.clone();
        }
        Bernstein::from_parts(elevate_coeffs(&self.coeffs, r), self.domain)
    }

    /// The polynomial of degree `N - r` whose elevation is closest to this one
    /// in the coefficient 2-norm.
    ///
    /// Exact whenever the true degree is at most `N - r`.
    pub fn reduce(&self, r: usize) -> Result<Bernstein, BernsteinError> {
        let n = self.degree();
        if r > n {
            return Err(BernsteinError::DegreeUnderflow { degree: n, by: r });
        }
        if r == 0 {
            return Ok(self.clone());
        }
        let m = n - r;

        // Column j is B^m_j written in the basis of degree n.
        let elevation = DMatrix::from_fn(n + 1, m + 1, |i, j| {
            if i < j {
                0.0
            } else {
                binomial_coefficient(r, i - j) * binomial_coefficient(m, j)
                    / binomial_coefficient(n, i)
            }
        });
        let target = DVector::from_iterator(n + 1, self.coeffs.iter().copied());

        let svd = elevation.svd(true, true);
        let solution = svd
            .solve(&target, f64::EPSILON)
            .map_err(|message| BernsteinError::AlgorithmError {
                message: message.to_string(),
            })?;
        log::debug!(
            "reduce: degree {n} -> {m}, condition {:.3e}",
            svd.singular_values.max() / svd.singular_values.min()
        );

        Ok(Bernstein::from_parts(
            solution.iter().copied().collect(),
            self.domain,
        ))
    }

    /// Nearest polynomial of degree `N - 1` in the coefficient norm selected by `q_inv`
    /// (see [`Bernstein::norm`]). A degree 0 polynomial gives the zero constant.
    pub fn nearest(&self, q_inv: f64) -> Bernstein {
        let n = self.degree();
        if n == 0 {
            return Bernstein::constant(0.0, self.domain);
        }

        // `lead = u · c` is the leading power coefficient (up to Δ^N); the degree N - 1
        // polynomials are exactly the hyperplane `u · c = 0`.
        let u = leading_weights(n);
        let lead: f64 = u.iter().zip(&self.coeffs).map(|(u, c)| u * c).sum();

        let mut coeffs = self.coeffs.clone();
        if lead != 0.0 {
            let correction = dual_projection(&u, lead, q_inv);
            coeffs
                .iter_mut()
                .zip(correction)
                .for_each(|(c, delta)| *c += delta);
        }
        log::debug!("nearest: degree {n}, leading weight {lead:.3e}, q_inv {q_inv}");

        Bernstein::from_parts(reduce_once(&coeffs), self.domain)
    }

    /// Coefficient norm: `max |c_k|` for `q_inv <= 0`, Euclidean for `q_inv = 0.5`,
    /// `Σ |c_k|` for `q_inv >= 1`, and `(Σ |c_k|^(1/q_inv))^q_inv` otherwise.
    pub fn norm(&self, q_inv: f64) -> f64 {
        q_norm(&self.coeffs, q_inv)
    }

    /// Norm of the coefficient difference, elevating the lower-degree operand first.
    pub fn distance(&self, other: &Bernstein, q_inv: f64) -> f64 {
        self.subtract(other).norm(q_inv)
    }

    /// Zero the coefficients that are negligible and return how many were zeroed.
    ///
    /// A coefficient is negligible when it is numerically zero, when `|c_k| < epsilon`
    /// (for `epsilon > 0`), when `scale + c_k == scale` (for `scale > 0`), or when
    /// `norm + c_k == norm` (for `scale <= 0`) with `norm` the max-norm of the polynomial.
    pub fn remove_noise(&mut self, epsilon: f64, scale: f64) -> usize {
        let norm = self.norm(0.0);
        let mut removed = 0;
        for c in self.coeffs.iter_mut() {
            let negligible = s_zero(*c)
                || (epsilon > 0.0 && c.abs() < epsilon)
                || (scale > 0.0 && scale + *c == scale)
                || (scale <= 0.0 && norm + *c == norm);
            if negligible {
                *c = 0.0;
                removed += 1;
            }
        }
        removed
    }

    /// Leading coefficient of the polynomial written in powers of `x`.
    pub fn head(&self) -> f64 {
        let n = self.degree();
        let lead: f64 = leading_weights(n)
            .iter()
            .zip(&self.coeffs)
            .map(|(u, c)| u * c)
            .sum();
        lead / self.domain.length().powi(n as i32)
    }
}

pub(crate) fn elevate_coeffs(coeffs: &[f64], r: usize) -> Coeffs {
    let mut current: Coeffs = coeffs.iter().copied().collect();
    for _ in 0..r {
        // `size` is the new degree.
        let size = current.len();
        let mut next: Coeffs = SmallVec::with_capacity(size + 1);
        next.push(current[0]);
        for i in 1..size {
            let a = i as f64 / size as f64;
            next.push(a * current[i - 1] + (1.0 - a) * current[i]);
        }
        next.push(current[size - 1]);
        current = next;
    }
    current
}

pub(crate) fn q_norm(values: &[f64], q_inv: f64) -> f64 {
    let max = values.iter().fold(0.0f64, |m, c| m.max(c.abs()));
    if q_inv <= 0.0 || max == 0.0 {
        return max;
    }
    if q_inv >= 1.0 {
        return values.iter().map(|c| c.abs()).sum();
    }
    // Scale by the largest entry to avoid overflow in the powers.
    if q_inv == 0.5 {
        let sum: f64 = values.iter().map(|c| (c / max).powi(2)).sum();
        return max * sum.sqrt();
    }
    let q = 1.0 / q_inv;
    let sum: f64 = values.iter().map(|c| (c.abs() / max).powf(q)).sum();
    max * sum.powf(q_inv)
}

/// `u_k = (-1)^(N-k) C(N, k)`, so that `Σ u_k c_k` is `Δ^N` times the leading power
/// coefficient.
fn leading_weights(n: usize) -> Vec<f64> {
    let mut row = binomial_row(n);
    for (k, u) in row.iter_mut().enumerate() {
        if (n - k) % 2 == 1 {
            *u = -*u;
        }
    }
    row
}

/// Smallest correction `δ` in the `1/q_inv` norm with `u · δ = -lead`.
fn dual_projection(u: &[f64], lead: f64, q_inv: f64) -> Vec<f64> {
    let mut delta = vec![0.0; u.len()];
    if q_inv >= 1.0 {
        // The dual of the 1-norm is the max-norm: spend everything on the largest weight.
        let (k, uk) = u
            .iter()
            .enumerate()
            .fold((0, 0.0f64), |best, (k, &uk)| {
                if uk.abs() > best.1.abs() { (k, uk) } else { best }
            });
        delta[k] = -lead / uk;
        return delta;
    }

    // Dual exponent p with 1/p + q_inv = 1.
    let p = 1.0 / (1.0 - q_inv.max(0.0));
    let umax = u.iter().fold(0.0f64, |m, v| m.max(v.abs()));
    let total: f64 = u.iter().map(|v| (v.abs() / umax).powf(p)).sum();
    for (d, &uk) in delta.iter_mut().zip(u) {
        *d = -lead * uk.signum() * (uk.abs() / umax).powf(p - 1.0) / (umax * total);
    }
    delta
}

/// Exact one step degree reduction of coefficients with a vanishing leading power
/// coefficient. Both ends are recovered by the forward and backward recurrences, which
/// are then joined in the middle.
fn reduce_once(coeffs: &[f64]) -> Coeffs {
    let n = coeffs.len() - 1;
    debug_assert!(n > 0);
    let nf = n as f64;

    let mut left: Coeffs = smallvec![0.0; n];
    let mut prev = 0.0;
    for (i, l) in left.iter_mut().enumerate() {
        *l = (nf * coeffs[i] - i as f64 * prev) / (n - i) as f64;
        prev = *l;
    }

    let mut right: Coeffs = smallvec![0.0; n];
    let mut next = 0.0;
    for i in (1..=n).rev() {
        right[i - 1] = (nf * coeffs[i] - (n - i) as f64 * next) / i as f64;
        next = right[i - 1];
    }

    (0..n)
        .map(|i| if 2 * i < n { left[i] } else { right[i] })
        .collect()
}
