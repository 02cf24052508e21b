use nalgebra::{DMatrix, DVector};
use smallvec::smallvec;

use crate::{Bernstein, BernsteinError, Interval, monomial::to_power};

impl Bernstein {
    /// Polynomial division `self = q g + r` with `deg r < deg g`.
    ///
    /// `g` is resampled onto this interval when the intervals differ. Dividing by the zero
    /// polynomial, or by a polynomial of higher degree, gives `(0, self)`.
    ///
    /// The true degrees of both operands are found first. The coefficients of `q` and `r`
    /// then solve `q g + r = self` in the Bernstein basis, in the least-squares sense with
    /// one step of iterative refinement.
    pub fn divmod(&self, g: &Bernstein) -> (Bernstein, Bernstein) {
        let g = self.aligned(g);
        let zero = Bernstein::constant(0.0, self.domain);

        let (g_power, g_bound) = to_power(&g.coeffs);
        let Some(m) = true_degree(&g_power, &g_bound) else {
            log::warn!("divmod: division by the zero polynomial");
            return (zero, self.clone());
        };
        let (f_power, f_bound) = to_power(&self.coeffs);
        let Some(n) = true_degree(&f_power, &f_bound) else {
            return (zero, self.clone());
        };
        if m > n {
            return (zero, self.clone());
        }
        log::debug!(
            "divmod: true degrees {n} / {m} (stored {} / {})",
            self.degree(),
            g.degree()
        );

        // Columns: B^(n-m)_i g for the quotient, then B^(m-1)_j for the remainder, all
        // written at degree `top`.
        let top = self.degree().max(n - m + g.degree());
        let columns: Vec<Bernstein> = (0..=n - m)
            .map(|i| &unit(i, n - m, self.domain) * &*g)
            .chain((0..m).map(|j| unit(j, m - 1, self.domain)))
            .map(|column| column.elevate(top - column.degree()))
            .collect();
        let system = DMatrix::from_fn(top + 1, n + 1, |row, col| columns[col].coeffs[row]);
        let target = DVector::from_iterator(
            top + 1,
            self.elevate(top - self.degree()).coeffs.iter().copied(),
        );

        let svd = system.clone().svd(true, true);
        let mut solution = match svd.solve(&target, f64::EPSILON) {
            Ok(solution) => solution,
            Err(message) => {
                log::warn!("divmod: {message}");
                return (zero, self.clone());
            }
        };
        let residual = &target - &system * &solution;
        if let Ok(correction) = svd.solve(&residual, f64::EPSILON) {
            solution += correction;
        }
        log::trace!(
            "divmod: residual {:.3e}",
            (&target - &system * &solution).amax()
        );

        let quotient = solution.rows(0, n - m + 1).iter().copied().collect();
        let remainder = if m == 0 {
            smallvec![0.0]
        } else {
            solution.rows(n - m + 1, m).iter().copied().collect()
        };
        (
            Bernstein::from_parts(quotient, self.domain),
            Bernstein::from_parts(remainder, self.domain),
        )
    }

    pub fn quotient(&self, g: &Bernstein) -> Bernstein {
        self.divmod(g).0
    }

    pub fn remainder(&self, g: &Bernstein) -> Bernstein {
        self.divmod(g).1
    }
}

/// Quotient and remainder of `f / g`, see [`Bernstein::divmod`].
pub fn divmod(f: &Bernstein, g: &Bernstein) -> (Bernstein, Bernstein) {
    f.divmod(g)
}

/// `d` with `b(x) - b(xmin) = (x - xmin) d(x)`, of degree `N - 1`.
pub fn deflate_left(b: &Bernstein) -> Bernstein {
    let n = b.degree();
    if n == 0 {
        return Bernstein::constant(0.0, b.domain);
    }
    let nf = n as f64;
    let length = b.domain.length();
    let c0 = b.coeffs[0];
    let coeffs = (1..=n)
        .map(|k| nf * (b.coeffs[k] - c0) / (k as f64 * length))
        .collect();
    Bernstein::from_parts(coeffs, b.domain)
}

/// `d` with `b(x) - b(xmax) = (x - xmax) d(x)`, of degree `N - 1`.
pub fn deflate_right(b: &Bernstein) -> Bernstein {
    let n = b.degree();
    if n == 0 {
        return Bernstein::constant(0.0, b.domain);
    }
    let nf = n as f64;
    let length = b.domain.length();
    let cn = b.coeffs[n];
    let coeffs = (0..n)
        .map(|k| -nf * (b.coeffs[k] - cn) / ((n - k) as f64 * length))
        .collect();
    Bernstein::from_parts(coeffs, b.domain)
}

/// `d` with `b(x) - b(x0) = (x - x0) d(x)`, on the interval of `b`.
///
/// `x0` may lie outside the interval.
pub fn deflate(b: &Bernstein, x0: f64) -> Result<Bernstein, BernsteinError> {
    let (xmin, xmax) = (b.xmin(), b.xmax());
    if x0 == xmin {
        return Ok(deflate_left(b));
    }
    if x0 == xmax {
        return Ok(deflate_right(b));
    }
    let d = if x0 < xmax {
        deflate_left(&b.resample(Interval::new(x0, xmax)?))
    } else {
        deflate_right(&b.resample(Interval::new(xmin, x0)?))
    };
    Ok(d.resample(b.domain))
}

/// `B^n_k` on `domain`.
fn unit(k: usize, n: usize, domain: Interval) -> Bernstein {
    let mut coeffs = smallvec![0.0; n + 1];
    coeffs[k] = 1.0;
    Bernstein::from_parts(coeffs, domain)
}

/// Highest index whose power coefficient is above its rounding error bound.
fn true_degree(power: &[f64], bound: &[f64]) -> Option<usize> {
    let n = power.len();
    let tolerance = 4.0 * n as f64 * f64::EPSILON;
    (0..n)
        .rev()
        .find(|&i| power[i] != 0.0 && power[i].abs() > tolerance * bound[i])
}
