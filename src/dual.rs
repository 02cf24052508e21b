use crate::{Bernstein, BernsteinError, binomial_coefficient};

/// Dual basis function `d^N_k`: the degree `N` polynomial with
/// `∫ B^N_j(x) d^N_k(x) dx = δ_jk` over the interval.
///
/// `k > N` is the zero polynomial.
#[derive(Clone, Debug, PartialEq)]
pub struct DualBasis {
    k: usize,
    bernstein: Bernstein,
}

impl DualBasis {
    /// Dual basis function on `[0, 1]`.
    pub fn new(n: usize, k: usize) -> Result<Self, BernsteinError> {
        Self::with_domain(n, k, 0.0, 1.0)
    }

    /// Coefficients in closed form (Jüttler 1998). Each one is a sum of positive terms
    /// and keeps full relative precision at any degree.
    pub fn with_domain(n: usize, k: usize, xmin: f64, xmax: f64) -> Result<Self, BernsteinError> {
        let mut bernstein = Bernstein::zeros(n, xmin, xmax)?;
        if k > n {
            return Ok(Self { k, bernstein });
        }

        let scale = 1.0 / (binomial_coefficient(n, k) * bernstein.domain().length());
        for j in 0..=n {
            let sum: f64 = (0..=j.min(k))
                .map(|i| {
                    (2 * i + 1) as f64
                        * binomial_coefficient(n + i + 1, n - j)
                        * binomial_coefficient(n - i, n - j)
                        * binomial_coefficient(n + i + 1, n - k)
                        * binomial_coefficient(n - i, n - k)
                })
                .sum();
            let c = scale * sum / binomial_coefficient(n, j);
            bernstein.set_par(j, if (j + k) % 2 == 0 { c } else { -c });
        }
        log::debug!(
            "dual basis {k} of degree {n}: max coefficient {:.3e}",
            bernstein.norm(0.0)
        );
        Ok(Self { k, bernstein })
    }

    pub fn k(&self) -> usize {
        self.k
    }

    pub fn n(&self) -> usize {
        self.bernstein.degree()
    }

    /// Value at `x`, zero outside the interval.
    pub fn eval(&self, x: f64) -> f64 {
        self.bernstein.eval(x)
    }

    pub fn par(&self, j: usize) -> f64 {
        self.bernstein.par(j)
    }

    pub fn pars(&self) -> &[f64] {
        self.bernstein.pars()
    }

    pub fn bernstein(&self) -> &Bernstein {
        &self.bernstein
    }
}

#[cfg(test)]
mod tests {
    use assertables::{assert_lt, assert_ok};

    use crate::{Basic, test_utils::linspace};

    use super::*;

    #[test]
    fn biorthogonal_to_basis() {
        for (xmin, xmax) in [(0.0, 1.0), (1.0, 3.0)] {
            for n in 0..7 {
                for k in 0..=n {
                    let dual = assert_ok!(DualBasis::with_domain(n, k, xmin, xmax));
                    assert_eq!(dual.k(), k);
                    assert_eq!(dual.n(), n);
                    for j in 0..=n {
                        let basic = Bernstein::basic(Basic::new(j, n), xmin, xmax).unwrap();
                        let overlap = (&basic * dual.bernstein()).integral();
                        let expected = if j == k { 1.0 } else { 0.0 };
                        assert_lt!((overlap - expected).abs(), 1e-8);
                    }
                }
            }
        }
    }

    #[test]
    fn biorthogonal_at_high_degree() {
        for n in [20, 30] {
            // ∫_0^1 B^n_i B^n_j dt
            let gram = |i: usize, j: usize| {
                binomial_coefficient(n, i) * binomial_coefficient(n, j)
                    / ((2 * n + 1) as f64 * binomial_coefficient(2 * n, i + j))
            };
            for k in 0..=n {
                let dual = assert_ok!(DualBasis::new(n, k));
                for j in 0..=n {
                    let terms: Vec<f64> = (0..=n).map(|i| dual.par(i) * gram(i, j)).collect();
                    let overlap: f64 = terms.iter().sum();
                    let magnitude: f64 = terms.iter().map(|t| t.abs()).sum();
                    let expected = if j == k { 1.0 } else { 0.0 };
                    assert_lt!((overlap - expected).abs(), 1e-12 * magnitude);
                }
            }
        }
    }

    #[test]
    fn symmetric_under_reflection() {
        let n = 12;
        for k in 0..=n {
            let dual = assert_ok!(DualBasis::new(n, k));
            let mirror = assert_ok!(DualBasis::new(n, n - k));
            for j in 0..=n {
                let (a, b) = (dual.par(j), mirror.par(n - j));
                assert_lt!((a - b).abs(), 1e-13 * a.abs());
            }
        }
    }

    #[test]
    fn linear_duals_by_hand() {
        // On [0, 1]: d_0 = 4 B_0 - 2 B_1, d_1 = -2 B_0 + 4 B_1
        let d0 = assert_ok!(DualBasis::new(1, 0));
        assert_lt!((d0.par(0) - 4.0).abs(), 1e-12);
        assert_lt!((d0.par(1) + 2.0).abs(), 1e-12);
        let d1 = assert_ok!(DualBasis::new(1, 1));
        assert_lt!((d1.eval(1.0) - 4.0).abs(), 1e-12);
    }

    #[test]
    fn out_of_range_index_is_zero() {
        let dual = assert_ok!(DualBasis::new(3, 4));
        assert_eq!(dual.n(), 3);
        for x in linspace(0.0, 1.0, 5) {
            assert_eq!(dual.eval(x), 0.0);
        }
        assert!(dual.pars().iter().all(|&c| c == 0.0));
    }
}
