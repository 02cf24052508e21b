use smallvec::smallvec;

use crate::{
    Basic, Bernstein, Interval, bernstein::Coeffs, binomial::factorial, binomial_coefficient,
};

impl Bernstein {
    /// Derivative as a polynomial of degree `N - 1` (a zero constant for `N = 0`).
    pub fn derivative(&self) -> Bernstein {
        let n = self.degree();
        if n == 0 {
            return Bernstein::constant(0.0, self.domain);
        }
        let scale = n as f64 / self.domain.length();
        let coeffs = self
            .coeffs
            .windows(2)
            .map(|w| scale * (w[1] - w[0]))
            .collect();
        Bernstein::from_parts(coeffs, self.domain)
    }

    /// Derivative at `x`, zero outside `[xmin, xmax]`.
    pub fn derivative_at(&self, x: f64) -> f64 {
        if !self.domain.contains(x) || self.degree() == 0 {
            return 0.0;
        }
        self.derivative().evaluate(x)
    }

    /// `I(x) = ∫_{xmin}^{x} B(u) du + c` as a polynomial of degree `N + 1`.
    pub fn indefinite_integral(&self, c: f64) -> Bernstein {
        let scale = self.domain.length() / (self.degree() + 1) as f64;
        let mut coeffs: Coeffs = smallvec![c];
        let mut running = c;
        for &p in &self.coeffs {
            running += p * scale;
            coeffs.push(running);
        }
        Bernstein::from_parts(coeffs, self.domain)
    }

    /// Integral over the whole interval.
    pub fn integral(&self) -> f64 {
        let sum: f64 = self.coeffs.iter().sum();
        sum * self.domain.length() / (self.degree() + 1) as f64
    }

    /// Integral between `low` and `high`, both clamped to the interval.
    pub fn integral_range(&self, low: f64, high: f64) -> f64 {
        let low = self.domain.clamp(low);
        let high = self.domain.clamp(high);
        if low == high {
            return 0.0;
        }
        if low == self.xmin() && high == self.xmax() {
            return self.integral();
        }
        let primitive = self.indefinite_integral(0.0);
        primitive.evaluate(high) - primitive.evaluate(low)
    }
}

/// `∫_{xmin}^{xmax} B(x) e^{τx} dx`.
pub fn integrate_exp(poly: &Bernstein, tau: f64) -> f64 {
    if tau == 0.0 {
        return poly.integral();
    }
    let n = poly.degree();
    let length = poly.domain.length();
    let z = tau * length;

    // ∫_0^1 B^N_k(t) e^{zt} dt = M(k+1, N+2, z) / (N+1). For z < 0 the Kummer transformation
    // M(a, b, z) = e^z M(b - a, b, -z) keeps every series term positive.
    let (sum, exponent) = if z >= 0.0 {
        let sum: f64 = poly
            .coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| c * scaled_kummer((k + 1) as f64, (n + 2) as f64, z))
            .sum();
        (sum, tau * poly.xmax())
    } else {
        let sum: f64 = poly
            .coeffs
            .iter()
            .enumerate()
            .map(|(k, &c)| c * scaled_kummer((n + 1 - k) as f64, (n + 2) as f64, -z))
            .sum();
        (sum, tau * poly.xmin())
    };
    length * exponent.exp() * sum / (n + 1) as f64
}

/// `∫_{a}^{b} B(x) e^{τx} dx` with the limits clamped to the interval.
pub fn integrate_exp_range(poly: &Bernstein, tau: f64, a: f64, b: f64) -> f64 {
    let low = poly.domain.clamp(a);
    let high = poly.domain.clamp(b);
    if low == high {
        return 0.0;
    }
    if low > high {
        return -integrate_exp_range(poly, tau, high, low);
    }
    if low == poly.xmin() && high == poly.xmax() {
        return integrate_exp(poly, tau);
    }
    integrate_exp(&poly.resample(Interval::between(low, high)), tau)
}

/// `∫_0^1 B^N_k(t) e^{τt} dt` for a basis polynomial.
pub fn integrate_exp_basic(basic: Basic, tau: f64) -> f64 {
    let (k, n) = (basic.k(), basic.n());
    if k > n {
        return 0.0;
    }
    let norm = 1.0 / (n + 1) as f64;
    if tau == 0.0 {
        norm
    } else if tau > 0.0 {
        norm * tau.exp() * scaled_kummer((k + 1) as f64, (n + 2) as f64, tau)
    } else {
        norm * scaled_kummer((n + 1 - k) as f64, (n + 2) as f64, -tau)
    }
}

/// `∫_0^1 B^N_k(t) t^m / m! dt` for a basis polynomial.
pub fn integrate_poly_basic(basic: Basic, m: usize) -> f64 {
    let (k, n) = (basic.k(), basic.n());
    if k > n {
        return 0.0;
    }
    basic_moment(n, k, m) / factorial(m)
}

/// `∫_{xmin}^{xmax} B(x) (x - xmin)^m / m! dx`.
pub fn integrate_poly(poly: &Bernstein, m: usize) -> f64 {
    let n = poly.degree();
    let length = poly.domain.length();
    let sum: f64 = poly
        .coeffs
        .iter()
        .enumerate()
        .map(|(k, &c)| c * basic_moment(n, k, m))
        .sum();
    sum * length.powi((m + 1) as i32) / factorial(m)
}

/// `∫_{low}^{high} B(x) (x - xmin)^m / m! dx` with the limits clamped to the interval.
pub fn integrate_poly_range(poly: &Bernstein, m: usize, low: f64, high: f64) -> f64 {
    poly.multiply_edges(m, 0).integral_range(low, high) / factorial(m)
}

// ∫_0^1 B^N_k(t) t^m dt = C(N, k) / ((N + m + 1) C(N + m, k + m))
fn basic_moment(n: usize, k: usize, m: usize) -> f64 {
    binomial_coefficient(n, k) / ((n + m + 1) as f64 * binomial_coefficient(n + m, k + m))
}

/// `e^{-z} M(a, b, z)` with Kummer's confluent hypergeometric function `M`, for `b > a > 0`
/// and `z >= 0`, where every term of the series is positive.
///
/// The partial sum is rescaled as it grows so that `M` itself may exceed the `f64` range.
fn scaled_kummer(a: f64, b: f64, z: f64) -> f64 {
    debug_assert!(z >= 0.0 && a > 0.0 && b > a, "scaled_kummer({a}, {b}, {z})");
    const MAX_TERMS: usize = 1_000_000;
    const RESCALE: f64 = 1e200;

    let mut term = 1.0;
    let mut sum = 1.0;
    let mut log_scale = 0.0;
    for n in 0..MAX_TERMS {
        let nf = n as f64;
        term *= (a + nf) / (b + nf) * z / (nf + 1.0);
        sum += term;
        if sum > RESCALE {
            sum /= RESCALE;
            term /= RESCALE;
            log_scale += RESCALE.ln();
        }
        // Terms only start shrinking once n exceeds z.
        if nf > z && term <= f64::EPSILON * sum {
            return sum * (log_scale - z).exp();
        }
    }
    log::warn!("scaled_kummer({a}, {b}, {z}) did not converge in {MAX_TERMS} terms");
    sum * (log_scale - z).exp()
}

#[cfg(test)]
mod tests {
    use approx::assert_abs_diff_eq;
    use assertables::assert_lt;
    use rand::SeedableRng as _;

    use crate::test_utils::{linspace, random_poly, simpson};

    use super::*;

    #[test]
    fn derivative_coefficients() {
        // x^2 on [0, 2] has coefficients [0, 0, 4]
        let p = Bernstein::new([0.0, 0.0, 4.0], 0.0, 2.0).unwrap();
        let d = p.derivative();
        assert_eq!(d.degree(), 1);
        for x in linspace(0.0, 2.0, 9) {
            assert_lt!((d.eval(x) - 2.0 * x).abs(), 1e-14);
            assert_lt!((p.derivative_at(x) - 2.0 * x).abs(), 1e-14);
        }
        assert_eq!(p.derivative_at(3.0), 0.0);
        assert_eq!(Bernstein::new([5.0], 0.0, 1.0).unwrap().derivative().pars(), &[0.0]);
    }

    #[test]
    fn integral_matches_primitive() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(3);
        for n in 0..8 {
            let p = random_poly(&mut rng, n, -1.5, 2.5);
            let primitive = p.indefinite_integral(0.0);
            assert_eq!(primitive.degree(), n + 1);
            let expected = primitive.evaluate(p.xmax()) - primitive.evaluate(p.xmin());
            assert_lt!((p.integral() - expected).abs(), 1e-12);
            assert_lt!((p.integral() - simpson(|x| p.eval(x), -1.5, 2.5)).abs(), 1e-9);
        }
    }

    #[test]
    fn derivative_integral_roundtrip() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(5);
        for n in 1..8 {
            let p = random_poly(&mut rng, n, 1.0, 4.0);
            let q = p.derivative().indefinite_integral(p.eval(p.xmin()));
            for x in linspace(1.0, 4.0, 13) {
                assert_lt!((q.eval(x) - p.eval(x)).abs(), 1e-11);
            }
            assert_abs_diff_eq!(q, p.clone(), epsilon = 1e-11);
        }
    }

    #[test]
    fn integral_range_clamps() {
        // x on [0, 1]
        let p = Bernstein::new([0.0, 1.0], 0.0, 1.0).unwrap();
        assert_lt!((p.integral_range(0.0, 0.5) - 0.125).abs(), 1e-15);
        assert_lt!((p.integral_range(-5.0, 5.0) - 0.5).abs(), 1e-15);
        assert_lt!((p.integral_range(0.5, 0.0) + 0.125).abs(), 1e-15);
        assert_eq!(p.integral_range(2.0, 3.0), 0.0);
    }

    #[test]
    fn integrate_exp_against_quadrature() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(13);
        for (n, tau) in itertools::iproduct!([0usize, 1, 3, 6], [-7.5, -1.0, -1e-3, 0.0, 0.4, 3.0]) {
            let p = random_poly(&mut rng, n, -0.5, 1.5);
            let expected = simpson(|x| p.eval(x) * (tau * x).exp(), -0.5, 1.5);
            let actual = integrate_exp(&p, tau);
            assert_lt!((actual - expected).abs(), 1e-8 * (1.0 + expected.abs()));

            let expected = simpson(|x| p.eval(x) * (tau * x).exp(), 0.0, 1.0);
            let actual = integrate_exp_range(&p, tau, 0.0, 1.0);
            assert_lt!((actual - expected).abs(), 1e-8 * (1.0 + expected.abs()));
        }
    }

    #[test]
    fn integrate_exp_with_large_exponents() {
        // ∫_{-1000}^0 e^x dx and ∫_0^1000 e^{-x} dx
        let p = Bernstein::new([1.0, 1.0], -1000.0, 0.0).unwrap();
        assert_lt!((integrate_exp(&p, 1.0) - 1.0).abs(), 1e-12);
        let p = Bernstein::new([1.0], 0.0, 1000.0).unwrap();
        assert_lt!((integrate_exp(&p, -1.0) - 1.0).abs(), 1e-12);
        assert_lt!((integrate_exp_range(&p, -1.0, 0.0, 500.0) - 1.0).abs(), 1e-12);

        // ∫_0^1 t e^{-1000 t} dt = (1 - 1001 e^{-1000}) / 1000^2
        let t = Bernstein::new([0.0, 1.0], 0.0, 1.0).unwrap();
        assert_lt!((integrate_exp(&t, -1000.0) * 1e6 - 1.0).abs(), 1e-12);
        assert_lt!((integrate_exp_basic(Basic::new(1, 1), -1000.0) * 1e6 - 1.0).abs(), 1e-12);

        // ∫_{-1}^0 x e^{1000 x} dx = -(1 - 1001 e^{-1000}) / 1000^2
        let x = Bernstein::new([-1.0, 0.0], -1.0, 0.0).unwrap();
        assert_lt!((integrate_exp(&x, 1000.0) * 1e6 + 1.0).abs(), 1e-12);
    }

    #[test]
    fn integrate_exp_basic_functions() {
        for (k, n) in [(0, 0), (0, 3), (2, 3), (3, 3)] {
            let b = Bernstein::basic(Basic::new(k, n), 0.0, 1.0).unwrap();
            for tau in [-2.0, 0.0, 1.5] {
                let expected = simpson(|x| b.eval(x) * (tau * x).exp(), 0.0, 1.0);
                assert_lt!((integrate_exp_basic(Basic::new(k, n), tau) - expected).abs(), 1e-10);
            }
        }
        assert_eq!(integrate_exp_basic(Basic::new(4, 3), 1.0), 0.0);
    }

    #[test]
    fn integrate_poly_moments() {
        let p = Bernstein::new([1.0, -2.0, 0.5, 3.0], 1.0, 3.0).unwrap();
        for m in 0..5 {
            let mf = factorial(m);
            let expected = simpson(|x| p.eval(x) * (x - 1.0).powi(m as i32) / mf, 1.0, 3.0);
            assert_lt!((integrate_poly(&p, m) - expected).abs(), 1e-9);
            assert_lt!((integrate_poly_range(&p, m, 1.0, 3.0) - expected).abs(), 1e-9);

            let expected = simpson(|x| p.eval(x) * (x - 1.0).powi(m as i32) / mf, 1.5, 2.5);
            assert_lt!((integrate_poly_range(&p, m, 1.5, 2.5) - expected).abs(), 1e-9);
        }
        // ∫_0^1 B^2_1 t dt = 2 ∫ t^2 (1 - t) = 1/6
        assert_lt!((integrate_poly_basic(Basic::new(1, 2), 1) - 1.0 / 6.0).abs(), 1e-15);
        assert_eq!(integrate_poly_basic(Basic::new(3, 2), 1), 0.0);
    }
}
