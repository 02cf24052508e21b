//! Polynomial interpolation directly in the Bernstein basis.
//!
//! The coefficients are built with the Newton–Bernstein algorithm of Ainsworth and
//! Sánchez: divided differences in canonical coordinates are folded into the Bernstein
//! coefficients one node at a time, each stage elevating the running interpolant by one
//! degree.
//!
//! ```rust
//! use bernstein::interpolation;
//!
//! let p = interpolation::bernstein([0.0, 1.0, 2.0], [0.0, 1.0, 4.0], 0.0, 2.0).unwrap();
//! assert!((p.eval(1.5) - 2.25).abs() < 1e-14);
//! ```

use smallvec::smallvec;

use crate::{Bernstein, BernsteinError, Interval, bernstein::Coeffs};

/// Interpolating polynomial of degree `len(xs) - 1` through `(xs[i], ys[i])` on
/// `[xmin, xmax]`.
///
/// Extra `ys` are ignored and missing ones are taken as zero. The abscissas need not be
/// sorted nor lie inside the interval, but must be distinct.
pub fn bernstein(
    xs: impl IntoIterator<Item = f64>,
    ys: impl IntoIterator<Item = f64>,
    xmin: f64,
    xmax: f64,
) -> Result<Bernstein, BernsteinError> {
    let domain = Interval::new(xmin, xmax)?;
    let xs: Coeffs = xs.into_iter().collect();
    let mut ys = ys.into_iter();
    let ys: Coeffs = xs.iter().map(|_| ys.next().unwrap_or(0.0)).collect();
    newton_bernstein(&xs, ys, domain)
}

/// Interpolate `func` sampled at `xs`.
pub fn bernstein_fn(
    func: impl Fn(f64) -> f64,
    xs: impl IntoIterator<Item = f64>,
    xmin: f64,
    xmax: f64,
) -> Result<Bernstein, BernsteinError> {
    let domain = Interval::new(xmin, xmax)?;
    let xs: Coeffs = xs.into_iter().collect();
    let ys: Coeffs = xs.iter().map(|&x| func(x)).collect();
    newton_bernstein(&xs, ys, domain)
}

/// Interpolate `func` of degree `n` on the `n + 1` Chebyshev–Gauss–Lobatto nodes of
/// `[xmin, xmax]`, which include both edges. `n = 0` samples the midpoint only.
pub fn lobatto(
    func: impl Fn(f64) -> f64,
    n: usize,
    xmin: f64,
    xmax: f64,
) -> Result<Bernstein, BernsteinError> {
    let domain = Interval::new(xmin, xmax)?;
    let xs = lobatto_nodes(n, domain);
    log::debug!("lobatto: {} nodes on [{}, {}]", xs.len(), domain.xmin(), domain.xmax());
    let ys: Coeffs = xs.iter().map(|&x| func(x)).collect();
    newton_bernstein(&xs, ys, domain)
}

impl Bernstein {
    /// See [`interpolation::bernstein`](crate::interpolation::bernstein).
    pub fn interpolate(
        xs: impl IntoIterator<Item = f64>,
        ys: impl IntoIterator<Item = f64>,
        xmin: f64,
        xmax: f64,
    ) -> Result<Bernstein, BernsteinError> {
        bernstein(xs, ys, xmin, xmax)
    }
}

fn lobatto_nodes(n: usize, domain: Interval) -> Coeffs {
    if n == 0 {
        return smallvec![domain.center()];
    }
    let half = 0.5 * domain.length();
    let center = domain.center();
    let mut xs: Coeffs = (0..=n)
        .map(|k| center - (std::f64::consts::PI * k as f64 / n as f64).cos() * half)
        .collect();
    xs[0] = domain.xmin();
    xs[n] = domain.xmax();
    xs
}

fn newton_bernstein(
    xs: &[f64],
    mut f: Coeffs,
    domain: Interval,
) -> Result<Bernstein, BernsteinError> {
    if xs.is_empty() {
        return Ok(Bernstein::constant(0.0, domain));
    }
    for (i, &x) in xs.iter().enumerate() {
        if xs[..i].contains(&x) {
            return Err(BernsteinError::DuplicateAbscissa { x });
        }
    }

    let t: Coeffs = xs.iter().map(|&x| domain.t(x)).collect();
    let n = t.len() - 1;

    // `w` holds the coefficients of Π_{i<s} (t - t_i) at degree s.
    let mut w: Coeffs = smallvec![0.0; n + 1];
    let mut c: Coeffs = smallvec![0.0; n + 1];
    w[0] = 1.0;
    c[0] = f[0];

    for s in 1..=n {
        for k in (s..=n).rev() {
            f[k] = (f[k] - f[k - 1]) / (t[k] - t[k - s]);
        }
        let ts = t[s - 1];
        let sf = s as f64;
        for j in (1..=s).rev() {
            let a = j as f64 / sf;
            w[j] = a * w[j - 1] * (1.0 - ts) - (1.0 - a) * w[j] * ts;
            c[j] = a * c[j - 1] + (1.0 - a) * c[j] + f[s] * w[j];
        }
        w[0] = -w[0] * ts;
        c[0] += f[s] * w[0];
    }

    Ok(Bernstein::from_parts(c, domain))
}

#[cfg(test)]
mod tests {
    use assertables::{assert_err, assert_lt, assert_ok};
    use pretty_assertions as pa;
    use rand::{Rng as _, SeedableRng as _};

    use crate::test_utils::linspace;

    use super::*;

    #[test]
    fn parabola_through_three_points() {
        let p = assert_ok!(bernstein([0.0, 1.0, 2.0], [0.0, 1.0, 4.0], 0.0, 2.0));
        assert_eq!(p.degree(), 2);
        assert_lt!((p.eval(1.5) - 2.25).abs(), 1e-14);
        for (a, e) in p.pars().iter().zip([0.0, 0.0, 4.0]) {
            assert_lt!((a - e).abs(), 1e-14);
        }
        let q = assert_ok!(Bernstein::interpolate([2.0, 0.0, 1.0], [4.0, 0.0, 1.0], 0.0, 2.0));
        assert_lt!((q.eval(1.5) - 2.25).abs(), 1e-14);
    }

    #[test]
    fn exact_at_lobatto_nodes() {
        let mut rng = rand::rngs::SmallRng::seed_from_u64(41);
        for n in 1..=20 {
            let domain = Interval::new(-1.0, 3.0).unwrap();
            let xs = lobatto_nodes(n, domain);
            let ys: Vec<f64> = xs.iter().map(|_| rng.random_range(-1.0..=1.0)).collect();
            let p = assert_ok!(bernstein(xs.iter().copied(), ys.iter().copied(), -1.0, 3.0));
            assert_eq!(p.degree(), n);
            for (&x, &y) in xs.iter().zip(&ys) {
                assert_lt!((p.eval(x) - y).abs(), 1e-8);
            }
        }
    }

    #[test]
    fn exact_at_uniform_nodes() {
        let func = |x: f64| (3.0 * x).sin() + 0.5 * x;
        for n in 1..=20 {
            let xs: Vec<f64> = linspace(0.0, 2.0, n + 1).collect();
            let p = assert_ok!(bernstein_fn(func, xs.iter().copied(), 0.0, 2.0));
            for &x in &xs {
                assert_lt!((p.eval(x) - func(x)).abs(), 1e-9);
            }
        }
    }

    #[test]
    fn ys_are_truncated_or_padded() {
        let p = assert_ok!(bernstein([0.0, 1.0], [1.0, 3.0, 100.0], 0.0, 1.0));
        pa::assert_eq!(p.pars(), &[1.0, 3.0]);

        let q = assert_ok!(bernstein([0.0, 0.5, 1.0], [2.0], 0.0, 1.0));
        assert_eq!(q.degree(), 2);
        assert_lt!((q.eval(0.0) - 2.0).abs(), 1e-15);
        assert_lt!(q.eval(0.5).abs(), 1e-15);
        assert_lt!(q.eval(1.0).abs(), 1e-15);
    }

    #[test]
    fn degenerate_inputs() {
        let p = assert_ok!(bernstein(Vec::new(), Vec::new(), 0.0, 1.0));
        pa::assert_eq!(p.pars(), &[0.0]);
        assert_err!(bernstein([0.0, 0.5, 0.5], [1.0, 2.0, 3.0], 0.0, 1.0));
        assert_err!(bernstein([0.0], [1.0], 1.0, 1.0));
    }

    #[test]
    fn lobatto_grid() {
        let domain = Interval::new(2.0, 6.0).unwrap();
        pa::assert_eq!(lobatto_nodes(0, domain).as_slice(), &[4.0]);
        let nodes = lobatto_nodes(4, domain);
        assert_eq!(nodes.len(), 5);
        assert_eq!(nodes[0], 2.0);
        assert_eq!(nodes[4], 6.0);
        assert_lt!((nodes[2] - 4.0).abs(), 1e-15);
        assert!(nodes.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn lobatto_converges_for_smooth_functions() {
        let c = assert_ok!(lobatto(f64::exp, 0, 0.0, 2.0));
        assert_eq!(c.degree(), 0);
        assert_lt!((c.eval(0.3) - 1f64.exp()).abs(), 1e-15);

        let p = assert_ok!(lobatto(f64::sin, 20, 0.0, 3.0));
        assert_eq!(p.degree(), 20);
        for x in linspace(0.0, 3.0, 61) {
            assert_lt!((p.eval(x) - x.sin()).abs(), 1e-10);
        }
    }
}
