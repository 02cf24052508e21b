//! Dense univariate polynomials in the Bernstein basis over an arbitrary interval.
//!
//! A [`Bernstein`] polynomial of degree `N` on `[xmin, xmax]` is
//! `f(x) = Σ c_k B^N_k(t)` with `t = (x - xmin) / (xmax - xmin)` and
//! `B^N_k(t) = C(N, k) t^k (1 - t)^(N - k)`.
//!
//! ```rust
//! use bernstein::{Basic, Bernstein};
//!
//! let b = Bernstein::basic(Basic::new(2, 4), 0.0, 1.0).unwrap();
//! assert!((b.eval(0.5) - 0.375).abs() < 1e-15);
//!
//! let p = Bernstein::new([1.0, 1.0], 0.0, 1.0).unwrap() + 1.0;
//! assert_eq!(p.pars(), &[2.0, 2.0]);
//! ```

mod arithmetic;
mod basis;
mod bernstein;
mod binomial;
mod calculus;
mod degree;
mod division;
mod dual;
pub mod interpolation;
mod interval;
mod monomial;
mod poly_sum;
mod roots;

#[cfg(test)]
mod test_utils;

pub use arithmetic::{ldexp, swap};
pub use basis::{ChebyshevSum, LegendreSum};
pub use bernstein::{Basic, Bernstein, DEFAULT_ULPS, Tiny, casteljau};
pub use binomial::*;
pub use calculus::{
    integrate_exp, integrate_exp_basic, integrate_exp_range, integrate_poly, integrate_poly_basic,
    integrate_poly_range,
};
pub use division::{deflate, deflate_left, deflate_right, divmod};
pub use dual::DualBasis;
pub use interval::Interval;
pub use monomial::Polynomial;
pub use poly_sum::PolySum;
pub use roots::{crossing_points, left_line_hull, right_line_hull, sign_changes};

use snafu::prelude::*;

#[derive(Debug, Snafu)]
pub enum BernsteinError {
    #[snafu(display("Degenerate interval: [{}, {}] has zero length", xmin, xmax))]
    DegenerateInterval { xmin: f64, xmax: f64 },

    #[snafu(display("Interval bound is not finite: {}", value))]
    NonFiniteBound { value: f64 },

    #[snafu(display("A polynomial needs at least one coefficient"))]
    EmptyCoefficients,

    #[snafu(display("Cannot reduce a polynomial of degree {} by {}", degree, by))]
    DegreeUnderflow { degree: usize, by: usize },

    #[snafu(display("Duplicate interpolation abscissa: {}", x))]
    DuplicateAbscissa { x: f64 },

    #[snafu(display("Algorithm error (bug in library): {}", message))]
    AlgorithmError { message: String },
}
