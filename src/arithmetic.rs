use std::ops::{
    Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Rem, RemAssign, Sub, SubAssign,
};

use smallvec::smallvec;

use crate::{
    Basic, Bernstein, bernstein::Coeffs, binomial_coefficient, binomial_row, product_weight,
};

impl Bernstein {
    /// Sum of two polynomials; the result has the larger of the two degrees.
    ///
    /// `other` is resampled onto this interval when the intervals differ.
    pub fn sum(&self, other: &Bernstein) -> Bernstein {
        self.combine(other, |a, b| a + b)
    }

    pub fn subtract(&self, other: &Bernstein) -> Bernstein {
        self.combine(other, |a, b| a - b)
    }

    fn combine(&self, other: &Bernstein, op: impl Fn(f64, f64) -> f64) -> Bernstein {
        let other = self.aligned(other);
        let n = self.degree().max(other.degree());
        // Elevate, never zero-pad: coefficients of different degree are not comparable.
        let lhs = self.elevate(n - self.degree());
        let rhs = other.elevate(n - other.degree());
        let coeffs = lhs
            .coeffs
            .iter()
            .zip(rhs.coeffs.iter())
            .map(|(&a, &b)| op(a, b))
            .collect();
        Bernstein::from_parts(coeffs, self.domain)
    }

    /// Product of two polynomials; degrees add up.
    pub fn multiply(&self, other: &Bernstein) -> Bernstein {
        let other = self.aligned(other);
        let n = self.degree();
        let m = other.degree();

        let row_n = binomial_row(n);
        let row_m = binomial_row(m);
        let row_nm = binomial_row(n + m);

        let mut coeffs: Coeffs = smallvec![0.0; n + m + 1];
        for (i, &a) in self.coeffs.iter().enumerate() {
            if a == 0.0 {
                continue;
            }
            for (j, &b) in other.coeffs.iter().enumerate() {
                coeffs[i + j] += a * b * row_n[i] * row_m[j] / row_nm[i + j];
            }
        }
        Bernstein::from_parts(coeffs, self.domain)
    }

    /// Product with the basis polynomial `B^M_k`, degree `N + M`.
    pub fn multiply_basic(&self, basic: Basic) -> Bernstein {
        let n = self.degree();
        let (k, m) = (basic.k(), basic.n());
        let mut coeffs: Coeffs = smallvec![0.0; n + m + 1];
        if k <= m {
            for (i, &a) in self.coeffs.iter().enumerate() {
                coeffs[i + k] = a * product_weight(n, i, m, k);
            }
        }
        Bernstein::from_parts(coeffs, self.domain)
    }

    /// Product with `(x - xmin)^i (xmax - x)^j`.
    pub fn multiply_edges(&self, i: usize, j: usize) -> Bernstein {
        if i == 0 && j == 0 {
            return self.clone();
        }
        // (x - xmin)^i (xmax - x)^j = Δ^(i+j) t^i (1-t)^j = Δ^(i+j) B^(i+j)_i / C(i+j, i)
        let scale = self.domain.length().powi((i + j) as i32) / binomial_coefficient(i + j, i);
        let mut result = self.multiply_basic(Basic::new(i, i + j));
        result *= scale;
        result
    }

    /// Integer power by repeated squaring.
    pub fn pow(&self, exp: usize) -> Bernstein {
        let mut result = Bernstein::constant(1.0, self.domain);
        let mut base = self.clone();
        let mut exp = exp;
        while exp > 0 {
            if exp & 1 == 1 {
                result = result.multiply(&base);
            }
            exp >>= 1;
            if exp > 0 {
                base = base.multiply(&base);
            }
        }
        result
    }

    /// Scale all coefficients by `2^i`.
    pub fn ldexp(&self, i: i32) -> Bernstein {
        let factor = 2f64.powi(i);
        let coeffs = self.coeffs.iter().map(|c| c * factor).collect();
        Bernstein::from_parts(coeffs, self.domain)
    }

    pub fn swap(&mut self, other: &mut Bernstein) {
        std::mem::swap(self, other);
    }
}

/// Scale all coefficients of `b` by `2^i`.
pub fn ldexp(b: &Bernstein, i: i32) -> Bernstein {
    b.ldexp(i)
}

pub fn swap(a: &mut Bernstein, b: &mut Bernstein) {
    a.swap(b);
}

//
// Scalar operators. Since Σ B^N_k = 1, adding a constant shifts every coefficient.
//

impl AddAssign<f64> for Bernstein {
    fn add_assign(&mut self, a: f64) {
        self.coeffs.iter_mut().for_each(|c| *c += a);
    }
}

impl SubAssign<f64> for Bernstein {
    fn sub_assign(&mut self, a: f64) {
        self.coeffs.iter_mut().for_each(|c| *c -= a);
    }
}

impl MulAssign<f64> for Bernstein {
    fn mul_assign(&mut self, a: f64) {
        self.coeffs.iter_mut().for_each(|c| *c *= a);
    }
}

impl DivAssign<f64> for Bernstein {
    fn div_assign(&mut self, a: f64) {
        self.coeffs.iter_mut().for_each(|c| *c /= a);
    }
}

macro_rules! impl_scalar_op {
    ($imp:ident, $method:ident, $assign:tt) => {
        impl $imp<f64> for Bernstein {
            type Output = Bernstein;

            fn $method(mut self, a: f64) -> Bernstein {
                self $assign a;
                self
            }
        }

        impl $imp<f64> for &Bernstein {
            type Output = Bernstein;

            fn $method(self, a: f64) -> Bernstein {
                let mut result = self.clone();
                result $assign a;
                result
            }
        }
    };
}

impl_scalar_op!(Add, add, +=);
impl_scalar_op!(Sub, sub, -=);
impl_scalar_op!(Mul, mul, *=);
impl_scalar_op!(Div, div, /=);

impl Add<Bernstein> for f64 {
    type Output = Bernstein;

    fn add(self, p: Bernstein) -> Bernstein {
        p + self
    }
}

impl Add<&Bernstein> for f64 {
    type Output = Bernstein;

    fn add(self, p: &Bernstein) -> Bernstein {
        p + self
    }
}

impl Sub<Bernstein> for f64 {
    type Output = Bernstein;

    fn sub(self, p: Bernstein) -> Bernstein {
        -p + self
    }
}

impl Sub<&Bernstein> for f64 {
    type Output = Bernstein;

    fn sub(self, p: &Bernstein) -> Bernstein {
        -p + self
    }
}

impl Mul<Bernstein> for f64 {
    type Output = Bernstein;

    fn mul(self, p: Bernstein) -> Bernstein {
        p * self
    }
}

impl Mul<&Bernstein> for f64 {
    type Output = Bernstein;

    fn mul(self, p: &Bernstein) -> Bernstein {
        p * self
    }
}

impl Neg for Bernstein {
    type Output = Bernstein;

    fn neg(mut self) -> Bernstein {
        self.coeffs.iter_mut().for_each(|c| *c = -*c);
        self
    }
}

impl Neg for &Bernstein {
    type Output = Bernstein;

    fn neg(self) -> Bernstein {
        -self.clone()
    }
}

//
// Polynomial-polynomial operators, by value and by reference.
//

macro_rules! impl_poly_op {
    ($imp:ident, $method:ident, $inner:ident) => {
        impl $imp<&Bernstein> for &Bernstein {
            type Output = Bernstein;

            fn $method(self, rhs: &Bernstein) -> Bernstein {
                self.$inner(rhs)
            }
        }

        impl $imp<Bernstein> for Bernstein {
            type Output = Bernstein;

            fn $method(self, rhs: Bernstein) -> Bernstein {
                self.$inner(&rhs)
            }
        }

        impl $imp<&Bernstein> for Bernstein {
            type Output = Bernstein;

            fn $method(self, rhs: &Bernstein) -> Bernstein {
                self.$inner(rhs)
            }
        }

        impl $imp<Bernstein> for &Bernstein {
            type Output = Bernstein;

            fn $method(self, rhs: Bernstein) -> Bernstein {
                self.$inner(&rhs)
            }
        }
    };
}

impl_poly_op!(Add, add, sum);
impl_poly_op!(Sub, sub, subtract);
impl_poly_op!(Mul, mul, multiply);
impl_poly_op!(Div, div, quotient);
impl_poly_op!(Rem, rem, remainder);

impl AddAssign<&Bernstein> for Bernstein {
    fn add_assign(&mut self, rhs: &Bernstein) {
        *self = self.sum(rhs);
    }
}

impl SubAssign<&Bernstein> for Bernstein {
    fn sub_assign(&mut self, rhs: &Bernstein) {
        *self = self.subtract(rhs);
    }
}

impl MulAssign<&Bernstein> for Bernstein {
    fn mul_assign(&mut self, rhs: &Bernstein) {
        *self = self.multiply(rhs);
    }
}

impl DivAssign<&Bernstein> for Bernstein {
    fn div_assign(&mut self, rhs: &Bernstein) {
        *self = self.quotient(rhs);
    }
}

impl RemAssign<&Bernstein> for Bernstein {
    fn rem_assign(&mut self, rhs: &Bernstein) {
        *self = self.remainder(rhs);
    }
}

/// The zero constant on `[0, 1]`.
impl num_traits::Zero for Bernstein {
    fn zero() -> Self {
        Bernstein::default()
    }

    fn is_zero(&self) -> bool {
        self.coeffs.iter().all(|&c| c == 0.0)
    }
}

/// The unit constant on `[0, 1]`.
impl num_traits::One for Bernstein {
    fn one() -> Self {
        Bernstein::default() + 1.0
    }
}
