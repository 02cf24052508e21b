/// An ordered, never-empty sequence of polynomial coefficients in some basis.
///
/// Degree `N` means `N + 1` coefficients.
pub trait PolySum {
    fn pars(&self) -> &[f64];

    /// Set coefficient `k`, returns false when `k` is out of range.
    fn set_par(&mut self, k: usize, value: f64) -> bool;

    fn degree(&self) -> usize {
        self.pars().len() - 1
    }

    fn npars(&self) -> usize {
        self.pars().len()
    }

    /// Coefficient `k`, or zero when `k > degree`.
    fn par(&self, k: usize) -> f64 {
        self.pars().get(k).copied().unwrap_or(0.0)
    }
}

macro_rules! impl_poly_sum {
    ($ty:ty) => {
        impl $crate::PolySum for $ty {
            fn pars(&self) -> &[f64] {
                &self.coeffs
            }

            fn set_par(&mut self, k: usize, value: f64) -> bool {
                match self.coeffs.get_mut(k) {
                    Some(c) => {
                        *c = value;
                        true
                    }
                    None => false,
                }
            }
        }
    };
}

pub(crate) use impl_poly_sum;
