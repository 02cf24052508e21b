use crate::BernsteinError;

/// The affine map between a global interval `[xmin, xmax]` and the unit interval `[0, 1]`.
///
/// Always `xmin < xmax`: swapped bounds are reordered on construction.
#[derive(Clone, Copy, Debug)]
pub struct Interval {
    xmin: f64,
    xmax: f64,
}

impl Interval {
    pub const UNIT: Interval = Interval {
        xmin: 0.0,
        xmax: 1.0,
    };

    pub fn new(a: f64, b: f64) -> Result<Self, BernsteinError> {
        for value in [a, b] {
            if !value.is_finite() {
                return Err(BernsteinError::NonFiniteBound { value });
            }
        }
        if a == b {
            return Err(BernsteinError::DegenerateInterval { xmin: a, xmax: b });
        }
        Ok(Self {
            xmin: a.min(b),
            xmax: a.max(b),
        })
    }

    /// Sub-interval of an existing interval, with `low < high` already checked.
    pub(crate) fn between(low: f64, high: f64) -> Self {
        debug_assert!(low < high, "Invalid interval [{low}, {high}]");
        Self {
            xmin: low,
            xmax: high,
        }
    }

    pub fn xmin(&self) -> f64 {
        self.xmin
    }

    pub fn xmax(&self) -> f64 {
        self.xmax
    }

    pub fn length(&self) -> f64 {
        self.xmax - self.xmin
    }

    pub fn center(&self) -> f64 {
        0.5 * (self.xmin + self.xmax)
    }

    /// Global to canonical coordinate.
    pub fn t(&self, x: f64) -> f64 {
        (x - self.xmin) / (self.xmax - self.xmin)
    }

    /// Canonical to global coordinate.
    pub fn x(&self, t: f64) -> f64 {
        self.xmin + (self.xmax - self.xmin) * t
    }

    pub fn contains(&self, x: f64) -> bool {
        self.xmin <= x && x <= self.xmax
    }

    pub fn clamp(&self, x: f64) -> f64 {
        x.clamp(self.xmin, self.xmax)
    }
}

impl PartialEq for Interval {
    fn eq(&self, other: &Self) -> bool {
        self.xmin == other.xmin && self.xmax == other.xmax
    }
}

impl TryFrom<(f64, f64)> for Interval {
    type Error = BernsteinError;

    fn try_from((a, b): (f64, f64)) -> Result<Self, Self::Error> {
        Interval::new(a, b)
    }
}

#[cfg(test)]
impl approx::AbsDiffEq for Interval {
    type Epsilon = f64;

    fn default_epsilon() -> Self::Epsilon {
        f64::default_epsilon()
    }

    fn abs_diff_eq(&self, other: &Self, epsilon: Self::Epsilon) -> bool {
        (self.xmin - other.xmin).abs() <= epsilon && (self.xmax - other.xmax).abs() <= epsilon
    }
}
