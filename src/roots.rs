use smallvec::SmallVec;

use crate::Bernstein;

/// Number of strict sign changes in the coefficients, exact zeros ignored.
///
/// Upper bound on the number of real roots in the interval (Descartes' rule of signs).
pub fn sign_changes(b: &Bernstein) -> usize {
    let mut changes = 0;
    let mut previous = 0.0f64;
    for &c in b.pars() {
        if c == 0.0 {
            continue;
        }
        if previous != 0.0 && (c > 0.0) != (previous > 0.0) {
            changes += 1;
        }
        previous = c;
    }
    changes
}

/// Zero crossings of the control polygon `(x(k/N), c_k)`.
pub fn crossing_points(b: &Bernstein) -> Vec<f64> {
    let points = control_points(b);
    let mut crossings = Vec::new();
    for pair in points.windows(2) {
        let [x1, y1] = pair[0];
        let [x2, y2] = pair[1];
        if y1 == 0.0 {
            crossings.push(x1);
        } else if y1 * y2 < 0.0 {
            crossings.push(x1 - y1 * (x2 - x1) / (y2 - y1));
        }
    }
    if let Some(&[x, y]) = points.last() {
        if y == 0.0 {
            crossings.push(x);
        }
    }
    crossings
}

/// Leftmost point where the convex hull of the control points meets the axis,
/// or `xmax` when it never does. No root of `b` lies to the left of it.
pub fn left_line_hull(b: &Bernstein) -> f64 {
    let (min_x, _) = ControlHull::of(b).axis_span();
    if min_x.is_finite() { min_x } else { b.xmax() }
}

/// Rightmost point where the convex hull of the control points meets the axis,
/// or `xmin` when it never does. No root of `b` lies to the right of it.
pub fn right_line_hull(b: &Bernstein) -> f64 {
    let (_, max_x) = ControlHull::of(b).axis_span();
    if max_x.is_finite() { max_x } else { b.xmin() }
}

fn control_points(b: &Bernstein) -> SmallVec<[[f64; 2]; 16]> {
    let n = b.degree();
    if n == 0 {
        let c = b.par(0);
        return smallvec::smallvec![[b.xmin(), c], [b.xmax(), c]];
    }
    b.pars()
        .iter()
        .enumerate()
        .map(|(k, &c)| [b.x(k as f64 / n as f64), c])
        .collect()
}

/// Control points split by the side of the x-axis they lie on.
///
/// Every segment from a point above to a point below the axis lies inside the convex hull,
/// and the hull meets the axis exactly on the span of those crossings.
#[derive(Debug, Clone)]
struct ControlHull {
    above: SmallVec<[[f64; 2]; 16]>,
    below: SmallVec<[[f64; 2]; 16]>,
    // Span of the control points lying on the axis
    on_axis: (f64, f64),
}

impl ControlHull {
    fn of(b: &Bernstein) -> Self {
        let mut hull = Self {
            above: SmallVec::new(),
            below: SmallVec::new(),
            on_axis: (f64::INFINITY, -f64::INFINITY),
        };
        for [x, y] in control_points(b) {
            debug_assert!(x.is_finite() && y.is_finite(), "control point ({x}, {y})");
            if y > 0.0 {
                hull.above.push([x, y]);
            } else if y < 0.0 {
                hull.below.push([x, y]);
            } else {
                hull.on_axis.0 = hull.on_axis.0.min(x);
                hull.on_axis.1 = hull.on_axis.1.max(x);
            }
        }
        hull
    }

    /// `(left, right)` ends of the hull on the axis, `(inf, -inf)` when it misses the axis.
    fn axis_span(&self) -> (f64, f64) {
        let crossings = self.above.iter().flat_map(|&[xa, ya]| {
            self.below
                .iter()
                .map(move |&[xb, yb]| xa + ya / (ya - yb) * (xb - xa))
        });
        crossings.fold(self.on_axis, |(left, right), x| (left.min(x), right.max(x)))
    }
}
