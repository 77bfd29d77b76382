//! Piecewise-linear scale curves.
//!
//! Used for the dependence of the maintenance heat rate on normalized fiber
//! length. Between breakpoints the curve interpolates linearly; outside the
//! first/last breakpoint it holds the endpoint value.

use crate::error::{MetabolicsError, MetabolicsResult};
use mf_core::numeric::Real;
use serde::{Deserialize, Serialize};

/// Ordered `(x, y)` breakpoints with strictly increasing `x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<(Real, Real)>", into = "Vec<(Real, Real)>")]
pub struct PiecewiseLinear {
    points: Vec<(Real, Real)>,
}

impl PiecewiseLinear {
    /// Create a curve from breakpoints.
    ///
    /// # Errors
    /// The list must be non-empty, every coordinate finite, and `x` strictly
    /// increasing. A single breakpoint gives a constant curve.
    pub fn new(points: Vec<(Real, Real)>) -> MetabolicsResult<Self> {
        if points.is_empty() {
            return Err(MetabolicsError::configuration(
                "piecewise-linear curve needs at least one breakpoint",
            ));
        }
        for (i, &(x, y)) in points.iter().enumerate() {
            if !x.is_finite() || !y.is_finite() {
                return Err(MetabolicsError::configuration(format!(
                    "curve breakpoint {i} is not finite: ({x}, {y})"
                )));
            }
        }
        if let Some(i) = points.windows(2).position(|w| w[1].0 <= w[0].0) {
            return Err(MetabolicsError::configuration(format!(
                "curve x values must be strictly increasing (breakpoint {})",
                i + 1
            )));
        }
        Ok(Self { points })
    }

    /// Curve that returns `value` everywhere.
    pub fn constant(value: Real) -> MetabolicsResult<Self> {
        Self::new(vec![(0.0, value)])
    }

    /// Default length dependence of the maintenance heat rate (Bhargava 2004).
    pub fn bhargava_maintenance() -> Self {
        Self {
            points: vec![
                (0.0, 0.5),
                (0.5, 0.5),
                (1.0, 1.0),
                (1.5, 0.5),
                (10.0, 0.5),
            ],
        }
    }

    pub fn points(&self) -> &[(Real, Real)] {
        &self.points
    }

    /// Evaluate the curve at `x`.
    ///
    /// NaN input yields NaN.
    pub fn eval(&self, x: Real) -> Real {
        let (x_first, y_first) = self.points[0];
        let (x_last, y_last) = self.points[self.points.len() - 1];

        if x.is_nan() {
            return Real::NAN;
        }
        if x <= x_first {
            return y_first;
        }
        if x >= x_last {
            return y_last;
        }

        // First breakpoint strictly right of x; exists because x < x_last.
        let hi = self.points.partition_point(|&(px, _)| px <= x);
        let (x0, y0) = self.points[hi - 1];
        let (x1, y1) = self.points[hi];
        y0 + (y1 - y0) * (x - x0) / (x1 - x0)
    }
}

impl Default for PiecewiseLinear {
    fn default() -> Self {
        Self::bhargava_maintenance()
    }
}

impl TryFrom<Vec<(Real, Real)>> for PiecewiseLinear {
    type Error = MetabolicsError;

    fn try_from(points: Vec<(Real, Real)>) -> Result<Self, Self::Error> {
        Self::new(points)
    }
}

impl From<PiecewiseLinear> for Vec<(Real, Real)> {
    fn from(curve: PiecewiseLinear) -> Self {
        curve.points
    }
}
