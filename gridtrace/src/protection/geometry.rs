//! Coordination Geometry Builder
//!
//! Turns a device's evaluated upper and lower curves into boundary lines
//! and the closed polygon spanning its operating envelope. The upper curve
//! is reversed so the two boundaries chain into a single ring: the upper
//! boundary runs high-to-low current, the lower boundary low-to-high, and
//! their concatenation closes without self-intersection.

use serde::Serialize;

use crate::protection::evaluator::CurvePoint;

/// Degenerate inputs that cannot form a region. Recoverable: the caller
/// may simply display nothing for the device.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeometryError {
    #[error("degenerate coordination region: {points} boundary points (need at least 3)")]
    Degenerate { points: usize },
}

/// Boundary lines and closed envelope between a device's two
/// characteristic curves.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CoordinationRegion {
    /// Upper characteristic in descending-current traversal order.
    pub upper_boundary: Vec<CurvePoint>,
    /// Lower characteristic in evaluation order.
    pub lower_boundary: Vec<CurvePoint>,
    /// Closed ring: reversed upper followed by lower.
    pub polygon: Vec<CurvePoint>,
}

/// Build the coordination region for an evaluated device.
pub fn build_region(
    upper: &[CurvePoint],
    lower: &[CurvePoint],
) -> Result<CoordinationRegion, GeometryError> {
    let points = upper.len() + lower.len();
    if points < 3 {
        return Err(GeometryError::Degenerate { points });
    }

    let upper_boundary: Vec<CurvePoint> = upper.iter().rev().copied().collect();
    let lower_boundary: Vec<CurvePoint> = lower.to_vec();

    let mut polygon = Vec::with_capacity(points);
    polygon.extend_from_slice(&upper_boundary);
    polygon.extend_from_slice(&lower_boundary);

    Ok(CoordinationRegion {
        upper_boundary,
        lower_boundary,
        polygon,
    })
}
