//! Layout coordinates carried through saves.

use serde::{Deserialize, Serialize};

/// A 2-D position in editor space.
///
/// Used for component placement and wire anchor points; never read by the
/// simulation.
#[derive(Clone, Copy, PartialEq, Debug, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate.
    pub x: f32,
    /// Vertical coordinate.
    pub y: f32,
}

impl Point {
    /// Creates a point.
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}
