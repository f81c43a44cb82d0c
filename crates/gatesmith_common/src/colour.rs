//! RGBA display colours for packaged chips.

use serde::{Deserialize, Serialize};

/// An RGBA colour with components in `0.0..=1.0`.
///
/// Colours are display metadata only; they never affect simulation.
#[derive(Clone, Copy, PartialEq, Debug, Serialize, Deserialize)]
pub struct Colour {
    /// Red component.
    pub r: f32,
    /// Green component.
    pub g: f32,
    /// Blue component.
    pub b: f32,
    /// Alpha component.
    pub a: f32,
}

impl Colour {
    /// Opaque black.
    pub const BLACK: Colour = Colour::rgb(0.0, 0.0, 0.0);
    /// Opaque white.
    pub const WHITE: Colour = Colour::rgb(1.0, 1.0, 1.0);

    /// Creates an opaque colour.
    pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
        Self { r, g, b, a: 1.0 }
    }
}

impl Default for Colour {
    fn default() -> Self {
        Colour::BLACK
    }
}
