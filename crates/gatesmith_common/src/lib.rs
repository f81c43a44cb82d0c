//! Shared foundational types used across the gatesmith circuit simulator.
//!
//! This crate provides the two-state [`Logic`] value carried by every pin and the
//! [`Colour`] and [`Point`] layout metadata attached to packaged chips.

#![warn(missing_docs)]

pub mod colour;
pub mod logic;
pub mod point;

pub use colour::Colour;
pub use logic::{InvalidLogicLevel, Logic};
pub use point::Point;
