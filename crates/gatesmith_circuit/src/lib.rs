//! Pin-and-chip connection graphs with synchronous signal propagation.
//!
//! A [`Circuit`] owns chip instances and their pins. Chips are either
//! built-in [`Primitive`]s or custom chips that own a private copy of a
//! packaged internal circuit. Writing a pin cascades through the graph on the
//! call stack; input pins flagged cyclic stop the cascade so latches can be
//! built, and a [`Depth`] guard turns runaway recursion into an error.
//!
//! # Modules
//!
//! - `arena`, `ids`: Dense ID-indexed storage for chips and pins
//! - `pin`: Pins and connection results
//! - `primitive`: Built-in gates and signal proxies
//! - `chip`, `template`: Placed instances and reusable chip types
//! - `circuit`: Editing, wiring and propagation
//! - `definition`, `package`: Persisted records and conversion to them
//! - `cycles`: Static detection of unflagged feedback loops

#![warn(missing_docs)]

pub mod arena;
pub mod chip;
pub mod circuit;
pub mod cycles;
pub mod definition;
pub mod depth;
pub mod error;
pub mod ids;
pub mod package;
pub mod pin;
pub mod primitive;
pub mod template;

pub use chip::{ChipInstance, ChipKind};
pub use circuit::Circuit;
pub use definition::{ChipDefinition, ComponentRecord, PinRecord, PinSource, WireLayout, WireRecord};
pub use depth::Depth;
pub use error::CircuitError;
pub use ids::{ChipId, PinId};
pub use pin::{Connection, Pin, PinKind};
pub use primitive::Primitive;
pub use template::{ChipTemplate, CustomChip};
