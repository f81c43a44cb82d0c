//! Errors raised while editing or propagating through a [`Circuit`](crate::Circuit).

use crate::ids::{ChipId, PinId};
use crate::pin::PinKind;

/// Errors that can occur while wiring or simulating a circuit.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CircuitError {
    /// Both ends of a requested connection are the same kind of pin.
    #[error("cannot connect {from} to {to}: a connection needs one output pin and one input pin")]
    InvalidConnection {
        /// The first pin passed to `connect`.
        from: PinId,
        /// The second pin passed to `connect`.
        to: PinId,
    },

    /// A propagation chain nested deeper than the configured limit.
    #[error("signal propagation exceeded the maximum depth of {max_depth} at chip `{chip}` (unflagged feedback loop?)")]
    UnboundedRecursion {
        /// The configured depth limit.
        max_depth: usize,
        /// Name of the chip whose pin was being written when the limit was hit.
        chip: String,
    },

    /// A chip has no pin of the requested kind at the requested index.
    #[error("{chip} has no {kind} pin at index {index}")]
    NoSuchPin {
        /// The chip that was queried.
        chip: ChipId,
        /// Whether an input or output pin was requested.
        kind: PinKind,
        /// The requested pin index.
        index: usize,
    },

    /// A pin ID does not belong to this circuit.
    #[error("{pin} does not belong to this circuit")]
    UnknownPin {
        /// The rejected pin.
        pin: PinId,
    },

    /// A chip ID does not belong to this circuit.
    #[error("{chip} does not belong to this circuit")]
    UnknownChip {
        /// The rejected chip.
        chip: ChipId,
    },

    /// A component index is out of range for the circuit.
    #[error("component index {index} is out of range (circuit has {count} components)")]
    NoSuchComponent {
        /// The requested component index.
        index: usize,
        /// Number of components in the circuit.
        count: usize,
    },

    /// An external input index is out of range for the circuit.
    #[error("input index {index} is out of range (circuit has {count} inputs)")]
    NoSuchInput {
        /// The requested input index.
        index: usize,
        /// Number of external inputs.
        count: usize,
    },
}
