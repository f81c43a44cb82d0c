//! Errors raised while loading or packaging chip definitions.

use gatesmith_circuit::{CircuitError, PinKind};

/// Errors that can occur while turning a [`ChipDefinition`](gatesmith_circuit::ChipDefinition)
/// into a registered chip template.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A component refers to a chip type that is not registered yet.
    #[error("chip `{chip}` component {component} uses unknown chip `{dependency}`")]
    MissingDependency {
        /// The definition being loaded.
        chip: String,
        /// Index of the offending component.
        component: usize,
        /// The chip type that could not be found.
        dependency: String,
    },

    /// An input pin's recorded source does not resolve to an output pin.
    #[error("chip `{chip}` component {component} input {pin} has an invalid source: {reason}")]
    InvalidSource {
        /// The definition being loaded.
        chip: String,
        /// Index of the component owning the input pin.
        component: usize,
        /// Index of the input pin.
        pin: usize,
        /// Why the source could not be resolved.
        reason: String,
    },

    /// A component record lists a different number of pins than its chip type has.
    #[error("chip `{chip}` component {component} (`{dependency}`) records {found} {kind} pins, expected {expected}")]
    PinCountMismatch {
        /// The definition being loaded.
        chip: String,
        /// Index of the offending component.
        component: usize,
        /// The component's chip type.
        dependency: String,
        /// Input or output.
        kind: PinKind,
        /// Pin count of the registered chip type.
        expected: usize,
        /// Pin count in the record.
        found: usize,
    },

    /// A chip with this name is already registered.
    #[error("a chip named `{name}` is already registered")]
    DuplicateChip {
        /// The clashing name.
        name: String,
    },

    /// The chip's internals contain a feedback loop with no cyclic pin.
    #[error("chip `{chip}` has a feedback loop with no cyclic pin through components {components:?}")]
    UnflaggedCycle {
        /// The definition being loaded.
        chip: String,
        /// Component indices on the loop.
        components: Vec<usize>,
    },

    /// A stored chip record could not be decoded.
    #[error("saved chip `{chip}` could not be decoded: {source}")]
    Undecodable {
        /// The storage key of the record.
        chip: String,
        /// The decoding failure.
        source: serde_json::Error,
    },

    /// Stored data could not be encoded or decoded.
    #[error("chip data encoding error: {0}")]
    Encoding(#[from] serde_json::Error),

    /// Wiring failed inside the circuit being built.
    #[error(transparent)]
    Circuit(#[from] CircuitError),
}

impl LoadError {
    /// Name of the definition the error concerns, when known.
    pub fn chip(&self) -> Option<&str> {
        match self {
            LoadError::MissingDependency { chip, .. }
            | LoadError::InvalidSource { chip, .. }
            | LoadError::PinCountMismatch { chip, .. }
            | LoadError::UnflaggedCycle { chip, .. }
            | LoadError::Undecodable { chip, .. } => Some(chip),
            LoadError::DuplicateChip { name } => Some(name),
            LoadError::Encoding(_) | LoadError::Circuit(_) => None,
        }
    }
}
