//! Simulation error types.

use gatesmith_circuit::CircuitError;

/// Errors that can occur while driving a simulation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SimError {
    /// Propagation failed during a tick, usually at the depth guard.
    #[error("tick aborted: {0}")]
    Propagation(#[from] CircuitError),

    /// An input index is out of range for the circuit.
    #[error("input index {index} is out of range (circuit has {count} inputs)")]
    NoSuchInput {
        /// The requested input index.
        index: usize,
        /// Number of external inputs.
        count: usize,
    },
}
