//! Explicit recursion guard threaded through signal propagation.

/// Position of a call within one synchronous propagation chain.
///
/// Every nested `receive_signal` call descends one level. A chain that would
/// go past `max` is reported as [`CircuitError::UnboundedRecursion`](crate::CircuitError)
/// instead of exhausting the call stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    level: usize,
    max: usize,
}

impl Depth {
    /// Starts a new chain allowing at most `max` nested signal writes.
    pub fn root(max: usize) -> Self {
        Self { level: 0, max }
    }

    /// Current nesting level.
    pub fn level(self) -> usize {
        self.level
    }

    /// The configured limit.
    pub fn max(self) -> usize {
        self.max
    }

    /// Returns the next level down, or `None` once the limit is reached.
    pub fn descend(self) -> Option<Depth> {
        (self.level < self.max).then(|| Depth {
            level: self.level + 1,
            max: self.max,
        })
    }
}
