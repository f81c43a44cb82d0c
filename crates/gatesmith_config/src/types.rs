//! Configuration types deserialized from `gatesmith.toml`.

use serde::Deserialize;
use std::time::Duration;

/// Default bound on nested signal deliveries within one propagation chain.
pub const DEFAULT_MAX_DEPTH: usize = 1000;

/// Default minimum wall-clock gap between scheduled ticks, in milliseconds.
pub const DEFAULT_MIN_STEP_INTERVAL_MS: u64 = 75;

/// The top-level configuration parsed from `gatesmith.toml`.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Simulation driver settings.
    #[serde(default)]
    pub simulation: SimulationConfig,
    /// Chip loader settings.
    #[serde(default)]
    pub loader: LoaderConfig,
    /// Settings applied when a circuit is packaged or a definition is loaded.
    #[serde(default)]
    pub packaging: PackagingConfig,
}

/// Settings for the simulation driver and signal propagation.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SimulationConfig {
    /// Maximum number of nested signal deliveries in one propagation chain.
    ///
    /// Exceeding it aborts the tick with an unbounded-recursion error instead
    /// of overflowing the call stack.
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,
    /// Minimum time between two ticks when the driver is polled by a scheduler.
    #[serde(default = "default_min_step_interval_ms")]
    pub min_step_interval_ms: u64,
}

impl SimulationConfig {
    /// Returns the minimum step interval as a [`Duration`].
    pub fn min_step_interval(&self) -> Duration {
        Duration::from_millis(self.min_step_interval_ms)
    }
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            min_step_interval_ms: DEFAULT_MIN_STEP_INTERVAL_MS,
        }
    }
}

fn default_max_depth() -> usize {
    DEFAULT_MAX_DEPTH
}

fn default_min_step_interval_ms() -> u64 {
    DEFAULT_MIN_STEP_INTERVAL_MS
}

/// Settings for loading saved chip definitions.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct LoaderConfig {
    /// Abort the whole load on the first failing definition.
    ///
    /// When `false` (the default) every definition is attempted and all
    /// failures are reported together.
    #[serde(default)]
    pub strict: bool,
}

/// Settings applied to circuits as they are packaged into chips.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct PackagingConfig {
    /// What to do about feedback loops that no cyclic input pin breaks.
    #[serde(default)]
    pub unflagged_cycles: CyclePolicy,
}

/// Policy for feedback loops that are not broken by a cyclic-flagged pin.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CyclePolicy {
    /// Skip the check entirely.
    Allow,
    /// Report a warning and keep the chip (default).
    #[default]
    Warn,
    /// Reject the chip definition.
    Deny,
}
