//! The simulation driver: one discrete tick at a time.
//!
//! Each tick has two phases:
//!
//! 1. **Reset**: clear the output displays and prepare every chip for a new
//!    frame, settling undriven inputs to 0.
//! 2. **Drive**: push each configured input value into its `SIGNAL IN`,
//!    letting it cascade synchronously through the whole reachable graph.
//!
//! The frame counter is bookkeeping only; the circuit has no notion of time
//! beyond the settled state of the latest tick.

use std::time::{Duration, Instant};

use gatesmith_circuit::{Circuit, Depth};
use gatesmith_common::Logic;
use gatesmith_config::SimulationConfig;

use crate::error::SimError;

/// Drives a top-level circuit.
#[derive(Debug, Clone)]
pub struct Simulation {
    circuit: Circuit,
    max_depth: usize,
    min_step_interval: Duration,
    frame: u64,
    last_step: Option<Instant>,
    input_values: Vec<Logic>,
}

impl Simulation {
    /// Wraps `circuit` with every input low.
    pub fn new(circuit: Circuit, config: &SimulationConfig) -> Self {
        let input_values = vec![Logic::Zero; circuit.input_chips().len()];
        Self {
            circuit,
            max_depth: config.max_depth,
            min_step_interval: config.min_step_interval(),
            frame: 0,
            last_step: None,
            input_values,
        }
    }

    /// Number of ticks run so far.
    pub fn frame(&self) -> u64 {
        self.frame
    }

    /// The circuit being simulated.
    pub fn circuit(&self) -> &Circuit {
        &self.circuit
    }

    /// Mutable access for editing between ticks.
    ///
    /// `SIGNAL IN` components added here start low.
    pub fn circuit_mut(&mut self) -> &mut Circuit {
        &mut self.circuit
    }

    /// Consumes the driver, returning the circuit.
    pub fn into_circuit(self) -> Circuit {
        self.circuit
    }

    fn sync_inputs(&mut self) {
        let count = self.circuit.input_chips().len();
        self.input_values.resize(count, Logic::Zero);
    }

    /// Sets the value the `index`-th input will drive from the next tick on.
    pub fn set_input(&mut self, index: usize, value: Logic) -> Result<(), SimError> {
        self.sync_inputs();
        let count = self.input_values.len();
        let slot = self
            .input_values
            .get_mut(index)
            .ok_or(SimError::NoSuchInput { index, count })?;
        *slot = value;
        Ok(())
    }

    /// Flips the `index`-th input and returns its new value.
    pub fn toggle_input(&mut self, index: usize) -> Result<Logic, SimError> {
        let value = !self.input(index)?;
        self.set_input(index, value)?;
        Ok(value)
    }

    /// The configured value of the `index`-th input.
    pub fn input(&self, index: usize) -> Result<Logic, SimError> {
        let count = self.circuit.input_chips().len();
        if index >= count {
            return Err(SimError::NoSuchInput { index, count });
        }
        Ok(self.input_values.get(index).copied().unwrap_or_default())
    }

    /// Current external output values.
    pub fn outputs(&self) -> Vec<Logic> {
        self.circuit.output_states()
    }

    /// The `index`-th external output value.
    pub fn output(&self, index: usize) -> Option<Logic> {
        self.outputs().get(index).copied()
    }

    /// Runs one tick: reset, then drive every input.
    ///
    /// A tick that trips the depth guard is abandoned where it stopped; the
    /// frame still counts.
    pub fn tick(&mut self) -> Result<(), SimError> {
        self.sync_inputs();
        self.frame += 1;
        log::trace!("tick {}", self.frame);

        let depth = Depth::root(self.max_depth);
        self.circuit.clear_output_display();
        self.circuit.init_simulation_frame(depth)?;
        for (index, &value) in self.input_values.iter().enumerate() {
            self.circuit.send_input(index, value, depth)?;
        }
        Ok(())
    }

    /// Runs a tick if at least the minimum step interval has passed since the
    /// last polled tick. Returns whether a tick ran.
    pub fn poll(&mut self, now: Instant) -> Result<bool, SimError> {
        if let Some(last) = self.last_step {
            if now.saturating_duration_since(last) < self.min_step_interval {
                return Ok(false);
            }
        }
        self.last_step = Some(now);
        self.tick()?;
        Ok(true)
    }
}
