//! Tick-based simulation driver for gatesmith circuits.
//!
//! A [`Simulation`] owns the top-level [`Circuit`](gatesmith_circuit::Circuit)
//! and advances it one discrete tick at a time, either when called directly
//! through [`Simulation::tick`] or when an external scheduler polls it with
//! [`Simulation::poll`] and the configured minimum step interval has passed.
//!
//! # Usage
//!
//! ```ignore
//! use gatesmith_sim::Simulation;
//!
//! let mut sim = Simulation::new(circuit, &config.simulation);
//! sim.set_input(0, Logic::One)?;
//! sim.tick()?;
//! println!("outputs after frame {}: {:?}", sim.frame(), sim.outputs());
//! ```

#![warn(missing_docs)]

pub mod driver;
pub mod error;

pub use driver::Simulation;
pub use error::SimError;
