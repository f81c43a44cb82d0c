//! Chip registry, definition loading and packaging.
//!
//! A [`ChipRegistry`] maps names to immutable [`ChipTemplate`]s, seeded with
//! the built-ins. [`load_all`] brings saved [`ChipDefinition`]s into it in
//! creation order, reporting failures through a [`DiagnosticSink`], and
//! [`package_circuit`] turns an edited circuit into a new registered chip.
//! Storage sits behind the [`ChipReader`] and [`ChipWriter`] traits.
//!
//! [`ChipTemplate`]: gatesmith_circuit::ChipTemplate
//! [`ChipDefinition`]: gatesmith_circuit::ChipDefinition
//! [`DiagnosticSink`]: gatesmith_diagnostics::DiagnosticSink

#![warn(missing_docs)]

pub mod codes;
pub mod error;
pub mod loader;
pub mod package;
pub mod registry;
pub mod store;

pub use error::LoadError;
pub use loader::{load_all, load_one, LoadOptions, LoadReport};
pub use package::package_circuit;
pub use registry::ChipRegistry;
pub use store::{load_from_reader, open_saved, ChipReader, ChipWriter, MemoryStore, StoredChip};
