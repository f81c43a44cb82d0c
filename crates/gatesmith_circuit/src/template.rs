//! Immutable chip templates held by the registry and instantiated into circuits.

use std::sync::Arc;

use gatesmith_common::Colour;

use crate::circuit::Circuit;
use crate::primitive::Primitive;

/// A chip type that can be placed in a circuit any number of times.
///
/// Cloning a template is cheap; custom templates share their packaged
/// definition behind an [`Arc`] and are never mutated after publication.
#[derive(Debug, Clone)]
pub enum ChipTemplate {
    /// A built-in chip.
    BuiltIn(Primitive),
    /// A packaged composite chip.
    Custom(Arc<CustomChip>),
}

impl ChipTemplate {
    /// Registry name.
    pub fn name(&self) -> &str {
        match self {
            ChipTemplate::BuiltIn(p) => p.name(),
            ChipTemplate::Custom(c) => &c.name,
        }
    }

    /// Display colour.
    pub fn colour(&self) -> Colour {
        match self {
            ChipTemplate::BuiltIn(p) => p.colour(),
            ChipTemplate::Custom(c) => c.colour,
        }
    }

    /// Input pin names in index order.
    pub fn input_names(&self) -> Vec<String> {
        match self {
            ChipTemplate::BuiltIn(p) => p.input_names().iter().map(|s| s.to_string()).collect(),
            ChipTemplate::Custom(c) => c.input_names.clone(),
        }
    }

    /// Output pin names in index order.
    pub fn output_names(&self) -> Vec<String> {
        match self {
            ChipTemplate::BuiltIn(p) => p.output_names().iter().map(|s| s.to_string()).collect(),
            ChipTemplate::Custom(c) => c.output_names.clone(),
        }
    }

    /// The packaged chip, for custom templates.
    pub fn as_custom(&self) -> Option<&Arc<CustomChip>> {
        match self {
            ChipTemplate::Custom(c) => Some(c),
            ChipTemplate::BuiltIn(_) => None,
        }
    }
}

impl From<Primitive> for ChipTemplate {
    fn from(p: Primitive) -> Self {
        ChipTemplate::BuiltIn(p)
    }
}

/// A packaged composite chip.
///
/// `internals` is the prototype circuit; every instance gets its own deep copy.
#[derive(Debug, Clone)]
pub struct CustomChip {
    /// Globally unique chip name.
    pub name: String,
    /// Body colour.
    pub colour: Colour,
    /// Colour of the name label.
    pub name_colour: Colour,
    /// Packaging order.
    pub creation_index: u32,
    /// External input names, taken from the `SIGNAL IN` components.
    pub input_names: Vec<String>,
    /// External output names, taken from the `SIGNAL OUT` components.
    pub output_names: Vec<String>,
    /// Prototype internal circuit.
    pub internals: Circuit,
}

impl CustomChip {
    /// Wraps a finished internal circuit, deriving the external pin names
    /// from its signal proxies.
    pub fn new(
        name: impl Into<String>,
        colour: Colour,
        name_colour: Colour,
        creation_index: u32,
        internals: Circuit,
    ) -> Self {
        let input_names = internals.input_names();
        let output_names = internals.output_names();
        Self {
            name: name.into(),
            colour,
            name_colour,
            creation_index,
            input_names,
            output_names,
            internals,
        }
    }
}
