//! Persisted shapes of packaged chips and top-level wire layouts.
//!
//! These are plain serde records. The storage collaborator decides the
//! encoding; field names serialize in camelCase.

use serde::{Deserialize, Serialize};

use gatesmith_common::{Colour, Point};

/// A packaged custom chip as handed to and from storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChipDefinition {
    /// Unique chip name.
    pub name: String,
    /// Body colour.
    #[serde(default)]
    pub colour: Colour,
    /// Name label colour.
    #[serde(default)]
    pub name_colour: Colour,
    /// Packaging order. A chip may only use chips with a lower index.
    pub creation_index: u32,
    /// Component instances in placement order. Wiring refers to them by position.
    pub components: Vec<ComponentRecord>,
}

/// One component chip inside a [`ChipDefinition`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRecord {
    /// Registry name of the component's chip type.
    pub chip_name: String,
    /// Editor position. Layout only.
    #[serde(default)]
    pub position: Point,
    /// Input pins in index order.
    pub input_pins: Vec<PinRecord>,
    /// Output pin names in index order.
    pub output_pin_names: Vec<String>,
}

/// A saved input pin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRecord {
    /// Display name.
    pub name: String,
    /// The driving output, or `None` when unconnected.
    #[serde(default)]
    pub source: Option<PinSource>,
    /// Whether the pin is an intentional feedback point.
    #[serde(default)]
    pub cyclic: bool,
}

/// Address of an output pin within the same definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinSource {
    /// Position of the driving component.
    pub chip_index: usize,
    /// Output pin index on that component.
    pub output_index: usize,
}

impl ChipDefinition {
    /// Distinct component chip names in first-use order.
    pub fn dependencies(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for component in &self.components {
            if !names.contains(&component.chip_name.as_str()) {
                names.push(&component.chip_name);
            }
        }
        names
    }
}

/// Saved wires of a top-level circuit, for redrawing it in the editor.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireLayout {
    /// Wires in save order.
    pub wires: Vec<WireRecord>,
}

/// One saved wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WireRecord {
    /// Component index of the driving chip.
    pub parent_chip_index: usize,
    /// Output index on the driving chip.
    pub parent_output_index: usize,
    /// Component index of the driven chip.
    pub child_chip_index: usize,
    /// Input index on the driven chip.
    pub child_input_index: usize,
    /// Rendering anchor points.
    #[serde(default)]
    pub anchor_points: Vec<Point>,
}
