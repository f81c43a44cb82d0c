//! Conversion of a circuit to its persisted forms.

use gatesmith_common::Colour;

use crate::circuit::Circuit;
use crate::definition::{ChipDefinition, ComponentRecord, PinRecord, PinSource, WireLayout, WireRecord};
use crate::error::CircuitError;
use crate::ids::PinId;

impl Circuit {
    /// Records this circuit as the internals of a custom chip.
    ///
    /// Components appear in placement order, so every [`PinSource`] stays
    /// valid when the definition is loaded back.
    pub fn to_definition(
        &self,
        name: impl Into<String>,
        colour: Colour,
        name_colour: Colour,
        creation_index: u32,
    ) -> ChipDefinition {
        let components = self
            .chips
            .iter()
            .map(|(_, chip)| ComponentRecord {
                chip_name: chip.name.clone(),
                position: chip.position,
                input_pins: chip.inputs.iter().map(|&pin| self.pin_record(pin)).collect(),
                output_pin_names: chip.outputs.iter().map(|&pin| self.pins[pin].name.clone()).collect(),
            })
            .collect();
        ChipDefinition {
            name: name.into(),
            colour,
            name_colour,
            creation_index,
            components,
        }
    }

    fn pin_record(&self, pin: PinId) -> PinRecord {
        let p = &self.pins[pin];
        PinRecord {
            name: p.name.clone(),
            source: p.parent.map(|src| PinSource {
                chip_index: self.pins[src].chip.index(),
                output_index: self.pins[src].index,
            }),
            cyclic: p.cyclic,
        }
    }

    /// Every wire of this circuit, ordered by destination chip then input index.
    pub fn wire_layout(&self) -> WireLayout {
        let mut wires = Vec::new();
        for (child, chip) in self.chips.iter() {
            for &pin in &chip.inputs {
                let p = &self.pins[pin];
                let Some(src) = p.parent else { continue };
                wires.push(WireRecord {
                    parent_chip_index: self.pins[src].chip.index(),
                    parent_output_index: self.pins[src].index,
                    child_chip_index: child.index(),
                    child_input_index: p.index,
                    anchor_points: self.wire_anchors(pin).to_vec(),
                });
            }
        }
        WireLayout { wires }
    }

    /// Reconnects wires from a saved layout onto already-placed components.
    pub fn apply_wire_layout(&mut self, layout: &WireLayout) -> Result<(), CircuitError> {
        for wire in &layout.wires {
            let parent = self.chip_at(wire.parent_chip_index)?;
            let child = self.chip_at(wire.child_chip_index)?;
            let source = self.output_pin(parent, wire.parent_output_index)?;
            let destination = self.input_pin(child, wire.child_input_index)?;
            self.connect(source, destination)?;
            if !wire.anchor_points.is_empty() {
                self.set_wire_anchors(destination, wire.anchor_points.clone());
            }
        }
        Ok(())
    }
}
