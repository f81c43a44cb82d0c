//! The connection graph of chips and pins, and synchronous signal propagation.
//!
//! A [`Circuit`] is either the top-level circuit being edited or the internals
//! of a custom chip. It owns every chip instance and pin placed in it. Pins are
//! linked output-to-input; writing a pin with [`Circuit::receive_signal`]
//! cascades through the reachable graph on the call stack, stopping only at
//! input pins flagged cyclic.
//!
//! # Propagation
//!
//! - Writing an output pin forwards the value to each child in connection order.
//! - Writing a non-cyclic input pin recomputes its chip immediately.
//! - Writing a cyclic input pin stores the value and stops.
//!
//! Every nested write descends one [`Depth`] level, so an unflagged feedback
//! loop ends in [`CircuitError::UnboundedRecursion`] rather than a stack overflow.

use std::collections::HashMap;

use gatesmith_common::{Logic, Point};

use crate::arena::Arena;
use crate::chip::{ChipInstance, ChipKind};
use crate::depth::Depth;
use crate::error::CircuitError;
use crate::ids::{ChipId, PinId};
use crate::pin::{Connection, Pin, PinKind};
use crate::primitive::Primitive;
use crate::template::ChipTemplate;

/// A graph of chip instances joined pin to pin.
#[derive(Debug, Clone, Default)]
pub struct Circuit {
    pub(crate) chips: Arena<ChipId, ChipInstance>,
    pub(crate) pins: Arena<PinId, Pin>,
    pub(crate) inputs: Vec<ChipId>,
    pub(crate) outputs: Vec<ChipId>,
    pub(crate) anchors: HashMap<PinId, Vec<Point>>,
}

impl Circuit {
    /// Creates an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    // ---------------------------------------------------------------
    // Editing
    // ---------------------------------------------------------------

    /// Places a new instance of `template` and returns its ID.
    ///
    /// Custom templates are instantiated by deep-copying their prototype
    /// internals, so the new instance shares no state with any other.
    /// `SIGNAL IN` and `SIGNAL OUT` instances join the external interface
    /// in placement order.
    pub fn add_chip(&mut self, template: &ChipTemplate) -> ChipId {
        let id = self.chips.next_id();
        let inputs = self.alloc_pins(id, PinKind::ChipInput, template.input_names());
        let outputs = self.alloc_pins(id, PinKind::ChipOutput, template.output_names());
        let kind = match template {
            ChipTemplate::BuiltIn(p) => {
                match p {
                    Primitive::SignalIn => self.inputs.push(id),
                    Primitive::SignalOut => self.outputs.push(id),
                    _ => {}
                }
                ChipKind::BuiltIn(*p)
            }
            ChipTemplate::Custom(custom) => ChipKind::Custom(Box::new(custom.internals.clone())),
        };
        self.chips.alloc(ChipInstance {
            name: template.name().to_string(),
            colour: template.colour(),
            kind,
            inputs,
            outputs,
            position: Point::default(),
            evaluations: 0,
        })
    }

    fn alloc_pins(&mut self, chip: ChipId, kind: PinKind, names: Vec<String>) -> Vec<PinId> {
        names
            .into_iter()
            .enumerate()
            .map(|(index, name)| self.pins.alloc(Pin::new(kind, chip, index, name)))
            .collect()
    }

    /// Places a `SIGNAL IN` proxy whose pin is named `name`.
    pub fn add_input(&mut self, name: &str) -> ChipId {
        let id = self.add_chip(&ChipTemplate::BuiltIn(Primitive::SignalIn));
        for &pin in &self.chips[id].outputs {
            self.pins[pin].name = name.to_string();
        }
        id
    }

    /// Places a `SIGNAL OUT` proxy whose pin is named `name`.
    pub fn add_output(&mut self, name: &str) -> ChipId {
        let id = self.add_chip(&ChipTemplate::BuiltIn(Primitive::SignalOut));
        for &pin in &self.chips[id].inputs {
            self.pins[pin].name = name.to_string();
        }
        id
    }

    /// Moves a chip. Layout only.
    pub fn set_position(&mut self, chip: ChipId, position: Point) -> Result<(), CircuitError> {
        self.chips
            .get_mut(chip)
            .ok_or(CircuitError::UnknownChip { chip })?
            .position = position;
        Ok(())
    }

    /// Renames a pin.
    pub fn rename_pin(&mut self, pin: PinId, name: impl Into<String>) -> Result<(), CircuitError> {
        self.pin_mut(pin)?.name = name.into();
        Ok(())
    }

    /// Marks an input pin as an intentional feedback point.
    pub fn set_cyclic(&mut self, pin: PinId, cyclic: bool) -> Result<(), CircuitError> {
        self.pin_mut(pin)?.cyclic = cyclic;
        Ok(())
    }

    /// Sets the rendering anchor points of the wire ending at `destination`.
    pub fn set_wire_anchors(&mut self, destination: PinId, anchors: Vec<Point>) {
        self.anchors.insert(destination, anchors);
    }

    /// Rendering anchor points of the wire ending at `destination`.
    pub fn wire_anchors(&self, destination: PinId) -> &[Point] {
        self.anchors.get(&destination).map(Vec::as_slice).unwrap_or(&[])
    }

    // ---------------------------------------------------------------
    // Lookup
    // ---------------------------------------------------------------

    /// Returns the chip with the given ID.
    pub fn chip(&self, id: ChipId) -> Option<&ChipInstance> {
        self.chips.get(id)
    }

    /// Returns the pin with the given ID.
    pub fn pin(&self, id: PinId) -> Option<&Pin> {
        self.pins.get(id)
    }

    fn pin_kind(&self, pin: PinId) -> Result<PinKind, CircuitError> {
        self.pins.get(pin).map(|p| p.kind).ok_or(CircuitError::UnknownPin { pin })
    }

    fn pin_mut(&mut self, pin: PinId) -> Result<&mut Pin, CircuitError> {
        self.pins.get_mut(pin).ok_or(CircuitError::UnknownPin { pin })
    }

    /// Iterates over chips in placement order.
    pub fn chips(&self) -> impl Iterator<Item = (ChipId, &ChipInstance)> {
        self.chips.iter()
    }

    /// Number of chip instances.
    pub fn chip_count(&self) -> usize {
        self.chips.len()
    }

    /// Resolves a component by its placement index.
    pub fn chip_at(&self, index: usize) -> Result<ChipId, CircuitError> {
        u32::try_from(index)
            .ok()
            .map(ChipId::from_raw)
            .filter(|&id| self.chips.get(id).is_some())
            .ok_or(CircuitError::NoSuchComponent {
                index,
                count: self.chips.len(),
            })
    }

    /// The `index`-th input pin of `chip`.
    pub fn input_pin(&self, chip: ChipId, index: usize) -> Result<PinId, CircuitError> {
        self.chips
            .get(chip)
            .and_then(|c| c.inputs.get(index).copied())
            .ok_or(CircuitError::NoSuchPin {
                chip,
                kind: PinKind::ChipInput,
                index,
            })
    }

    /// The `index`-th output pin of `chip`.
    pub fn output_pin(&self, chip: ChipId, index: usize) -> Result<PinId, CircuitError> {
        self.chips
            .get(chip)
            .and_then(|c| c.outputs.get(index).copied())
            .ok_or(CircuitError::NoSuchPin {
                chip,
                kind: PinKind::ChipOutput,
                index,
            })
    }

    /// `SIGNAL IN` components in placement order.
    pub fn input_chips(&self) -> &[ChipId] {
        &self.inputs
    }

    /// `SIGNAL OUT` components in placement order.
    pub fn output_chips(&self) -> &[ChipId] {
        &self.outputs
    }

    /// Names of the external inputs.
    pub fn input_names(&self) -> Vec<String> {
        self.inputs
            .iter()
            .filter_map(|&id| self.chips[id].outputs.first())
            .map(|&pin| self.pins[pin].name.clone())
            .collect()
    }

    /// Names of the external outputs.
    pub fn output_names(&self) -> Vec<String> {
        self.outputs
            .iter()
            .filter_map(|&id| self.chips[id].inputs.first())
            .map(|&pin| self.pins[pin].name.clone())
            .collect()
    }

    /// Current value of every external output, read from the `SIGNAL OUT` pins.
    pub fn output_states(&self) -> Vec<Logic> {
        self.outputs
            .iter()
            .filter_map(|&id| self.chips[id].inputs.first())
            .map(|&pin| self.pins[pin].state)
            .collect()
    }

    // ---------------------------------------------------------------
    // Wiring
    // ---------------------------------------------------------------

    /// Connects an output pin to an input pin. The pins may be given in
    /// either order.
    ///
    /// An input has at most one driver: connecting a new source to a driven
    /// input silently removes the old connection first and reports it in
    /// [`Connection::superseded`]. Reconnecting the current driver changes
    /// nothing.
    pub fn connect(&mut self, a: PinId, b: PinId) -> Result<Connection, CircuitError> {
        let (source, destination) = match (self.pin_kind(a)?, self.pin_kind(b)?) {
            (PinKind::ChipOutput, PinKind::ChipInput) => (a, b),
            (PinKind::ChipInput, PinKind::ChipOutput) => (b, a),
            _ => return Err(CircuitError::InvalidConnection { from: a, to: b }),
        };

        let previous = self.pins[destination].parent;
        if previous == Some(source) {
            return Ok(Connection {
                source,
                destination,
                superseded: None,
            });
        }
        if let Some(old) = previous {
            log::debug!("{destination} was driven by {old}; replacing with {source}");
            self.disconnect(old, destination);
        }

        self.pins[source].children.push(destination);
        self.pins[destination].parent = Some(source);
        Ok(Connection {
            source,
            destination,
            superseded: previous,
        })
    }

    /// Removes the connection from `source` to `destination`.
    ///
    /// The destination drops back to 0. Returns `false` if the pins were not
    /// connected. Other pins are left untouched, so this is safe between any
    /// two propagation calls.
    pub fn disconnect(&mut self, source: PinId, destination: PinId) -> bool {
        if self.pins.get(destination).and_then(|p| p.parent) != Some(source) {
            return false;
        }
        let pin = &mut self.pins[destination];
        pin.parent = None;
        pin.state = Logic::Zero;
        self.pins[source].children.retain(|&child| child != destination);
        self.anchors.remove(&destination);
        true
    }

    // ---------------------------------------------------------------
    // Propagation
    // ---------------------------------------------------------------

    /// Writes `value` to `pin` and propagates it synchronously.
    pub fn receive_signal(&mut self, pin: PinId, value: Logic, depth: Depth) -> Result<(), CircuitError> {
        let Some(depth) = depth.descend() else {
            let chip = self
                .pins
                .get(pin)
                .and_then(|p| self.chips.get(p.chip))
                .map(|c| c.name.clone())
                .unwrap_or_default();
            log::warn!("propagation depth limit {} hit at chip `{chip}`", depth.max());
            return Err(CircuitError::UnboundedRecursion {
                max_depth: depth.max(),
                chip,
            });
        };

        let target = self.pin_mut(pin)?;
        target.state = value;
        let (kind, cyclic, chip) = (target.kind, target.cyclic, target.chip);
        match kind {
            PinKind::ChipInput => {
                if !cyclic {
                    self.receive_input_signal(chip, depth)?;
                }
            }
            PinKind::ChipOutput => {
                let mut i = 0;
                while let Some(&child) = self.pins[pin].children.get(i) {
                    self.receive_signal(child, value, depth)?;
                    i += 1;
                }
            }
        }
        Ok(())
    }

    /// Notifies `chip` that one of its inputs changed, which recomputes it
    /// on the spot.
    pub fn receive_input_signal(&mut self, chip: ChipId, depth: Depth) -> Result<(), CircuitError> {
        self.process_output(chip, depth)
    }

    /// Recomputes `chip` from its current input states and drives its outputs.
    ///
    /// Built-in gates evaluate directly. Custom chips push each input into the
    /// matching internal `SIGNAL IN`, let it settle, then pull each internal
    /// `SIGNAL OUT` value onto the matching external output.
    pub fn process_output(&mut self, chip: ChipId, depth: Depth) -> Result<(), CircuitError> {
        let instance = self.chips.get_mut(chip).ok_or(CircuitError::UnknownChip { chip })?;
        instance.evaluations += 1;
        let inputs: Vec<Logic> = instance.inputs.iter().map(|&p| self.pins[p].state).collect();
        let values: Vec<Logic> = match &mut instance.kind {
            ChipKind::BuiltIn(p) => p.eval(&inputs).into_iter().collect(),
            ChipKind::Custom(internals) => internals.push_pull(&inputs, depth)?,
        };
        let outputs = instance.outputs.clone();
        for (pin, value) in outputs.into_iter().zip(values) {
            self.receive_signal(pin, value, depth)?;
        }
        Ok(())
    }

    fn push_pull(&mut self, inputs: &[Logic], depth: Depth) -> Result<Vec<Logic>, CircuitError> {
        for (index, &value) in inputs.iter().enumerate() {
            self.send_input(index, value, depth)?;
        }
        Ok(self.output_states())
    }

    /// Drives the `index`-th external input (`SIGNAL IN`) with `value`.
    pub fn send_input(&mut self, index: usize, value: Logic, depth: Depth) -> Result<(), CircuitError> {
        let chip = *self.inputs.get(index).ok_or(CircuitError::NoSuchInput {
            index,
            count: self.inputs.len(),
        })?;
        let instance = &mut self.chips[chip];
        instance.evaluations += 1;
        let outputs = instance.outputs.clone();
        for pin in outputs {
            self.receive_signal(pin, value, depth)?;
        }
        Ok(())
    }

    /// Prepares every chip for a new frame.
    ///
    /// Clears the per-frame evaluation counters, then settles every chip
    /// (custom chip internals included):
    ///
    /// - every undriven, non-cyclic input is written with 0, so gates with
    ///   unconnected inputs still produce their defined output;
    /// - every chip with a cyclic input is recomputed once from its current
    ///   input states, since writes to a cyclic pin never notify its chip.
    pub fn init_simulation_frame(&mut self, depth: Depth) -> Result<(), CircuitError> {
        self.reset_frame();
        self.settle(depth)
    }

    fn reset_frame(&mut self) {
        for chip in self.chips.values_mut() {
            chip.evaluations = 0;
            if let ChipKind::Custom(internals) = &mut chip.kind {
                internals.reset_frame();
            }
        }
    }

    fn settle(&mut self, depth: Depth) -> Result<(), CircuitError> {
        for chip in self.chips.values_mut() {
            if let ChipKind::Custom(internals) = &mut chip.kind {
                internals.settle(depth)?;
            }
        }
        let floating: Vec<PinId> = self
            .pins
            .iter()
            .filter(|(_, p)| p.kind == PinKind::ChipInput && p.is_floating() && !p.cyclic)
            .map(|(id, _)| id)
            .collect();
        for pin in floating {
            self.receive_signal(pin, Logic::Zero, depth)?;
        }

        let feedback: Vec<ChipId> = self
            .chips
            .iter()
            .filter(|(_, c)| c.inputs.iter().any(|&p| self.pins[p].cyclic))
            .map(|(id, _)| id)
            .collect();
        for chip in feedback {
            self.process_output(chip, depth)?;
        }
        Ok(())
    }

    /// Resets every `SIGNAL OUT` pin to 0 ahead of a new frame.
    pub fn clear_output_display(&mut self) {
        for &chip in &self.outputs {
            for &pin in &self.chips[chip].inputs {
                self.pins[pin].state = Logic::Zero;
            }
        }
    }

    /// Runs one frame with the given external inputs and returns the
    /// external outputs. Used to build truth tables.
    pub fn evaluate(&mut self, inputs: &[Logic], max_depth: usize) -> Result<Vec<Logic>, CircuitError> {
        let depth = Depth::root(max_depth);
        self.clear_output_display();
        self.init_simulation_frame(depth)?;
        self.push_pull(inputs, depth)
    }
}
