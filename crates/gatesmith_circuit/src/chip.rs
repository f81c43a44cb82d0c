//! Chip instances placed in a circuit.

use gatesmith_common::{Colour, Point};

use crate::circuit::Circuit;
use crate::ids::PinId;
use crate::primitive::Primitive;

/// What a chip instance computes with.
#[derive(Debug, Clone)]
pub enum ChipKind {
    /// A built-in gate or signal proxy.
    BuiltIn(Primitive),
    /// A composite chip that exclusively owns its own copy of the internals.
    Custom(Box<Circuit>),
}

/// One chip placed in a [`Circuit`].
///
/// Pin lists are fixed when the instance is created; saved wiring refers to
/// pins by their position in these lists.
#[derive(Debug, Clone)]
pub struct ChipInstance {
    pub(crate) name: String,
    pub(crate) colour: Colour,
    pub(crate) kind: ChipKind,
    pub(crate) inputs: Vec<PinId>,
    pub(crate) outputs: Vec<PinId>,
    pub(crate) position: Point,
    pub(crate) evaluations: u32,
}

impl ChipInstance {
    /// Name of the chip type this instance was created from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Display colour.
    pub fn colour(&self) -> Colour {
        self.colour
    }

    /// Built-in or custom.
    pub fn kind(&self) -> &ChipKind {
        &self.kind
    }

    /// The primitive, for built-in instances.
    pub fn primitive(&self) -> Option<Primitive> {
        match self.kind {
            ChipKind::BuiltIn(p) => Some(p),
            ChipKind::Custom(_) => None,
        }
    }

    /// The owned internal circuit, for custom instances.
    pub fn internals(&self) -> Option<&Circuit> {
        match &self.kind {
            ChipKind::Custom(internals) => Some(&**internals),
            ChipKind::BuiltIn(_) => None,
        }
    }

    /// Input pins in index order.
    pub fn inputs(&self) -> &[PinId] {
        &self.inputs
    }

    /// Output pins in index order.
    pub fn outputs(&self) -> &[PinId] {
        &self.outputs
    }

    /// Editor position. Layout only.
    pub fn position(&self) -> Point {
        self.position
    }

    /// How many times the chip recomputed its outputs in the current frame.
    pub fn evaluations(&self) -> u32 {
        self.evaluations
    }
}
