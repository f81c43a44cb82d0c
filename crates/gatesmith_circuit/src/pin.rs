//! Pins: the atomic signal-carrying endpoints of chips.

use std::fmt;

use gatesmith_common::Logic;

use crate::ids::{ChipId, PinId};

/// Direction of a pin relative to its owning chip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PinKind {
    /// Receives a signal and feeds it into the chip.
    ChipInput,
    /// Carries a value the chip produced and forwards it to its children.
    ChipOutput,
}

impl fmt::Display for PinKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PinKind::ChipInput => write!(f, "input"),
            PinKind::ChipOutput => write!(f, "output"),
        }
    }
}

/// A single input or output pin of a chip instance.
///
/// The driver (`parent`) and forwarding set (`children`) are maintained by
/// [`Circuit::connect`](crate::Circuit::connect) and
/// [`Circuit::disconnect`](crate::Circuit::disconnect); an input pin has at
/// most one driver while an output pin may fan out to any number of inputs.
#[derive(Debug, Clone)]
pub struct Pin {
    pub(crate) kind: PinKind,
    pub(crate) chip: ChipId,
    pub(crate) index: usize,
    pub(crate) name: String,
    pub(crate) state: Logic,
    pub(crate) cyclic: bool,
    pub(crate) parent: Option<PinId>,
    pub(crate) children: Vec<PinId>,
}

impl Pin {
    pub(crate) fn new(kind: PinKind, chip: ChipId, index: usize, name: impl Into<String>) -> Self {
        Self {
            kind,
            chip,
            index,
            name: name.into(),
            state: Logic::Zero,
            cyclic: false,
            parent: None,
            children: Vec::new(),
        }
    }

    /// Input or output.
    pub fn kind(&self) -> PinKind {
        self.kind
    }

    /// The chip instance owning this pin.
    pub fn chip(&self) -> ChipId {
        self.chip
    }

    /// Position within the owning chip's input or output list.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current signal value.
    pub fn state(&self) -> Logic {
        self.state
    }

    /// Whether writes to this input are kept from re-triggering its chip.
    pub fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    /// The output pin driving this input, if connected.
    pub fn parent(&self) -> Option<PinId> {
        self.parent
    }

    /// Destination pins in connection order.
    pub fn children(&self) -> &[PinId] {
        &self.children
    }

    /// Returns `true` if the pin has a driver. Output pins are driven by
    /// their own chip and always count as driven.
    pub fn has_parent(&self) -> bool {
        self.kind == PinKind::ChipOutput || self.parent.is_some()
    }

    /// Returns `true` for an input pin with no driver.
    pub fn is_floating(&self) -> bool {
        !self.has_parent()
    }
}

/// Outcome of a successful [`Circuit::connect`](crate::Circuit::connect).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Connection {
    /// The output pin now driving `destination`.
    pub source: PinId,
    /// The input pin that was connected.
    pub destination: PinId,
    /// The previous driver of `destination`, removed to keep a single driver.
    pub superseded: Option<PinId>,
}
