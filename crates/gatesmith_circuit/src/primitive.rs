//! The closed set of built-in chips.
//!
//! Gates are pure functions of their input states. The two signal proxies
//! mark a circuit's external interface: `SIGNAL IN` components become the
//! inputs of a packaged chip and `SIGNAL OUT` components become its outputs.

use gatesmith_common::{Colour, Logic};

/// A built-in chip type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Primitive {
    /// Single-input inverter.
    Not,
    /// Two-input AND.
    And,
    /// Two-input OR.
    Or,
    /// Two-input NAND.
    Nand,
    /// Two-input NOR.
    Nor,
    /// Two-input XOR.
    Xor,
    /// External input proxy: no inputs, one output driven from outside.
    SignalIn,
    /// External output proxy: one input, no outputs.
    SignalOut,
}

impl Primitive {
    /// Every built-in, in registry seeding order.
    pub const ALL: [Primitive; 8] = [
        Primitive::Not,
        Primitive::And,
        Primitive::Or,
        Primitive::Nand,
        Primitive::Nor,
        Primitive::Xor,
        Primitive::SignalIn,
        Primitive::SignalOut,
    ];

    /// Registry name of the chip.
    pub fn name(self) -> &'static str {
        match self {
            Primitive::Not => "NOT",
            Primitive::And => "AND",
            Primitive::Or => "OR",
            Primitive::Nand => "NAND",
            Primitive::Nor => "NOR",
            Primitive::Xor => "XOR",
            Primitive::SignalIn => "SIGNAL IN",
            Primitive::SignalOut => "SIGNAL OUT",
        }
    }

    /// Looks a built-in up by registry name.
    pub fn from_name(name: &str) -> Option<Primitive> {
        Self::ALL.into_iter().find(|p| p.name() == name)
    }

    /// Default input pin names.
    pub fn input_names(self) -> &'static [&'static str] {
        match self {
            Primitive::Not => &["In"],
            Primitive::And | Primitive::Or | Primitive::Nand | Primitive::Nor | Primitive::Xor => {
                &["A", "B"]
            }
            Primitive::SignalIn => &[],
            Primitive::SignalOut => &["Signal"],
        }
    }

    /// Default output pin names.
    pub fn output_names(self) -> &'static [&'static str] {
        match self {
            Primitive::SignalIn => &["Signal"],
            Primitive::SignalOut => &[],
            _ => &["Out"],
        }
    }

    /// Returns `true` for the two interface proxies.
    pub fn is_signal(self) -> bool {
        matches!(self, Primitive::SignalIn | Primitive::SignalOut)
    }

    /// Computes the output from the current input states.
    ///
    /// Missing inputs read as [`Logic::Zero`]. The proxies compute nothing and
    /// return `None`.
    pub fn eval(self, inputs: &[Logic]) -> Option<Logic> {
        let bit = |i: usize| inputs.get(i).copied().unwrap_or_default();
        let out = match self {
            Primitive::Not => !bit(0),
            Primitive::And => bit(0) & bit(1),
            Primitive::Or => bit(0) | bit(1),
            Primitive::Nand => !(bit(0) & bit(1)),
            Primitive::Nor => !(bit(0) | bit(1)),
            Primitive::Xor => bit(0) ^ bit(1),
            Primitive::SignalIn | Primitive::SignalOut => return None,
        };
        Some(out)
    }

    /// Display colour used when the chip is drawn.
    pub fn colour(self) -> Colour {
        match self {
            Primitive::Not => Colour::rgb(0.55, 0.15, 0.15),
            Primitive::And => Colour::rgb(0.15, 0.35, 0.6),
            Primitive::Or => Colour::rgb(0.2, 0.5, 0.25),
            Primitive::Nand => Colour::rgb(0.4, 0.2, 0.55),
            Primitive::Nor => Colour::rgb(0.6, 0.45, 0.1),
            Primitive::Xor => Colour::rgb(0.1, 0.5, 0.5),
            Primitive::SignalIn | Primitive::SignalOut => Colour::rgb(0.2, 0.2, 0.2),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use Logic::{One, Zero};

    #[test]
    fn not_inverts() {
        assert_eq!(Primitive::Not.eval(&[Zero]), Some(One));
        assert_eq!(Primitive::Not.eval(&[One]), Some(Zero));
    }

    #[test]
    fn two_input_truth_tables() {
        let rows = [(Zero, Zero), (Zero, One), (One, Zero), (One, One)];
        let table = |p: Primitive| -> Vec<u8> {
            rows.iter()
                .map(|&(a, b)| u8::from(p.eval(&[a, b]).unwrap()))
                .collect()
        };
        assert_eq!(table(Primitive::And), vec![0, 0, 0, 1]);
        assert_eq!(table(Primitive::Or), vec![0, 1, 1, 1]);
        assert_eq!(table(Primitive::Nand), vec![1, 1, 1, 0]);
        assert_eq!(table(Primitive::Nor), vec![1, 0, 0, 0]);
        assert_eq!(table(Primitive::Xor), vec![0, 1, 1, 0]);
    }

    #[test]
    fn missing_inputs_read_low() {
        assert_eq!(Primitive::Not.eval(&[]), Some(One));
        assert_eq!(Primitive::Or.eval(&[One]), Some(One));
    }

    #[test]
    fn proxies_compute_nothing() {
        assert_eq!(Primitive::SignalIn.eval(&[]), None);
        assert_eq!(Primitive::SignalOut.eval(&[One]), None);
        assert!(Primitive::SignalIn.is_signal());
        assert!(!Primitive::Xor.is_signal());
    }

    #[test]
    fn names_roundtrip() {
        for p in Primitive::ALL {
            assert_eq!(Primitive::from_name(p.name()), Some(p));
        }
        assert_eq!(Primitive::from_name("MUX"), None);
    }

    #[test]
    fn pin_shapes() {
        assert_eq!(Primitive::Not.input_names().len(), 1);
        assert_eq!(Primitive::SignalIn.input_names().len(), 0);
        assert_eq!(Primitive::SignalIn.output_names().len(), 1);
        assert_eq!(Primitive::SignalOut.output_names().len(), 0);
    }
}
