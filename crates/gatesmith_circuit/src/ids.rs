//! Opaque ID newtypes for chips and pins within one [`Circuit`](crate::Circuit).
//!
//! IDs are only meaningful inside the circuit that allocated them; a custom
//! chip's internal circuit has its own ID space.

use crate::arena::ArenaId;
use std::fmt;

macro_rules! define_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug)]
        pub struct $name(u32);

        impl $name {
            /// Creates an ID from a raw `u32` index.
            pub fn from_raw(index: u32) -> Self {
                Self(index)
            }

            /// Returns the raw `u32` index.
            pub fn as_raw(self) -> u32 {
                self.0
            }

            /// Returns the raw index as a `usize` position.
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl ArenaId for $name {
            fn from_raw(index: u32) -> Self {
                Self(index)
            }

            fn as_raw(self) -> u32 {
                self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }
    };
}

define_id!(
    /// Opaque, copyable ID for a chip instance in a circuit.
    ChipId,
    "chip"
);

define_id!(
    /// Opaque, copyable ID for a pin in a circuit.
    PinId,
    "pin"
);

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn id_roundtrip() {
        let id = ChipId::from_raw(42);
        assert_eq!(id.as_raw(), 42);
        assert_eq!(id.index(), 42);
    }

    #[test]
    fn id_hash_in_set() {
        let mut set = HashSet::new();
        set.insert(PinId::from_raw(1));
        set.insert(PinId::from_raw(2));
        set.insert(PinId::from_raw(1));
        assert_eq!(set.len(), 2);
    }

    #[test]
    fn display() {
        assert_eq!(ChipId::from_raw(3).to_string(), "chip3");
        assert_eq!(PinId::from_raw(7).to_string(), "pin7");
    }
}
