//! Port catalog for the DAQ device
//!
//! The device exposes up to four logical port groups. Groups A, B and C are
//! eight-bit digital ports published one boolean channel per bit; the
//! counter group is published as a single integer channel.
//!
//! | Group | Catalog index | Bit width | Channels |
//! |-------|---------------|-----------|----------|
//! | A | 0 | 8 | `A0`..`A7` |
//! | B | 1 | 8 | `B0`..`B7` |
//! | C | 2 | 8 | `C0`..`C7` |
//! | Counter | 3 | - | `CTR` |

use serde::{Deserialize, Serialize};

use crate::attribute::ValueType;

/// Number of bit channels in a digital port group
pub const BITS_PER_PORT: u8 = 8;

/// Fixed channel name of the counter group
pub const COUNTER_CHANNEL: &str = "CTR";

/// Logical port groups, in hardware port-type order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PortGroup {
    A,
    B,
    C,
    Counter,
}

impl PortGroup {
    /// All groups in their fixed evaluation order
    pub const ALL: [PortGroup; 4] = [PortGroup::A, PortGroup::B, PortGroup::C, PortGroup::Counter];

    /// Number of bit channels exposed by this group (0 for the counter)
    pub fn bit_width(&self) -> u8 {
        match self {
            PortGroup::A | PortGroup::B | PortGroup::C => BITS_PER_PORT,
            PortGroup::Counter => 0,
        }
    }

    /// Position of this group in the hardware library's port-type list
    pub fn catalog_index(&self) -> usize {
        match self {
            PortGroup::A => 0,
            PortGroup::B => 1,
            PortGroup::C => 2,
            PortGroup::Counter => 3,
        }
    }

    /// Leading character of the group's bit-channel names.
    ///
    /// The counter has no bit channels and therefore no letter.
    pub fn letter(&self) -> Option<char> {
        match self {
            PortGroup::A => Some('A'),
            PortGroup::B => Some('B'),
            PortGroup::C => Some('C'),
            PortGroup::Counter => None,
        }
    }

    /// Map a leading channel-name character to its group.
    ///
    /// Anything other than `A`, `B` or `C` resolves to the counter.
    pub fn from_letter(letter: char) -> Self {
        match letter {
            'A' => PortGroup::A,
            'B' => PortGroup::B,
            'C' => PortGroup::C,
            _ => PortGroup::Counter,
        }
    }

    /// Value type of the channels this group exposes
    pub fn value_type(&self) -> ValueType {
        match self {
            PortGroup::Counter => ValueType::Integer,
            _ => ValueType::Boolean,
        }
    }

    /// Human readable group name
    pub fn label(&self) -> &'static str {
        match self {
            PortGroup::A => "Port A",
            PortGroup::B => "Port B",
            PortGroup::C => "Port C",
            PortGroup::Counter => "Counter",
        }
    }
}
