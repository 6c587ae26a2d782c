//! Integer-backed flag sets and type codes stored on content items.
//!
//! The content database keeps these as plain 32-bit integers. Their bit
//! meanings are owned by the dashboard that writes the database, so the
//! types here carry the raw value and never drop unknown bits.

use std::fmt;

use bitflags::bitflags;
use serde::{Deserialize, Serialize};

bitflags! {
    /// Genre bit set (`GenreFlag` column).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "i32", into = "i32")]
    pub struct GenreFlags: i32 {
        const _ = !0;
    }
}

bitflags! {
    /// Content flag bit set (`ContentFlags` column).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "i32", into = "i32")]
    pub struct ContentFlags: i32 {
        const _ = !0;
    }
}

bitflags! {
    /// Game capability bit set (`GameCapsFlags` column).
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(from = "i32", into = "i32")]
    pub struct GameCapsFlags: i32 {
        const _ = !0;
    }
}

/// Raw-integer conversions, `Default` and hex display for the bit sets.
/// Every bit is retained, named or not.
macro_rules! stored_flags {
    ($($name:ident),+) => {$(
        impl Default for $name {
            fn default() -> Self {
                Self::empty()
            }
        }

        impl From<i32> for $name {
            fn from(bits: i32) -> Self {
                Self::from_bits_retain(bits)
            }
        }

        impl From<$name> for i32 {
            fn from(flags: $name) -> Self {
                flags.bits()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "0x{:08X}", self.bits() as u32)
            }
        }
    )+};
}

stored_flags!(GenreFlags, ContentFlags, GameCapsFlags);

/// Executable container type (`FileType` column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileType(i32);

/// Kind of content (`ContentType` column).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentType(i32);

/// Library group a title is filed under (`ContentGroup` and `DefaultGroup` columns).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentGroup(i32);

impl FileType {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl ContentType {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl ContentGroup {
    pub const fn new(value: i32) -> Self {
        Self(value)
    }

    pub const fn value(self) -> i32 {
        self.0
    }
}

impl fmt::Display for FileType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ContentGroup {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
