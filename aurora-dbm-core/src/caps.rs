//! Packed game-capability words.
//!
//! A content item stores its player-count capabilities in two 64-bit
//! integer columns, `GameCapsOnline` and `GameCapsOffline`. Each word holds
//! several byte-sized sub-fields at fixed bit offsets:
//!
//! | Word    | Sub-field              | Offset |
//! |---------|------------------------|--------|
//! | online  | co-op maximum          | 0      |
//! | online  | co-op minimum          | 8      |
//! | online  | multiplayer minimum    | 16     |
//! | online  | multiplayer maximum    | 24     |
//! | offline | players minimum        | 0      |
//! | offline | players maximum        | 8      |
//! | offline | co-op minimum          | 16     |
//! | offline | co-op maximum          | 24     |
//! | offline | system link players    | 40     |
//!
//! System link has a single byte at offset 40. There is no separate
//! minimum and maximum for it; both bounds of [`OfflineCaps::system_link`]
//! report the same value.
//!
//! Offline player counts never read as zero: a stored `0` is reported as
//! `1`, since every game supports at least one local player.

use std::fmt;

use serde::{Deserialize, Serialize};

const BYTE_MASK: i64 = 0xFF;

/// A byte-sized sub-field of a packed capability word.
pub trait CapsField: Copy {
    /// Bit offset of the sub-field, counted from the least significant bit.
    fn offset(self) -> u32;

    /// Whether a stored zero reads back as one.
    fn normalizes_to_one(self) -> bool {
        false
    }
}

/// Sub-fields of the `GameCapsOnline` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OnlineField {
    CoOpMax,
    CoOpMin,
    MultiplayerMin,
    MultiplayerMax,
}

impl OnlineField {
    pub const ALL: [OnlineField; 4] = [
        Self::CoOpMax,
        Self::CoOpMin,
        Self::MultiplayerMin,
        Self::MultiplayerMax,
    ];
}

impl CapsField for OnlineField {
    fn offset(self) -> u32 {
        match self {
            Self::CoOpMax => 0,
            Self::CoOpMin => 8,
            Self::MultiplayerMin => 16,
            Self::MultiplayerMax => 24,
        }
    }
}

/// Sub-fields of the `GameCapsOffline` word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OfflineField {
    PlayersMin,
    PlayersMax,
    CoOpMin,
    CoOpMax,
    SystemLink,
}

impl OfflineField {
    pub const ALL: [OfflineField; 5] = [
        Self::PlayersMin,
        Self::PlayersMax,
        Self::CoOpMin,
        Self::CoOpMax,
        Self::SystemLink,
    ];
}

impl CapsField for OfflineField {
    fn offset(self) -> u32 {
        match self {
            Self::PlayersMin => 0,
            Self::PlayersMax => 8,
            Self::CoOpMin => 16,
            Self::CoOpMax => 24,
            Self::SystemLink => 40,
        }
    }

    fn normalizes_to_one(self) -> bool {
        matches!(self, Self::PlayersMin | Self::PlayersMax)
    }
}

/// Extract a sub-field from a packed word: `(word >> offset) & 0xFF`.
pub fn unpack<F: CapsField>(word: i64, field: F) -> u8 {
    let value = ((word >> field.offset()) & BYTE_MASK) as u8;
    if value == 0 && field.normalizes_to_one() {
        1
    } else {
        value
    }
}

/// Replace a sub-field in a packed word, leaving every other bit untouched.
pub fn pack<F: CapsField>(word: i64, field: F, value: u8) -> i64 {
    let offset = field.offset();
    (word & !(BYTE_MASK << offset)) | (i64::from(value) << offset)
}

/// An inclusive player-count range, rendered as `"min - max"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerRange {
    pub min: u8,
    pub max: u8,
}

impl PlayerRange {
    pub fn new(min: u8, max: u8) -> Self {
        Self { min, max }
    }
}

impl fmt::Display for PlayerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.min, self.max)
    }
}

/// Typed view of a `GameCapsOnline` word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OnlineCaps(i64);

impl OnlineCaps {
    pub fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> i64 {
        self.0
    }

    pub fn get(self, field: OnlineField) -> u8 {
        unpack(self.0, field)
    }

    pub fn set(&mut self, field: OnlineField, value: u8) {
        self.0 = pack(self.0, field, value);
    }

    pub fn multiplayer(self) -> PlayerRange {
        PlayerRange::new(
            self.get(OnlineField::MultiplayerMin),
            self.get(OnlineField::MultiplayerMax),
        )
    }

    pub fn co_op(self) -> PlayerRange {
        PlayerRange::new(self.get(OnlineField::CoOpMin), self.get(OnlineField::CoOpMax))
    }
}

/// Typed view of a `GameCapsOffline` word.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OfflineCaps(i64);

impl OfflineCaps {
    pub fn from_bits(bits: i64) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> i64 {
        self.0
    }

    pub fn get(self, field: OfflineField) -> u8 {
        unpack(self.0, field)
    }

    pub fn set(&mut self, field: OfflineField, value: u8) {
        self.0 = pack(self.0, field, value);
    }

    pub fn players(self) -> PlayerRange {
        PlayerRange::new(
            self.get(OfflineField::PlayersMin),
            self.get(OfflineField::PlayersMax),
        )
    }

    pub fn co_op(self) -> PlayerRange {
        PlayerRange::new(
            self.get(OfflineField::CoOpMin),
            self.get(OfflineField::CoOpMax),
        )
    }

    /// System link player count as a degenerate range (min == max).
    pub fn system_link(self) -> PlayerRange {
        let players = self.get(OfflineField::SystemLink);
        PlayerRange::new(players, players)
    }
}

#[cfg(test)]
#[path = "tests/caps_tests.rs"]
mod tests;
