//! Core types for the Aurora content and settings databases.
//!
//! This crate has no database dependencies. It holds the packed
//! capability-word codec, the integer-backed flag types stored on content
//! items, and FILETIME conversion.

pub mod caps;
pub mod error;
pub mod filetime;
pub mod flags;
pub mod util;

pub use caps::{
    CapsField, OfflineCaps, OfflineField, OnlineCaps, OnlineField, PlayerRange, pack, unpack,
};
pub use error::NumberParseError;
pub use flags::{ContentFlags, ContentGroup, ContentType, FileType, GameCapsFlags, GenreFlags};
