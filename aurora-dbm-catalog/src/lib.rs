//! Change-tracked entity types for the Aurora content and settings databases.
//!
//! Each entity wraps a plain data row (`*Row`) and a changed flag. This
//! crate has no database dependencies; `aurora-dbm-db` maps rows to and
//! from SQLite and flushes changed entities.

pub mod content;
pub mod record;
pub mod settings;
pub mod title_update;

pub use content::{ContentItem, ContentRow};
pub use record::Record;
pub use settings::{
    Profile, ProfileRow, QuickView, QuickViewRow, ScanPath, ScanPathRow, SystemSetting,
    SystemSettingRow, Trainer, TrainerRow, UserFavorite, UserFavoriteRow, UserHidden,
    UserHiddenRow, UserSetting, UserSettingRow,
};
pub use title_update::{TitleUpdateItem, TitleUpdateRow};
