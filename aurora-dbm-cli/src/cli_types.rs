//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "aurora-dbm")]
#[command(about = "Inspect and edit Aurora dashboard content and settings databases", long_about = None)]
pub(crate) struct Cli {
    /// Content database (content.db)
    #[arg(long, global = true)]
    pub content: Option<PathBuf>,

    /// Settings database (settings.db)
    #[arg(long, global = true)]
    pub settings: Option<PathBuf>,

    /// File that failed operations are appended to
    #[arg(long, global = true)]
    pub error_log: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (generated SQL and row counts)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Create empty content and settings databases
    Init,

    /// Summarize the tables in a database file
    Examine {
        /// File to examine (defaults to both configured databases)
        path: Option<PathBuf>,
    },

    /// Content items (games)
    Content {
        #[command(subcommand)]
        action: ContentAction,
    },

    /// Title updates
    Updates {
        #[command(subcommand)]
        action: UpdatesAction,
    },

    /// Settings tables
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },

    /// Quick views
    QuickView {
        #[command(subcommand)]
        action: QuickViewAction,
    },

    /// Per-profile favorites
    Favorite {
        #[command(subcommand)]
        action: ProfileEntryAction,
    },

    /// Per-profile hidden titles
    Hidden {
        #[command(subcommand)]
        action: ProfileEntryAction,
    },

    /// Show or locate the settings file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum ContentAction {
    /// List content items
    List {
        /// Only titles whose name contains this text (case-insensitive)
        #[arg(short, long)]
        filter: Option<String>,
    },

    /// Show every field of one content item
    Show {
        id: i64,

        /// Print the stored row as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set one field of a content item and save
    Set {
        id: i64,

        #[arg(value_enum)]
        field: ContentField,

        /// New value; integers accept hex (0x...) or decimal
        value: String,
    },

    /// Delete a content item
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum UpdatesAction {
    /// List title updates
    List,

    /// Delete a title update
    Delete { id: i64 },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// List the rows of one settings table
    List {
        #[arg(value_enum)]
        kind: SettingsKind,
    },

    /// Delete one row of a settings table
    Delete {
        #[arg(value_enum)]
        kind: SettingsKind,

        id: i64,
    },
}

#[derive(Subcommand)]
pub(crate) enum QuickViewAction {
    /// Add a quick view
    Add {
        /// Name shown in the dashboard
        name: String,

        #[arg(long, default_value = "")]
        sort: String,

        #[arg(long, default_value = "")]
        filter: String,

        /// Flag bits (hex or decimal)
        #[arg(long, default_value = "0")]
        flags: String,

        #[arg(long, default_value_t = 0)]
        order: i32,

        /// XUID of the creating profile
        #[arg(long, default_value = "")]
        creator: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ProfileEntryAction {
    /// Add an entry for a profile
    Add {
        /// Content item id
        content_id: String,

        /// Profile id
        profile_id: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and their sources
    Show,

    /// Print the settings file path
    Path,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum SettingsKind {
    System,
    User,
    ScanPaths,
    Profiles,
    QuickViews,
    Favorites,
    Hidden,
    Trainers,
}

/// Editable content item fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub(crate) enum ContentField {
    TitleName,
    Description,
    Publisher,
    Developer,
    ReleaseDate,
    Directory,
    TitleId,
    MediaId,
    BaseVersion,
    DiscNum,
    DiscsInSet,
    LiveRating,
    LiveRaters,
    GenreFlag,
    ContentFlags,
    GameCapsFlags,
    ContentType,
    ContentGroup,
    DefaultGroup,
    SystemLink,
    OnlineMultiplayerMin,
    OnlineMultiplayerMax,
    OnlineCoOpMin,
    OnlineCoOpMax,
    OfflinePlayersMin,
    OfflinePlayersMax,
    OfflineCoOpMin,
    OfflineCoOpMax,
    OfflineSystemLink,
}
