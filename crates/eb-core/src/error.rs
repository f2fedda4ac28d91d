//! Error types for content loading and validation.

use std::path::PathBuf;

/// Alias for `Result<T, CoreError>`.
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors raised while loading or validating game content.
///
/// A *missing* category file is not an error (the store degrades to an empty
/// category); these variants cover files that exist but cannot be used, and
/// content whose cross-references are broken.
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    /// A content file exists but could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying io error.
        #[source]
        source: std::io::Error,
    },

    /// A content file is not valid JSON for its category.
    #[error("malformed content in {path}: {source}")]
    Malformed {
        /// Path of the offending file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: serde_json::Error,
    },

    /// A location exit points at a location id that does not exist.
    #[error("location \"{from}\" has exit \"{direction}\" to unknown location \"{target}\"")]
    UnknownExitTarget {
        /// Location declaring the exit.
        from: String,
        /// Direction of the exit.
        direction: String,
        /// The unresolved target id.
        target: String,
    },

    /// An item is placed at a location id that does not exist.
    #[error("item \"{item}\" is placed at unknown location \"{location}\"")]
    UnknownItemLocation {
        /// The offending item id.
        item: String,
        /// The unresolved location id.
        location: String,
    },

    /// An NPC is placed at a location id that does not exist.
    #[error("npc \"{npc}\" is placed at unknown location \"{location}\"")]
    UnknownNpcLocation {
        /// The offending NPC id.
        npc: String,
        /// The unresolved location id.
        location: String,
    },
}
