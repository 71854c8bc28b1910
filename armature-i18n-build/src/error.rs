//! Error types for catalog bundling.

use armature_i18n::I18nError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while bundling catalogs at build time.
#[derive(Debug, Error)]
pub enum BuildError {
    /// A catalog file names a locale the configuration does not support.
    #[error("Catalog {} is for unsupported locale '{locale}'", .path.display())]
    UnknownLocale { locale: String, path: PathBuf },

    /// A supported locale has no catalog file.
    #[error("No catalog found for supported locale '{0}'")]
    MissingCatalog(String),

    /// Two files normalize to the same locale key.
    #[error("Catalogs {} and {} both provide locale '{locale}'", .first.display(), .second.display())]
    DuplicateCatalog {
        locale: String,
        first: PathBuf,
        second: PathBuf,
    },

    /// Two locale keys sanitize to the same chunk name.
    #[error("Locales '{first}' and '{second}' both map to chunk '{chunk}'")]
    ChunkCollision {
        chunk: String,
        first: String,
        second: String,
    },

    /// A catalog file could not be parsed.
    #[error("Invalid catalog {}: {reason}", .path.display())]
    InvalidCatalog { path: PathBuf, reason: String },

    /// Locale configuration error
    #[error(transparent)]
    I18n(#[from] I18nError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for build operations
pub type Result<T> = std::result::Result<T, BuildError>;
