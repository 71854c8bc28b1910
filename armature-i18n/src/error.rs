//! Error types for locale routing

use armature_config::ConfigError;
use thiserror::Error;

/// Errors that can occur while resolving locales or loading catalogs.
#[derive(Debug, Error)]
pub enum I18nError {
    /// The fallback mapping loops back onto a key already visited.
    #[error("Circular locale mapping detected at: {key}")]
    CircularMapping { key: String },

    /// Redirect targets must be absolute paths.
    #[error("Redirect target must start with '/': {0}")]
    InvalidRedirect(String),

    /// Explicit request for a locale that is not supported.
    #[error("Locale not supported: {0}")]
    LocaleNotFound(String),

    /// Configuration that parses but cannot be used.
    #[error("Invalid locale configuration: {0}")]
    InvalidConfig(String),

    /// Catalog loader failure
    #[error("Failed to load catalog for {locale}: {reason}")]
    CatalogLoad { locale: String, reason: String },

    /// Configuration loading error
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// JSON parse error
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
}
