// Armature Locale - locale-aware routing for Armature applications
//
// This library resolves the locale carried by the first path segment,
// rewrites locale prefixes, and builds the per-request locale context.

// Re-export locale routing
pub use armature_i18n::*;

// Re-export supporting crates
pub use armature_config;
pub use armature_i18n;
pub use armature_log;

pub use armature_config::{ConfigError, LocaleConfig};

#[cfg(feature = "build")]
pub use armature_i18n_build;

/// Prelude for common imports.
///
/// ```
/// use armature_locale::prelude::*;
///
/// let router = LocaleRouter::from_config(&LocaleConfig::new(["en", "de"], "en")).unwrap();
/// assert_eq!(router.resolve(Some("DE")).unwrap(), Resolution::Locale("de".into()));
/// ```
pub mod prelude {
    pub use armature_config::LocaleConfig;
    pub use armature_i18n::prelude::*;

    #[cfg(feature = "build")]
    pub use armature_i18n_build::CatalogBundler;
}
