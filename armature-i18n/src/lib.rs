//! Locale Routing for Armature
//!
//! Path-based internationalization for applications whose URLs carry the
//! locale as their first segment (`/fr/about`):
//!
//! - **Locale Resolution**: Map a raw path segment to a supported locale,
//!   an excluded route prefix, or nothing, following a fallback mapping
//! - **Path Rewriting**: Strip and apply locale prefixes
//! - **Locale Context**: Per-request locale state with a locale switcher
//! - **Negotiation**: Pick the default locale from `Accept-Language`
//! - **Catalogs**: Load the message catalog of the active locale
//!
//! # Quick Start
//!
//! ```rust
//! use armature_config::LocaleConfig;
//! use armature_i18n::prelude::*;
//! use std::sync::Arc;
//!
//! let config = LocaleConfig::new(["en", "fr", "it"], "en")
//!     .exclude("api")
//!     .map_locale("en-gb", "en");
//! let router = LocaleRouter::from_config(&config)?;
//!
//! let pending = Arc::new(PendingNavigation::new());
//! let decision = router.route(
//!     Location::parse("/en-GB/search?q=test"),
//!     None,
//!     pending.clone(),
//! )?;
//!
//! let ctx = decision.into_context().unwrap();
//! assert_eq!(ctx.locale().as_str(), "en");
//! assert_eq!(ctx.request_pathname(), "/search");
//!
//! ctx.change_locale(Some("it"));
//! assert_eq!(pending.target().unwrap().href(), "/it/search?q=test");
//! # Ok::<(), armature_i18n::I18nError>(())
//! ```
//!
//! # Path Rewriting
//!
//! ```rust
//! use armature_i18n::{apply_prefix, strip_prefix};
//!
//! assert_eq!(strip_prefix("/en/about", Some("en")), "/about");
//! assert_eq!(strip_prefix("/en", Some("en")), "/");
//! assert_eq!(apply_prefix("/about", Some("FR")), "/fr/about");
//! ```

mod catalog;
mod context;
mod error;
mod key;
mod mapping;
mod negotiate;
mod resolver;
mod rewrite;
mod router;

pub use catalog::{
    CachedCatalogLoader, CatalogLoader, DirCatalogLoader, LocalizedRequest, MemoryCatalogLoader,
    MessageCatalog,
};
pub use context::{NavigateOptions, Navigator, PathLocaleContext, PendingNavigation};
pub use error::I18nError;
pub use key::{LocaleKey, SupportedLocales, normalize};
pub use mapping::FallbackMapping;
pub use negotiate::{LanguagePreference, best_match, negotiate_locale, parse_accept_language};
pub use resolver::{LocaleResolver, Resolution};
pub use rewrite::{Location, apply_prefix, localized_redirect, strip_prefix};
pub use router::{LocaleRouter, RouteDecision};

/// Result type for locale routing operations
pub type Result<T> = std::result::Result<T, I18nError>;

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        CatalogLoader, I18nError, LocaleKey, LocaleRouter, Location, MessageCatalog,
        NavigateOptions, Navigator, PathLocaleContext, PendingNavigation, Resolution, Result,
        RouteDecision, apply_prefix, normalize, strip_prefix,
    };
}
