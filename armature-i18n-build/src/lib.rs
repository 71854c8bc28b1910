//! Build-time Catalog Bundling for Armature
//!
//! Turns a directory of per-locale JSON catalogs into one chunk per
//! supported locale, a `manifest.json`, and a Rust module that embeds the
//! chunks. Meant to run from a `build.rs`:
//!
//! ```rust,ignore
//! // build.rs
//! use armature_config::LocaleConfig;
//! use armature_i18n_build::CatalogBundler;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = LocaleConfig::from_file("i18n.toml")?;
//!     let out_dir = std::path::PathBuf::from(std::env::var("OUT_DIR")?).join("i18n");
//!
//!     CatalogBundler::new(&config, "locales", out_dir)?
//!         .fill_missing(true)
//!         .bundle()?;
//!
//!     println!("cargo:rerun-if-changed=locales");
//!     println!("cargo:rerun-if-changed=i18n.toml");
//!     Ok(())
//! }
//!
//! // src/main.rs
//! mod locales {
//!     include!(concat!(env!("OUT_DIR"), "/i18n/locales.rs"));
//! }
//! ```
//!
//! The generated module exposes `LOCALES`, `DEFAULT_LOCALE` and
//! `catalog_source(locale)`, keyed by the same locale keys the router
//! resolves to.

mod bundle;
mod error;
mod manifest;

pub use bundle::{BundleReport, CatalogBundler, DEFAULT_MODULE_FILE, MANIFEST_FILE};
pub use error::{BuildError, Result};
pub use manifest::{LoaderEntry, LoaderManifest, chunk_name};
