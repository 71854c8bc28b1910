//! Loader Manifest
//!
//! One loader entry per supported locale, keyed by the same locale keys the
//! router resolves to, plus the Rust module that embeds the bundled
//! catalogs.

use crate::{BuildError, Result};
use armature_config::LocaleConfig;
use armature_i18n::{LocaleKey, LocaleRouter};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;

/// Loader entry of one locale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderEntry {
    /// Locale key.
    pub locale: LocaleKey,
    /// Chunk name, safe to use as a file stem.
    pub chunk: String,
    /// Bundled catalog file, relative to the output directory.
    pub file: String,
}

/// All loader entries, in configuration order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoaderManifest {
    pub default_locale: LocaleKey,
    pub entries: Vec<LoaderEntry>,
}

impl LoaderManifest {
    /// Build the manifest of a validated configuration.
    pub fn from_config(config: &LocaleConfig) -> Result<Self> {
        let router = LocaleRouter::from_config(config)?;
        Self::from_router(&router)
    }

    /// Build the manifest of a router's supported locales.
    ///
    /// Fails when two locale keys sanitize to the same chunk name, since
    /// their bundled files would overwrite each other.
    pub fn from_router(router: &LocaleRouter) -> Result<Self> {
        let mut owners: HashMap<String, &LocaleKey> = HashMap::new();
        let mut entries = Vec::new();

        for locale in router.supported().iter() {
            let chunk = chunk_name(locale);
            if let Some(first) = owners.insert(chunk.clone(), locale) {
                return Err(BuildError::ChunkCollision {
                    chunk,
                    first: first.to_string(),
                    second: locale.to_string(),
                });
            }
            entries.push(LoaderEntry {
                locale: locale.clone(),
                file: format!("{}.json", chunk),
                chunk,
            });
        }

        Ok(Self {
            default_locale: router.default_locale().clone(),
            entries,
        })
    }

    /// Entry of a locale key.
    pub fn entry(&self, locale: &str) -> Option<&LoaderEntry> {
        self.entries.iter().find(|entry| entry.locale == locale)
    }

    pub fn locales(&self) -> impl Iterator<Item = &LocaleKey> {
        self.entries.iter().map(|entry| &entry.locale)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Render a Rust module exposing `LOCALES`, `DEFAULT_LOCALE` and
    /// `catalog_source`, with catalogs embedded from `dir`.
    ///
    /// Paths are written absolute when `dir` is, so the module can be
    /// pulled in with `include!` from anywhere.
    pub fn render_module(&self, dir: &Path) -> String {
        let mut out = String::new();

        out.push_str("// Generated by armature-i18n-build. Do not edit.\n\n");
        out.push_str("/// Supported locale keys, in configuration order.\n");
        out.push_str("pub const LOCALES: &[&str] = &[");
        for (i, locale) in self.locales().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            out.push_str(&format!("{:?}", locale.as_str()));
        }
        out.push_str("];\n\n");

        out.push_str("/// Locale used when a request carries none.\n");
        out.push_str(&format!(
            "pub const DEFAULT_LOCALE: &str = {:?};\n\n",
            self.default_locale.as_str()
        ));

        out.push_str("/// Bundled JSON catalog of a supported locale key.\n");
        out.push_str("pub fn catalog_source(locale: &str) -> Option<&'static str> {\n");
        out.push_str("    match locale {\n");
        for entry in &self.entries {
            let path = dir.join(&entry.file);
            out.push_str(&format!(
                "        {:?} => Some(include_str!({:?})),\n",
                entry.locale.as_str(),
                path.to_string_lossy()
            ));
        }
        out.push_str("        _ => None,\n");
        out.push_str("    }\n");
        out.push_str("}\n");

        out
    }
}

/// Chunk name of a locale: `locale-` plus the key, restricted to
/// `[a-z0-9-]`.
pub fn chunk_name(locale: &LocaleKey) -> String {
    let sanitized: String = locale
        .as_str()
        .chars()
        .map(|c| {
            if c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-' {
                c
            } else {
                '_'
            }
        })
        .collect();
    format!("locale-{}", sanitized)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn manifest() -> LoaderManifest {
        LoaderManifest::from_config(&LocaleConfig::new(["en", "fr", "EN_us"], "en")).unwrap()
    }

    #[test]
    fn test_entries_follow_config_order() {
        let manifest = manifest();
        let locales: Vec<&str> = manifest.locales().map(LocaleKey::as_str).collect();
        assert_eq!(locales, vec!["en", "fr", "en-us"]);
        assert_eq!(manifest.default_locale, "en");

        let entry = manifest.entry("en-us").unwrap();
        assert_eq!(entry.chunk, "locale-en-us");
        assert_eq!(entry.file, "locale-en-us.json");
        assert!(manifest.entry("de").is_none());
    }

    #[test]
    fn test_from_config_rejects_bad_default() {
        assert!(LoaderManifest::from_config(&LocaleConfig::new(["en"], "fr")).is_err());
    }

    #[test]
    fn test_colliding_chunk_names_rejected() {
        let config = LocaleConfig::new(["en", "x.y", "x+y"], "en");
        let err = LoaderManifest::from_config(&config).unwrap_err();
        assert!(matches!(
            err,
            BuildError::ChunkCollision { ref chunk, ref first, ref second }
                if chunk == "locale-x_y" && first == "x.y" && second == "x+y"
        ));
    }

    #[test]
    fn test_chunk_name_sanitizes() {
        assert_eq!(chunk_name(&LocaleKey::new("zh-hant")), "locale-zh-hant");
        assert_eq!(chunk_name(&LocaleKey::new("x.y/z")), "locale-x_y_z");
    }

    #[test]
    fn test_json_round_trip() {
        let manifest = manifest();
        let json = manifest.to_json().unwrap();
        assert!(json.contains("\"default_locale\": \"en\""));
        assert_eq!(LoaderManifest::from_json(&json).unwrap(), manifest);
    }

    #[test]
    fn test_render_module() {
        let source = manifest().render_module(Path::new("/out/i18n"));

        assert!(source.contains(r#"pub const LOCALES: &[&str] = &["en", "fr", "en-us"];"#));
        assert!(source.contains(r#"pub const DEFAULT_LOCALE: &str = "en";"#));
        assert!(source.contains(
            r#""en-us" => Some(include_str!("/out/i18n/locale-en-us.json")),"#
        ));
        assert!(source.contains("_ => None,"));
    }
}
