//! Catalog Bundler
//!
//! Reads one JSON catalog per supported locale from a source directory,
//! optionally fills gaps from fallback locales, and writes the per-locale
//! chunks, `manifest.json` and the generated loader module.

use crate::manifest::LoaderManifest;
use crate::{BuildError, Result};
use armature_config::LocaleConfig;
use armature_i18n::{LocaleKey, LocaleRouter, MessageCatalog, normalize};
use armature_log::{debug, info, warn};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const TARGET: &str = "armature::i18n::build";

/// File name of the generated manifest.
pub const MANIFEST_FILE: &str = "manifest.json";

/// Default file name of the generated loader module.
pub const DEFAULT_MODULE_FILE: &str = "locales.rs";

/// Outcome of a bundling run.
#[derive(Debug, Clone)]
pub struct BundleReport {
    pub manifest: LoaderManifest,
    /// Messages copied in from fallback locales, per locale.
    pub filled: BTreeMap<LocaleKey, usize>,
    pub manifest_path: PathBuf,
    pub module_path: PathBuf,
}

/// Bundles catalogs for one locale configuration.
///
/// ```rust,no_run
/// use armature_config::LocaleConfig;
/// use armature_i18n_build::CatalogBundler;
///
/// let config = LocaleConfig::new(["en", "fr"], "en");
/// let report = CatalogBundler::new(&config, "locales", "target/i18n")?
///     .fill_missing(true)
///     .bundle()?;
/// println!("generated {}", report.module_path.display());
/// # Ok::<(), armature_i18n_build::BuildError>(())
/// ```
#[derive(Debug, Clone)]
pub struct CatalogBundler {
    router: LocaleRouter,
    source_dir: PathBuf,
    out_dir: PathBuf,
    fill_missing: bool,
    module_file: String,
}

impl CatalogBundler {
    pub fn new(
        config: &LocaleConfig,
        source_dir: impl Into<PathBuf>,
        out_dir: impl Into<PathBuf>,
    ) -> Result<Self> {
        Ok(Self {
            router: LocaleRouter::from_config(config)?,
            source_dir: source_dir.into(),
            out_dir: out_dir.into(),
            fill_missing: false,
            module_file: DEFAULT_MODULE_FILE.to_string(),
        })
    }

    /// Copy messages a locale lacks from its supported parent locales and
    /// then from the default locale.
    pub fn fill_missing(mut self, fill: bool) -> Self {
        self.fill_missing = fill;
        self
    }

    /// File name of the generated module inside the output directory.
    pub fn module_file(mut self, name: impl Into<String>) -> Self {
        self.module_file = name.into();
        self
    }

    pub fn out_dir(&self) -> &Path {
        &self.out_dir
    }

    /// Read every catalog from the source directory.
    ///
    /// File stems are normalized to locale keys (`en_US.json` is `en-us`).
    /// Non-JSON files are ignored.
    pub fn collect(&self) -> Result<BTreeMap<LocaleKey, MessageCatalog>> {
        let mut found: BTreeMap<LocaleKey, (PathBuf, MessageCatalog)> = BTreeMap::new();

        for entry in fs::read_dir(&self.source_dir)? {
            let path = entry?.path();
            if path.extension().is_none_or(|ext| ext != "json") {
                continue;
            }
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                warn!(target: TARGET, "Skipping catalog with non UTF-8 name"; path = path.display());
                continue;
            };

            let locale = normalize(stem);
            if !self.router.supported().contains(locale.as_str()) {
                return Err(BuildError::UnknownLocale {
                    locale: locale.into(),
                    path,
                });
            }

            let content = fs::read_to_string(&path)?;
            let catalog =
                MessageCatalog::from_json(&content).map_err(|e| BuildError::InvalidCatalog {
                    path: path.clone(),
                    reason: e.to_string(),
                })?;

            if let Some((first, _)) = found.get(&locale) {
                return Err(BuildError::DuplicateCatalog {
                    locale: locale.into(),
                    first: first.clone(),
                    second: path,
                });
            }

            debug!(
                target: TARGET,
                "Read catalog";
                locale = locale,
                path = path.display(),
                messages = catalog.len()
            );
            found.insert(locale, (path, catalog));
        }

        if let Some(missing) = self
            .router
            .supported()
            .iter()
            .find(|locale| !found.contains_key(*locale))
        {
            return Err(BuildError::MissingCatalog(missing.to_string()));
        }

        Ok(found
            .into_iter()
            .map(|(locale, (_, catalog))| (locale, catalog))
            .collect())
    }

    /// Locales whose messages fill gaps in `locale`, in priority order.
    pub fn fill_chain(&self, locale: &LocaleKey) -> Vec<LocaleKey> {
        let supported = self.router.supported();
        let default_locale = self.router.default_locale();

        let mut chain: Vec<LocaleKey> = locale
            .ancestors()
            .filter(|ancestor| supported.contains(ancestor.as_str()))
            .collect();
        if locale != default_locale && !chain.contains(default_locale) {
            chain.push(default_locale.clone());
        }
        chain
    }

    /// Run the full bundling step.
    pub fn bundle(&self) -> Result<BundleReport> {
        let originals = self.collect()?;
        let manifest = LoaderManifest::from_router(&self.router)?;
        let mut filled = BTreeMap::new();

        fs::create_dir_all(&self.out_dir)?;

        for entry in &manifest.entries {
            let Some(original) = originals.get(&entry.locale) else {
                return Err(BuildError::MissingCatalog(entry.locale.to_string()));
            };
            let mut catalog = original.clone();

            if self.fill_missing {
                let mut added = 0;
                for fallback in self.fill_chain(&entry.locale) {
                    if let Some(source) = originals.get(&fallback) {
                        added += catalog.extend_missing(source);
                    }
                }
                if added > 0 {
                    debug!(target: TARGET, "Filled missing messages"; locale = entry.locale, added = added);
                }
                filled.insert(entry.locale.clone(), added);
            }

            fs::write(self.out_dir.join(&entry.file), catalog.to_json()?)?;
        }

        let manifest_path = self.out_dir.join(MANIFEST_FILE);
        fs::write(&manifest_path, manifest.to_json()?)?;

        let module_path = self.out_dir.join(&self.module_file);
        fs::write(&module_path, manifest.render_module(&self.out_dir))?;

        info!(
            target: TARGET,
            "Bundled locale catalogs";
            locales = manifest.entries.len(),
            out_dir = self.out_dir.display()
        );

        Ok(BundleReport {
            manifest,
            filled,
            manifest_path,
            module_path,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn source(files: &[(&str, &str)]) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for (name, content) in files {
            fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    fn config() -> LocaleConfig {
        LocaleConfig::new(["en", "fr", "fr-ca"], "en")
    }

    #[test]
    fn test_collect_normalizes_stems() {
        let src = source(&[
            ("en.json", r#"{"hello": "Hello"}"#),
            ("fr.json", r#"{"hello": "Bonjour"}"#),
            ("FR_ca.json", r#"{"bye": "Salut"}"#),
            ("README.md", "ignored"),
        ]);
        let out = tempfile::tempdir().unwrap();

        let catalogs = CatalogBundler::new(&config(), src.path(), out.path())
            .unwrap()
            .collect()
            .unwrap();
        assert_eq!(catalogs.len(), 3);
        assert_eq!(catalogs[&normalize("fr-ca")].get("bye"), Some("Salut"));
    }

    #[test]
    fn test_unknown_locale() {
        let src = source(&[
            ("en.json", "{}"),
            ("fr.json", "{}"),
            ("fr-ca.json", "{}"),
            ("de.json", "{}"),
        ]);
        let out = tempfile::tempdir().unwrap();

        let err = CatalogBundler::new(&config(), src.path(), out.path())
            .unwrap()
            .collect()
            .unwrap_err();
        assert!(matches!(err, BuildError::UnknownLocale { locale, .. } if locale == "de"));
    }

    #[test]
    fn test_missing_catalog() {
        let src = source(&[("en.json", "{}"), ("fr.json", "{}")]);
        let out = tempfile::tempdir().unwrap();

        let err = CatalogBundler::new(&config(), src.path(), out.path())
            .unwrap()
            .bundle()
            .unwrap_err();
        assert!(matches!(err, BuildError::MissingCatalog(locale) if locale == "fr-ca"));
    }

    #[test]
    fn test_duplicate_and_invalid_catalogs() {
        let out = tempfile::tempdir().unwrap();

        let dup = source(&[("fr-ca.json", "{}"), ("fr_CA.json", "{}")]);
        let err = CatalogBundler::new(&config(), dup.path(), out.path())
            .unwrap()
            .collect()
            .unwrap_err();
        assert!(matches!(err, BuildError::DuplicateCatalog { .. }));

        let bad = source(&[("en.json", "{ nope")]);
        let err = CatalogBundler::new(&config(), bad.path(), out.path())
            .unwrap()
            .collect()
            .unwrap_err();
        assert!(matches!(err, BuildError::InvalidCatalog { .. }));
    }

    #[test]
    fn test_fill_chain() {
        let src = source(&[]);
        let bundler = CatalogBundler::new(
            &LocaleConfig::new(["en", "fr", "fr-ca", "fr-ca-x-qc"], "en"),
            src.path(),
            src.path(),
        )
        .unwrap();

        assert_eq!(
            bundler.fill_chain(&normalize("fr-ca-x-qc")),
            vec![normalize("fr-ca"), normalize("fr"), normalize("en")]
        );
        assert_eq!(bundler.fill_chain(&normalize("fr")), vec![normalize("en")]);
        assert!(bundler.fill_chain(&normalize("en")).is_empty());
    }

    #[test]
    fn test_bundle_writes_outputs() {
        let src = source(&[
            ("en.json", r#"{"hello": "Hello", "bye": "Bye", "nav": {"home": "Home"}}"#),
            ("fr.json", r#"{"hello": "Bonjour", "bye": "Au revoir"}"#),
            ("fr-ca.json", r#"{"hello": "Allo"}"#),
        ]);
        let out = tempfile::tempdir().unwrap();

        let report = CatalogBundler::new(&config(), src.path(), out.path())
            .unwrap()
            .fill_missing(true)
            .module_file("i18n.rs")
            .bundle()
            .unwrap();

        assert_eq!(report.filled[&normalize("fr-ca")], 2);
        assert_eq!(report.filled[&normalize("fr")], 1);
        assert_eq!(report.filled[&normalize("en")], 0);

        let fr_ca = fs::read_to_string(out.path().join("locale-fr-ca.json")).unwrap();
        let fr_ca = MessageCatalog::from_json(&fr_ca).unwrap();
        assert_eq!(fr_ca.get("hello"), Some("Allo"));
        assert_eq!(fr_ca.get("bye"), Some("Au revoir"));
        assert_eq!(fr_ca.get("nav.home"), Some("Home"));

        let manifest =
            LoaderManifest::from_json(&fs::read_to_string(&report.manifest_path).unwrap()).unwrap();
        assert_eq!(manifest, report.manifest);

        assert!(report.module_path.ends_with("i18n.rs"));
        let module = fs::read_to_string(&report.module_path).unwrap();
        assert!(module.contains("pub fn catalog_source"));
        assert!(module.contains("locale-fr-ca.json"));
    }

    #[test]
    fn test_bundle_without_fill_keeps_catalogs() {
        let src = source(&[
            ("en.json", r#"{"hello": "Hello", "bye": "Bye"}"#),
            ("fr.json", r#"{"hello": "Bonjour"}"#),
            ("fr-ca.json", "{}"),
        ]);
        let out = tempfile::tempdir().unwrap();

        let report = CatalogBundler::new(&config(), src.path(), out.path())
            .unwrap()
            .bundle()
            .unwrap();
        assert!(report.filled.is_empty());

        let fr = fs::read_to_string(out.path().join("locale-fr.json")).unwrap();
        assert_eq!(MessageCatalog::from_json(&fr).unwrap().len(), 1);
    }
}
