//! Message Catalogs
//!
//! Loading of per-locale message catalogs. Message formatting is left to the
//! application; a catalog is only a flat key to message map.

use crate::context::PathLocaleContext;
use crate::key::LocaleKey;
use crate::{I18nError, Result};
use armature_log::{debug, warn};
use async_trait::async_trait;
use parking_lot::RwLock;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const TARGET: &str = "armature::i18n::catalog";

/// Messages of a single locale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageCatalog {
    messages: BTreeMap<String, String>,
}

impl MessageCatalog {
    /// Create an empty catalog.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON.
    ///
    /// Nested objects flatten to dotted keys (`{"nav": {"home": "Home"}}`
    /// becomes `nav.home`). Non-string leaves are skipped.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        let mut catalog = Self::new();

        match value {
            Value::Object(map) => {
                for (key, value) in map {
                    catalog.flatten(key, value);
                }
            }
            _ => {
                return Err(I18nError::CatalogLoad {
                    locale: String::new(),
                    reason: "catalog root must be a JSON object".to_string(),
                });
            }
        }

        Ok(catalog)
    }

    fn flatten(&mut self, prefix: String, value: Value) {
        match value {
            Value::String(message) => {
                self.messages.insert(prefix, message);
            }
            Value::Object(map) => {
                for (key, value) in map {
                    self.flatten(format!("{}.{}", prefix, key), value);
                }
            }
            _ => {}
        }
    }

    /// Serialize back to flat JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.messages)?)
    }

    /// Add a message.
    pub fn add(&mut self, key: impl Into<String>, message: impl Into<String>) {
        self.messages.insert(key.into(), message.into());
    }

    /// Get a message.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.messages.get(key).map(String::as_str)
    }

    /// Get a message, falling back to the key itself.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.get(key).unwrap_or(key)
    }

    pub fn has(&self, key: &str) -> bool {
        self.messages.contains_key(key)
    }

    /// Message keys in sorted order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.messages.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Copy messages from `other` that this catalog lacks.
    ///
    /// Returns how many were added.
    pub fn extend_missing(&mut self, other: &MessageCatalog) -> usize {
        let mut added = 0;
        for (key, message) in &other.messages {
            if !self.messages.contains_key(key) {
                self.messages.insert(key.clone(), message.clone());
                added += 1;
            }
        }
        added
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for MessageCatalog {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            messages: iter
                .into_iter()
                .map(|(key, message)| (key.into(), message.into()))
                .collect(),
        }
    }
}

/// Source of message catalogs.
///
/// Implementations are asked only for supported locales.
#[async_trait]
pub trait CatalogLoader: Send + Sync {
    async fn load(&self, locale: &LocaleKey) -> Result<MessageCatalog>;
}

/// Catalogs held in memory, typically compiled into the binary.
#[derive(Debug, Clone, Default)]
pub struct MemoryCatalogLoader {
    catalogs: HashMap<LocaleKey, MessageCatalog>,
}

impl MemoryCatalogLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register the catalog for a locale.
    pub fn with(mut self, locale: &str, catalog: MessageCatalog) -> Self {
        self.insert(locale, catalog);
        self
    }

    pub fn insert(&mut self, locale: &str, catalog: MessageCatalog) {
        self.catalogs.insert(LocaleKey::new(locale), catalog);
    }

    /// Register a catalog from JSON source.
    pub fn insert_json(&mut self, locale: &str, json: &str) -> Result<()> {
        let catalog = MessageCatalog::from_json(json).map_err(|e| with_locale(e, locale))?;
        self.insert(locale, catalog);
        Ok(())
    }
}

#[async_trait]
impl CatalogLoader for MemoryCatalogLoader {
    async fn load(&self, locale: &LocaleKey) -> Result<MessageCatalog> {
        self.catalogs
            .get(locale)
            .cloned()
            .ok_or_else(|| I18nError::CatalogLoad {
                locale: locale.to_string(),
                reason: "no catalog registered".to_string(),
            })
    }
}

/// Catalogs read from `<dir>/<locale>.json`.
#[derive(Debug, Clone)]
pub struct DirCatalogLoader {
    dir: PathBuf,
}

impl DirCatalogLoader {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File holding the catalog of `locale`.
    pub fn path_for(&self, locale: &LocaleKey) -> PathBuf {
        self.dir.join(format!("{}.json", locale))
    }
}

#[async_trait]
impl CatalogLoader for DirCatalogLoader {
    async fn load(&self, locale: &LocaleKey) -> Result<MessageCatalog> {
        let path = self.path_for(locale);
        let content = tokio::fs::read_to_string(&path).await.map_err(|e| {
            warn!(target: TARGET, "Catalog file unreadable"; path = path.display(), error = e);
            I18nError::CatalogLoad {
                locale: locale.to_string(),
                reason: format!("{}: {}", path.display(), e),
            }
        })?;

        let catalog =
            MessageCatalog::from_json(&content).map_err(|e| with_locale(e, locale.as_str()))?;
        debug!(
            target: TARGET,
            "Loaded catalog";
            locale = locale,
            path = path.display(),
            messages = catalog.len()
        );
        Ok(catalog)
    }
}

/// Caches catalogs from an inner loader for the life of the process.
///
/// Failed loads are not cached.
pub struct CachedCatalogLoader<L> {
    inner: L,
    cache: RwLock<HashMap<LocaleKey, Arc<MessageCatalog>>>,
}

impl<L: CatalogLoader> CachedCatalogLoader<L> {
    pub fn new(inner: L) -> Self {
        Self {
            inner,
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Load through the cache, sharing the catalog.
    pub async fn get(&self, locale: &LocaleKey) -> Result<Arc<MessageCatalog>> {
        let hit = self.cache.read().get(locale).cloned();
        if let Some(catalog) = hit {
            return Ok(catalog);
        }

        let catalog = Arc::new(self.inner.load(locale).await?);
        let mut cache = self.cache.write();
        // Another task may have won the race; keep the first entry.
        Ok(cache.entry(locale.clone()).or_insert(catalog).clone())
    }

    /// Number of cached catalogs.
    pub fn cached(&self) -> usize {
        self.cache.read().len()
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

#[async_trait]
impl<L: CatalogLoader> CatalogLoader for CachedCatalogLoader<L> {
    async fn load(&self, locale: &LocaleKey) -> Result<MessageCatalog> {
        Ok(self.get(locale).await?.as_ref().clone())
    }
}

/// A locale context paired with its catalog, scoped to one request.
#[derive(Debug, Clone)]
pub struct LocalizedRequest {
    pub context: PathLocaleContext,
    pub catalog: Arc<MessageCatalog>,
}

impl LocalizedRequest {
    pub fn new(context: PathLocaleContext, catalog: Arc<MessageCatalog>) -> Self {
        Self { context, catalog }
    }

    /// Translate a key in the request's locale.
    pub fn t<'a>(&'a self, key: &'a str) -> &'a str {
        self.catalog.t(key)
    }

    pub fn locale(&self) -> &LocaleKey {
        self.context.locale()
    }
}

fn with_locale(err: I18nError, locale: &str) -> I18nError {
    match err {
        I18nError::CatalogLoad { reason, .. } => I18nError::CatalogLoad {
            locale: locale.to_string(),
            reason,
        },
        I18nError::Json(e) => I18nError::CatalogLoad {
            locale: locale.to_string(),
            reason: e.to_string(),
        },
        other => other,
    }
}
