//! Locale Resolver
//!
//! Decides whether a raw path segment names a supported locale, an excluded
//! route prefix, or nothing at all. Resolution order:
//!
//! 1. direct match against the supported set (normalized)
//! 2. excluded prefixes (raw, case-sensitive)
//! 3. fallback mapping, followed hop by hop with cycle detection
//!
//! Anything else is unresolved, which tells the caller to apply the default
//! locale.

use crate::key::{LocaleKey, SupportedLocales, normalize};
use crate::mapping::FallbackMapping;
use crate::{I18nError, Result};
use armature_log::{debug, error, trace};
use std::collections::HashSet;

const TARGET: &str = "armature::i18n::resolver";

/// Outcome of resolving one path segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The segment names a supported locale (directly or through the mapping).
    Locale(LocaleKey),
    /// The segment is a reserved, non-localized route prefix.
    Excluded,
    /// No locale present; the caller falls back to its default.
    Unresolved,
}

impl Resolution {
    /// The resolved locale, if any.
    pub fn locale(&self) -> Option<&LocaleKey> {
        match self {
            Resolution::Locale(key) => Some(key),
            _ => None,
        }
    }

    pub fn into_locale(self) -> Option<LocaleKey> {
        match self {
            Resolution::Locale(key) => Some(key),
            _ => None,
        }
    }

    pub fn is_excluded(&self) -> bool {
        matches!(self, Resolution::Excluded)
    }
}

/// Resolves raw path segments against static locale configuration.
///
/// Holds only read-only state; share it freely between requests.
#[derive(Debug, Clone)]
pub struct LocaleResolver {
    supported: SupportedLocales,
    exclude: Vec<String>,
    mapping: FallbackMapping,
}

impl LocaleResolver {
    pub fn new<I, S>(supported: SupportedLocales, exclude: I, mapping: FallbackMapping) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            supported,
            exclude: exclude.into_iter().map(Into::into).collect(),
            mapping,
        }
    }

    pub fn supported(&self) -> &SupportedLocales {
        &self.supported
    }

    pub fn mapping(&self) -> &FallbackMapping {
        &self.mapping
    }

    /// Raw excluded prefixes, in configuration order.
    pub fn excluded(&self) -> &[String] {
        &self.exclude
    }

    /// Resolve a raw segment.
    ///
    /// `None` and the empty string are unresolved, not errors. A mapping
    /// chain that revisits a key fails with [`I18nError::CircularMapping`].
    ///
    /// # Example
    ///
    /// ```
    /// use armature_i18n::{FallbackMapping, LocaleResolver, Resolution, SupportedLocales};
    ///
    /// let supported: SupportedLocales = ["en", "fr"].into_iter().collect();
    /// let mapping = FallbackMapping::explicit([("a", "b"), ("b", "en")]);
    /// let resolver = LocaleResolver::new(supported, ["api"], mapping);
    ///
    /// assert_eq!(resolver.resolve(Some("FR")).unwrap(), Resolution::Locale("fr".into()));
    /// assert_eq!(resolver.resolve(Some("a")).unwrap(), Resolution::Locale("en".into()));
    /// assert_eq!(resolver.resolve(Some("api")).unwrap(), Resolution::Excluded);
    /// assert_eq!(resolver.resolve(None).unwrap(), Resolution::Unresolved);
    /// ```
    pub fn resolve(&self, raw: Option<&str>) -> Result<Resolution> {
        let Some(raw) = raw.filter(|segment| !segment.is_empty()) else {
            return Ok(Resolution::Unresolved);
        };

        let mut visited = HashSet::new();
        let resolution = self.walk(raw, &mut visited)?;

        debug!(
            target: TARGET,
            "Resolved locale segment";
            segment = raw,
            outcome = describe(&resolution),
            hops = visited.len()
        );
        Ok(resolution)
    }

    /// Resolve `raw`, carrying a visited set across mapping hops.
    fn walk(&self, raw: &str, visited: &mut HashSet<LocaleKey>) -> Result<Resolution> {
        let mut current = raw.to_string();

        loop {
            let key = normalize(&current);

            if !visited.insert(key.clone()) {
                error!(target: TARGET, "Circular locale mapping"; key = key, segment = raw);
                return Err(I18nError::CircularMapping { key: key.into() });
            }

            if self.supported.contains(key.as_str()) {
                return Ok(Resolution::Locale(key));
            }

            if self.exclude.iter().any(|prefix| *prefix == current) {
                return Ok(Resolution::Excluded);
            }

            match self.mapping.get(key.as_str()) {
                Some(next) if *next != key => {
                    trace!(target: TARGET, "Following locale mapping"; from = key, to = next);
                    current = next.to_string();
                }
                _ => return Ok(Resolution::Unresolved),
            }
        }
    }
}

fn describe(resolution: &Resolution) -> String {
    match resolution {
        Resolution::Locale(key) => key.to_string(),
        Resolution::Excluded => "excluded".to_string(),
        Resolution::Unresolved => "unresolved".to_string(),
    }
}
