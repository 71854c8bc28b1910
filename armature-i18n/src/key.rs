//! Locale Keys
//!
//! A [`LocaleKey`] is the canonical, comparable form of a locale token:
//! lowercase, with `_` replaced by `-` (`EN_US` becomes `en-us`). No
//! well-formedness validation is performed; every string normalizes.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::collections::HashSet;
use std::fmt;

/// Normalize a raw locale token into a [`LocaleKey`].
///
/// Idempotent and total: `normalize(normalize(x)) == normalize(x)` for
/// every string, including the empty one.
///
/// # Example
///
/// ```
/// use armature_i18n::normalize;
///
/// assert_eq!(normalize("EN_us").as_str(), "en-us");
/// assert_eq!(normalize("").as_str(), "");
/// ```
pub fn normalize(raw: &str) -> LocaleKey {
    LocaleKey(raw.to_lowercase().replace('_', "-"))
}

/// Canonical locale identifier, e.g. `en-us`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct LocaleKey(String);

impl LocaleKey {
    /// Normalize `raw` into a key.
    pub fn new(raw: &str) -> Self {
        normalize(raw)
    }

    /// Borrow the key as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Primary language subtag (`en` for `en-us`).
    pub fn language(&self) -> &str {
        self.0.split('-').next().unwrap_or_default()
    }

    /// The key with its last subtag removed (`en-us` to `en`).
    pub fn parent(&self) -> Option<LocaleKey> {
        match self.0.rsplit_once('-') {
            Some((head, _)) if !head.is_empty() => Some(LocaleKey(head.to_string())),
            _ => None,
        }
    }

    /// All less specific keys, most specific first.
    pub fn ancestors(&self) -> impl Iterator<Item = LocaleKey> + '_ {
        std::iter::successors(self.parent(), LocaleKey::parent)
    }
}

impl fmt::Display for LocaleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for LocaleKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for LocaleKey {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for LocaleKey {
    fn from(raw: &str) -> Self {
        normalize(raw)
    }
}

impl From<String> for LocaleKey {
    fn from(raw: String) -> Self {
        normalize(&raw)
    }
}

impl From<LocaleKey> for String {
    fn from(key: LocaleKey) -> Self {
        key.0
    }
}

impl PartialEq<str> for LocaleKey {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for LocaleKey {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Immutable set of supported locale keys, in configuration order.
#[derive(Debug, Clone, Default)]
pub struct SupportedLocales {
    ordered: Vec<LocaleKey>,
    lookup: HashSet<LocaleKey>,
}

impl SupportedLocales {
    /// Check membership of an already normalized key.
    pub fn contains(&self, key: &str) -> bool {
        self.lookup.contains(key)
    }

    /// Iterate in configuration order.
    pub fn iter(&self) -> impl Iterator<Item = &LocaleKey> {
        self.ordered.iter()
    }

    pub fn len(&self) -> usize {
        self.ordered.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ordered.is_empty()
    }

    /// Keys as a slice, in configuration order.
    pub fn as_slice(&self) -> &[LocaleKey] {
        &self.ordered
    }
}

impl<S: AsRef<str>> FromIterator<S> for SupportedLocales {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::default();
        for raw in iter {
            let key = normalize(raw.as_ref());
            if set.lookup.insert(key.clone()) {
                set.ordered.push(key);
            }
        }
        set
    }
}
