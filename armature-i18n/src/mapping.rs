//! Fallback Mapping
//!
//! Substitutions for locales that are not directly supported, e.g.
//! `en-gb -> en`. Entries may chain; chains are walked by the resolver,
//! which also detects cycles.

use crate::key::{LocaleKey, SupportedLocales, normalize};
use std::collections::BTreeMap;

/// Mapping from an unsupported locale key to its substitute.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackMapping {
    entries: BTreeMap<LocaleKey, LocaleKey>,
}

impl FallbackMapping {
    /// Create an empty mapping.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from explicit `from -> to` pairs, normalizing both sides.
    pub fn explicit<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let entries = pairs
            .into_iter()
            .map(|(from, to)| (normalize(from.as_ref()), normalize(to.as_ref())))
            .collect();
        Self { entries }
    }

    /// Build from explicit pairs and add the derived more-specific to
    /// less-specific entries.
    ///
    /// Every key named by the explicit mapping (as source or target) that is
    /// neither supported nor explicitly mapped gets an entry to its parent
    /// key, e.g. `en-gb-x -> en-gb -> en`. Explicit entries always win.
    pub fn with_derived<I, K, V>(pairs: I, supported: &SupportedLocales) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: AsRef<str>,
    {
        let mut mapping = Self::explicit(pairs);

        let mut pending: Vec<LocaleKey> = mapping
            .entries
            .iter()
            .flat_map(|(from, to)| [from.clone(), to.clone()])
            .collect();

        while let Some(key) = pending.pop() {
            if supported.contains(key.as_str()) || mapping.entries.contains_key(&key) {
                continue;
            }
            if let Some(parent) = key.parent() {
                mapping.entries.insert(key, parent.clone());
                pending.push(parent);
            }
        }

        mapping
    }

    /// Add or replace an entry.
    pub fn insert(&mut self, from: &str, to: &str) {
        self.entries.insert(normalize(from), normalize(to));
    }

    /// Look up the substitute for a normalized key.
    pub fn get(&self, key: &str) -> Option<&LocaleKey> {
        self.entries.get(key)
    }

    /// Iterate the source keys.
    pub fn sources(&self) -> impl Iterator<Item = &LocaleKey> {
        self.entries.keys()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
