//! Accept-Language Negotiation
//!
//! Picks the best supported locale from an `Accept-Language` header. The
//! result only feeds the default-locale decision; it never overrides a
//! locale present in the path.

use crate::key::{LocaleKey, SupportedLocales, normalize};
use std::cmp::Ordering;

/// One language range with its quality value.
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Normalized language range.
    pub key: LocaleKey,
    /// Quality value in `0.0..=1.0`.
    pub quality: f32,
}

/// Parse an Accept-Language header.
///
/// Returns preferences sorted by quality, highest first; ties keep header
/// order. Wildcards, empty ranges and `q=0` entries are dropped.
///
/// # Example
///
/// ```
/// use armature_i18n::parse_accept_language;
///
/// let prefs = parse_accept_language("en-US,en;q=0.9,fr;q=0.8,*;q=0.1");
/// let keys: Vec<&str> = prefs.iter().map(|p| p.key.as_str()).collect();
/// assert_eq!(keys, vec!["en-us", "en", "fr"]);
/// ```
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(|part| {
            let mut split = part.trim().splitn(2, ';');
            let tag = split.next()?.trim();

            if tag.is_empty() || tag == "*" {
                return None;
            }

            let quality = split
                .next()
                .and_then(|params| {
                    params
                        .split(';')
                        .map(str::trim)
                        .find_map(|param| param.strip_prefix("q="))
                })
                .map(|q| q.trim().parse::<f32>().ok())
                .unwrap_or(Some(1.0))?;

            if !(quality > 0.0 && quality <= 1.0) {
                return None;
            }

            Some(LanguagePreference {
                key: normalize(tag),
                quality,
            })
        })
        .collect();

    // Stable sort keeps header order between equal qualities.
    preferences.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    preferences
}

/// Negotiate the best supported locale for an Accept-Language header.
///
/// For each preference, in order: exact match, then the preference with
/// trailing subtags removed (`fr-ca` to `fr`), then any supported locale of
/// the same language (`fr` to `fr-fr`).
///
/// ```
/// use armature_i18n::{negotiate_locale, SupportedLocales};
///
/// let supported: SupportedLocales = ["en-us", "fr-fr", "de"].into_iter().collect();
/// assert_eq!(negotiate_locale("fr-CA,fr;q=0.9", &supported).unwrap(), "fr-fr");
/// assert_eq!(negotiate_locale("de-AT", &supported).unwrap(), "de");
/// assert!(negotiate_locale("ja", &supported).is_none());
/// ```
pub fn negotiate_locale(header: &str, supported: &SupportedLocales) -> Option<LocaleKey> {
    parse_accept_language(header)
        .iter()
        .find_map(|preference| best_match(&preference.key, supported))
}

/// Find the supported locale closest to `requested`.
pub fn best_match(requested: &LocaleKey, supported: &SupportedLocales) -> Option<LocaleKey> {
    if supported.contains(requested.as_str()) {
        return Some(requested.clone());
    }

    if let Some(ancestor) = requested
        .ancestors()
        .find(|ancestor| supported.contains(ancestor.as_str()))
    {
        return Some(ancestor);
    }

    supported
        .iter()
        .find(|candidate| candidate.language() == requested.language())
        .cloned()
}
