//! Pathname Locale Rewriting
//!
//! Strips a locale prefix from a pathname and applies one, leaving the
//! search and hash parts to [`Location`].

use crate::key::normalize;
use crate::{I18nError, Result};
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::fmt;

/// Remove a leading `/{raw_segment}` from `pathname`.
///
/// The comparison is against the exact raw segment (case-sensitive, not
/// normalized) and only a single leading occurrence is removed. A segment
/// must end at `/` or at the end of the path; `/english` is left alone for
/// `en`. A bare prefix, with or without trailing slash, collapses to `/`.
///
/// | pathname | segment | result |
/// |---|---|---|
/// | `/en/about` | `en` | `/about` |
/// | `/en` | `en` | `/` |
/// | `/en//about` | `en` | `//about` |
/// | `/about/en/page` | `en` | unchanged |
pub fn strip_prefix<'a>(pathname: &'a str, raw_segment: Option<&str>) -> Cow<'a, str> {
    let Some(segment) = raw_segment.filter(|s| !s.is_empty()) else {
        return Cow::Borrowed(pathname);
    };

    let Some(rest) = pathname
        .strip_prefix('/')
        .and_then(|path| path.strip_prefix(segment))
    else {
        return Cow::Borrowed(pathname);
    };

    if rest.is_empty() || rest == "/" {
        Cow::Borrowed("/")
    } else if rest.starts_with('/') {
        Cow::Borrowed(rest)
    } else {
        Cow::Borrowed(pathname)
    }
}

/// Prefix `pathname` with the normalized `target` locale.
///
/// The pathname is appended as-is, so the root becomes `/fr/`. Both `/fr`
/// and `/fr/` strip back to `/`.
pub fn apply_prefix<'a>(pathname: &'a str, target: Option<&str>) -> Cow<'a, str> {
    match target {
        None => Cow::Borrowed(pathname),
        Some(target) => Cow::Owned(format!("/{}{}", normalize(target), pathname)),
    }
}

/// Build a locale-prefixed redirect target.
///
/// `to` must be an absolute path; anything else is rejected before a
/// caller can act on it.
pub fn localized_redirect(to: &str, locale: Option<&str>) -> Result<String> {
    if !to.starts_with('/') {
        return Err(I18nError::InvalidRedirect(to.to_string()));
    }
    Ok(apply_prefix(to, locale).into_owned())
}

/// Pathname, search and hash of a URL, as routers expose them.
///
/// `search` keeps its leading `?` and `hash` its leading `#`; both are empty
/// when absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    pub pathname: String,
    #[serde(default)]
    pub search: String,
    #[serde(default)]
    pub hash: String,
}

impl Location {
    pub fn new(
        pathname: impl Into<String>,
        search: impl Into<String>,
        hash: impl Into<String>,
    ) -> Self {
        Self {
            pathname: pathname.into(),
            search: search.into(),
            hash: hash.into(),
        }
    }

    /// Split a path-absolute href such as `/en/search?q=1#top`.
    pub fn parse(href: &str) -> Self {
        let (rest, hash) = match href.find('#') {
            Some(index) => href.split_at(index),
            None => (href, ""),
        };
        let (pathname, search) = match rest.find('?') {
            Some(index) => rest.split_at(index),
            None => (rest, ""),
        };
        let pathname = if pathname.is_empty() { "/" } else { pathname };
        Self::new(pathname, search, hash)
    }

    /// Same search and hash, different pathname.
    pub fn with_pathname(&self, pathname: impl Into<String>) -> Self {
        Self {
            pathname: pathname.into(),
            search: self.search.clone(),
            hash: self.hash.clone(),
        }
    }

    /// Reassemble the href.
    pub fn href(&self) -> String {
        format!("{}{}{}", self.pathname, self.search, self.hash)
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}{}", self.pathname, self.search, self.hash)
    }
}
