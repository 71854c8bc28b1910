//! Request-scoped locale context.
//!
//! A [`PathLocaleContext`] is built fresh for every request or navigation
//! and never mutated. It carries the resolved locale, the locale the path
//! asked for (if any), the pathname without its locale prefix, and the
//! operation that switches to another locale.

use crate::key::LocaleKey;
use crate::rewrite::{Location, apply_prefix, strip_prefix};
use armature_log::debug;
use parking_lot::Mutex;
use std::fmt;
use std::sync::Arc;

const TARGET: &str = "armature::i18n::context";

/// Hints passed along with a navigation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NavigateOptions {
    /// Whether the router should reset the scroll position.
    pub reset_scroll: bool,
}

impl NavigateOptions {
    /// Options used for locale switches: keep the viewport where it is.
    pub fn preserve_scroll() -> Self {
        Self {
            reset_scroll: false,
        }
    }
}

/// Router binding that performs navigations.
pub trait Navigator: Send + Sync {
    fn navigate(&self, to: Location, options: NavigateOptions);
}

impl<F> Navigator for F
where
    F: Fn(Location, NavigateOptions) + Send + Sync,
{
    fn navigate(&self, to: Location, options: NavigateOptions) {
        self(to, options)
    }
}

/// Navigator that only records the requested target.
///
/// Useful on the server, where a navigation turns into a redirect response.
#[derive(Debug, Default)]
pub struct PendingNavigation {
    target: Mutex<Option<(Location, NavigateOptions)>>,
}

impl PendingNavigation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Take the recorded navigation, leaving nothing behind.
    pub fn take(&self) -> Option<(Location, NavigateOptions)> {
        self.target.lock().take()
    }

    /// Peek at the recorded target.
    pub fn target(&self) -> Option<Location> {
        self.target.lock().as_ref().map(|(location, _)| location.clone())
    }
}

impl Navigator for PendingNavigation {
    fn navigate(&self, to: Location, options: NavigateOptions) {
        *self.target.lock() = Some((to, options));
    }
}

/// Locale state of one request or render.
#[derive(Clone)]
pub struct PathLocaleContext {
    locale: LocaleKey,
    request_locale: Option<LocaleKey>,
    request_pathname: String,
    location: Location,
    navigator: Arc<dyn Navigator>,
}

impl PathLocaleContext {
    /// Build the context.
    ///
    /// `raw_segment` is the literal path token that resolved to
    /// `resolved_locale`, or `None` when the locale is a default rather than
    /// part of the URL.
    pub fn build(
        navigator: Arc<dyn Navigator>,
        raw_segment: Option<&str>,
        resolved_locale: LocaleKey,
        location: Location,
    ) -> Self {
        let raw_segment = raw_segment.filter(|s| !s.is_empty());

        let request_pathname = match raw_segment {
            Some(segment) => strip_prefix(&location.pathname, Some(segment)).into_owned(),
            None => location.pathname.clone(),
        };
        let request_locale = raw_segment.map(|_| resolved_locale.clone());

        Self {
            locale: resolved_locale,
            request_locale,
            request_pathname,
            location,
            navigator,
        }
    }

    /// The active locale, explicit or default.
    pub fn locale(&self) -> &LocaleKey {
        &self.locale
    }

    /// The locale carried by the URL, if it carried one.
    pub fn request_locale(&self) -> Option<&LocaleKey> {
        self.request_locale.as_ref()
    }

    /// Pathname without the locale prefix, search or hash.
    pub fn request_pathname(&self) -> &str {
        &self.request_pathname
    }

    /// The location the context was built from.
    pub fn location(&self) -> &Location {
        &self.location
    }

    /// Where switching to `next` leads; `None` drops the prefix.
    pub fn locale_target(&self, next: Option<&str>) -> Location {
        let pathname = apply_prefix(&self.request_pathname, next);
        self.location.with_pathname(pathname.into_owned())
    }

    /// Switch to another locale, keeping search and hash.
    ///
    /// Returns the navigation target, or `None` when the target pathname is
    /// the current one and no navigation was triggered. Pathnames that differ
    /// only by a trailing slash (`/fr` and `/fr/`) count as the same.
    pub fn change_locale(&self, next: Option<&str>) -> Option<Location> {
        let target = self.locale_target(next);

        if same_pathname(&target.pathname, &self.location.pathname) {
            debug!(
                target: TARGET,
                "Locale already active, skipping navigation";
                pathname = target.pathname
            );
            return None;
        }

        debug!(
            target: TARGET,
            "Changing locale";
            from = self.location.pathname,
            to = target.href()
        );
        self.navigator
            .navigate(target.clone(), NavigateOptions::preserve_scroll());
        Some(target)
    }
}

fn same_pathname(a: &str, b: &str) -> bool {
    a == b || a.strip_suffix('/') == Some(b) || b.strip_suffix('/') == Some(a)
}

impl fmt::Debug for PathLocaleContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PathLocaleContext")
            .field("locale", &self.locale)
            .field("request_locale", &self.request_locale)
            .field("request_pathname", &self.request_pathname)
            .field("location", &self.location)
            .finish_non_exhaustive()
    }
}
