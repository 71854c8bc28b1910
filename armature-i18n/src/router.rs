//! Locale Router
//!
//! Ties the resolver, the rewriter and the context builder to a
//! [`LocaleConfig`]. Built once at startup and shared read-only.

use crate::catalog::{CatalogLoader, MessageCatalog};
use crate::context::{Navigator, PathLocaleContext};
use crate::key::{LocaleKey, SupportedLocales, normalize};
use crate::mapping::FallbackMapping;
use crate::negotiate::negotiate_locale;
use crate::resolver::{LocaleResolver, Resolution};
use crate::rewrite::{Location, localized_redirect};
use crate::{I18nError, Result};
use armature_config::{LocaleConfig, Validate};
use armature_log::{debug, info, trace};
use std::collections::HashMap;
use std::sync::Arc;

const TARGET: &str = "armature::i18n::router";

/// What to do with an incoming location.
#[derive(Debug, Clone)]
pub enum RouteDecision {
    /// The path belongs to an excluded prefix; route it untouched.
    Bypass,
    /// The path is localized; render with this context.
    Localized(PathLocaleContext),
}

impl RouteDecision {
    pub fn context(&self) -> Option<&PathLocaleContext> {
        match self {
            RouteDecision::Localized(ctx) => Some(ctx),
            RouteDecision::Bypass => None,
        }
    }

    pub fn into_context(self) -> Option<PathLocaleContext> {
        match self {
            RouteDecision::Localized(ctx) => Some(ctx),
            RouteDecision::Bypass => None,
        }
    }

    pub fn is_bypass(&self) -> bool {
        matches!(self, RouteDecision::Bypass)
    }
}

/// Locale routing for one application.
#[derive(Debug, Clone)]
pub struct LocaleRouter {
    resolver: LocaleResolver,
    default_locale: LocaleKey,
    param_name: String,
}

impl LocaleRouter {
    /// Build the router from configuration.
    ///
    /// Fails when the configuration is invalid, when the default locale is
    /// not supported, or when the fallback mapping contains a cycle.
    ///
    /// # Example
    ///
    /// ```
    /// use armature_config::LocaleConfig;
    /// use armature_i18n::{LocaleRouter, Location, PendingNavigation};
    /// use std::sync::Arc;
    ///
    /// let config = LocaleConfig::new(["en", "fr"], "en").exclude("api");
    /// let router = LocaleRouter::from_config(&config).unwrap();
    ///
    /// let navigator = Arc::new(PendingNavigation::new());
    /// let decision = router
    ///     .route(Location::parse("/fr/about"), None, navigator)
    ///     .unwrap();
    /// let ctx = decision.context().unwrap();
    /// assert_eq!(ctx.locale().as_str(), "fr");
    /// assert_eq!(ctx.request_pathname(), "/about");
    /// ```
    pub fn from_config(config: &LocaleConfig) -> Result<Self> {
        config.validate()?;

        let supported: SupportedLocales = config.locales.iter().collect();
        let default_locale = normalize(&config.default_locale);
        if !supported.contains(default_locale.as_str()) {
            return Err(I18nError::InvalidConfig(format!(
                "default locale '{}' is not one of the supported locales",
                config.default_locale
            )));
        }

        let mapping = FallbackMapping::with_derived(&config.locale_mapping, &supported);
        let resolver = LocaleResolver::new(supported, config.exclude.iter().cloned(), mapping);

        // Surface mapping cycles now rather than on the first unlucky request.
        let sources: Vec<LocaleKey> = resolver.mapping().sources().cloned().collect();
        for source in &sources {
            resolver.resolve(Some(source.as_str()))?;
        }

        info!(
            target: TARGET,
            "Locale router ready";
            locales = resolver.supported().len(),
            default = default_locale,
            mappings = resolver.mapping().len(),
            excluded = resolver.excluded().len()
        );

        Ok(Self {
            resolver,
            default_locale,
            param_name: config.locale_param_name.clone(),
        })
    }

    pub fn resolver(&self) -> &LocaleResolver {
        &self.resolver
    }

    pub fn supported(&self) -> &SupportedLocales {
        self.resolver.supported()
    }

    pub fn default_locale(&self) -> &LocaleKey {
        &self.default_locale
    }

    /// Route parameter name carrying the locale segment.
    pub fn param_name(&self) -> &str {
        &self.param_name
    }

    /// Raw first segment of a pathname, if non-empty.
    ///
    /// ```
    /// use armature_i18n::LocaleRouter;
    ///
    /// assert_eq!(LocaleRouter::first_segment("/EN_us/about"), Some("EN_us"));
    /// assert_eq!(LocaleRouter::first_segment("/"), None);
    /// assert_eq!(LocaleRouter::first_segment("//about"), None);
    /// ```
    pub fn first_segment(pathname: &str) -> Option<&str> {
        pathname
            .strip_prefix('/')
            .and_then(|rest| rest.split('/').next())
            .filter(|segment| !segment.is_empty())
    }

    /// Resolve a raw segment.
    pub fn resolve(&self, raw: Option<&str>) -> Result<Resolution> {
        self.resolver.resolve(raw)
    }

    /// Default locale for a request without one in the path.
    ///
    /// The Accept-Language header wins when it matches a supported locale.
    pub fn negotiate_default(&self, accept_language: Option<&str>) -> LocaleKey {
        accept_language
            .and_then(|header| negotiate_locale(header, self.resolver.supported()))
            .unwrap_or_else(|| self.default_locale.clone())
    }

    /// Decide how to render `location`.
    pub fn route(
        &self,
        location: Location,
        accept_language: Option<&str>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<RouteDecision> {
        let segment = Self::first_segment(&location.pathname).map(str::to_string);
        self.decide(segment.as_deref(), location, accept_language, navigator)
    }

    /// Build the context from route parameters captured by a router.
    ///
    /// The segment is read from the parameter named by `locale_param_name`.
    pub fn context_from_params(
        &self,
        params: &HashMap<String, String>,
        location: Location,
        navigator: Arc<dyn Navigator>,
        accept_language: Option<&str>,
    ) -> Result<RouteDecision> {
        let segment = params.get(&self.param_name).map(String::as_str);
        self.decide(segment, location, accept_language, navigator)
    }

    fn decide(
        &self,
        segment: Option<&str>,
        location: Location,
        accept_language: Option<&str>,
        navigator: Arc<dyn Navigator>,
    ) -> Result<RouteDecision> {
        match self.resolver.resolve(segment)? {
            Resolution::Excluded => {
                trace!(target: TARGET, "Bypassing excluded route"; pathname = location.pathname);
                Ok(RouteDecision::Bypass)
            }
            Resolution::Locale(locale) => Ok(RouteDecision::Localized(PathLocaleContext::build(
                navigator, segment, locale, location,
            ))),
            Resolution::Unresolved => {
                let locale = self.negotiate_default(accept_language);
                debug!(
                    target: TARGET,
                    "No locale in path, using default";
                    pathname = location.pathname,
                    locale = locale
                );
                Ok(RouteDecision::Localized(PathLocaleContext::build(
                    navigator, None, locale, location,
                )))
            }
        }
    }

    /// Locale-prefixed redirect target for `to`.
    pub fn redirect(&self, to: &str, locale: Option<&str>) -> Result<String> {
        localized_redirect(to, locale)
    }

    /// Load the catalog of an explicitly requested locale.
    ///
    /// Unsupported locales fail with [`I18nError::LocaleNotFound`]; the
    /// default locale is never substituted here.
    pub async fn load_catalog<L>(&self, loader: &L, requested: &str) -> Result<MessageCatalog>
    where
        L: CatalogLoader + ?Sized,
    {
        let key = normalize(requested);
        if !self.resolver.supported().contains(key.as_str()) {
            return Err(I18nError::LocaleNotFound(requested.to_string()));
        }
        loader.load(&key).await
    }
}
