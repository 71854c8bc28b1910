//! Integration tests for armature-i18n routing

use armature_config::LocaleConfig;
use armature_i18n::*;
use std::sync::Arc;

fn router() -> LocaleRouter {
    let config = LocaleConfig::new(["en", "fr", "en-us", "it"], "en")
        .exclude("api")
        .map_locale("fr-be", "fr");
    LocaleRouter::from_config(&config).unwrap()
}

fn localize(router: &LocaleRouter, href: &str) -> (PathLocaleContext, Arc<PendingNavigation>) {
    let pending = Arc::new(PendingNavigation::new());
    let ctx = router
        .route(Location::parse(href), None, pending.clone())
        .unwrap()
        .into_context()
        .unwrap();
    (ctx, pending)
}

// ============================================================================
// Root paths
// ============================================================================

#[test]
fn test_bare_locale_root() {
    let router = router();
    let (ctx, pending) = localize(&router, "/fr");

    assert_eq!(ctx.request_pathname(), "/");
    for spelling in ["fr", "FR", "Fr"] {
        assert_eq!(ctx.change_locale(Some(spelling)), None);
    }
    assert!(pending.take().is_none());

    let target = ctx.change_locale(Some("it")).unwrap();
    assert_eq!(target.pathname, "/it/");
}

#[test]
fn test_locale_root_with_trailing_slash() {
    let router = router();
    let (ctx, pending) = localize(&router, "/fr/?tab=1");

    assert_eq!(ctx.request_pathname(), "/");
    assert_eq!(ctx.change_locale(Some("FR")), None);
    assert!(pending.take().is_none());

    ctx.change_locale(None);
    assert_eq!(pending.target().unwrap().href(), "/?tab=1");
}

#[test]
fn test_mapped_root_switches_to_canonical_prefix() {
    let router = router();
    let (ctx, pending) = localize(&router, "/fr-BE");

    assert_eq!(ctx.locale().as_str(), "fr");
    let target = ctx.change_locale(Some("fr")).unwrap();
    assert_eq!(target.pathname, "/fr/");
    assert_eq!(pending.target(), Some(target));
}

// ============================================================================
// Separator and case variants
// ============================================================================

#[test]
fn test_separator_variant_of_active_locale() {
    let router = router();
    let (ctx, pending) = localize(&router, "/en-us/pricing#plans");

    assert_eq!(ctx.change_locale(Some("EN_us")), None);
    assert!(pending.take().is_none());

    let target = ctx.change_locale(Some("en")).unwrap();
    assert_eq!(target.href(), "/en/pricing#plans");
}

#[test]
fn test_unprefixed_root_to_default_locale() {
    let router = router();
    let (ctx, pending) = localize(&router, "/");

    assert!(ctx.request_locale().is_none());
    assert_eq!(ctx.change_locale(None), None);

    ctx.change_locale(Some("en"));
    assert_eq!(pending.target().unwrap().pathname, "/en/");
}

// ============================================================================
// Redirects and exclusions
// ============================================================================

#[test]
fn test_redirect_at_root() {
    let router = router();
    assert_eq!(router.redirect("/", Some("IT")).unwrap(), "/it/");
    assert_eq!(router.redirect("/?q=1", None).unwrap(), "/?q=1");
}

#[test]
fn test_excluded_prefix_is_case_sensitive() {
    let router = router();
    assert_eq!(router.resolve(Some("api")).unwrap(), Resolution::Excluded);
    assert_eq!(router.resolve(Some("API")).unwrap(), Resolution::Unresolved);
}
