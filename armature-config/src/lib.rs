// Locale routing configuration for the Armature framework

pub mod env;
pub mod error;
pub mod loader;
pub mod validation;

pub use env::EnvLoader;
pub use error::{ConfigError, Result};
pub use loader::{ConfigLoader, FileFormat};
pub use validation::{ConfigValidator, Validate};

use armature_log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::path::Path;

/// Name of the dynamic route segment carrying the locale when none is configured.
pub const DEFAULT_PARAM_NAME: &str = "locale";

fn default_param_name() -> String {
    DEFAULT_PARAM_NAME.to_string()
}

/// Static locale routing configuration, built once at startup.
///
/// Values are kept as written; normalization into locale keys happens when
/// the router is built from this object.
///
/// ```toml
/// locales = ["en", "fr", "en-us"]
/// default_locale = "en"
/// exclude = ["api", "assets"]
/// locale_param_name = "lang"
///
/// [locale_mapping]
/// "en-gb" = "en"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LocaleConfig {
    /// Supported locales.
    pub locales: Vec<String>,

    /// Locale applied when the path carries none. Must be one of `locales`.
    #[serde(alias = "defaultLocale")]
    pub default_locale: String,

    /// Raw path segments that are never locales (API namespaces, assets).
    #[serde(default)]
    pub exclude: Vec<String>,

    /// Substitutions for unsupported locales.
    #[serde(default, alias = "localeMapping")]
    pub locale_mapping: BTreeMap<String, String>,

    /// Route parameter name under which routers capture the locale segment.
    #[serde(default = "default_param_name", alias = "localeParamName")]
    pub locale_param_name: String,
}

impl LocaleConfig {
    /// Create a configuration with the given locales and default.
    pub fn new<I, S>(locales: I, default_locale: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            locales: locales.into_iter().map(Into::into).collect(),
            default_locale: default_locale.into(),
            exclude: Vec::new(),
            locale_mapping: BTreeMap::new(),
            locale_param_name: default_param_name(),
        }
    }

    /// Add an excluded path prefix.
    pub fn exclude(mut self, prefix: impl Into<String>) -> Self {
        self.exclude.push(prefix.into());
        self
    }

    /// Add a fallback mapping entry.
    pub fn map_locale(mut self, from: impl Into<String>, to: impl Into<String>) -> Self {
        self.locale_mapping.insert(from.into(), to.into());
        self
    }

    /// Set the route parameter name.
    pub fn param_name(mut self, name: impl Into<String>) -> Self {
        self.locale_param_name = name.into();
        self
    }

    /// Parse a configuration from a string in the given format.
    pub fn from_str_with(content: &str, format: FileFormat) -> Result<Self> {
        ConfigLoader::new(format).parse_as(content)
    }

    /// Load a configuration file, picking the format from its extension.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let loader = ConfigLoader::auto(path)?;
        let value = loader.load_file(path)?;
        let config: Self =
            serde_json::from_value(value).map_err(|e| ConfigError::ParseError(e.to_string()))?;

        debug!("Loaded locale configuration"; path = path.display(), locales = config.locales.len());
        Ok(config)
    }

    /// Apply overrides collected by [`EnvLoader::collect`] or [`EnvLoader::load`].
    ///
    /// Lists replace the file values; mapping entries are merged over them.
    pub fn apply_overrides(&mut self, vars: &HashMap<String, String>) -> Result<()> {
        if let Some(locales) = vars.get("locales") {
            self.locales = env::parse_list(locales);
        }
        if let Some(default_locale) = vars.get("default_locale") {
            self.default_locale = default_locale.trim().to_string();
        }
        if let Some(exclude) = vars.get("exclude") {
            self.exclude = env::parse_list(exclude);
        }
        if let Some(mapping) = vars.get("locale_mapping") {
            for (from, to) in env::parse_pairs(mapping)? {
                self.locale_mapping.insert(from, to);
            }
        }
        if let Some(name) = vars.get("locale_param_name") {
            self.locale_param_name = name.trim().to_string();
        }
        Ok(())
    }

    /// Load the full configuration: `.env`, then the file, then `ARMATURE_I18N_*`
    /// overrides, then validation.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        dotenvy::dotenv().ok();

        let mut config = Self::from_file(path)?;
        let vars = EnvLoader::default().load();
        config.apply_overrides(&vars)?;
        config.validate()?;

        info!(
            "Locale configuration ready";
            default_locale = config.default_locale,
            locales = config.locales.join(","),
            excluded = config.exclude.len()
        );
        Ok(config)
    }
}

impl Validate for LocaleConfig {
    fn validate(&self) -> Result<()> {
        ConfigValidator::non_empty_list(&self.locales, "locales")?;
        ConfigValidator::no_blank_entries(self.locales.iter().map(String::as_str), "locales")?;
        ConfigValidator::not_empty(&self.default_locale, "default_locale")?;
        ConfigValidator::no_blank_entries(self.exclude.iter().map(String::as_str), "exclude")?;
        for prefix in &self.exclude {
            ConfigValidator::is_segment(prefix, "exclude")?;
        }
        ConfigValidator::no_blank_entries(
            self.locale_mapping
                .iter()
                .flat_map(|(from, to)| [from.as_str(), to.as_str()]),
            "locale_mapping",
        )?;
        ConfigValidator::not_empty(&self.locale_param_name, "locale_param_name")?;
        ConfigValidator::is_segment(&self.locale_param_name, "locale_param_name")?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn sample() -> LocaleConfig {
        LocaleConfig::new(["en", "fr", "en-us"], "en")
            .exclude("api")
            .map_locale("en-gb", "en")
    }

    #[test]
    fn test_builder() {
        let config = sample();
        assert_eq!(config.locales, vec!["en", "fr", "en-us"]);
        assert_eq!(config.exclude, vec!["api"]);
        assert_eq!(config.locale_mapping["en-gb"], "en");
        assert_eq!(config.locale_param_name, "locale");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_defaults_when_parsing() {
        let config = LocaleConfig::from_str_with(
            r#"{"locales": ["en"], "default_locale": "en"}"#,
            FileFormat::Json,
        )
        .unwrap();
        assert!(config.exclude.is_empty());
        assert!(config.locale_mapping.is_empty());
        assert_eq!(config.locale_param_name, DEFAULT_PARAM_NAME);
    }

    #[test]
    fn test_camel_case_aliases() {
        let config = LocaleConfig::from_str_with(
            r#"{
                "locales": ["en", "fr"],
                "defaultLocale": "fr",
                "localeMapping": {"a": "b"},
                "localeParamName": "lang"
            }"#,
            FileFormat::Json,
        )
        .unwrap();
        assert_eq!(config.default_locale, "fr");
        assert_eq!(config.locale_mapping["a"], "b");
        assert_eq!(config.locale_param_name, "lang");
    }

    #[test]
    fn test_from_toml_file() {
        let mut file = tempfile::Builder::new().suffix(".toml").tempfile().unwrap();
        writeln!(
            file,
            r#"
locales = ["en", "fr"]
default_locale = "en"
exclude = ["api"]

[locale_mapping]
"en-gb" = "en"
"#
        )
        .unwrap();

        let config = LocaleConfig::from_file(file.path()).unwrap();
        assert_eq!(config.locales, vec!["en", "fr"]);
        assert_eq!(config.exclude, vec!["api"]);
        assert_eq!(config.locale_mapping["en-gb"], "en");
    }

    #[test]
    fn test_missing_required_field() {
        let result = LocaleConfig::from_str_with(r#"{"locales": ["en"]}"#, FileFormat::Json);
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_apply_overrides() {
        let mut config = sample();
        let vars = EnvLoader::default().collect(vec![
            ("ARMATURE_I18N_LOCALES".to_string(), "en, de".to_string()),
            ("ARMATURE_I18N_DEFAULT_LOCALE".to_string(), "de".to_string()),
            ("ARMATURE_I18N_LOCALE_MAPPING".to_string(), "at=de".to_string()),
            ("ARMATURE_I18N_LOCALE_PARAM_NAME".to_string(), "lang".to_string()),
        ]);

        config.apply_overrides(&vars).unwrap();

        assert_eq!(config.locales, vec!["en", "de"]);
        assert_eq!(config.default_locale, "de");
        assert_eq!(config.exclude, vec!["api"]);
        assert_eq!(config.locale_mapping.len(), 2);
        assert_eq!(config.locale_mapping["at"], "de");
        assert_eq!(config.locale_param_name, "lang");
    }

    #[test]
    fn test_bad_mapping_override() {
        let mut config = sample();
        let mut vars = HashMap::new();
        vars.insert("locale_mapping".to_string(), "broken".to_string());
        assert!(matches!(
            config.apply_overrides(&vars),
            Err(ConfigError::ParseError(_))
        ));
    }

    #[test]
    fn test_validation_failures() {
        let empty = LocaleConfig::new(Vec::<String>::new(), "en");
        assert!(empty.validate().is_err());

        let no_default = LocaleConfig::new(["en"], "");
        assert!(no_default.validate().is_err());

        let blank_exclude = LocaleConfig::new(["en"], "en").exclude("");
        assert!(blank_exclude.validate().is_err());

        let nested_exclude = LocaleConfig::new(["en"], "en").exclude("api/v1");
        assert!(nested_exclude.validate().is_err());

        let blank_mapping = LocaleConfig::new(["en"], "en").map_locale("fr", " ");
        assert!(blank_mapping.validate().is_err());

        let bad_param = LocaleConfig::new(["en"], "en").param_name("");
        assert!(bad_param.validate().is_err());
    }
}
