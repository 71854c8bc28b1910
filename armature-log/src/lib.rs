//! Armature Logging
//!
//! Structured logging used across the Armature locale routing crates.
//!
//! Every macro takes an optional `target:` and trailing `; key = value`
//! fields. Lines go to stderr, either as one JSON object per line (the
//! default) or in a pretty single-line form. [`install`] routes the `log`
//! facade into the same sink.
//!
//! ```rust
//! use armature_log::{debug, info};
//!
//! info!("Locale router ready");
//!
//! let segment = "en-US";
//! debug!(target: "armature::i18n", "Resolving segment {}", segment; segment = segment);
//! debug!("Resolved"; locale = "en-us", excluded = false);
//! ```
//!
//! # Environment Variables
//!
//! - `ARMATURE_DEBUG=1` - Shorthand for `ARMATURE_LOG_LEVEL=debug`
//! - `ARMATURE_LOG_LEVEL=trace|debug|info|warn|error|off` - Set log level
//! - `ARMATURE_LOG_FORMAT=pretty|json` - Set output format
//! - `ARMATURE_LOG_COLOR=1|0` - Colour the level in pretty output (`color` feature)
//! - `ARMATURE_LOG_TIMESTAMPS=1|0` - Prefix pretty lines with a timestamp

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::BTreeMap;
use std::env;
use std::fmt;
use std::sync::atomic::{AtomicU8, Ordering};

/// Log level, ordered from most to least verbose.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
#[repr(u8)]
pub enum Level {
    Trace = 0,
    Debug = 1,
    Info = 2,
    Warn = 3,
    Error = 4,
    Off = 5,
}

impl Level {
    /// Parse a level name, ignoring case and surrounding whitespace.
    pub fn parse(s: &str) -> Option<Self> {
        let levels = [
            Level::Trace,
            Level::Debug,
            Level::Info,
            Level::Warn,
            Level::Error,
            Level::Off,
        ];
        let name = s.trim();
        levels
            .into_iter()
            .find(|level| level.as_str().eq_ignore_ascii_case(name))
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "TRACE",
            Level::Debug => "DEBUG",
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
            Level::Off => "OFF",
        }
    }

    fn to_filter(self) -> log::LevelFilter {
        match self {
            Level::Trace => log::LevelFilter::Trace,
            Level::Debug => log::LevelFilter::Debug,
            Level::Info => log::LevelFilter::Info,
            Level::Warn => log::LevelFilter::Warn,
            Level::Error => log::LevelFilter::Error,
            Level::Off => log::LevelFilter::Off,
        }
    }
}

impl From<log::Level> for Level {
    fn from(level: log::Level) -> Self {
        match level {
            log::Level::Trace => Level::Trace,
            log::Level::Debug => Level::Debug,
            log::Level::Info => Level::Info,
            log::Level::Warn => Level::Warn,
            log::Level::Error => Level::Error,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Output format for log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// `LEVEL [target] message key=value`
    Pretty,
    /// One JSON object per line
    Json,
}

// ============================================================================
// Configuration
// ============================================================================

static LOG_LEVEL: AtomicU8 = AtomicU8::new(Level::Info as u8);

static CONFIG: Lazy<LogConfig> = Lazy::new(|| {
    let config = LogConfig::from_env();
    LOG_LEVEL.store(config.level as u8, Ordering::SeqCst);
    config
});

/// Logging configuration, read once from the environment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    pub level: Level,
    pub format: Format,
    pub color: bool,
    pub timestamps: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: Level::Info,
            format: Format::Json,
            color: false,
            timestamps: true,
        }
    }
}

impl LogConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build the configuration from an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let defaults = Self::default();
        let debug = lookup("ARMATURE_DEBUG").is_some_and(|v| flag(&v));

        let level = lookup("ARMATURE_LOG_LEVEL")
            .and_then(|s| Level::parse(&s))
            .unwrap_or(if debug { Level::Debug } else { defaults.level });

        let format = match lookup("ARMATURE_LOG_FORMAT") {
            Some(name) if name.trim().eq_ignore_ascii_case("pretty") => Format::Pretty,
            _ => defaults.format,
        };

        Self {
            level,
            format,
            color: lookup("ARMATURE_LOG_COLOR").is_some_and(|v| flag(&v)),
            timestamps: lookup("ARMATURE_LOG_TIMESTAMPS").map_or(defaults.timestamps, |v| flag(&v)),
        }
    }
}

fn flag(value: &str) -> bool {
    value == "1" || value.eq_ignore_ascii_case("true")
}

/// Check if a log level is enabled. `Off` never is.
#[inline]
pub fn is_level_enabled(level: Level) -> bool {
    Lazy::force(&CONFIG);
    level != Level::Off && level as u8 >= LOG_LEVEL.load(Ordering::Relaxed)
}

pub fn current_level() -> Level {
    Lazy::force(&CONFIG);
    match LOG_LEVEL.load(Ordering::Relaxed) {
        0 => Level::Trace,
        1 => Level::Debug,
        2 => Level::Info,
        3 => Level::Warn,
        4 => Level::Error,
        _ => Level::Off,
    }
}

/// Change the level at runtime, for this sink and the `log` bridge.
pub fn set_level(level: Level) {
    Lazy::force(&CONFIG);
    LOG_LEVEL.store(level as u8, Ordering::SeqCst);
    log::set_max_level(level.to_filter());
}

pub fn config() -> &'static LogConfig {
    &CONFIG
}

// ============================================================================
// `log` facade bridge
// ============================================================================

struct Bridge;

impl log::Log for Bridge {
    fn enabled(&self, metadata: &log::Metadata<'_>) -> bool {
        is_level_enabled(metadata.level().into())
    }

    fn log(&self, record: &log::Record<'_>) {
        if self.enabled(record.metadata()) {
            log(
                record.level().into(),
                record.target(),
                &record.args().to_string(),
                &[],
            );
        }
    }

    fn flush(&self) {}
}

static BRIDGE: Bridge = Bridge;

/// Install the `log` facade bridge so `log::info!` and friends share this sink.
///
/// Fails if another global logger was installed first.
pub fn install() -> Result<(), log::SetLoggerError> {
    log::set_logger(&BRIDGE)?;
    log::set_max_level(current_level().to_filter());
    Ok(())
}

// ============================================================================
// Output
// ============================================================================

/// Structured key/value pairs attached to a log line.
pub type Fields<'a> = &'a [(&'static str, String)];

#[doc(hidden)]
pub fn log(level: Level, target: &str, message: &str, fields: Fields<'_>) {
    if is_level_enabled(level) {
        eprintln!("{}", render(config(), level, target, message, fields));
    }
}

/// Render a single log line without writing it.
pub fn render(
    config: &LogConfig,
    level: Level,
    target: &str,
    message: &str,
    fields: Fields<'_>,
) -> String {
    match config.format {
        Format::Pretty => render_pretty(config, level, target, message, fields),
        Format::Json => render_json(level, target, message, fields),
    }
}

fn render_pretty(
    config: &LogConfig,
    level: Level,
    target: &str,
    message: &str,
    fields: Fields<'_>,
) -> String {
    let mut line = String::new();

    if config.timestamps {
        line.push_str(&format!("{} ", chrono::Local::now().format("%H:%M:%S%.3f")));
    }

    line.push_str(&format!("{:5} ", level_label(config, level)));

    if !target.is_empty() {
        line.push_str(&format!("[{}] ", target));
    }

    line.push_str(message);
    for (key, value) in fields {
        line.push_str(&format!(" {}={}", key, value));
    }
    line
}

#[cfg(feature = "color")]
fn level_label(config: &LogConfig, level: Level) -> String {
    use colored::Colorize;

    if !config.color {
        return level.to_string();
    }
    match level {
        Level::Warn => level.as_str().yellow().to_string(),
        Level::Error => level.as_str().red().bold().to_string(),
        _ => level.as_str().dimmed().to_string(),
    }
}

#[cfg(not(feature = "color"))]
fn level_label(_config: &LogConfig, level: Level) -> String {
    level.to_string()
}

#[derive(Serialize)]
struct JsonLine<'a> {
    timestamp: String,
    level: &'a str,
    target: &'a str,
    message: &'a str,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    fields: BTreeMap<&'a str, &'a str>,
}

fn render_json(level: Level, target: &str, message: &str, fields: Fields<'_>) -> String {
    let line = JsonLine {
        timestamp: chrono::Utc::now().to_rfc3339(),
        level: level.as_str(),
        target,
        message,
        fields: fields.iter().map(|(k, v)| (*k, v.as_str())).collect(),
    };

    serde_json::to_string(&line).unwrap_or_else(|_| message.to_string())
}

// ============================================================================
// Macros
// ============================================================================

#[doc(hidden)]
#[macro_export]
macro_rules! __event {
    ($level:expr, $target:expr, $fmt:literal $(, $arg:expr)* ; $($key:ident = $value:expr),+ $(,)?) => {
        if $crate::is_level_enabled($level) {
            $crate::log(
                $level,
                $target,
                &format!($fmt $(, $arg)*),
                &[$((stringify!($key), ($value).to_string())),+],
            );
        }
    };
    ($level:expr, $target:expr, $($arg:tt)+) => {
        if $crate::is_level_enabled($level) {
            $crate::log($level, $target, &format!($($arg)+), &[]);
        }
    };
}

/// Log a trace message.
#[macro_export]
macro_rules! trace {
    (target: $target:expr, $($rest:tt)+) => {
        $crate::__event!($crate::Level::Trace, $target, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::__event!($crate::Level::Trace, module_path!(), $($rest)+)
    };
}

/// Log a debug message.
///
/// ```rust
/// use armature_log::debug;
///
/// let raw = "EN_us";
/// debug!("Normalizing {}", raw);
/// debug!(target: "armature::i18n::resolver", "Resolved"; segment = raw, locale = "en-us");
/// ```
#[macro_export]
macro_rules! debug {
    (target: $target:expr, $($rest:tt)+) => {
        $crate::__event!($crate::Level::Debug, $target, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::__event!($crate::Level::Debug, module_path!(), $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    (target: $target:expr, $($rest:tt)+) => {
        $crate::__event!($crate::Level::Info, $target, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::__event!($crate::Level::Info, module_path!(), $($rest)+)
    };
}

#[macro_export]
macro_rules! warn {
    (target: $target:expr, $($rest:tt)+) => {
        $crate::__event!($crate::Level::Warn, $target, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::__event!($crate::Level::Warn, module_path!(), $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    (target: $target:expr, $($rest:tt)+) => {
        $crate::__event!($crate::Level::Error, $target, $($rest)+)
    };
    ($($rest:tt)+) => {
        $crate::__event!($crate::Level::Error, module_path!(), $($rest)+)
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> LogConfig {
        let vars: HashMap<&str, &str> = vars.iter().copied().collect();
        LogConfig::from_lookup(|key| vars.get(key).map(|v| v.to_string()))
    }

    fn pretty() -> LogConfig {
        LogConfig {
            format: Format::Pretty,
            timestamps: false,
            ..LogConfig::default()
        }
    }

    #[test]
    fn test_level_parse() {
        assert_eq!(Level::parse(" debug "), Some(Level::Debug));
        assert_eq!(Level::parse("OFF"), Some(Level::Off));
        assert_eq!(Level::parse("verbose"), None);
        assert!(Level::Trace < Level::Error);
    }

    #[test]
    fn test_config_defaults() {
        assert_eq!(config(&[]), LogConfig::default());
    }

    #[test]
    fn test_debug_shorthand_yields_to_explicit_level() {
        assert_eq!(config(&[("ARMATURE_DEBUG", "true")]).level, Level::Debug);
        assert_eq!(
            config(&[("ARMATURE_DEBUG", "1"), ("ARMATURE_LOG_LEVEL", "warn")]).level,
            Level::Warn
        );
    }

    #[test]
    fn test_config_format_flags() {
        let config = config(&[
            ("ARMATURE_LOG_FORMAT", "Pretty"),
            ("ARMATURE_LOG_COLOR", "0"),
            ("ARMATURE_LOG_TIMESTAMPS", "false"),
        ]);
        assert_eq!(config.format, Format::Pretty);
        assert!(!config.color);
        assert!(!config.timestamps);
    }

    #[test]
    fn test_render_pretty_with_fields() {
        let fields = [("segment", "EN".to_string()), ("locale", "en".to_string())];
        let line = render(&pretty(), Level::Debug, "armature::i18n", "resolved", &fields);
        assert_eq!(line, "DEBUG [armature::i18n] resolved segment=EN locale=en");
    }

    #[test]
    fn test_render_pretty_without_target() {
        assert_eq!(render(&pretty(), Level::Warn, "", "careful", &[]), "WARN  careful");
    }

    #[test]
    fn test_render_json() {
        let fields = [("key", "a\"b".to_string())];
        let line = render(&LogConfig::default(), Level::Info, "t", "msg", &fields);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "INFO");
        assert_eq!(value["target"], "t");
        assert_eq!(value["fields"]["key"], "a\"b");

        let line = render(&LogConfig::default(), Level::Info, "t", "msg", &[]);
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert!(value.get("fields").is_none());
    }

    #[test]
    fn test_set_level() {
        let original = current_level();

        set_level(Level::Error);
        assert_eq!(current_level(), Level::Error);
        assert!(!is_level_enabled(Level::Warn));
        assert!(!is_level_enabled(Level::Off));

        set_level(original);
    }

    #[test]
    fn test_macros_expand() {
        let segment = "en";
        trace!("trace message");
        debug!("debug {}", segment);
        info!(target: "test", "with target");
        warn!("with fields"; segment = segment, hops = 2);
        error!(target: "test", "target and fields {}", 1; segment = segment);
    }
}
