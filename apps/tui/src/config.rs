//! Runtime configuration read from the environment.

use std::path::PathBuf;
use std::time::Duration;

use tuimarket_core::constants::DEFAULT_REFRESH_PERIOD_SECS;

pub const DEFAULT_TICK_MS: u64 = 1000;
const MIN_TICK_MS: u64 = 50;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Explicit symbols file; `None` searches the home directory.
    pub symbols_path: Option<PathBuf>,
    pub refresh_period: Duration,
    pub tick_rate: Duration,
    /// Directory for the log file; `None` disables logging.
    pub log_dir: Option<PathBuf>,
    pub log_format: LogFormat,
    /// Values that were rejected and replaced by defaults. Logged once
    /// tracing is up, since tracing itself depends on this config.
    pub warnings: Vec<String>,
}

impl AppConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut warnings = Vec::new();

        let symbols_path = lookup("TUIMARKET_SYMBOLS")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let refresh_secs = parse_u64(
            &lookup,
            "TUIMARKET_REFRESH_SECS",
            DEFAULT_REFRESH_PERIOD_SECS,
            1,
            &mut warnings,
        );
        let tick_ms = parse_u64(
            &lookup,
            "TUIMARKET_TICK_MS",
            DEFAULT_TICK_MS,
            MIN_TICK_MS,
            &mut warnings,
        );

        let log_dir = match lookup("TUIMARKET_LOG_DIR") {
            Some(dir) if dir.trim().is_empty() => None,
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::cache_dir().map(|d| d.join("tuimarket")),
        };

        let log_format = match lookup("TUIMARKET_LOG_FORMAT") {
            None => LogFormat::Text,
            Some(v) if v.eq_ignore_ascii_case("json") => LogFormat::Json,
            Some(v) if v.eq_ignore_ascii_case("text") => LogFormat::Text,
            Some(v) => {
                warnings.push(format!(
                    "TUIMARKET_LOG_FORMAT={:?} is not \"text\" or \"json\", using text",
                    v
                ));
                LogFormat::Text
            }
        };

        Self {
            symbols_path,
            refresh_period: Duration::from_secs(refresh_secs),
            tick_rate: Duration::from_millis(tick_ms),
            log_dir,
            log_format,
            warnings,
        }
    }
}

fn parse_u64(
    lookup: &impl Fn(&str) -> Option<String>,
    key: &str,
    default: u64,
    min: u64,
    warnings: &mut Vec<String>,
) -> u64 {
    let Some(raw) = lookup(key) else {
        return default;
    };
    match raw.trim().parse::<u64>() {
        Ok(value) if value >= min => value,
        _ => {
            warnings.push(format!(
                "{}={:?} is invalid (expected an integer >= {}), using {}",
                key, raw, min, default
            ));
            default
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> AppConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_from(&[]);
        assert!(config.symbols_path.is_none());
        assert_eq!(config.refresh_period, Duration::from_secs(5));
        assert_eq!(config.tick_rate, Duration::from_millis(1000));
        assert_eq!(config.log_format, LogFormat::Text);
        assert!(config.warnings.is_empty());
    }

    #[test]
    fn test_explicit_values() {
        let config = config_from(&[
            ("TUIMARKET_SYMBOLS", "/tmp/symbols"),
            ("TUIMARKET_REFRESH_SECS", "30"),
            ("TUIMARKET_TICK_MS", "250"),
            ("TUIMARKET_LOG_DIR", "/tmp/logs"),
            ("TUIMARKET_LOG_FORMAT", "JSON"),
        ]);
        assert_eq!(config.symbols_path, Some(PathBuf::from("/tmp/symbols")));
        assert_eq!(config.refresh_period, Duration::from_secs(30));
        assert_eq!(config.tick_rate, Duration::from_millis(250));
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/logs")));
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values_fall_back_with_warning() {
        let config = config_from(&[
            ("TUIMARKET_REFRESH_SECS", "0"),
            ("TUIMARKET_TICK_MS", "fast"),
            ("TUIMARKET_LOG_FORMAT", "xml"),
        ]);
        assert_eq!(config.refresh_period, Duration::from_secs(5));
        assert_eq!(config.tick_rate, Duration::from_millis(1000));
        assert_eq!(config.log_format, LogFormat::Text);
        assert_eq!(config.warnings.len(), 3);
        assert!(config.warnings[0].contains("TUIMARKET_REFRESH_SECS"));
    }

    #[test]
    fn test_empty_log_dir_disables_logging() {
        let config = config_from(&[("TUIMARKET_LOG_DIR", "")]);
        assert!(config.log_dir.is_none());
    }
}
