//! Logging infrastructure for Tether.
//!
//! Structured logging is controlled by the `TETHER_DEBUG` environment variable.
//!
//! # Environment Variables
//!
//! - `TETHER_DEBUG=true|1|yes` - Enable debug logging
//! - `TETHER_LOG_LEVEL=debug|info|warn|error|trace` - Set specific log level
//! - `TETHER_LOG_FORMAT=json|pretty|compact` - Set output format (default: json)
//!
//! # Usage
//!
//! ```rust,no_run
//! use tether_query::logging;
//!
//! // Initialize logging (call once at startup)
//! logging::init();
//! ```
//!
//! Within Tether, use the standard tracing macros:
//!
//! ```rust,ignore
//! tracing::debug!(collection = %name, field = %field, "Fetched relation records");
//! ```

use std::env;
use std::sync::Once;

use tether_schema::DebugConfig;

static INIT: Once = Once::new();

/// Check if debug logging is enabled via `TETHER_DEBUG`.
#[inline]
pub fn is_debug_enabled() -> bool {
    parse_debug_flag(env::var("TETHER_DEBUG").ok().as_deref())
}

/// Get the configured log level from `TETHER_LOG_LEVEL`.
///
/// Defaults to "debug" if `TETHER_DEBUG` is enabled, otherwise "warn".
pub fn get_log_level() -> &'static str {
    parse_log_level(
        env::var("TETHER_LOG_LEVEL").ok().as_deref(),
        is_debug_enabled(),
    )
}

/// Get the configured log format from `TETHER_LOG_FORMAT`.
pub fn get_log_format() -> &'static str {
    parse_log_format(env::var("TETHER_LOG_FORMAT").ok().as_deref())
}

/// Whether expansion levels should be logged, from config or environment.
pub fn log_expansions(config: &DebugConfig) -> bool {
    config.log_expansions || is_debug_enabled()
}

fn parse_debug_flag(value: Option<&str>) -> bool {
    value.is_some_and(|v| matches!(v.to_lowercase().as_str(), "true" | "1" | "yes"))
}

fn parse_log_level(value: Option<&str>, debug: bool) -> &'static str {
    let fallback = if debug { "debug" } else { "warn" };
    match value.map(str::to_lowercase).as_deref() {
        Some("trace") => "trace",
        Some("debug") => "debug",
        Some("info") => "info",
        Some("warn") => "warn",
        Some("error") => "error",
        _ => fallback,
    }
}

fn parse_log_format(value: Option<&str>) -> &'static str {
    match value.map(str::to_lowercase).as_deref() {
        Some("pretty") => "pretty",
        Some("compact") => "compact",
        _ => "json",
    }
}

/// Initialize the Tether logging system.
///
/// Subsequent calls are no-ops. Nothing is installed unless `TETHER_DEBUG`
/// or `TETHER_LOG_LEVEL` is set, or when the `tracing-subscriber` feature
/// is disabled.
pub fn init() {
    INIT.call_once(|| {
        if !is_debug_enabled() && env::var("TETHER_LOG_LEVEL").is_err() {
            return;
        }

        #[cfg(feature = "tracing-subscriber")]
        {
            use tracing_subscriber::{EnvFilter, fmt, prelude::*};

            let level = get_log_level();
            let filter = EnvFilter::try_new(format!(
                "tether={level},tether_query={level},tether_schema={level}"
            ))
            .unwrap_or_else(|_| EnvFilter::new("warn"));

            let registry = tracing_subscriber::registry().with(filter);
            let installed = match get_log_format() {
                "json" => registry.with(fmt::layer().json()).try_init(),
                "compact" => registry.with(fmt::layer().compact()).try_init(),
                _ => registry.with(fmt::layer().pretty()).try_init(),
            };

            if installed.is_ok() {
                tracing::info!(
                    level = level,
                    format = get_log_format(),
                    "Tether logging initialized"
                );
            }
        }
    });
}

/// Macro for conditional debug logging.
///
/// Only logs if `TETHER_DEBUG` is enabled at runtime.
#[macro_export]
macro_rules! tether_debug {
    ($($arg:tt)*) => {
        if $crate::logging::is_debug_enabled() {
            tracing::debug!($($arg)*);
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_flag() {
        assert!(parse_debug_flag(Some("true")));
        assert!(parse_debug_flag(Some("YES")));
        assert!(parse_debug_flag(Some("1")));
        assert!(!parse_debug_flag(Some("0")));
        assert!(!parse_debug_flag(None));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(parse_log_level(None, false), "warn");
        assert_eq!(parse_log_level(None, true), "debug");
        assert_eq!(parse_log_level(Some("TRACE"), false), "trace");
        assert_eq!(parse_log_level(Some("verbose"), false), "warn");
        assert_eq!(parse_log_level(Some("error"), true), "error");
    }

    #[test]
    fn test_log_format() {
        assert_eq!(parse_log_format(None), "json");
        assert_eq!(parse_log_format(Some("Pretty")), "pretty");
        assert_eq!(parse_log_format(Some("compact")), "compact");
        assert_eq!(parse_log_format(Some("xml")), "json");
    }

    #[test]
    fn test_config_enables_expansion_logging() {
        assert!(log_expansions(&DebugConfig {
            log_expansions: true
        }));
    }
}
