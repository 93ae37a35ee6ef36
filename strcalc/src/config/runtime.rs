// RUNTIME PREFERENCES (User Experience)

use serde::{Deserialize, Serialize};
use std::env;

fn env_flag(name: &str, default: bool) -> bool {
    env::var(name)
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenizerPreferences {
    /// Whether to collect per-call tokenization metrics
    pub collect_detailed_metrics: bool,

    /// Whether to log which header form was detected
    pub log_header_detection: bool,

    /// Whether to log each delimiter substitution pass
    pub log_normalization_steps: bool,
}

impl Default for TokenizerPreferences {
    fn default() -> Self {
        Self {
            collect_detailed_metrics: env_flag("STRCALC_TOKENIZER_DETAILED_METRICS", true),
            log_header_detection: env_flag("STRCALC_TOKENIZER_LOG_HEADERS", false),
            log_normalization_steps: env_flag("STRCALC_TOKENIZER_LOG_NORMALIZATION", false),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CalculatorPreferences {
    /// Whether to log addends excluded by the value ceiling
    pub log_ignored_addends: bool,

    /// Whether to log observer notifications
    pub log_observer_notifications: bool,
}

impl Default for CalculatorPreferences {
    fn default() -> Self {
        Self {
            log_ignored_addends: env_flag("STRCALC_CALC_LOG_IGNORED_ADDENDS", true),
            log_observer_notifications: env_flag("STRCALC_CALC_LOG_NOTIFICATIONS", false),
        }
    }
}

/// Runtime log level selection (maps onto the event system's levels)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LogLevel {
    Error,
    Warning,
    Info,
    Debug,
}

impl LogLevel {
    pub fn to_events_log_level(self) -> crate::logging::events::LogLevel {
        match self {
            LogLevel::Error => crate::logging::events::LogLevel::Error,
            LogLevel::Warning => crate::logging::events::LogLevel::Warning,
            LogLevel::Info => crate::logging::events::LogLevel::Info,
            LogLevel::Debug => crate::logging::events::LogLevel::Debug,
        }
    }

    fn from_env(name: &str, default: Self) -> Self {
        match env::var(name).ok().as_deref() {
            Some("error") => LogLevel::Error,
            Some("warning") => LogLevel::Warning,
            Some("info") => LogLevel::Info,
            Some("debug") => LogLevel::Debug,
            _ => default,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Minimum level to emit
    pub min_log_level: LogLevel,

    /// Whether to emit JSON events instead of plain text
    pub use_structured_logging: bool,

    /// Whether to log to the console at all
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: LogLevel::from_env("STRCALC_LOG_LEVEL", LogLevel::Info),
            use_structured_logging: env_flag("STRCALC_STRUCTURED_LOGGING", false),
            enable_console_logging: env_flag("STRCALC_CONSOLE_LOGGING", true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenizer_preferences_default() {
        let preferences = TokenizerPreferences::default();
        assert!(preferences.collect_detailed_metrics);
    }

    #[test]
    fn test_calculator_preferences_default() {
        let preferences = CalculatorPreferences::default();
        assert!(preferences.log_ignored_addends);
    }

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(
            LogLevel::Debug.to_events_log_level(),
            crate::logging::events::LogLevel::Debug
        );
        assert_eq!(
            LogLevel::Error.to_events_log_level(),
            crate::logging::events::LogLevel::Error
        );
    }

    #[test]
    fn test_preferences_serializable() {
        let preferences = LoggingPreferences::default();
        let json = serde_json::to_string(&preferences).expect("serializable");
        let parsed: LoggingPreferences = serde_json::from_str(&json).expect("deserializable");
        assert_eq!(parsed.min_log_level, preferences.min_log_level);
    }
}
