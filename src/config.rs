//! Session configuration.
//!
//! Every field has a default, so an empty JSON object (or no config at all)
//! yields the shipped timings.

use crate::error::ConfigError;
use crate::progress::DEFAULT_DIGITS_REQUIRED;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Largest accepted `dial_max_value`; one decimal digit per ring.
pub const MAX_DIAL_VALUE: i32 = 9;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionConfig {
    /// Length of each fade phase of a view transition. Consumed by
    /// [`TimedPresenter::from_config`](crate::transition::TimedPresenter::from_config).
    pub transition_duration_ms: u64,
    /// How long a wrong code stays flagged before the panel clears.
    pub code_flag_duration_ms: u64,
    /// Revealed-digit count at which the code is considered assembled.
    pub digits_required: usize,
    /// Highest value on a dial ring before it wraps to 0, at most
    /// [`MAX_DIAL_VALUE`].
    pub dial_max_value: i32,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            transition_duration_ms: 300,
            code_flag_duration_ms: 700,
            digits_required: DEFAULT_DIGITS_REQUIRED,
            dial_max_value: 9,
        }
    }
}

impl SessionConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SessionConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.digits_required == 0 {
            return Err(ConfigError::Invalid {
                field: "digits_required",
                reason: "must be at least 1".to_string(),
            });
        }
        if !(1..=MAX_DIAL_VALUE).contains(&self.dial_max_value) {
            return Err(ConfigError::Invalid {
                field: "dial_max_value",
                reason: format!(
                    "must be between 1 and {MAX_DIAL_VALUE}, got {}",
                    self.dial_max_value
                ),
            });
        }
        Ok(())
    }

    pub fn transition_duration(&self) -> Duration {
        Duration::from_millis(self.transition_duration_ms)
    }

    pub fn code_flag_duration(&self) -> Duration {
        Duration::from_millis(self.code_flag_duration_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = SessionConfig::from_json_str("{}").unwrap();
        assert_eq!(config, SessionConfig::default());
        assert_eq!(config.transition_duration(), Duration::from_millis(300));
    }

    #[test]
    fn partial_config_overrides_fields() {
        let config =
            SessionConfig::from_json_str(r#"{ "transition_duration_ms": 50, "dial_max_value": 5 }"#)
                .unwrap();

        assert_eq!(config.transition_duration_ms, 50);
        assert_eq!(config.dial_max_value, 5);
        assert_eq!(config.code_flag_duration_ms, 700);
    }

    #[test]
    fn zero_digits_required_is_rejected() {
        let err = SessionConfig::from_json_str(r#"{ "digits_required": 0 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "digits_required",
                ..
            }
        ));
    }

    #[test]
    fn dial_max_value_outside_range_is_rejected() {
        for json in [
            r#"{ "dial_max_value": 0 }"#,
            r#"{ "dial_max_value": 10 }"#,
            r#"{ "dial_max_value": 2147483647 }"#,
        ] {
            let err = SessionConfig::from_json_str(json).unwrap_err();
            assert!(matches!(
                err,
                ConfigError::Invalid {
                    field: "dial_max_value",
                    ..
                }
            ));
        }
        assert!(SessionConfig::from_json_str(r#"{ "dial_max_value": 9 }"#).is_ok());
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let err = SessionConfig::from_json_str("{ nope").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }
}
