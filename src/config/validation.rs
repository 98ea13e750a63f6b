//! Configuration validation.
//!
//! Range and format checks applied after loading.

use super::Config;
use crate::error::ConfigError;

/// Minimum allowed timeout in milliseconds (1 second).
pub const MIN_TIMEOUT_MS: u64 = 1000;

/// Maximum allowed timeout in milliseconds (5 minutes).
pub const MAX_TIMEOUT_MS: u64 = 300_000;

/// Validate configuration values.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidValue`] if:
/// - `ADVISOR_API_URL` is not an `http://` or `https://` URL
/// - `REQUEST_TIMEOUT_MS` is outside 1000..=300000
pub fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if !(config.api_url.starts_with("http://") || config.api_url.starts_with("https://")) {
        return Err(ConfigError::InvalidValue {
            var: "ADVISOR_API_URL".into(),
            reason: "must start with http:// or https://".into(),
        });
    }

    if config.request_timeout_ms < MIN_TIMEOUT_MS || config.request_timeout_ms > MAX_TIMEOUT_MS {
        return Err(ConfigError::InvalidValue {
            var: "REQUEST_TIMEOUT_MS".into(),
            reason: format!("must be between {MIN_TIMEOUT_MS} and {MAX_TIMEOUT_MS} ms"),
        });
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_config() {
        assert!(validate_config(&Config::default()).is_ok());
    }

    #[test]
    fn test_https_url_accepted() {
        let config = Config {
            api_url: "https://advisor.example.com/api".to_string(),
            ..Config::default()
        };
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_empty_url_rejected() {
        let config = Config {
            api_url: String::new(),
            ..Config::default()
        };
        let err = validate_config(&config).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { var, .. } if var == "ADVISOR_API_URL"));
    }

    #[test]
    fn test_timeout_bounds() {
        let at_min = Config {
            request_timeout_ms: MIN_TIMEOUT_MS,
            ..Config::default()
        };
        let at_max = Config {
            request_timeout_ms: MAX_TIMEOUT_MS,
            ..Config::default()
        };
        let below = Config {
            request_timeout_ms: MIN_TIMEOUT_MS - 1,
            ..Config::default()
        };
        let above = Config {
            request_timeout_ms: MAX_TIMEOUT_MS + 1,
            ..Config::default()
        };

        assert!(validate_config(&at_min).is_ok());
        assert!(validate_config(&at_max).is_ok());
        assert!(validate_config(&below).is_err());
        assert!(validate_config(&above).is_err());
    }
}
