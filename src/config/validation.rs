use super::Config;
use crate::error::{Result, SubstituteError};
use tracing::warn;
use url::Url;

/// Validation errors for configuration.
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub path: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.path, self.message)
    }
}

/// Validate a configuration object.
pub fn validate_config(config: &Config) -> Vec<ConfigValidationError> {
    let mut errors = Vec::new();

    // Validate endpoint
    match Url::parse(&config.endpoint) {
        Ok(url) if url.scheme() == "http" || url.scheme() == "https" => {
            if url.query().is_some() {
                errors.push(ConfigValidationError {
                    path: "endpoint".to_string(),
                    message: "Endpoint must not carry a query string".to_string(),
                });
            }
        }
        Ok(url) => errors.push(ConfigValidationError {
            path: "endpoint".to_string(),
            message: format!("Unsupported scheme '{}', expected http or https", url.scheme()),
        }),
        Err(e) => errors.push(ConfigValidationError {
            path: "endpoint".to_string(),
            message: format!("Invalid URL: {e}"),
        }),
    }

    // Project and config select one Doppler config together
    match (&config.project, &config.config) {
        (Some(_), None) => errors.push(ConfigValidationError {
            path: "config".to_string(),
            message: "A project was given without a config".to_string(),
        }),
        (None, Some(_)) => errors.push(ConfigValidationError {
            path: "project".to_string(),
            message: "A config was given without a project".to_string(),
        }),
        _ => {}
    }

    if config.timeout_secs == 0 {
        errors.push(ConfigValidationError {
            path: "timeoutSecs".to_string(),
            message: "Timeout must be greater than 0".to_string(),
        });
    }

    if config.auth_token.is_none() {
        warn!("No auth token configured; the secrets endpoint will likely reject the request");
    }

    errors
}

/// Validate configuration and return Result.
pub fn validate_config_object(config: &Config) -> Result<()> {
    let errors = validate_config(config);
    if errors.is_empty() {
        Ok(())
    } else {
        let messages: Vec<String> = errors.iter().map(|e| e.to_string()).collect();
        Err(SubstituteError::Config(format!(
            "validation failed:\n{}",
            messages.join("\n")
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(validate_config(&Config::default()).is_empty());
    }

    #[test]
    fn project_without_config_is_rejected() {
        let config = Config {
            project: Some("testing".into()),
            ..Config::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].path, "config");
    }

    #[test]
    fn non_http_endpoint_is_rejected() {
        let config = Config {
            endpoint: "ftp://api.doppler.com".into(),
            ..Config::default()
        };
        let errors = validate_config(&config);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].message.contains("ftp"));
    }

    #[test]
    fn zero_timeout_is_rejected() {
        let config = Config {
            timeout_secs: 0,
            ..Config::default()
        };
        let err = validate_config_object(&config).unwrap_err();
        assert!(err.to_string().contains("timeoutSecs"));
    }

    #[test]
    fn errors_are_collected_together() {
        let config = Config {
            endpoint: "nope".into(),
            config: Some("dev".into()),
            timeout_secs: 0,
            ..Config::default()
        };
        assert_eq!(validate_config(&config).len(), 3);
    }
}
