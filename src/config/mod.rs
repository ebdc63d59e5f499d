mod defaults;
mod validation;

pub use defaults::*;
pub use validation::*;

use crate::error::{Result, SubstituteError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Settings for the secrets download.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
    #[serde(default)]
    pub project: Option<String>,
    #[serde(default)]
    pub config: Option<String>,
    #[serde(default, skip_serializing)]
    pub auth_token: Option<String>,
    #[serde(default)]
    pub include_dynamic_secrets: bool,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

/// Values given on the command line or through `DOPPLER_*` environment
/// variables; each `Some` wins over the config file.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub endpoint: Option<String>,
    pub project: Option<String>,
    pub config: Option<String>,
    pub auth_token: Option<String>,
    pub include_dynamic_secrets: Option<bool>,
    pub timeout_secs: Option<u64>,
}

impl Config {
    /// Load configuration from file and defaults. Environment variables
    /// reach the config through the command-line layer.
    ///
    /// An explicit `path` must exist; otherwise the standard locations are
    /// searched and defaults are used when nothing is found.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config_path = match path {
            Some(p) if !p.exists() => {
                return Err(SubstituteError::Config(format!(
                    "config file '{}' does not exist",
                    p.display()
                )));
            }
            Some(p) => Some(p.to_path_buf()),
            None => find_config_file(),
        };

        let config = match config_path {
            Some(p) => {
                info!("Loading config from {}", p.display());
                load_config_file(&p)?
            }
            None => {
                debug!("No config file found, using defaults");
                Config::default()
            }
        };

        Ok(config)
    }

    /// Apply command-line (and `DOPPLER_*` environment) overrides.
    pub fn apply_overrides(&mut self, overrides: &ConfigOverrides) {
        if let Some(endpoint) = &overrides.endpoint {
            self.endpoint = endpoint.clone();
        }
        if let Some(project) = &overrides.project {
            self.project = Some(project.clone());
        }
        if let Some(cfg) = &overrides.config {
            self.config = Some(cfg.clone());
        }
        if let Some(token) = &overrides.auth_token {
            self.auth_token = Some(token.clone());
        }
        if let Some(dynamic) = overrides.include_dynamic_secrets {
            self.include_dynamic_secrets = dynamic;
        }
        if let Some(timeout) = overrides.timeout_secs {
            self.timeout_secs = timeout;
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            project: None,
            config: None,
            auth_token: None,
            include_dynamic_secrets: false,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

/// Find the configuration file in standard locations.
fn find_config_file() -> Option<PathBuf> {
    for name in CONFIG_FILE_CANDIDATES {
        let path = PathBuf::from(name);
        if path.exists() {
            return Some(path);
        }
    }

    // Check home directory
    if let Some(home) = dirs::home_dir() {
        let home_config = home.join(".doppler-substitute").join("config.json");
        if home_config.exists() {
            return Some(home_config);
        }
    }

    None
}

/// Load configuration from a file path.
fn load_config_file(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        SubstituteError::Config(format!("cannot read config file '{}': {e}", path.display()))
    })?;

    let extension = path.extension().and_then(|e| e.to_str());
    let parsed: std::result::Result<Config, String> = match extension {
        Some("yaml") | Some("yml") => serde_yaml::from_str(&content).map_err(|e| e.to_string()),
        Some("toml") => toml::from_str(&content).map_err(|e| e.to_string()),
        _ => {
            // Try JSON5 first, then regular JSON
            json5::from_str(&content).or_else(|_| {
                serde_json::from_str(&content).map_err(|e| e.to_string())
            })
        }
    };

    parsed.map_err(|e| {
        SubstituteError::Config(format!("invalid config file '{}': {e}", path.display()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_point_at_doppler() {
        let config = Config::default();
        assert_eq!(config.endpoint, "https://api.doppler.com");
        assert_eq!(config.timeout_secs, 30);
        assert!(config.auth_token.is_none());
        assert!(!config.include_dynamic_secrets);
    }

    #[test]
    fn cli_overrides_win_over_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doppler-substitute.json");
        std::fs::write(&path, r#"{ "project": "from-file", "config": "dev" }"#).unwrap();

        let mut config = Config::load(Some(&path)).unwrap();
        config.apply_overrides(&ConfigOverrides {
            project: Some("from-flag".into()),
            include_dynamic_secrets: Some(true),
            ..ConfigOverrides::default()
        });
        assert_eq!(config.project.as_deref(), Some("from-flag"));
        assert_eq!(config.config.as_deref(), Some("dev"));
        assert!(config.include_dynamic_secrets);
    }

    #[test]
    fn load_json_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doppler-substitute.json");
        std::fs::write(
            &path,
            r#"{ "project": "testing", "config": "dev", "authToken": "dp.st.dev.abc" }"#,
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.project.as_deref(), Some("testing"));
        assert_eq!(config.config.as_deref(), Some("dev"));
        assert_eq!(config.auth_token.as_deref(), Some("dp.st.dev.abc"));
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
    }

    #[test]
    fn load_toml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doppler-substitute.toml");
        std::fs::write(
            &path,
            "endpoint = \"http://localhost:9000\"\nproject = \"web\"\nconfig = \"stg\"\ntimeoutSecs = 10\n",
        )
        .unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.endpoint, "http://localhost:9000");
        assert_eq!(config.timeout_secs, 10);
    }

    #[test]
    fn load_yaml_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doppler-substitute.yaml");
        std::fs::write(&path, "project: api\nconfig: dev\nincludeDynamicSecrets: true\n").unwrap();

        let config = load_config_file(&path).unwrap();
        assert_eq!(config.project.as_deref(), Some("api"));
        assert!(config.include_dynamic_secrets);
    }

    #[test]
    fn invalid_config_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doppler-substitute.yaml");
        std::fs::write(&path, "project: [unterminated\n").unwrap();

        assert!(matches!(
            load_config_file(&path),
            Err(SubstituteError::Config(_))
        ));
    }

    #[test]
    fn explicit_missing_file_is_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("nope.json"))).unwrap_err();
        assert!(matches!(err, SubstituteError::Config(msg) if msg.contains("does not exist")));
    }

    #[test]
    fn serialized_config_omits_token() {
        let config = Config {
            auth_token: Some("dp.st.dev.abc".into()),
            ..Config::default()
        };
        let json = serde_json::to_string(&config).unwrap();
        assert!(!json.contains("dp.st.dev.abc"));
    }
}
