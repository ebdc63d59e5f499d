//! Doppler secrets download provider.
//!
//! Issues one GET against `/v3/configs/config/secrets/download` and decodes
//! the JSON object it returns.

use super::types::{SecretProvider, SecretSet};
use crate::config::{Config, SECRETS_DOWNLOAD_PATH};
use crate::error::{Result, SubstituteError};
use async_trait::async_trait;
use reqwest::header::ACCEPT;
use std::time::Duration;
use tracing::{debug, info};
use url::Url;

/// Maximum number of response body characters echoed into a fetch error.
const MAX_ERROR_BODY_CHARS: usize = 200;

/// Downloads secrets from the Doppler API.
pub struct DopplerProvider {
    client: reqwest::Client,
    url: Url,
    auth_token: Option<String>,
}

impl DopplerProvider {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("doppler-substitute/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SubstituteError::Fetch(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            url: download_url(config)?,
            auth_token: config.auth_token.clone().filter(|t| !t.is_empty()),
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }
}

#[async_trait]
impl SecretProvider for DopplerProvider {
    fn name(&self) -> &str {
        "doppler"
    }

    async fn fetch(&self) -> Result<SecretSet> {
        info!(
            "Fetching secrets from {}{}",
            self.url.host_str().unwrap_or("<unknown>"),
            self.url.path()
        );

        let mut request = self.client.get(self.url.clone()).header(ACCEPT, "application/json");
        if let Some(token) = &self.auth_token {
            request = request.bearer_auth(token);
        } else {
            debug!("No auth token configured, sending unauthenticated request");
        }

        let response = request
            .send()
            .await
            .map_err(|e| SubstituteError::Fetch(format!("request failed: {e}")))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| SubstituteError::Fetch(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(SubstituteError::Fetch(format!(
                "endpoint returned {status}: {}",
                error_detail(&body)
            )));
        }

        let secrets = SecretSet::from_json_str(&body)?;
        info!("Fetched {} secret(s)", secrets.len());
        Ok(secrets)
    }
}

/// Build the download URL from the configured endpoint and query options.
pub fn download_url(config: &Config) -> Result<Url> {
    let base = config.endpoint.trim_end_matches('/');
    let mut url = Url::parse(&format!("{base}{SECRETS_DOWNLOAD_PATH}")).map_err(|e| {
        SubstituteError::Config(format!("invalid endpoint '{}': {e}", config.endpoint))
    })?;

    {
        let mut query = url.query_pairs_mut();
        if let Some(project) = &config.project {
            query.append_pair("project", project);
        }
        if let Some(cfg) = &config.config {
            query.append_pair("config", cfg);
        }
        query.append_pair("format", "json");
        query.append_pair(
            "include_dynamic_secrets",
            if config.include_dynamic_secrets {
                "true"
            } else {
                "false"
            },
        );
    }

    Ok(url)
}

/// Summarise an error response. Doppler error bodies carry a `messages`
/// array; anything else is truncated verbatim.
fn error_detail(body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<serde_json::Value>(body) {
        if let Some(messages) = value.get("messages").and_then(|m| m.as_array()) {
            let joined: Vec<&str> = messages.iter().filter_map(|m| m.as_str()).collect();
            if !joined.is_empty() {
                return joined.join("; ");
            }
        }
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "<empty body>".to_string();
    }
    if trimmed.chars().count() > MAX_ERROR_BODY_CHARS {
        let head: String = trimmed.chars().take(MAX_ERROR_BODY_CHARS).collect();
        format!("{head}…")
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> Config {
        Config {
            project: Some("testing".into()),
            config: Some("dev".into()),
            ..Config::default()
        }
    }

    #[test]
    fn url_matches_download_endpoint() {
        let url = download_url(&config()).unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.doppler.com/v3/configs/config/secrets/download\
             ?project=testing&config=dev&format=json&include_dynamic_secrets=false"
        );
    }

    #[test]
    fn url_omits_unset_project_and_config() {
        let url = download_url(&Config::default()).unwrap();
        assert_eq!(
            url.query(),
            Some("format=json&include_dynamic_secrets=false")
        );
    }

    #[test]
    fn url_tolerates_trailing_slash() {
        let mut cfg = config();
        cfg.endpoint = "http://127.0.0.1:8080/".into();
        let url = download_url(&cfg).unwrap();
        assert_eq!(url.path(), SECRETS_DOWNLOAD_PATH);
        assert_eq!(url.port(), Some(8080));
    }

    #[test]
    fn url_rejects_garbage_endpoint() {
        let mut cfg = config();
        cfg.endpoint = "not a url".into();
        assert!(matches!(
            download_url(&cfg),
            Err(SubstituteError::Config(_))
        ));
    }

    #[test]
    fn error_detail_prefers_doppler_messages() {
        let body = r#"{"messages":["Invalid Auth token"],"success":false}"#;
        assert_eq!(error_detail(body), "Invalid Auth token");
    }

    #[test]
    fn error_detail_truncates_long_bodies() {
        let body = "x".repeat(500);
        let detail = error_detail(&body);
        assert_eq!(detail.chars().count(), MAX_ERROR_BODY_CHARS + 1);
        assert!(detail.ends_with('…'));
    }

    #[test]
    fn error_detail_empty_body() {
        assert_eq!(error_detail("  "), "<empty body>");
    }

    #[test]
    fn empty_token_is_ignored() {
        let mut cfg = config();
        cfg.auth_token = Some(String::new());
        let provider = DopplerProvider::new(&cfg).unwrap();
        assert!(provider.auth_token.is_none());
    }
}
