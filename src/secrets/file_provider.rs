//! Local secrets file provider.
//!
//! Reads a JSON object previously saved from the download endpoint, so a
//! run can happen without network access.

use super::types::{SecretProvider, SecretSet};
use crate::error::{Result, SubstituteError};
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::info;

pub struct FileSecretProvider {
    path: PathBuf,
}

impl FileSecretProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl SecretProvider for FileSecretProvider {
    fn name(&self) -> &str {
        "file"
    }

    async fn fetch(&self) -> Result<SecretSet> {
        info!("Reading secrets from {}", self.path.display());
        let body = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            SubstituteError::Fetch(format!(
                "cannot read secrets file '{}': {e}",
                self.path.display()
            ))
        })?;
        SecretSet::from_json_str(&body)
    }
}
