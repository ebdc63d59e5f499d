//! Secret sources.
//!
//! A run pulls one complete [`SecretSet`] from a [`SecretProvider`]: either
//! the Doppler download endpoint or a local JSON file saved from it.

pub mod doppler_provider;
pub mod file_provider;
pub mod types;

pub use doppler_provider::DopplerProvider;
pub use file_provider::FileSecretProvider;
pub use types::{redact_secret, SecretProvider, SecretSet};

use crate::config::Config;
use crate::error::Result;
use std::path::Path;

/// Pick the provider for this run. A local secrets file wins over the
/// network endpoint.
pub fn provider_for(
    config: &Config,
    secrets_file: Option<&Path>,
) -> Result<Box<dyn SecretProvider>> {
    match secrets_file {
        Some(path) => Ok(Box::new(FileSecretProvider::new(path))),
        None => Ok(Box::new(DopplerProvider::new(config)?)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn secrets_file_selects_file_provider() {
        let provider = provider_for(&Config::default(), Some(Path::new("secrets.json"))).unwrap();
        assert_eq!(provider.name(), "file");
    }

    #[test]
    fn default_selects_doppler() {
        let provider = provider_for(&Config::default(), None).unwrap();
        assert_eq!(provider.name(), "doppler");
    }
}
