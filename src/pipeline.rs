//! One substitution run: validate, fetch, then rewrite the tree.

use crate::config::{validate_config_object, Config};
use crate::error::{Result, SubstituteError};
use crate::secrets::{provider_for, redact_secret};
use crate::substitute::{substitute_tree, SubstituteOptions, SubstitutionReport};
use std::path::Path;
use tracing::debug;

/// Run the whole pipeline. Configuration problems are reported before any
/// network or file I/O; fetch and decode problems abort the run.
pub async fn run_substitution(
    config: &Config,
    secrets_file: Option<&Path>,
    options: &SubstituteOptions,
) -> Result<SubstitutionReport> {
    if secrets_file.is_none() {
        validate_config_object(config)?;
    }
    if !options.source.exists() {
        return Err(SubstituteError::Config(format!(
            "source path '{}' does not exist",
            options.source.display()
        )));
    }

    let provider = provider_for(config, secrets_file)?;
    let secrets = provider.fetch().await?;
    for (name, value) in secrets.iter() {
        debug!("Secret {name} = {}", redact_secret(value));
    }

    substitute_tree(options, &secrets)
}
