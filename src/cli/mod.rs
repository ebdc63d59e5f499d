use crate::config::ConfigOverrides;
use crate::substitute::{OutputLayout, PlaceholderFormat};
use clap::builder::NonEmptyStringValueParser;
use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "doppler-substitute",
    version,
    about = "Substitute Doppler secrets into a tree of files"
)]
pub struct Cli {
    /// Log debug output.
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,
    /// Only log warnings and errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Download secrets and write substituted copies of every source file.
    Substitute(SubstituteOpts),
    Version,
}

#[derive(clap::Args)]
pub struct SubstituteOpts {
    /// Placeholder style to replace.
    #[arg(short, long, value_enum, default_value_t = PlaceholderFormat::DollarCurly)]
    pub format: PlaceholderFormat,
    /// Input file or directory.
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub source: String,
    /// Output directory, created if absent.
    #[arg(short, long, value_parser = NonEmptyStringValueParser::new())]
    pub destination: String,
    /// Write every file directly under the destination, dropping subdirectories.
    #[arg(long)]
    pub flatten: bool,
    /// Configuration file (json, yaml or toml).
    #[arg(long)]
    pub config_file: Option<PathBuf>,
    /// Read secrets from a downloaded JSON file instead of the API.
    #[arg(long)]
    pub secrets_file: Option<PathBuf>,
    /// API base URL.
    #[arg(long, env = "DOPPLER_API_URL")]
    pub endpoint: Option<String>,
    #[arg(short, long, env = "DOPPLER_PROJECT")]
    pub project: Option<String>,
    #[arg(short, long, env = "DOPPLER_CONFIG")]
    pub config: Option<String>,
    /// Access token; prefer DOPPLER_TOKEN to keep it out of shell history.
    #[arg(long, env = "DOPPLER_TOKEN", hide_env_values = true)]
    pub token: Option<String>,
    #[arg(long, action = ArgAction::SetTrue)]
    pub include_dynamic_secrets: bool,
    #[arg(long, env = "DOPPLER_TIMEOUT_SECS")]
    pub timeout_secs: Option<u64>,
}

impl SubstituteOpts {
    pub fn layout(&self) -> OutputLayout {
        if self.flatten {
            OutputLayout::Flatten
        } else {
            OutputLayout::Preserve
        }
    }

    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            endpoint: self.endpoint.clone(),
            project: self.project.clone(),
            config: self.config.clone(),
            auth_token: self.token.clone(),
            include_dynamic_secrets: self.include_dynamic_secrets.then_some(true),
            timeout_secs: self.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_substitute_command() {
        let cli = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--format",
            "handlebars",
            "--source",
            "templates",
            "--destination",
            "out",
            "--project",
            "testing",
            "--config",
            "dev",
        ])
        .unwrap();

        let Commands::Substitute(opts) = cli.command else {
            panic!("expected substitute command");
        };
        assert_eq!(opts.format, PlaceholderFormat::Handlebars);
        assert_eq!(opts.source, "templates");
        assert_eq!(opts.layout(), OutputLayout::Preserve);

        let overrides = opts.overrides();
        assert_eq!(overrides.project.as_deref(), Some("testing"));
        assert_eq!(overrides.config.as_deref(), Some("dev"));
        assert_eq!(overrides.include_dynamic_secrets, None);
    }

    #[test]
    fn format_defaults_to_dollar_curly() {
        let cli = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--source",
            "a",
            "--destination",
            "b",
            "--flatten",
        ])
        .unwrap();
        let Commands::Substitute(opts) = cli.command else {
            panic!("expected substitute command");
        };
        assert_eq!(opts.format, PlaceholderFormat::DollarCurly);
        assert_eq!(opts.layout(), OutputLayout::Flatten);
    }

    #[test]
    fn missing_source_is_rejected() {
        let result = Cli::try_parse_from(["doppler-substitute", "substitute", "--destination", "b"]);
        assert!(result.is_err());
    }

    #[test]
    fn empty_destination_is_rejected() {
        let result = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--source",
            "a",
            "--destination",
            "",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn unknown_format_is_rejected() {
        let result = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--format",
            "percent",
            "--source",
            "a",
            "--destination",
            "b",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn token_and_timeout_read_from_environment() {
        // Only this test touches these variables.
        std::env::set_var("DOPPLER_TOKEN", "dp.st.dev.from-env");
        std::env::set_var("DOPPLER_TIMEOUT_SECS", "7");
        let cli = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--source",
            "a",
            "--destination",
            "b",
        ]);
        std::env::remove_var("DOPPLER_TOKEN");
        std::env::remove_var("DOPPLER_TIMEOUT_SECS");

        let Commands::Substitute(opts) = cli.unwrap().command else {
            panic!("expected substitute command");
        };
        let overrides = opts.overrides();
        assert_eq!(overrides.auth_token.as_deref(), Some("dp.st.dev.from-env"));
        assert_eq!(overrides.timeout_secs, Some(7));
    }

    #[test]
    fn flag_wins_over_environment() {
        std::env::set_var("DOPPLER_API_URL", "http://from-env.test");
        let cli = Cli::try_parse_from([
            "doppler-substitute",
            "substitute",
            "--source",
            "a",
            "--destination",
            "b",
            "--endpoint",
            "http://from-flag.test",
        ]);
        std::env::remove_var("DOPPLER_API_URL");

        let Commands::Substitute(opts) = cli.unwrap().command else {
            panic!("expected substitute command");
        };
        assert_eq!(opts.endpoint.as_deref(), Some("http://from-flag.test"));
    }

    #[test]
    fn command_definition_is_consistent() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
