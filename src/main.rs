use clap::Parser;
use doppler_substitute::cli::{Cli, Commands};
use doppler_substitute::config::Config;
use doppler_substitute::logging;
use doppler_substitute::substitute::SubstituteOptions;
use std::path::PathBuf;
use tracing::{error, info};

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    logging::init(cli.verbose, cli.quiet);

    match cli.command {
        Commands::Substitute(opts) => {
            let mut config = Config::load(opts.config_file.as_deref())?;
            config.apply_overrides(&opts.overrides());

            let options = SubstituteOptions {
                source: PathBuf::from(&opts.source),
                destination: PathBuf::from(&opts.destination),
                format: opts.format,
                layout: opts.layout(),
            };
            info!(
                "Substituting {} placeholders from {} into {}",
                options.format,
                options.source.display(),
                options.destination.display()
            );

            let report = doppler_substitute::run_substitution(
                &config,
                opts.secrets_file.as_deref(),
                &options,
            )
            .await?;

            if !report.is_success() {
                for failure in &report.failures {
                    error!("{}", failure.error);
                }
                anyhow::bail!("{} file(s) could not be substituted", report.failures.len());
            }
        }
        Commands::Version => {
            println!("doppler-substitute {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
