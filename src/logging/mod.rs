use tracing_subscriber::filter::{Directive, LevelFilter};

/// Install the global subscriber. `RUST_LOG` directives are kept; the
/// crate's own level follows the `--verbose` / `--quiet` flags.
pub fn init(verbose: bool, quiet: bool) {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::builder()
                .with_default_directive(LevelFilter::WARN.into())
                .from_env_lossy()
                .add_directive(crate_directive(verbose, quiet)),
        )
        .with_writer(std::io::stderr)
        .init();
}

fn crate_directive(verbose: bool, quiet: bool) -> Directive {
    let level = if verbose {
        LevelFilter::DEBUG
    } else if quiet {
        LevelFilter::WARN
    } else {
        LevelFilter::INFO
    };
    format!("doppler_substitute={level}")
        .parse()
        .unwrap_or_else(|_| level.into())
}
