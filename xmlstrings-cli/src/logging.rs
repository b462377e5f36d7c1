use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Directive used when `RUST_LOG` is unset and `--verbose` is off.
pub const DEFAULT_DIRECTIVE: &str = "warn";

/// Builds the filter for a run: `--verbose` forces debug for both crates,
/// otherwise `RUST_LOG` wins over the default.
pub fn filter(verbose: bool) -> EnvFilter {
    if verbose {
        return EnvFilter::new("xmlstrings=debug,xmlstrings_cli=debug");
    }
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVE))
}

/// Initialize the global subscriber, writing compact lines to stderr.
///
/// Stdout stays reserved for command output such as `--json` reports.
pub fn init(verbose: bool) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(verbose)
        .with_level(true)
        .compact();

    tracing_subscriber::registry()
        .with(filter(verbose))
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
