//! Process-wide logging setup.

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Maps the `-v` count onto a filter directive.
fn verbosity_directive(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

/// Installs the global `tracing` subscriber once.
///
/// Precedence: `-v` flags, then `RUST_LOG`, then the configured level.
/// Logs go to stderr so stdout stays machine-readable.
pub fn init_logging(configured_level: &str, verbose: u8) {
    INIT.call_once(|| {
        let directive = verbosity_directive(verbose)
            .map(str::to_owned)
            .or_else(|| std::env::var("RUST_LOG").ok())
            .unwrap_or_else(|| configured_level.to_owned());

        let (filter, invalid) = match EnvFilter::try_new(&directive) {
            Ok(filter) => (filter, None),
            Err(e) => (EnvFilter::new("warn"), Some(e)),
        };

        let installed = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .compact()
            .try_init()
            .is_ok();

        if installed && let Some(e) = invalid {
            tracing::warn!(%directive, error = %e, "invalid log filter, falling back to 'warn'");
        }
    });
}
