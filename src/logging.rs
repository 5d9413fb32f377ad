// logging.rs - Diagnostic logging setup

use tracing_subscriber::{fmt, EnvFilter};

/// Initialise the tracing subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` picks between `warn` and `debug`
/// for this crate. Safe to call more than once (later calls are no-ops).
pub fn init_logging(verbose: bool) {
    let default_level = if verbose {
        "barcode_designer=debug"
    } else {
        "barcode_designer=warn"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let _ = fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
