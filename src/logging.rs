//! Logging setup built on `tracing-subscriber`

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Install the global subscriber.
///
/// `RUST_LOG` wins when set; otherwise `verbose` selects `debug` for this
/// crate and `info` for everything else. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default_directive = if verbose {
        "info,rps_qlearning=debug"
    } else {
        "warn,rps_qlearning=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
        .try_init();
}
