//! Subscriber setup. Everything goes to standard error; standard output
//! carries words only.

use std::io;

use tracing_subscriber::EnvFilter;

use crate::{Args, LogFormat};

/// Installs the global subscriber. `RUST_LOG` wins over the verbosity flags.
pub fn init(args: &Args) {
    let default = match (args.quiet, args.verbose) {
        (true, _) => "warn",
        (false, 0) => "info",
        (false, 1) => "debug",
        (false, _) => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false);

    // A subscriber installed by an embedding test harness is fine to keep.
    let _ = match args.log_format {
        LogFormat::Text => builder.try_init(),
        LogFormat::Json => builder.json().try_init(),
    };
}
