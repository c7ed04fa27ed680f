//! Logging
//!
//! Diagnostic logging via `tracing`, written to stderr so it never mixes
//! with command output on stdout.
//!
//! Filter priority (highest to lowest):
//! 1. `SHUTTLE_LOG` environment variable (any `EnvFilter` directive)
//! 2. `--debug` flag (`debug` for this crate)
//! 3. Default (`warn`)

use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Registry};

/// Environment variable holding the log filter.
pub const LOG_ENV: &str = "SHUTTLE_LOG";

/// Build the log filter.
pub fn build_filter(debug: bool) -> EnvFilter {
    if let Ok(filter) = EnvFilter::try_from_env(LOG_ENV) {
        return filter;
    }

    if debug {
        EnvFilter::new("warn,shuttle=debug")
    } else {
        EnvFilter::new("warn")
    }
}

/// Initialize the global subscriber.
///
/// Safe to call more than once; only the first call installs a subscriber.
pub fn init_logging(debug: bool) {
    let _ = Registry::default()
        .with(build_filter(debug))
        .with(
            fmt::layer()
                .with_target(debug)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .try_init();
}
