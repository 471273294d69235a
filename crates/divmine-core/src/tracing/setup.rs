//! Tracing initialization and configuration.

use std::sync::Once;

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

static INIT: Once = Once::new();

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "DIVMINE_LOG";

/// Initialize the divmine tracing/logging system.
///
/// Reads `DIVMINE_LOG` for per-crate log levels.
/// Format: `DIVMINE_LOG=divmine_analysis=debug,divmine_core=warn`
///
/// Falls back to `divmine=info` if `DIVMINE_LOG` is not set or is invalid.
/// Logs go to stderr so stdout stays free for command output.
///
/// Idempotent: only the first call installs a subscriber.
pub fn init_tracing() {
    INIT.call_once(|| {
        let filter = EnvFilter::try_from_env(LOG_ENV_VAR)
            .unwrap_or_else(|_| EnvFilter::new("divmine=info"));

        let installed = tracing_subscriber::registry()
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_target(true)
                    .with_thread_names(true),
            )
            .with(filter)
            .try_init();

        // Another subscriber may already be global (e.g. in tests).
        if installed.is_err() {
            tracing::debug!("global tracing subscriber already installed");
        }
    });
}
