//! Tracing setup

use tracing_subscriber::{EnvFilter, Registry, fmt, prelude::*, reload};

const STARTUP_FILTER: &str = "info";

/// Lets the configured filter replace the startup one once config is loaded
pub struct TracingHandle {
    reload: reload::Handle<EnvFilter, Registry>,
    from_env: bool,
}

/// Install the global fmt subscriber writing to stderr, keeping stdout for reports.
///
/// Runs before configuration is loaded, so it starts from `RUST_LOG` or `info`.
pub fn init_tracing() -> TracingHandle {
    let env_filter = EnvFilter::try_from_default_env().ok();
    let from_env = env_filter.is_some();
    let filter = env_filter.unwrap_or_else(|| EnvFilter::new(STARTUP_FILTER));

    let (filter_layer, reload) = reload::Layer::new(filter);
    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    TracingHandle { reload, from_env }
}

impl TracingHandle {
    /// Switch to the configured filter. `RUST_LOG` takes precedence.
    pub fn apply_filter(&self, directive: &str) {
        if self.from_env {
            return;
        }

        match EnvFilter::try_new(directive) {
            Ok(filter) => {
                if let Err(e) = self.reload.reload(filter) {
                    tracing::warn!(error = %e, "Failed to apply log filter");
                }
            }
            Err(e) => tracing::warn!(directive, error = %e, "Invalid log filter, keeping startup filter"),
        }
    }
}

/// Check that a filter directive parses
pub fn is_valid_filter(directive: &str) -> bool {
    EnvFilter::try_new(directive).is_ok()
}
