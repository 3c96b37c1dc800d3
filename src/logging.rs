//! Operator-facing logging.
//!
//! The library only emits `tracing` events; binaries call [`init`] once to
//! print them. `RUST_LOG` takes precedence over the configured level:
//!
//! ```bash
//! RUST_LOG=knowledge_rag=debug knowledge-rag search "refund policy"
//! ```

use std::sync::Once;

use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install a stderr fmt subscriber filtered at `default_level`.
///
/// Safe to call more than once; only the first call takes effect.
pub fn init(default_level: &str) {
    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::try_new(default_level).unwrap_or_else(|_| EnvFilter::new("warn"))
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(true)
            .with_writer(std::io::stderr)
            .try_init();
    });
}
