//! Console tracing bootstrap shared by the binaries.
//!
//! Filter with `RUST_LOG` (e.g. `RUST_LOG=mapbench=debug`); defaults to
//! `info`. Initialization is idempotent so tests and binaries can both call
//! it without coordinating.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

static INIT: Once = Once::new();

/// Install the console subscriber. Safe to call multiple times; only the
/// first call takes effect.
pub fn init() {
    INIT.call_once(|| {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .try_init();
    });
}
