//! Test Tracing Setup
//!
//! One-time tracing initialization for test binaries. Output defaults to
//! warnings only; set `RUST_LOG` to widen it while debugging a test.

use once_cell::sync::Lazy;
use tracing_subscriber::EnvFilter;

static TRACING: Lazy<()> = Lazy::new(|| {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .init();
});

/// Installs the test subscriber; safe to call from every test
pub fn init_tracing() {
    Lazy::force(&TRACING);
}
