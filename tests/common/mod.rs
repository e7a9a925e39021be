//! Common test utilities and helpers
//!
//! Shared fixtures for all tests: token builders, mock backend wiring, and
//! canned JSON bodies.

pub mod fixtures;
pub mod mock_backend;

pub use fixtures::*;
pub use mock_backend::*;

use std::sync::Once;

static TRACING: Once = Once::new();

/// Install a test subscriber once; `RUST_LOG` controls verbosity
pub fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}
