//! Test logging setup
//!
//! Tests call [`init_test_setup`] first; the subscriber is installed once per
//! test binary and writes through libtest's capture.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    prelude::*,
    EnvFilter,
};

static TEST_SETUP: Once = Once::new();

/// Filter used when `RUST_LOG` is unset.
const DEFAULT_TEST_FILTER: &str = "course_catalog=trace";

pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let env_filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));

        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(env_filter);

        // Another harness may own the global subscriber already
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging not installed: {e}");
        }
        debug!("test logging ready");
    });
}
