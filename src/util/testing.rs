//! Shared test setup.

use std::sync::Once;

use tracing::debug;
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::prelude::*;
use tracing_subscriber::{fmt, EnvFilter};

static TEST_SETUP: Once = Once::new();

/// Default filter: this crate at debug, dependencies at warn.
const DEFAULT_TEST_FILTER: &str = "warn,bcmtree=debug";

/// Install the shared test subscriber once per test binary.
///
/// `RUST_LOG` replaces the default filter. Output goes through the test
/// writer, so it only shows for failing tests or with `--nocapture`.
pub fn init_test_setup() {
    TEST_SETUP.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(DEFAULT_TEST_FILTER));
        let layer = fmt::layer()
            .with_test_writer()
            .with_target(true)
            .with_span_events(FmtSpan::CLOSE)
            .with_filter(filter);

        if tracing::dispatcher::has_been_set() {
            debug!("tracing subscriber already installed");
            return;
        }
        if let Err(e) = tracing_subscriber::registry().with(layer).try_init() {
            eprintln!("test logging unavailable: {}", e);
        }
        debug!("test setup complete");
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_repeated_calls_when_initialising_then_setup_runs_once() {
        init_test_setup();
        init_test_setup();
        assert!(TEST_SETUP.is_completed());
    }
}
