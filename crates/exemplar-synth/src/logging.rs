use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::time::UtcTime;
use tracing_subscriber::prelude::*;

use crate::errors::{Result, SynthesisError};

/// Install a global fmt subscriber filtered by `filter` (`RUST_LOG` syntax).
pub fn init_logging(filter: &str, json: bool) -> Result<()> {
    let filter =
        EnvFilter::try_new(filter).map_err(|err| SynthesisError::Logging(err.to_string()))?;

    let registry = tracing_subscriber::registry().with(filter);
    let result = if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_timer(UtcTime::rfc_3339()),
            )
            .try_init()
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_timer(UtcTime::rfc_3339()))
            .try_init()
    };
    result.map_err(|err| SynthesisError::Logging(err.to_string()))
}

/// Best-effort subscriber for tests; honours `RUST_LOG` and writes through
/// the test harness so output is captured per test.
pub fn init_test_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
