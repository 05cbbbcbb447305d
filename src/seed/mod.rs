//! Hand-authored inputs for the standard fixture set.

pub mod attempts;
pub mod catalog;
pub mod current_running;
pub mod reference;
pub mod test_runs;

use chrono::{DateTime, Utc};

use crate::error::{AppError, AppResult};
use crate::fixtures::FixtureInputs;

pub use attempts::{attempts, exceptions};
pub use catalog::catalog;
pub use current_running::current_running;
pub use reference::reference;
pub use test_runs::{cluster_suites, suite_baselines, test_runs};

/// Parse an RFC 3339 seed timestamp.
pub(crate) fn timestamp(value: &str) -> AppResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| AppError::InvalidSeed(format!("timestamp {}: {}", value, e)))
}

/// Bundle every seed table into one input set.
pub fn standard_inputs() -> AppResult<FixtureInputs> {
    Ok(FixtureInputs {
        catalog: catalog()?,
        current_running: current_running(),
        seed_attempts: attempts()?,
        seed_test_runs: test_runs()?,
        exceptions: exceptions(),
        suite_baselines: suite_baselines(),
        cluster_suites: cluster_suites(),
        reference: reference()?,
    })
}
