//! Synthesis configuration loaded from environment variables.

use std::env;

use chrono::{DateTime, Utc};

use crate::fixtures::semver::Rollover;
use crate::fixtures::{OnMissingCurrentVersion, SynthesisOptions};

/// Default values for every setting.
pub mod defaults {
    /// Instant backfilled attempts are offset from
    pub const REFERENCE_TIME: &str = "2026-02-05T20:00:00Z";
    /// Day-0 instant of the cluster-wide suites
    pub const CLUSTER_SUITE_TIME: &str = "2026-02-05T03:00:00Z";
    pub const MIN_ATTEMPTS: usize = 5;
    pub const ON_MISSING_CURRENT: &str = "skip";
    pub const ANCHOR_CURRENT: bool = true;
    pub const PATCH_ROLLOVER: u64 = 9;
    pub const MINOR_ROLLOVER: u64 = 9;
    pub const PRETTY: bool = true;
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Instant from which backfilled attempts are offset
    pub reference_time: DateTime<Utc>,
    /// Day-0 instant for SOLUTION/SYSTEM runs
    pub cluster_suite_time: DateTime<Utc>,
    /// Minimum attempts per (cluster-region, service) pair
    pub min_attempts: usize,
    /// Behaviour for pairs without a current version
    pub on_missing_current: OnMissingCurrentVersion,
    /// Synthesize an attempt at the current version when none exists
    pub anchor_current: bool,
    pub patch_rollover: u64,
    pub minor_rollover: u64,
    /// Pretty-print JSON output
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        let options = SynthesisOptions::default();
        Config {
            reference_time: options.reference_time,
            cluster_suite_time: options.cluster_suite_time,
            min_attempts: options.min_attempts,
            on_missing_current: options.on_missing_current,
            anchor_current: options.anchor_current_version,
            patch_rollover: options.rollover.patch,
            minor_rollover: options.rollover.minor,
            pretty: defaults::PRETTY,
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Every variable is optional:
    /// - `DI_REFERENCE_TIME`: RFC 3339 reference instant (default: 2026-02-05T20:00:00Z)
    /// - `DI_CLUSTER_SUITE_TIME`: RFC 3339 day-0 instant (default: 2026-02-05T03:00:00Z)
    /// - `DI_MIN_ATTEMPTS`: minimum attempts per pair, at least 1 (default: 5)
    /// - `DI_ON_MISSING_CURRENT`: `skip` or `assume-zero` (default: skip)
    /// - `DI_ANCHOR_CURRENT`: `true`/`false` (default: true)
    /// - `DI_PATCH_ROLLOVER`: patch value after underflow (default: 9)
    /// - `DI_MINOR_ROLLOVER`: minor value after underflow (default: 9)
    /// - `DI_PRETTY`: pretty-print JSON output (default: true)
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let reference_time = parse_instant(
            lookup("DI_REFERENCE_TIME").as_deref(),
            defaults::REFERENCE_TIME,
            "DI_REFERENCE_TIME must be an RFC 3339 timestamp",
        )?;

        let cluster_suite_time = parse_instant(
            lookup("DI_CLUSTER_SUITE_TIME").as_deref(),
            defaults::CLUSTER_SUITE_TIME,
            "DI_CLUSTER_SUITE_TIME must be an RFC 3339 timestamp",
        )?;

        let min_attempts = lookup("DI_MIN_ATTEMPTS")
            .unwrap_or_else(|| defaults::MIN_ATTEMPTS.to_string())
            .parse::<usize>()
            .map_err(|_| ConfigError::InvalidValue("DI_MIN_ATTEMPTS must be a valid number"))?;
        if min_attempts == 0 {
            return Err(ConfigError::InvalidValue("DI_MIN_ATTEMPTS must be at least 1"));
        }

        let on_missing_current_str = lookup("DI_ON_MISSING_CURRENT")
            .unwrap_or_else(|| defaults::ON_MISSING_CURRENT.to_string());
        let on_missing_current = OnMissingCurrentVersion::parse(&on_missing_current_str).ok_or(
            ConfigError::InvalidValue("DI_ON_MISSING_CURRENT must be 'skip' or 'assume-zero'"),
        )?;

        let anchor_current = parse_flag(
            lookup("DI_ANCHOR_CURRENT").as_deref(),
            defaults::ANCHOR_CURRENT,
            "DI_ANCHOR_CURRENT must be true or false",
        )?;

        let patch_rollover = lookup("DI_PATCH_ROLLOVER")
            .unwrap_or_else(|| defaults::PATCH_ROLLOVER.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("DI_PATCH_ROLLOVER must be a valid number"))?;

        let minor_rollover = lookup("DI_MINOR_ROLLOVER")
            .unwrap_or_else(|| defaults::MINOR_ROLLOVER.to_string())
            .parse::<u64>()
            .map_err(|_| ConfigError::InvalidValue("DI_MINOR_ROLLOVER must be a valid number"))?;

        let pretty = parse_flag(
            lookup("DI_PRETTY").as_deref(),
            defaults::PRETTY,
            "DI_PRETTY must be true or false",
        )?;

        Ok(Config {
            reference_time,
            cluster_suite_time,
            min_attempts,
            on_missing_current,
            anchor_current,
            patch_rollover,
            minor_rollover,
            pretty,
        })
    }

    /// Options handed to `build_fixtures`.
    pub fn synthesis_options(&self) -> SynthesisOptions {
        SynthesisOptions {
            reference_time: self.reference_time,
            cluster_suite_time: self.cluster_suite_time,
            min_attempts: self.min_attempts,
            on_missing_current: self.on_missing_current,
            anchor_current_version: self.anchor_current,
            rollover: Rollover {
                patch: self.patch_rollover,
                minor: self.minor_rollover,
            },
        }
    }
}

/// Parse one of the RFC 3339 defaults in [`defaults`]. Debug builds panic on
/// a malformed constant; `test_default_instants_parse` covers every default.
pub(crate) fn default_instant(value: &str) -> DateTime<Utc> {
    let parsed = DateTime::parse_from_rfc3339(value);
    debug_assert!(parsed.is_ok(), "default instant '{}' is not RFC 3339", value);
    parsed
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or(DateTime::UNIX_EPOCH)
}

fn parse_instant(
    value: Option<&str>,
    default: &str,
    message: &'static str,
) -> Result<DateTime<Utc>, ConfigError> {
    DateTime::parse_from_rfc3339(value.unwrap_or(default))
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| ConfigError::InvalidValue(message))
}

fn parse_flag(value: Option<&str>, default: bool, message: &'static str) -> Result<bool, ConfigError> {
    match value.map(|v| v.trim().to_lowercase()) {
        None => Ok(default),
        Some(v) => match v.as_str() {
            "true" | "1" | "yes" | "on" => Ok(true),
            "false" | "0" | "no" | "off" => Ok(false),
            _ => Err(ConfigError::InvalidValue(message)),
        },
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid configuration value: {0}")]
    InvalidValue(&'static str),
}
