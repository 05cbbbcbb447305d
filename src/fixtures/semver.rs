//! Dotted `MAJOR.MINOR.PATCH` version arithmetic.
//!
//! Versions that do not parse are not errors: comparison falls back to
//! string ordering and decrement produces a placeholder build string.

use std::cmp::Ordering;
use std::fmt;

/// Parsed semantic version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u64,
    pub minor: u64,
    pub patch: u64,
}

/// Values a component resets to when the component below it underflows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rollover {
    pub patch: u64,
    pub minor: u64,
}

impl Default for Rollover {
    fn default() -> Self {
        Rollover { patch: 9, minor: 9 }
    }
}

impl Version {
    pub const ZERO: Version = Version {
        major: 0,
        minor: 0,
        patch: 0,
    };

    /// Parse a strict `\d+.\d+.\d+` version string (e.g., "3.4.2").
    pub fn parse(version: &str) -> Option<Self> {
        let mut parts = version.split('.');
        let major = parse_component(parts.next()?)?;
        let minor = parse_component(parts.next()?)?;
        let patch = parse_component(parts.next()?)?;
        if parts.next().is_some() {
            return None;
        }

        Some(Version {
            major,
            minor,
            patch,
        })
    }

    /// The release one step before this one. `0.0.0` has no predecessor
    /// and is returned unchanged.
    pub fn previous(&self, rollover: Rollover) -> Self {
        if self.patch > 0 {
            Version {
                patch: self.patch - 1,
                ..*self
            }
        } else if self.minor > 0 {
            Version {
                minor: self.minor - 1,
                patch: rollover.patch,
                ..*self
            }
        } else if self.major > 0 {
            Version {
                major: self.major - 1,
                minor: rollover.minor,
                patch: rollover.patch,
            }
        } else {
            Version::ZERO
        }
    }

    /// The release `steps` steps before this one.
    pub fn decrement(&self, steps: u32, rollover: Rollover) -> Self {
        let mut version = *self;
        for _ in 0..steps {
            if version == Version::ZERO {
                break;
            }
            version = version.previous(rollover);
        }
        version
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)
    }
}

fn parse_component(part: &str) -> Option<u64> {
    if part.is_empty() || !part.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

/// Parse a version string, `None` when it is not a semver triplet.
pub fn parse(version: &str) -> Option<(u64, u64, u64)> {
    Version::parse(version).map(|v| (v.major, v.minor, v.patch))
}

/// Order two version strings.
///
/// Two semvers compare numerically component by component. Two non-semver
/// strings compare lexicographically. A non-semver string always sorts
/// before a semver one.
pub fn compare(a: &str, b: &str) -> Ordering {
    match (Version::parse(a), Version::parse(b)) {
        (Some(va), Some(vb)) => va.cmp(&vb),
        (None, None) => a.cmp(b),
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
    }
}

/// Version string `steps` releases before `version`.
///
/// Non-semver input yields the placeholder `"{version}-r{steps}"`.
pub fn decrement(version: &str, steps: u32, rollover: Rollover) -> String {
    match Version::parse(version) {
        Some(v) => v.decrement(steps, rollover).to_string(),
        None => format!("{}-r{}", version, steps),
    }
}
