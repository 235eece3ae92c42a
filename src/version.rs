//! Numeric version parsing and comparison.
//!
//! Versions are dot-delimited sequences of non-negative integers
//! ("1.2.0"). Pre-release and build metadata are not modeled: any
//! segment that is not a plain number is a format error.

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Errors produced while parsing a version string.
#[derive(Debug, Clone, PartialEq)]
pub enum VersionError {
    /// The input was empty (or only whitespace)
    Empty,
    /// A segment was empty or contained non-digit characters
    InvalidSegment { version: String, segment: String },
}

impl fmt::Display for VersionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionError::Empty => write!(f, "Version string is empty"),
            VersionError::InvalidSegment { version, segment } => {
                write!(
                    f,
                    "Invalid version '{}': segment '{}' is not a number",
                    version, segment
                )
            }
        }
    }
}

impl std::error::Error for VersionError {}

/// A parsed dot-numeric version such as `1.2.0`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionNumber {
    segments: Vec<u64>,
}

impl VersionNumber {
    pub fn segments(&self) -> &[u64] {
        &self.segments
    }

    /// Compare two versions after zero-padding the shorter one.
    ///
    /// `1.2` and `1.2.0` compare equal; the most significant differing
    /// segment decides otherwise.
    pub fn compare(&self, other: &VersionNumber) -> Ordering {
        let len = self.segments.len().max(other.segments.len());
        (0..len)
            .map(|i| {
                let a = self.segments.get(i).copied().unwrap_or(0);
                let b = other.segments.get(i).copied().unwrap_or(0);
                a.cmp(&b)
            })
            .find(|ord| *ord != Ordering::Equal)
            .unwrap_or(Ordering::Equal)
    }
}

impl FromStr for VersionNumber {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(VersionError::Empty);
        }

        let segments = trimmed
            .split('.')
            .map(|segment| {
                let segment = segment.trim();
                if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
                    return Err(VersionError::InvalidSegment {
                        version: s.to_string(),
                        segment: segment.to_string(),
                    });
                }
                segment
                    .parse::<u64>()
                    .map_err(|_| VersionError::InvalidSegment {
                        version: s.to_string(),
                        segment: segment.to_string(),
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self { segments })
    }
}

impl fmt::Display for VersionNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.segments.iter().map(u64::to_string).collect();
        write!(f, "{}", parts.join("."))
    }
}

/// Returns true only when `latest` is strictly newer than `current`.
///
/// Equal versions (including ones that are equal after padding, such as
/// `1.2` and `1.2.0`) are not an update.
pub fn is_newer_version(latest: &str, current: &str) -> Result<bool, VersionError> {
    let latest: VersionNumber = latest.parse()?;
    let current: VersionNumber = current.parse()?;
    Ok(latest.compare(&current) == Ordering::Greater)
}

/// Strip a single leading `v` from a release tag (`v1.2.0` -> `1.2.0`).
pub fn strip_tag_prefix(tag: &str) -> &str {
    tag.strip_prefix('v').unwrap_or(tag)
}
