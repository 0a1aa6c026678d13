//! Release version parsing
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Anything that exposes a two-component release number.
///
/// Contract resolution only looks at major and minor; patch levels and
/// pre-release tags never change which release series a binary belongs to.
pub trait MajorMinor {
    fn major(&self) -> u32;
    fn minor(&self) -> u32;
}

impl MajorMinor for (u32, u32) {
    fn major(&self) -> u32 {
        self.0
    }

    fn minor(&self) -> u32 {
        self.1
    }
}

impl<T: MajorMinor + ?Sized> MajorMinor for &T {
    fn major(&self) -> u32 {
        (**self).major()
    }

    fn minor(&self) -> u32 {
        (**self).minor()
    }
}

/// A concrete software release version
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
    pub patch: u32,
    pub pre_release: Option<String>,
    pub build_metadata: Option<String>,
}

impl Version {
    /// Create a new version
    pub fn new(major: u32, minor: u32, patch: u32) -> Self {
        Self {
            major,
            minor,
            patch,
            pre_release: None,
            build_metadata: None,
        }
    }

    /// Parse a version string.
    ///
    /// Accepts `X.Y` and `X.Y.Z`, an optional leading `v`, a `-pre` suffix and
    /// `+build` metadata, e.g. `v1.4.2-rc.1+abc`.
    pub fn parse(version_str: &str) -> Result<Self, VersionError> {
        let trimmed = version_str.trim();
        let without_prefix = trimmed.strip_prefix('v').unwrap_or(trimmed);

        let (version_part, build_metadata) = match without_prefix.split_once('+') {
            Some((head, build)) => (head, Some(build.to_string())),
            None => (without_prefix, None),
        };

        let (version_part, pre_release) = match version_part.split_once('-') {
            Some((head, pre)) => (head, Some(pre.to_string())),
            None => (version_part, None),
        };

        let parts: Vec<&str> = version_part.split('.').collect();
        if parts.len() != 2 && parts.len() != 3 {
            return Err(VersionError::InvalidFormat(format!(
                "expected X.Y or X.Y.Z, got: {}",
                version_str
            )));
        }

        let major = parse_component("major", parts[0])?;
        let minor = parse_component("minor", parts[1])?;
        let patch = match parts.get(2) {
            Some(raw) => parse_component("patch", raw)?,
            None => 0,
        };

        if matches!(pre_release.as_deref(), Some("")) || matches!(build_metadata.as_deref(), Some("")) {
            return Err(VersionError::InvalidFormat(format!(
                "empty pre-release or build metadata in: {}",
                version_str
            )));
        }

        Ok(Self {
            major,
            minor,
            patch,
            pre_release,
            build_metadata,
        })
    }

    /// Check if this is a pre-release version
    pub fn is_pre_release(&self) -> bool {
        self.pre_release.is_some()
    }
}

fn parse_component(name: &'static str, raw: &str) -> Result<u32, VersionError> {
    raw.parse().map_err(|_| VersionError::InvalidComponent {
        component: name,
        value: raw.to_string(),
    })
}

impl MajorMinor for Version {
    fn major(&self) -> u32 {
        self.major
    }

    fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}.{}", self.major, self.minor, self.patch)?;
        if let Some(ref pre) = self.pre_release {
            write!(f, "-{}", pre)?;
        }
        if let Some(ref build) = self.build_metadata {
            write!(f, "+{}", build)?;
        }
        Ok(())
    }
}

impl FromStr for Version {
    type Err = VersionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl PartialOrd for Version {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Version {
    fn cmp(&self, other: &Self) -> Ordering {
        self.major
            .cmp(&other.major)
            .then(self.minor.cmp(&other.minor))
            .then(self.patch.cmp(&other.patch))
            .then_with(|| {
                // Pre-release versions have lower precedence; build metadata is ignored
                match (&self.pre_release, &other.pre_release) {
                    (None, None) => Ordering::Equal,
                    (None, Some(_)) => Ordering::Greater,
                    (Some(_), None) => Ordering::Less,
                    (Some(a), Some(b)) => a.cmp(b),
                }
            })
    }
}

/// Version parsing error
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VersionError {
    #[error("Invalid version format: {0}")]
    InvalidFormat(String),

    #[error("Invalid {component} version component: '{value}'")]
    InvalidComponent { component: &'static str, value: String },
}
