//! Release series: the rows of a compatibility table
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::version::MajorMinor;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;

/// Maps a release series (major/minor) to the contract it implements.
///
/// The contract is an API version token such as `v1beta1`. Several release
/// series may implement the same contract.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseSeries {
    /// Major version of the release series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub major: u32,

    /// Minor version of the release series
    #[serde(default, skip_serializing_if = "is_zero")]
    pub minor: u32,

    /// Contract supported by this series
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub contract: String,
}

fn is_zero(value: &u32) -> bool {
    *value == 0
}

impl ReleaseSeries {
    pub fn new(major: u32, minor: u32, contract: impl Into<String>) -> Self {
        Self {
            major,
            minor,
            contract: contract.into(),
        }
    }

    /// Two-component ordering: major first, minor as tie-break.
    pub fn cmp_release(&self, other: &impl MajorMinor) -> Ordering {
        self.major
            .cmp(&other.major())
            .then(self.minor.cmp(&other.minor()))
    }

    /// True when this series is the same release as `other` or a later one.
    pub fn newer_or_equal(&self, other: &impl MajorMinor) -> bool {
        self.cmp_release(other) != Ordering::Less
    }

    /// True when `version` belongs to this release series.
    pub fn matches_version(&self, version: &impl MajorMinor) -> bool {
        self.major == version.major() && self.minor == version.minor()
    }
}

impl MajorMinor for ReleaseSeries {
    fn major(&self) -> u32 {
        self.major
    }

    fn minor(&self) -> u32 {
        self.minor
    }
}

impl fmt::Display for ReleaseSeries {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{} ({})", self.major, self.minor, self.contract)
    }
}
