//! Error types for conversions and round-trip verification
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use hubspoke_fuzz::GenerationError;
use std::fmt;
use thiserror::Error;

/// Result type for verification runs
pub type VerifyResult<T> = std::result::Result<T, VerifyError>;

/// A conversion function rejected its input
#[derive(Error, Debug)]
#[error("{}", self.describe())]
pub struct ConversionError {
    /// Field the conversion failed on, if known
    pub field: Option<String>,
    /// Human-readable error message
    pub message: String,
    #[source]
    pub source: Option<anyhow::Error>,
}

impl ConversionError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            field: None,
            message: message.into(),
            source: None,
        }
    }

    /// Conversion error attributed to a specific field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: Some(field.into()),
            message: message.into(),
            source: None,
        }
    }

    /// Attach the underlying cause
    pub fn with_source(mut self, source: impl Into<anyhow::Error>) -> Self {
        self.source = Some(source.into());
        self
    }

    fn describe(&self) -> String {
        match &self.field {
            Some(field) => format!("{}: {}", field, self.message),
            None => self.message.clone(),
        }
    }
}

impl From<anyhow::Error> for ConversionError {
    fn from(error: anyhow::Error) -> Self {
        Self {
            field: None,
            message: error.to_string(),
            source: Some(error),
        }
    }
}

impl From<serde_json::Error> for ConversionError {
    fn from(error: serde_json::Error) -> Self {
        Self::new("conversion data could not be encoded or decoded").with_source(error)
    }
}

/// Which round trip a failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// spoke → hub → spoke
    SpokeHubSpoke,
    /// hub → spoke → hub
    HubSpokeHub,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Direction::SpokeHubSpoke => f.write_str("spoke-hub-spoke"),
            Direction::HubSpokeHub => f.write_str("hub-spoke-hub"),
        }
    }
}

/// Which leg of a round trip a conversion failure happened in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// From the generated value into the other version
    Forward,
    /// Back into the version the trip started from
    Backward,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Forward => f.write_str("forward"),
            Stage::Backward => f.write_str("backward"),
        }
    }
}

/// Why a verification run failed.
///
/// Every trial-level variant carries the seed of the failing trial; feeding it
/// to [`crate::VerifierConfig::reproducing`] replays exactly that trial.
#[derive(Error, Debug)]
pub enum VerifyError {
    /// The generator could not build a valid instance
    #[error("{spec}: generation failed in {direction} (trial {trial}, seed {seed}): {source}")]
    Generation {
        spec: String,
        direction: Direction,
        trial: usize,
        seed: u64,
        #[source]
        source: GenerationError,
    },

    /// A conversion function returned an error
    #[error("{spec}: {stage} conversion failed in {direction} (trial {trial}, seed {seed}): {source}")]
    Conversion {
        spec: String,
        direction: Direction,
        stage: Stage,
        trial: usize,
        seed: u64,
        #[source]
        source: ConversionError,
    },

    /// The round-tripped value differs from the original
    #[error("{spec}: {direction} round trip mismatch at {path} (trial {trial}, seed {seed})\n{diff}")]
    Mismatch {
        spec: String,
        direction: Direction,
        trial: usize,
        seed: u64,
        path: String,
        diff: String,
    },

    /// Applying a normalization rule a second time changed the value
    #[error("{spec}: normalization rule '{rule}' is not idempotent at {path} in {direction} (trial {trial}, seed {seed})")]
    NonIdempotentRule {
        spec: String,
        direction: Direction,
        trial: usize,
        seed: u64,
        rule: String,
        path: String,
    },

    /// Two specs were registered under the same name
    #[error("a conversion spec named '{spec}' is already registered")]
    DuplicateSpec { spec: String },
}

impl VerifyError {
    /// Name of the spec that failed
    pub fn spec(&self) -> &str {
        match self {
            Self::Generation { spec, .. }
            | Self::Conversion { spec, .. }
            | Self::Mismatch { spec, .. }
            | Self::NonIdempotentRule { spec, .. }
            | Self::DuplicateSpec { spec } => spec,
        }
    }

    /// Seed of the failing trial
    pub fn seed(&self) -> Option<u64> {
        match self {
            Self::Generation { seed, .. }
            | Self::Conversion { seed, .. }
            | Self::Mismatch { seed, .. }
            | Self::NonIdempotentRule { seed, .. } => Some(*seed),
            Self::DuplicateSpec { .. } => None,
        }
    }

    /// Round trip the failure happened in
    pub fn direction(&self) -> Option<Direction> {
        match self {
            Self::Generation { direction, .. }
            | Self::Conversion { direction, .. }
            | Self::Mismatch { direction, .. }
            | Self::NonIdempotentRule { direction, .. } => Some(*direction),
            Self::DuplicateSpec { .. } => None,
        }
    }

    /// First differing field path, for mismatches and rule failures
    pub fn path(&self) -> Option<&str> {
        match self {
            Self::Mismatch { path, .. } | Self::NonIdempotentRule { path, .. } => Some(path),
            _ => None,
        }
    }
}
