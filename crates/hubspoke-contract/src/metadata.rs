//! Metadata documents declaring a provider's release series
//!
//! A metadata document is the on-disk form of a compatibility table:
//!
//! ```yaml
//! apiVersion: hubspoke.dev/v1alpha3
//! kind: Metadata
//! releaseSeries:
//!   - major: 1
//!     minor: 0
//!     contract: v1alpha3
//! ```
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::error::{MetadataError, MetadataResult};
use crate::release::ReleaseSeries;
use crate::resolver;
use crate::version::MajorMinor;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Kind expected in the `kind` field of a metadata document
pub const METADATA_KIND: &str = "Metadata";

const INLINE_SOURCE: &str = "<inline>";

/// Supported document formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Format {
    /// YAML format (.yaml, .yml)
    Yaml,
    /// JSON format (.json)
    Json,
}

impl Format {
    /// Detect format from file extension
    pub fn from_path(path: &Path) -> MetadataResult<Self> {
        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_lowercase)
            .as_deref()
        {
            Some("yaml") | Some("yml") => Ok(Format::Yaml),
            Some("json") => Ok(Format::Json),
            _ => Err(MetadataError::unsupported_format(path.to_path_buf())),
        }
    }
}

/// Release series metadata for a provider repository
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metadata {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub api_version: String,

    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub kind: String,

    /// Maps release series (major/minor) to contract versions
    #[serde(default)]
    pub release_series: Vec<ReleaseSeries>,
}

impl Metadata {
    /// Create metadata from an in-memory table
    pub fn new(release_series: Vec<ReleaseSeries>) -> Self {
        Self {
            api_version: String::new(),
            kind: METADATA_KIND.to_string(),
            release_series,
        }
    }

    /// Release series for a concrete version, matching major and minor exactly
    pub fn release_series_for_version(&self, version: &impl MajorMinor) -> Option<&ReleaseSeries> {
        resolver::release_series_for_version(&self.release_series, version)
    }

    /// Newest release series implementing `contract`, e.g. `v1alpha4`
    pub fn release_series_for_contract(&self, contract: &str) -> Option<&ReleaseSeries> {
        resolver::release_series_for_contract(&self.release_series, contract)
    }

    /// Load a metadata document, detecting the format from the extension
    pub fn load(path: impl AsRef<Path>) -> MetadataResult<Self> {
        let path = path.as_ref();
        let format = Format::from_path(path)?;
        let content = std::fs::read_to_string(path)
            .map_err(|e| MetadataError::io_error(path.to_path_buf(), e))?;

        let metadata = Self::parse(&content, format, path)?;
        debug!(
            path = %path.display(),
            series = metadata.release_series.len(),
            "loaded metadata"
        );
        Ok(metadata)
    }

    /// Parse a YAML metadata document
    pub fn from_yaml_str(content: &str) -> MetadataResult<Self> {
        Self::parse(content, Format::Yaml, Path::new(INLINE_SOURCE))
    }

    /// Parse a JSON metadata document
    pub fn from_json_str(content: &str) -> MetadataResult<Self> {
        Self::parse(content, Format::Json, Path::new(INLINE_SOURCE))
    }

    /// Serialize as YAML
    pub fn to_yaml_string(&self) -> MetadataResult<String> {
        serde_yaml::to_string(self)
            .map_err(|e| MetadataError::yaml_parse_error(PathBuf::from(INLINE_SOURCE), e))
    }

    fn parse(content: &str, format: Format, path: &Path) -> MetadataResult<Self> {
        let metadata: Metadata = match format {
            Format::Yaml => serde_yaml::from_str(content)
                .map_err(|e| MetadataError::yaml_parse_error(path.to_path_buf(), e))?,
            Format::Json => serde_json::from_str(content)
                .map_err(|e| MetadataError::json_parse_error(path.to_path_buf(), e))?,
        };

        if !metadata.kind.is_empty() && metadata.kind != METADATA_KIND {
            return Err(MetadataError::invalid(
                path.to_path_buf(),
                format!("expected kind '{}', found '{}'", METADATA_KIND, metadata.kind),
            ));
        }

        Ok(metadata)
    }
}
