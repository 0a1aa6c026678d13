//! Hubspoke Contract - release series and contract resolution
//!
//! A compatibility table declares which contract (an API version token such
//! as `v1beta1`) each release line of a component implements. This crate
//! answers two questions against such a table:
//!
//! - which release series does a concrete version belong to?
//! - which is the newest release series implementing a given contract?
//!
//! ## Quick Start
//!
//! ```rust
//! use hubspoke_contract::{Metadata, ReleaseSeries, Version};
//!
//! let metadata = Metadata::new(vec![
//!     ReleaseSeries::new(1, 0, "v1alpha3"),
//!     ReleaseSeries::new(1, 1, "v1alpha3"),
//!     ReleaseSeries::new(1, 2, "v1beta1"),
//! ]);
//!
//! let newest = metadata.release_series_for_contract("v1alpha3").unwrap();
//! assert_eq!((newest.major, newest.minor), (1, 1));
//!
//! let version = Version::parse("v1.2.5").unwrap();
//! let series = metadata.release_series_for_version(&version).unwrap();
//! assert_eq!(series.contract, "v1beta1");
//!
//! assert!(metadata.release_series_for_contract("v1alpha4").is_none());
//! ```
//!
//! Neither lookup fails: absence is reported as `None` and the caller
//! decides whether that is fatal.
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

pub mod error;
pub mod metadata;
pub mod release;
pub mod resolver;
pub mod version;

pub use error::{MetadataError, MetadataResult};
pub use metadata::{Format, Metadata, METADATA_KIND};
pub use release::ReleaseSeries;
pub use resolver::{release_series_for_contract, release_series_for_version};
pub use version::{MajorMinor, Version, VersionError};
