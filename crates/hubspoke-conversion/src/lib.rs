//! Hubspoke Conversion - randomized round-trip verification
//!
//! A versioned schema has one hub version and several spoke versions, each
//! converting to and from the hub. This crate checks that those conversions
//! are lossless: random instances are generated on either side, converted to
//! the other side and back, and compared structurally after the fields that
//! legitimately cannot survive the trip have been normalized away.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use hubspoke_conversion::{ConversionRegistry, VerifierConfig};
//! # fn specs() -> ConversionRegistry { ConversionRegistry::new() }
//!
//! let registry = specs();
//! let config = VerifierConfig::from_env();
//! match registry.verify_all(&config) {
//!     Ok(reports) => {
//!         for report in reports {
//!             println!("{}", report);
//!         }
//!     }
//!     Err(err) => {
//!         eprintln!("{}", err);
//!         if let Some(seed) = err.seed() {
//!             eprintln!("replay with HUBSPOKE_SEED={} HUBSPOKE_TRIALS=1", seed);
//!         }
//!     }
//! }
//! ```
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

pub mod annotation;
pub mod config;
pub mod convertible;
pub mod diff;
pub mod error;
pub mod normalize;
pub mod registry;
pub mod spec;
pub mod verifier;

pub use annotation::{marshal_data, strip_data_annotation, unmarshal_data, Annotated, DATA_ANNOTATION};
pub use config::VerifierConfig;
pub use convertible::Convertible;
pub use error::{ConversionError, Direction, Stage, VerifyError, VerifyResult};
pub use normalize::{normalize, NormalizationRule};
pub use registry::ConversionRegistry;
pub use spec::{ConversionSpec, Subject};
pub use verifier::{verify, VerificationReport};

// Re-export the generator so spec authors need a single dependency
pub use hubspoke_fuzz;
