//! Hubspoke Fuzz - seeded structural value generation
//!
//! Types opt in by implementing [`Fuzz`], which builds a value field by field
//! from a [`Fuzzer`]. The fuzzer owns a ChaCha8 random source seeded from a
//! single `u64`, so any generated value can be rebuilt from its seed.
//!
//! Custom generators are registered per type in a [`FuzzerFuncs`] table and
//! apply wherever that type appears in a generated tree. They are used to pin
//! fields to a canonical value or to keep mutually exclusive fields valid.
//!
//! ```rust
//! use hubspoke_fuzz::{Fuzz, FuzzConfig, Fuzzer, FuzzerFuncs, Result};
//!
//! #[derive(Debug, PartialEq)]
//! struct Endpoint {
//!     host: String,
//!     port: u16,
//!     tags: Vec<String>,
//! }
//!
//! impl Fuzz for Endpoint {
//!     fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
//!         Ok(Self {
//!             host: f.generate()?,
//!             port: f.generate()?,
//!             tags: f.generate()?,
//!         })
//!     }
//! }
//!
//! let funcs = FuzzerFuncs::new();
//! let config = FuzzConfig::default();
//! let a: Endpoint = Fuzzer::new(42, &funcs, &config).generate().unwrap();
//! let b: Endpoint = Fuzzer::new(42, &funcs, &config).generate().unwrap();
//! assert_eq!(a, b);
//! ```
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

pub mod config;
pub mod error;
pub mod funcs;
pub mod fuzzer;
mod impls;

pub use config::FuzzConfig;
pub use error::{GenerationError, Result};
pub use funcs::FuzzerFuncs;
pub use fuzzer::Fuzzer;

/// Types the generator can build.
///
/// Implementations should generate every field through [`Fuzzer::generate`]
/// so that overrides registered for nested types take effect.
pub trait Fuzz: Sized + 'static {
    /// Build a value structurally, without consulting an override for `Self`
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self>;
}
