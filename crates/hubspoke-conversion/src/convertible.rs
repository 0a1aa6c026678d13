//! The conversion contract between a spoke version and its hub
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::error::ConversionError;

/// A spoke type that converts to and from its hub type `H`.
///
/// Conversions are expected to be lossless up to the fields pinned by
/// normalization rules. Data that only exists on one side can be carried
/// across in an annotation, see [`crate::annotation`].
pub trait Convertible<H>: Sized {
    /// Convert this spoke value into the hub version
    fn convert_to(&self) -> Result<H, ConversionError>;

    /// Build a spoke value from the hub version
    fn convert_from(hub: &H) -> Result<Self, ConversionError>;
}
