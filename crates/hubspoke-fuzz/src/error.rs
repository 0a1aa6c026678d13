//! Generation errors
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use thiserror::Error;

/// Result type for generator operations
pub type Result<T> = std::result::Result<T, GenerationError>;

/// The generator could not produce a structurally valid value
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GenerationError {
    /// Nesting went past the configured depth
    #[error("Maximum depth {max_depth} exceeded while generating {type_name}")]
    DepthExceeded {
        type_name: &'static str,
        max_depth: usize,
    },

    /// A registered override produced a value of the wrong type
    #[error("Custom generator for {type_name} produced a value of another type")]
    TypeMismatch { type_name: &'static str },

    /// Asked to pick from an empty set of candidates
    #[error("No candidates to choose from while generating {type_name}")]
    EmptyChoice { type_name: &'static str },

    /// A generator rejected the value it was building
    #[error("Invalid {type_name}: {reason}")]
    Invalid {
        type_name: &'static str,
        reason: String,
    },
}

impl GenerationError {
    /// Report that a value of type `T` could not be built
    pub fn invalid<T: ?Sized>(reason: impl Into<String>) -> Self {
        Self::Invalid {
            type_name: std::any::type_name::<T>(),
            reason: reason.into(),
        }
    }

    /// Name of the type being generated when the failure happened
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::DepthExceeded { type_name, .. }
            | Self::TypeMismatch { type_name }
            | Self::EmptyChoice { type_name }
            | Self::Invalid { type_name, .. } => type_name,
        }
    }
}
