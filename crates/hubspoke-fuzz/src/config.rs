//! Generator tuning knobs
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use serde::{Deserialize, Serialize};

/// Shape limits applied by the generator
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FuzzConfig {
    /// Probability that an `Option` is generated as `None`
    pub nil_chance: f64,

    /// Minimum number of elements in generated collections
    pub min_elements: usize,

    /// Maximum number of elements in generated collections
    pub max_elements: usize,

    /// Maximum length of generated strings, in characters
    pub max_string_len: usize,

    /// Maximum nesting depth. Optional values and collections collapse to
    /// empty at this depth; boxed recursion that goes twice as deep is a
    /// generation failure
    pub max_depth: usize,
}

impl Default for FuzzConfig {
    fn default() -> Self {
        Self {
            nil_chance: 0.5,
            min_elements: 0,
            max_elements: 1,
            max_string_len: 20,
            max_depth: 16,
        }
    }
}

impl FuzzConfig {
    pub fn with_nil_chance(mut self, nil_chance: f64) -> Self {
        self.nil_chance = nil_chance.clamp(0.0, 1.0);
        self
    }

    pub fn with_elements(mut self, min: usize, max: usize) -> Self {
        self.min_elements = min.min(max);
        self.max_elements = max.max(min);
        self
    }

    pub fn with_max_string_len(mut self, max_string_len: usize) -> Self {
        self.max_string_len = max_string_len;
        self
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}
