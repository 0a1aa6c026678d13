//! Normalization rules: pinning fields that cannot round-trip
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use std::fmt;
use std::sync::Arc;

/// Forces one field of a `T` to a canonical don't-care value.
///
/// Rules exist for fields that by design live on only one side of a
/// conversion, such as a field deprecated in the newer schema. They must be
/// idempotent: applying a rule to an already normalized value leaves it
/// unchanged.
pub struct NormalizationRule<T> {
    name: String,
    apply: Arc<dyn Fn(&mut T) + Send + Sync>,
}

impl<T> NormalizationRule<T> {
    /// Create a rule; `name` should identify the pinned field, e.g. `dns.type`
    pub fn new<F>(name: impl Into<String>, apply: F) -> Self
    where
        F: Fn(&mut T) + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            apply: Arc::new(apply),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn apply(&self, value: &mut T) {
        (self.apply)(value)
    }

    /// True when applying the rule to `value` twice gives the same result as
    /// applying it once. Returns the two results for reporting.
    pub fn is_idempotent_on(&self, value: &T) -> Result<(), (T, T)>
    where
        T: Clone + PartialEq,
    {
        let mut once = value.clone();
        self.apply(&mut once);
        let mut twice = once.clone();
        self.apply(&mut twice);
        if once == twice {
            Ok(())
        } else {
            Err((once, twice))
        }
    }
}

impl<T> Clone for NormalizationRule<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            apply: Arc::clone(&self.apply),
        }
    }
}

impl<T> fmt::Debug for NormalizationRule<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NormalizationRule")
            .field("name", &self.name)
            .finish()
    }
}

/// Apply every rule in order
pub fn normalize<T>(rules: &[NormalizationRule<T>], value: &mut T) {
    for rule in rules {
        rule.apply(value);
    }
}
