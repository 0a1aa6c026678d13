//! Per-type generator overrides
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::error::Result;
use crate::fuzzer::Fuzzer;
use crate::Fuzz;
use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::warn;

pub(crate) type ErasedGenerator =
    Arc<dyn Fn(&mut Fuzzer<'_>) -> Result<Box<dyn Any>> + Send + Sync>;

#[derive(Clone)]
struct Override {
    type_name: &'static str,
    generate: ErasedGenerator,
}

/// Table of custom generators keyed by the type they produce.
///
/// An override applies wherever its type shows up in a generated tree, not
/// only at the root. The usual override generates the value structurally and
/// then pins fields that cannot survive a conversion:
///
/// ```rust
/// use hubspoke_fuzz::{Fuzz, Fuzzer, FuzzerFuncs, FuzzConfig, Result};
///
/// #[derive(Debug)]
/// struct Dns {
///     kind: String,
///     image: String,
/// }
///
/// impl Fuzz for Dns {
///     fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
///         Ok(Self { kind: f.generate()?, image: f.generate()? })
///     }
/// }
///
/// let funcs = FuzzerFuncs::new().with(|dns: &mut Dns, _| {
///     dns.kind = String::new();
///     Ok(())
/// });
///
/// let config = FuzzConfig::default();
/// let mut fuzzer = Fuzzer::new(7, &funcs, &config);
/// let dns: Vec<Dns> = fuzzer.generate().unwrap();
/// assert!(dns.iter().all(|d| d.kind.is_empty()));
/// ```
#[derive(Clone, Default)]
pub struct FuzzerFuncs {
    overrides: HashMap<TypeId, Override>,
}

impl FuzzerFuncs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a "generate then pin" override for `T`.
    ///
    /// `pin` receives a structurally generated `T` and may rewrite any of its
    /// fields, drawing more randomness from the fuzzer if needed. Registering
    /// a second override for the same type replaces the first.
    pub fn register<T, F>(&mut self, pin: F) -> &mut Self
    where
        T: Fuzz,
        F: Fn(&mut T, &mut Fuzzer<'_>) -> Result<()> + Send + Sync + 'static,
    {
        let generate: ErasedGenerator =
            Arc::new(move |fuzzer: &mut Fuzzer<'_>| -> Result<Box<dyn Any>> {
                let mut value = fuzzer.generate_no_custom::<T>()?;
                pin(&mut value, fuzzer)?;
                Ok(Box::new(value) as Box<dyn Any>)
            });
        self.insert::<T>(generate)
    }

    /// Register a generator that builds `T` entirely by itself.
    ///
    /// Used when the structural generator would produce invalid values, e.g.
    /// a union whose members are mutually exclusive.
    pub fn register_generator<T, F>(&mut self, generate: F) -> &mut Self
    where
        T: Fuzz,
        F: Fn(&mut Fuzzer<'_>) -> Result<T> + Send + Sync + 'static,
    {
        let generate: ErasedGenerator =
            Arc::new(move |fuzzer: &mut Fuzzer<'_>| -> Result<Box<dyn Any>> {
                Ok(Box::new(generate(fuzzer)?) as Box<dyn Any>)
            });
        self.insert::<T>(generate)
    }

    /// Builder form of [`FuzzerFuncs::register`]
    pub fn with<T, F>(mut self, pin: F) -> Self
    where
        T: Fuzz,
        F: Fn(&mut T, &mut Fuzzer<'_>) -> Result<()> + Send + Sync + 'static,
    {
        self.register(pin);
        self
    }

    /// Builder form of [`FuzzerFuncs::register_generator`]
    pub fn with_generator<T, F>(mut self, generate: F) -> Self
    where
        T: Fuzz,
        F: Fn(&mut Fuzzer<'_>) -> Result<T> + Send + Sync + 'static,
    {
        self.register_generator(generate);
        self
    }

    /// Copy every override from `other`; overrides in `other` win
    pub fn merge(&mut self, other: &FuzzerFuncs) -> &mut Self {
        for (id, entry) in &other.overrides {
            self.overrides.insert(*id, entry.clone());
        }
        self
    }

    /// Whether an override is registered for `T`
    pub fn contains<T: 'static>(&self) -> bool {
        self.overrides.contains_key(&TypeId::of::<T>())
    }

    pub fn len(&self) -> usize {
        self.overrides.len()
    }

    pub fn is_empty(&self) -> bool {
        self.overrides.is_empty()
    }

    /// Names of the overridden types, sorted
    pub fn type_names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.overrides.values().map(|o| o.type_name).collect();
        names.sort_unstable();
        names
    }

    pub(crate) fn lookup(&self, id: TypeId) -> Option<&ErasedGenerator> {
        self.overrides.get(&id).map(|entry| &entry.generate)
    }

    fn insert<T: 'static>(&mut self, generate: ErasedGenerator) -> &mut Self {
        let name = type_name::<T>();
        let replaced = self.overrides.insert(
            TypeId::of::<T>(),
            Override {
                type_name: name,
                generate,
            },
        );
        if replaced.is_some() {
            warn!(type_name = name, "replacing custom generator");
        }
        self
    }
}

impl fmt::Debug for FuzzerFuncs {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FuzzerFuncs")
            .field("types", &self.type_names())
            .finish()
    }
}
