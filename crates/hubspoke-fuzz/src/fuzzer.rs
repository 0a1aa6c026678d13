//! The seeded generator driving `Fuzz` implementations
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::config::FuzzConfig;
use crate::error::{GenerationError, Result};
use crate::funcs::FuzzerFuncs;
use crate::Fuzz;
use rand::distributions::Alphanumeric;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::any::{type_name, TypeId};

const DEFAULT_NIL_CHANCE: f64 = 0.5;

/// Deterministic value generator.
///
/// Two fuzzers built from the same seed, overrides and config produce the
/// same sequence of values. A fuzzer is cheap to build and is meant to be
/// created once per trial and then dropped.
pub struct Fuzzer<'a> {
    rng: ChaCha8Rng,
    funcs: &'a FuzzerFuncs,
    config: &'a FuzzConfig,
    seed: u64,
    depth: usize,
}

impl<'a> Fuzzer<'a> {
    pub fn new(seed: u64, funcs: &'a FuzzerFuncs, config: &'a FuzzConfig) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            funcs,
            config,
            seed,
            depth: 0,
        }
    }

    /// Seed this fuzzer was created with
    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &FuzzConfig {
        self.config
    }

    /// Current nesting depth
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// True once nesting has reached `max_depth`; optional values and
    /// collections generate as empty from here on
    pub fn at_depth_limit(&self) -> bool {
        self.depth >= self.config.max_depth
    }

    /// True once nesting has gone past twice `max_depth` without reaching an
    /// optional value or a collection that could end the recursion
    pub fn past_depth_ceiling(&self) -> bool {
        self.depth > self.config.max_depth.saturating_mul(2)
    }

    /// Generate a `T`, using the registered override for `T` if there is one.
    pub fn generate<T: Fuzz>(&mut self) -> Result<T> {
        let funcs = self.funcs;
        match funcs.lookup(TypeId::of::<T>()) {
            Some(custom) => {
                if self.past_depth_ceiling() {
                    return Err(GenerationError::DepthExceeded {
                        type_name: type_name::<T>(),
                        max_depth: self.config.max_depth,
                    });
                }
                self.depth += 1;
                let value = (**custom)(self);
                self.depth -= 1;
                value?
                    .downcast::<T>()
                    .map(|boxed| *boxed)
                    .map_err(|_| GenerationError::TypeMismatch {
                        type_name: type_name::<T>(),
                    })
            }
            None => self.generate_no_custom(),
        }
    }

    /// Generate a `T` structurally, skipping any override registered for `T`
    /// itself. Overrides for nested types still apply.
    pub fn generate_no_custom<T: Fuzz>(&mut self) -> Result<T> {
        self.depth += 1;
        let result = T::fuzz_no_custom(self);
        self.depth -= 1;
        result
    }

    /// Direct access to the random source for custom generators
    pub fn rng(&mut self) -> &mut ChaCha8Rng {
        &mut self.rng
    }

    /// Decide whether an optional value should be left empty
    pub fn should_be_none(&mut self) -> bool {
        let chance = self.config.nil_chance;
        let chance = if (0.0..=1.0).contains(&chance) {
            chance
        } else {
            DEFAULT_NIL_CHANCE
        };
        self.rng.gen_bool(chance)
    }

    /// Number of elements for the next generated collection
    pub fn element_count(&mut self) -> usize {
        let low = self.config.min_elements.min(self.config.max_elements);
        let high = self.config.max_elements.max(self.config.min_elements);
        self.rng.gen_range(low..=high)
    }

    /// Random alphanumeric string of up to `max_string_len` characters
    pub fn string(&mut self) -> String {
        let len = self.rng.gen_range(0..=self.config.max_string_len);
        (&mut self.rng)
            .sample_iter(&Alphanumeric)
            .take(len)
            .map(char::from)
            .collect()
    }

    /// Pick one of `items`; fails when `items` is empty
    pub fn choose<'b, T>(&mut self, items: &'b [T]) -> Result<&'b T> {
        items.choose(&mut self.rng).ok_or(GenerationError::EmptyChoice {
            type_name: type_name::<T>(),
        })
    }

    /// Pick one of `items` by value
    pub fn choose_copied<T: Copy>(&mut self, items: &[T]) -> Result<T> {
        self.choose(items).copied()
    }
}

impl std::fmt::Debug for Fuzzer<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fuzzer")
            .field("seed", &self.seed)
            .field("depth", &self.depth)
            .field("overrides", &self.funcs.len())
            .finish()
    }
}
