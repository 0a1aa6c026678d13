//! Verifier configuration
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::diff::DiffOptions;
use hubspoke_fuzz::FuzzConfig;
use serde::{Deserialize, Serialize};

/// Number of trials per direction when nothing else is configured
pub const DEFAULT_TRIALS: usize = 500;

/// Environment variable overriding [`VerifierConfig::trials`]
pub const ENV_TRIALS: &str = "HUBSPOKE_TRIALS";
/// Environment variable pinning [`VerifierConfig::seed`]
pub const ENV_SEED: &str = "HUBSPOKE_SEED";
/// Environment variable toggling [`VerifierConfig::parallel`]
pub const ENV_PARALLEL: &str = "HUBSPOKE_PARALLEL";

/// Settings for a verification run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VerifierConfig {
    /// Trials per direction
    pub trials: usize,

    /// Base seed. Trial `i` uses `seed + i`; a random base is drawn and logged
    /// when unset
    pub seed: Option<u64>,

    /// Check each normalization rule for idempotence on every generated value
    pub check_idempotence: bool,

    /// Verify registered specs concurrently. Needs the `parallel` feature
    pub parallel: bool,

    /// Context lines around changes in mismatch diffs
    pub diff_context_lines: usize,

    /// Cap on mismatch diff length (0 = unlimited)
    pub max_diff_lines: usize,

    /// Generator shape limits
    pub fuzz: FuzzConfig,
}

impl Default for VerifierConfig {
    fn default() -> Self {
        let diff = DiffOptions::default();
        Self {
            trials: DEFAULT_TRIALS,
            seed: None,
            check_idempotence: true,
            parallel: false,
            diff_context_lines: diff.context_lines,
            max_diff_lines: diff.max_diff_lines,
            fuzz: FuzzConfig::default(),
        }
    }
}

impl VerifierConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults with `HUBSPOKE_*` environment overrides applied
    pub fn from_env() -> Self {
        let mut config = Self::default();
        config.merge_with_env();
        config
    }

    /// Apply `HUBSPOKE_TRIALS`, `HUBSPOKE_SEED` and `HUBSPOKE_PARALLEL`.
    /// Unparseable values are logged and ignored.
    pub fn merge_with_env(&mut self) {
        self.merge_with(|key| std::env::var(key).ok());
    }

    fn merge_with(&mut self, lookup: impl Fn(&str) -> Option<String>) {
        if let Some(trials) = lookup(ENV_TRIALS) {
            match trials.trim().parse() {
                Ok(trials) => self.trials = trials,
                Err(_) => tracing::warn!("Invalid {}: {}, using {}", ENV_TRIALS, trials, self.trials),
            }
        }

        if let Some(seed) = lookup(ENV_SEED) {
            match seed.trim().parse() {
                Ok(seed) => self.seed = Some(seed),
                Err(_) => tracing::warn!("Invalid {}: {}, ignoring", ENV_SEED, seed),
            }
        }

        if let Some(parallel) = lookup(ENV_PARALLEL) {
            self.parallel = parallel.to_lowercase() == "true" || parallel == "1";
        }
    }

    pub fn with_trials(mut self, trials: usize) -> Self {
        self.trials = trials;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_idempotence_check(mut self, enabled: bool) -> Self {
        self.check_idempotence = enabled;
        self
    }

    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    pub fn with_fuzz(mut self, fuzz: FuzzConfig) -> Self {
        self.fuzz = fuzz;
        self
    }

    /// A copy that replays exactly the trial that ran with `seed`
    pub fn reproducing(&self, seed: u64) -> Self {
        Self {
            trials: 1,
            seed: Some(seed),
            ..self.clone()
        }
    }

    /// The configured base seed, or a fresh random one
    pub fn base_seed(&self) -> u64 {
        self.seed.unwrap_or_else(rand::random)
    }

    /// Seed for trial `trial` of a run starting at `base`
    pub fn trial_seed(base: u64, trial: usize) -> u64 {
        base.wrapping_add(trial as u64)
    }

    pub fn diff_options(&self) -> DiffOptions {
        DiffOptions {
            context_lines: self.diff_context_lines,
            max_diff_lines: self.max_diff_lines,
        }
    }
}
