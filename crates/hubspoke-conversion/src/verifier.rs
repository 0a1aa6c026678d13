//! Randomized round-trip verification
//!
//! Each trial generates a spoke and runs spoke → hub → spoke, then generates
//! a hub and runs hub → spoke → hub. Both sides are normalized with their
//! exclusion rules before the structural comparison.
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::config::VerifierConfig;
use crate::diff;
use crate::error::{ConversionError, Direction, Stage, VerifyError, VerifyResult};
use crate::normalize::{normalize, NormalizationRule};
use crate::spec::{ConversionSpec, Subject};
use hubspoke_fuzz::{Fuzzer, FuzzerFuncs};
use std::fmt;
use tracing::{debug, error, info, instrument, warn};

/// Summary of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerificationReport {
    pub spec: String,
    /// Trial `i` ran with seed `base_seed + i`
    pub base_seed: u64,
    /// Trials per direction
    pub trials: usize,
    pub directions: Vec<Direction>,
}

impl fmt::Display for VerificationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let directions: Vec<String> = self.directions.iter().map(ToString::to_string).collect();
        write!(
            f,
            "{}: {} trials passed [{}] (base seed {})",
            self.spec,
            self.trials,
            directions.join(", "),
            self.base_seed
        )
    }
}

/// Where a single round trip sits in a run
struct Trial<'a> {
    spec: &'a str,
    direction: Direction,
    trial: usize,
    seed: u64,
}

impl Trial<'_> {
    fn conversion_failed(&self, stage: Stage, source: ConversionError) -> VerifyError {
        VerifyError::Conversion {
            spec: self.spec.to_string(),
            direction: self.direction,
            stage,
            trial: self.trial,
            seed: self.seed,
            source,
        }
    }
}

/// Run every trial of `spec` in both directions.
///
/// Stops at the first failing trial. The returned error carries the seed of
/// that trial; `config.reproducing(seed)` replays it alone.
#[instrument(skip_all, fields(spec = %spec.name()))]
pub fn verify<H, S>(spec: &ConversionSpec<H, S>, config: &VerifierConfig) -> VerifyResult<VerificationReport>
where
    H: Subject,
    S: Subject,
{
    let base_seed = config.base_seed();
    if config.trials == 0 {
        warn!("Trial count is zero, nothing verified");
        return Ok(VerificationReport {
            spec: spec.name().to_string(),
            base_seed,
            trials: 0,
            directions: Vec::new(),
        });
    }

    info!(base_seed, trials = config.trials, "Verifying round trips");

    for trial in 0..config.trials {
        let seed = VerifierConfig::trial_seed(base_seed, trial);
        debug!(trial, seed, "Running trial");

        round_trip(
            &Trial {
                spec: spec.name(),
                direction: Direction::SpokeHubSpoke,
                trial,
                seed,
            },
            config,
            spec.funcs(),
            spec.spoke_rules(),
            |spoke: &S| spec.to_hub(spoke),
            |hub: &H| spec.from_hub(hub),
            |spoke: &mut S| spec.finish_spoke(spoke),
        )?;

        round_trip(
            &Trial {
                spec: spec.name(),
                direction: Direction::HubSpokeHub,
                trial,
                seed,
            },
            config,
            spec.funcs(),
            spec.hub_rules(),
            |hub: &H| spec.from_hub(hub),
            |spoke: &S| spec.to_hub(spoke),
            |hub: &mut H| spec.finish_hub(hub),
        )?;
    }

    info!(base_seed, trials = config.trials, "Round trips verified");

    Ok(VerificationReport {
        spec: spec.name().to_string(),
        base_seed,
        trials: config.trials,
        directions: vec![Direction::SpokeHubSpoke, Direction::HubSpokeHub],
    })
}

/// Generate an `A`, take it through `B` and back, and compare
fn round_trip<A, B, F, G, N>(
    ctx: &Trial<'_>,
    config: &VerifierConfig,
    funcs: &FuzzerFuncs,
    rules: &[NormalizationRule<A>],
    forward: F,
    backward: G,
    finish: N,
) -> VerifyResult<()>
where
    A: Subject,
    F: Fn(&A) -> Result<B, ConversionError>,
    G: Fn(&B) -> Result<A, ConversionError>,
    N: Fn(&mut A),
{
    let mut fuzzer = Fuzzer::new(ctx.seed, funcs, &config.fuzz);
    let mut original: A = fuzzer.generate().map_err(|source| {
        error!(direction = %ctx.direction, seed = ctx.seed, "Generation failed: {}", source);
        VerifyError::Generation {
            spec: ctx.spec.to_string(),
            direction: ctx.direction,
            trial: ctx.trial,
            seed: ctx.seed,
            source,
        }
    })?;

    if config.check_idempotence {
        for rule in rules {
            if let Err((once, twice)) = rule.is_idempotent_on(&original) {
                let report = diff::describe(&once, &twice, &config.diff_options());
                error!(
                    direction = %ctx.direction,
                    seed = ctx.seed,
                    rule = rule.name(),
                    "Normalization rule is not idempotent\n{}",
                    report
                );
                return Err(VerifyError::NonIdempotentRule {
                    spec: ctx.spec.to_string(),
                    direction: ctx.direction,
                    trial: ctx.trial,
                    seed: ctx.seed,
                    rule: rule.name().to_string(),
                    path: report.path,
                });
            }
        }
    }

    normalize(rules, &mut original);

    let converted = forward(&original).map_err(|e| ctx.conversion_failed(Stage::Forward, e))?;
    let mut restored = backward(&converted).map_err(|e| ctx.conversion_failed(Stage::Backward, e))?;
    finish(&mut restored);

    if restored == original {
        return Ok(());
    }

    let report = diff::describe(&original, &restored, &config.diff_options());
    error!(
        direction = %ctx.direction,
        trial = ctx.trial,
        seed = ctx.seed,
        "Round trip mismatch\n{}",
        report
    );
    Err(VerifyError::Mismatch {
        spec: ctx.spec.to_string(),
        direction: ctx.direction,
        trial: ctx.trial,
        seed: ctx.seed,
        path: report.path,
        diff: report.diff,
    })
}
