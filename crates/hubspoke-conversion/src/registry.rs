//! An explicit collection of conversion specs verified together
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::config::VerifierConfig;
use crate::error::{VerifyError, VerifyResult};
use crate::spec::{ConversionSpec, Subject};
use crate::verifier::{verify, VerificationReport};
use tracing::{info, warn};

/// A spec with its hub and spoke types erased
trait ErasedSpec: Send + Sync {
    fn name(&self) -> &str;
    fn verify(&self, config: &VerifierConfig) -> VerifyResult<VerificationReport>;
}

impl<H, S> ErasedSpec for ConversionSpec<H, S>
where
    H: Subject,
    S: Subject,
{
    fn name(&self) -> &str {
        ConversionSpec::name(self)
    }

    fn verify(&self, config: &VerifierConfig) -> VerifyResult<VerificationReport> {
        verify(self, config)
    }
}

/// Named conversion specs, verified in registration order
#[derive(Default)]
pub struct ConversionRegistry {
    specs: Vec<Box<dyn ErasedSpec>>,
}

impl ConversionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a spec under its name. Names must be unique.
    pub fn register<H, S>(&mut self, spec: ConversionSpec<H, S>) -> VerifyResult<&mut Self>
    where
        H: Subject,
        S: Subject,
    {
        if self.contains(spec.name()) {
            return Err(VerifyError::DuplicateSpec {
                spec: spec.name().to_string(),
            });
        }
        self.specs.push(Box::new(spec));
        Ok(self)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.specs.iter().any(|spec| spec.name() == name)
    }

    /// Registered names, in registration order
    pub fn names(&self) -> Vec<&str> {
        self.specs.iter().map(|spec| spec.name()).collect()
    }

    pub fn len(&self) -> usize {
        self.specs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.specs.is_empty()
    }

    /// Verify one registered spec by name
    pub fn verify(&self, name: &str, config: &VerifierConfig) -> Option<VerifyResult<VerificationReport>> {
        self.specs
            .iter()
            .find(|spec| spec.name() == name)
            .map(|spec| spec.verify(config))
    }

    /// Verify every spec.
    ///
    /// Reports come back in registration order. On failure the error of the
    /// first failing spec in that order is returned, whether or not the specs
    /// ran in parallel.
    pub fn verify_all(&self, config: &VerifierConfig) -> VerifyResult<Vec<VerificationReport>> {
        if self.specs.is_empty() {
            warn!("No conversion specs registered");
            return Ok(Vec::new());
        }

        let reports = if config.parallel {
            self.verify_parallel(config)?
        } else {
            self.specs
                .iter()
                .map(|spec| spec.verify(config))
                .collect::<VerifyResult<Vec<_>>>()?
        };

        info!(specs = reports.len(), "All conversion specs verified");
        Ok(reports)
    }

    #[cfg(feature = "parallel")]
    fn verify_parallel(&self, config: &VerifierConfig) -> VerifyResult<Vec<VerificationReport>> {
        use rayon::iter::{IntoParallelRefIterator, ParallelIterator};

        let results: Vec<_> = self.specs.par_iter().map(|spec| spec.verify(config)).collect();
        results.into_iter().collect()
    }

    #[cfg(not(feature = "parallel"))]
    fn verify_parallel(&self, config: &VerifierConfig) -> VerifyResult<Vec<VerificationReport>> {
        warn!("Parallel verification requested without the `parallel` feature, running sequentially");
        self.specs.iter().map(|spec| spec.verify(config)).collect()
    }
}

impl std::fmt::Debug for ConversionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConversionRegistry")
            .field("specs", &self.names())
            .finish()
    }
}
