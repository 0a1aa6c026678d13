//! Declaring a hub/spoke pair for round-trip verification
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::annotation::{strip_data_annotation, Annotated};
use crate::convertible::Convertible;
use crate::error::ConversionError;
use crate::normalize::NormalizationRule;
use hubspoke_fuzz::{Fuzz, Fuzzer, FuzzerFuncs};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Bounds a hub or spoke type needs to take part in verification
pub trait Subject: Fuzz + Clone + PartialEq + fmt::Debug + Serialize {}

impl<T> Subject for T where T: Fuzz + Clone + PartialEq + fmt::Debug + Serialize {}

pub(crate) type ConvertFn<A, B> = Arc<dyn Fn(&A) -> Result<B, ConversionError> + Send + Sync>;
pub(crate) type Mutation<T> = Arc<dyn Fn(&mut T) + Send + Sync>;

/// Everything the verifier needs to know about one hub/spoke pair.
///
/// Built per test case, consumed by [`crate::verify`] or a
/// [`crate::ConversionRegistry`].
///
/// ```rust
/// use hubspoke_conversion::{ConversionError, ConversionSpec, Convertible, VerifierConfig, verify};
/// use hubspoke_fuzz::{Fuzz, Fuzzer, Result};
/// use serde::Serialize;
///
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// struct Hub { name: String }
///
/// #[derive(Debug, Clone, PartialEq, Serialize)]
/// struct Spoke { name: String, legacy: bool }
///
/// impl Fuzz for Hub {
///     fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
///         Ok(Hub { name: f.generate()? })
///     }
/// }
///
/// impl Fuzz for Spoke {
///     fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
///         Ok(Spoke { name: f.generate()?, legacy: f.generate()? })
///     }
/// }
///
/// impl Convertible<Hub> for Spoke {
///     fn convert_to(&self) -> std::result::Result<Hub, ConversionError> {
///         Ok(Hub { name: self.name.clone() })
///     }
///
///     fn convert_from(hub: &Hub) -> std::result::Result<Self, ConversionError> {
///         Ok(Spoke { name: hub.name.clone(), legacy: false })
///     }
/// }
///
/// let spec = ConversionSpec::<Hub, Spoke>::new("Widget")
///     .exclude_spoke("legacy", |s| s.legacy = false);
///
/// let report = verify(&spec, &VerifierConfig::default().with_trials(50)).unwrap();
/// assert_eq!(report.trials, 50);
/// ```
pub struct ConversionSpec<H, S> {
    name: String,
    to_hub: ConvertFn<S, H>,
    from_hub: ConvertFn<H, S>,
    spoke_rules: Vec<NormalizationRule<S>>,
    hub_rules: Vec<NormalizationRule<H>>,
    spoke_after_mutation: Vec<Mutation<S>>,
    hub_after_mutation: Vec<Mutation<H>>,
    spoke_cleanup: Option<Mutation<S>>,
    funcs: FuzzerFuncs,
}

impl<H, S> ConversionSpec<H, S>
where
    H: 'static,
    S: 'static,
{
    /// Spec for a spoke type that implements [`Convertible`] to its hub
    pub fn new(name: impl Into<String>) -> Self
    where
        S: Convertible<H>,
    {
        Self::from_fns(
            name,
            |spoke: &S| <S as Convertible<H>>::convert_to(spoke),
            |hub: &H| <S as Convertible<H>>::convert_from(hub),
        )
    }

    /// Spec built from a pair of free conversion functions
    pub fn from_fns<F, G>(name: impl Into<String>, to_hub: F, from_hub: G) -> Self
    where
        F: Fn(&S) -> Result<H, ConversionError> + Send + Sync + 'static,
        G: Fn(&H) -> Result<S, ConversionError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            to_hub: Arc::new(to_hub),
            from_hub: Arc::new(from_hub),
            spoke_rules: Vec::new(),
            hub_rules: Vec::new(),
            spoke_after_mutation: Vec::new(),
            hub_after_mutation: Vec::new(),
            spoke_cleanup: None,
            funcs: FuzzerFuncs::new(),
        }
    }

    /// Pin a spoke field that has no hub counterpart
    pub fn exclude_spoke<F>(mut self, field: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        self.spoke_rules.push(NormalizationRule::new(field, rule));
        self
    }

    /// Pin a hub field that has no spoke counterpart
    pub fn exclude_hub<F>(mut self, field: impl Into<String>, rule: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        self.hub_rules.push(NormalizationRule::new(field, rule));
        self
    }

    /// Fix up the spoke after spoke → hub → spoke, before comparison
    pub fn spoke_after_mutation<F>(mut self, mutation: F) -> Self
    where
        F: Fn(&mut S) + Send + Sync + 'static,
    {
        self.spoke_after_mutation.push(Arc::new(mutation));
        self
    }

    /// Fix up the hub after hub → spoke → hub, before comparison
    pub fn hub_after_mutation<F>(mut self, mutation: F) -> Self
    where
        F: Fn(&mut H) + Send + Sync + 'static,
    {
        self.hub_after_mutation.push(Arc::new(mutation));
        self
    }

    /// Add generator overrides; on conflict the new ones win
    pub fn with_fuzzer_funcs(mut self, funcs: &FuzzerFuncs) -> Self {
        self.funcs.merge(funcs);
        self
    }

    /// Register a "generate then pin" override for `T`, see
    /// [`FuzzerFuncs::register`]
    pub fn with_generator<T, F>(mut self, pin: F) -> Self
    where
        T: Fuzz,
        F: Fn(&mut T, &mut Fuzzer<'_>) -> hubspoke_fuzz::Result<()> + Send + Sync + 'static,
    {
        self.funcs.register::<T, F>(pin);
        self
    }

    /// Remove the conversion-data annotation from the round-tripped spoke
    pub fn with_spoke_annotation_cleanup(mut self) -> Self
    where
        S: Annotated,
    {
        self.spoke_cleanup = Some(Arc::new(|spoke: &mut S| strip_data_annotation(spoke)));
        self
    }

    /// Keep the conversion-data annotation on the round-tripped spoke
    pub fn skip_spoke_annotation_cleanup(mut self) -> Self {
        self.spoke_cleanup = None;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn funcs(&self) -> &FuzzerFuncs {
        &self.funcs
    }

    pub fn spoke_rules(&self) -> &[NormalizationRule<S>] {
        &self.spoke_rules
    }

    pub fn hub_rules(&self) -> &[NormalizationRule<H>] {
        &self.hub_rules
    }

    pub(crate) fn to_hub(&self, spoke: &S) -> Result<H, ConversionError> {
        (self.to_hub)(spoke)
    }

    pub(crate) fn from_hub(&self, hub: &H) -> Result<S, ConversionError> {
        (self.from_hub)(hub)
    }

    /// Annotation cleanup, normalization and after-mutation hooks for a
    /// round-tripped spoke
    pub(crate) fn finish_spoke(&self, spoke: &mut S) {
        if let Some(cleanup) = &self.spoke_cleanup {
            cleanup(spoke);
        }
        crate::normalize::normalize(&self.spoke_rules, spoke);
        for mutation in &self.spoke_after_mutation {
            mutation(spoke);
        }
    }

    /// Normalization and after-mutation hooks for a round-tripped hub
    pub(crate) fn finish_hub(&self, hub: &mut H) {
        crate::normalize::normalize(&self.hub_rules, hub);
        for mutation in &self.hub_after_mutation {
            mutation(hub);
        }
    }
}

impl<H, S> fmt::Debug for ConversionSpec<H, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConversionSpec")
            .field("name", &self.name)
            .field("hub", &std::any::type_name::<H>())
            .field("spoke", &std::any::type_name::<S>())
            .field("spoke_rules", &self.spoke_rules)
            .field("hub_rules", &self.hub_rules)
            .field("spoke_annotation_cleanup", &self.spoke_cleanup.is_some())
            .field("overrides", &self.funcs.type_names())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Hub {
        replicas: u32,
    }

    #[derive(Debug, Clone, PartialEq, Default)]
    struct Spoke {
        replicas: u32,
        paused: bool,
        annotations: BTreeMap<String, String>,
    }

    impl Annotated for Spoke {
        fn annotations(&self) -> &BTreeMap<String, String> {
            &self.annotations
        }

        fn annotations_mut(&mut self) -> &mut BTreeMap<String, String> {
            &mut self.annotations
        }
    }

    fn spec() -> ConversionSpec<Hub, Spoke> {
        ConversionSpec::from_fns(
            "Deployment",
            |s: &Spoke| Ok(Hub { replicas: s.replicas }),
            |h: &Hub| {
                Ok(Spoke {
                    replicas: h.replicas,
                    ..Spoke::default()
                })
            },
        )
    }

    #[test]
    fn test_finish_spoke_order() {
        let spec = spec()
            .exclude_spoke("paused", |s| s.paused = false)
            .spoke_after_mutation(|s| s.replicas *= 2)
            .with_spoke_annotation_cleanup();

        let mut spoke = Spoke {
            replicas: 3,
            paused: true,
            annotations: BTreeMap::from([(
                crate::annotation::DATA_ANNOTATION.to_string(),
                "{}".to_string(),
            )]),
        };
        spec.finish_spoke(&mut spoke);
        assert_eq!(spoke, Spoke { replicas: 6, ..Spoke::default() });
    }

    #[test]
    fn test_cleanup_can_be_skipped() {
        let spec = spec()
            .with_spoke_annotation_cleanup()
            .skip_spoke_annotation_cleanup();
        let mut spoke = Spoke::default();
        spoke
            .annotations
            .insert(crate::annotation::DATA_ANNOTATION.to_string(), "{}".to_string());
        spec.finish_spoke(&mut spoke);
        assert_eq!(spoke.annotations.len(), 1);
    }

    #[test]
    fn test_conversion_fns_are_called() {
        let spec = spec();
        let hub = spec
            .to_hub(&Spoke {
                replicas: 4,
                ..Spoke::default()
            })
            .unwrap();
        assert_eq!(hub, Hub { replicas: 4 });
        assert_eq!(spec.from_hub(&hub).unwrap().replicas, 4);
    }

    #[test]
    fn test_debug_lists_rules() {
        let spec = spec().exclude_hub("replicas", |h| h.replicas = 0);
        let text = format!("{:?}", spec);
        assert!(text.contains("Deployment"));
        assert!(text.contains("replicas"));
        assert_eq!(spec.hub_rules().len(), 1);
        assert!(spec.spoke_rules().is_empty());
    }
}
