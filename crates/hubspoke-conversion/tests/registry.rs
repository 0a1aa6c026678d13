//! Verifying several specs through one registry


use hubspoke_conversion::hubspoke_fuzz::{Fuzz, Fuzzer, Result};
use hubspoke_conversion::{
    ConversionError, ConversionRegistry, ConversionSpec, VerifierConfig, VerifyError,
};
use pretty_assertions::assert_eq;
use serde::Serialize;
use test_support::{cluster_configuration_spec, init_tracing};

#[derive(Debug, Clone, PartialEq, Serialize)]
struct Port(u16);

impl Fuzz for Port {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(Port(f.generate()?))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
struct LegacyPort(u32);

impl Fuzz for LegacyPort {
    fn fuzz_no_custom(f: &mut Fuzzer<'_>) -> Result<Self> {
        Ok(LegacyPort(f.generate()?))
    }
}

fn port_spec(name: &str) -> ConversionSpec<Port, LegacyPort> {
    ConversionSpec::from_fns(
        name,
        |legacy: &LegacyPort| {
            u16::try_from(legacy.0)
                .map(Port)
                .map_err(|e| ConversionError::field("port", "out of range").with_source(e))
        },
        |port: &Port| Ok(LegacyPort(u32::from(port.0))),
    )
    .with_generator(|legacy: &mut LegacyPort, _| {
        legacy.0 %= u32::from(u16::MAX) + 1;
        Ok(())
    })
}

/// Legacy ports wider than `u16` fail the forward conversion
fn unpinned_port_spec(name: &str) -> ConversionSpec<Port, LegacyPort> {
    ConversionSpec::from_fns(
        name,
        |legacy: &LegacyPort| {
            u16::try_from(legacy.0)
                .map(Port)
                .map_err(|e| ConversionError::field("port", "out of range").with_source(e))
        },
        |port: &Port| Ok(LegacyPort(u32::from(port.0))),
    )
}

fn registry() -> ConversionRegistry {
    let mut registry = ConversionRegistry::new();
    registry
        .register(cluster_configuration_spec())
        .unwrap()
        .register(port_spec("Port"))
        .unwrap();
    registry
}

#[test]
fn test_duplicate_names_are_rejected() {
    let mut registry = registry();
    let err = registry.register(port_spec("Port")).unwrap_err();
    assert!(matches!(err, VerifyError::DuplicateSpec { ref spec } if spec == "Port"));
    assert_eq!(registry.len(), 2);
}

#[test]
fn test_reports_follow_registration_order() {
    init_tracing();

    let registry = registry();
    assert_eq!(registry.names(), vec!["ClusterConfiguration", "Port"]);

    let config = VerifierConfig::default().with_trials(100).with_seed(7);
    let reports = registry.verify_all(&config).unwrap();
    let names: Vec<&str> = reports.iter().map(|r| r.spec.as_str()).collect();
    assert_eq!(names, vec!["ClusterConfiguration", "Port"]);
    assert!(reports.iter().all(|r| r.base_seed == 7 && r.trials == 100));
}

#[test]
fn test_first_failing_spec_is_reported() {
    init_tracing();

    let mut registry = registry();
    registry.register(unpinned_port_spec("UnpinnedPort")).unwrap();

    let config = VerifierConfig::default().with_trials(100).with_seed(7);
    let err = registry.verify_all(&config).unwrap_err();
    assert_eq!(err.spec(), "UnpinnedPort");
    assert!(matches!(err, VerifyError::Conversion { .. }), "{}", err);
}

#[test]
fn test_verify_single_spec_by_name() {
    let registry = registry();
    let config = VerifierConfig::default().with_trials(10).with_seed(3);

    let report = registry.verify("Port", &config).unwrap().unwrap();
    assert_eq!(report.spec, "Port");
    assert!(registry.verify("Missing", &config).is_none());
}

#[test]
fn test_empty_registry_verifies_nothing() {
    let registry = ConversionRegistry::new();
    assert!(registry.is_empty());
    assert!(registry
        .verify_all(&VerifierConfig::default())
        .unwrap()
        .is_empty());
}

#[test]
fn test_parallel_request_matches_sequential() {
    init_tracing();

    // Without the `parallel` feature this falls back to sequential execution
    let registry = registry();
    let sequential = VerifierConfig::default().with_trials(50).with_seed(99);
    let parallel = sequential.clone().with_parallel(true);

    assert_eq!(
        registry.verify_all(&sequential).unwrap(),
        registry.verify_all(&parallel).unwrap()
    );
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_reports_keep_registration_order() {
    init_tracing();

    let mut registry = registry();
    registry.register(port_spec("SecondPort")).unwrap();
    let config = VerifierConfig::default()
        .with_trials(50)
        .with_seed(5)
        .with_parallel(true);

    let reports = registry.verify_all(&config).unwrap();
    let names: Vec<&str> = reports.iter().map(|r| r.spec.as_str()).collect();
    assert_eq!(names, vec!["ClusterConfiguration", "Port", "SecondPort"]);
}

#[cfg(feature = "parallel")]
#[test]
fn test_parallel_failure_is_first_in_registration_order() {
    init_tracing();

    let mut registry = registry();
    registry
        .register(unpinned_port_spec("UnpinnedPort"))
        .unwrap()
        .register(unpinned_port_spec("AlsoUnpinned"))
        .unwrap();
    let config = VerifierConfig::default()
        .with_trials(100)
        .with_seed(7)
        .with_parallel(true);

    for _ in 0..5 {
        let err = registry.verify_all(&config).unwrap_err();
        assert_eq!(err.spec(), "UnpinnedPort");
    }
}
