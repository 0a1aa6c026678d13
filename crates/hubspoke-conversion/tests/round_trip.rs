//! Round-trip verification of a realistic hub/spoke pair


use hubspoke_conversion::{
    verify, ConversionSpec, Convertible, Direction, VerifierConfig, VerifyError, DATA_ANNOTATION,
};
use pretty_assertions::assert_eq;
use test_support::{cluster_configuration_spec, hub, init_tracing, spoke};

fn config() -> VerifierConfig {
    VerifierConfig::default().with_trials(300).with_seed(20_250_101)
}

#[test]
fn test_cluster_configuration_round_trips() {
    init_tracing();

    let report = verify(&cluster_configuration_spec(), &config()).unwrap();
    assert_eq!(report.spec, "ClusterConfiguration");
    assert_eq!(report.trials, 300);
    assert_eq!(report.base_seed, 20_250_101);
}

#[test]
fn test_unpinned_nested_field_is_reported() {
    init_tracing();

    // Same pair, but the removed DNS type is left to the generator
    let spec = ConversionSpec::<hub::ClusterConfiguration, spoke::ClusterConfiguration>::new(
        "ClusterConfiguration",
    )
    .exclude_spoke("useHyperKubeImage", |c| c.use_hyperkube_image = false)
    .with_spoke_annotation_cleanup();

    let err = verify(&spec, &config()).unwrap_err();
    assert!(matches!(err, VerifyError::Mismatch { .. }), "{}", err);
    assert_eq!(err.direction(), Some(Direction::SpokeHubSpoke));
    assert_eq!(err.path(), Some("$.dns.type"));
}

#[test]
fn test_nested_override_applies_to_every_instance() {
    use hubspoke_conversion::hubspoke_fuzz::{FuzzConfig, Fuzzer};

    let spec = cluster_configuration_spec();
    let fuzz = FuzzConfig::default();
    for seed in 0..50 {
        let mut fuzzer = Fuzzer::new(seed, spec.funcs(), &fuzz);
        let generated: Vec<spoke::ClusterConfiguration> = fuzzer.generate().unwrap();
        assert!(generated.iter().all(|c| c.dns.kind.is_empty()));
    }
}

#[test]
fn test_conversion_data_survives_the_spoke() {
    let original = hub::ClusterConfiguration {
        annotations: Default::default(),
        kubernetes_version: "v1.16.0".to_string(),
        dns: hub::Dns {
            image_repository: "registry.k8s.io".to_string(),
            image_tag: "1.6.2".to_string(),
        },
        etcd: None,
        ignore_preflight_errors: vec!["Swap".to_string(), "NumCPU".to_string()],
    };

    let spoke = spoke::ClusterConfiguration::convert_from(&original).unwrap();
    assert!(spoke.annotations.contains_key(DATA_ANNOTATION));

    let restored = spoke.convert_to().unwrap();
    assert_eq!(restored, original);
}

#[test]
fn test_leftover_annotation_fails_without_cleanup() {
    init_tracing();

    let spec = cluster_configuration_spec().skip_spoke_annotation_cleanup();
    let err = verify(&spec, &config()).unwrap_err();

    assert_eq!(err.direction(), Some(Direction::SpokeHubSpoke));
    assert_eq!(err.seed(), Some(20_250_101));
    assert_eq!(
        err.path(),
        Some(r#"$.annotations["hubspoke.dev/conversion-data"]"#)
    );
}
