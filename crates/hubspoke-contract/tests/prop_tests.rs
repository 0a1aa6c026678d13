//! Property-based tests for contract resolution
//!
//! These tests verify that both lookups are exact, maximal and never panic
//! across randomly built compatibility tables.

use hubspoke_contract::{release_series_for_contract, release_series_for_version, ReleaseSeries};
use proptest::prelude::*;

/// Strategy for contract tokens drawn from a small alphabet so collisions are common
fn contract_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("v1alpha3".to_string()),
        Just("v1alpha4".to_string()),
        Just("v1beta1".to_string()),
        Just("v1beta2".to_string()),
    ]
}

/// Strategy for a single release series with small version numbers
fn release_series_strategy() -> impl Strategy<Value = ReleaseSeries> {
    (0u32..4, 0u32..6, contract_strategy())
        .prop_map(|(major, minor, contract)| ReleaseSeries::new(major, minor, contract))
}

fn table_strategy() -> impl Strategy<Value = Vec<ReleaseSeries>> {
    proptest::collection::vec(release_series_strategy(), 0..12)
}

proptest! {
    /// Property: a version resolves iff the table has a row with the same major.minor
    #[test]
    fn prop_version_resolution_is_exact(
        table in table_strategy(),
        major in 0u32..4,
        minor in 0u32..6,
    ) {
        let found = release_series_for_version(&table, &(major, minor));
        let expected = table.iter().any(|s| s.major == major && s.minor == minor);

        prop_assert_eq!(found.is_some(), expected);
        if let Some(series) = found {
            prop_assert_eq!((series.major, series.minor), (major, minor));
        }
    }

    /// Property: the resolved series carries the contract and no matching row is newer
    #[test]
    fn prop_contract_resolution_is_maximal(
        table in table_strategy(),
        contract in contract_strategy(),
    ) {
        let found = release_series_for_contract(&table, &contract);
        let matches: Vec<&ReleaseSeries> = table.iter().filter(|s| s.contract == contract).collect();

        prop_assert_eq!(found.is_some(), !matches.is_empty());
        if let Some(series) = found {
            prop_assert_eq!(&series.contract, &contract);
            for other in matches {
                prop_assert!((other.major, other.minor) <= (series.major, series.minor));
            }
        }
    }

    /// Property: on full ties the last row in table order is returned
    #[test]
    fn prop_contract_resolution_last_tie_wins(
        table in table_strategy(),
        contract in contract_strategy(),
    ) {
        if let Some(series) = release_series_for_contract(&table, &contract) {
            let last_index = table
                .iter()
                .rposition(|s| s.contract == contract && s.major == series.major && s.minor == series.minor)
                .unwrap();
            prop_assert!(std::ptr::eq(series, &table[last_index]));
        }
    }

    /// Property: an empty table never resolves anything
    #[test]
    fn prop_empty_table_is_safe(
        contract in "[a-z0-9]{0,12}",
        major in any::<u32>(),
        minor in any::<u32>(),
    ) {
        let table: Vec<ReleaseSeries> = Vec::new();
        prop_assert!(release_series_for_version(&table, &(major, minor)).is_none());
        prop_assert!(release_series_for_contract(&table, &contract).is_none());
    }
}

#[test]
fn test_reference_scenario() {
    let table = vec![
        ReleaseSeries::new(1, 0, "v1alpha3"),
        ReleaseSeries::new(1, 1, "v1alpha3"),
        ReleaseSeries::new(1, 2, "v1beta1"),
    ];

    assert_eq!(
        release_series_for_contract(&table, "v1alpha3"),
        Some(&ReleaseSeries::new(1, 1, "v1alpha3"))
    );
    assert_eq!(
        release_series_for_version(&table, &(1u32, 2u32)),
        Some(&ReleaseSeries::new(1, 2, "v1beta1"))
    );
    assert_eq!(release_series_for_contract(&table, "v1alpha4"), None);
}
