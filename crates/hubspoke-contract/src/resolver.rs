//! Contract resolution over a compatibility table
//!
//! Copyright (c) 2025 Hubspoke Team
//! Licensed under the Apache-2.0 license

use crate::release::ReleaseSeries;
use crate::version::MajorMinor;

/// Find the release series a concrete version belongs to.
///
/// Only exact (major, minor) equality matches. Returns `None` when the table
/// has no row for that release line.
pub fn release_series_for_version<'a>(
    table: &'a [ReleaseSeries],
    version: &impl MajorMinor,
) -> Option<&'a ReleaseSeries> {
    table.iter().find(|series| series.matches_version(version))
}

/// Find the newest release series implementing `contract`.
///
/// Every row with a matching contract is compared against a running maximum;
/// a row that is equal to or newer than the current candidate replaces it, so
/// when two rows share both contract and (major, minor) the later row in
/// table order is returned.
pub fn release_series_for_contract<'a>(
    table: &'a [ReleaseSeries],
    contract: &str,
) -> Option<&'a ReleaseSeries> {
    let mut latest: Option<&'a ReleaseSeries> = None;
    for series in table.iter().filter(|series| series.contract == contract) {
        match latest {
            Some(current) if !series.newer_or_equal(current) => {}
            _ => latest = Some(series),
        }
    }
    latest
}
