//! `/api/detailed-statistics` client.
//!
//! The backend pre-aggregates this grid: a map of licensing-office name →
//! operator → route counts, plus its own per-district totals. Office-name
//! keys are resolved to `District` here; the totals block is kept so the
//! dashboard can cross-check the aggregation engine's subtotals against
//! what the backend computed.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::analysis::aggregate::ByDistrict;
use crate::districts::District;
use crate::ingest::{backend_error, get_json};
use crate::model::{FetchError, StatCell};

// ---------------------------------------------------------------------------
// Wire structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct DetailedStatisticsResponse {
    success: bool,
    #[serde(default)]
    detailed_statistics: BTreeMap<String, BTreeMap<String, RawStatCell>>,
    #[serde(default)]
    district_totals: BTreeMap<String, RawStatCell>,
    #[serde(default)]
    error: Option<String>,
}

/// Counter cell as sent. The backend also sends a `total` field; it is
/// derivable (`hwy + local`) and dropped during normalization.
#[derive(Debug, Default, Deserialize)]
struct RawStatCell {
    #[serde(default)]
    hwy_routes: u32,
    #[serde(default)]
    local_routes: u32,
}

/// Normalized payload of one `/api/detailed-statistics` fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DetailedStatistics {
    /// Per-operator route counts, ready for `analysis::aggregate::group`.
    pub by_district: ByDistrict<StatCell>,
    /// The backend's own per-district totals, for cross-checking only.
    pub reported_totals: BTreeMap<District, StatCell>,
}

// ---------------------------------------------------------------------------
// Fetch + normalization
// ---------------------------------------------------------------------------

/// Fetches and normalizes the detailed statistics grid.
pub fn fetch_detailed_statistics(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> Result<DetailedStatistics, FetchError> {
    let url = format!("{}/api/detailed-statistics", base_url);
    let response: DetailedStatisticsResponse = get_json(client, &url)?;

    if !response.success {
        return Err(backend_error(response.error, "/api/detailed-statistics"));
    }

    Ok(normalize(response))
}

/// Office-name keys the registry does not know are skipped: they cannot be
/// placed in the canonical district order, and an unknown office in this
/// feed has so far always meant upstream test data.
fn normalize(response: DetailedStatisticsResponse) -> DetailedStatistics {
    let mut by_district: ByDistrict<StatCell> = BTreeMap::new();
    for (office, operators) in response.detailed_statistics {
        let Some(district) = District::from_office_name(&office) else {
            continue;
        };
        let cells = by_district.entry(district).or_default();
        for (operator, raw) in operators {
            cells.insert(
                operator,
                StatCell {
                    hwy_routes: raw.hwy_routes,
                    local_routes: raw.local_routes,
                },
            );
        }
    }

    let reported_totals = response
        .district_totals
        .into_iter()
        .filter_map(|(office, raw)| {
            District::from_office_name(&office).map(|d| {
                (
                    d,
                    StatCell {
                        hwy_routes: raw.hwy_routes,
                        local_routes: raw.local_routes,
                    },
                )
            })
        })
        .collect();

    DetailedStatistics {
        by_district,
        reported_totals,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_office_names_resolve_to_districts() {
        let json = r#"{
            "success": true,
            "detailed_statistics": {
                "新竹區監理所": {"A公司": {"hwy_routes": 1, "local_routes": 0, "total": 1}},
                "台中區監理所": {"B公司": {"hwy_routes": 2, "local_routes": 3, "total": 5}}
            },
            "district_totals": {
                "新竹區監理所": {"hwy_routes": 1, "local_routes": 0, "total": 1},
                "台中區監理所": {"hwy_routes": 2, "local_routes": 3, "total": 5}
            }
        }"#;
        let stats = normalize(serde_json::from_str(json).unwrap());

        assert_eq!(
            stats.by_district[&District::Hsinchu]["A公司"],
            StatCell { hwy_routes: 1, local_routes: 0 }
        );
        assert_eq!(
            stats.by_district[&District::Taichung]["B公司"],
            StatCell { hwy_routes: 2, local_routes: 3 }
        );
        assert_eq!(
            stats.reported_totals[&District::Taichung],
            StatCell { hwy_routes: 2, local_routes: 3 }
        );
    }

    #[test]
    fn test_unknown_office_names_are_skipped() {
        let json = r#"{
            "success": true,
            "detailed_statistics": {
                "基隆區監理所": {"X公司": {"hwy_routes": 9, "local_routes": 9}}
            },
            "district_totals": {}
        }"#;
        let stats = normalize(serde_json::from_str(json).unwrap());
        assert!(stats.by_district.is_empty());
    }

    #[test]
    fn test_missing_counter_fields_default_to_zero() {
        let json = r#"{
            "success": true,
            "detailed_statistics": {"嘉義區監理所": {"C公司": {}}},
            "district_totals": {}
        }"#;
        let stats = normalize(serde_json::from_str(json).unwrap());
        assert_eq!(
            stats.by_district[&District::Chiayi]["C公司"],
            StatCell::default()
        );
    }

    #[test]
    fn test_success_false_maps_to_backend_error() {
        let json = r#"{"success": false, "error": "query failed"}"#;
        let response: DetailedStatisticsResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(
            backend_error(response.error, "/api/detailed-statistics"),
            FetchError::Backend("query failed".to_string())
        );
    }
}
