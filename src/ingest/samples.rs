//! `/api/sample-table` client.
//!
//! The regulatory sample grid: per operator, two sub-category cells
//! (highway a/b, local c/d) with derived sample counts. The wire labels
//! the local counters `c`/`d` where the highway ones are `a`/`b`; both
//! normalize onto the one `SampleCell` shape. Either sub-cell may be
//! absent for an operator that runs only one kind of service - absence is
//! all-zero, never an error.

use std::collections::BTreeMap;

use serde::Deserialize;

use crate::analysis::aggregate::ByDistrict;
use crate::districts::District;
use crate::ingest::{backend_error, get_json};
use crate::model::{FetchError, SampleCell, SampleEntry};

// ---------------------------------------------------------------------------
// Wire structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct SampleTableResponse {
    success: bool,
    #[serde(default)]
    by_district: BTreeMap<String, BTreeMap<String, RawSampleEntry>>,
    #[serde(default)]
    district_totals: BTreeMap<String, RawDistrictTotal>,
    #[serde(default)]
    grand_totals: Option<RawDistrictTotal>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawSampleEntry {
    #[serde(default)]
    hwy: Option<RawHwyCell>,
    #[serde(default)]
    local: Option<RawLocalCell>,
}

#[derive(Debug, Default, Deserialize)]
struct RawHwyCell {
    #[serde(default)]
    a: u32,
    #[serde(default)]
    b: u32,
    #[serde(default)]
    samples: u32,
}

#[derive(Debug, Default, Deserialize)]
struct RawLocalCell {
    #[serde(default)]
    c: u32,
    #[serde(default)]
    d: u32,
    #[serde(default)]
    samples: u32,
}

#[derive(Debug, Default, Deserialize)]
struct RawDistrictTotal {
    #[serde(default)]
    hwy: Option<RawHwyCell>,
    #[serde(default)]
    local: Option<RawLocalCell>,
    #[serde(default)]
    samples_total: u32,
}

/// Normalized payload of one `/api/sample-table` fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SampleTable {
    /// Per-operator quota cells, ready for `analysis::aggregate::group`.
    pub by_district: ByDistrict<SampleEntry>,
    /// The backend's per-district totals, for cross-checking only.
    pub reported_totals: BTreeMap<District, SampleEntry>,
    /// The backend's grand total, for cross-checking only.
    pub reported_grand_total: SampleEntry,
}

// ---------------------------------------------------------------------------
// Fetch + normalization
// ---------------------------------------------------------------------------

/// Fetches and normalizes the sample grid.
pub fn fetch_sample_table(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> Result<SampleTable, FetchError> {
    let url = format!("{}/api/sample-table", base_url);
    let response: SampleTableResponse = get_json(client, &url)?;

    if !response.success {
        return Err(backend_error(response.error, "/api/sample-table"));
    }

    Ok(normalize(response))
}

fn hwy_cell(raw: Option<RawHwyCell>) -> SampleCell {
    let raw = raw.unwrap_or_default();
    SampleCell {
        a: raw.a,
        b: raw.b,
        samples: raw.samples,
    }
}

fn local_cell(raw: Option<RawLocalCell>) -> SampleCell {
    let raw = raw.unwrap_or_default();
    SampleCell {
        a: raw.c,
        b: raw.d,
        samples: raw.samples,
    }
}

fn entry(raw: RawSampleEntry) -> SampleEntry {
    SampleEntry {
        hwy: hwy_cell(raw.hwy),
        local: local_cell(raw.local),
    }
}

fn total_entry(raw: RawDistrictTotal) -> SampleEntry {
    SampleEntry {
        hwy: hwy_cell(raw.hwy),
        local: local_cell(raw.local),
    }
}

/// Unknown office-name keys are skipped, as in `statistics::normalize`.
fn normalize(response: SampleTableResponse) -> SampleTable {
    let mut by_district: ByDistrict<SampleEntry> = BTreeMap::new();
    for (office, operators) in response.by_district {
        let Some(district) = District::from_office_name(&office) else {
            continue;
        };
        let cells = by_district.entry(district).or_default();
        for (operator, raw) in operators {
            cells.insert(operator, entry(raw));
        }
    }

    let reported_totals = response
        .district_totals
        .into_iter()
        .filter_map(|(office, raw)| {
            District::from_office_name(&office).map(|d| (d, total_entry(raw)))
        })
        .collect();

    SampleTable {
        by_district,
        reported_totals,
        reported_grand_total: response.grand_totals.map(total_entry).unwrap_or_default(),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_local_counters_cd_normalize_onto_ab() {
        let json = r#"{
            "success": true,
            "by_district": {
                "高雄區監理所": {
                    "高雄客運": {
                        "hwy": {"a": 1, "b": 2, "samples": 5},
                        "local": {"c": 3, "d": 1, "samples": 5}
                    }
                }
            },
            "district_totals": {},
            "grand_totals": {"hwy": {"a": 1, "b": 2, "samples": 5}, "local": {"c": 3, "d": 1, "samples": 5}, "samples_total": 10}
        }"#;
        let table = normalize(serde_json::from_str(json).unwrap());
        let entry = table.by_district[&District::Kaohsiung]["高雄客運"];

        assert_eq!(entry.hwy, SampleCell { a: 1, b: 2, samples: 5 });
        assert_eq!(entry.local, SampleCell { a: 3, b: 1, samples: 5 });
        assert_eq!(entry.samples_total(), 10);
        assert_eq!(table.reported_grand_total.samples_total(), 10);
    }

    #[test]
    fn test_absent_hwy_subcell_is_all_zero_without_error() {
        let json = r#"{
            "success": true,
            "by_district": {
                "嘉義區監理所": {
                    "嘉義客運": {"local": {"c": 4, "d": 0, "samples": 4}}
                }
            }
        }"#;
        let table = normalize(serde_json::from_str(json).unwrap());
        let entry = table.by_district[&District::Chiayi]["嘉義客運"];

        assert_eq!(entry.hwy, SampleCell::default(), "missing hwy cell reads as zeros");
        assert_eq!(entry.local.samples, 4);
        assert_eq!(entry.samples_total(), 4);
    }

    #[test]
    fn test_missing_totals_blocks_default_to_zero() {
        let json = r#"{"success": true, "by_district": {}}"#;
        let table = normalize(serde_json::from_str(json).unwrap());
        assert!(table.by_district.is_empty());
        assert!(table.reported_totals.is_empty());
        assert_eq!(table.reported_grand_total, SampleEntry::default());
    }

    #[test]
    fn test_success_false_maps_to_backend_error() {
        let json = r#"{"success": false, "error": "no table"}"#;
        let response: SampleTableResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        assert_eq!(
            backend_error(response.error, "/api/sample-table"),
            FetchError::Backend("no table".to_string())
        );
    }
}
