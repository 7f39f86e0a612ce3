//! Backend Endpoint Verification Module
//!
//! Framework for testing a live backend against the three dashboard
//! endpoints to determine which are reachable, parseable, and internally
//! consistent with the records they report.
//!
//! Use this before pointing the dashboard at a new backend deployment.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::error::Error;

use crate::analysis::aggregate;
use crate::ingest;

// ============================================================================
// Verification Results
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationReport {
    pub timestamp: String,
    pub base_url: String,
    pub routes_result: RoutesVerification,
    pub statistics_result: StatisticsVerification,
    pub samples_result: SamplesVerification,
    pub summary: VerificationSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VerificationSummary {
    pub endpoints_total: usize,
    pub endpoints_working: usize,
    pub endpoints_failed: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoutesVerification {
    pub status: VerificationStatus,
    pub record_count: usize,
    pub reported_total: u32,
    pub records_missing_district: usize,
    pub records_missing_route_type: usize,
    pub totals_consistent: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatisticsVerification {
    pub status: VerificationStatus,
    pub districts_present: Vec<String>,
    pub operator_count: usize,
    pub subtotals_consistent: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SamplesVerification {
    pub status: VerificationStatus,
    pub districts_present: Vec<String>,
    pub operator_count: usize,
    pub grand_total_samples: u32,
    pub reported_grand_total_consistent: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum VerificationStatus {
    Success,
    PartialSuccess,
    Failed,
}

// ============================================================================
// Routes Endpoint Verification
// ============================================================================

pub fn verify_routes_endpoint(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> RoutesVerification {
    let mut result = RoutesVerification {
        status: VerificationStatus::Failed,
        record_count: 0,
        reported_total: 0,
        records_missing_district: 0,
        records_missing_route_type: 0,
        totals_consistent: false,
        error_message: None,
    };

    match ingest::routes::fetch_routes(client, base_url) {
        Ok(data) => {
            result.record_count = data.records.len();
            result.reported_total = data.reported.total;
            result.records_missing_district = data
                .records
                .iter()
                .filter(|r| r.district.is_none())
                .count();
            result.records_missing_route_type = data
                .records
                .iter()
                .filter(|r| r.route_type.is_none())
                .count();

            // The backend's own counter should match what it actually sent.
            result.totals_consistent = result.reported_total as usize == result.record_count;

            if result.record_count > 0 {
                if result.totals_consistent
                    && result.records_missing_district == 0
                    && result.records_missing_route_type == 0
                {
                    result.status = VerificationStatus::Success;
                } else {
                    result.status = VerificationStatus::PartialSuccess;
                }
            } else {
                result.error_message = Some("Endpoint returned zero records".to_string());
            }
        }
        Err(e) => {
            result.error_message = Some(format!("Fetch failed: {}", e));
        }
    }

    result
}

// ============================================================================
// Statistics Endpoint Verification
// ============================================================================

pub fn verify_statistics_endpoint(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> StatisticsVerification {
    let mut result = StatisticsVerification {
        status: VerificationStatus::Failed,
        districts_present: Vec::new(),
        operator_count: 0,
        subtotals_consistent: false,
        error_message: None,
    };

    match ingest::statistics::fetch_detailed_statistics(client, base_url) {
        Ok(stats) => {
            result.districts_present = stats
                .by_district
                .keys()
                .map(|d| d.key().to_string())
                .collect();

            let table = aggregate::group(&stats.by_district);
            result.operator_count = table.operator_count();

            // Recomputed subtotals must agree with the backend's per-district totals.
            result.subtotals_consistent = table.groups.iter().all(|group| {
                stats
                    .reported_totals
                    .get(&group.district)
                    .map(|reported| *reported == group.subtotal)
                    .unwrap_or(false)
            });

            if !result.districts_present.is_empty() {
                if result.subtotals_consistent {
                    result.status = VerificationStatus::Success;
                } else {
                    result.status = VerificationStatus::PartialSuccess;
                }
            } else {
                result.error_message = Some("No districts in response".to_string());
            }
        }
        Err(e) => {
            result.error_message = Some(format!("Fetch failed: {}", e));
        }
    }

    result
}

// ============================================================================
// Sample Table Endpoint Verification
// ============================================================================

pub fn verify_samples_endpoint(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> SamplesVerification {
    let mut result = SamplesVerification {
        status: VerificationStatus::Failed,
        districts_present: Vec::new(),
        operator_count: 0,
        grand_total_samples: 0,
        reported_grand_total_consistent: false,
        error_message: None,
    };

    match ingest::samples::fetch_sample_table(client, base_url) {
        Ok(samples) => {
            result.districts_present = samples
                .by_district
                .keys()
                .map(|d| d.key().to_string())
                .collect();

            let table = aggregate::group(&samples.by_district);
            result.operator_count = table.operator_count();
            result.grand_total_samples = table.grand_total.samples_total();
            result.reported_grand_total_consistent =
                samples.reported_grand_total == table.grand_total;

            if !result.districts_present.is_empty() {
                if result.reported_grand_total_consistent {
                    result.status = VerificationStatus::Success;
                } else {
                    result.status = VerificationStatus::PartialSuccess;
                }
            } else {
                result.error_message = Some("No districts in response".to_string());
            }
        }
        Err(e) => {
            result.error_message = Some(format!("Fetch failed: {}", e));
        }
    }

    result
}

// ============================================================================
// Full Verification Runner
// ============================================================================

pub fn run_full_verification(base_url: &str) -> Result<VerificationReport, Box<dyn Error>> {
    let client = ingest::build_client(std::time::Duration::from_secs(30))?;

    println!("Verifying backend at {} ...", base_url);

    print!("  /api/routes ... ");
    let routes_result = verify_routes_endpoint(&client, base_url);
    match routes_result.status {
        VerificationStatus::Success => {
            println!("OK ({} records)", routes_result.record_count);
        }
        VerificationStatus::PartialSuccess => {
            println!(
                "Partial ({} records, {} missing district, {} missing type)",
                routes_result.record_count,
                routes_result.records_missing_district,
                routes_result.records_missing_route_type
            );
        }
        VerificationStatus::Failed => {
            println!(
                "FAILED: {}",
                routes_result.error_message.as_deref().unwrap_or("Unknown")
            );
        }
    }

    print!("  /api/detailed-statistics ... ");
    let statistics_result = verify_statistics_endpoint(&client, base_url);
    match statistics_result.status {
        VerificationStatus::Success => {
            println!(
                "OK ({} districts, {} operators)",
                statistics_result.districts_present.len(),
                statistics_result.operator_count
            );
        }
        VerificationStatus::PartialSuccess => {
            println!(
                "Partial ({} districts, subtotals inconsistent)",
                statistics_result.districts_present.len()
            );
        }
        VerificationStatus::Failed => {
            println!(
                "FAILED: {}",
                statistics_result
                    .error_message
                    .as_deref()
                    .unwrap_or("Unknown")
            );
        }
    }

    print!("  /api/sample-table ... ");
    let samples_result = verify_samples_endpoint(&client, base_url);
    match samples_result.status {
        VerificationStatus::Success => {
            println!(
                "OK ({} districts, {} total samples)",
                samples_result.districts_present.len(),
                samples_result.grand_total_samples
            );
        }
        VerificationStatus::PartialSuccess => {
            println!(
                "Partial ({} districts, grand total inconsistent)",
                samples_result.districts_present.len()
            );
        }
        VerificationStatus::Failed => {
            println!(
                "FAILED: {}",
                samples_result.error_message.as_deref().unwrap_or("Unknown")
            );
        }
    }

    // Summarize from copies of the statuses; the result structs move into
    // the report below.
    let summary = summarize_statuses(&[
        routes_result.status.clone(),
        statistics_result.status.clone(),
        samples_result.status.clone(),
    ]);

    Ok(VerificationReport {
        timestamp: Utc::now().to_rfc3339(),
        base_url: base_url.to_string(),
        routes_result,
        statistics_result,
        samples_result,
        summary,
    })
}

/// Rolls endpoint statuses up into the report's working/failed counters.
/// Partial success still counts as working; only `Failed` does not.
fn summarize_statuses(statuses: &[VerificationStatus]) -> VerificationSummary {
    let working = statuses
        .iter()
        .filter(|s| **s != VerificationStatus::Failed)
        .count();
    VerificationSummary {
        endpoints_total: statuses.len(),
        endpoints_working: working,
        endpoints_failed: statuses.len() - working,
    }
}

pub fn print_summary(report: &VerificationReport) {
    println!("\n═══════════════════════════════════════════════════════════");
    println!("VERIFICATION SUMMARY: {}", report.base_url);
    println!("═══════════════════════════════════════════════════════════");
    println!();
    println!(
        "Endpoints:   {}/{} working  ({} failed)",
        report.summary.endpoints_working,
        report.summary.endpoints_total,
        report.summary.endpoints_failed
    );
    println!();

    let success_rate = if report.summary.endpoints_total > 0 {
        (report.summary.endpoints_working as f64 / report.summary.endpoints_total as f64) * 100.0
    } else {
        0.0
    };

    println!(
        "Overall Success Rate: {:.1}% ({}/{})",
        success_rate, report.summary.endpoints_working, report.summary.endpoints_total
    );
    println!("═══════════════════════════════════════════════════════════");
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_partial_success_as_working() {
        let summary = summarize_statuses(&[
            VerificationStatus::Success,
            VerificationStatus::PartialSuccess,
            VerificationStatus::Failed,
        ]);
        assert_eq!(summary.endpoints_total, 3);
        assert_eq!(summary.endpoints_working, 2, "partial success still counts as working");
        assert_eq!(summary.endpoints_failed, 1);
    }

    #[test]
    fn test_report_assembles_from_owned_results() {
        // The summary is derived before the per-endpoint results move into
        // the report; both must carry the same statuses afterwards.
        let routes_result = RoutesVerification {
            status: VerificationStatus::Success,
            record_count: 45,
            reported_total: 45,
            records_missing_district: 0,
            records_missing_route_type: 0,
            totals_consistent: true,
            error_message: None,
        };
        let statistics_result = StatisticsVerification {
            status: VerificationStatus::Failed,
            districts_present: Vec::new(),
            operator_count: 0,
            subtotals_consistent: false,
            error_message: Some("Fetch failed: HTTP error: 502".to_string()),
        };
        let samples_result = SamplesVerification {
            status: VerificationStatus::PartialSuccess,
            districts_present: vec!["hsinchu".to_string()],
            operator_count: 1,
            grand_total_samples: 20,
            reported_grand_total_consistent: false,
            error_message: None,
        };

        let summary = summarize_statuses(&[
            routes_result.status.clone(),
            statistics_result.status.clone(),
            samples_result.status.clone(),
        ]);
        let report = VerificationReport {
            timestamp: Utc::now().to_rfc3339(),
            base_url: "http://127.0.0.1:5050".to_string(),
            routes_result,
            statistics_result,
            samples_result,
            summary,
        };

        assert_eq!(report.summary.endpoints_working, 2);
        assert_eq!(report.summary.endpoints_failed, 1);
        assert_eq!(report.routes_result.status, VerificationStatus::Success);
        assert_eq!(report.statistics_result.status, VerificationStatus::Failed);
        assert_eq!(report.samples_result.status, VerificationStatus::PartialSuccess);
    }
}
