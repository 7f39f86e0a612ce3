//! `/api/routes` client.
//!
//! Fetches the full route listing plus the backend's summary counters and
//! normalizes every entry into a canonical `Record`. The wire format
//! dual-keys most fields - original Chinese spreadsheet headers with
//! English fallbacks from a later import path - which is resolved here
//! once, with serde aliases, so downstream code sees exactly one shape.

use serde::Deserialize;

use crate::districts::District;
use crate::ingest::{NumOrText, backend_error, get_json};
use crate::model::{FetchError, Record, RouteType};

// ---------------------------------------------------------------------------
// Wire structures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct RoutesResponse {
    success: bool,
    #[serde(default)]
    routes: Vec<RawRoute>,
    #[serde(default)]
    statistics: Option<ReportedStatistics>,
    #[serde(default)]
    error: Option<String>,
}

/// One route entry as the backend sends it. Every field is optional on the
/// wire; absence degrades to `None`/empty downstream, never an error.
#[derive(Debug, Deserialize)]
struct RawRoute {
    #[serde(default)]
    district: Option<String>,
    #[serde(default)]
    route_type: Option<String>,
    #[serde(rename = "公司名稱", alias = "company_name", default)]
    operator_name: Option<String>,
    #[serde(rename = "路線編號", alias = "route_number", default)]
    route_number: Option<String>,
    #[serde(rename = "路線名稱", alias = "route_name", default)]
    route_name: Option<String>,
    #[serde(rename = "里程往", alias = "distance_go", default)]
    distance_outbound_km: Option<f64>,
    #[serde(rename = "里程返", alias = "distance_return", default)]
    distance_return_km: Option<f64>,
    #[serde(rename = "班次一", alias = "frequency_1", default)]
    frequency: Option<NumOrText>,
    #[serde(rename = "車輛數", alias = "vehicles", default)]
    vehicle_count: Option<NumOrText>,
    #[serde(rename = "站牌數往", alias = "stops_go", default)]
    stops_outbound: Option<NumOrText>,
}

/// The backend's own summary block. Kept for cross-checking against the
/// locally derived projections; the dashboard displays the local ones.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
pub struct ReportedStatistics {
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub local_routes: u32,
    #[serde(default)]
    pub hwy_routes: u32,
    #[serde(default)]
    pub districts: u32,
}

/// Normalized payload of one `/api/routes` fetch.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoutesData {
    pub records: Vec<Record>,
    pub reported: ReportedStatistics,
}

// ---------------------------------------------------------------------------
// Fetch + normalization
// ---------------------------------------------------------------------------

/// Fetches and normalizes the route listing.
pub fn fetch_routes(
    client: &reqwest::blocking::Client,
    base_url: &str,
) -> Result<RoutesData, FetchError> {
    let url = format!("{}/api/routes", base_url);
    let response: RoutesResponse = get_json(client, &url)?;

    if !response.success {
        return Err(backend_error(response.error, "/api/routes"));
    }

    Ok(RoutesData {
        records: response.routes.into_iter().map(normalize).collect(),
        reported: response.statistics.unwrap_or_default(),
    })
}

/// Maps one wire entry onto the canonical record shape. Unknown district or
/// route-type keys become `None` (kept out of categorical filters and
/// aggregation, still listed and counted).
fn normalize(raw: RawRoute) -> Record {
    Record {
        operator_name: raw.operator_name.unwrap_or_default(),
        route_number: raw.route_number.unwrap_or_default(),
        route_name: raw.route_name.unwrap_or_default(),
        district: raw.district.as_deref().and_then(District::from_key),
        route_type: raw.route_type.as_deref().and_then(RouteType::from_key),
        distance_outbound_km: raw.distance_outbound_km,
        distance_return_km: raw.distance_return_km,
        frequency: raw.frequency.map(NumOrText::into_text),
        vehicle_count: raw.vehicle_count.map(NumOrText::into_text),
        stops_outbound: raw.stops_outbound.map(NumOrText::into_text),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalizes_chinese_wire_keys() {
        let json = r#"{
            "success": true,
            "routes": [{
                "district": "hsinchu",
                "route_type": "local_routes",
                "公司名稱": "新竹客運",
                "路線編號": "5601",
                "路線名稱": "新竹-竹東",
                "里程往": 12.3,
                "里程返": 12.9,
                "班次一": 30,
                "車輛數": 8,
                "站牌數往": "22"
            }],
            "statistics": {"total": 1, "local_routes": 1, "hwy_routes": 0, "districts": 1}
        }"#;
        let response: RoutesResponse = serde_json::from_str(json).unwrap();
        assert!(response.success);
        let record = normalize(response.routes.into_iter().next().unwrap());

        assert_eq!(record.operator_name, "新竹客運");
        assert_eq!(record.route_number, "5601");
        assert_eq!(record.district, Some(District::Hsinchu));
        assert_eq!(record.route_type, Some(RouteType::Local));
        assert_eq!(record.distance_outbound_km, Some(12.3));
        assert_eq!(record.frequency.as_deref(), Some("30"));
        assert_eq!(record.vehicle_count.as_deref(), Some("8"), "numeric wire cell");
        assert_eq!(record.stops_outbound.as_deref(), Some("22"), "text wire cell");
    }

    #[test]
    fn test_normalizes_english_fallback_keys() {
        let json = r#"{
            "district": "taichung",
            "route_type": "hwy_routes",
            "company_name": "台中客運",
            "route_number": "160",
            "route_name": "台中-南投",
            "distance_go": 40.0,
            "vehicles": "12"
        }"#;
        let record = normalize(serde_json::from_str(json).unwrap());
        assert_eq!(record.operator_name, "台中客運");
        assert_eq!(record.district, Some(District::Taichung));
        assert_eq!(record.route_type, Some(RouteType::Highway));
        assert_eq!(record.distance_outbound_km, Some(40.0));
        assert_eq!(record.vehicle_count.as_deref(), Some("12"));
    }

    #[test]
    fn test_missing_fields_degrade_to_placeholders_not_errors() {
        let record = normalize(serde_json::from_str("{}").unwrap());
        assert_eq!(record.operator_name, "");
        assert_eq!(record.district, None);
        assert_eq!(record.route_type, None);
        assert_eq!(record.distance_outbound_km, None);
        assert_eq!(record.vehicle_count, None);
    }

    #[test]
    fn test_unknown_district_key_becomes_none() {
        let record = normalize(serde_json::from_str(r#"{"district": "penghu"}"#).unwrap());
        assert_eq!(record.district, None, "unknown keys are tolerated, not fatal");
    }

    #[test]
    fn test_success_false_maps_to_backend_error() {
        let json = r#"{"success": false, "routes": [], "error": "db down"}"#;
        let response: RoutesResponse = serde_json::from_str(json).unwrap();
        assert!(!response.success);
        let err = backend_error(response.error, "/api/routes");
        assert_eq!(err, FetchError::Backend("db down".to_string()));
    }
}
