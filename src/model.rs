//! Core data types for the bus-route survey dashboard.
//!
//! This module defines the canonical domain model imported by all other
//! modules. It contains no logic, no I/O, and no external dependencies -
//! only types. Raw API responses are normalized into these types at the
//! ingestion boundary (`ingest`), so nothing downstream ever branches on
//! wire-level key naming.

use crate::districts::District;

// ---------------------------------------------------------------------------
// Route classification
// ---------------------------------------------------------------------------

/// Classification of a route into intra-regional vs inter-city service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RouteType {
    /// General-road (intra-regional) service. API key: `local_routes`.
    Local,
    /// National-highway (inter-city) service. API key: `hwy_routes`.
    Highway,
}

impl RouteType {
    /// The snake_case key used by the backend API for this route type.
    pub fn key(&self) -> &'static str {
        match self {
            RouteType::Local => "local_routes",
            RouteType::Highway => "hwy_routes",
        }
    }

    /// Looks up a route type by API key. Returns `None` for unknown keys -
    /// a tolerated data-shape issue, not an error.
    pub fn from_key(key: &str) -> Option<RouteType> {
        match key {
            "local_routes" => Some(RouteType::Local),
            "hwy_routes" => Some(RouteType::Highway),
            _ => None,
        }
    }

    /// Display label (Chinese, as shown in the route table).
    pub fn label(&self) -> &'static str {
        match self {
            RouteType::Local => "一般公路",
            RouteType::Highway => "國道客運",
        }
    }
}

// ---------------------------------------------------------------------------
// Record types
// ---------------------------------------------------------------------------

/// A single canonical route entry.
///
/// Produced by `ingest::routes` from one element of the `/api/routes`
/// `routes[]` array. Field presence is not guaranteed by the backend;
/// absent fields stay `None` and render as a placeholder rather than zero.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub operator_name: String,
    pub route_number: String,
    pub route_name: String,
    /// `None` when the wire value is missing or not a known district key.
    pub district: Option<District>,
    /// `None` when the wire value is missing or not a known type key.
    pub route_type: Option<RouteType>,
    pub distance_outbound_km: Option<f64>,
    pub distance_return_km: Option<f64>,
    /// Daily round trips (班次一), kept as sent (the backend mixes numeric
    /// and free-text values). Drives the ≤24 / ≥25 sample split.
    pub frequency: Option<String>,
    /// Sent by the backend as either a number or free text.
    pub vehicle_count: Option<String>,
    pub stops_outbound: Option<String>,
}

// ---------------------------------------------------------------------------
// Aggregation cells
// ---------------------------------------------------------------------------

/// Route counts for one (district, operator) pair in the detailed
/// statistics grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatCell {
    pub hwy_routes: u32,
    pub local_routes: u32,
}

/// A quota/audit tracking unit for one route-type sub-category of the
/// sample grid: two raw counters and a derived sample count.
///
/// `a` counts routes with at most 24 daily round trips, `b` those with 25
/// or more, and `samples = a*1 + b*2` (high-frequency routes are sampled
/// twice). The local sub-category labels its counters c/d in the published
/// table but carries the same shape.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleCell {
    pub a: u32,
    pub b: u32,
    pub samples: u32,
}

/// Both sub-category cells for one (district, operator) pair in the sample
/// grid. Either sub-cell may be absent in the wire data; absence means
/// all-zero, never an error.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SampleEntry {
    pub hwy: SampleCell,
    pub local: SampleCell,
}

impl SampleEntry {
    /// Combined sample count across both sub-categories.
    pub fn samples_total(&self) -> u32 {
        self.hwy.samples + self.local.samples
    }
}

// ---------------------------------------------------------------------------
// UI state
// ---------------------------------------------------------------------------

/// The three ANDed filter components of the route table.
///
/// An empty `search_text` / unset option is vacuously true for its
/// component. Transient UI state: any change resets pagination to page 1.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterState {
    pub search_text: String,
    pub district: Option<District>,
    pub route_type: Option<RouteType>,
}

impl FilterState {
    /// True when every component is empty, i.e. filtering is the identity.
    pub fn is_empty(&self) -> bool {
        self.search_text.is_empty() && self.district.is_none() && self.route_type.is_none()
    }
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when fetching an endpoint of the survey backend.
///
/// The taxonomy matters for surfacing: transport and backend errors abort
/// only the affected endpoint's table; data-shape issues inside a record
/// never become a `FetchError` at all - they degrade per field to `None`.
#[derive(Debug, Clone, PartialEq)]
pub enum FetchError {
    /// Non-2xx HTTP response from the backend.
    Http(u16),
    /// Connection-level failure (DNS, refused, timeout).
    Network(String),
    /// The response body could not be deserialized.
    Parse(String),
    /// The backend answered `success: false` with an error message.
    Backend(String),
}

impl std::fmt::Display for FetchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FetchError::Http(code) => write!(f, "HTTP error: {}", code),
            FetchError::Network(msg) => write!(f, "Network error: {}", msg),
            FetchError::Parse(msg) => write!(f, "Parse error: {}", msg),
            FetchError::Backend(msg) => write!(f, "Backend error: {}", msg),
        }
    }
}

impl std::error::Error for FetchError {}
