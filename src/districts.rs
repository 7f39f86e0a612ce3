//! District registry for the bus-route survey dashboard.
//!
//! Defines the six regional vehicle-licensing district offices and their
//! canonical presentation order. The order is a business rule (the offices'
//! published north-to-south sequence), NOT alphabetical - the statistics
//! grids must list groups in exactly this sequence. This is the single
//! source of truth for district keys and names; all other modules should
//! reference districts from here rather than hardcoding strings.

// ---------------------------------------------------------------------------
// District enum
// ---------------------------------------------------------------------------

/// One of the six fixed regional licensing-office jurisdictions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum District {
    TaipeiDistrict,
    TaipeiCity,
    Hsinchu,
    Taichung,
    Chiayi,
    Kaohsiung,
}

/// All districts in canonical presentation order.
///
/// `analysis::aggregate::group` walks this slice, never the input map's
/// key order, so
/// grouped output is deterministic regardless of how the backend serializes
/// its maps.
pub static DISTRICT_ORDER: &[District] = &[
    District::TaipeiDistrict,
    District::TaipeiCity,
    District::Hsinchu,
    District::Taichung,
    District::Chiayi,
    District::Kaohsiung,
];

impl District {
    /// The snake_case key used by `/api/routes` for this district.
    pub fn key(&self) -> &'static str {
        match self {
            District::TaipeiDistrict => "taipei_district",
            District::TaipeiCity => "taipei_city",
            District::Hsinchu => "hsinchu",
            District::Taichung => "taichung",
            District::Chiayi => "chiayi",
            District::Kaohsiung => "kaohsiung",
        }
    }

    /// Full licensing-office name, used as the map key by the
    /// detailed-statistics and sample-table endpoints.
    pub fn office_name(&self) -> &'static str {
        match self {
            District::TaipeiDistrict => "臺北區監理所",
            District::TaipeiCity => "臺北市區監理所",
            District::Hsinchu => "新竹區監理所",
            District::Taichung => "台中區監理所",
            District::Chiayi => "嘉義區監理所",
            District::Kaohsiung => "高雄區監理所",
        }
    }

    /// Short display label for the route table's district badge.
    pub fn short_name(&self) -> &'static str {
        match self {
            District::TaipeiDistrict => "臺北區",
            District::TaipeiCity => "臺北市區",
            District::Hsinchu => "新竹",
            District::Taichung => "台中",
            District::Chiayi => "嘉義",
            District::Kaohsiung => "高雄",
        }
    }

    /// Looks up a district by its `/api/routes` key. `None` for unknown
    /// keys - tolerated as a data-shape issue by callers.
    pub fn from_key(key: &str) -> Option<District> {
        DISTRICT_ORDER.iter().copied().find(|d| d.key() == key)
    }

    /// Looks up a district by its full office name (the key form used by
    /// the two statistics endpoints).
    pub fn from_office_name(name: &str) -> Option<District> {
        DISTRICT_ORDER.iter().copied().find(|d| d.office_name() == name)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
