//! Hierarchical grouping for the statistics and sample grids.
//!
//! Groups per-operator cells by district in the canonical office order,
//! emitting one row per operator, one subtotal row per district, and one
//! grand-total row. The same grouping rules serve both cell shapes (route
//! counts and sample quotas); the shapes differ only in how cells add.
//!
//! Ordering rules, both deliberate tie-breaks for auditable output:
//! - districts strictly in `DISTRICT_ORDER`; a district with no input data
//!   is skipped entirely (no empty group row);
//! - operators within a district ascending lexicographically by name.
//!
//! The grand total is computed from the district subtotals and must equal
//! the field-wise sum of every operator row - that equality is an invariant
//! the tests pin down, not a recomputation shortcut.

use std::collections::BTreeMap;

use crate::districts::{District, DISTRICT_ORDER};
use crate::model::{Record, SampleCell, SampleEntry, StatCell};

/// Per-(district, operator) cells, keyed for deterministic iteration:
/// `BTreeMap<String, _>` gives the ascending operator order for free.
pub type ByDistrict<C> = BTreeMap<District, BTreeMap<String, C>>;

// ---------------------------------------------------------------------------
// Cell arithmetic
// ---------------------------------------------------------------------------

/// Field-wise summation, the one thing the two grid shapes need beyond
/// their data.
pub trait Accumulate: Default + Copy {
    fn accumulate(&mut self, other: &Self);
}

impl Accumulate for StatCell {
    fn accumulate(&mut self, other: &Self) {
        self.hwy_routes += other.hwy_routes;
        self.local_routes += other.local_routes;
    }
}

impl Accumulate for SampleCell {
    fn accumulate(&mut self, other: &Self) {
        self.a += other.a;
        self.b += other.b;
        self.samples += other.samples;
    }
}

impl Accumulate for SampleEntry {
    // Each sub-category sums independently; the combined samples total is
    // always derived (`samples_total()`), so subtotal and grand-total rows
    // recompute it as hwy.samples + local.samples by construction.
    fn accumulate(&mut self, other: &Self) {
        self.hwy.accumulate(&other.hwy);
        self.local.accumulate(&other.local);
    }
}

// ---------------------------------------------------------------------------
// Grouped output
// ---------------------------------------------------------------------------

/// One operator row inside a district group.
#[derive(Debug, Clone, PartialEq)]
pub struct OperatorRow<C> {
    pub operator: String,
    pub cell: C,
}

/// One district's block: operator rows in ascending name order plus the
/// trailing subtotal.
#[derive(Debug, Clone, PartialEq)]
pub struct DistrictGroup<C> {
    pub district: District,
    pub rows: Vec<OperatorRow<C>>,
    pub subtotal: C,
}

/// The fully shaped grid: district groups in canonical order and the
/// grand-total row.
#[derive(Debug, Clone, PartialEq)]
pub struct GroupedTable<C> {
    pub groups: Vec<DistrictGroup<C>>,
    pub grand_total: C,
}

impl<C> GroupedTable<C> {
    /// Total number of operator rows across all groups.
    pub fn operator_count(&self) -> usize {
        self.groups.iter().map(|g| g.rows.len()).sum()
    }
}

/// Groups per-operator cells into the display structure.
///
/// Works for pre-aggregated endpoint maps and for the output of the local
/// record aggregations below; both grids use it unchanged.
pub fn group<C: Accumulate>(by_district: &ByDistrict<C>) -> GroupedTable<C> {
    let mut groups = Vec::new();
    let mut grand_total = C::default();

    for district in DISTRICT_ORDER {
        let Some(operators) = by_district.get(district) else {
            continue; // absent district: no empty group row
        };
        if operators.is_empty() {
            continue;
        }

        let mut rows = Vec::with_capacity(operators.len());
        let mut subtotal = C::default();
        for (operator, cell) in operators {
            subtotal.accumulate(cell);
            rows.push(OperatorRow {
                operator: operator.clone(),
                cell: *cell,
            });
        }

        grand_total.accumulate(&subtotal);
        groups.push(DistrictGroup {
            district: *district,
            rows,
            subtotal,
        });
    }

    GroupedTable {
        groups,
        grand_total,
    }
}

// ---------------------------------------------------------------------------
// Aggregation from raw records
// ---------------------------------------------------------------------------
// The backend pre-aggregates both grids server-side; these functions derive
// the same shapes from the raw route listing, which keeps the grids usable
// when only /api/routes succeeded and gives the tests an independent path
// to cross-check endpoint data against.

/// Daily round trips at or below this count contribute to the `a` counter
/// (one sample); above it, to `b` (two samples).
pub const LOW_FREQUENCY_MAX: f64 = 24.0;

/// Per-operator route counts by district. Records missing an operator
/// name, district, or route type carry nothing countable and are skipped.
pub fn route_counts(records: &[Record]) -> ByDistrict<StatCell> {
    let mut by_district: ByDistrict<StatCell> = BTreeMap::new();
    for record in records {
        let (Some(district), Some(route_type)) = (record.district, record.route_type) else {
            continue;
        };
        if record.operator_name.is_empty() {
            continue;
        }
        let cell = by_district
            .entry(district)
            .or_default()
            .entry(record.operator_name.clone())
            .or_default();
        match route_type {
            crate::model::RouteType::Highway => cell.hwy_routes += 1,
            crate::model::RouteType::Local => cell.local_routes += 1,
        }
    }
    by_district
}

/// Per-operator sample quotas by district: the ≤24 / ≥25 daily-trip split
/// with `samples = a + 2b`. A missing or unparseable frequency counts as
/// zero trips, i.e. in the `a` bucket.
pub fn sample_quotas(records: &[Record]) -> ByDistrict<SampleEntry> {
    let mut by_district: ByDistrict<SampleEntry> = BTreeMap::new();
    for record in records {
        let (Some(district), Some(route_type)) = (record.district, record.route_type) else {
            continue;
        };
        if record.operator_name.is_empty() {
            continue;
        }
        let entry = by_district
            .entry(district)
            .or_default()
            .entry(record.operator_name.clone())
            .or_default();
        let cell = match route_type {
            crate::model::RouteType::Highway => &mut entry.hwy,
            crate::model::RouteType::Local => &mut entry.local,
        };
        let trips = record
            .frequency
            .as_deref()
            .and_then(|s| s.trim().parse::<f64>().ok())
            .unwrap_or(0.0);
        if trips <= LOW_FREQUENCY_MAX {
            cell.a += 1;
            cell.samples += 1;
        } else {
            cell.b += 1;
            cell.samples += 2;
        }
    }
    by_district
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
