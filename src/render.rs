//! Presentation adapter.
//!
//! Maps the engine's shaped output onto flat display rows of ready-to-show
//! strings. This is the only place that knows about placeholders, unit
//! suffixes, row spans, and the localized empty/error messages - the
//! engine stays free of rendering concerns, and whatever front end sits on
//! top (the text binary here, HTML elsewhere) consumes these rows as-is.

use crate::analysis::aggregate::GroupedTable;
use crate::model::{Record, SampleEntry, StatCell};

/// Cell text for a value the backend did not send.
pub const PLACEHOLDER: &str = "-";

/// Inline message for an empty filtered route table.
pub const NO_MATCH_MESSAGE: &str = "找不到符合條件的路線資料";

// ---------------------------------------------------------------------------
// Route table
// ---------------------------------------------------------------------------

/// One display row of the route listing. All cells are final strings;
/// absent fields already carry the placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteRow {
    pub district: String,
    pub route_type: String,
    pub operator: String,
    pub route_number: String,
    pub route_name: String,
    pub distance_outbound: String,
    pub distance_return: String,
    pub frequency: String,
    pub vehicle_count: String,
    pub stops_outbound: String,
}

fn text_cell(value: &str) -> String {
    if value.is_empty() {
        PLACEHOLDER.to_string()
    } else {
        value.to_string()
    }
}

fn opt_cell(value: &Option<String>) -> String {
    match value {
        Some(text) if !text.is_empty() => text.clone(),
        _ => PLACEHOLDER.to_string(),
    }
}

fn distance_cell(value: Option<f64>) -> String {
    match value {
        Some(km) => format!("{:.1} km", km),
        None => PLACEHOLDER.to_string(),
    }
}

/// Shapes one page of records into display rows.
pub fn route_rows(records: &[Record]) -> Vec<RouteRow> {
    records
        .iter()
        .map(|r| RouteRow {
            district: r
                .district
                .map(|d| d.short_name().to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            route_type: r
                .route_type
                .map(|t| t.label().to_string())
                .unwrap_or_else(|| PLACEHOLDER.to_string()),
            operator: text_cell(&r.operator_name),
            route_number: text_cell(&r.route_number),
            route_name: text_cell(&r.route_name),
            distance_outbound: distance_cell(r.distance_outbound_km),
            distance_return: distance_cell(r.distance_return_km),
            frequency: opt_cell(&r.frequency),
            vehicle_count: opt_cell(&r.vehicle_count),
            stops_outbound: opt_cell(&r.stops_outbound),
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregation grids
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GridRowKind {
    Operator,
    Subtotal,
    GrandTotal,
}

/// One display row of an aggregation grid.
///
/// The district label appears only on a group's first row, carrying the
/// number of rows it spans (operators + the subtotal row) so a markup
/// front end can emit a rowspan cell.
#[derive(Debug, Clone, PartialEq)]
pub struct GridRow {
    pub district: Option<(String, usize)>,
    pub kind: GridRowKind,
    /// Operator name, or the subtotal/grand-total label.
    pub label: String,
    pub cells: Vec<u32>,
}

const SUBTOTAL_LABEL: &str = "小計";
const GRAND_TOTAL_LABEL: &str = "總計";

fn grid_rows<C: Copy>(table: &GroupedTable<C>, cells: impl Fn(&C) -> Vec<u32>) -> Vec<GridRow> {
    let mut rows = Vec::new();
    for group in &table.groups {
        let span = group.rows.len() + 1; // subtotal row included
        for (idx, row) in group.rows.iter().enumerate() {
            rows.push(GridRow {
                district: (idx == 0)
                    .then(|| (group.district.office_name().to_string(), span)),
                kind: GridRowKind::Operator,
                label: row.operator.clone(),
                cells: cells(&row.cell),
            });
        }
        rows.push(GridRow {
            district: None,
            kind: GridRowKind::Subtotal,
            label: SUBTOTAL_LABEL.to_string(),
            cells: cells(&group.subtotal),
        });
    }
    rows.push(GridRow {
        district: None,
        kind: GridRowKind::GrandTotal,
        label: GRAND_TOTAL_LABEL.to_string(),
        cells: cells(&table.grand_total),
    });
    rows
}

/// Detailed statistics grid: cells are `[hwy_routes, local_routes]`.
pub fn stat_grid(table: &GroupedTable<StatCell>) -> Vec<GridRow> {
    grid_rows(table, |c| vec![c.hwy_routes, c.local_routes])
}

/// Sample grid: cells are
/// `[hwy.a, hwy.b, hwy.samples, local.c, local.d, local.samples, total]`.
pub fn sample_grid(table: &GroupedTable<SampleEntry>) -> Vec<GridRow> {
    grid_rows(table, |e| {
        vec![
            e.hwy.a,
            e.hwy.b,
            e.hwy.samples,
            e.local.a,
            e.local.b,
            e.local.samples,
            e.samples_total(),
        ]
    })
}

/// Inline error line for a table whose endpoint fetch failed.
pub fn error_line(table_name: &str, err: &crate::model::FetchError) -> String {
    format!("載入{}失敗: {}", table_name, err)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::aggregate::{self, ByDistrict};
    use crate::districts::District;
    use crate::model::{RouteType, SampleCell};
    use std::collections::BTreeMap;

    #[test]
    fn test_route_row_placeholders_for_missing_fields() {
        let record = Record {
            operator_name: "首都客運".to_string(),
            route_number: "9001".to_string(),
            route_name: String::new(),
            district: None,
            route_type: Some(RouteType::Highway),
            distance_outbound_km: Some(52.25),
            distance_return_km: None,
            frequency: None,
            vehicle_count: Some("30".to_string()),
            stops_outbound: None,
        };
        let row = &route_rows(&[record])[0];

        assert_eq!(row.district, "-", "unknown district renders the placeholder");
        assert_eq!(row.route_type, "國道客運");
        assert_eq!(row.route_name, "-");
        assert_eq!(row.distance_outbound, "52.2 km", "one decimal with unit");
        assert_eq!(row.distance_return, "-", "absent numeric renders placeholder, not zero");
        assert_eq!(row.vehicle_count, "30");
        assert_eq!(row.stops_outbound, "-");
    }

    #[test]
    fn test_route_row_uses_short_district_badge_not_office_name() {
        let record = Record {
            operator_name: "新竹客運".to_string(),
            route_number: "5601".to_string(),
            route_name: "新竹-竹東".to_string(),
            district: Some(District::Hsinchu),
            route_type: Some(RouteType::Local),
            distance_outbound_km: None,
            distance_return_km: None,
            frequency: None,
            vehicle_count: None,
            stops_outbound: None,
        };
        let row = &route_rows(&[record])[0];
        assert_eq!(
            row.district, "新竹",
            "route listing shows the short badge; the full office name is grid-only"
        );
    }

    fn stat_table() -> GroupedTable<StatCell> {
        let mut input: ByDistrict<StatCell> = BTreeMap::new();
        input.entry(District::Hsinchu).or_default().insert(
            "A公司".to_string(),
            StatCell { hwy_routes: 1, local_routes: 0 },
        );
        input.entry(District::Hsinchu).or_default().insert(
            "B公司".to_string(),
            StatCell { hwy_routes: 0, local_routes: 2 },
        );
        aggregate::group(&input)
    }

    #[test]
    fn test_stat_grid_layout_spans_and_totals() {
        let rows = stat_grid(&stat_table());
        // Two operators + subtotal + grand total.
        assert_eq!(rows.len(), 4);

        assert_eq!(
            rows[0].district,
            Some(("新竹區監理所".to_string(), 3)),
            "group's first row carries the office label spanning operators + subtotal"
        );
        assert_eq!(rows[1].district, None);
        assert_eq!(rows[1].kind, GridRowKind::Operator);

        assert_eq!(rows[2].kind, GridRowKind::Subtotal);
        assert_eq!(rows[2].label, "小計");
        assert_eq!(rows[2].cells, vec![1, 2]);

        assert_eq!(rows[3].kind, GridRowKind::GrandTotal);
        assert_eq!(rows[3].label, "總計");
        assert_eq!(rows[3].cells, vec![1, 2]);
    }

    #[test]
    fn test_sample_grid_cells_include_recomputed_total() {
        let mut input: ByDistrict<SampleEntry> = BTreeMap::new();
        input.entry(District::Taichung).or_default().insert(
            "台中客運".to_string(),
            SampleEntry {
                hwy: SampleCell { a: 2, b: 1, samples: 4 },
                local: SampleCell { a: 3, b: 0, samples: 3 },
            },
        );
        let rows = sample_grid(&aggregate::group(&input));

        assert_eq!(rows[0].cells, vec![2, 1, 4, 3, 0, 3, 7]);
        let grand = rows.last().unwrap();
        assert_eq!(grand.kind, GridRowKind::GrandTotal);
        assert_eq!(grand.cells, vec![2, 1, 4, 3, 0, 3, 7]);
    }

    #[test]
    fn test_empty_table_renders_just_a_zero_grand_total() {
        let rows = stat_grid(&aggregate::group(&ByDistrict::<StatCell>::new()));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].kind, GridRowKind::GrandTotal);
        assert_eq!(rows[0].cells, vec![0, 0]);
    }
}
