//! Route filtering.
//!
//! Applies the three ANDed filter components of `FilterState` over the full
//! record set, producing the active view. Pure and order-preserving: the
//! result is a subsequence of the input, the input is never mutated. The
//! surrounding state machinery (`dashboard`) resets pagination to page 1 on
//! every filter change; nothing in here touches page state.

use crate::model::{FilterState, Record};

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// True when the record survives every component of `filter`.
pub fn matches(record: &Record, filter: &FilterState) -> bool {
    matches_search(record, &filter.search_text)
        && filter.district.map_or(true, |d| record.district == Some(d))
        && filter.route_type.map_or(true, |t| record.route_type == Some(t))
}

/// Case-insensitive substring match over the three searchable text fields.
///
/// Vacuously true for an empty search term. A field the backend omitted is
/// an empty string in the canonical record and simply never matches - a
/// missing field is not an error.
pub fn matches_search(record: &Record, search_text: &str) -> bool {
    if search_text.is_empty() {
        return true;
    }
    let term = search_text.to_lowercase();
    [
        &record.operator_name,
        &record.route_number,
        &record.route_name,
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(&term))
}

/// Produces the active (filtered) view of `all`: an order-preserving
/// subsequence of records matching `filter`.
pub fn apply(all: &[Record], filter: &FilterState) -> Vec<Record> {
    all.iter().filter(|r| matches(r, filter)).cloned().collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
