//! In-memory record store for the route table.
//!
//! Thin but load-bearing: holds the full fetched dataset and the currently
//! active (filtered) view, plus read-only summary projections. `full` is
//! replaced wholesale on every refresh, never patched; `active` is always
//! re-derived from `full` through the filter engine, so the two can never
//! drift apart.

use std::collections::HashSet;

use crate::analysis::filter;
use crate::model::{FilterState, Record, RouteType};

// ---------------------------------------------------------------------------
// Summary projections
// ---------------------------------------------------------------------------

/// Read-only counters derived from the full dataset, recomputed whenever
/// `full` changes. These back the dashboard's header cards; the backend's
/// own `statistics` block is only used for cross-checking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub local_routes: usize,
    pub hwy_routes: usize,
    /// Number of distinct districts present in the data (unknown-district
    /// records do not contribute).
    pub districts: usize,
}

fn summarize(records: &[Record]) -> Summary {
    let mut distinct = HashSet::new();
    let mut summary = Summary {
        total: records.len(),
        ..Default::default()
    };
    for record in records {
        match record.route_type {
            Some(RouteType::Local) => summary.local_routes += 1,
            Some(RouteType::Highway) => summary.hwy_routes += 1,
            None => {}
        }
        if let Some(district) = record.district {
            distinct.insert(district);
        }
    }
    summary.districts = distinct.len();
    summary
}

// ---------------------------------------------------------------------------
// Record store
// ---------------------------------------------------------------------------

/// The full dataset plus its active (filtered) view.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    full: Vec<Record>,
    active: Vec<Record>,
    summary: Summary,
}

impl RecordStore {
    /// A store populated from one fetch, with no filter applied: the
    /// active view starts equal to the full dataset.
    pub fn from_records(records: Vec<Record>) -> Self {
        let summary = summarize(&records);
        RecordStore {
            active: records.clone(),
            full: records,
            summary,
        }
    }

    /// Replaces the dataset wholesale (a refresh). Any previously applied
    /// filter is discarded with the old data; the caller re-applies its
    /// current `FilterState` if it wants to keep it.
    pub fn replace(&mut self, records: Vec<Record>) {
        *self = RecordStore::from_records(records);
    }

    /// Re-derives the active view from `full` under `filter`. Returns the
    /// new active length so the caller can reset its page state.
    pub fn apply_filter(&mut self, filter: &FilterState) -> usize {
        self.active = filter::apply(&self.full, filter);
        self.active.len()
    }

    pub fn full(&self) -> &[Record] {
        &self.full
    }

    pub fn active(&self) -> &[Record] {
        &self.active
    }

    pub fn summary(&self) -> Summary {
        self.summary
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
