//! Application state and the refresh cycle.
//!
//! `DashboardState` is the explicit state object the whole UI works
//! against: the record store, the transient filter/page state, and one
//! result slot per backend endpoint. Every transition is an ordinary
//! method that updates the state in place and keeps the invariants
//! (active view derived from full, page within range, page 1 after any
//! filter change).
//!
//! The three endpoint fetches are independent failure domains: each one
//! writes only its own slot, so a failed statistics fetch leaves the route
//! table fully usable and vice versa. A refresh is a single synchronous
//! scoped operation - refreshes cannot overlap, which is what rules out
//! the stale-response-overwrites-newer race a browser client would have
//! to worry about.

use crate::analysis::paginate::{self, NavWindow, PageState};
use crate::ingest::routes::{self, ReportedStatistics, RoutesData};
use crate::ingest::samples::{self, SampleTable};
use crate::ingest::statistics::{self, DetailedStatistics};
use crate::logging::{self, Endpoint};
use crate::model::{FetchError, FilterState, Record};
use crate::store::RecordStore;

// ---------------------------------------------------------------------------
// Result slots
// ---------------------------------------------------------------------------

/// One endpoint's dedicated result slot.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot<T> {
    /// Nothing fetched yet.
    Empty,
    Ready(T),
    /// The endpoint failed; its table shows an inline error state.
    Failed(FetchError),
}

impl<T> Slot<T> {
    pub fn ready(&self) -> Option<&T> {
        match self {
            Slot::Ready(value) => Some(value),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&FetchError> {
        match self {
            Slot::Failed(err) => Some(err),
            _ => None,
        }
    }

    fn from_result(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(value) => Slot::Ready(value),
            Err(err) => Slot::Failed(err),
        }
    }
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Slot::Empty
    }
}

// ---------------------------------------------------------------------------
// Dashboard state
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct DashboardState {
    pub store: RecordStore,
    pub filter: FilterState,
    pub page: PageState,
    /// Summary block the routes endpoint reported, kept for cross-checking
    /// against `store.summary()`.
    pub routes_slot: Slot<ReportedStatistics>,
    pub statistics_slot: Slot<DetailedStatistics>,
    pub samples_slot: Slot<SampleTable>,
}

impl DashboardState {
    /// Fetches all three endpoints concurrently and applies the results.
    /// Never fails as a whole: each endpoint lands in its own slot.
    pub fn refresh(&mut self, client: &reqwest::blocking::Client, base_url: &str) {
        let (routes, stats, samples) = std::thread::scope(|scope| {
            let routes = scope.spawn(|| routes::fetch_routes(client, base_url));
            let stats = scope.spawn(|| statistics::fetch_detailed_statistics(client, base_url));
            let samples = scope.spawn(|| samples::fetch_sample_table(client, base_url));
            (
                join_fetch(routes.join()),
                join_fetch(stats.join()),
                join_fetch(samples.join()),
            )
        });
        self.apply_fetch_results(routes, stats, samples);
    }

    /// Pure half of `refresh`: writes the slots, replaces the record store
    /// on a successful routes fetch, and re-derives the filtered view and
    /// page state for the new data.
    pub fn apply_fetch_results(
        &mut self,
        routes: Result<RoutesData, FetchError>,
        stats: Result<DetailedStatistics, FetchError>,
        samples: Result<SampleTable, FetchError>,
    ) {
        match routes {
            Ok(data) => {
                logging::info(
                    Endpoint::Routes,
                    &format!("loaded {} route records", data.records.len()),
                );
                self.store.replace(data.records);
                let active = self.store.apply_filter(&self.filter);
                self.page = PageState::reset(active);
                self.routes_slot = Slot::Ready(data.reported);
            }
            Err(err) => {
                logging::log_fetch_failure(Endpoint::Routes, &err);
                self.routes_slot = Slot::Failed(err);
            }
        }

        if let Err(err) = &stats {
            logging::log_fetch_failure(Endpoint::Statistics, err);
        }
        self.statistics_slot = Slot::from_result(stats);

        if let Err(err) = &samples {
            logging::log_fetch_failure(Endpoint::Samples, err);
        }
        self.samples_slot = Slot::from_result(samples);
    }

    /// Applies a new filter: re-derives the active view and resets
    /// pagination to page 1.
    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
        let active = self.store.apply_filter(&self.filter);
        self.page = PageState::reset(active);
    }

    /// Attempts a page transition. Out-of-range pages are rejected and the
    /// current page stands; returns whether the transition happened.
    pub fn goto_page(&mut self, page: usize) -> bool {
        match self.page.goto(page) {
            Some(next) => {
                self.page = next;
                true
            }
            None => false,
        }
    }

    /// The records of the current page of the active view.
    pub fn current_page_records(&self) -> &[Record] {
        paginate::page_slice(self.store.active(), self.page.current_page, self.page.page_size)
    }

    pub fn nav_window(&self) -> Option<NavWindow> {
        paginate::nav_window(&self.page)
    }
}

/// A fetch thread can only terminate with its fetch result; a panic in one
/// is downgraded to that endpoint's failure slot rather than poisoning the
/// whole refresh.
fn join_fetch<T>(
    joined: std::thread::Result<Result<T, FetchError>>,
) -> Result<T, FetchError> {
    match joined {
        Ok(result) => result,
        Err(_) => Err(FetchError::Network("fetch thread panicked".to_string())),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
