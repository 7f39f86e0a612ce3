//! The in-memory table engine of the dashboard.
//!
//! Everything in here is a pure, synchronous computation over the canonical
//! model types: no I/O, no markup, no shared state. The presentation layer
//! (`render`) consumes the shaped output; the fetch layer (`ingest`) feeds
//! it. Keeping this split means the engine is unit-testable without a
//! backend and trivially portable.
//!
//! Submodules:
//! - `filter` - multi-predicate record filtering (search + two categorical).
//! - `paginate` - fixed-size page windowing and navigation state.
//! - `aggregate` - district/operator grouping with subtotals and totals.

pub mod aggregate;
pub mod filter;
pub mod paginate;
