//! Bus Route Monitoring Dashboard
//!
//! Client-side presentation layer for a vehicle inspection backend: fetches
//! route listings, per-operator statistics, and sampling quotas over HTTP,
//! then filters, paginates, and shapes them into grouped display tables
//! entirely in memory. The backend is the single source of truth for the
//! data; this crate owns everything from the wire format inward.

pub mod analysis;
pub mod config;
pub mod dashboard;
pub mod districts;
pub mod ingest;
pub mod logging;
pub mod model;
pub mod render;
pub mod store;
pub mod verify;
