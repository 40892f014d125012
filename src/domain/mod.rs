//! Domain types shared across ingest, aggregation, charting, and the dashboard.

mod types;

pub use types::*;
