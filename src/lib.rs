//! `salesviz` library crate.
//!
//! The binary (`salesviz`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., embedding the aggregator elsewhere)
//! - code stays easy to navigate as the project grows

pub mod agg;
pub mod app;
pub mod charts;
pub mod cli;
pub mod dashboard;
pub mod data;
pub mod domain;
pub mod error;
pub mod io;
pub mod report;
