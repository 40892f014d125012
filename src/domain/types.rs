//! Shared domain types.
//!
//! These types are intentionally kept lightweight so they can be:
//!
//! - held in-memory for the lifetime of the process
//! - passed by reference through aggregation and chart building
//! - serialized where needed (sample export)

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// One row of the automobile sales dataset.
///
/// Immutable once loaded; rows have no identity beyond their position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    pub year: i32,
    /// Calendar month, 1..=12.
    pub month: u32,
    pub vehicle_type: String,
    /// Recession flag: `true` = recession period (CSV encodes this as 0/1).
    pub recession: bool,
    pub automobile_sales: f64,
    pub gdp: f64,
    pub advertising_expenditure: f64,
    pub unemployment_rate: f64,
    /// Used only to scale marker size in the seasonality bubble chart.
    pub seasonality_weight: f64,
    pub price: f64,
}

/// The loaded dataset: an ordered, read-only collection of rows.
///
/// Loaded once at startup and passed explicitly wherever aggregation needs
/// it; there is no module-level dataset state.
#[derive(Debug, Clone)]
pub struct SalesDataset {
    records: Vec<SalesRecord>,
}

impl SalesDataset {
    pub fn new(records: Vec<SalesRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[SalesRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Distinct vehicle types in first-encounter order.
    ///
    /// The dashboard dropdown is populated from this list and defaults to
    /// its first entry, so insertion order matters.
    pub fn vehicle_types(&self) -> Vec<String> {
        let mut seen = Vec::new();
        for r in &self.records {
            if !seen.iter().any(|v| v == &r.vehicle_type) {
                seen.push(r.vehicle_type.clone());
            }
        }
        seen
    }

    /// Rows matching the given vehicle type (case-sensitive, exact).
    pub fn by_vehicle_type<'a>(&'a self, vehicle_type: &'a str) -> impl Iterator<Item = &'a SalesRecord> {
        self.records.iter().filter(move |r| r.vehicle_type == vehicle_type)
    }

    /// Inclusive year span of the dataset, or `None` when empty.
    pub fn year_span(&self) -> Option<(i32, i32)> {
        let min = self.records.iter().map(|r| r.year).min()?;
        let max = self.records.iter().map(|r| r.year).max()?;
        Some((min, max))
    }
}

/// Configuration for a static chart run, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct ChartConfig {
    pub data_path: PathBuf,
    pub out_dir: PathBuf,
    /// Multiplier applied to `Seasonality_Weight` to get the bubble marker
    /// area in the seasonality chart. The upstream value of 100 has no
    /// documented rationale, so it is kept as a knob rather than a constant.
    pub bubble_scale: f64,
    /// Output image dimensions in pixels.
    pub width: u32,
    pub height: u32,
}

/// Configuration for the dashboard server, derived from CLI flags.
#[derive(Debug, Clone)]
pub struct ServeConfig {
    pub data_path: PathBuf,
    pub addr: String,
    pub port: u16,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(year: i32, vehicle_type: &str) -> SalesRecord {
        SalesRecord {
            year,
            month: 1,
            vehicle_type: vehicle_type.to_string(),
            recession: false,
            automobile_sales: 0.0,
            gdp: 0.0,
            advertising_expenditure: 0.0,
            unemployment_rate: 0.0,
            seasonality_weight: 0.0,
            price: 0.0,
        }
    }

    #[test]
    fn vehicle_types_keep_first_encounter_order() {
        let ds = SalesDataset::new(vec![
            record(2000, "Sports"),
            record(2000, "Sedan"),
            record(2001, "Sports"),
            record(2001, "SUV"),
        ]);
        assert_eq!(ds.vehicle_types(), vec!["Sports", "Sedan", "SUV"]);
    }

    #[test]
    fn year_span_empty_is_none() {
        let ds = SalesDataset::new(vec![]);
        assert_eq!(ds.year_span(), None);
    }
}
