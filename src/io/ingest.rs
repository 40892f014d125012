//! CSV ingest and validation.
//!
//! This module turns the automobile sales CSV into a `SalesDataset` that is
//! safe to aggregate.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail-fast rows**: the first malformed row aborts the load with its
//!   1-based line number; downstream code assumes well-formed input
//! - **Deterministic behavior** (row order preserved as read)
//! - **Separation of concerns**: no aggregation logic here

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{SalesDataset, SalesRecord};
use crate::error::AppError;

/// Required columns, by the exact (case-insensitive) header names the
/// upstream dataset uses.
pub const REQUIRED_COLUMNS: [&str; 10] = [
    "year",
    "month",
    "vehicle_type",
    "recession",
    "automobile_sales",
    "gdp",
    "advertising_expenditure",
    "unemployment_rate",
    "seasonality_weight",
    "price",
];

/// Summary stats about the rows actually loaded.
#[derive(Debug, Clone)]
pub struct DatasetStats {
    pub rows_read: usize,
    pub year_min: i32,
    pub year_max: i32,
    pub vehicle_types: Vec<String>,
}

/// Ingest output: the dataset plus its summary stats.
#[derive(Debug, Clone)]
pub struct IngestedData {
    pub dataset: SalesDataset,
    pub stats: DatasetStats,
}

/// Load the sales CSV at `path` into a `SalesDataset`.
///
/// Fatal conditions (the only error class this program recognizes):
/// missing file, missing required columns, malformed rows, empty file.
pub fn load_dataset(path: &Path) -> Result<IngestedData, AppError> {
    let file = File::open(path)
        .map_err(|e| AppError::input(format!("Failed to open CSV '{}': {e}", path.display())))?;
    load_dataset_from_reader(file, &path.display().to_string())
}

/// Reader-based variant so tests can load from in-memory CSV text.
pub fn load_dataset_from_reader(reader: impl Read, source: &str) -> Result<IngestedData, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers from '{source}': {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_required_columns_exist(&header_map)?;

    let mut records = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record = result
            .map_err(|e| AppError::input(format!("CSV parse error at line {line}: {e}")))?;

        let row = parse_row(&record, &header_map)
            .map_err(|e| AppError::input(format!("Invalid row at line {line}: {e}")))?;
        records.push(row);
    }

    if records.is_empty() {
        return Err(AppError::new(3, format!("CSV '{source}' contains no data rows.")));
    }

    let dataset = SalesDataset::new(records);
    let stats = compute_stats(&dataset);
    Ok(IngestedData { dataset, stats })
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on
    // the first header (e.g. "﻿Year"). If we don't strip it, schema
    // validation will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_required_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    let missing: Vec<&str> = REQUIRED_COLUMNS
        .iter()
        .copied()
        .filter(|name| !header_map.contains_key(*name))
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(AppError::input(format!(
            "Missing required column(s): {}",
            missing.join(", ")
        )))
    }
}

fn parse_row(record: &StringRecord, header_map: &HashMap<String, usize>) -> Result<SalesRecord, String> {
    let year = parse_i32(get_required(record, header_map, "year")?, "Year")?;

    let month = parse_i64(get_required(record, header_map, "month")?, "Month")?;
    if !(1..=12).contains(&month) {
        return Err(format!("`Month` out of range 1..=12: {month}"));
    }

    let vehicle_type = get_required(record, header_map, "vehicle_type")?.to_string();
    let recession = parse_flag(get_required(record, header_map, "recession")?)?;

    Ok(SalesRecord {
        year,
        month: month as u32,
        vehicle_type,
        recession,
        automobile_sales: parse_f64(get_required(record, header_map, "automobile_sales")?, "Automobile_Sales")?,
        gdp: parse_f64(get_required(record, header_map, "gdp")?, "GDP")?,
        advertising_expenditure: parse_f64(
            get_required(record, header_map, "advertising_expenditure")?,
            "Advertising_Expenditure",
        )?,
        unemployment_rate: parse_f64(get_required(record, header_map, "unemployment_rate")?, "unemployment_rate")?,
        seasonality_weight: parse_f64(get_required(record, header_map, "seasonality_weight")?, "Seasonality_Weight")?,
        price: parse_f64(get_required(record, header_map, "price")?, "Price")?,
    })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

fn parse_i32(s: &str, column: &str) -> Result<i32, String> {
    s.parse::<i32>()
        .map_err(|_| format!("Invalid `{column}` value '{s}' (expected an integer)."))
}

fn parse_i64(s: &str, column: &str) -> Result<i64, String> {
    s.parse::<i64>()
        .map_err(|_| format!("Invalid `{column}` value '{s}' (expected an integer)."))
}

fn parse_f64(s: &str, column: &str) -> Result<f64, String> {
    let v = s
        .parse::<f64>()
        .map_err(|_| format!("Invalid `{column}` value '{s}' (expected a number)."))?;
    if v.is_finite() {
        Ok(v)
    } else {
        Err(format!("Non-finite `{column}` value '{s}'."))
    }
}

fn parse_flag(s: &str) -> Result<bool, String> {
    match s {
        "0" => Ok(false),
        "1" => Ok(true),
        other => Err(format!("Invalid `Recession` flag '{other}' (expected 0 or 1).")),
    }
}

fn compute_stats(dataset: &SalesDataset) -> DatasetStats {
    // `load_dataset_from_reader` rejects empty datasets before this point.
    let (year_min, year_max) = dataset.year_span().unwrap_or((0, 0));
    DatasetStats {
        rows_read: dataset.len(),
        year_min,
        year_max,
        vehicle_types: dataset.vehicle_types(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Year,Month,Vehicle_Type,Recession,Automobile_Sales,GDP,Advertising_Expenditure,unemployment_rate,Seasonality_Weight,Price";

    fn load(text: &str) -> Result<IngestedData, AppError> {
        load_dataset_from_reader(text.as_bytes(), "test.csv")
    }

    #[test]
    fn loads_well_formed_rows() {
        let csv = format!("{HEADER}\n2000,1,Sports,0,125.5,40000,1200,5.2,0.8,25000\n2000,2,Sedan,1,90.0,39000,800,6.1,1.1,18000\n");
        let data = load(&csv).unwrap();
        assert_eq!(data.dataset.len(), 2);
        assert_eq!(data.stats.year_min, 2000);
        assert_eq!(data.stats.vehicle_types, vec!["Sports", "Sedan"]);
        let first = &data.dataset.records()[0];
        assert_eq!(first.year, 2000);
        assert!(!first.recession);
        assert!((first.automobile_sales - 125.5).abs() < 1e-12);
    }

    #[test]
    fn missing_column_is_fatal() {
        let csv = "Year,Month,Vehicle_Type\n2000,1,Sports\n";
        let err = load(csv).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("recession"), "got: {err}");
    }

    #[test]
    fn malformed_row_reports_line_number() {
        let csv = format!("{HEADER}\n2000,1,Sports,0,125.5,40000,1200,5.2,0.8,25000\n2000,13,Sedan,1,90.0,39000,800,6.1,1.1,18000\n");
        let err = load(&csv).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("line 3"), "got: {err}");
    }

    #[test]
    fn bad_recession_flag_is_fatal() {
        let csv = format!("{HEADER}\n2000,1,Sports,yes,125.5,40000,1200,5.2,0.8,25000\n");
        let err = load(&csv).unwrap_err();
        assert!(err.to_string().contains("Recession"), "got: {err}");
    }

    #[test]
    fn out_of_range_year_is_fatal_not_wrapped() {
        let csv = format!("{HEADER}\n4294967298,1,Sports,0,125.5,40000,1200,5.2,0.8,25000\n");
        let err = load(&csv).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Year"), "got: {err}");
    }

    #[test]
    fn empty_file_is_fatal() {
        let err = load(&format!("{HEADER}\n")).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn bom_prefixed_header_is_accepted() {
        let csv = format!("\u{feff}{HEADER}\n2000,1,Sports,0,1,1,1,1,1,1\n");
        assert_eq!(load(&csv).unwrap().dataset.len(), 1);
    }
}
