//! Terminal run summaries for the static chart set.

use std::fmt::Write as _;
use std::path::Path;

use crate::io::ingest::DatasetStats;

/// Format the post-run summary printed by `salesviz charts`.
pub fn format_run_summary(stats: &DatasetStats, artifacts: &[String], out_dir: &Path) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Loaded {} rows ({}-{})", stats.rows_read, stats.year_min, stats.year_max);
    let _ = writeln!(out, "Vehicle types: {}", stats.vehicle_types.join(", "));
    let _ = writeln!(out, "Wrote {} charts to {}:", artifacts.len(), out_dir.display());
    for name in artifacts {
        let _ = writeln!(out, "  {name}");
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn summary_lists_artifacts() {
        let stats = DatasetStats {
            rows_read: 24,
            year_min: 2000,
            year_max: 2001,
            vehicle_types: vec!["Sports".to_string(), "Sedan".to_string()],
        };
        let artifacts = vec!["yearly_sales.svg".to_string()];
        let summary = format_run_summary(&stats, &artifacts, Path::new("charts"));
        assert!(summary.contains("24 rows (2000-2001)"));
        assert!(summary.contains("Sports, Sedan"));
        assert!(summary.contains("yearly_sales.svg"));
    }
}
