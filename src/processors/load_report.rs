use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::Region;

/// Outcome of one classification run.
///
/// Serializes to JSON for `load --json`; regions appear by table name.
#[derive(Debug, Clone, Serialize)]
pub struct LoadReport {
    pub started_at: DateTime<Utc>,
    pub source: String,
    pub total_records: usize,
    pub skipped_missing_coordinates: usize,
    pub skipped_malformed: usize,
    /// Parsed cleanly but inside no region box.
    pub unmatched: usize,
    /// Inside at least one region box.
    pub matched: usize,
    /// Inside two or more region boxes.
    pub fan_out_records: usize,
    pub rows_per_region: Vec<(Region, usize)>,
    pub dry_run: bool,
}

impl LoadReport {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            started_at: Utc::now(),
            source: source.into(),
            total_records: 0,
            skipped_missing_coordinates: 0,
            skipped_malformed: 0,
            unmatched: 0,
            matched: 0,
            fan_out_records: 0,
            rows_per_region: Region::ALL.iter().map(|r| (*r, 0)).collect(),
            dry_run: false,
        }
    }

    pub fn record_row(&mut self, region: Region) {
        if let Some((_, count)) = self.rows_per_region.iter_mut().find(|(r, _)| *r == region) {
            *count += 1;
        }
    }

    pub fn rows_for(&self, region: Region) -> usize {
        self.rows_per_region
            .iter()
            .find(|(r, _)| *r == region)
            .map_or(0, |(_, count)| *count)
    }

    pub fn total_rows(&self) -> usize {
        self.rows_per_region.iter().map(|(_, count)| count).sum()
    }

    pub fn summary(&self) -> String {
        let mut summary = String::new();

        summary.push_str("=== Meteorite Load Report ===\n");
        summary.push_str(&format!("Source: {}\n", self.source));
        summary.push_str(&format!(
            "Started: {}\n",
            self.started_at.format("%Y-%m-%d %H:%M:%S UTC")
        ));
        if self.dry_run {
            summary.push_str("Mode: dry run (database untouched)\n");
        }
        summary.push_str(&format!("Total Records: {}\n", self.total_records));
        summary.push_str(&format!(
            "Missing Coordinates: {}\n",
            self.skipped_missing_coordinates
        ));
        if self.skipped_malformed > 0 {
            summary.push_str(&format!(
                "Malformed Coordinates (skipped): {}\n",
                self.skipped_malformed
            ));
        }
        summary.push_str(&format!("Outside Every Region: {}\n", self.unmatched));
        summary.push_str(&format!(
            "Placed: {} ({} in more than one region)\n",
            self.matched, self.fan_out_records
        ));

        summary.push_str("\nRows per Region:\n");
        for (region, count) in &self.rows_per_region {
            summary.push_str(&format!("  {:<30} {:>7}\n", region.table_name(), count));
        }
        summary.push_str(&format!("  {:<30} {:>7}\n", "Total", self.total_rows()));

        summary
    }
}
