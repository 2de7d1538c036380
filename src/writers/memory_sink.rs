use std::collections::HashMap;

use crate::error::Result;
use crate::models::{Region, RegionRow};
use crate::writers::RegionSink;

/// Collects rows in memory instead of writing them; backs `--dry-run`.
#[derive(Debug, Default)]
pub struct MemorySink {
    rows: HashMap<Region, Vec<RegionRow>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rows(&self, region: Region) -> &[RegionRow] {
        self.rows.get(&region).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn total_rows(&self) -> usize {
        self.rows.values().map(Vec::len).sum()
    }
}

impl RegionSink for MemorySink {
    fn insert_row(&mut self, region: Region, row: &RegionRow) -> Result<()> {
        self.rows.entry(region).or_default().push(row.clone());
        Ok(())
    }
}
