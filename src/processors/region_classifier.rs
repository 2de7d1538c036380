use tracing::{trace, warn};

use crate::error::{ProcessingError, Result};
use crate::models::{MeteoriteRecord, Region, RegionRow};
use crate::processors::LoadReport;
use crate::utils::progress::ProgressReporter;
use crate::writers::RegionSink;

/// Where a single record ends up.
#[derive(Debug, Clone, PartialEq)]
pub enum Classification {
    /// `reclat` or `reclong` absent; never stored.
    MissingCoordinates,
    /// Coordinates present but not numeric, and skipping was requested.
    Malformed,
    /// Parsed; `regions` may be empty when the point is inside no box.
    Placed { row: RegionRow, regions: Vec<Region> },
}

/// Sorts records into every region whose bounding box contains them.
pub struct RegionClassifier {
    skip_malformed: bool,
}

impl RegionClassifier {
    pub fn new() -> Self {
        Self {
            skip_malformed: false,
        }
    }

    /// Skip records with non-numeric coordinates instead of failing the run.
    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    pub fn classify(&self, record: &MeteoriteRecord) -> Result<Classification> {
        let (latitude, longitude) = match record.parsed_coordinates() {
            Ok(Some(point)) => point,
            Ok(None) => return Ok(Classification::MissingCoordinates),
            Err(e @ ProcessingError::InvalidCoordinate { .. }) if self.skip_malformed => {
                warn!("Skipping record: {}", e);
                return Ok(Classification::Malformed);
            }
            Err(e) => return Err(e),
        };

        let Some(row) = record.to_row() else {
            return Ok(Classification::MissingCoordinates);
        };

        Ok(Classification::Placed {
            row,
            regions: Region::containing(latitude, longitude).collect(),
        })
    }

    /// Classify `records` in order, inserting one row per matching region.
    ///
    /// Each insert is independent; a failure part-way leaves earlier inserts
    /// in the sink for the caller to commit or discard.
    pub fn load<S: RegionSink + ?Sized>(
        &self,
        records: &[MeteoriteRecord],
        sink: &mut S,
        report: &mut LoadReport,
        progress: &ProgressReporter,
    ) -> Result<()> {
        for record in records {
            report.total_records += 1;
            progress.increment(1);

            match self.classify(record)? {
                Classification::MissingCoordinates => {
                    trace!(name = %record.name, "No coordinates; not classified");
                    report.skipped_missing_coordinates += 1;
                }
                Classification::Malformed => report.skipped_malformed += 1,
                Classification::Placed { regions, .. } if regions.is_empty() => {
                    trace!(name = %record.name, "Outside every region");
                    report.unmatched += 1;
                }
                Classification::Placed { row, regions } => {
                    report.matched += 1;
                    if regions.len() > 1 {
                        report.fan_out_records += 1;
                    }
                    for region in regions {
                        sink.insert_row(region, &row)?;
                        report.record_row(region);
                    }
                }
            }
        }

        Ok(())
    }
}

impl Default for RegionClassifier {
    fn default() -> Self {
        Self::new()
    }
}
