use tracing::{debug, info};

use crate::error::Result;
use crate::models::Region;
use crate::processors::{LoadReport, RegionClassifier};
use crate::readers::DatasetSource;
use crate::settings::Settings;
use crate::utils::progress::ProgressReporter;
use crate::writers::{MemorySink, RegionStore};

/// Fetch, reset the region tables, classify and load.
pub struct MeteoritePipeline {
    settings: Settings,
    skip_malformed: bool,
    dry_run: bool,
    silent: bool,
}

impl MeteoritePipeline {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings,
            skip_malformed: false,
            dry_run: false,
            silent: false,
        }
    }

    pub fn with_skip_malformed(mut self, skip_malformed: bool) -> Self {
        self.skip_malformed = skip_malformed;
        self
    }

    /// Classify without opening the database.
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_silent(mut self, silent: bool) -> Self {
        self.silent = silent;
        self
    }

    pub async fn run(&self, source: &dyn DatasetSource) -> Result<LoadReport> {
        let mut report = LoadReport::new(source.describe());
        report.dry_run = self.dry_run;

        // The whole dataset is in memory before the store is touched
        let spinner = ProgressReporter::new_spinner("Fetching meteorite dataset...", self.silent);
        let records = source.fetch().await?;
        spinner.finish_with_message(&format!("Fetched {} records", records.len()));
        info!(records = records.len(), "Dataset fetched");

        let classifier = RegionClassifier::new().with_skip_malformed(self.skip_malformed);
        let progress = ProgressReporter::new(
            records.len() as u64,
            "Sorting meteorites into regions...",
            self.silent,
        );

        if self.dry_run {
            let mut sink = MemorySink::new();
            classifier.load(&records, &mut sink, &mut report, &progress)?;
            progress.finish_with_message("Dry run complete");
            info!(rows = sink.total_rows(), "Dry run finished; database untouched");
            return Ok(report);
        }

        let mut store = RegionStore::open(&self.settings.database_path)?;
        store.ensure_and_clear(&Region::ALL)?;
        info!(path = %store.path().display(), "Region tables ready");

        let mut batch = store.begin_load()?;
        classifier.load(&records, &mut batch, &mut report, &progress)?;
        let inserted = batch.commit()?;
        progress.finish_with_message(&format!("Inserted {} rows", inserted));

        for (region, count) in &report.rows_per_region {
            debug!(table = region.table_name(), rows = count, "Region loaded");
        }
        info!(rows = inserted, "Load committed");

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ProcessingError;
    use crate::models::MeteoriteRecord;
    use crate::readers::InMemoryDatasetSource;
    use tempfile::TempDir;

    fn settings_for(dir: &TempDir) -> Settings {
        Settings {
            database_path: dir.path().join("meteorites.db"),
            ..Settings::default()
        }
    }

    #[tokio::test]
    async fn test_dry_run_leaves_no_database() -> Result<()> {
        let dir = TempDir::new()?;
        let settings = settings_for(&dir);
        let db_path = settings.database_path.clone();
        let source = InMemoryDatasetSource::new(vec![
            MeteoriteRecord::new("A").with_coordinates("10.0", "0.0")
        ]);

        let report = MeteoritePipeline::new(settings)
            .with_dry_run(true)
            .with_silent(true)
            .run(&source)
            .await?;

        assert!(report.dry_run);
        assert_eq!(report.rows_for(Region::AfricaMiddleEast), 1);
        assert!(!db_path.exists());
        Ok(())
    }

    #[tokio::test]
    async fn test_failed_load_rolls_back_inserts() -> Result<()> {
        let dir = TempDir::new()?;
        let settings = settings_for(&dir);
        let db_path = settings.database_path.clone();
        let source = InMemoryDatasetSource::new(vec![
            MeteoriteRecord::new("Good").with_coordinates("10.0", "0.0"),
            MeteoriteRecord::new("Bad").with_coordinates("10.0", "zero"),
        ]);

        let result = MeteoritePipeline::new(settings)
            .with_silent(true)
            .run(&source)
            .await;
        assert!(matches!(result, Err(ProcessingError::InvalidCoordinate { .. })));

        // Tables were reset and committed before loading began
        let store = RegionStore::open_read_only(&db_path)?;
        assert_eq!(store.row_count(Region::AfricaMiddleEast)?, 0);
        Ok(())
    }
}
