use std::path::PathBuf;

use tracing::info;

use crate::cli::args::{Cli, Commands, LoadArgs};
use crate::error::{ProcessingError, Result};
use crate::models::Region;
use crate::processors::MeteoritePipeline;
use crate::readers::{DatasetSource, FileDatasetSource, HttpDatasetSource};
use crate::settings::{Settings, SettingsOverrides};
use crate::utils::logging::init_logging;
use crate::writers::RegionStore;

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.quiet, cli.log_file.as_deref())?;

    match cli.command.unwrap_or_else(|| Commands::Load(LoadArgs::default())) {
        Commands::Load(args) => {
            let overrides = SettingsOverrides {
                source_url: args.source_url.clone(),
                database_path: args.database.clone(),
            };
            let settings = Settings::load(cli.config.as_deref(), &overrides)?;
            load(settings, &args, cli.quiet).await?;
        }

        Commands::Regions => {
            println!("{:<30} Bounding box", "Table");
            for region in Region::ALL {
                println!("{:<30} {}", region.table_name(), region.bounding_box());
            }
        }

        Commands::Info { database, sample } => {
            let overrides = SettingsOverrides {
                source_url: None,
                database_path: database,
            };
            let settings = Settings::load(cli.config.as_deref(), &overrides)?;
            show_info(settings.database_path, sample)?;
        }
    }

    Ok(())
}

async fn load(settings: Settings, args: &LoadArgs, quiet: bool) -> Result<()> {
    let source: Box<dyn DatasetSource> = match &args.input_file {
        Some(path) => Box::new(FileDatasetSource::new(path)),
        None => Box::new(HttpDatasetSource::new(
            settings.source_url.clone(),
            settings.user_agent.clone(),
        )),
    };

    info!(
        source = %source.describe(),
        database = %settings.database_path.display(),
        dry_run = args.dry_run,
        "Starting meteorite load"
    );

    let pipeline = MeteoritePipeline::new(settings)
        .with_skip_malformed(args.skip_malformed)
        .with_dry_run(args.dry_run)
        .with_silent(quiet);

    let report = pipeline.run(source.as_ref()).await?;

    if args.json {
        let json = serde_json::to_string_pretty(&report).map_err(ProcessingError::Report)?;
        println!("{json}");
    } else if !quiet {
        println!("\n{}", report.summary());
    }

    Ok(())
}

fn show_info(database_path: PathBuf, sample: usize) -> Result<()> {
    let store = RegionStore::open_read_only(&database_path)?;
    println!("Region store: {}\n", database_path.display());

    let mut total = 0;
    for region in Region::ALL {
        let count = store.row_count(region)?;
        total += count;
        println!("{:<30} {:>7}", region.table_name(), count);
    }
    println!("{:<30} {:>7}", "Total", total);

    if sample == 0 {
        return Ok(());
    }

    for region in Region::ALL {
        let rows = store.sample_rows(region, sample)?;
        if rows.is_empty() {
            continue;
        }

        println!("\n{} (showing {} rows):", region.display_name(), rows.len());
        for (i, row) in rows.iter().enumerate() {
            println!(
                "{}. {} mass={} at ({}, {})",
                i + 1,
                row.name,
                row.mass_or_unknown(),
                row.reclat,
                row.reclong
            );
        }
    }

    Ok(())
}
