/// NASA open-data endpoint for the Meteorite Landings dataset
pub const DEFAULT_SOURCE_URL: &str = "https://data.nasa.gov/resource/gh4g-9sfh.json";

/// Region store file, relative to the working directory
pub const DEFAULT_DATABASE_PATH: &str = "meteorite_db.db";

pub const DEFAULT_USER_AGENT: &str = concat!("meteorite-sorter/", env!("CARGO_PKG_VERSION"));

/// Prefix for `METEORITE_SORTER_*` environment overrides
pub const ENV_PREFIX: &str = "METEORITE_SORTER";

/// Region table columns, in storage order
pub const REGION_COLUMNS: [&str; 4] = ["name", "mass", "reclat", "reclong"];

/// Displayed in place of a missing mass
pub const UNKNOWN_MASS_LABEL: &str = "unknown";

pub const DEFAULT_SAMPLE_ROWS: usize = 5;
