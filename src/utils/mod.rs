pub mod constants;
pub mod coordinates;
pub mod logging;
pub mod progress;

pub use constants::*;
pub use coordinates::parse_decimal_coordinate;
pub use logging::init_logging;
pub use progress::ProgressReporter;
