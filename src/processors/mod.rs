pub mod load_report;
pub mod pipeline;
pub mod region_classifier;

pub use load_report::LoadReport;
pub use pipeline::MeteoritePipeline;
pub use region_classifier::{Classification, RegionClassifier};
