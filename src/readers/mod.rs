pub mod dataset_source;

pub use dataset_source::{
    parse_dataset, DatasetSource, FileDatasetSource, HttpDatasetSource, InMemoryDatasetSource,
};
