pub mod memory_sink;
pub mod region_store;

pub use memory_sink::MemorySink;
pub use region_store::{RegionBatch, RegionSink, RegionStore};
