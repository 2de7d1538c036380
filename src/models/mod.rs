pub mod meteorite;
pub mod region;

pub use meteorite::{MeteoriteRecord, RegionRow};
pub use region::{BoundingBox, Region};
