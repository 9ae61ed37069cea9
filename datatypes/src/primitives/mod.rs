mod bounding_box;
mod coordinate;
mod data_type;
mod measurement;
mod result_type;
mod time_instance;
mod time_interval;
mod time_step;

pub use bounding_box::BoundingBox2D;
pub use coordinate::Coordinate2D;
pub use data_type::DataType;
pub use measurement::{Interpolation, Unit, UnitMappingDict};
pub use result_type::ResultType;
pub use time_instance::TimeInstance;
pub use time_interval::{Time, TimeDict, TimeType};
pub use time_step::{TimeGranularity, TimeStep};
