mod histogram;
mod statistics;

pub use self::histogram::{Data, HistogramParams, HistogramRange, UnitRange};
pub use self::statistics::StatisticsParams;
