mod expression;
mod heatmap;
mod r_script;
mod reprojection;
mod rgba_composite;
mod temporal_aggregation;

pub use self::expression::ExpressionParams;
pub use self::heatmap::HeatmapParams;
pub use self::r_script::{RScriptParams, RScriptResult};
pub use self::reprojection::ReprojectionParams;
pub use self::rgba_composite::RgbaCompositeParams;
pub use self::temporal_aggregation::{TemporalAggregationMethod, TemporalAggregationParams};
