use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Per-source statistics (min, max, mean, …) of rasters and vector attributes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatisticsParams {
    pub raster_width: u32,
    pub raster_height: u32,
}

impl Default for StatisticsParams {
    fn default() -> Self {
        Self {
            raster_width: 1024,
            raster_height: 1024,
        }
    }
}

impl OperatorParams for StatisticsParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "raster_width": self.raster_width,
            "raster_height": self.raster_height,
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("raster_width", f64::from(self.raster_width).into()),
            ("raster_height", f64::from(self.raster_height).into()),
        ]
    }
}
