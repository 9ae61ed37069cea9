use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Rasterizes point sources into a density raster
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeatmapParams {
    /// The weighting attribute, empty for counting points
    pub attribute: String,
    pub radius: u32,
}

impl OperatorParams for HeatmapParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "attribute": self.attribute,
            "radius": self.radius,
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("attribute", self.attribute.as_str().into()),
            ("radius", f64::from(self.radius).into()),
        ]
    }
}
