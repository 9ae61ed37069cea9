use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wave_datatypes::projection::Projection;

/// Transforms the source from `src_projection` into `dest_projection`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReprojectionParams {
    pub src_projection: Projection,
    pub dest_projection: Projection,
}

impl OperatorParams for ReprojectionParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "src_projection": self.src_projection.code(),
            "dest_projection": self.dest_projection.code(),
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            (
                "srcProjection",
                ParameterValue::options(self.src_projection.code()),
            ),
            (
                "destProjection",
                ParameterValue::options(self.dest_projection.code()),
            ),
        ]
    }
}
