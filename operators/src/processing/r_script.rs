use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Runs an R script on the mapping engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RScriptParams {
    pub code: String,
    pub result_type: RScriptResult,
}

/// What the script produces
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RScriptResult {
    Text,
    Plot,
    Raster,
    Points,
    Lines,
    Polygons,
}

impl RScriptResult {
    pub fn as_str(self) -> &'static str {
        match self {
            RScriptResult::Text => "text",
            RScriptResult::Plot => "plot",
            RScriptResult::Raster => "raster",
            RScriptResult::Points => "points",
            RScriptResult::Lines => "lines",
            RScriptResult::Polygons => "polygons",
        }
    }
}

impl OperatorParams for RScriptParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "source": self.code,
            "result": self.result_type.as_str(),
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("code", self.code.as_str().into()),
            ("resultType", self.result_type.as_str().into()),
        ]
    }
}
