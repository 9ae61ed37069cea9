use crate::engine::{OperatorParams, ParameterValue};
use crate::util::number::js_number;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Aggregates the values of a source over a time window that starts at the query time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemporalAggregationParams {
    /// Window length in seconds
    pub duration: f64,
    pub aggregation: TemporalAggregationMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TemporalAggregationMethod {
    Min,
    Max,
    Avg,
}

impl TemporalAggregationMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            TemporalAggregationMethod::Min => "min",
            TemporalAggregationMethod::Max => "max",
            TemporalAggregationMethod::Avg => "avg",
        }
    }
}

impl OperatorParams for TemporalAggregationParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "duration": js_number(self.duration),
            "aggregation": self.aggregation.as_str(),
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("duration", self.duration.into()),
            ("aggregation", self.aggregation.as_str().into()),
        ]
    }
}
