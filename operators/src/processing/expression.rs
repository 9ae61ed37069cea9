use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use wave_datatypes::primitives::{DataType, Unit};

/// Computes a raster from an arithmetic expression over its raster sources (`A`, `B`, …)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpressionParams {
    pub expression: String,
    pub data_type: DataType,
    pub unit: Unit,
}

impl OperatorParams for ExpressionParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "expression": self.expression,
            "datatype": self.data_type.code(),
            "unit": self.unit.to_mapping_dict(),
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("expression", self.expression.as_str().into()),
            ("datatype", self.data_type.code().into()),
            (
                "unit",
                ParameterValue::options(format!(
                    "{} ({})",
                    self.unit.measurement, self.unit.unit
                )),
            ),
        ]
    }
}
