use crate::engine::{OperatorParams, ParameterValue};
use crate::string_token;
use crate::util::number::{format_number, js_number};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// A histogram plot about either a raster or one attribute of a vector input
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistogramParams {
    /// Name of the (numeric) attribute to compute the histogram on
    pub attribute: String,
    pub range: HistogramRange,
    /// If the number of buckets is undefined, the server chooses it
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buckets: Option<u32>,
}

string_token!(Data, "data");
string_token!(UnitRange, "unit");

/// Let the range either be computed from the data, taken from the unit or given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum HistogramRange {
    Data(Data),
    Unit(UnitRange),
    Values { min: f64, max: f64 },
}

impl HistogramRange {
    fn to_mapping_value(&self) -> Value {
        match self {
            HistogramRange::Data(data) => json!(data),
            HistogramRange::Unit(unit) => json!(unit),
            HistogramRange::Values { min, max } => {
                json!({"min": js_number(*min), "max": js_number(*max)})
            }
        }
    }

    fn display_value(&self) -> String {
        match self {
            HistogramRange::Data(data) => data.to_string(),
            HistogramRange::Unit(unit) => unit.to_string(),
            HistogramRange::Values { min, max } => {
                format!("[{}, {}]", format_number(*min), format_number(*max))
            }
        }
    }
}

impl OperatorParams for HistogramParams {
    fn mapping_dict(&self) -> Value {
        let mut dict = Map::new();
        dict.insert("attribute".to_string(), self.attribute.clone().into());
        dict.insert("range".to_string(), self.range.to_mapping_value());
        if let Some(buckets) = self.buckets {
            dict.insert("buckets".to_string(), buckets.into());
        }
        Value::Object(dict)
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        let mut parameters = vec![
            ("attribute", self.attribute.as_str().into()),
            ("range", ParameterValue::options(self.range.display_value())),
        ];
        if let Some(buckets) = self.buckets {
            parameters.push(("buckets", f64::from(buckets).into()));
        }
        parameters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serialization() {
        let histogram = HistogramParams {
            attribute: "value".to_string(),
            range: HistogramRange::Values { min: 5.0, max: 10.0 },
            buckets: Some(15),
        };

        let serialized = json!({
            "attribute": "value",
            "range": {
                "min": 5.0,
                "max": 10.0,
            },
            "buckets": 15,
        });

        let deserialized: HistogramParams = serde_json::from_value(serialized).unwrap();

        assert_eq!(deserialized, histogram);
        assert_eq!(
            histogram.mapping_dict().to_string(),
            r#"{"attribute":"value","range":{"min":5,"max":10},"buckets":15}"#
        );
    }

    #[test]
    fn serialization_alt() {
        let histogram = HistogramParams {
            attribute: "value".to_string(),
            range: HistogramRange::Data(Data),
            buckets: None,
        };

        let deserialized: HistogramParams = serde_json::from_value(json!({
            "attribute": "value",
            "range": "data",
        }))
        .unwrap();
        assert_eq!(deserialized, histogram);

        let unit_range: HistogramParams = serde_json::from_value(json!({
            "attribute": "value",
            "range": "unit",
        }))
        .unwrap();
        assert_eq!(unit_range.range, HistogramRange::Unit(UnitRange));

        assert!(
            serde_json::from_value::<HistogramParams>(json!({
                "attribute": "value",
                "range": "foo",
            }))
            .is_err()
        );
    }

    #[test]
    fn parameters() {
        let histogram = HistogramParams {
            attribute: "temperature".to_string(),
            range: HistogramRange::Values { min: 0., max: 0.5 },
            buckets: None,
        };

        assert_eq!(
            histogram
                .parameters()
                .into_iter()
                .map(|(name, value)| (name, value.display_value()))
                .collect::<Vec<_>>(),
            vec![
                ("attribute", "temperature".to_string()),
                ("range", "[0, 0.5]".to_string()),
            ]
        );
    }
}
