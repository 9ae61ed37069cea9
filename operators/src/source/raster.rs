use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// A channel of a raster stored in the raster database of the mapping engine
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RasterSourceParams {
    pub source_name: String,
    pub channel: u32,
    /// Whether to apply the channel's unit transformation
    #[serde(default = "default_transform")]
    pub transform: bool,
}

fn default_transform() -> bool {
    true
}

impl OperatorParams for RasterSourceParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "sourcename": self.source_name,
            "channel": self.channel,
            "transform": self.transform,
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("sourceName", self.source_name.as_str().into()),
            ("channel", f64::from(self.channel).into()),
            (
                "transform",
                ParameterValue::options(if self.transform { "yes" } else { "no" }),
            ),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transform_defaults_to_true() {
        let params: RasterSourceParams =
            serde_json::from_value(json!({"sourceName": "srtm", "channel": 0})).unwrap();

        assert!(params.transform);
        assert_eq!(
            params.mapping_dict(),
            json!({"sourcename": "srtm", "channel": 0, "transform": true})
        );
    }
}
