use crate::engine::{OperatorParams, ParameterValue};
use crate::error::{self, Error};
use crate::plot::{HistogramParams, StatisticsParams};
use crate::processing::{
    ExpressionParams, HeatmapParams, RScriptParams, ReprojectionParams, RgbaCompositeParams,
    TemporalAggregationParams,
};
use crate::source::{CsvSourceParams, GfbioSourceParams, RasterSourceParams};
use crate::util::Result;
use crate::util::icons::create_icon_data_url;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{OptionExt, ResultExt, ensure};
use strum::{EnumIter, IntoEnumIterator};

/// Evaluates `$body` with `$params` bound to the parameters of any variant
macro_rules! with_params {
    ($operator_type:expr, $params:ident => $body:expr) => {
        match $operator_type {
            OperatorType::CsvSource($params) => $body,
            OperatorType::GfbioSource($params) => $body,
            OperatorType::RasterSource($params) => $body,
            OperatorType::Expression($params) => $body,
            OperatorType::Histogram($params) => $body,
            OperatorType::RgbaComposite($params) => $body,
            OperatorType::Heatmap($params) => $body,
            OperatorType::TemporalAggregation($params) => $body,
            OperatorType::Statistics($params) => $body,
            OperatorType::RScript($params) => $body,
            OperatorType::Projection($params) => $body,
        }
    };
}

/// The key of the discriminant in operator type dicts
pub const OPERATOR_TYPE_TAG: &str = "operatorType";

/// What a single node of an operator graph computes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "operatorType", rename_all = "snake_case")]
pub enum OperatorType {
    CsvSource(CsvSourceParams),
    GfbioSource(GfbioSourceParams),
    RasterSource(RasterSourceParams),
    Expression(ExpressionParams),
    Histogram(HistogramParams),
    RgbaComposite(RgbaCompositeParams),
    Heatmap(HeatmapParams),
    TemporalAggregation(TemporalAggregationParams),
    Statistics(StatisticsParams),
    #[serde(rename = "r_script")]
    RScript(RScriptParams),
    Projection(ReprojectionParams),
}

/// The variants of [`OperatorType`] without their parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter)]
pub enum OperatorTypeKind {
    CsvSource,
    GfbioSource,
    RasterSource,
    Expression,
    Histogram,
    RgbaComposite,
    Heatmap,
    TemporalAggregation,
    Statistics,
    RScript,
    Projection,
}

impl OperatorTypeKind {
    /// The discriminant used in persisted dicts
    pub fn type_name(self) -> &'static str {
        match self {
            OperatorTypeKind::CsvSource => "csv_source",
            OperatorTypeKind::GfbioSource => "gfbio_source",
            OperatorTypeKind::RasterSource => "raster_source",
            OperatorTypeKind::Expression => "expression",
            OperatorTypeKind::Histogram => "histogram",
            OperatorTypeKind::RgbaComposite => "rgba_composite",
            OperatorTypeKind::Heatmap => "heatmap",
            OperatorTypeKind::TemporalAggregation => "temporal_aggregation",
            OperatorTypeKind::Statistics => "statistics",
            OperatorTypeKind::RScript => "r_script",
            OperatorTypeKind::Projection => "projection",
        }
    }

    /// The name of the operation in the mapping engine
    pub fn mapping_name(self) -> &'static str {
        match self {
            OperatorTypeKind::RasterSource => "rasterdb_source",
            kind => kind.type_name(),
        }
    }

    /// The human readable name
    pub fn display_name(self) -> &'static str {
        match self {
            OperatorTypeKind::CsvSource => "CSV File",
            OperatorTypeKind::GfbioSource => "GFBio Search",
            OperatorTypeKind::RasterSource => "Raster Source",
            OperatorTypeKind::Expression => "Expression",
            OperatorTypeKind::Histogram => "Histogram",
            OperatorTypeKind::RgbaComposite => "RGBA Composite",
            OperatorTypeKind::Heatmap => "Heatmap",
            OperatorTypeKind::TemporalAggregation => "Temporal Aggregation",
            OperatorTypeKind::Statistics => "Statistics",
            OperatorTypeKind::RScript => "R Script",
            OperatorTypeKind::Projection => "Projection",
        }
    }

    pub fn from_type_name(type_name: &str) -> Option<Self> {
        Self::iter().find(|kind| kind.type_name() == type_name)
    }

    /// The icon of the type as a PNG data URI, derived from its display name
    pub fn icon_url(self) -> Result<String> {
        create_icon_data_url(self.display_name())
    }
}

impl OperatorType {
    pub fn kind(&self) -> OperatorTypeKind {
        match self {
            OperatorType::CsvSource(_) => OperatorTypeKind::CsvSource,
            OperatorType::GfbioSource(_) => OperatorTypeKind::GfbioSource,
            OperatorType::RasterSource(_) => OperatorTypeKind::RasterSource,
            OperatorType::Expression(_) => OperatorTypeKind::Expression,
            OperatorType::Histogram(_) => OperatorTypeKind::Histogram,
            OperatorType::RgbaComposite(_) => OperatorTypeKind::RgbaComposite,
            OperatorType::Heatmap(_) => OperatorTypeKind::Heatmap,
            OperatorType::TemporalAggregation(_) => OperatorTypeKind::TemporalAggregation,
            OperatorType::Statistics(_) => OperatorTypeKind::Statistics,
            OperatorType::RScript(_) => OperatorTypeKind::RScript,
            OperatorType::Projection(_) => OperatorTypeKind::Projection,
        }
    }

    /// The identifier the mapping engine expects for this operation, never empty
    pub fn mapping_name(&self) -> &'static str {
        self.kind().mapping_name()
    }

    /// The discriminant of the persisted dict
    pub fn type_name(&self) -> &'static str {
        self.kind().type_name()
    }

    /// A structural description that [`OperatorType::from_dict`] turns back into an equal instance
    pub fn to_dict(&self) -> Result<Value> {
        serde_json::to_value(self).context(error::SerializeOperatorType)
    }

    /// Restores an operator type from its dict, dispatching on the `operatorType` tag.
    ///
    /// Unknown tags are a construction error.
    pub fn from_dict(dict: &Value) -> Result<Self> {
        let type_name = dict
            .get(OPERATOR_TYPE_TAG)
            .and_then(Value::as_str)
            .context(error::MissingOperatorTypeTag)?;

        ensure!(
            OperatorTypeKind::from_type_name(type_name).is_some(),
            error::UnknownOperatorType {
                operator_type: type_name
            }
        );

        Self::deserialize(dict).context(error::InvalidOperatorTypeDict {
            operator_type: type_name,
        })
    }

    /// The parameters in the wire shape of the mapping engine
    pub fn to_mapping_dict(&self) -> Value {
        with_params!(self, params => params.mapping_dict())
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        with_params!(self, params => params.parameters())
    }

    /// Human readable `(name, value)` pairs in display order
    pub fn parameters_as_strings(&self) -> Vec<(String, String)> {
        self.parameters()
            .into_iter()
            .map(|(name, value)| (name.to_string(), value.display_value()))
            .collect()
    }

    /// The value of the named parameter, `None` if the type has no such parameter
    pub fn parameter_value(&self, parameter_name: &str) -> Option<ParameterValue> {
        self.parameters()
            .into_iter()
            .find_map(|(name, value)| (name == parameter_name).then_some(value))
    }

    pub fn parameter_display_value(&self, parameter_name: &str) -> Option<String> {
        self.parameter_value(parameter_name)
            .map(|value| value.display_value())
    }

    /// Creates a new operator type with the fields of `modifications` overriding the ones of its dict.
    ///
    /// `self` stays untouched. Changing the type itself is an error.
    pub fn clone_with_modifications(&self, modifications: &Value) -> Result<Self> {
        let modifications =
            modifications
                .as_object()
                .context(error::InvalidOperatorTypeModification {
                    reason: "modifications must be an object",
                })?;

        if let Some(tag) = modifications.get(OPERATOR_TYPE_TAG) {
            ensure!(
                tag.as_str() == Some(self.type_name()),
                error::InvalidOperatorTypeModification {
                    reason: format!("cannot change `{}` into `{tag}`", self.type_name()),
                }
            );
        }

        let mut dict = self.to_dict()?;
        if let Value::Object(fields) = &mut dict {
            for (key, value) in modifications {
                fields.insert(key.clone(), value.clone());
            }
        }

        Self::from_dict(&dict).map_err(|error| match error {
            Error::InvalidOperatorTypeDict { source, .. } => {
                Error::InvalidOperatorTypeModification {
                    reason: source.to_string(),
                }
            }
            other => other,
        })
    }

    pub fn icon_url(&self) -> Result<String> {
        self.kind().icon_url()
    }

    /// Whether this type reprojects its sources
    pub fn is_reprojection(&self) -> bool {
        matches!(self, OperatorType::Projection(_))
    }
}

impl std::fmt::Display for OperatorType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.kind().display_name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plot::{Data, HistogramRange};
    use crate::processing::{RScriptResult, TemporalAggregationMethod};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wave_datatypes::projection::Projection;

    fn histogram() -> OperatorType {
        OperatorType::Histogram(HistogramParams {
            attribute: "value".to_string(),
            range: HistogramRange::Data(Data),
            buckets: Some(20),
        })
    }

    #[test]
    fn names() {
        for kind in OperatorTypeKind::iter() {
            assert!(!kind.mapping_name().is_empty());
            assert_eq!(OperatorTypeKind::from_type_name(kind.type_name()), Some(kind));
        }

        assert_eq!(OperatorTypeKind::RasterSource.mapping_name(), "rasterdb_source");
        assert_eq!(OperatorTypeKind::RScript.type_name(), "r_script");
        assert_eq!(histogram().to_string(), "Histogram");
        assert_eq!(histogram().mapping_name(), "histogram");
    }

    #[test]
    fn dict_round_trip() {
        let dict = histogram().to_dict().unwrap();

        assert_eq!(
            dict,
            json!({
                "operatorType": "histogram",
                "attribute": "value",
                "range": "data",
                "buckets": 20,
            })
        );
        assert_eq!(OperatorType::from_dict(&dict).unwrap(), histogram());
    }

    #[test]
    fn dict_tags_match_type_names() {
        let types = [
            histogram(),
            OperatorType::RScript(RScriptParams {
                code: "print(1)".to_string(),
                result_type: RScriptResult::Text,
            }),
            OperatorType::Projection(ReprojectionParams {
                src_projection: Projection::wgs_84(),
                dest_projection: Projection::web_mercator(),
            }),
            OperatorType::Statistics(StatisticsParams::default()),
        ];

        for operator_type in types {
            assert_eq!(
                operator_type.to_dict().unwrap()[OPERATOR_TYPE_TAG],
                json!(operator_type.type_name())
            );
        }
    }

    #[test]
    fn unknown_type() {
        assert!(matches!(
            OperatorType::from_dict(&json!({"operatorType": "foo"})),
            Err(Error::UnknownOperatorType { operator_type }) if operator_type == "foo"
        ));
        assert!(matches!(
            OperatorType::from_dict(&json!({"attribute": "value"})),
            Err(Error::MissingOperatorTypeTag)
        ));
        assert!(matches!(
            OperatorType::from_dict(&json!({"operatorType": "histogram"})),
            Err(Error::InvalidOperatorTypeDict { .. })
        ));
    }

    #[test]
    fn parameter_values() {
        let operator_type = histogram();

        assert_eq!(
            operator_type.parameters_as_strings(),
            vec![
                ("attribute".to_string(), "value".to_string()),
                ("range".to_string(), "data".to_string()),
                ("buckets".to_string(), "20".to_string()),
            ]
        );
        assert_eq!(
            operator_type.parameter_value("buckets"),
            Some(ParameterValue::Number(20.))
        );
        assert_eq!(
            operator_type.parameter_display_value("range"),
            Some("data".to_string())
        );
        assert_eq!(operator_type.parameter_display_value("foo"), None);
    }

    #[test]
    fn clone_with_modifications() {
        let operator_type = histogram();

        let modified = operator_type
            .clone_with_modifications(&json!({"buckets": 5, "range": {"min": 0, "max": 1}}))
            .unwrap();

        assert_eq!(
            modified,
            OperatorType::Histogram(HistogramParams {
                attribute: "value".to_string(),
                range: HistogramRange::Values { min: 0., max: 1. },
                buckets: Some(5),
            })
        );
        assert_eq!(operator_type, histogram());

        assert!(matches!(
            operator_type.clone_with_modifications(&json!({"operatorType": "heatmap"})),
            Err(Error::InvalidOperatorTypeModification { .. })
        ));
        assert!(matches!(
            operator_type.clone_with_modifications(&json!({"buckets": "many"})),
            Err(Error::InvalidOperatorTypeModification { .. })
        ));
        assert!(operator_type.clone_with_modifications(&json!([])).is_err());
    }

    #[test]
    fn mapping_dict_is_deterministic() {
        let operator_type = OperatorType::TemporalAggregation(TemporalAggregationParams {
            duration: 60.,
            aggregation: TemporalAggregationMethod::Max,
        });

        assert_eq!(
            operator_type.to_mapping_dict().to_string(),
            operator_type.clone().to_mapping_dict().to_string()
        );
    }

    #[test]
    fn icons() {
        assert_eq!(histogram().icon_url().unwrap(), histogram().icon_url().unwrap());
        assert_ne!(
            histogram().icon_url().unwrap(),
            OperatorTypeKind::Heatmap.icon_url().unwrap()
        );
    }
}
