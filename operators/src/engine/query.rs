use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The recursive query graph sent to the mapping engine, e.g.
///
/// ```json
/// {"type": "expression", "params": {…}, "sources": {"raster": [{"type": "rasterdb_source", …}]}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QueryDict {
    #[serde(rename = "type")]
    pub operator_type: String,
    pub params: Value,
    #[serde(default, skip_serializing_if = "QuerySources::is_empty")]
    pub sources: QuerySources,
}

/// The sources of a query node by category, in the fixed order raster, points, lines, polygons
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct QuerySources {
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raster: Vec<QueryDict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub points: Vec<QueryDict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub lines: Vec<QueryDict>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub polygons: Vec<QueryDict>,
}

impl QuerySources {
    pub fn is_empty(&self) -> bool {
        self.raster.is_empty()
            && self.points.is_empty()
            && self.lines.is_empty()
            && self.polygons.is_empty()
    }
}

impl QueryDict {
    /// Sets a parameter of this node, e.g. the plot size of an R script
    pub fn set_param(&mut self, name: &str, value: impl Into<Value>) {
        if let Value::Object(params) = &mut self.params {
            params.insert(name.to_string(), value.into());
        }
    }
}
