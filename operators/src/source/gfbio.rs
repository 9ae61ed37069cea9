use crate::engine::{OperatorParams, ParameterValue};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Occurrence or range data from the GFBio search (e.g. GBIF or IUCN)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GfbioSourceParams {
    /// The data provider, e.g. `GBIF`
    pub data_source: String,
    /// The taxonomic level of `term`, e.g. `species`
    pub level: String,
    pub term: String,
    pub columns: GfbioColumns,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GfbioColumns {
    #[serde(default)]
    pub numeric: Vec<String>,
    #[serde(default)]
    pub textual: Vec<String>,
}

impl OperatorParams for GfbioSourceParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "datasource": self.data_source,
            "query": json!({
                "level": self.level,
                "term": self.term,
            }).to_string(),
            "columns": self.columns,
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("dataSource", self.data_source.as_str().into()),
            ("level", self.level.as_str().into()),
            ("term", self.term.as_str().into()),
        ]
    }
}
