use serde::{Deserialize, Serialize};

/// Information on how to properly cite a data entry
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Provenance {
    pub citation: String,
    pub license: String,
    pub uri: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub local_identifier: Option<String>,
}
