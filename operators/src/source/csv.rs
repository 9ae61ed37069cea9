use crate::engine::{OperatorParams, ParameterValue};
use crate::util::number::{format_number, js_number};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Reads features from a CSV file that is embedded as a data URI or referenced by URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CsvSourceParams {
    #[serde(rename = "dataURI")]
    pub data_uri: String,
    pub parameters: CsvParameters,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvParameters {
    pub field_separator: String,
    pub geometry: CsvGeometry,
    pub time: CsvTime,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_format: Option<CsvTimeFormats>,
    /// Explicit column names, `None` if the file has a header row
    #[serde(default)]
    pub header: Option<Vec<String>>,
    pub columns: CsvColumns,
    pub on_error: CsvErrorHandling,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvGeometry {
    Xy,
    Wkt,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CsvTime {
    Kind(CsvTimeKind),
    /// A start column with a constant duration in seconds
    ConstantDuration { r#use: CsvTimeStart, duration: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CsvTimeKind {
    #[serde(rename = "none")]
    None,
    #[serde(rename = "start+inf")]
    StartInf,
    #[serde(rename = "start+end")]
    StartEnd,
    #[serde(rename = "start+duration")]
    StartDuration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvTimeStart {
    Start,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvTimeFormats {
    pub time1: CsvTimeFormat,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time2: Option<CsvTimeFormat>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CsvTimeFormat {
    pub format: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CsvColumns {
    pub x: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub y: Option<String>,
    #[serde(default)]
    pub numeric: Vec<String>,
    #[serde(default)]
    pub textual: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time1: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time2: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CsvErrorHandling {
    Skip,
    Abort,
    Keep,
}

impl CsvTimeKind {
    pub fn as_str(self) -> &'static str {
        match self {
            CsvTimeKind::None => "none",
            CsvTimeKind::StartInf => "start+inf",
            CsvTimeKind::StartEnd => "start+end",
            CsvTimeKind::StartDuration => "start+duration",
        }
    }
}

impl CsvTime {
    fn display_value(&self) -> String {
        match self {
            CsvTime::Kind(kind) => kind.as_str().to_string(),
            CsvTime::ConstantDuration { duration, .. } => {
                format!("start+{}s", format_number(*duration))
            }
        }
    }

    fn to_mapping_value(self) -> Value {
        match self {
            CsvTime::Kind(kind) => kind.as_str().into(),
            CsvTime::ConstantDuration { duration, .. } => {
                json!({"use": "start", "duration": js_number(duration)})
            }
        }
    }
}

impl OperatorParams for CsvSourceParams {
    /// The server expects the data URI as `filename` next to the parsing parameters
    fn mapping_dict(&self) -> Value {
        let parameters = &self.parameters;

        let mut dict = Map::new();
        dict.insert("filename".to_string(), self.data_uri.clone().into());
        dict.insert(
            "fieldSeparator".to_string(),
            parameters.field_separator.clone().into(),
        );
        dict.insert("geometry".to_string(), json!(parameters.geometry));
        dict.insert("time".to_string(), parameters.time.to_mapping_value());
        if let Some(time_format) = &parameters.time_format {
            dict.insert("timeFormat".to_string(), json!(time_format));
        }
        if let Some(header) = &parameters.header {
            dict.insert("header".to_string(), json!(header));
        }
        dict.insert("columns".to_string(), json!(parameters.columns));
        dict.insert("onError".to_string(), json!(parameters.on_error));

        Value::Object(dict)
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        let parameters = &self.parameters;
        let geometry = match parameters.geometry {
            CsvGeometry::Xy => "xy",
            CsvGeometry::Wkt => "wkt",
        };
        let on_error = match parameters.on_error {
            CsvErrorHandling::Skip => "skip",
            CsvErrorHandling::Abort => "abort",
            CsvErrorHandling::Keep => "keep",
        };

        let mut list = vec![
            ("dataURI", ParameterValue::from(self.data_uri.as_str())),
            (
                "fieldSeparator",
                ParameterValue::from(parameters.field_separator.as_str()),
            ),
            ("geometry", ParameterValue::from(geometry)),
            ("time", ParameterValue::options(parameters.time.display_value())),
            ("x", ParameterValue::from(parameters.columns.x.as_str())),
        ];
        if let Some(y) = &parameters.columns.y {
            list.push(("y", ParameterValue::from(y.as_str())));
        }
        list.push((
            "numeric",
            ParameterValue::options(parameters.columns.numeric.join(", ")),
        ));
        list.push((
            "textual",
            ParameterValue::options(parameters.columns.textual.join(", ")),
        ));
        list.push(("onError", ParameterValue::from(on_error)));

        list
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn points_csv() -> CsvSourceParams {
        CsvSourceParams {
            data_uri: "data:text/plain,x;y;name\n1;2;foo".to_string(),
            parameters: CsvParameters {
                field_separator: ";".to_string(),
                geometry: CsvGeometry::Xy,
                time: CsvTime::Kind(CsvTimeKind::None),
                time_format: None,
                header: None,
                columns: CsvColumns {
                    x: "x".to_string(),
                    y: Some("y".to_string()),
                    numeric: vec![],
                    textual: vec!["name".to_string()],
                    time1: None,
                    time2: None,
                },
                on_error: CsvErrorHandling::Skip,
            },
        }
    }

    #[test]
    fn persistence_form() {
        let dict = serde_json::to_value(points_csv()).unwrap();

        assert_eq!(
            dict,
            json!({
                "dataURI": "data:text/plain,x;y;name\n1;2;foo",
                "parameters": {
                    "fieldSeparator": ";",
                    "geometry": "xy",
                    "time": "none",
                    "header": null,
                    "columns": {
                        "x": "x",
                        "y": "y",
                        "numeric": [],
                        "textual": ["name"],
                    },
                    "onError": "skip",
                }
            })
        );

        assert_eq!(serde_json::from_value::<CsvSourceParams>(dict).unwrap(), points_csv());
    }

    #[test]
    fn constant_duration() {
        let time: CsvTime =
            serde_json::from_value(json!({"use": "start", "duration": 60})).unwrap();

        assert_eq!(
            time,
            CsvTime::ConstantDuration {
                r#use: CsvTimeStart::Start,
                duration: 60.
            }
        );
        assert_eq!(time.to_mapping_value(), json!({"use": "start", "duration": 60}));
        assert_eq!(time.display_value(), "start+60s");
    }

    #[test]
    fn mapping_form() {
        let dict = points_csv().mapping_dict();

        assert_eq!(dict["filename"], json!("data:text/plain,x;y;name\n1;2;foo"));
        assert_eq!(dict["time"], json!("none"));
        assert_eq!(dict["columns"]["textual"], json!(["name"]));
        assert!(dict.get("header").is_none());
        assert!(dict.get("dataURI").is_none());
    }
}
