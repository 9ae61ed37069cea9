use crate::util::number::format_number;
use serde_json::Value;

/// The value of a single operator parameter as shown to users
#[derive(Debug, Clone, PartialEq)]
pub enum ParameterValue {
    Number(f64),
    Text(String),
    /// Complex values that only provide a display representation
    Options { display_value: String },
}

impl ParameterValue {
    pub fn options(display_value: impl Into<String>) -> Self {
        Self::Options {
            display_value: display_value.into(),
        }
    }

    pub fn display_value(&self) -> String {
        match self {
            ParameterValue::Number(number) => format_number(*number),
            ParameterValue::Text(text) => text.clone(),
            ParameterValue::Options { display_value } => display_value.clone(),
        }
    }
}

impl From<f64> for ParameterValue {
    fn from(number: f64) -> Self {
        Self::Number(number)
    }
}

impl From<&str> for ParameterValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for ParameterValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

/// The capabilities every operator parameter set provides
pub trait OperatorParams {
    /// The parameters in the shape the mapping engine expects
    fn mapping_dict(&self) -> Value;

    /// The parameters in display order
    fn parameters(&self) -> Vec<(&'static str, ParameterValue)>;
}
