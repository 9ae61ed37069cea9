use serde::{Deserialize, Serialize};

/// How values between two measurements are to be interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interpolation {
    Continuous,
    Discrete,
    Unknown,
}

impl Interpolation {
    /// The lower-case name used on the wire
    pub fn mapping_name(self) -> &'static str {
        match self {
            Interpolation::Continuous => "continuous",
            Interpolation::Discrete => "discrete",
            Interpolation::Unknown => "unknown",
        }
    }
}

/// The measurement semantics of a data channel
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Unit {
    pub measurement: String,
    pub unit: String,
    pub interpolation: Interpolation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

/// The wire form of a [`Unit`]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnitMappingDict {
    pub measurement: String,
    pub unit: String,
    pub interpolation: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

impl Unit {
    pub fn new(
        measurement: impl Into<String>,
        unit: impl Into<String>,
        interpolation: Interpolation,
    ) -> Self {
        Self {
            measurement: measurement.into(),
            unit: unit.into(),
            interpolation,
            min: None,
            max: None,
        }
    }

    #[must_use]
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        self.min = Some(min);
        self.max = Some(max);
        self
    }

    /// The unit assumed when nothing is known about the data
    pub fn default_unit() -> Self {
        Self::new("raw", "unknown", Interpolation::Continuous)
    }

    pub fn to_mapping_dict(&self) -> UnitMappingDict {
        UnitMappingDict {
            measurement: self.measurement.clone(),
            unit: self.unit.clone(),
            interpolation: self.interpolation.mapping_name(),
            min: self.min,
            max: self.max,
        }
    }
}

impl Default for Unit {
    fn default() -> Self {
        Self::default_unit()
    }
}
