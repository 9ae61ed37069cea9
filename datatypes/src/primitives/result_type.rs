use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::IntoStaticStr;

/// The output kind of an operator
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    IntoStaticStr,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResultType {
    Raster,
    Points,
    Lines,
    Polygons,
    Plot,
}

impl ResultType {
    /// The code used in requests, e.g. `points`
    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn is_vector(self) -> bool {
        matches!(
            self,
            ResultType::Points | ResultType::Lines | ResultType::Polygons
        )
    }
}

impl FromStr for ResultType {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s {
            "raster" => ResultType::Raster,
            "points" => ResultType::Points,
            "lines" => ResultType::Lines,
            "polygons" => ResultType::Polygons,
            "plot" => ResultType::Plot,
            _ => return Err(error::Error::UnknownResultType { code: s.into() }),
        })
    }
}

impl std::fmt::Display for ResultType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn codes() {
        for result_type in ResultType::iter() {
            assert_eq!(result_type.code().parse::<ResultType>().unwrap(), result_type);
            assert_eq!(
                serde_json::to_value(result_type).unwrap(),
                serde_json::Value::String(result_type.code().to_string())
            );
        }

        assert!("RASTER".parse::<ResultType>().is_err());
    }

    #[test]
    fn vector_types() {
        assert!(!ResultType::Raster.is_vector());
        assert!(ResultType::Points.is_vector());
        assert!(ResultType::Lines.is_vector());
        assert!(ResultType::Polygons.is_vector());
        assert!(!ResultType::Plot.is_vector());
    }
}
