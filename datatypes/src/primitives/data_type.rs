use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// The data type of an attribute, identified by its GDAL style code
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
    EnumString,
    EnumIter,
    IntoStaticStr,
    strum::Display,
)]
pub enum DataType {
    Byte,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Float32,
    Float64,
    Alphanumeric,
}

impl DataType {
    pub const ALL_NUMERICS: [DataType; 7] = [
        DataType::Byte,
        DataType::Int16,
        DataType::UInt16,
        DataType::Int32,
        DataType::UInt32,
        DataType::Float32,
        DataType::Float64,
    ];

    /// Looks up a data type by its code, e.g. `UInt32`
    pub fn from_code(code: &str) -> Result<Self> {
        code.parse()
            .map_err(|_| error::Error::UnknownDataType { code: code.into() })
    }

    pub fn code(self) -> &'static str {
        self.into()
    }

    pub fn is_numeric(self) -> bool {
        !matches!(self, DataType::Alphanumeric)
    }

    /// The smallest representable value, `None` for non-numeric types
    pub fn min(self) -> Option<f64> {
        Some(match self {
            DataType::Byte | DataType::UInt16 | DataType::UInt32 => 0.,
            DataType::Int16 => f64::from(i16::MIN),
            DataType::Int32 => f64::from(i32::MIN),
            DataType::Float32 => f64::from(f32::MIN),
            DataType::Float64 => f64::MIN,
            DataType::Alphanumeric => return None,
        })
    }

    /// The largest representable value, `None` for non-numeric types
    pub fn max(self) -> Option<f64> {
        Some(match self {
            DataType::Byte => f64::from(u8::MAX),
            DataType::Int16 => f64::from(i16::MAX),
            DataType::UInt16 => f64::from(u16::MAX),
            DataType::Int32 => f64::from(i32::MAX),
            DataType::UInt32 => f64::from(u32::MAX),
            DataType::Float32 => f64::from(f32::MAX),
            DataType::Float64 => f64::MAX,
            DataType::Alphanumeric => return None,
        })
    }

    /// Returns true if the given `value` can be represented by this data type
    #[allow(clippy::float_cmp)]
    #[allow(clippy::cast_lossless)]
    pub fn is_valid(self, value: f64) -> bool {
        match self {
            DataType::Byte => value as u8 as f64 == value,
            DataType::Int16 => value as i16 as f64 == value,
            DataType::UInt16 => value as u16 as f64 == value,
            DataType::Int32 => value as i32 as f64 == value,
            DataType::UInt32 => value as u32 as f64 == value,
            DataType::Float32 => value.is_nan() || value as f32 as f64 == value,
            DataType::Float64 => true,
            DataType::Alphanumeric => false,
        }
    }
}
