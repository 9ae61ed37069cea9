use crate::error::{self, Error, Result};
use crate::layers::LayerType;
use serde::{Deserialize, Serialize};
use wave_datatypes::colors::{ColorizerData, RgbaColor};
use wave_datatypes::primitives::{ResultType, Unit};

/// The styling of a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "SymbologyDict", into = "SymbologyDict")]
pub enum Symbology {
    Raster(RasterSymbology),
    Vector(VectorSymbology),
}

#[derive(Debug, Clone, PartialEq)]
pub enum RasterSymbology {
    MappingColorizer(MappingColorizerRasterSymbology),
}

#[derive(Debug, Clone, PartialEq)]
pub enum VectorSymbology {
    SimplePoint(PointSymbology),
    ClusteredPoint(PointSymbology),
    SimpleVector(SimpleVectorSymbology),
}

/// Colors a raster by a colorizer that the mapping engine computes or that is given
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MappingColorizerRasterSymbology {
    pub opacity: f64,
    /// Degrees
    pub hue_rotate: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<Unit>,
    pub colorizer: ColorizerData,
    pub no_data_color: RgbaColor,
    pub overflow_color: RgbaColor,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PointSymbology {
    pub fill_rgba: RgbaColor,
    pub stroke_rgba: RgbaColor,
    pub stroke_width: f64,
    pub radius: f64,
}

/// Lines and polygons
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleVectorSymbology {
    pub fill_rgba: RgbaColor,
    pub stroke_rgba: RgbaColor,
    pub stroke_width: f64,
}

/// The persisted form, a flat union tagged by `symbologyType`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "symbologyType", rename_all = "SCREAMING_SNAKE_CASE")]
enum SymbologyDict {
    MappingColorizerRaster(MappingColorizerRasterSymbology),
    SimplePoint(PointSymbology),
    ClusteredPoint(PointSymbology),
    SimpleVector(SimpleVectorSymbology),
}

impl From<Symbology> for SymbologyDict {
    fn from(symbology: Symbology) -> Self {
        match symbology {
            Symbology::Raster(RasterSymbology::MappingColorizer(s)) => {
                Self::MappingColorizerRaster(s)
            }
            Symbology::Vector(VectorSymbology::SimplePoint(s)) => Self::SimplePoint(s),
            Symbology::Vector(VectorSymbology::ClusteredPoint(s)) => Self::ClusteredPoint(s),
            Symbology::Vector(VectorSymbology::SimpleVector(s)) => Self::SimpleVector(s),
        }
    }
}

impl From<SymbologyDict> for Symbology {
    fn from(dict: SymbologyDict) -> Self {
        match dict {
            SymbologyDict::MappingColorizerRaster(s) => {
                Self::Raster(RasterSymbology::MappingColorizer(s))
            }
            SymbologyDict::SimplePoint(s) => Self::Vector(VectorSymbology::SimplePoint(s)),
            SymbologyDict::ClusteredPoint(s) => Self::Vector(VectorSymbology::ClusteredPoint(s)),
            SymbologyDict::SimpleVector(s) => Self::Vector(VectorSymbology::SimpleVector(s)),
        }
    }
}

impl Symbology {
    /// The kind of layer this symbology can style
    pub fn layer_type(&self) -> LayerType {
        match self {
            Symbology::Raster(_) => LayerType::Raster,
            Symbology::Vector(_) => LayerType::Vector,
        }
    }

    pub fn symbology_type(&self) -> &'static str {
        match self {
            Symbology::Raster(RasterSymbology::MappingColorizer(_)) => "MAPPING_COLORIZER_RASTER",
            Symbology::Vector(VectorSymbology::SimplePoint(_)) => "SIMPLE_POINT",
            Symbology::Vector(VectorSymbology::ClusteredPoint(_)) => "CLUSTERED_POINT",
            Symbology::Vector(VectorSymbology::SimpleVector(_)) => "SIMPLE_VECTOR",
        }
    }

    pub fn to_dict(&self) -> Result<serde_json::Value> {
        serde_json::to_value(self).map_err(|source| Error::SerdeJson { source })
    }

    pub fn from_dict(dict: &serde_json::Value) -> Result<Self> {
        Self::deserialize(dict).map_err(|source| Error::SerdeJson { source })
    }

    pub fn into_raster(self) -> Result<RasterSymbology> {
        match self {
            Symbology::Raster(symbology) => Ok(symbology),
            Symbology::Vector(_) => error::SymbologyDoesNotMatchLayerType {
                layer_type: LayerType::Raster,
            }
            .fail(),
        }
    }

    pub fn into_vector(self) -> Result<VectorSymbology> {
        match self {
            Symbology::Vector(symbology) => Ok(symbology),
            Symbology::Raster(_) => error::SymbologyDoesNotMatchLayerType {
                layer_type: LayerType::Vector,
            }
            .fail(),
        }
    }
}

impl From<RasterSymbology> for Symbology {
    fn from(symbology: RasterSymbology) -> Self {
        Symbology::Raster(symbology)
    }
}

impl From<VectorSymbology> for Symbology {
    fn from(symbology: VectorSymbology) -> Self {
        Symbology::Vector(symbology)
    }
}

impl RasterSymbology {
    pub fn unit(&self) -> Option<&Unit> {
        match self {
            RasterSymbology::MappingColorizer(s) => s.unit.as_ref(),
        }
    }

    /// Sets `unit` if the symbology has none yet
    #[must_use]
    pub fn with_default_unit(self, unit: Option<&Unit>) -> Self {
        match self {
            RasterSymbology::MappingColorizer(mut s) => {
                if s.unit.is_none() {
                    s.unit = unit.cloned();
                }
                RasterSymbology::MappingColorizer(s)
            }
        }
    }

    pub fn opacity(&self) -> f64 {
        match self {
            RasterSymbology::MappingColorizer(s) => s.opacity,
        }
    }
}

impl MappingColorizerRasterSymbology {
    /// An opaque symbology that leaves the colorizer to the mapping engine.
    ///
    /// If `unit` has a range, a grayscale ramp over it is used instead.
    pub fn create_symbology(unit: Option<Unit>) -> Self {
        let colorizer = unit
            .as_ref()
            .and_then(|u| u.min.zip(u.max))
            .and_then(|(min, max)| ColorizerData::grayscale(min, max).ok())
            .unwrap_or_else(ColorizerData::empty);

        Self {
            opacity: 1.,
            hue_rotate: 0.,
            unit,
            colorizer,
            no_data_color: RgbaColor::transparent(),
            overflow_color: RgbaColor::transparent(),
        }
    }
}

impl PointSymbology {
    pub const DEFAULT_RADIUS: f64 = 5.;
    pub const DEFAULT_CLUSTER_RADIUS: f64 = 10.;

    pub fn create_symbology(fill_rgba: RgbaColor) -> Self {
        Self {
            fill_rgba,
            stroke_rgba: RgbaColor::black(),
            stroke_width: 1.,
            radius: Self::DEFAULT_RADIUS,
        }
    }

    pub fn create_cluster_symbology(fill_rgba: RgbaColor) -> Self {
        Self {
            fill_rgba,
            stroke_rgba: RgbaColor::white(),
            stroke_width: 1.,
            radius: Self::DEFAULT_CLUSTER_RADIUS,
        }
    }
}

impl SimpleVectorSymbology {
    pub fn create_symbology(fill_rgba: RgbaColor) -> Self {
        Self {
            fill_rgba,
            stroke_rgba: RgbaColor::black(),
            stroke_width: 1.,
        }
    }
}

impl VectorSymbology {
    /// A simple symbology for vector data of `result_type`
    pub fn for_result_type(result_type: ResultType, fill_rgba: RgbaColor) -> Result<Self> {
        match result_type {
            ResultType::Points => Ok(VectorSymbology::SimplePoint(
                PointSymbology::create_symbology(fill_rgba),
            )),
            ResultType::Lines | ResultType::Polygons => Ok(VectorSymbology::SimpleVector(
                SimpleVectorSymbology::create_symbology(fill_rgba),
            )),
            ResultType::Raster | ResultType::Plot => error::UnexpectedResultType {
                result_type,
                context: "a vector symbology",
            }
            .fail(),
        }
    }

    pub fn is_clustered(&self) -> bool {
        matches!(self, VectorSymbology::ClusteredPoint(_))
    }

    pub fn fill_rgba(&self) -> RgbaColor {
        match self {
            VectorSymbology::SimplePoint(s) | VectorSymbology::ClusteredPoint(s) => s.fill_rgba,
            VectorSymbology::SimpleVector(s) => s.fill_rgba,
        }
    }
}
