use crate::error::{self, Result};
use crate::layers::LayerType;
use serde_json::Value;
use snafu::OptionExt;
use wave_datatypes::primitives::{BoundingBox2D, Time};
use wave_datatypes::projection::Projection;

/// The loaded result of a layer's query
#[derive(Debug, Clone, PartialEq)]
pub enum LayerData {
    Raster(RasterData),
    Vector(VectorData),
}

impl LayerData {
    pub fn layer_type(&self) -> LayerType {
        match self {
            LayerData::Raster(_) => LayerType::Raster,
            LayerData::Vector(_) => LayerType::Vector,
        }
    }

    pub fn time(&self) -> Time {
        match self {
            LayerData::Raster(data) => data.time,
            LayerData::Vector(data) => data.time,
        }
    }

    pub fn projection(&self) -> &Projection {
        match self {
            LayerData::Raster(data) => &data.projection,
            LayerData::Vector(data) => &data.projection,
        }
    }
}

/// An image (URL) of a raster layer
#[derive(Debug, Clone, PartialEq)]
pub struct RasterData {
    time: Time,
    projection: Projection,
    data: String,
}

impl RasterData {
    /// Time intervals are reduced to their start, since images are queried at a time point
    pub fn new(time: Time, projection: Projection, data: String) -> Self {
        let time = if time.end() > time.start() {
            time.start_point()
        } else {
            time
        };

        Self {
            time,
            projection,
            data,
        }
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn data(&self) -> &str {
        &self.data
    }
}

/// The GeoJSON features of a vector layer
#[derive(Debug, Clone, PartialEq)]
pub struct VectorData {
    time: Time,
    projection: Projection,
    features: Vec<Value>,
    extent: BoundingBox2D,
}

impl VectorData {
    /// Features without an `id` get their index as id
    pub fn new(
        time: Time,
        projection: Projection,
        mut features: Vec<Value>,
        extent: BoundingBox2D,
    ) -> Self {
        for (local_row_id, feature) in features.iter_mut().enumerate() {
            if let Value::Object(feature) = feature {
                feature
                    .entry("id")
                    .or_insert_with(|| Value::from(local_row_id));
            }
        }

        Self {
            time,
            projection,
            features,
            extent,
        }
    }

    /// Takes the features of a GeoJSON `FeatureCollection`
    pub fn from_geojson(
        time: Time,
        projection: Projection,
        extent: BoundingBox2D,
        geojson: &Value,
    ) -> Result<Self> {
        let features = geojson
            .get("features")
            .and_then(Value::as_array)
            .context(error::MissingFeatures)?;

        Ok(Self::new(time, projection, features.clone(), extent))
    }

    pub fn time(&self) -> Time {
        self.time
    }

    pub fn projection(&self) -> &Projection {
        &self.projection
    }

    pub fn features(&self) -> &[Value] {
        &self.features
    }

    pub fn extent(&self) -> BoundingBox2D {
        self.extent
    }
}
