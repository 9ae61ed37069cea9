use crate::engine::{OperatorParams, ParameterValue};
use crate::util::number::js_number;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

/// Combines three rasters into one RGBA raster, one channel per source
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RgbaCompositeParams {
    pub raster_red_min: f64,
    pub raster_red_max: f64,
    pub raster_red_scale: f64,
    pub raster_green_min: f64,
    pub raster_green_max: f64,
    pub raster_green_scale: f64,
    pub raster_blue_min: f64,
    pub raster_blue_max: f64,
    pub raster_blue_scale: f64,
}

impl OperatorParams for RgbaCompositeParams {
    fn mapping_dict(&self) -> Value {
        json!({
            "raster_red_min": js_number(self.raster_red_min),
            "raster_red_max": js_number(self.raster_red_max),
            "raster_red_scale": js_number(self.raster_red_scale),
            "raster_green_min": js_number(self.raster_green_min),
            "raster_green_max": js_number(self.raster_green_max),
            "raster_green_scale": js_number(self.raster_green_scale),
            "raster_blue_min": js_number(self.raster_blue_min),
            "raster_blue_max": js_number(self.raster_blue_max),
            "raster_blue_scale": js_number(self.raster_blue_scale),
        })
    }

    fn parameters(&self) -> Vec<(&'static str, ParameterValue)> {
        vec![
            ("rasterRedMin", self.raster_red_min.into()),
            ("rasterRedMax", self.raster_red_max.into()),
            ("rasterRedScale", self.raster_red_scale.into()),
            ("rasterGreenMin", self.raster_green_min.into()),
            ("rasterGreenMax", self.raster_green_max.into()),
            ("rasterGreenScale", self.raster_green_scale.into()),
            ("rasterBlueMin", self.raster_blue_min.into()),
            ("rasterBlueMax", self.raster_blue_max.into()),
            ("rasterBlueScale", self.raster_blue_scale.into()),
        ]
    }
}
