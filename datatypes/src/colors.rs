use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::str::FromStr;

/// A color with red, green, blue and alpha channels
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(from = "RgbaColorDict", into = "RgbaColorDict")]
pub struct RgbaColor([u8; 4]);

/// Serialization form of a [`RgbaColor`]
#[derive(Copy, Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct RgbaColorDict {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    #[serde(default = "opaque")]
    pub a: u8,
}

fn opaque() -> u8 {
    255
}

impl RgbaColor {
    /// Creates a new color from red, green, blue and alpha values
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::colors::RgbaColor;
    ///
    /// assert_eq!(RgbaColor::new(0, 0, 0, 255), RgbaColor::black());
    /// assert_eq!(RgbaColor::new(255, 255, 255, 255), RgbaColor::white());
    /// assert_eq!(RgbaColor::new(0, 0, 0, 0), RgbaColor::transparent());
    /// ```
    pub const fn new(red: u8, green: u8, blue: u8, alpha: u8) -> Self {
        RgbaColor([red, green, blue, alpha])
    }

    pub const fn transparent() -> Self {
        RgbaColor::new(0, 0, 0, 0)
    }

    pub const fn black() -> Self {
        RgbaColor::new(0, 0, 0, 255)
    }

    pub const fn white() -> Self {
        RgbaColor::new(255, 255, 255, 255)
    }

    pub const fn red() -> Self {
        RgbaColor::new(255, 0, 0, 255)
    }

    pub fn into_inner(self) -> [u8; 4] {
        self.0
    }

    pub fn with_alpha(self, alpha: u8) -> Self {
        let [r, g, b, _] = self.0;
        RgbaColor([r, g, b, alpha])
    }

    /// Formats the color channels as upper-case `#RRGGBB`, ignoring alpha
    pub fn to_hex(self) -> String {
        let [r, g, b, _] = self.0;
        format!("#{r:02X}{g:02X}{b:02X}")
    }
}

impl From<RgbaColorDict> for RgbaColor {
    fn from(dict: RgbaColorDict) -> Self {
        RgbaColor::new(dict.r, dict.g, dict.b, dict.a)
    }
}

impl From<RgbaColor> for RgbaColorDict {
    fn from(color: RgbaColor) -> Self {
        let [r, g, b, a] = color.0;
        RgbaColorDict { r, g, b, a }
    }
}

/// Parses `#RRGGBB` or `#RRGGBBAA`, the leading `#` being optional
impl FromStr for RgbaColor {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let hex = s.strip_prefix('#').unwrap_or(s);

        ensure!(
            (hex.len() == 6 || hex.len() == 8) && hex.is_ascii(),
            error::InvalidColor { color: s }
        );

        let channel = |i: usize| {
            u8::from_str_radix(&hex[i..i + 2], 16)
                .map_err(|_| error::Error::InvalidColor { color: s.into() })
        };

        let alpha = if hex.len() == 8 { channel(6)? } else { 255 };

        Ok(RgbaColor::new(channel(0)?, channel(2)?, channel(4)?, alpha))
    }
}

/// Maps a value to a color
#[derive(Copy, Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ColorBreakpoint {
    pub value: f64,
    pub rgba: RgbaColor,
}

impl ColorBreakpoint {
    pub fn new(value: f64, rgba: RgbaColor) -> Self {
        Self { value, rgba }
    }
}

/// How the breakpoints of a colorizer are to be interpreted
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ColorizerType {
    Gradient,
    Logarithmic,
    Palette,
    RgbaComposite,
}

/// A value to color mapping of a raster symbology
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct ColorizerData {
    pub breakpoints: Vec<ColorBreakpoint>,
    #[serde(rename = "type")]
    pub colorizer_type: ColorizerType,
}

impl ColorizerData {
    pub fn new(breakpoints: Vec<ColorBreakpoint>, colorizer_type: ColorizerType) -> Self {
        Self {
            breakpoints,
            colorizer_type,
        }
    }

    /// A gradient without breakpoints
    pub fn empty() -> Self {
        Self::new(Vec::new(), ColorizerType::Gradient)
    }

    /// A gradient from black at `min` to white at `max`
    pub fn grayscale(min: f64, max: f64) -> Result<Self> {
        ensure!(
            min < max,
            error::Colorizer {
                details: format!("min `{min}` must be smaller than max `{max}`")
            }
        );

        Ok(Self::new(
            vec![
                ColorBreakpoint::new(min, RgbaColor::black()),
                ColorBreakpoint::new(max, RgbaColor::white()),
            ],
            ColorizerType::Gradient,
        ))
    }

    pub fn is_empty(&self) -> bool {
        self.breakpoints.is_empty()
    }

    pub fn first_value(&self) -> Option<f64> {
        self.breakpoints.first().map(|breakpoint| breakpoint.value)
    }

    pub fn last_value(&self) -> Option<f64> {
        self.breakpoints.last().map(|breakpoint| breakpoint.value)
    }

    /// The smallest breakpoint value
    pub fn min_value(&self) -> Option<f64> {
        self.breakpoints
            .iter()
            .map(|breakpoint| breakpoint.value)
            .reduce(f64::min)
    }

    /// The largest breakpoint value
    pub fn max_value(&self) -> Option<f64> {
        self.breakpoints
            .iter()
            .map(|breakpoint| breakpoint.value)
            .reduce(f64::max)
    }

    /// Returns a copy with breakpoints sorted by ascending value
    #[must_use]
    pub fn sorted(&self) -> Self {
        let mut breakpoints = self.breakpoints.clone();
        breakpoints.sort_by(|a, b| a.value.total_cmp(&b.value));
        Self::new(breakpoints, self.colorizer_type)
    }
}
