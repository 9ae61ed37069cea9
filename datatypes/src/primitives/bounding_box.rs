use super::Coordinate2D;
use crate::error;
use crate::util::Result;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::str::FromStr;

/// An axis-aligned extent.
/// Note: may degenerate to a point!
#[derive(Copy, Clone, Serialize, Deserialize, PartialEq, Debug)]
#[serde(rename_all = "camelCase")]
pub struct BoundingBox2D {
    lower_left_coordinate: Coordinate2D,
    upper_right_coordinate: Coordinate2D,
}

impl BoundingBox2D {
    /// Creates a new bounding box
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::primitives::{Coordinate2D, BoundingBox2D};
    ///
    /// let ll = Coordinate2D::new(1.0, 1.0);
    /// let ur = Coordinate2D::new(2.0, 2.0);
    /// let bbox = BoundingBox2D::new(ll, ur).unwrap();
    /// ```
    ///
    /// # Errors
    ///
    /// This constructor fails if the coordinate's values are not in order
    ///
    pub fn new(
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    ) -> Result<Self> {
        ensure!(
            lower_left_coordinate.x <= upper_right_coordinate.x
                && lower_left_coordinate.y <= upper_right_coordinate.y,
            error::InvalidBoundingBox {
                lower_left_coordinate,
                upper_right_coordinate
            }
        );
        Ok(Self {
            lower_left_coordinate,
            upper_right_coordinate,
        })
    }

    /// Creates a new bounding box unchecked
    pub const fn new_unchecked(
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    ) -> Self {
        Self {
            lower_left_coordinate,
            upper_right_coordinate,
        }
    }

    /// Creates a bounding box from an extent in the order `[minX, minY, maxX, maxY]`
    ///
    /// # Examples
    ///
    /// ```
    /// use wave_datatypes::primitives::BoundingBox2D;
    ///
    /// let bbox = BoundingBox2D::from_extent([10., 20., 30., 40.]).unwrap();
    /// assert_eq!(bbox.min_y(), 20.);
    ///
    /// BoundingBox2D::from_extent([30., 20., 10., 40.]).unwrap_err();
    /// ```
    pub fn from_extent(extent: [f64; 4]) -> Result<Self> {
        let [min_x, min_y, max_x, max_y] = extent;
        Self::new(
            Coordinate2D::new(min_x, min_y),
            Coordinate2D::new(max_x, max_y),
        )
    }

    pub fn lower_left(&self) -> Coordinate2D {
        self.lower_left_coordinate
    }

    pub fn upper_right(&self) -> Coordinate2D {
        self.upper_right_coordinate
    }

    pub fn min_x(&self) -> f64 {
        self.lower_left_coordinate.x
    }

    pub fn min_y(&self) -> f64 {
        self.lower_left_coordinate.y
    }

    pub fn max_x(&self) -> f64 {
        self.upper_right_coordinate.x
    }

    pub fn max_y(&self) -> f64 {
        self.upper_right_coordinate.y
    }

    /// The canonical extent order `[minX, minY, maxX, maxY]`
    pub fn as_extent(&self) -> [f64; 4] {
        [self.min_x(), self.min_y(), self.max_x(), self.max_y()]
    }

    /// Formats the extent as a comma separated list in the given axis order.
    ///
    /// `swap_axes` is used for geographic coordinate systems whose
    /// axis order is latitude first (e.g. `EPSG:4326` in WMS 1.3.0).
    pub fn to_axis_ordered_string(&self, swap_axes: bool) -> String {
        let [a, b, c, d] = if swap_axes {
            [self.min_y(), self.min_x(), self.max_y(), self.max_x()]
        } else {
            self.as_extent()
        };
        format!("{a},{b},{c},{d}")
    }

    pub fn contains_coordinate(&self, coordinate: &Coordinate2D) -> bool {
        coordinate.x >= self.min_x()
            && coordinate.y >= self.min_y()
            && coordinate.x <= self.max_x()
            && coordinate.y <= self.max_y()
    }
}

/// Parse bbox, format is: "x1,y1,x2,y2"
impl FromStr for BoundingBox2D {
    type Err = error::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let split: Vec<Result<f64, std::num::ParseFloatError>> =
            s.split(',').map(|v| v.trim().parse()).collect();

        if let [Ok(x1), Ok(y1), Ok(x2), Ok(y2)] = *split.as_slice() {
            Self::from_extent([x1, y1, x2, y2])
        } else {
            Err(error::Error::InvalidBoundingBoxString { bbox: s.into() })
        }
    }
}
