use crate::primitives::{Coordinate2D, TimeInstance};
use snafu::Snafu;
use std::convert::Infallible;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("Start `{}` must be before end `{}`", start.inner(), end.inner()))]
    TimeIntervalEndBeforeStart {
        start: TimeInstance,
        end: TimeInstance,
    },

    #[snafu(display("Time instance `{}` is outside of the valid date range", time_instance.inner()))]
    NoDateTimeValid {
        time_instance: TimeInstance,
    },

    #[snafu(display("Unable to parse time `{}`: {}", input, source))]
    TimeParse {
        input: String,
        source: chrono::ParseError,
    },

    #[snafu(display(
        "The conditions ll.x <= ur.x && ll.y <= ur.y are not met by ll:{} ur:{}",
        lower_left_coordinate,
        upper_right_coordinate
    ))]
    InvalidBoundingBox {
        lower_left_coordinate: Coordinate2D,
        upper_right_coordinate: Coordinate2D,
    },

    #[snafu(display("Invalid bbox string: {}", bbox))]
    InvalidBoundingBoxString {
        bbox: String,
    },

    #[snafu(display("InvalidSpatialReferenceString: {}", spatial_reference_string))]
    InvalidSpatialReferenceString {
        spatial_reference_string: String,
    },

    #[snafu(display("ParseU32: {}", source))]
    ParseU32 {
        source: <u32 as std::str::FromStr>::Err,
    },

    #[snafu(display("Unknown projection: {}", code))]
    UnknownProjection {
        code: String,
    },

    #[snafu(display("Unknown data type: {}", code))]
    UnknownDataType {
        code: String,
    },

    #[snafu(display("Unknown result type: {}", code))]
    UnknownResultType {
        code: String,
    },

    #[snafu(display("Invalid color `{}`", color))]
    InvalidColor {
        color: String,
    },

    #[snafu(display("Colorizer exception: {}", details))]
    Colorizer {
        details: String,
    },
}

impl From<Infallible> for Error {
    fn from(_: Infallible) -> Self {
        unreachable!("This function cannot be called on a non-failing type")
    }
}
