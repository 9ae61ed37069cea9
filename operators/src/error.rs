use snafu::Snafu;

#[derive(Debug, Snafu)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataTypeError: {}", source))]
    #[snafu(context(false))]
    DataType {
        source: wave_datatypes::error::Error,
    },

    #[snafu(display("Unknown operator type `{}`", operator_type))]
    UnknownOperatorType {
        operator_type: String,
    },

    #[snafu(display("Missing `operatorType` tag in operator type dict"))]
    MissingOperatorTypeTag,

    #[snafu(display("Invalid `{}` operator type dict: {}", operator_type, source))]
    InvalidOperatorTypeDict {
        operator_type: String,
        source: serde_json::Error,
    },

    #[snafu(display("Unable to serialize operator type: {}", source))]
    SerializeOperatorType {
        source: serde_json::Error,
    },

    #[snafu(display("Unable to serialize query: {}", source))]
    SerializeQuery {
        source: serde_json::Error,
    },

    #[snafu(display("Invalid operator type modification: {}", reason))]
    InvalidOperatorTypeModification {
        reason: String,
    },

    #[snafu(display(
        "The operator graph exceeds the maximum depth of {} (found {})",
        max_depth,
        depth
    ))]
    OperatorGraphTooDeep {
        depth: usize,
        max_depth: usize,
    },

    #[snafu(display("`{}` of attribute `{}` refers to an unknown attribute", field, attribute))]
    UnknownAttribute {
        field: &'static str,
        attribute: String,
    },

    #[snafu(display("Unable to encode icon: {}", source))]
    IconEncoding {
        source: image::ImageError,
    },
}
