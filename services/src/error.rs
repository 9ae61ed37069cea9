use crate::layers::LayerType;
use snafu::Snafu;
use strum::IntoStaticStr;
use wave_datatypes::primitives::ResultType;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, Snafu, IntoStaticStr)]
#[snafu(visibility(pub(crate)))]
#[snafu(context(suffix(false)))] // disables default `Snafu` suffix
pub enum Error {
    #[snafu(display("DataTypeError: {}", source))]
    #[snafu(context(false))]
    DataType {
        source: wave_datatypes::error::Error,
    },

    #[snafu(display("OperatorError: {}", source))]
    #[snafu(context(false))]
    Operator {
        source: wave_operators::error::Error,
    },

    #[snafu(display("Unable to (de)serialize JSON: {}", source))]
    SerdeJson {
        source: serde_json::Error,
    },

    #[snafu(display("Invalid uuid: {}", source))]
    InvalidUuid {
        source: uuid::Error,
    },

    #[snafu(display("Config error: {}", source))]
    Config {
        source: config::ConfigError,
    },

    ConfigLockFailed,

    #[snafu(display("Unable to determine the working directory: {}", source))]
    MissingWorkingDirectory {
        source: std::io::Error,
    },

    MissingSettingsDirectory,

    #[snafu(display("Invalid log spec `{}`: {}", log_spec, source))]
    InvalidLogSpec {
        log_spec: String,
        source: tracing_subscriber::filter::ParseError,
    },

    #[snafu(display("Unable to install the logger: {}", source))]
    LoggingInit {
        source: tracing_subscriber::util::TryInitError,
    },

    #[snafu(display("Unknown layer type `{}`", layer_type))]
    UnknownLayerType {
        layer_type: String,
    },

    #[snafu(display("Unexpected result type `{}` for {}", result_type, context))]
    UnexpectedResultType {
        result_type: ResultType,
        context: &'static str,
    },

    #[snafu(display("The symbology does not fit a {} layer", layer_type))]
    SymbologyDoesNotMatchLayerType {
        layer_type: LayerType,
    },

    #[snafu(display("The request parameter `{}` must not be overwritten", parameter))]
    ProtectedRequestParameter {
        parameter: String,
    },

    #[snafu(display("The GeoJSON has no `features` array"))]
    MissingFeatures,

    #[snafu(display("R script plots need both a plot width and a plot height"))]
    MissingPlotSize,

    #[snafu(display("HTTP request failed: {}", source))]
    Http {
        source: reqwest::Error,
    },

    #[snafu(display("Unable to parse the {} response: {}", response, source))]
    InvalidResponse {
        response: &'static str,
        source: serde_json::Error,
    },

    #[snafu(display("No session available: {}", reason))]
    NoSession {
        reason: String,
    },
}
