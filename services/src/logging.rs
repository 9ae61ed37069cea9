use crate::config;
use crate::error::{self, Result};
use snafu::ResultExt;
use tracing::Subscriber;
use tracing_subscriber::{EnvFilter, Layer, layer::Filter, prelude::*, registry::LookupSpan};

/// Installs the global tracing subscriber that writes to the console (`STDERR`).
///
/// Fails if the log spec is invalid or if a global subscriber is already installed.
pub fn init_logging(logging_config: &config::Logging) -> Result<()> {
    let console_filter = log_filter(&logging_config.log_spec)?;

    tracing_subscriber::Registry::default()
        .with(console_layer_with_filter(console_filter))
        .try_init()
        .context(error::LoggingInit)?;

    tracing::debug!("Logging initialized with `{}`", logging_config.log_spec);

    Ok(())
}

fn log_filter(log_spec: &str) -> Result<EnvFilter> {
    EnvFilter::try_new(log_spec).context(error::InvalidLogSpec { log_spec })
}

fn console_layer_with_filter<S, F: Filter<S> + 'static>(filter: F) -> impl Layer<S>
where
    S: Subscriber,
    for<'a> S: LookupSpan<'a>,
{
    tracing_subscriber::fmt::layer()
        .pretty()
        .with_file(false)
        .with_target(true)
        .with_ansi(true)
        .with_writer(std::io::stderr)
        .with_filter(filter)
}
