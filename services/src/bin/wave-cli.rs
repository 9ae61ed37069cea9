use clap::{Parser, Subcommand};
use wave_services::cli::{
    Lineage, QueryJson, WfsUrl, WmsUrl, output_lineage, output_query_json, output_wfs_url,
    output_wms_url,
};
use wave_services::config::{self, get_config_element};
use wave_services::logging::init_logging;

/// CLI for inspecting WAVE layers and their mapping queries
#[derive(Debug, Parser)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Outputs the query JSON of a layer
    QueryJson(QueryJson),

    /// Outputs the WMS URL of a layer
    WmsUrl(WmsUrl),

    /// Outputs the WFS URL of a vector layer
    WfsUrl(WfsUrl),

    /// Outputs the operator lineage of a layer
    Lineage(Lineage),
}

impl Commands {
    fn execute(self) -> Result<(), anyhow::Error> {
        match self {
            Commands::QueryJson(params) => output_query_json(params),
            Commands::WmsUrl(params) => output_wms_url(params),
            Commands::WfsUrl(params) => output_wfs_url(params),
            Commands::Lineage(params) => output_lineage(params),
        }
    }
}

#[allow(clippy::print_stderr)]
fn main() {
    let cli = Cli::parse();

    let logging =
        get_config_element::<config::Logging>().and_then(|logging| init_logging(&logging));
    if let Err(err) = logging {
        eprintln!("Unable to initialize logging: {err}");
    }

    if let Err(err) = cli.command.execute() {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}
