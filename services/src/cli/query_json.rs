use crate::cli::layer_file::{LayerFile, read_layer};
use clap::Parser;
use wave_operators::engine::OperatorIdAllocator;

/// Outputs the query JSON and workflow id of a layer
#[derive(Debug, Parser)]
pub struct QueryJson {
    #[command(flatten)]
    layer_file: LayerFile,

    /// Pretty-prints the query
    #[arg(long)]
    pretty: bool,
}

#[allow(clippy::print_stdout)]
pub fn output_query_json(params: QueryJson) -> Result<(), anyhow::Error> {
    let layer = read_layer(&params.layer_file.layer, &OperatorIdAllocator::new())?;

    let query = if params.pretty {
        serde_json::to_string_pretty(&layer.operator().to_query_dict())?
    } else {
        layer.operator().to_query_json()?
    };

    println!("{query}");
    println!("workflow: {}", layer.workflow_id()?);

    Ok(())
}
