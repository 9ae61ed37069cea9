use crate::cli::layer_file::{LayerFile, read_layer};
use clap::Parser;
use wave_operators::engine::OperatorIdAllocator;
use wave_operators::lineage::LineageGraph;

/// Outputs the operators of a layer and how they are connected
#[derive(Debug, Parser)]
pub struct Lineage {
    #[command(flatten)]
    layer_file: LayerFile,
}

#[allow(clippy::print_stdout)]
pub fn output_lineage(params: Lineage) -> Result<(), anyhow::Error> {
    let layer = read_layer(&params.layer_file.layer, &OperatorIdAllocator::new())?;

    let lineage = LineageGraph::from_operator(layer.operator())?;

    println!("{}", serde_json::to_string_pretty(&lineage)?);

    Ok(())
}
