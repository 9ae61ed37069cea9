use crate::layers::{Layer, LayerDict, LayerIdAllocator};
use anyhow::Context;
use clap::Args;
use std::path::{Path, PathBuf};
use wave_operators::engine::OperatorIdAllocator;

/// A persisted layer
#[derive(Debug, Args)]
pub struct LayerFile {
    /// Path of a layer dict in JSON format
    #[arg(long)]
    pub layer: PathBuf,
}

/// Restores the layer stored at `path`
pub fn read_layer(path: &Path, operator_ids: &OperatorIdAllocator) -> Result<Layer, anyhow::Error> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("Unable to open layer file {}", path.display()))?;

    let dict: LayerDict = serde_json::from_reader(std::io::BufReader::new(file))
        .with_context(|| format!("Invalid layer file {}", path.display()))?;

    let layer = Layer::from_dict(&LayerIdAllocator::new(), operator_ids, &dict)?;

    tracing::debug!("Read layer `{}` from {}", layer.name(), path.display());

    Ok(layer)
}
