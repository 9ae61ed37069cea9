mod layer;
mod layer_data;

pub use layer::{
    Layer, LayerChanges, LayerDict, LayerId, LayerIdAllocator, LayerInfo, LayerType,
    RasterInfo, TypeOptionsDict, VectorInfo,
};
pub use layer_data::{LayerData, RasterData, VectorData};
