mod layer_file;
mod lineage;
mod map_urls;
mod query_json;

pub use layer_file::{LayerFile, read_layer};
pub use lineage::{Lineage, output_lineage};
pub use map_urls::{WfsUrl, WmsUrl, output_wfs_url, output_wms_url};
pub use query_json::{QueryJson, output_query_json};
