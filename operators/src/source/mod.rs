mod csv;
mod gfbio;
mod raster;

pub use self::csv::{
    CsvColumns, CsvErrorHandling, CsvGeometry, CsvParameters, CsvSourceParams, CsvTime,
    CsvTimeFormat, CsvTimeFormats, CsvTimeKind, CsvTimeStart,
};
pub use self::gfbio::{GfbioColumns, GfbioSourceParams};
pub use self::raster::RasterSourceParams;
