use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoStaticStr};

/// Output formats of WFS requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr)]
pub enum WfsOutputFormat {
    #[serde(rename = "application/json")]
    #[strum(serialize = "application/json")]
    Json,
    #[serde(rename = "csv")]
    #[strum(serialize = "csv")]
    Csv,
    #[serde(rename = "export:application/json")]
    #[strum(serialize = "export:application/json")]
    JsonExport,
    #[serde(rename = "export:csv")]
    #[strum(serialize = "export:csv")]
    CsvExport,
}

impl WfsOutputFormat {
    pub fn format(self) -> &'static str {
        self.into()
    }

    pub fn is_export(self) -> bool {
        matches!(self, WfsOutputFormat::JsonExport | WfsOutputFormat::CsvExport)
    }
}

impl std::fmt::Display for WfsOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.format())
    }
}

/// Output formats of WCS requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumIter, IntoStaticStr)]
pub enum WcsOutputFormat {
    #[serde(rename = "image/tiff")]
    #[strum(serialize = "image/tiff")]
    GeoTiff,
    #[serde(rename = "export:image/tiff")]
    #[strum(serialize = "export:image/tiff")]
    GeoTiffExport,
}

impl WcsOutputFormat {
    pub fn format(self) -> &'static str {
        self.into()
    }

    pub fn is_export(self) -> bool {
        self == WcsOutputFormat::GeoTiffExport
    }
}

impl std::fmt::Display for WcsOutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.format())
    }
}
