mod http_client;
mod mapping_query;
mod output_formats;
mod request_parameters;

pub use self::http_client::{HttpClient, ReqwestClient};
pub use self::mapping_query::{
    ClusteredOption, CoverageSize, DataSourceCount, MappingColorizer, MappingQueryService,
    PlotData, PlotQuery, ProvenanceQuery, Viewport, WcsQuery, WfsQuery, WmsQuery,
};
pub use self::output_formats::{WcsOutputFormat, WfsOutputFormat};
pub use self::request_parameters::{
    MappingRequestParameters, RequestParameterValue, RequestParameters, encode_uri_component,
};
