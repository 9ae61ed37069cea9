use crate::config::QueryConfig;
use crate::error::{self, Result};
use crate::queries::http_client::HttpClient;
use crate::queries::output_formats::{WcsOutputFormat, WfsOutputFormat};
use crate::queries::request_parameters::{MappingRequestParameters, encode_uri_component};
use crate::session::SessionProvider;
use serde::{Deserialize, Serialize};
use snafu::ResultExt;
use std::sync::Arc;
use tracing::debug;
use wave_datatypes::colors::{ColorBreakpoint, ColorizerData, ColorizerType, RgbaColor};
use wave_datatypes::primitives::{BoundingBox2D, ResultType, Time};
use wave_datatypes::projection::Projection;
use wave_datatypes::provenance::Provenance;
use wave_operators::engine::{Operator, OperatorConfig, OperatorIdAllocator, OperatorType};
use wave_operators::processing::{
    RScriptResult, TemporalAggregationMethod, TemporalAggregationParams,
};

/// A plot of `operator` over `extent`
#[derive(Debug, Clone)]
pub struct PlotQuery {
    pub operator: Operator,
    pub time: Time,
    pub extent: BoundingBox2D,
    pub projection: Projection,
    /// Required for R script plots
    pub plot_width: Option<u32>,
    pub plot_height: Option<u32>,
}

/// The visible part of the map
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub extent: BoundingBox2D,
    pub resolution: f64,
}

/// Options for clustered points
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClusteredOption {
    pub min_radius: f64,
}

#[derive(Debug, Clone)]
pub struct WfsQuery {
    pub operator: Operator,
    pub time: Time,
    pub projection: Projection,
    pub output_format: WfsOutputFormat,
    pub viewport: Option<Viewport>,
    pub clustered: Option<ClusteredOption>,
}

#[derive(Debug, Clone)]
pub struct WmsQuery {
    pub operator: Operator,
    pub time: Time,
    pub projection: Projection,
}

/// The raster size of a coverage in pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CoverageSize {
    pub x: u32,
    pub y: u32,
}

#[derive(Debug, Clone)]
pub struct WcsQuery {
    pub operator: Operator,
    pub time: Time,
    pub projection: Projection,
    pub output_format: WcsOutputFormat,
    pub size: CoverageSize,
}

#[derive(Debug, Clone)]
pub struct ProvenanceQuery {
    pub operator: Operator,
    pub time: Time,
    pub projection: Projection,
}

/// The response of a plot request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlotData {
    #[serde(rename = "type")]
    pub plot_type: String,
    pub data: serde_json::Value,
}

/// The colorizer the mapping engine derived for a raster.
///
/// Breakpoints are ordered from the highest value to the lowest one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MappingColorizer {
    pub interpolation: String,
    pub breakpoints: Vec<(f64, String)>,
}

impl MappingColorizer {
    fn with_descending_breakpoints(mut self) -> Self {
        if let (Some(first), Some(last)) = (self.breakpoints.first(), self.breakpoints.last()) {
            if self.breakpoints.len() > 1 && first.0 < last.0 {
                self.breakpoints.reverse();
            }
        }
        self
    }

    /// Converts the breakpoints into a gradient, or a palette for `nearest` interpolation
    pub fn to_colorizer_data(&self) -> Result<ColorizerData> {
        let breakpoints = self
            .breakpoints
            .iter()
            .map(|(value, color)| -> Result<ColorBreakpoint> {
                Ok(ColorBreakpoint::new(*value, color.parse::<RgbaColor>()?))
            })
            .collect::<Result<Vec<_>>>()?;

        let colorizer_type = if self.interpolation == "nearest" {
            ColorizerType::Palette
        } else {
            ColorizerType::Gradient
        };

        Ok(ColorizerData::new(breakpoints, colorizer_type))
    }
}

/// Number of occurrences of a GBIF search term in a data source
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataSourceCount {
    pub name: String,
    pub count: u64,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SpeciesNamesResponse {
    species_names: Vec<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataSourcesResponse {
    data_sources: Vec<DataSourceCount>,
}

/// Builds the requests for the mapping engine and optionally executes them.
///
/// Every request carries the token of the current session.
/// Operators are reprojected into the requested projection before they are serialized.
#[derive(Debug, Clone)]
pub struct MappingQueryService {
    config: QueryConfig,
    session: Arc<dyn SessionProvider>,
    ids: Arc<OperatorIdAllocator>,
    http: Arc<dyn HttpClient>,
}

impl MappingQueryService {
    pub fn new(
        config: QueryConfig,
        session: Arc<dyn SessionProvider>,
        ids: Arc<OperatorIdAllocator>,
        http: Arc<dyn HttpClient>,
    ) -> Self {
        Self {
            config,
            session,
            ids,
            http,
        }
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    fn mapping_url(&self) -> &str {
        &self.config.mapping.url
    }

    fn debug_flag(&self) -> i64 {
        i64::from(self.config.mapping.debug)
    }

    fn mapping_parameters(&self, service: &str, request: &str) -> Result<MappingRequestParameters> {
        let session = self.session.session()?;

        MappingRequestParameters::new(
            service,
            request,
            &session.session_token,
            std::iter::empty::<(String, String)>(),
        )
    }

    pub fn plot_query_parameters(&self, query: &PlotQuery) -> Result<MappingRequestParameters> {
        let mut parameters = self.mapping_parameters("plot", "")?;
        parameters.set_parameter("time", query.time.as_request_string()?)?;

        if !query.operator.sources(ResultType::Raster).is_empty() {
            parameters.set_parameter("width", self.config.plots.raster_width)?;
            parameters.set_parameter("height", self.config.plots.raster_height)?;
        }

        parameters.set_parameter("crs", query.projection.code())?;
        parameters.set_parameter("bbox", query.projection.to_bbox_string(&query.extent))?;

        let operator = query
            .operator
            .with_projected_sources(&self.ids, &query.projection)?;

        let is_r_script_plot = matches!(
            operator.operator_type(),
            OperatorType::RScript(params) if params.result_type == RScriptResult::Plot
        );

        let query_json = if is_r_script_plot {
            let (Some(plot_width), Some(plot_height)) = (query.plot_width, query.plot_height)
            else {
                return error::MissingPlotSize.fail();
            };

            let mut query_dict = operator.to_query_dict();
            query_dict.set_param("plot_width", plot_width);
            query_dict.set_param("plot_height", plot_height);

            serde_json::to_string(&query_dict).context(error::SerdeJson)?
        } else {
            operator.to_query_json()?
        };

        parameters.set_parameter("query", encode_uri_component(&query_json))?;

        debug!("Built plot request for operator {}", query.operator.id());

        Ok(parameters)
    }

    pub async fn plot_data(&self, query: &PlotQuery) -> Result<PlotData> {
        let parameters = self.plot_query_parameters(query)?;

        let response = self
            .http
            .post(
                self.mapping_url(),
                parameters.to_message_body(false),
                parameters.headers(),
            )
            .await?;

        serde_json::from_str(&response).context(error::InvalidResponse { response: "plot" })
    }

    pub fn wfs_query_parameters(&self, query: &WfsQuery) -> Result<MappingRequestParameters> {
        let operator = query
            .operator
            .projected_operator(&self.ids, &query.projection)?;

        let type_names = format!(
            "{}:{}",
            operator.result_type().code(),
            operator.to_query_json()?
        );

        let mut parameters = self.mapping_parameters("WFS", "GetFeature")?;
        parameters.set_parameters([
            ("version", self.config.wfs.version.clone()),
            ("typeNames", encode_uri_component(&type_names)),
            ("srsname", query.projection.code()),
            ("time", query.time.as_request_string()?),
            ("outputFormat", query.output_format.format().to_string()),
        ])?;

        if let Some(clustered) = query.clustered {
            parameters.set_parameter("clustered", true)?;
            parameters.set_parameter("clustered_min_radius", clustered.min_radius)?;
        } else {
            parameters.set_parameter("clustered", false)?;
        }

        if let Some(viewport) = query.viewport {
            parameters.set_parameter("bbox", query.projection.to_bbox_string(&viewport.extent))?;
            parameters.set_parameter("resolution", viewport.resolution)?;
        }

        debug!("Built WFS request for operator {}", query.operator.id());

        Ok(parameters)
    }

    pub fn wfs_query_url(&self, query: &WfsQuery) -> Result<String> {
        let parameters = self.wfs_query_parameters(query)?;

        Ok(format!(
            "{}?{}",
            self.mapping_url(),
            parameters.to_message_body(false)
        ))
    }

    /// The raw WFS response in the requested output format
    pub async fn wfs_data(&self, query: &WfsQuery) -> Result<String> {
        let parameters = self.wfs_query_parameters(query)?;

        self.http
            .post(
                self.mapping_url(),
                parameters.to_message_body(false),
                parameters.headers(),
            )
            .await
    }

    pub fn wms_query_parameters(&self, query: &WmsQuery) -> Result<MappingRequestParameters> {
        let operator = query
            .operator
            .projected_operator(&self.ids, &query.projection)?;

        let mut parameters = self.mapping_parameters("WMS", "GetMap")?;
        parameters.set_parameter("version", self.config.wms.version.as_str())?;
        parameters.set_parameter("format", self.config.wms.format.as_str())?;
        parameters.set_parameter("EXCEPTIONS", "INIMAGE")?;
        parameters.set_parameter("transparent", true)?;
        parameters.set_parameter("layers", operator.to_query_json()?)?;
        parameters.set_parameter("debug", self.debug_flag())?;
        parameters.set_parameter("time", query.time.as_request_string()?)?;

        Ok(parameters)
    }

    /// Time intervals are averaged by a temporal aggregation and queried at their start
    pub fn wms_query_url(&self, query: &WmsQuery) -> Result<String> {
        let parameters = if query.time.is_point() {
            self.wms_query_parameters(query)?
        } else {
            let duration = query.time.duration_millis() as f64 / 1000.;

            debug!(
                "Averaging operator {} over {duration} seconds",
                query.operator.id()
            );

            let aggregation = Operator::new(
                &self.ids,
                OperatorConfig::new(
                    OperatorType::TemporalAggregation(TemporalAggregationParams {
                        duration,
                        aggregation: TemporalAggregationMethod::Avg,
                    }),
                    query.operator.result_type(),
                    query.operator.projection().clone(),
                )
                .with_attributes_of(&query.operator)
                .with_source(query.operator.clone()),
            )?;

            self.wms_query_parameters(&WmsQuery {
                operator: aggregation,
                time: Time::new_point(query.time.start()),
                projection: query.projection.clone(),
            })?
        };

        Ok(format!(
            "{}?{}",
            self.mapping_url(),
            parameters.to_message_body(true)
        ))
    }

    pub fn wcs_query_url(&self, query: &WcsQuery) -> Result<String> {
        let operator = query
            .operator
            .projected_operator(&self.ids, &query.projection)?;

        let extent = query.projection.extent();

        let mut parameters = self.mapping_parameters(&self.config.wcs.service, "getcoverage")?;
        parameters.set_parameters([
            ("version", self.config.wcs.version.clone()),
            ("format", query.output_format.format().to_string()),
            ("coverageid", encode_uri_component(&operator.to_query_json()?)),
            ("subset_x", format!("({},{})", extent.min_x(), extent.max_x())),
            ("subset_y", format!("({},{})", extent.min_y(), extent.max_y())),
            ("outputcrs", query.projection.crs_uri().to_string()),
        ])?;
        parameters.set_parameter("size_x", query.size.x)?;
        parameters.set_parameter("size_y", query.size.y)?;
        parameters.set_parameter("debug", self.debug_flag())?;
        parameters.set_parameter("time", query.time.as_request_string()?)?;

        Ok(format!(
            "{}?{}",
            self.mapping_url(),
            parameters.to_message_body(false)
        ))
    }

    pub fn colorizer_request_parameters(
        &self,
        operator: &Operator,
        time: Time,
        projection: &Projection,
    ) -> Result<MappingRequestParameters> {
        let operator = operator.projected_operator(&self.ids, projection)?;

        let mut parameters = self.mapping_parameters("WMS", "GetColorizer")?;
        parameters.set_parameter("version", self.config.wms.version.as_str())?;
        parameters.set_parameter("layers", operator.to_query_json()?)?;
        parameters.set_parameter("debug", self.debug_flag())?;
        parameters.set_parameter("time", strip_ending_time(time).as_request_string()?)?;
        parameters.set_parameter("crs", projection.code())?;

        Ok(parameters)
    }

    pub async fn colorizer(
        &self,
        operator: &Operator,
        time: Time,
        projection: &Projection,
    ) -> Result<MappingColorizer> {
        let parameters = self.colorizer_request_parameters(operator, time, projection)?;

        let url = format!("{}?{}", self.mapping_url(), parameters.to_message_body(true));
        let response = self.http.get(&url).await?;

        let colorizer: MappingColorizer = serde_json::from_str(&response)
            .context(error::InvalidResponse { response: "colorizer" })?;

        Ok(colorizer.with_descending_breakpoints())
    }

    pub fn provenance_request_parameters(
        &self,
        query: &ProvenanceQuery,
    ) -> Result<MappingRequestParameters> {
        let operator = query
            .operator
            .projected_operator(&self.ids, &query.projection)?;

        let mut parameters = self.mapping_parameters("provenance", "")?;
        parameters.set_parameters([
            ("query", encode_uri_component(&operator.to_query_json()?)),
            ("crs", query.projection.code()),
            ("time", strip_ending_time(query.time).as_request_string()?),
            (
                "bbox",
                query.projection.to_bbox_string(&query.projection.extent()),
            ),
            ("type", query.operator.result_type().code().to_string()),
        ])?;

        if query.operator.result_type() == ResultType::Raster {
            parameters.set_parameter("height", self.config.provenance.raster_height)?;
            parameters.set_parameter("width", self.config.provenance.raster_width)?;
        }

        Ok(parameters)
    }

    pub async fn provenance(&self, query: &ProvenanceQuery) -> Result<Vec<Provenance>> {
        let parameters = self.provenance_request_parameters(query)?;

        let response = self
            .http
            .post(
                self.mapping_url(),
                parameters.to_message_body(false),
                parameters.headers(),
            )
            .await?;

        serde_json::from_str(&response).context(error::InvalidResponse {
            response: "provenance",
        })
    }

    pub fn gbif_auto_complete_parameters(
        &self,
        level: &str,
        term: &str,
    ) -> Result<MappingRequestParameters> {
        let mut parameters = self.mapping_parameters("gfbio", "searchSpecies")?;
        parameters.set_parameters([("level", level), ("term", term)])?;
        Ok(parameters)
    }

    pub async fn gbif_auto_complete_results(&self, level: &str, term: &str) -> Result<Vec<String>> {
        let parameters = self.gbif_auto_complete_parameters(level, term)?;

        let url = format!("{}?{}", self.mapping_url(), parameters.to_message_body(false));
        let response = self.http.get(&url).await?;

        let response: SpeciesNamesResponse =
            serde_json::from_str(&response).context(error::InvalidResponse {
                response: "species search",
            })?;

        Ok(response.species_names)
    }

    pub fn gbif_data_source_counts_parameters(
        &self,
        level: &str,
        term: &str,
    ) -> Result<MappingRequestParameters> {
        let mut parameters = self.mapping_parameters("gfbio", "queryDataSources")?;
        parameters.set_parameters([("level", level), ("term", term)])?;
        Ok(parameters)
    }

    pub async fn gbif_data_source_counts(
        &self,
        level: &str,
        term: &str,
    ) -> Result<Vec<DataSourceCount>> {
        let parameters = self.gbif_data_source_counts_parameters(level, term)?;

        let url = format!("{}?{}", self.mapping_url(), parameters.to_message_body(false));
        let response = self.http.get(&url).await?;

        let response: DataSourcesResponse =
            serde_json::from_str(&response).context(error::InvalidResponse {
                response: "data source counts",
            })?;

        Ok(response.data_sources)
    }
}

/// Reduces intervals to their start point
fn strip_ending_time(time: Time) -> Time {
    if time.end() > time.start() {
        time.start_point()
    } else {
        time
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;
    use crate::queries::request_parameters::RequestParameterValue;
    use crate::session::{Session, StaticSessionProvider};
    use async_trait::async_trait;
    use pretty_assertions::assert_eq;
    use std::sync::Mutex;
    use wave_datatypes::primitives::{DataType, Interpolation, Unit};
    use wave_operators::engine::QueryDict;
    use wave_operators::plot::StatisticsParams;
    use wave_operators::processing::RScriptParams;
    use wave_operators::source::{GfbioColumns, GfbioSourceParams, RasterSourceParams};

    #[derive(Debug, Clone, PartialEq)]
    enum Request {
        Get(String),
        Post(String, String),
    }

    #[derive(Debug)]
    struct MockHttpClient {
        response: String,
        requests: Mutex<Vec<Request>>,
    }

    impl MockHttpClient {
        fn new(response: &str) -> Arc<Self> {
            Arc::new(Self {
                response: response.to_string(),
                requests: Mutex::new(Vec::new()),
            })
        }

        fn requests(&self) -> Vec<Request> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl HttpClient for MockHttpClient {
        async fn get(&self, url: &str) -> Result<String> {
            self.requests
                .lock()
                .unwrap()
                .push(Request::Get(url.to_string()));
            Ok(self.response.clone())
        }

        async fn post(
            &self,
            url: &str,
            body: String,
            _headers: &[(String, String)],
        ) -> Result<String> {
            self.requests
                .lock()
                .unwrap()
                .push(Request::Post(url.to_string(), body));
            Ok(self.response.clone())
        }
    }

    fn query_service(http: Arc<MockHttpClient>) -> MappingQueryService {
        MappingQueryService::new(
            QueryConfig::default(),
            Arc::new(StaticSessionProvider::new(Session::new("abc123"))),
            Arc::new(OperatorIdAllocator::new()),
            http,
        )
    }

    fn srtm(service: &MappingQueryService) -> Operator {
        Operator::new(
            &service.ids,
            OperatorConfig::new(
                OperatorType::RasterSource(RasterSourceParams {
                    source_name: "srtm".to_string(),
                    channel: 0,
                    transform: true,
                }),
                ResultType::Raster,
                Projection::wgs_84(),
            )
            .with_attribute(
                "value",
                DataType::Int16,
                Some(Unit::new("elevation", "m", Interpolation::Continuous)),
            ),
        )
        .unwrap()
    }

    fn puma(service: &MappingQueryService) -> Operator {
        Operator::new(
            &service.ids,
            OperatorConfig::new(
                OperatorType::GfbioSource(GfbioSourceParams {
                    data_source: "GBIF".to_string(),
                    level: "species".to_string(),
                    term: "Puma concolor".to_string(),
                    columns: GfbioColumns::default(),
                }),
                ResultType::Points,
                Projection::wgs_84(),
            ),
        )
        .unwrap()
    }

    fn plot_operator(service: &MappingQueryService, operator_type: OperatorType) -> Operator {
        Operator::new(
            &service.ids,
            OperatorConfig::new(operator_type, ResultType::Plot, Projection::wgs_84())
                .with_source(srtm(service)),
        )
        .unwrap()
    }

    fn string_parameter(parameters: &MappingRequestParameters, key: &str) -> String {
        match parameters.get(key) {
            Some(RequestParameterValue::String(value)) => value.clone(),
            other => panic!("{key} is not a string parameter: {other:?}"),
        }
    }

    fn extent() -> BoundingBox2D {
        BoundingBox2D::from_extent([10., 20., 30., 40.]).unwrap()
    }

    #[test]
    fn plot_parameters() {
        let service = query_service(MockHttpClient::new(""));
        let operator = plot_operator(
            &service,
            OperatorType::Statistics(StatisticsParams::default()),
        );

        let parameters = service
            .plot_query_parameters(&PlotQuery {
                operator: operator.clone(),
                time: Time::new_point(0),
                extent: extent(),
                projection: Projection::wgs_84(),
                plot_width: None,
                plot_height: None,
            })
            .unwrap();

        let keys: Vec<&str> = parameters.as_map().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            vec![
                "service",
                "request",
                "sessiontoken",
                "time",
                "width",
                "height",
                "crs",
                "bbox",
                "query"
            ]
        );
        assert_eq!(string_parameter(&parameters, "bbox"), "20,10,40,30");
        assert_eq!(string_parameter(&parameters, "crs"), "EPSG:4326");
        assert_eq!(parameters.get("width"), Some(&RequestParameterValue::Integer(1024)));
        assert_eq!(
            string_parameter(&parameters, "query"),
            encode_uri_component(&operator.to_query_json().unwrap())
        );
    }

    #[test]
    fn plot_parameters_reproject_sources() {
        let service = query_service(MockHttpClient::new(""));
        let operator = plot_operator(
            &service,
            OperatorType::Statistics(StatisticsParams::default()),
        );

        let parameters = service
            .plot_query_parameters(&PlotQuery {
                operator,
                time: Time::new_point(0),
                extent: extent(),
                projection: Projection::web_mercator(),
                plot_width: None,
                plot_height: None,
            })
            .unwrap();

        assert_eq!(string_parameter(&parameters, "bbox"), "10,20,30,40");

        let query = string_parameter(&parameters, "query");
        assert!(query.contains(&encode_uri_component("\"type\":\"projection\"")));
    }

    #[test]
    fn r_script_plots_need_a_size() {
        let service = query_service(MockHttpClient::new(""));
        let operator = plot_operator(
            &service,
            OperatorType::RScript(RScriptParams {
                code: "plot(1)".to_string(),
                result_type: RScriptResult::Plot,
            }),
        );

        let mut query = PlotQuery {
            operator,
            time: Time::new_point(0),
            extent: extent(),
            projection: Projection::wgs_84(),
            plot_width: Some(400),
            plot_height: None,
        };

        assert!(matches!(
            service.plot_query_parameters(&query),
            Err(Error::MissingPlotSize)
        ));

        query.plot_height = Some(300);
        let parameters = service.plot_query_parameters(&query).unwrap();

        let query_json = string_parameter(&parameters, "query");
        assert!(query_json.contains(&encode_uri_component("\"plot_width\":400")));
        assert!(query_json.contains(&encode_uri_component("\"plot_height\":300")));
    }

    #[test]
    fn wfs_parameters() {
        let service = query_service(MockHttpClient::new(""));
        let operator = puma(&service);

        let mut query = WfsQuery {
            operator: operator.clone(),
            time: Time::new_point(0),
            projection: Projection::wgs_84(),
            output_format: WfsOutputFormat::Json,
            viewport: None,
            clustered: None,
        };

        let parameters = service.wfs_query_parameters(&query).unwrap();
        assert_eq!(
            string_parameter(&parameters, "typeNames"),
            encode_uri_component(&format!("points:{}", operator.to_query_json().unwrap()))
        );
        assert_eq!(string_parameter(&parameters, "outputFormat"), "application/json");
        assert_eq!(parameters.get("clustered"), Some(&RequestParameterValue::Boolean(false)));
        assert_eq!(parameters.get("bbox"), None);

        query.clustered = Some(ClusteredOption { min_radius: 5. });
        query.viewport = Some(Viewport {
            extent: extent(),
            resolution: 0.5,
        });

        let url = service.wfs_query_url(&query).unwrap();
        assert!(url.starts_with("/cgi-bin/mapping?service=WFS&request=GetFeature&sessiontoken=abc123&version=2.0.0&typeNames="));
        assert!(url.ends_with(
            "&srsname=EPSG:4326&time=1970-01-01T00:00:00.000Z&outputFormat=application/json&clustered=true&clustered_min_radius=5&bbox=20,10,40,30&resolution=0.5"
        ));
    }

    #[test]
    fn wms_url_for_a_time_point() {
        let service = query_service(MockHttpClient::new(""));
        let operator = srtm(&service);

        let url = service
            .wms_query_url(&WmsQuery {
                operator: operator.clone(),
                time: Time::new_point(0),
                projection: Projection::wgs_84(),
            })
            .unwrap();

        assert_eq!(
            url,
            format!(
                "/cgi-bin/mapping?service=WMS&request=GetMap&sessiontoken=abc123&version=1.3.0&format=image%2Fpng&EXCEPTIONS=INIMAGE&transparent=true&layers={}&debug=0&time=1970-01-01T00%3A00%3A00.000Z",
                encode_uri_component(&operator.to_query_json().unwrap())
            )
        );
    }

    #[test]
    fn wms_url_averages_time_intervals() {
        let service = query_service(MockHttpClient::new(""));
        let operator = srtm(&service);

        let url = service
            .wms_query_url(&WmsQuery {
                operator,
                time: Time::new(0, 3_600_000).unwrap(),
                projection: Projection::wgs_84(),
            })
            .unwrap();

        let layers = url
            .split('&')
            .find_map(|pair| pair.strip_prefix("layers="))
            .unwrap();
        let layers = percent_encoding::percent_decode_str(layers)
            .decode_utf8()
            .unwrap();
        let query: QueryDict = serde_json::from_str(&layers).unwrap();

        assert_eq!(query.operator_type, "temporal_aggregation");
        assert_eq!(
            query.params,
            serde_json::json!({"duration": 3600, "aggregation": "avg"})
        );
        assert_eq!(query.sources.raster.len(), 1);
        assert_eq!(query.sources.raster[0].operator_type, "rasterdb_source");

        assert!(url.ends_with("&time=1970-01-01T00%3A00%3A00.000Z"));
    }

    #[test]
    fn wcs_url() {
        let service = query_service(MockHttpClient::new(""));
        let operator = srtm(&service);

        let url = service
            .wcs_query_url(&WcsQuery {
                operator: operator.clone(),
                time: Time::new_point(0),
                projection: Projection::wgs_84(),
                output_format: WcsOutputFormat::GeoTiff,
                size: CoverageSize { x: 256, y: 128 },
            })
            .unwrap();

        assert_eq!(
            url,
            format!(
                "/cgi-bin/mapping?service=WCS&request=getcoverage&sessiontoken=abc123&version=2.0.1&format=image/tiff&coverageid={}&subset_x=(-180,180)&subset_y=(-90,90)&outputcrs=http://www.opengis.net/def/crs/EPSG/0/4326&size_x=256&size_y=128&debug=0&time=1970-01-01T00:00:00.000Z",
                encode_uri_component(&operator.to_query_json().unwrap())
            )
        );
    }

    #[test]
    fn provenance_parameters() {
        let service = query_service(MockHttpClient::new(""));

        let raster = service
            .provenance_request_parameters(&ProvenanceQuery {
                operator: srtm(&service),
                time: Time::new(0, 1000).unwrap(),
                projection: Projection::wgs_84(),
            })
            .unwrap();

        assert_eq!(string_parameter(&raster, "time"), "1970-01-01T00:00:00.000Z");
        assert_eq!(string_parameter(&raster, "bbox"), "-90,-180,90,180");
        assert_eq!(string_parameter(&raster, "type"), "raster");
        assert_eq!(raster.get("width"), Some(&RequestParameterValue::Integer(1024)));

        let points = service
            .provenance_request_parameters(&ProvenanceQuery {
                operator: puma(&service),
                time: Time::new_point(0),
                projection: Projection::wgs_84(),
            })
            .unwrap();

        assert_eq!(string_parameter(&points, "type"), "points");
        assert_eq!(points.get("width"), None);
    }

    #[tokio::test]
    async fn colorizer_breakpoints_are_descending() {
        let http = MockHttpClient::new(
            r##"{"interpolation": "linear", "breakpoints": [[0, "#000000"], [100, "#ffffff"]]}"##,
        );
        let service = query_service(http.clone());
        let operator = srtm(&service);

        let colorizer = service
            .colorizer(&operator, Time::new(0, 1000).unwrap(), &Projection::wgs_84())
            .await
            .unwrap();

        assert_eq!(
            colorizer.breakpoints,
            vec![(100., "#ffffff".to_string()), (0., "#000000".to_string())]
        );

        let colorizer_data = colorizer.to_colorizer_data().unwrap();
        assert_eq!(colorizer_data.colorizer_type, ColorizerType::Gradient);
        assert_eq!(colorizer_data.breakpoints[0].rgba, RgbaColor::white());

        let requests = http.requests();
        let [Request::Get(url)] = requests.as_slice() else {
            panic!("expected a single GET request");
        };
        assert!(url.contains("request=GetColorizer"));
        assert!(url.contains("&time=1970-01-01T00%3A00%3A00.000Z&crs=EPSG%3A4326"));
    }

    #[tokio::test]
    async fn provenance_is_posted() {
        let http = MockHttpClient::new(
            r#"[{"citation": "SRTM", "license": "public domain", "uri": "https://www2.jpl.nasa.gov/srtm/"}]"#,
        );
        let service = query_service(http.clone());

        let provenance = service
            .provenance(&ProvenanceQuery {
                operator: srtm(&service),
                time: Time::new_point(0),
                projection: Projection::wgs_84(),
            })
            .await
            .unwrap();

        assert_eq!(provenance.len(), 1);
        assert_eq!(provenance[0].citation, "SRTM");

        let requests = http.requests();
        let [Request::Post(url, body)] = requests.as_slice() else {
            panic!("expected a single POST request");
        };
        assert_eq!(url, "/cgi-bin/mapping");
        assert!(body.starts_with("service=provenance&request=&sessiontoken=abc123&query="));
    }

    #[tokio::test]
    async fn gbif_requests() {
        let http =
            MockHttpClient::new(r#"{"speciesNames": ["Puma concolor", "Puma yagouaroundi"]}"#);
        let service = query_service(http.clone());

        let names = service
            .gbif_auto_complete_results("species", "Puma")
            .await
            .unwrap();
        assert_eq!(names, vec!["Puma concolor", "Puma yagouaroundi"]);

        assert_eq!(
            http.requests(),
            vec![Request::Get(
                "/cgi-bin/mapping?service=gfbio&request=searchSpecies&sessiontoken=abc123&level=species&term=Puma"
                    .to_string()
            )]
        );

        let http = MockHttpClient::new(r#"{"dataSources": [{"name": "GBIF", "count": 42}]}"#);
        let service = query_service(http);

        assert_eq!(
            service
                .gbif_data_source_counts("species", "Puma concolor")
                .await
                .unwrap(),
            vec![DataSourceCount {
                name: "GBIF".to_string(),
                count: 42
            }]
        );
    }

    #[tokio::test]
    async fn invalid_responses_are_reported() {
        let service = query_service(MockHttpClient::new("<html>"));

        assert!(matches!(
            service.gbif_data_source_counts("species", "Puma").await,
            Err(Error::InvalidResponse { .. })
        ));
    }
}
