use float_cmp::approx_eq;
use pretty_assertions::assert_eq;
use std::sync::Arc;
use wave_datatypes::colors::RgbaColor;
use wave_datatypes::primitives::{DataType, Interpolation, ResultType, Time, Unit};
use wave_datatypes::projection::Projection;
use wave_operators::engine::{
    Operator, OperatorConfig, OperatorIdAllocator, OperatorType, QueryDict,
};
use wave_operators::lineage::LineageGraph;
use wave_operators::processing::ExpressionParams;
use wave_operators::source::{GfbioColumns, GfbioSourceParams, RasterSourceParams};
use wave_services::config::QueryConfig;
use wave_services::layers::{Layer, LayerDict, LayerIdAllocator};
use wave_services::queries::{
    MappingQueryService, ReqwestClient, WfsOutputFormat, WfsQuery, WmsQuery,
};
use wave_services::session::{Session, StaticSessionProvider};
use wave_services::symbology::{
    MappingColorizerRasterSymbology, PointSymbology, RasterSymbology, VectorSymbology,
};

fn elevation() -> Unit {
    Unit::new("elevation", "m", Interpolation::Continuous)
}

fn doubled_srtm(ids: &OperatorIdAllocator) -> Operator {
    let srtm = Operator::new(
        ids,
        OperatorConfig::new(
            OperatorType::RasterSource(RasterSourceParams {
                source_name: "srtm".to_string(),
                channel: 0,
                transform: true,
            }),
            ResultType::Raster,
            Projection::wgs_84(),
        )
        .with_attribute("value", DataType::Int16, Some(elevation())),
    )
    .unwrap();

    Operator::new(
        ids,
        OperatorConfig::new(
            OperatorType::Expression(ExpressionParams {
                expression: "A * 2".to_string(),
                data_type: DataType::Int32,
                unit: elevation(),
            }),
            ResultType::Raster,
            Projection::wgs_84(),
        )
        .with_attribute("value", DataType::Int32, Some(elevation()))
        .with_projected_source(ids, &srtm)
        .unwrap(),
    )
    .unwrap()
}

fn raster_layer(ids: &OperatorIdAllocator) -> Layer {
    Layer::new_raster(
        &LayerIdAllocator::new(),
        "SRTM × 2",
        doubled_srtm(ids),
        RasterSymbology::MappingColorizer(MappingColorizerRasterSymbology::create_symbology(None)),
    )
}

fn query_service(ids: Arc<OperatorIdAllocator>) -> MappingQueryService {
    MappingQueryService::new(
        QueryConfig::default(),
        Arc::new(StaticSessionProvider::new(Session::new("abc123"))),
        ids,
        Arc::new(ReqwestClient::default()),
    )
}

fn layers_parameter(url: &str) -> QueryDict {
    let layers = url
        .split('&')
        .find_map(|pair| pair.strip_prefix("layers="))
        .unwrap();
    let layers = percent_encoding::percent_decode_str(layers)
        .decode_utf8()
        .unwrap();

    serde_json::from_str(&layers).unwrap()
}

#[test]
fn persisted_layers_query_the_same() {
    let ids = OperatorIdAllocator::new();
    let layer = raster_layer(&ids);

    let json = serde_json::to_string(&layer.to_dict().unwrap()).unwrap();
    let dict: LayerDict = serde_json::from_str(&json).unwrap();

    let restored = Layer::from_dict(
        &LayerIdAllocator::starting_at(10),
        &OperatorIdAllocator::starting_at(100),
        &dict,
    )
    .unwrap();

    assert_ne!(restored.operator().id(), layer.operator().id());
    assert_eq!(
        restored.operator().to_query_json().unwrap(),
        layer.operator().to_query_json().unwrap()
    );
    assert_eq!(restored.workflow_id().unwrap(), layer.workflow_id().unwrap());
    assert_eq!(restored.symbology(), layer.symbology());
}

#[test]
fn wms_urls_reproject_into_the_map_projection() {
    let ids = Arc::new(OperatorIdAllocator::new());
    let layer = raster_layer(&ids);
    let service = query_service(ids);

    let url = service
        .wms_query_url(&WmsQuery {
            operator: layer.operator().clone(),
            time: Time::new_point(0),
            projection: Projection::web_mercator(),
        })
        .unwrap();

    let query = layers_parameter(&url);
    assert_eq!(query.operator_type, "projection");
    assert_eq!(
        query.params,
        serde_json::json!({"src_projection": "EPSG:4326", "dest_projection": "EPSG:3857"})
    );
    assert_eq!(query.sources.raster[0].operator_type, "expression");
    assert_eq!(
        query.sources.raster[0].sources.raster[0].operator_type,
        "rasterdb_source"
    );
}

#[test]
fn wms_urls_average_over_a_day() {
    let ids = Arc::new(OperatorIdAllocator::new());
    let layer = raster_layer(&ids);
    let service = query_service(ids);

    let url = service
        .wms_query_url(&WmsQuery {
            operator: layer.operator().clone(),
            time: Time::new(0, 86_400_000).unwrap(),
            projection: Projection::wgs_84(),
        })
        .unwrap();

    let query = layers_parameter(&url);
    assert_eq!(query.operator_type, "temporal_aggregation");

    let duration = query.params["duration"].as_f64().unwrap();
    assert!(approx_eq!(f64, duration, 86_400.));
}

#[test]
fn wfs_urls_of_clustered_point_layers() {
    let ids = Arc::new(OperatorIdAllocator::new());

    let puma = Operator::new(
        &ids,
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
    .unwrap();

    let layer = Layer::new_vector(
        &LayerIdAllocator::new(),
        "Puma",
        puma,
        VectorSymbology::ClusteredPoint(PointSymbology::create_cluster_symbology(
            RgbaColor::red(),
        )),
        true,
    );
    assert!(layer.clustered());

    let service = query_service(ids);
    let url = service
        .wfs_query_url(&WfsQuery {
            operator: layer.operator().clone(),
            time: Time::new_point(0),
            projection: Projection::web_mercator(),
            output_format: WfsOutputFormat::CsvExport,
            viewport: None,
            clustered: None,
        })
        .unwrap();

    assert!(url.contains("&typeNames=points%3A%7B%22type%22%3A%22projection%22"));
    assert!(url.contains("&srsname=EPSG:3857&"));
    assert!(url.contains("&outputFormat=export:csv&clustered=false"));
}

#[test]
fn lineage_of_a_layer() {
    let ids = OperatorIdAllocator::new();
    let layer = raster_layer(&ids);

    let lineage = LineageGraph::from_operator(layer.operator()).unwrap();

    let type_names: Vec<&str> = lineage
        .nodes
        .iter()
        .map(|node| node.type_name.as_str())
        .collect();
    assert_eq!(type_names, vec!["expression", "raster_source"]);

    assert_eq!(lineage.edges.len(), 1);
    assert_eq!(lineage.edges[0].consumer, layer.operator().id());
}
