use crate::cli::layer_file::{LayerFile, read_layer};
use crate::config::{self, QueryConfig, get_config_element};
use crate::queries::{
    ClusteredOption, MappingQueryService, ReqwestClient, WfsOutputFormat, WfsQuery, WmsQuery,
};
use crate::session::{Session, StaticSessionProvider};
use clap::{Args, Parser};
use std::sync::Arc;
use wave_datatypes::primitives::{Time, TimeInstance};
use wave_datatypes::projection::Projection;
use wave_operators::engine::{Operator, OperatorIdAllocator};

/// Where and when to query a layer
#[derive(Debug, Args)]
struct QueryTarget {
    #[command(flatten)]
    layer_file: LayerFile,

    /// Token of a mapping session
    #[arg(long)]
    session_token: String,

    /// Target projection, e.g. `EPSG:3857`
    #[arg(long)]
    projection: Option<Projection>,

    /// Start of the query time in unix milliseconds
    #[arg(long)]
    time_start: Option<i64>,

    /// End of the query time in unix milliseconds
    #[arg(long, requires = "time_start")]
    time_end: Option<i64>,

    /// Overrides the configured mapping URL
    #[arg(long)]
    mapping_url: Option<String>,
}

/// Outputs the WMS URL of a layer
#[derive(Debug, Parser)]
pub struct WmsUrl {
    #[command(flatten)]
    target: QueryTarget,
}

/// Outputs the WFS URL of a vector layer
#[derive(Debug, Parser)]
pub struct WfsUrl {
    #[command(flatten)]
    target: QueryTarget,

    /// Requests clustered points with this minimum radius
    #[arg(long)]
    cluster_radius: Option<f64>,
}

struct ResolvedTarget {
    service: MappingQueryService,
    operator: Operator,
    time: Time,
    projection: Projection,
}

impl QueryTarget {
    fn resolve(self) -> Result<ResolvedTarget, anyhow::Error> {
        let mut query_config = QueryConfig::from_settings()?;
        if let Some(url) = self.mapping_url {
            query_config.mapping.url = url;
        }

        let defaults = get_config_element::<config::Defaults>()?;

        let time = match (self.time_start, self.time_end) {
            (Some(start), Some(end)) => Time::new(start, end)?,
            (Some(start), None) => Time::new_point(start),
            (None, _) => defaults
                .time
                .unwrap_or_else(|| Time::new_point(TimeInstance::now())),
        };

        let ids = Arc::new(OperatorIdAllocator::new());
        let layer = read_layer(&self.layer_file.layer, &ids)?;

        let service = MappingQueryService::new(
            query_config,
            Arc::new(StaticSessionProvider::new(Session::new(self.session_token))),
            ids,
            Arc::new(ReqwestClient::default()),
        );

        Ok(ResolvedTarget {
            service,
            operator: layer.operator().clone(),
            time,
            projection: self.projection.unwrap_or(defaults.projection),
        })
    }
}

#[allow(clippy::print_stdout)]
pub fn output_wms_url(params: WmsUrl) -> Result<(), anyhow::Error> {
    let target = params.target.resolve()?;

    let url = target.service.wms_query_url(&WmsQuery {
        operator: target.operator,
        time: target.time,
        projection: target.projection,
    })?;

    println!("{url}");

    Ok(())
}

#[allow(clippy::print_stdout)]
pub fn output_wfs_url(params: WfsUrl) -> Result<(), anyhow::Error> {
    let target = params.target.resolve()?;

    anyhow::ensure!(
        target.operator.result_type().is_vector(),
        "WFS requests need a vector layer, not {}",
        target.operator.result_type()
    );

    let url = target.service.wfs_query_url(&WfsQuery {
        operator: target.operator,
        time: target.time,
        projection: target.projection,
        output_format: WfsOutputFormat::Json,
        viewport: None,
        clustered: params
            .cluster_radius
            .map(|min_radius| ClusteredOption { min_radius }),
    })?;

    println!("{url}");

    Ok(())
}
