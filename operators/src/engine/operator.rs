use crate::engine::{OperatorType, QueryDict, QuerySources};
use crate::error;
use crate::processing::ReprojectionParams;
use crate::util::Result;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use snafu::{ResultExt, ensure};
use std::collections::HashMap;
use std::sync::Arc;
use wave_datatypes::local_identifier;
use wave_datatypes::primitives::{DataType, ResultType, Unit};
use wave_datatypes::projection::Projection;
use wave_datatypes::util::IdAllocator;

local_identifier!(OperatorId);

pub type OperatorIdAllocator = IdAllocator<OperatorId>;

/// Operator graphs deeper than this are rejected at construction
pub const MAX_OPERATOR_GRAPH_DEPTH: usize = 64;

/// Everything needed to construct an [`Operator`]
#[derive(Debug, Clone)]
pub struct OperatorConfig {
    pub operator_type: OperatorType,
    pub result_type: ResultType,
    pub projection: Projection,
    pub attributes: Vec<String>,
    pub data_types: IndexMap<String, DataType>,
    pub units: IndexMap<String, Unit>,
    pub raster_sources: Vec<Operator>,
    pub point_sources: Vec<Operator>,
    pub line_sources: Vec<Operator>,
    pub polygon_sources: Vec<Operator>,
}

impl OperatorConfig {
    /// A config without attributes or sources
    pub fn new(
        operator_type: OperatorType,
        result_type: ResultType,
        projection: Projection,
    ) -> Self {
        Self {
            operator_type,
            result_type,
            projection,
            attributes: Vec::new(),
            data_types: IndexMap::new(),
            units: IndexMap::new(),
            raster_sources: Vec::new(),
            point_sources: Vec::new(),
            line_sources: Vec::new(),
            polygon_sources: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_attribute(
        mut self,
        attribute: impl Into<String>,
        data_type: DataType,
        unit: Option<Unit>,
    ) -> Self {
        let attribute = attribute.into();
        self.data_types.insert(attribute.clone(), data_type);
        if let Some(unit) = unit {
            self.units.insert(attribute.clone(), unit);
        }
        self.attributes.push(attribute);
        self
    }

    /// Copies the attributes with their data types and units from `operator`
    #[must_use]
    pub fn with_attributes_of(mut self, operator: &Operator) -> Self {
        self.attributes = operator.attributes().to_vec();
        self.data_types = operator.data_types().clone();
        self.units = operator.units().clone();
        self
    }

    /// Appends `source` to the source list of its result type.
    ///
    /// Plot operators are terminal and are not added.
    #[must_use]
    pub fn with_source(mut self, source: Operator) -> Self {
        match source.result_type() {
            ResultType::Raster => self.raster_sources.push(source),
            ResultType::Points => self.point_sources.push(source),
            ResultType::Lines => self.line_sources.push(source),
            ResultType::Polygons => self.polygon_sources.push(source),
            ResultType::Plot => {
                tracing::warn!(
                    "Ignoring plot operator {} as a source of a {} operator",
                    source.id(),
                    self.operator_type
                );
            }
        }
        self
    }

    /// Appends `source` after reprojecting it into the projection of this config.
    ///
    /// Use this when composing several sources, so the whole query runs in one projection.
    pub fn with_projected_source(
        self,
        ids: &OperatorIdAllocator,
        source: &Operator,
    ) -> Result<Self> {
        let source = source.projected_operator(ids, &self.projection)?;
        Ok(self.with_source(source))
    }

    fn sources(&self) -> impl Iterator<Item = &Operator> {
        self.raster_sources
            .iter()
            .chain(&self.point_sources)
            .chain(&self.line_sources)
            .chain(&self.polygon_sources)
    }
}

/// Overrides for [`Operator::clone_with_modifications`]. `None` keeps the current value.
#[derive(Debug, Clone, Default)]
pub struct OperatorModifications {
    pub operator_type: Option<OperatorType>,
    pub result_type: Option<ResultType>,
    pub projection: Option<Projection>,
    pub attributes: Option<Vec<String>>,
    pub data_types: Option<IndexMap<String, DataType>>,
    pub units: Option<IndexMap<String, Unit>>,
    pub raster_sources: Option<Vec<Operator>>,
    pub point_sources: Option<Vec<Operator>>,
    pub line_sources: Option<Vec<Operator>>,
    pub polygon_sources: Option<Vec<Operator>>,
}

/// A node of a directed acyclic operator graph.
///
/// Operators are immutable and cheap to clone. Clones share the same node,
/// so a source may be referenced by several parents or layers at once.
#[derive(Debug, Clone)]
pub struct Operator(Arc<OperatorNode>);

#[derive(Debug)]
struct OperatorNode {
    id: OperatorId,
    operator_type: OperatorType,
    result_type: ResultType,
    projection: Projection,
    attributes: Vec<String>,
    data_types: IndexMap<String, DataType>,
    units: IndexMap<String, Unit>,
    raster_sources: Vec<Operator>,
    point_sources: Vec<Operator>,
    line_sources: Vec<Operator>,
    polygon_sources: Vec<Operator>,
    depth: usize,
}

/// The persisted form of an operator graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OperatorDict {
    pub id: OperatorId,
    pub operator_type: Value,
    pub result_type: ResultType,
    pub projection: Projection,
    pub attributes: Vec<String>,
    pub data_types: IndexMap<String, DataType>,
    pub units: IndexMap<String, Unit>,
    #[serde(default)]
    pub raster_sources: Vec<OperatorDict>,
    #[serde(default)]
    pub point_sources: Vec<OperatorDict>,
    #[serde(default)]
    pub line_sources: Vec<OperatorDict>,
    #[serde(default)]
    pub polygon_sources: Vec<OperatorDict>,
}

impl Operator {
    /// Creates a new operator with a fresh id from `ids`.
    ///
    /// # Errors
    ///
    /// Fails if data types or units refer to unknown attributes or if the
    /// resulting graph would be deeper than [`MAX_OPERATOR_GRAPH_DEPTH`].
    pub fn new(ids: &OperatorIdAllocator, config: OperatorConfig) -> Result<Self> {
        for attribute in config.data_types.keys() {
            ensure!(
                config.attributes.contains(attribute),
                error::UnknownAttribute {
                    field: "dataTypes",
                    attribute: attribute.as_str(),
                }
            );
        }
        for attribute in config.units.keys() {
            ensure!(
                config.attributes.contains(attribute),
                error::UnknownAttribute {
                    field: "units",
                    attribute: attribute.as_str(),
                }
            );
        }

        let depth = 1 + config
            .sources()
            .map(Operator::graph_depth)
            .max()
            .unwrap_or_default();
        ensure!(
            depth <= MAX_OPERATOR_GRAPH_DEPTH,
            error::OperatorGraphTooDeep {
                depth,
                max_depth: MAX_OPERATOR_GRAPH_DEPTH,
            }
        );

        for source in config.sources() {
            if source.result_type() == ResultType::Plot {
                tracing::warn!(
                    "Plot operator {} is used as a source of a {} operator",
                    source.id(),
                    config.operator_type
                );
            }
            if source.projection() != &config.projection
                && !config.operator_type.is_reprojection()
                && config.result_type != ResultType::Plot
            {
                tracing::warn!(
                    "Source {} of a {} operator is in {} instead of {}",
                    source.id(),
                    config.operator_type,
                    source.projection(),
                    config.projection
                );
            }
        }

        let id = ids.next_id();

        tracing::trace!(
            "Created {} operator {id} with depth {depth}",
            config.operator_type.type_name()
        );

        Ok(Self(Arc::new(OperatorNode {
            id,
            operator_type: config.operator_type,
            result_type: config.result_type,
            projection: config.projection,
            attributes: config.attributes,
            data_types: config.data_types,
            units: config.units,
            raster_sources: config.raster_sources,
            point_sources: config.point_sources,
            line_sources: config.line_sources,
            polygon_sources: config.polygon_sources,
            depth,
        })))
    }

    pub fn id(&self) -> OperatorId {
        self.0.id
    }

    pub fn operator_type(&self) -> &OperatorType {
        &self.0.operator_type
    }

    pub fn result_type(&self) -> ResultType {
        self.0.result_type
    }

    pub fn projection(&self) -> &Projection {
        &self.0.projection
    }

    pub fn attributes(&self) -> &[String] {
        &self.0.attributes
    }

    pub fn data_types(&self) -> &IndexMap<String, DataType> {
        &self.0.data_types
    }

    pub fn data_type(&self, attribute: &str) -> Option<DataType> {
        self.0.data_types.get(attribute).copied()
    }

    pub fn units(&self) -> &IndexMap<String, Unit> {
        &self.0.units
    }

    pub fn unit(&self, attribute: &str) -> Option<&Unit> {
        self.0.units.get(attribute)
    }

    /// The number of operators on the longest path from this operator to a leaf, including both
    pub fn graph_depth(&self) -> usize {
        self.0.depth
    }

    /// Whether both handles refer to the same node
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    /// The sources of the given category. Plot operators are never sources.
    pub fn sources(&self, result_type: ResultType) -> &[Operator] {
        match result_type {
            ResultType::Raster => &self.0.raster_sources,
            ResultType::Points => &self.0.point_sources,
            ResultType::Lines => &self.0.line_sources,
            ResultType::Polygons => &self.0.polygon_sources,
            ResultType::Plot => &[],
        }
    }

    /// All sources in the order raster, points, lines, polygons
    pub fn all_sources(&self) -> impl Iterator<Item = &Operator> {
        self.0
            .raster_sources
            .iter()
            .chain(&self.0.point_sources)
            .chain(&self.0.line_sources)
            .chain(&self.0.polygon_sources)
    }

    pub fn is_source(&self) -> bool {
        self.all_sources().next().is_none()
    }

    /// A config that recreates this operator
    pub fn to_config(&self) -> OperatorConfig {
        OperatorConfig {
            operator_type: self.0.operator_type.clone(),
            result_type: self.0.result_type,
            projection: self.0.projection.clone(),
            attributes: self.0.attributes.clone(),
            data_types: self.0.data_types.clone(),
            units: self.0.units.clone(),
            raster_sources: self.0.raster_sources.clone(),
            point_sources: self.0.point_sources.clone(),
            line_sources: self.0.line_sources.clone(),
            polygon_sources: self.0.polygon_sources.clone(),
        }
    }

    /// Creates a new operator (with a new id) that differs from this one in the given fields
    pub fn clone_with_modifications(
        &self,
        ids: &OperatorIdAllocator,
        modifications: OperatorModifications,
    ) -> Result<Self> {
        let config = self.to_config();

        Self::new(
            ids,
            OperatorConfig {
                operator_type: modifications
                    .operator_type
                    .unwrap_or(config.operator_type),
                result_type: modifications.result_type.unwrap_or(config.result_type),
                projection: modifications.projection.unwrap_or(config.projection),
                attributes: modifications.attributes.unwrap_or(config.attributes),
                data_types: modifications.data_types.unwrap_or(config.data_types),
                units: modifications.units.unwrap_or(config.units),
                raster_sources: modifications
                    .raster_sources
                    .unwrap_or(config.raster_sources),
                point_sources: modifications.point_sources.unwrap_or(config.point_sources),
                line_sources: modifications.line_sources.unwrap_or(config.line_sources),
                polygon_sources: modifications
                    .polygon_sources
                    .unwrap_or(config.polygon_sources),
            },
        )
    }

    /// Returns an operator whose output is in `projection`.
    ///
    /// * If this operator already is in `projection`, it is returned as is.
    /// * A reprojection operator is never stacked on another one, its source is reprojected instead.
    /// * Plot operators are rebuilt with all of their sources reprojected.
    /// * Otherwise, this operator is wrapped into a reprojection operator.
    pub fn projected_operator(
        &self,
        ids: &OperatorIdAllocator,
        projection: &Projection,
    ) -> Result<Self> {
        if self.projection() == projection {
            return Ok(self.clone());
        }

        if self.operator_type().is_reprojection() {
            if let Some(source) = self.sources(self.result_type()).first() {
                if source.projection() == projection {
                    return Ok(source.clone());
                }
                return source.wrap_in_reprojection(ids, projection);
            }
        }

        if self.result_type() == ResultType::Plot {
            return self.with_projected_sources(ids, projection);
        }

        self.wrap_in_reprojection(ids, projection)
    }

    /// Rebuilds this operator in `projection` with every source reprojected
    pub fn with_projected_sources(
        &self,
        ids: &OperatorIdAllocator,
        projection: &Projection,
    ) -> Result<Self> {
        let project = |sources: &[Operator]| -> Result<Vec<Operator>> {
            sources
                .iter()
                .map(|source| source.projected_operator(ids, projection))
                .collect()
        };

        self.clone_with_modifications(
            ids,
            OperatorModifications {
                projection: Some(projection.clone()),
                raster_sources: Some(project(&self.0.raster_sources)?),
                point_sources: Some(project(&self.0.point_sources)?),
                line_sources: Some(project(&self.0.line_sources)?),
                polygon_sources: Some(project(&self.0.polygon_sources)?),
                ..Default::default()
            },
        )
    }

    fn wrap_in_reprojection(
        &self,
        ids: &OperatorIdAllocator,
        projection: &Projection,
    ) -> Result<Self> {
        tracing::trace!(
            "Reprojecting operator {} from {} to {}",
            self.id(),
            self.projection(),
            projection
        );

        let config = OperatorConfig::new(
            OperatorType::Projection(ReprojectionParams {
                src_projection: self.projection().clone(),
                dest_projection: projection.clone(),
            }),
            self.result_type(),
            projection.clone(),
        )
        .with_attributes_of(self)
        .with_source(self.clone());

        Self::new(ids, config)
    }

    /// The query graph of this operator and all of its sources
    pub fn to_query_dict(&self) -> QueryDict {
        let to_query_dicts =
            |sources: &[Operator]| sources.iter().map(Operator::to_query_dict).collect();

        QueryDict {
            operator_type: self.operator_type().mapping_name().to_string(),
            params: self.operator_type().to_mapping_dict(),
            sources: QuerySources {
                raster: to_query_dicts(&self.0.raster_sources),
                points: to_query_dicts(&self.0.point_sources),
                lines: to_query_dicts(&self.0.line_sources),
                polygons: to_query_dicts(&self.0.polygon_sources),
            },
        }
    }

    /// The query graph as a compact JSON string.
    ///
    /// Equal graphs always produce byte-identical strings.
    pub fn to_query_json(&self) -> Result<String> {
        serde_json::to_string(&self.to_query_dict()).context(error::SerializeQuery)
    }

    /// The persisted form of this operator and all of its sources
    pub fn to_dict(&self) -> Result<OperatorDict> {
        let to_dicts = |sources: &[Operator]| -> Result<Vec<OperatorDict>> {
            sources.iter().map(Operator::to_dict).collect()
        };

        Ok(OperatorDict {
            id: self.id(),
            operator_type: self.operator_type().to_dict()?,
            result_type: self.result_type(),
            projection: self.projection().clone(),
            attributes: self.attributes().to_vec(),
            data_types: self.data_types().clone(),
            units: self.units().clone(),
            raster_sources: to_dicts(&self.0.raster_sources)?,
            point_sources: to_dicts(&self.0.point_sources)?,
            line_sources: to_dicts(&self.0.line_sources)?,
            polygon_sources: to_dicts(&self.0.polygon_sources)?,
        })
    }

    /// Restores an operator graph from its persisted form. All operators get new ids.
    pub fn from_dict(ids: &OperatorIdAllocator, dict: &OperatorDict) -> Result<Self> {
        Self::from_dict_with_map(ids, dict, &mut HashMap::new())
    }

    /// Restores an operator graph and keeps sub-graphs shared that share an id in the dicts.
    ///
    /// `operators` maps dict ids to already restored operators and may be reused across
    /// several calls, e.g. for all layers of a project.
    pub fn from_dict_with_map(
        ids: &OperatorIdAllocator,
        dict: &OperatorDict,
        operators: &mut HashMap<OperatorId, Operator>,
    ) -> Result<Self> {
        Self::from_dict_recursive(ids, dict, operators, 1)
    }

    fn from_dict_recursive(
        ids: &OperatorIdAllocator,
        dict: &OperatorDict,
        operators: &mut HashMap<OperatorId, Operator>,
        depth: usize,
    ) -> Result<Self> {
        if let Some(operator) = operators.get(&dict.id) {
            return Ok(operator.clone());
        }

        ensure!(
            depth <= MAX_OPERATOR_GRAPH_DEPTH,
            error::OperatorGraphTooDeep {
                depth,
                max_depth: MAX_OPERATOR_GRAPH_DEPTH,
            }
        );

        let mut from_dicts = |sources: &[OperatorDict]| -> Result<Vec<Operator>> {
            sources
                .iter()
                .map(|source| Self::from_dict_recursive(ids, source, operators, depth + 1))
                .collect()
        };

        let raster_sources = from_dicts(&dict.raster_sources)?;
        let point_sources = from_dicts(&dict.point_sources)?;
        let line_sources = from_dicts(&dict.line_sources)?;
        let polygon_sources = from_dicts(&dict.polygon_sources)?;

        let operator = Self::new(
            ids,
            OperatorConfig {
                operator_type: OperatorType::from_dict(&dict.operator_type)?,
                result_type: dict.result_type,
                projection: dict.projection.clone(),
                attributes: dict.attributes.clone(),
                data_types: dict.data_types.clone(),
                units: dict.units.clone(),
                raster_sources,
                point_sources,
                line_sources,
                polygon_sources,
            },
        )?;

        operators.insert(dict.id, operator.clone());

        Ok(operator)
    }
}

/// Structural equality, ignoring ids
impl PartialEq for Operator {
    fn eq(&self, other: &Self) -> bool {
        if self.ptr_eq(other) {
            return true;
        }

        let (a, b) = (&self.0, &other.0);

        a.operator_type == b.operator_type
            && a.result_type == b.result_type
            && a.projection == b.projection
            && a.attributes == b.attributes
            && a.data_types == b.data_types
            && a.units == b.units
            && a.raster_sources == b.raster_sources
            && a.point_sources == b.point_sources
            && a.line_sources == b.line_sources
            && a.polygon_sources == b.polygon_sources
    }
}
