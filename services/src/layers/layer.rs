use crate::error::{self, Result};
use crate::symbology::{RasterSymbology, Symbology, VectorSymbology};
use crate::workflows::WorkflowId;
use serde::{Deserialize, Serialize};
use snafu::ensure;
use std::collections::HashMap;
use std::str::FromStr;
use strum::{EnumString, IntoStaticStr};
use wave_datatypes::local_identifier;
use wave_datatypes::util::IdAllocator;
use wave_operators::engine::{Operator, OperatorDict, OperatorId, OperatorIdAllocator};

local_identifier!(LayerId);

pub type LayerIdAllocator = IdAllocator<LayerId>;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, IntoStaticStr,
    strum::Display,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum LayerType {
    Raster,
    Vector,
}

/// A map layer that displays the result of one operator graph
#[derive(Debug, Clone)]
pub struct Layer {
    id: LayerId,
    name: String,
    operator: Operator,
    visible: bool,
    expanded: bool,
    edit_symbology: bool,
    info: LayerInfo,
}

/// The type specific part of a [`Layer`]
#[derive(Debug, Clone, PartialEq)]
pub enum LayerInfo {
    Raster(RasterInfo),
    Vector(VectorInfo),
}

#[derive(Debug, Clone, PartialEq)]
pub struct RasterInfo {
    pub symbology: RasterSymbology,
}

#[derive(Debug, Clone, PartialEq)]
pub struct VectorInfo {
    pub symbology: VectorSymbology,
    pub clustered: bool,
}

/// Changes to a [`Layer`]. `None` means unchanged.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LayerChanges {
    pub name: Option<String>,
    pub symbology: Option<Symbology>,
    pub edit_symbology: Option<bool>,
    pub visible: Option<bool>,
    pub expanded: Option<bool>,
    pub operator: Option<Operator>,
}

impl LayerChanges {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// The persisted form of a [`Layer`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LayerDict {
    pub name: String,
    pub operator: OperatorDict,
    pub symbology: Symbology,
    #[serde(default)]
    pub expanded: bool,
    #[serde(default = "visible_by_default")]
    pub visible: bool,
    #[serde(default)]
    pub edit_symbology: bool,
    /// `raster` or `vector`
    #[serde(rename = "type")]
    pub layer_type: String,
    #[serde(default)]
    pub type_options: TypeOptionsDict,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeOptionsDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clustered: Option<bool>,
}

fn visible_by_default() -> bool {
    true
}

impl Layer {
    /// Creates a visible, collapsed raster layer.
    ///
    /// A symbology without a unit gets the unit of the operator's `value` attribute.
    pub fn new_raster(
        ids: &LayerIdAllocator,
        name: impl Into<String>,
        operator: Operator,
        symbology: RasterSymbology,
    ) -> Self {
        let symbology = symbology.with_default_unit(operator.unit("value"));

        Self::new(
            ids,
            name.into(),
            operator,
            LayerInfo::Raster(RasterInfo { symbology }),
        )
    }

    /// Creates a visible, collapsed vector layer
    pub fn new_vector(
        ids: &LayerIdAllocator,
        name: impl Into<String>,
        operator: Operator,
        symbology: VectorSymbology,
        clustered: bool,
    ) -> Self {
        Self::new(
            ids,
            name.into(),
            operator,
            LayerInfo::Vector(VectorInfo {
                symbology,
                clustered,
            }),
        )
    }

    fn new(ids: &LayerIdAllocator, name: String, operator: Operator, info: LayerInfo) -> Self {
        let layer_type = match info {
            LayerInfo::Raster(_) => LayerType::Raster,
            LayerInfo::Vector(_) => LayerType::Vector,
        };

        if operator.result_type().is_vector() != (layer_type == LayerType::Vector) {
            tracing::warn!(
                "Creating a {layer_type} layer `{name}` for an operator with result type {}",
                operator.result_type()
            );
        }

        Self {
            id: ids.next_id(),
            name,
            operator,
            visible: true,
            expanded: false,
            edit_symbology: false,
            info,
        }
    }

    #[must_use]
    pub fn with_visible(mut self, visible: bool) -> Self {
        self.visible = visible;
        self
    }

    #[must_use]
    pub fn with_expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    #[must_use]
    pub fn with_edit_symbology(mut self, edit_symbology: bool) -> Self {
        self.edit_symbology = edit_symbology;
        self
    }

    pub fn id(&self) -> LayerId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn visible(&self) -> bool {
        self.visible
    }

    pub fn expanded(&self) -> bool {
        self.expanded
    }

    pub fn edit_symbology(&self) -> bool {
        self.edit_symbology
    }

    pub fn info(&self) -> &LayerInfo {
        &self.info
    }

    pub fn layer_type(&self) -> LayerType {
        match self.info {
            LayerInfo::Raster(_) => LayerType::Raster,
            LayerInfo::Vector(_) => LayerType::Vector,
        }
    }

    pub fn symbology(&self) -> Symbology {
        match &self.info {
            LayerInfo::Raster(info) => Symbology::Raster(info.symbology.clone()),
            LayerInfo::Vector(info) => Symbology::Vector(info.symbology.clone()),
        }
    }

    pub fn clustered(&self) -> bool {
        match &self.info {
            LayerInfo::Raster(_) => false,
            LayerInfo::Vector(info) => info.clustered,
        }
    }

    pub fn type_options(&self) -> TypeOptionsDict {
        match &self.info {
            LayerInfo::Raster(_) => TypeOptionsDict::default(),
            LayerInfo::Vector(info) => TypeOptionsDict {
                clustered: Some(info.clustered),
            },
        }
    }

    pub fn workflow_id(&self) -> Result<WorkflowId> {
        WorkflowId::from_operator(&self.operator)
    }

    /// Applies `changes` and returns the ones that actually changed something.
    ///
    /// An empty name is ignored. A symbology for the other layer type is an
    /// error and leaves the layer untouched.
    pub fn change_underlying_data(&mut self, changes: LayerChanges) -> Result<LayerChanges> {
        if let Some(symbology) = &changes.symbology {
            ensure!(
                symbology.layer_type() == self.layer_type(),
                error::SymbologyDoesNotMatchLayerType {
                    layer_type: self.layer_type(),
                }
            );
        }

        let mut valid_changes = LayerChanges::default();

        if let Some(name) = changes.name {
            if !name.is_empty() && name != self.name {
                self.name.clone_from(&name);
                valid_changes.name = Some(name);
            }
        }

        if let Some(symbology) = changes.symbology {
            if symbology != self.symbology() {
                match (&mut self.info, symbology.clone()) {
                    (LayerInfo::Raster(info), Symbology::Raster(s)) => info.symbology = s,
                    (LayerInfo::Vector(info), Symbology::Vector(s)) => info.symbology = s,
                    _ => {}
                }
                valid_changes.symbology = Some(symbology);
            }
        }

        if let Some(visible) = changes.visible {
            if visible != self.visible {
                self.visible = visible;
                valid_changes.visible = Some(visible);
            }
        }

        if let Some(expanded) = changes.expanded {
            if expanded != self.expanded {
                self.expanded = expanded;
                valid_changes.expanded = Some(expanded);
            }
        }

        if let Some(edit_symbology) = changes.edit_symbology {
            if edit_symbology != self.edit_symbology {
                self.edit_symbology = edit_symbology;
                valid_changes.edit_symbology = Some(edit_symbology);
            }
        }

        if let Some(operator) = changes.operator {
            if operator != self.operator {
                self.operator = operator.clone();
                valid_changes.operator = Some(operator);
            }
        }

        tracing::debug!(
            "Layer {} changed, empty delta: {}",
            self.id,
            valid_changes.is_empty()
        );

        Ok(valid_changes)
    }

    pub fn to_dict(&self) -> Result<LayerDict> {
        let layer_type: &'static str = self.layer_type().into();

        Ok(LayerDict {
            name: self.name.clone(),
            operator: self.operator.to_dict()?,
            symbology: self.symbology(),
            expanded: self.expanded,
            visible: self.visible,
            edit_symbology: self.edit_symbology,
            layer_type: layer_type.to_string(),
            type_options: self.type_options(),
        })
    }

    /// Restores a layer. The operator graph gets new ids.
    pub fn from_dict(
        layer_ids: &LayerIdAllocator,
        operator_ids: &OperatorIdAllocator,
        dict: &LayerDict,
    ) -> Result<Self> {
        Self::from_dict_with_map(layer_ids, operator_ids, dict, &mut HashMap::new())
    }

    /// Restores a layer, sharing operators with the ones restored before via `operators`
    pub fn from_dict_with_map(
        layer_ids: &LayerIdAllocator,
        operator_ids: &OperatorIdAllocator,
        dict: &LayerDict,
        operators: &mut HashMap<OperatorId, Operator>,
    ) -> Result<Self> {
        let layer_type = LayerType::from_str(&dict.layer_type).map_err(|_| {
            error::Error::UnknownLayerType {
                layer_type: dict.layer_type.clone(),
            }
        })?;

        let operator = Operator::from_dict_with_map(operator_ids, &dict.operator, operators)?;

        let layer = match layer_type {
            LayerType::Raster => Self::new_raster(
                layer_ids,
                dict.name.clone(),
                operator,
                dict.symbology.clone().into_raster()?,
            ),
            LayerType::Vector => Self::new_vector(
                layer_ids,
                dict.name.clone(),
                operator,
                dict.symbology.clone().into_vector()?,
                dict.type_options.clustered.unwrap_or(false),
            ),
        };

        Ok(layer
            .with_visible(dict.visible)
            .with_expanded(dict.expanded)
            .with_edit_symbology(dict.edit_symbology))
    }
}

impl PartialEq for Layer {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
            && self.name == other.name
            && self.operator == other.operator
            && self.visible == other.visible
            && self.info == other.info
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::symbology::{MappingColorizerRasterSymbology, PointSymbology};
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use wave_datatypes::colors::RgbaColor;
    use wave_datatypes::primitives::{DataType, Interpolation, ResultType, Unit};
    use wave_datatypes::projection::Projection;
    use wave_operators::engine::{OperatorConfig, OperatorType};
    use wave_operators::source::{GfbioColumns, GfbioSourceParams, RasterSourceParams};

    fn elevation() -> Unit {
        Unit::new("elevation", "m", Interpolation::Continuous)
    }

    fn srtm(ids: &OperatorIdAllocator) -> Operator {
        Operator::new(
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
        .unwrap()
    }

    fn puma(ids: &OperatorIdAllocator) -> Operator {
        Operator::new(
            ids,
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

    fn raster_layer(layer_ids: &LayerIdAllocator, operator_ids: &OperatorIdAllocator) -> Layer {
        Layer::new_raster(
            layer_ids,
            "SRTM",
            srtm(operator_ids),
            RasterSymbology::MappingColorizer(MappingColorizerRasterSymbology::create_symbology(
                None,
            )),
        )
    }

    fn point_layer(layer_ids: &LayerIdAllocator, operator_ids: &OperatorIdAllocator) -> Layer {
        Layer::new_vector(
            layer_ids,
            "Puma",
            puma(operator_ids),
            VectorSymbology::ClusteredPoint(PointSymbology::create_cluster_symbology(
                RgbaColor::red(),
            )),
            true,
        )
    }

    #[test]
    fn raster_layer_defaults_unit_from_operator() {
        let layer = raster_layer(&LayerIdAllocator::new(), &OperatorIdAllocator::new());

        let LayerInfo::Raster(info) = layer.info() else {
            panic!("expected a raster layer");
        };
        assert_eq!(info.symbology.unit(), Some(&elevation()));

        assert!(layer.visible());
        assert!(!layer.expanded());
        assert!(!layer.edit_symbology());
        assert_eq!(layer.layer_type(), LayerType::Raster);
    }

    #[test]
    fn raster_layer_keeps_given_unit() {
        let temperature = Unit::new("temperature", "°C", Interpolation::Continuous);

        let layer = Layer::new_raster(
            &LayerIdAllocator::new(),
            "SRTM",
            srtm(&OperatorIdAllocator::new()),
            RasterSymbology::MappingColorizer(MappingColorizerRasterSymbology::create_symbology(
                Some(temperature.clone()),
            )),
        );

        let LayerInfo::Raster(info) = layer.info() else {
            panic!("expected a raster layer");
        };
        assert_eq!(info.symbology.unit(), Some(&temperature));
    }

    #[test]
    fn changes_only_return_deltas() {
        let layer_ids = LayerIdAllocator::new();
        let operator_ids = OperatorIdAllocator::new();
        let mut layer = point_layer(&layer_ids, &operator_ids);

        let no_op = layer
            .change_underlying_data(LayerChanges {
                name: Some("Puma".to_string()),
                visible: Some(true),
                expanded: Some(false),
                symbology: Some(layer.symbology()),
                operator: Some(layer.operator().clone()),
                ..Default::default()
            })
            .unwrap();
        assert!(no_op.is_empty());

        let empty_name = layer
            .change_underlying_data(LayerChanges {
                name: Some(String::new()),
                ..Default::default()
            })
            .unwrap();
        assert!(empty_name.is_empty());
        assert_eq!(layer.name(), "Puma");

        let changes = layer
            .change_underlying_data(LayerChanges {
                name: Some("Puma concolor".to_string()),
                visible: Some(false),
                expanded: Some(false),
                edit_symbology: Some(true),
                ..Default::default()
            })
            .unwrap();

        assert_eq!(
            changes,
            LayerChanges {
                name: Some("Puma concolor".to_string()),
                visible: Some(false),
                edit_symbology: Some(true),
                ..Default::default()
            }
        );
        assert_eq!(layer.name(), "Puma concolor");
        assert!(!layer.visible());
        assert!(layer.edit_symbology());
    }

    #[test]
    fn symbology_of_the_wrong_kind_is_rejected() {
        let mut layer = point_layer(&LayerIdAllocator::new(), &OperatorIdAllocator::new());

        let result = layer.change_underlying_data(LayerChanges {
            name: Some("Raster".to_string()),
            symbology: Some(Symbology::Raster(RasterSymbology::MappingColorizer(
                MappingColorizerRasterSymbology::create_symbology(None),
            ))),
            ..Default::default()
        });

        assert!(matches!(
            result,
            Err(error::Error::SymbologyDoesNotMatchLayerType {
                layer_type: LayerType::Vector
            })
        ));
        assert_eq!(layer.name(), "Puma");
    }

    #[test]
    fn dict_round_trip() {
        let layer_ids = LayerIdAllocator::new();
        let operator_ids = OperatorIdAllocator::new();

        for layer in [
            raster_layer(&layer_ids, &operator_ids).with_expanded(true),
            point_layer(&layer_ids, &operator_ids).with_visible(false),
        ] {
            let dict = layer.to_dict().unwrap();
            let restored = Layer::from_dict(&layer_ids, &operator_ids, &dict).unwrap();

            assert_eq!(restored.name(), layer.name());
            assert_eq!(restored.operator(), layer.operator());
            assert_eq!(restored.info(), layer.info());
            assert_eq!(restored.visible(), layer.visible());
            assert_eq!(restored.expanded(), layer.expanded());
            assert_eq!(
                restored.workflow_id().unwrap(),
                layer.workflow_id().unwrap()
            );
            assert_ne!(restored.id(), layer.id());
        }
    }

    #[test]
    fn dict_form() {
        let layer = point_layer(&LayerIdAllocator::new(), &OperatorIdAllocator::new());

        let dict = serde_json::to_value(layer.to_dict().unwrap()).unwrap();

        assert_eq!(dict["name"], json!("Puma"));
        assert_eq!(dict["type"], json!("vector"));
        assert_eq!(dict["typeOptions"], json!({"clustered": true}));
        assert_eq!(dict["visible"], json!(true));
        assert_eq!(dict["expanded"], json!(false));
        assert_eq!(dict["editSymbology"], json!(false));
        assert_eq!(dict["symbology"]["symbologyType"], json!("CLUSTERED_POINT"));
        assert_eq!(dict["operator"]["resultType"], json!("points"));

        let raster = raster_layer(&LayerIdAllocator::new(), &OperatorIdAllocator::new());
        let dict = serde_json::to_value(raster.to_dict().unwrap()).unwrap();
        assert_eq!(dict["type"], json!("raster"));
        assert_eq!(dict["typeOptions"], json!({}));
    }

    #[test]
    fn unknown_layer_type() {
        let layer_ids = LayerIdAllocator::new();
        let operator_ids = OperatorIdAllocator::new();

        let mut dict = point_layer(&layer_ids, &operator_ids).to_dict().unwrap();
        dict.layer_type = "heatmap".to_string();

        assert!(matches!(
            Layer::from_dict(&layer_ids, &operator_ids, &dict),
            Err(error::Error::UnknownLayerType { layer_type }) if layer_type == "heatmap"
        ));
    }

    #[test]
    fn shared_operators_stay_shared() {
        let layer_ids = LayerIdAllocator::new();
        let operator_ids = OperatorIdAllocator::new();

        let operator = srtm(&operator_ids);
        let symbology = RasterSymbology::MappingColorizer(
            MappingColorizerRasterSymbology::create_symbology(None),
        );
        let a = Layer::new_raster(&layer_ids, "A", operator.clone(), symbology.clone());
        let b = Layer::new_raster(&layer_ids, "B", operator, symbology);

        let mut operators = HashMap::new();
        let a = Layer::from_dict_with_map(
            &layer_ids,
            &operator_ids,
            &a.to_dict().unwrap(),
            &mut operators,
        )
        .unwrap();
        let b = Layer::from_dict_with_map(
            &layer_ids,
            &operator_ids,
            &b.to_dict().unwrap(),
            &mut operators,
        )
        .unwrap();

        assert!(a.operator().ptr_eq(b.operator()));
    }

    #[test]
    fn structural_equality() {
        let layer_ids = LayerIdAllocator::new();
        let operator_ids = OperatorIdAllocator::new();

        let layer = point_layer(&layer_ids, &operator_ids);
        let mut changed = layer.clone();

        assert_eq!(layer, changed);

        changed
            .change_underlying_data(LayerChanges {
                visible: Some(false),
                ..Default::default()
            })
            .unwrap();

        assert_ne!(layer, changed);
    }
}
