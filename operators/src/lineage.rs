use crate::engine::{Operator, OperatorId};
use crate::util::Result;
use serde::Serialize;
use std::collections::HashSet;
use wave_datatypes::primitives::ResultType;

/// The operators of a graph and how they feed into each other
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageGraph {
    pub nodes: Vec<LineageNode>,
    pub edges: Vec<LineageEdge>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LineageNode {
    pub id: OperatorId,
    pub type_name: String,
    pub display_name: String,
    pub icon_url: String,
    pub result_type: ResultType,
    /// `(name, value)` pairs as shown to users
    pub parameters: Vec<(String, String)>,
}

/// `source` is an input of `consumer`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct LineageEdge {
    pub source: OperatorId,
    pub consumer: OperatorId,
}

impl LineageGraph {
    /// Walks the graph depth-first, starting at `operator`.
    ///
    /// Every operator appears once, even if it is a source of several operators.
    /// Sources are visited in the order raster, points, lines, polygons.
    pub fn from_operator(operator: &Operator) -> Result<Self> {
        let mut nodes = Vec::new();
        let mut edges = Vec::new();

        let mut visited = HashSet::new();
        let mut seen_edges = HashSet::new();
        let mut stack = vec![operator.clone()];

        while let Some(operator) = stack.pop() {
            if !visited.insert(operator.id()) {
                continue;
            }

            tracing::trace!("Adding operator {} to lineage", operator.id());

            nodes.push(LineageNode {
                id: operator.id(),
                type_name: operator.operator_type().type_name().to_string(),
                display_name: operator.operator_type().to_string(),
                icon_url: operator.operator_type().icon_url()?,
                result_type: operator.result_type(),
                parameters: operator.operator_type().parameters_as_strings(),
            });

            let sources: Vec<Operator> = operator.all_sources().cloned().collect();

            for source in &sources {
                let edge = LineageEdge {
                    source: source.id(),
                    consumer: operator.id(),
                };
                if seen_edges.insert(edge) {
                    edges.push(edge);
                }
            }

            stack.extend(sources.into_iter().rev());
        }

        Ok(Self { nodes, edges })
    }

    pub fn node(&self, id: OperatorId) -> Option<&LineageNode> {
        self.nodes.iter().find(|node| node.id == id)
    }

    /// The source operators, i.e., nodes without incoming edges
    pub fn leaves(&self) -> impl Iterator<Item = &LineageNode> {
        self.nodes
            .iter()
            .filter(|node| !self.edges.iter().any(|edge| edge.consumer == node.id))
    }
}
