use crate::error::Result;
use crate::identifier;
use crate::util::identifiers::Identifier;
use uuid::Uuid;
use wave_operators::engine::Operator;

identifier!(WorkflowId);

impl WorkflowId {
    /// Derives the id from the query JSON, so equal queries share an id
    pub fn from_operator(operator: &Operator) -> Result<Self> {
        let query = operator.to_query_json()?;

        Ok(Self::from_uuid(Uuid::new_v5(
            &Uuid::NAMESPACE_OID,
            query.as_bytes(),
        )))
    }
}

/// The query graph behind a layer or plot
#[derive(Debug, Clone, PartialEq)]
pub struct Workflow {
    pub operator: Operator,
}

impl Workflow {
    pub fn new(operator: Operator) -> Self {
        Self { operator }
    }

    pub fn id(&self) -> Result<WorkflowId> {
        WorkflowId::from_operator(&self.operator)
    }
}
