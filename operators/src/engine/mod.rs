mod operator;
mod operator_type;
mod parameters;
mod query;

pub use self::operator::{
    MAX_OPERATOR_GRAPH_DEPTH, Operator, OperatorConfig, OperatorDict, OperatorId,
    OperatorIdAllocator, OperatorModifications,
};
pub use self::operator_type::{OPERATOR_TYPE_TAG, OperatorType, OperatorTypeKind};
pub use self::parameters::{OperatorParams, ParameterValue};
pub use self::query::{QueryDict, QuerySources};
