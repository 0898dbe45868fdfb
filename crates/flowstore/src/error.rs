use flowcore::WorkflowId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Workflow not found: {0}")]
    NotFound(WorkflowId),

    #[error("Workflow already exists: {0}")]
    AlreadyExists(WorkflowId),

    #[error("Workflow failed validation: {}", .errors.join("; "))]
    ValidationFailed { errors: Vec<String> },

    #[error("Store is full ({0} workflows)")]
    CapacityExceeded(usize),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
