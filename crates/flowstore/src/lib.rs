//! Workflow definition store
//! 
//! An explicitly constructed, in-memory repository for workflow definitions.
//! Definitions are re-validated on every save and can only be activated
//! while they are free of blocking errors.

mod error;
mod repository;
mod store;

pub use error::StoreError;
pub use repository::{StoredWorkflow, WorkflowRepository, WorkflowStatus};
pub use store::{StoreConfig, WorkflowStore};

/// Result type for store operations
pub type Result<T> = std::result::Result<T, StoreError>;
