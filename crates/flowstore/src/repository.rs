use crate::StoreError;
use async_trait::async_trait;
use flowcore::{WorkflowDefinition, WorkflowId};
use flowvalidate::ValidationResult;
use serde::{Deserialize, Serialize};

/// Lifecycle state of a stored workflow
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkflowStatus {
    Draft,
    Active,
    Inactive,
}

/// A workflow definition together with its store-side state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredWorkflow {
    pub definition: WorkflowDefinition,
    pub status: WorkflowStatus,
    /// Result of the most recent validation, if one has run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_validation: Option<ValidationResult>,
}

impl StoredWorkflow {
    pub fn id(&self) -> WorkflowId {
        self.definition.id
    }

    pub fn is_active(&self) -> bool {
        self.status == WorkflowStatus::Active
    }
}

/// Persistence boundary for workflow definitions
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    async fn create(&self, workflow: WorkflowDefinition) -> Result<StoredWorkflow, StoreError>;

    async fn get(&self, id: WorkflowId) -> Result<StoredWorkflow, StoreError>;

    /// All workflows, oldest first.
    async fn list(&self) -> Vec<StoredWorkflow>;

    /// Replace the definition stored under `workflow.id`.
    async fn update(&self, workflow: WorkflowDefinition) -> Result<StoredWorkflow, StoreError>;

    async fn delete(&self, id: WorkflowId) -> Result<StoredWorkflow, StoreError>;

    /// Mark a workflow active. Fails when validation reports blocking errors.
    async fn activate(&self, id: WorkflowId) -> Result<StoredWorkflow, StoreError>;

    async fn deactivate(&self, id: WorkflowId) -> Result<StoredWorkflow, StoreError>;
}
