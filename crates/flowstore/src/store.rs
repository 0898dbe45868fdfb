use crate::{Result, StoreError, StoredWorkflow, WorkflowRepository, WorkflowStatus};
use async_trait::async_trait;
use chrono::Utc;
use flowcore::{WorkflowDefinition, WorkflowId};
use flowvalidate::{ValidationResult, WorkflowValidator};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// In-memory workflow repository
pub struct WorkflowStore {
    config: StoreConfig,
    validator: WorkflowValidator,
    workflows: Arc<RwLock<HashMap<WorkflowId, StoredWorkflow>>>,
}

impl WorkflowStore {
    /// Create an empty store with default settings
    pub fn new() -> Self {
        Self::with_config(StoreConfig::default())
    }

    /// Create an empty store with custom configuration
    pub fn with_config(config: StoreConfig) -> Self {
        Self {
            config,
            validator: WorkflowValidator::new(),
            workflows: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub async fn len(&self) -> usize {
        self.workflows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.workflows.read().await.is_empty()
    }

    /// Serialize every stored workflow, oldest first.
    pub async fn snapshot(&self) -> Result<String> {
        let workflows = self.list().await;
        Ok(serde_json::to_string_pretty(&workflows)?)
    }

    /// Replace the store contents with a snapshot. Returns the number loaded.
    ///
    /// Every definition is re-validated. An active workflow that no longer
    /// validates comes back inactive.
    pub async fn restore(&self, snapshot: &str) -> Result<usize> {
        let loaded: Vec<StoredWorkflow> = serde_json::from_str(snapshot)?;

        let mut restored = HashMap::with_capacity(loaded.len());
        for mut stored in loaded {
            let id = stored.id();
            if restored.contains_key(&id) {
                return Err(StoreError::AlreadyExists(id));
            }

            let result = self.validator.validate_workflow(&stored.definition);
            if stored.is_active() && result.has_errors() {
                tracing::warn!(
                    "Restored workflow {} as inactive: {} error(s)",
                    id,
                    result.errors.len()
                );
                stored.status = WorkflowStatus::Inactive;
            }
            stored.last_validation = Some(result);
            restored.insert(id, stored);
        }

        if let Some(max) = self.config.max_workflows {
            if restored.len() > max {
                return Err(StoreError::CapacityExceeded(max));
            }
        }

        let mut workflows = self.workflows.write().await;
        *workflows = restored;
        tracing::info!("Restored {} workflow(s) from snapshot", workflows.len());
        Ok(workflows.len())
    }

    /// Validation pass run on create/update, per the store configuration.
    fn validate_for_save(&self, workflow: &WorkflowDefinition) -> Result<Option<ValidationResult>> {
        if !self.config.validate_on_save {
            return Ok(None);
        }

        let result = self.validator.validate_workflow(workflow);
        if result.has_errors() && self.config.reject_invalid_on_save {
            tracing::warn!(
                "Rejected workflow {} on save: {} error(s)",
                workflow.id,
                result.errors.len()
            );
            return Err(StoreError::ValidationFailed {
                errors: result.errors,
            });
        }
        Ok(Some(result))
    }
}

impl Default for WorkflowStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl WorkflowRepository for WorkflowStore {
    async fn create(&self, workflow: WorkflowDefinition) -> Result<StoredWorkflow> {
        let validation = self.validate_for_save(&workflow)?;

        let mut workflows = self.workflows.write().await;
        if workflows.contains_key(&workflow.id) {
            return Err(StoreError::AlreadyExists(workflow.id));
        }
        if let Some(max) = self.config.max_workflows {
            if workflows.len() >= max {
                return Err(StoreError::CapacityExceeded(max));
            }
        }

        let stored = StoredWorkflow {
            definition: workflow,
            status: WorkflowStatus::Draft,
            last_validation: validation,
        };
        tracing::info!(
            "Created workflow {} ('{}')",
            stored.id(),
            stored.definition.name
        );
        workflows.insert(stored.id(), stored.clone());
        Ok(stored)
    }

    async fn get(&self, id: WorkflowId) -> Result<StoredWorkflow> {
        let workflows = self.workflows.read().await;
        workflows.get(&id).cloned().ok_or(StoreError::NotFound(id))
    }

    async fn list(&self) -> Vec<StoredWorkflow> {
        let workflows = self.workflows.read().await;
        let mut all: Vec<StoredWorkflow> = workflows.values().cloned().collect();
        all.sort_by(|a, b| {
            a.definition
                .created_at
                .cmp(&b.definition.created_at)
                .then_with(|| a.definition.name.cmp(&b.definition.name))
        });
        all
    }

    async fn update(&self, mut workflow: WorkflowDefinition) -> Result<StoredWorkflow> {
        let mut validation = self.validate_for_save(&workflow)?;

        let mut workflows = self.workflows.write().await;
        let stored = workflows
            .get_mut(&workflow.id)
            .ok_or(StoreError::NotFound(workflow.id))?;

        // A live workflow must stay runnable
        if stored.is_active() {
            let result = match validation.take() {
                Some(result) => result,
                None => self.validator.validate_workflow(&workflow),
            };
            if !result.is_valid {
                tracing::warn!(
                    "Rejected update of active workflow {}: {} error(s)",
                    workflow.id,
                    result.errors.len()
                );
                return Err(StoreError::ValidationFailed {
                    errors: result.errors,
                });
            }
            validation = Some(result);
        }

        workflow.created_at = stored.definition.created_at;
        workflow.updated_at = Utc::now();
        stored.definition = workflow;
        stored.last_validation = validation;

        tracing::info!("Updated workflow {}", stored.id());
        Ok(stored.clone())
    }

    async fn delete(&self, id: WorkflowId) -> Result<StoredWorkflow> {
        let mut workflows = self.workflows.write().await;
        let removed = workflows.remove(&id).ok_or(StoreError::NotFound(id))?;
        tracing::info!("Deleted workflow {}", id);
        Ok(removed)
    }

    async fn activate(&self, id: WorkflowId) -> Result<StoredWorkflow> {
        let mut workflows = self.workflows.write().await;
        let stored = workflows.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        let result = self.validator.validate_workflow(&stored.definition);
        if !result.is_valid {
            tracing::warn!(
                "Refusing to activate workflow {}: {} error(s)",
                id,
                result.errors.len()
            );
            let errors = result.errors.clone();
            stored.last_validation = Some(result);
            return Err(StoreError::ValidationFailed { errors });
        }

        if result.has_warnings() {
            tracing::debug!(
                "Activating workflow {} with {} warning(s)",
                id,
                result.warnings.len()
            );
        }
        stored.status = WorkflowStatus::Active;
        stored.last_validation = Some(result);
        tracing::info!("Activated workflow {}", id);
        Ok(stored.clone())
    }

    async fn deactivate(&self, id: WorkflowId) -> Result<StoredWorkflow> {
        let mut workflows = self.workflows.write().await;
        let stored = workflows.get_mut(&id).ok_or(StoreError::NotFound(id))?;

        if stored.is_active() {
            stored.status = WorkflowStatus::Inactive;
            tracing::info!("Deactivated workflow {}", id);
        }
        Ok(stored.clone())
    }
}

/// Configuration for the store
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Run the validator on create/update and keep the result.
    pub validate_on_save: bool,
    /// Refuse create/update while the validator reports errors.
    pub reject_invalid_on_save: bool,
    pub max_workflows: Option<usize>,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            validate_on_save: true,
            reject_invalid_on_save: false,
            max_workflows: None,
        }
    }
}
