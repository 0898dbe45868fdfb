use crate::{FlowError, Result, WorkflowEdge, WorkflowError, WorkflowNode};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;
use uuid::Uuid;

pub type WorkflowId = Uuid;

/// Complete workflow definition as persisted by the builder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowDefinition {
    #[serde(default = "Uuid::new_v4")]
    pub id: WorkflowId,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub nodes: Vec<WorkflowNode>,
    #[serde(default)]
    pub edges: Vec<WorkflowEdge>,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
    #[serde(default = "Utc::now")]
    pub updated_at: DateTime<Utc>,
}

impl WorkflowDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            description: None,
            nodes: Vec::new(),
            edges: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Add a node, rejecting ids already on the canvas.
    pub fn add_node(&mut self, node: WorkflowNode) -> Result<String> {
        if self.find_node(&node.id).is_some() {
            return Err(WorkflowError::DuplicateNode(node.id).into());
        }
        let id = node.id.clone();
        self.nodes.push(node);
        self.touch();
        Ok(id)
    }

    /// Remove a node together with every edge that touches it.
    pub fn remove_node(&mut self, node_id: &str) -> Result<WorkflowNode> {
        let position = self
            .nodes
            .iter()
            .position(|n| n.id == node_id)
            .ok_or_else(|| WorkflowError::NodeNotFound(node_id.to_string()))?;

        let node = self.nodes.remove(position);
        let before = self.edges.len();
        self.edges.retain(|e| !e.touches(node_id));
        tracing::debug!(
            "Removed node {} and {} connection(s)",
            node_id,
            before - self.edges.len()
        );
        self.touch();
        Ok(node)
    }

    /// Connect two existing nodes. Connecting the same pair twice is a no-op.
    pub fn connect(&mut self, source: impl Into<String>, target: impl Into<String>) -> Result<()> {
        let source = source.into();
        let target = target.into();

        for id in [&source, &target] {
            if self.find_node(id).is_none() {
                return Err(WorkflowError::NodeNotFound(id.clone()).into());
            }
        }

        if self.has_edge(&source, &target) {
            return Ok(());
        }
        self.edges.push(WorkflowEdge::new(source, target));
        self.touch();
        Ok(())
    }

    pub fn disconnect(&mut self, source: &str, target: &str) -> Result<()> {
        if !self.has_edge(source, target) {
            return Err(WorkflowError::ConnectionNotFound {
                from: source.to_string(),
                to: target.to_string(),
            }
            .into());
        }
        self.edges.retain(|e| !(e.source == source && e.target == target));
        self.touch();
        Ok(())
    }

    pub fn has_edge(&self, source: &str, target: &str) -> bool {
        self.edges
            .iter()
            .any(|e| e.source == source && e.target == target)
    }

    pub fn find_node(&self, id: &str) -> Option<&WorkflowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    pub fn triggers(&self) -> impl Iterator<Item = &WorkflowNode> {
        self.nodes.iter().filter(|n| n.kind.is_trigger())
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let workflow = Self::from_json(&json)?;
        tracing::debug!(
            "Loaded workflow '{}' from {} ({} nodes, {} edges)",
            workflow.name,
            path.display(),
            workflow.nodes.len(),
            workflow.edges.len()
        );
        Ok(workflow)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        std::fs::write(path.as_ref(), self.to_json_pretty()?).map_err(FlowError::from)
    }

    fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
