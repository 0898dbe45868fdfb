use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// Type tag of a canvas node.
///
/// Serialized as the builder's plain string (`"if-else"`, `"webhook"`, ...).
/// Strings outside the built-in vocabulary are kept verbatim in
/// [`NodeKind::Custom`] so that unknown node types survive a load/save cycle.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum NodeKind {
    Trigger,
    Webhook,
    Scheduled,
    IfElse,
    Switch,
    Condition,
    Parallel,
    Loop,
    Email,
    Api,
    Database,
    Delay,
    Transform,
    Notification,
    /// Untyped node as dropped on the canvas.
    #[default]
    Default,
    Custom(String),
}

impl NodeKind {
    pub fn as_str(&self) -> &str {
        match self {
            NodeKind::Trigger => "trigger",
            NodeKind::Webhook => "webhook",
            NodeKind::Scheduled => "scheduled",
            NodeKind::IfElse => "if-else",
            NodeKind::Switch => "switch",
            NodeKind::Condition => "condition",
            NodeKind::Parallel => "parallel",
            NodeKind::Loop => "loop",
            NodeKind::Email => "email",
            NodeKind::Api => "api",
            NodeKind::Database => "database",
            NodeKind::Delay => "delay",
            NodeKind::Transform => "transform",
            NodeKind::Notification => "notification",
            NodeKind::Default => "default",
            NodeKind::Custom(s) => s,
        }
    }

    /// Kinds that can originate a workflow run.
    pub fn is_trigger(&self) -> bool {
        matches!(
            self,
            NodeKind::Trigger | NodeKind::Webhook | NodeKind::Scheduled
        )
    }

    /// Any kind whose tag mentions email (`email`, `send-email`, ...).
    pub fn is_email(&self) -> bool {
        match self {
            NodeKind::Email => true,
            NodeKind::Custom(s) => s.contains("email"),
            _ => false,
        }
    }

    pub fn is_branching(&self) -> bool {
        matches!(
            self,
            NodeKind::IfElse | NodeKind::Switch | NodeKind::Parallel
        )
    }
}

impl From<&str> for NodeKind {
    fn from(s: &str) -> Self {
        match s {
            "trigger" => NodeKind::Trigger,
            "webhook" => NodeKind::Webhook,
            "scheduled" => NodeKind::Scheduled,
            "if-else" => NodeKind::IfElse,
            "switch" => NodeKind::Switch,
            "condition" => NodeKind::Condition,
            "parallel" => NodeKind::Parallel,
            "loop" => NodeKind::Loop,
            "email" => NodeKind::Email,
            "api" => NodeKind::Api,
            "database" => NodeKind::Database,
            "delay" => NodeKind::Delay,
            "transform" => NodeKind::Transform,
            "notification" => NodeKind::Notification,
            "default" | "" => NodeKind::Default,
            other => NodeKind::Custom(other.to_string()),
        }
    }
}

impl From<String> for NodeKind {
    fn from(s: String) -> Self {
        NodeKind::from(s.as_str())
    }
}

impl From<NodeKind> for String {
    fn from(kind: NodeKind) -> Self {
        match kind {
            NodeKind::Custom(s) => s,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type-specific configuration attached to a node.
///
/// Externally tagged with the builder's payload key, e.g.
/// `{"emailData": {"subject": "Welcome"}}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeConfig {
    EmailData(EmailData),
    ApiData(ApiData),
    DatabaseData(DatabaseData),
    ConditionData(ConditionData),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmailData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub method: Option<String>,
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub headers: HashMap<String, String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatabaseData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub table: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operation: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConditionData {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<serde_json::Value>,
}

impl From<EmailData> for NodeConfig {
    fn from(data: EmailData) -> Self {
        NodeConfig::EmailData(data)
    }
}

impl From<ApiData> for NodeConfig {
    fn from(data: ApiData) -> Self {
        NodeConfig::ApiData(data)
    }
}

impl From<DatabaseData> for NodeConfig {
    fn from(data: DatabaseData) -> Self {
        NodeConfig::DatabaseData(data)
    }
}

impl From<ConditionData> for NodeConfig {
    fn from(data: ConditionData) -> Self {
        NodeConfig::ConditionData(data)
    }
}

/// Node position in visual editor
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub x: f32,
    pub y: f32,
}

/// A node on the workflow canvas
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowNode {
    pub id: String,
    #[serde(rename = "type", default)]
    pub kind: NodeKind,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Position>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<NodeConfig>,
}

impl WorkflowNode {
    pub fn new(id: impl Into<String>, kind: impl Into<NodeKind>) -> Self {
        Self {
            id: id.into(),
            kind: kind.into(),
            label: None,
            position: None,
            config: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_config(mut self, config: impl Into<NodeConfig>) -> Self {
        self.config = Some(config.into());
        self
    }

    pub fn with_position(mut self, x: f32, y: f32) -> Self {
        self.position = Some(Position { x, y });
        self
    }

    /// Label shown to the user, falling back to the id for unlabeled nodes.
    pub fn display_name(&self) -> &str {
        match self.label.as_deref() {
            Some(label) if !label.trim().is_empty() => label,
            _ => &self.id,
        }
    }
}

/// Directed connection between two nodes, identified by its endpoints
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowEdge {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub source: String,
    pub target: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_handle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_handle: Option<String>,
}

impl WorkflowEdge {
    pub fn new(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            id: None,
            source: source.into(),
            target: target.into(),
            source_handle: None,
            target_handle: None,
        }
    }

    pub fn touches(&self, node_id: &str) -> bool {
        self.source == node_id || self.target == node_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_strings_round_trip_through_serde() {
        let kind: NodeKind = serde_json::from_str("\"if-else\"").unwrap();
        assert_eq!(kind, NodeKind::IfElse);

        let custom: NodeKind = serde_json::from_str("\"send-email\"").unwrap();
        assert_eq!(custom, NodeKind::Custom("send-email".to_string()));
        assert!(custom.is_email());
        assert_eq!(serde_json::to_string(&custom).unwrap(), "\"send-email\"");
    }

    #[test]
    fn missing_type_defaults_to_untyped_node() {
        let node: WorkflowNode = serde_json::from_str(r#"{"id": "n1"}"#).unwrap();
        assert_eq!(node.kind, NodeKind::Default);
        assert!(node.config.is_none());
        assert_eq!(node.display_name(), "n1");
    }

    #[test]
    fn config_uses_builder_payload_keys() {
        let node: WorkflowNode = serde_json::from_str(
            r#"{"id": "a1", "type": "email", "label": "Welcome", "config": {"emailData": {"subject": ""}}}"#,
        )
        .unwrap();

        match &node.config {
            Some(NodeConfig::EmailData(data)) => assert_eq!(data.subject.as_deref(), Some("")),
            other => panic!("unexpected config: {:?}", other),
        }
        assert_eq!(node.display_name(), "Welcome");
    }

    #[test]
    fn trigger_kinds() {
        assert!(NodeKind::Trigger.is_trigger());
        assert!(NodeKind::Webhook.is_trigger());
        assert!(NodeKind::Scheduled.is_trigger());
        assert!(!NodeKind::Loop.is_trigger());
        assert!(!NodeKind::Custom("cron".into()).is_trigger());
    }
}
