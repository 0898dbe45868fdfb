use crate::NodeKind;

/// Metadata about a built-in node type
#[derive(Debug, Clone, PartialEq)]
pub struct NodeTypeInfo {
    pub kind: NodeKind,
    pub category: &'static str,
    pub description: &'static str,
}

impl NodeKind {
    /// Every built-in node type, grouped by category.
    pub fn catalog() -> Vec<NodeTypeInfo> {
        [
            (NodeKind::Trigger, "Starts the workflow manually"),
            (NodeKind::Webhook, "Starts the workflow on an incoming HTTP request"),
            (NodeKind::Scheduled, "Starts the workflow on a schedule"),
            (NodeKind::IfElse, "Routes to one of exactly two branches"),
            (NodeKind::Switch, "Routes to one of several branches"),
            (NodeKind::Condition, "Evaluates a field against a value"),
            (NodeKind::Parallel, "Runs every outgoing branch concurrently"),
            (NodeKind::Loop, "Repeats its body for each item"),
            (NodeKind::Email, "Sends an email"),
            (NodeKind::Api, "Calls an HTTP endpoint"),
            (NodeKind::Database, "Reads or writes a table"),
            (NodeKind::Delay, "Waits before continuing"),
            (NodeKind::Transform, "Reshapes data between steps"),
            (NodeKind::Notification, "Posts an in-app notification"),
            (NodeKind::Default, "Untyped step"),
        ]
        .into_iter()
        .map(|(kind, description)| NodeTypeInfo {
            category: kind.category(),
            kind,
            description,
        })
        .collect()
    }

    pub fn category(&self) -> &'static str {
        if self.is_trigger() {
            "trigger"
        } else if self.is_branching() || matches!(self, NodeKind::Condition | NodeKind::Loop) {
            "control"
        } else if matches!(self, NodeKind::Default | NodeKind::Custom(_)) {
            "general"
        } else {
            "action"
        }
    }
}
