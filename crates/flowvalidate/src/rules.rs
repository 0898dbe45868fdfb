use flowcore::{NodeConfig, NodeKind, WorkflowNode};
use url::Url;

/// Field-level checks for a node's configuration payload.
///
/// A payload is only inspected when it matches the node's kind; nodes without
/// a payload, or with a payload for another kind, produce nothing.
pub(crate) fn check_node_config(node: &WorkflowNode, errors: &mut Vec<String>) {
    let Some(config) = &node.config else {
        return;
    };
    let name = node.display_name();

    match config {
        NodeConfig::EmailData(data) if node.kind.is_email() => {
            if is_blank(data.subject.as_deref()) {
                errors.push(format!("Email node \"{}\" is missing a subject", name));
            }
        }
        NodeConfig::ApiData(data) if node.kind == NodeKind::Api => {
            let url = data.url.as_deref().unwrap_or_default();
            if is_blank(Some(url)) {
                errors.push(format!("API node \"{}\" is missing a URL", name));
            }
            if Url::parse(url.trim()).is_err() {
                errors.push(format!("API node \"{}\" has an invalid URL", name));
            }
        }
        NodeConfig::DatabaseData(data) if node.kind == NodeKind::Database => {
            if is_blank(data.table.as_deref()) {
                errors.push(format!("Database node \"{}\" is missing a table name", name));
            }
        }
        NodeConfig::ConditionData(data) if node.kind == NodeKind::Condition => {
            if is_blank(data.field.as_deref()) {
                errors.push(format!("Condition node \"{}\" is missing a field", name));
            }
        }
        _ => {
            tracing::debug!(
                "Skipping {} payload check for node {}",
                node.kind,
                node.id
            );
        }
    }
}

fn is_blank(value: Option<&str>) -> bool {
    value.map_or(true, |v| v.trim().is_empty())
}
