use flowcore::{
    ApiData, ConditionData, DatabaseData, EmailData, NodeKind, WorkflowDefinition, WorkflowEdge,
    WorkflowNode,
};
use flowvalidate::{validate, validate_workflow, ValidationResult, WorkflowValidator};

/// Initialize tracing for tests
fn init_tracing() {
    use tracing_subscriber::{fmt, EnvFilter};
    let _ = fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("debug"))
        )
        .with_test_writer()
        .try_init();
}

fn node(id: &str, kind: NodeKind) -> WorkflowNode {
    WorkflowNode::new(id, kind)
}

fn edge(source: &str, target: &str) -> WorkflowEdge {
    WorkflowEdge::new(source, target)
}

fn has_error(result: &ValidationResult, needle: &str) -> bool {
    result.errors.iter().any(|e| e.contains(needle))
}

fn has_warning(result: &ValidationResult, needle: &str) -> bool {
    result.warnings.iter().any(|w| w.contains(needle))
}

#[test]
fn test_empty_workflow_is_invalid() {
    init_tracing();

    let result = validate(&[], &[]);
    assert!(!result.is_valid);
    assert!(has_error(&result, "at least one node"));
    // No nodes means nothing orphaned or unreachable
    assert!(!has_warning(&result, "orphaned"));
    assert!(!has_warning(&result, "unreachable"));
}

#[test]
fn test_missing_trigger_only_warns() {
    let nodes = vec![node("a", NodeKind::Email), node("b", NodeKind::Delay)];
    let edges = vec![edge("a", "b")];

    let result = validate(&nodes, &edges);
    assert!(result.is_valid);
    assert!(has_warning(&result, "trigger"));
}

#[test]
fn test_any_trigger_kind_satisfies_trigger_check() {
    for kind in [NodeKind::Trigger, NodeKind::Webhook, NodeKind::Scheduled] {
        let nodes = vec![node("t", kind), node("a", NodeKind::Default)];
        let result = validate(&nodes, &[edge("t", "a")]);
        assert!(result.is_valid);
        assert!(result.warnings.is_empty(), "unexpected warnings: {:?}", result.warnings);
    }
}

#[test]
fn test_orphans_are_counted_and_listed_in_order() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("a", NodeKind::Default).with_label("Alpha"),
        node("x", NodeKind::Default),
        node("b", NodeKind::Default).with_label("Beta"),
    ];
    let result = validate(&nodes, &[edge("t1", "x")]);

    assert!(result
        .warnings
        .contains(&"Found 2 orphaned node(s): Alpha, Beta".to_string()));
}

#[test]
fn test_two_node_cycle_is_an_error() {
    // Scenario B
    let nodes = vec![node("n1", NodeKind::Default), node("n2", NodeKind::Default)];
    let edges = vec![edge("n1", "n2"), edge("n2", "n1")];

    let result = validate(&nodes, &edges);
    assert!(!result.is_valid);
    assert!(has_error(&result, "cycles"));
}

#[test]
fn test_cycle_through_loop_node_is_still_an_error() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("loop", NodeKind::Loop),
        node("body", NodeKind::Api),
    ];
    let edges = vec![edge("t1", "loop"), edge("loop", "body"), edge("body", "loop")];

    let result = validate(&nodes, &edges);
    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Workflow contains cycles".to_string()]);
}

#[test]
fn test_self_loop_is_a_cycle() {
    let nodes = vec![node("t1", NodeKind::Trigger)];
    let result = validate(&nodes, &[edge("t1", "t1")]);
    assert!(has_error(&result, "cycles"));
}

#[test]
fn test_if_else_requires_exactly_two_branches() {
    // Scenario C
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("c1", NodeKind::IfElse),
        node("x1", NodeKind::Default),
        node("x2", NodeKind::Default),
    ];
    let edges = vec![edge("t1", "c1"), edge("c1", "x1"), edge("c1", "x2")];

    let result = validate(&nodes, &edges);
    assert!(result.is_valid);
    assert!(!has_error(&result, "If-else"));
    assert!(!has_warning(&result, "unreachable"));

    for branches in [0usize, 1, 3] {
        let targets = ["x1", "x2", "x3"];
        let mut nodes = vec![
            node("t1", NodeKind::Trigger),
            node("c1", NodeKind::IfElse).with_label("Deal won?"),
        ];
        let mut edges = vec![edge("t1", "c1")];
        for target in &targets[..branches] {
            nodes.push(node(target, NodeKind::Default));
            edges.push(edge("c1", target));
        }

        let result = validate(&nodes, &edges);
        assert!(!result.is_valid, "{} branches should be rejected", branches);
        assert!(result.errors.contains(&format!(
            "If-else node \"Deal won?\" must have exactly 2 outgoing connections (found {})",
            branches
        )));
    }
}

#[test]
fn test_thin_switch_is_a_warning_not_an_error() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("s1", NodeKind::Switch).with_label("Route by region"),
        node("x1", NodeKind::Default),
    ];
    let edges = vec![edge("t1", "s1"), edge("s1", "x1")];

    let result = validate(&nodes, &edges);
    assert!(result.is_valid);
    assert!(has_warning(&result, "Switch node \"Route by region\""));
    assert!(!has_error(&result, "Switch"));
}

#[test]
fn test_thin_parallel_is_a_warning() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("p1", NodeKind::Parallel),
    ];
    let result = validate(&nodes, &[edge("t1", "p1")]);

    assert!(result.is_valid);
    assert!(has_warning(&result, "Parallel node \"p1\""));
}

#[test]
fn test_isolated_untyped_node() {
    // Scenario D
    let nodes = vec![node("iso", NodeKind::Default)];
    let result = validate(&nodes, &[]);

    assert!(result.is_valid);
    assert!(result.errors.is_empty());
    assert!(result.warnings.contains(&"Found 1 orphaned node(s): iso".to_string()));
    assert!(has_warning(&result, "unreachable"));
}

#[test]
fn test_unreachable_nodes_are_counted() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("a", NodeKind::Default),
        node("b", NodeKind::Default),
        node("c", NodeKind::Default),
    ];
    // b -> c is connected but not downstream of the trigger
    let edges = vec![edge("t1", "a"), edge("b", "c")];

    let result = validate(&nodes, &edges);
    assert!(result.is_valid);
    assert!(result
        .warnings
        .contains(&"Found 2 unreachable node(s) not connected to any trigger".to_string()));
    assert!(!has_warning(&result, "orphaned"));
}

#[test]
fn test_email_without_subject() {
    // Scenario A
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("a1", NodeKind::Email).with_config(EmailData {
            subject: Some(String::new()),
            ..Default::default()
        }),
    ];
    let result = validate(&nodes, &[edge("t1", "a1")]);

    assert!(!result.is_valid);
    assert_eq!(result.errors, vec!["Email node \"a1\" is missing a subject".to_string()]);
    assert!(result.warnings.is_empty());
}

#[test]
fn test_configuration_errors_follow_graph_errors_in_node_order() {
    let nodes = vec![
        node("db", NodeKind::Database).with_config(DatabaseData::default()),
        node("cond", NodeKind::Condition).with_config(ConditionData::default()),
        node("api", NodeKind::Api).with_config(ApiData {
            url: Some("not a url".into()),
            ..Default::default()
        }),
        node("plain", NodeKind::Email),
    ];
    let edges = vec![edge("db", "cond"), edge("cond", "db"), edge("cond", "api")];

    let result = validate(&nodes, &edges);
    assert_eq!(
        result.errors,
        vec![
            "Workflow contains cycles".to_string(),
            "Database node \"db\" is missing a table name".to_string(),
            "Condition node \"cond\" is missing a field".to_string(),
            "API node \"api\" has an invalid URL".to_string(),
        ]
    );
}

#[test]
fn test_valid_api_node_passes() {
    let nodes = vec![
        node("t1", NodeKind::Webhook),
        node("api", NodeKind::Api).with_config(ApiData {
            url: Some("https://api.example.com/v1/deals".into()),
            method: Some("POST".into()),
            ..Default::default()
        }),
    ];
    let result = validate(&nodes, &[edge("t1", "api")]);
    assert!(result.is_valid);
    assert!(result.errors.is_empty());
}

#[test]
fn test_dangling_edges_are_tolerated() {
    let nodes = vec![node("t1", NodeKind::Trigger), node("a", NodeKind::Default)];
    let edges = vec![edge("t1", "a"), edge("a", "ghost")];

    let result = validate(&nodes, &edges);
    assert!(result.is_valid);
    assert!(has_warning(&result, "a -> ghost"));
}

#[test]
fn test_validation_is_idempotent() {
    let nodes = vec![
        node("t1", NodeKind::Trigger),
        node("c1", NodeKind::IfElse),
        node("iso", NodeKind::Switch),
    ];
    let edges = vec![edge("t1", "c1")];

    let validator = WorkflowValidator::new();
    let first = validator.validate(&nodes, &edges);
    let second = validator.validate(&nodes, &edges);
    assert_eq!(first, second);
}

#[test]
fn test_validate_workflow_definition() {
    let mut workflow = WorkflowDefinition::new("Onboarding");
    workflow.add_node(node("t1", NodeKind::Trigger)).unwrap();
    workflow.add_node(node("n1", NodeKind::Notification)).unwrap();
    workflow.connect("t1", "n1").unwrap();

    let result = validate_workflow(&workflow);
    assert!(result.is_valid);
    assert!(!result.has_warnings());
}

#[test]
fn test_result_serializes_with_camel_case() {
    let result = validate(&[], &[]);
    let json = serde_json::to_value(&result).unwrap();

    assert_eq!(json["isValid"], serde_json::Value::Bool(false));
    assert!(json["errors"].is_array());
    assert!(json["warnings"].is_array());
}

#[test]
fn test_duplicate_node_ids_warn_once_per_repeat() {
    let nodes = vec![
        node("a", NodeKind::Default),
        node("a", NodeKind::Default),
        node("b", NodeKind::Database).with_config(DatabaseData::default()),
    ];
    let result = validate(&nodes, &[]);

    let duplicate = "Node id \"a\" is used more than once".to_string();
    assert_eq!(result.warnings.iter().filter(|w| **w == duplicate).count(), 1);

    // Runs after reachability, before node configuration errors
    let unreachable = result
        .warnings
        .iter()
        .position(|w| w.contains("unreachable"))
        .unwrap();
    let duplicate_at = result.warnings.iter().position(|w| *w == duplicate).unwrap();
    assert!(unreachable < duplicate_at);
    assert_eq!(duplicate_at, result.warnings.len() - 1);
    assert_eq!(
        result.errors,
        vec!["Database node \"b\" is missing a table name".to_string()]
    );
}
