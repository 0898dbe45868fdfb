use crate::graph::WorkflowGraph;
use crate::result::ValidationResult;
use crate::rules::check_node_config;
use flowcore::{NodeKind, WorkflowDefinition, WorkflowEdge, WorkflowNode};

/// Validates workflow-builder canvases before they are saved or activated
#[derive(Debug, Clone, Copy, Default)]
pub struct WorkflowValidator;

impl WorkflowValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> ValidationResult {
        validate(nodes, edges)
    }

    pub fn validate_workflow(&self, workflow: &WorkflowDefinition) -> ValidationResult {
        validate_workflow(workflow)
    }
}

/// Validate a workflow definition's current nodes and edges.
pub fn validate_workflow(workflow: &WorkflowDefinition) -> ValidationResult {
    validate(&workflow.nodes, &workflow.edges)
}

/// Run every structural and configuration check over a canvas.
///
/// Never fails: malformed input (dangling edges, duplicate ids) just produces
/// more findings. Every check runs regardless of earlier findings, and
/// node-level configuration errors come after all graph-level findings.
pub fn validate(nodes: &[WorkflowNode], edges: &[WorkflowEdge]) -> ValidationResult {
    let graph = WorkflowGraph::new(nodes, edges);
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    if nodes.is_empty() {
        errors.push("Workflow must contain at least one node".to_string());
    }

    if !nodes.iter().any(|n| n.kind.is_trigger()) {
        warnings.push(
            "Workflow has no trigger node; add at least one trigger, webhook or schedule"
                .to_string(),
        );
    }

    let orphans: Vec<&str> = nodes
        .iter()
        .filter(|n| !graph.is_connected(&n.id))
        .map(|n| n.display_name())
        .collect();
    if !orphans.is_empty() {
        warnings.push(format!(
            "Found {} orphaned node(s): {}",
            orphans.len(),
            orphans.join(", ")
        ));
    }

    // Loop nodes get no exemption, iteration must not be drawn as a cycle
    if graph.has_cycle() {
        errors.push("Workflow contains cycles".to_string());
    }

    for node in nodes {
        let outgoing = graph.out_degree(&node.id);
        match node.kind {
            NodeKind::IfElse if outgoing != 2 => errors.push(format!(
                "If-else node \"{}\" must have exactly 2 outgoing connections (found {})",
                node.display_name(),
                outgoing
            )),
            NodeKind::Switch if outgoing < 2 => warnings.push(format!(
                "Switch node \"{}\" should have at least 2 outgoing connections (found {})",
                node.display_name(),
                outgoing
            )),
            _ => {}
        }
    }

    for node in nodes.iter().filter(|n| n.kind == NodeKind::Parallel) {
        let outgoing = graph.out_degree(&node.id);
        if outgoing < 2 {
            warnings.push(format!(
                "Parallel node \"{}\" should have at least 2 outgoing connections (found {})",
                node.display_name(),
                outgoing
            ));
        }
    }

    let reachable = graph.reachable_from(
        nodes
            .iter()
            .filter(|n| n.kind.is_trigger())
            .map(|n| n.id.as_str()),
    );
    let unreachable = nodes
        .iter()
        .filter(|n| !reachable.contains(n.id.as_str()))
        .count();
    if unreachable > 0 {
        warnings.push(format!(
            "Found {} unreachable node(s) not connected to any trigger",
            unreachable
        ));
    }

    for edge in graph.dangling_edges() {
        warnings.push(format!(
            "Connection {} -> {} references a node that does not exist",
            edge.source, edge.target
        ));
    }
    for id in graph.duplicate_ids() {
        warnings.push(format!("Node id \"{}\" is used more than once", id));
    }

    for node in nodes {
        check_node_config(node, &mut errors);
    }

    tracing::debug!(
        "Validated {} node(s), {} edge(s): {} error(s), {} warning(s)",
        nodes.len(),
        edges.len(),
        errors.len(),
        warnings.len()
    );

    ValidationResult::from_issues(errors, warnings)
}
