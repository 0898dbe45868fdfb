//! Workflow canvas validation
//! 
//! Checks a workflow-builder graph before it is saved or activated: empty
//! canvases, missing triggers, orphaned and unreachable nodes, cycles,
//! branch arity on if-else / switch / parallel nodes, and required fields
//! in node configuration payloads. Validation is a pure function of the
//! node and edge lists and never fails.

mod graph;
mod result;
mod rules;
mod validator;

pub use graph::WorkflowGraph;
pub use result::ValidationResult;
pub use validator::{validate, validate_workflow, WorkflowValidator};
