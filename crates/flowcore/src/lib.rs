//! Core workflow-builder types
//! 
//! This crate provides the canvas data model (nodes, typed configuration
//! payloads, edges and workflow definitions) that the validator, the store
//! and the CLI all depend on. It performs no analysis of its own.

mod catalog;
mod error;
mod node;
mod workflow;

pub use catalog::NodeTypeInfo;
pub use error::{FlowError, WorkflowError};
pub use node::{
    ApiData, ConditionData, DatabaseData, EmailData, NodeConfig, NodeKind, Position,
    WorkflowEdge, WorkflowNode,
};
pub use workflow::{WorkflowDefinition, WorkflowId};

/// Result type for flow operations
pub type Result<T> = std::result::Result<T, FlowError>;
