// crates/flowcli/src/main.rs

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use flowcore::{
    ApiData, EmailData, NodeKind, WorkflowDefinition, WorkflowNode,
};
use flowvalidate::{validate_workflow, WorkflowGraph};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "flow")]
#[command(about = "Workflow builder CLI", long_about = None)]
struct Cli {
    /// Show debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a workflow file
    Validate {
        /// Path to workflow JSON file
        file: PathBuf,

        /// Print the validation result as JSON
        #[arg(long)]
        json: bool,

        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },

    /// Show the structure of a workflow file
    Inspect {
        /// Path to workflow JSON file
        file: PathBuf,
    },

    /// List built-in node types
    NodeTypes,

    /// Create a new example workflow
    Init {
        /// Output file path
        #[arg(short, long, default_value = "workflow.json")]
        output: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate { file, json, strict } => validate_file(file, json, strict),
        Commands::Inspect { file } => inspect_file(file),
        Commands::NodeTypes => {
            list_node_types();
            Ok(())
        }
        Commands::Init { output } => create_example_workflow(output),
    }
}

fn validate_file(file: PathBuf, json: bool, strict: bool) -> Result<()> {
    let workflow = WorkflowDefinition::load(&file)?;
    let result = validate_workflow(&workflow);
    tracing::info!(
        "Validated workflow {}: valid={}, {} error(s), {} warning(s)",
        workflow.id,
        result.is_valid,
        result.errors.len(),
        result.warnings.len()
    );

    if json {
        println!("{}", serde_json::to_string_pretty(&result)?);
    } else {
        println!("🔍 Validating workflow: {} ({})", workflow.name, file.display());
        for error in &result.errors {
            println!("  ❌ {}", error);
        }
        for warning in &result.warnings {
            println!("  ⚠️  {}", warning);
        }
        if result.is_valid {
            println!("✅ Workflow is valid ({} warning(s))", result.warnings.len());
        }
    }

    if result.has_errors() {
        bail!("workflow has {} blocking error(s)", result.errors.len());
    }
    if strict && result.has_warnings() {
        bail!("workflow has {} warning(s) in strict mode", result.warnings.len());
    }
    Ok(())
}

fn inspect_file(file: PathBuf) -> Result<()> {
    let workflow = WorkflowDefinition::load(&file)?;
    let graph = WorkflowGraph::new(&workflow.nodes, &workflow.edges);

    println!("📋 Workflow: {}", workflow.name);
    if let Some(description) = &workflow.description {
        println!("   {}", description);
    }
    println!("   Nodes: {}", workflow.nodes.len());
    println!("   Connections: {}", workflow.edges.len());

    let triggers: Vec<&str> = workflow.triggers().map(|n| n.display_name()).collect();
    if triggers.is_empty() {
        println!("   Triggers: none");
    } else {
        println!("   Triggers: {}", triggers.join(", "));
    }

    match graph.topological_order() {
        Some(order) => {
            println!();
            println!("Execution order:");
            for (position, id) in order.iter().enumerate() {
                let label = workflow
                    .find_node(id)
                    .map(|n| format!("{} ({})", n.display_name(), n.kind))
                    .unwrap_or_else(|| id.to_string());
                println!("  {:>3}. {}", position + 1, label);
            }
        }
        None => println!("   Graph contains cycles; no execution order"),
    }

    Ok(())
}

fn list_node_types() {
    println!("📦 Available Node Types:");
    println!();

    for info in NodeKind::catalog() {
        println!("  • {} ({})", info.kind, info.category);
        println!("    {}", info.description);
    }
}

fn create_example_workflow(output: PathBuf) -> Result<()> {
    let mut workflow = WorkflowDefinition::new("Example Deal Follow-up")
        .with_description("Emails won deals and records lost ones in the CRM");

    workflow.add_node(
        WorkflowNode::new("trigger-1", NodeKind::Webhook)
            .with_label("Deal closed")
            .with_position(100.0, 100.0),
    )?;
    workflow.add_node(
        WorkflowNode::new("branch-1", NodeKind::IfElse)
            .with_label("Deal won?")
            .with_position(300.0, 100.0),
    )?;
    workflow.add_node(
        WorkflowNode::new("email-1", NodeKind::Email)
            .with_label("Send thank-you")
            .with_position(500.0, 50.0)
            .with_config(EmailData {
                to: Some("{{contact.email}}".into()),
                subject: Some("Thanks for your business".into()),
                body: None,
            }),
    )?;
    workflow.add_node(
        WorkflowNode::new("api-1", NodeKind::Api)
            .with_label("Record loss reason")
            .with_position(500.0, 150.0)
            .with_config(ApiData {
                url: Some("https://crm.example.com/api/deals/lost".into()),
                method: Some("POST".into()),
                ..Default::default()
            }),
    )?;

    workflow.connect("trigger-1", "branch-1")?;
    workflow.connect("branch-1", "email-1")?;
    workflow.connect("branch-1", "api-1")?;

    workflow.save(&output)?;

    println!("✨ Created example workflow: {}", output.display());
    println!();
    println!("Validate it with:");
    println!("  flow validate {}", output.display());

    Ok(())
}
