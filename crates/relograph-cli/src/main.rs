//! CLI binary for relograph: render, inspect, and validate the
//! model-relocation dependency graph.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use relograph_analyze::build::build_graph;
use relograph_analyze::classify::classify_references;
use relograph_analyze::export::render_dot;
use relograph_analyze::resolve::resolve_models;
use relograph_analyze::validate::{ValidationIssue, validate_registry};
use relograph_core::config::RelographConfig;
use relograph_core::graph::DependencyGraph;
use relograph_core::registry::ModelRegistry;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "relograph", about = "Model-relocation dependency graph generator")]
struct Cli {
    /// Project root directory (defaults to current directory)
    #[arg(short, long, global = true)]
    project: Option<PathBuf>,

    /// Registry snapshot path (overrides the configured path)
    #[arg(short, long, global = true)]
    registry: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render the dependency graph as DOT to stdout
    Graph {
        /// Retain Excluded-scope models in their own cluster
        #[arg(long)]
        show_excluded: bool,
    },

    /// Show registry and graph statistics
    Info,

    /// Check the registry for structural inconsistencies
    Validate {
        /// Emit the report as JSON
        #[arg(long)]
        json: bool,
    },
}

fn get_project_root(cli: &Cli) -> Result<PathBuf> {
    match &cli.project {
        Some(p) => Ok(p.clone()),
        None => std::env::current_dir().context("failed to get current directory"),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let project_root = get_project_root(&cli)?;
    let config = RelographConfig::load(&project_root)?;
    let snapshot = cli
        .registry
        .clone()
        .unwrap_or_else(|| config.snapshot_path(&project_root));
    tracing::debug!(snapshot = %snapshot.display(), "using registry snapshot");

    match cli.command {
        Commands::Graph { show_excluded } => cmd_graph(
            &snapshot,
            show_excluded || config.render.show_excluded,
        ),
        Commands::Info => cmd_info(&snapshot),
        Commands::Validate { json } => cmd_validate(&snapshot, json),
    }
}

/// Run the full pipeline: load, classify, resolve, build.
fn build_from_snapshot(snapshot: &Path, show_excluded: bool) -> Result<DependencyGraph> {
    let registry = ModelRegistry::load(snapshot)?;
    let edges = classify_references(&registry)?;
    let models = resolve_models(&registry, &edges)?;
    Ok(build_graph(models, edges, show_excluded))
}

fn cmd_graph(snapshot: &Path, show_excluded: bool) -> Result<()> {
    let graph = build_from_snapshot(snapshot, show_excluded)?;
    print!("{}", render_dot(&graph));
    Ok(())
}

fn cmd_info(snapshot: &Path) -> Result<()> {
    let graph = build_from_snapshot(snapshot, true)?;
    let meta = &graph.metadata;

    println!("Models:        {}", meta.total_models);
    for cluster in &graph.clusters {
        println!("  {:13}{}", format!("{}:", cluster.scope), cluster.members.len());
    }
    println!("References:    {}", meta.total_edges);
    println!("  {:13}{}", "Explicit:", meta.explicit_edges);
    println!("  {:13}{}", "Implicit:", meta.implicit_edges);
    println!("  {:13}{}", "Hybrid:", meta.hybrid_edges);
    println!("Dangling:      {}", meta.dangling_models);
    Ok(())
}

fn cmd_validate(snapshot: &Path, json: bool) -> Result<()> {
    let registry = ModelRegistry::load(snapshot)?;
    let report = validate_registry(&registry);

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!(
            "{} models, {} reference fields",
            report.total_models, report.total_reference_fields
        );
        for issue in &report.issues {
            match issue {
                ValidationIssue::UnknownReferenceTarget {
                    model,
                    field,
                    target,
                } => println!("error: {model}.{field} references unknown model {target}"),
                ValidationIssue::MissingScope { model } => {
                    println!("error: {model} declares no relocation scope");
                }
                ValidationIssue::DanglingModel { model } => {
                    println!("note: {model} is dangling (unreferenced, not a relocation root)");
                }
            }
        }
    }

    if !report.is_clean() {
        anyhow::bail!("registry snapshot has structural errors");
    }
    Ok(())
}
