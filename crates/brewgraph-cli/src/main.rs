//! Brewgraph CLI
//!
//! - `build`: brew log (CSV/TSV/JSON) → graph (JSON / DOT / HTML)
//! - `stats`: node and edge counts for a brew log

use anyhow::{Context, Result};
use brewgraph_core::{build_graph, KnowledgeGraph, NodeKind};
use brewgraph_ingest_table::{load_table, TableFormat};
use clap::{ArgAction, Parser, Subcommand};
use colored::Colorize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
use tracing_subscriber::EnvFilter;

mod export;

use export::ExportFormat;

const LOG_ENV: &str = "BREWGRAPH_LOG";

#[derive(Parser)]
#[command(name = "brewgraph")]
#[command(author, version, about = "Build a knowledge graph from brew-session logs")]
struct Cli {
    /// More logging (-v debug, -vv trace). `BREWGRAPH_LOG` takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and write it out.
    Build {
        /// Input table (.csv, .tsv or .json)
        input: PathBuf,
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        out: Option<PathBuf>,
        /// Output format: json, dot, html (default: from --out extension, else json)
        #[arg(long)]
        format: Option<String>,
        /// Input format: csv, tsv, json (default: from extension)
        #[arg(long)]
        input_format: Option<String>,
    },

    /// Print node counts per kind and edge counts per relationship.
    Stats {
        /// Input table (.csv, .tsv or .json)
        input: PathBuf,
        /// Input format: csv, tsv, json (default: from extension)
        #[arg(long)]
        input_format: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Build {
            input,
            out,
            format,
            input_format,
        } => cmd_build(&input, out.as_deref(), format.as_deref(), input_format.as_deref()),
        Commands::Stats {
            input,
            input_format,
        } => cmd_stats(&input, input_format.as_deref()),
    }
}

fn init_logging(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn load_graph(input: &Path, input_format: Option<&str>) -> Result<KnowledgeGraph> {
    let format = input_format.map(TableFormat::parse).transpose()?;
    let table = load_table(input, format)?;
    let graph = build_graph(&table)
        .with_context(|| format!("failed to build graph from {}", input.display()))?;
    Ok(graph)
}

fn cmd_build(
    input: &Path,
    out: Option<&Path>,
    format: Option<&str>,
    input_format: Option<&str>,
) -> Result<()> {
    eprintln!("{} {}", "Building".green().bold(), input.display());

    let graph = load_graph(input, input_format)?;

    let format = match format {
        Some(f) => ExportFormat::parse(f)?,
        None => out
            .and_then(ExportFormat::from_path)
            .unwrap_or(ExportFormat::Json),
    };
    debug!(?format, "rendering graph");
    let rendered = export::render(&graph, format)?;

    match out {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            fs::write(path, rendered)
                .with_context(|| format!("failed to write {}", path.display()))?;
            eprintln!(
                "{} {} ({} nodes, {} edges)",
                "Wrote".green().bold(),
                path.display(),
                graph.node_count(),
                graph.edge_count()
            );
        }
        None => print!("{rendered}"),
    }
    Ok(())
}

fn cmd_stats(input: &Path, input_format: Option<&str>) -> Result<()> {
    let graph = load_graph(input, input_format)?;
    let stats = graph.stats();

    println!("{} {}", "Nodes".cyan().bold(), graph.node_count());
    for kind in NodeKind::ALL {
        let count = stats.nodes_by_kind.get(&kind).copied().unwrap_or(0);
        println!("  {:<20} {count}", kind.as_str());
    }

    println!("{} {}", "Edges".cyan().bold(), graph.edge_count());
    for (relationship, count) in &stats.edges_by_relationship {
        println!("  {relationship:<20} {count}");
    }
    Ok(())
}
