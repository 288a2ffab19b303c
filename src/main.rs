//! Galaxy tool graph - command line entry point.

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use galaxy_toolgraph::galaxy::{export_tool_io, GalaxyClient};
use galaxy_toolgraph::mapper::{IoDirection, Mapper};
use galaxy_toolgraph::neo4j::Neo4jClient;
use galaxy_toolgraph::records::{ConnectionReader, ToolIoReader};
use galaxy_toolgraph::schema::{NodeKind, RelKind};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "toolgraph")]
#[command(about = "Galaxy tool and workflow metadata in a Neo4j graph")]
struct Cli {
    /// Neo4j bolt URI
    #[arg(long, env = "NEO4J_URI", default_value = "bolt://localhost:7687")]
    neo4j_uri: String,

    /// Neo4j user
    #[arg(long, env = "NEO4J_USER", default_value = "neo4j")]
    neo4j_user: String,

    /// Neo4j password
    #[arg(long, env = "NEO4J_PASSWORD", default_value = "password")]
    neo4j_password: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch tool metadata from a Galaxy instance into TSV files
    Fetch {
        /// Base URL of the Galaxy instance
        #[arg(long, env = "GALAXY_URL", default_value = "https://usegalaxy.eu")]
        galaxy_url: String,

        /// Directory for tool_inputs.tsv and tool_outputs.tsv
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,

        /// Stop after this many tools (smoke runs)
        #[arg(long)]
        limit: Option<usize>,
    },

    /// Load TSV files into the graph
    Load {
        /// Tool-inputs TSV
        #[arg(long)]
        tool_inputs: Option<PathBuf>,

        /// Tool-outputs TSV
        #[arg(long)]
        tool_outputs: Option<PathBuf>,

        /// Workflow-connections TSV
        #[arg(long)]
        connections: Option<PathBuf>,

        /// Wipe the database first
        #[arg(long)]
        wipe: bool,
    },

    /// Query the graph
    Query {
        #[command(subcommand)]
        action: QueryAction,
    },
}

#[derive(Subcommand)]
enum QueryAction {
    /// Shortest path between two tools
    ShortestPath { from: String, to: String },

    /// Workflow connections leaving a tool
    Connections { tool: String },

    /// Node and relationship counts
    Stats,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,galaxy_toolgraph=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Fetch {
            galaxy_url,
            out_dir,
            limit,
        } => {
            let client = GalaxyClient::new(&galaxy_url);
            let report = export_tool_io(&client, &out_dir, limit).await?;
            tracing::info!(
                tools = report.tools,
                input_rows = report.input_rows,
                output_rows = report.output_rows,
                failures = report.failures,
                "fetch complete"
            );
        }
        Commands::Load {
            tool_inputs,
            tool_outputs,
            connections,
            wipe,
        } => {
            let store =
                Neo4jClient::connect(&cli.neo4j_uri, &cli.neo4j_user, &cli.neo4j_password).await?;
            if wipe {
                tracing::info!("wiping database");
                store.wipe().await?;
            }
            let mapper = Mapper::new(&store);

            // Outputs before inputs so workflow connections loaded later
            // find both endpoints either way.
            if let Some(path) = tool_outputs {
                let report = mapper
                    .load_tool_io(tool_io_reader(&path)?, IoDirection::Output)
                    .await?;
                tracing::info!(file = %path.display(), rows = report.rows_read, skipped = report.rows_skipped, "loaded tool outputs");
            }
            if let Some(path) = tool_inputs {
                let report = mapper
                    .load_tool_io(tool_io_reader(&path)?, IoDirection::Input)
                    .await?;
                tracing::info!(file = %path.display(), rows = report.rows_read, skipped = report.rows_skipped, "loaded tool inputs");
            }
            if let Some(path) = connections {
                let report = mapper.load_connections(connection_reader(&path)?).await?;
                tracing::info!(
                    file = %path.display(),
                    rows = report.rows_read,
                    skipped = report.rows_skipped,
                    workflows = report.workflows,
                    connections = report.connections,
                    "loaded workflow connections"
                );
            }
        }
        Commands::Query { action } => {
            let store =
                Neo4jClient::connect(&cli.neo4j_uri, &cli.neo4j_user, &cli.neo4j_password).await?;
            run_query(&store, action).await?;
        }
    }

    Ok(())
}

fn tool_io_reader(path: &Path) -> Result<ToolIoReader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(ToolIoReader::new(
        &path.display().to_string(),
        BufReader::new(file),
    )?)
}

fn connection_reader(path: &Path) -> Result<ConnectionReader<BufReader<File>>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    Ok(ConnectionReader::new(
        &path.display().to_string(),
        BufReader::new(file),
    )?)
}

async fn run_query(store: &Neo4jClient, action: QueryAction) -> Result<()> {
    match action {
        QueryAction::ShortestPath { from, to } => match store.shortest_path(&from, &to).await? {
            Some(path) => println!("{}", path.join(" -> ")),
            None => println!("No path between '{from}' and '{to}'"),
        },
        QueryAction::Connections { tool } => {
            let connections = store.direct_connections(&tool).await?;
            if connections.is_empty() {
                println!("No workflow connections from '{tool}'");
            }
            for conn in connections {
                println!(
                    "[{}] {} -> {} ({})",
                    conn.workflow_id, conn.source_output, conn.target_input, conn.target_tool
                );
            }
        }
        QueryAction::Stats => {
            for kind in NodeKind::ALL {
                println!("{:<20} {}", kind.label(), store.count_nodes(kind).await?);
            }
            for kind in RelKind::ALL {
                println!(
                    "{:<20} {}",
                    kind.type_name(),
                    store.count_relationships(kind).await?
                );
            }
        }
    }
    Ok(())
}
