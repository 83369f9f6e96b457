//! CLI entry point for degree-of-separation queries.
//!
//! Loads the actors file named by the `[graph]` config section, builds the
//! service in-process, and prints results as JSON triples on stdout.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use bacon_core::config::{load_section, GraphConfig, ServerConfig, DEFAULT_CONFIG_PREFIX};
use bacon_core::{MovieBatch, QueryResult};
use bacon_graph::actors::load_graph;
use bacon_graph::JsonlCastLog;
use bacon_pathfind::{batch, DegreeService};

#[derive(Parser)]
#[command(name = "bacon-query")]
#[command(about = "Degrees of separation between actors")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Override the actors file from config.
    #[arg(long, global = true)]
    actors_file: Option<PathBuf>,

    /// Config file prefix (default: bacon).
    #[arg(short, long, default_value = DEFAULT_CONFIG_PREFIX, global = true)]
    config: String,
}

#[derive(Subcommand)]
enum Command {
    /// Degree between two actors.
    Degree {
        #[arg(long)]
        root: String,
        #[arg(long)]
        target: String,
    },
    /// Degree between the configured bacon actor and another actor.
    Bacon {
        #[arg(long)]
        actor: String,
    },
    /// Prompt for root and target until an empty name is entered.
    Interactive,
    /// Add movies from a JSON file mapping title to cast.
    Add {
        #[arg(long)]
        file: PathBuf,
    },
    /// Run a JSON array of bacon/degree/new/multi requests in order.
    Batch {
        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(io::stderr).init();

    let cli = Cli::parse();

    let graph_config: GraphConfig = load_section(&cli.config, "graph")?;
    let actors_file = cli
        .actors_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(&graph_config.actors_file));

    let graph = load_graph(&actors_file)
        .with_context(|| format!("failed to load actors file {}", actors_file.display()))?;
    let mut service = DegreeService::new(graph);
    if graph_config.persist_new_movies {
        service = service.with_cast_log(Box::new(JsonlCastLog::new(&actors_file)));
    }

    match cli.command {
        Command::Degree { ref root, ref target } => {
            print_triple(root, target, service.query(root, target))?;
        }
        Command::Bacon { ref actor } => {
            let server_config: ServerConfig = load_section(&cli.config, "server")?;
            let root = server_config.bacon_actor;
            print_triple(&root, actor, service.query(&root, actor))?;
        }
        Command::Interactive => interactive(&service)?,
        Command::Add { ref file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let movies: MovieBatch = serde_json::from_str(&raw)?;
            let summary = service.add_movie_batch(movies)?;
            println!("{}", serde_json::to_string(&summary)?);
        }
        Command::Batch { ref file } => {
            let raw = std::fs::read_to_string(file)
                .with_context(|| format!("failed to read {}", file.display()))?;
            let requests = batch::parse_requests(&raw)
                .with_context(|| format!("invalid request file {}", file.display()))?;
            let server_config: ServerConfig = load_section(&cli.config, "server")?;
            for request in requests {
                let outcome = service.run_request(&server_config.bacon_actor, request);
                println!("{}", serde_json::to_string(&outcome)?);
            }
        }
    }

    Ok(())
}

fn print_triple(root: &str, target: &str, result: QueryResult) -> anyhow::Result<()> {
    let triple = serde_json::json!([root, target, result.legacy_code()]);
    println!("{}", serde_json::to_string(&triple)?);
    Ok(())
}

fn interactive(service: &DegreeService) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        let Some(root) = prompt(&mut lines, "Root actor: ")? else {
            break;
        };
        let Some(target) = prompt(&mut lines, "Target actor: ")? else {
            break;
        };
        let result = service.query(&root, &target);
        println!("{root} -> {target}: {result}");
    }

    Ok(())
}

/// Read one trimmed line; `None` on EOF or an empty answer.
fn prompt<B: BufRead>(lines: &mut io::Lines<B>, label: &str) -> anyhow::Result<Option<String>> {
    print!("{label}");
    io::stdout().flush()?;
    match lines.next() {
        Some(line) => {
            let line = line?;
            let name = line.trim();
            Ok((!name.is_empty()).then(|| name.to_string()))
        }
        None => Ok(None),
    }
}
