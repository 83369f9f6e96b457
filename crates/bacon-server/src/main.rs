//! HTTP server entry point.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{fmt, EnvFilter};

use bacon_core::config::{load_section, GraphConfig, ServerConfig, DEFAULT_CONFIG_PREFIX};
use bacon_graph::actors::load_graph;
use bacon_graph::JsonlCastLog;
use bacon_pathfind::DegreeService;
use bacon_server::{router, AppState};

#[derive(Parser)]
#[command(name = "bacon-server")]
#[command(about = "HTTP API for degrees of separation between actors")]
struct Cli {
    /// Override the listen address from config.
    #[arg(short, long)]
    bind: Option<String>,

    /// Override the actors file from config.
    #[arg(long)]
    actors_file: Option<PathBuf>,

    /// Config file prefix (default: bacon).
    #[arg(short, long, default_value = DEFAULT_CONFIG_PREFIX)]
    config: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    fmt().with_env_filter(filter).json().init();

    let cli = Cli::parse();
    let graph_config: GraphConfig = load_section(&cli.config, "graph")?;
    let server_config: ServerConfig = load_section(&cli.config, "server")?;

    let actors_file = cli
        .actors_file
        .unwrap_or_else(|| PathBuf::from(&graph_config.actors_file));
    let start = Instant::now();
    let graph = load_graph(&actors_file)
        .with_context(|| format!("unable to build graph from {}", actors_file.display()))?;

    let mut service = DegreeService::new(graph);
    if graph_config.persist_new_movies {
        service = service.with_cast_log(Box::new(JsonlCastLog::new(&actors_file)));
    }
    let stats = service.graph_stats();
    tracing::info!(
        nodes = stats.total_nodes,
        edges = stats.total_edges,
        persist = service.persists_casts(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Degree service ready"
    );

    let state = AppState::new(Arc::new(service), server_config.bacon_actor.as_str());
    let app = router(state);

    let bind = cli.bind.unwrap_or(server_config.bind);
    let listener = tokio::net::TcpListener::bind(&bind)
        .await
        .with_context(|| format!("failed to bind {bind}"))?;
    tracing::info!(addr = %bind, "Listening");
    axum::serve(listener, app).await?;

    Ok(())
}
