//! Actors file ingestion.
//!
//! The actors file is JSON Lines: every line is one movie's cast as a JSON
//! array of names. It's produced by `bacon-parse` and extended at runtime by
//! [`crate::JsonlCastLog`].

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use bacon_core::CastGroup;

use crate::store::{GraphError, GraphStore, Result};

/// Read every cast group from an actors file. Blank lines are skipped.
pub fn read_cast_groups(path: impl AsRef<Path>) -> Result<Vec<CastGroup>> {
    let path = path.as_ref();
    let reader = BufReader::new(File::open(path)?);
    parse_cast_lines(reader, &path.display().to_string())
}

/// Parse JSON Lines casts from any reader; `source` names it in errors.
pub fn parse_cast_lines(reader: impl BufRead, source: &str) -> Result<Vec<CastGroup>> {
    let mut groups = Vec::new();
    for (i, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let group: CastGroup =
            serde_json::from_str(&line).map_err(|source_err| GraphError::InvalidActorsLine {
                path: source.to_string(),
                line: i + 1,
                source: source_err,
            })?;
        groups.push(group);
    }
    Ok(groups)
}

/// Load the actors file and build the graph from it.
pub fn load_graph(path: impl AsRef<Path>) -> Result<GraphStore> {
    let path = path.as_ref();
    tracing::info!(path = %path.display(), "Building connected graph");

    let start = Instant::now();
    let groups = read_cast_groups(path)?;
    let graph = GraphStore::from_cast_groups(groups);

    tracing::info!(
        nodes = graph.node_count(),
        edges = graph.edge_count(),
        duration_ms = start.elapsed().as_millis() as u64,
        "Built connected graph"
    );
    Ok(graph)
}
