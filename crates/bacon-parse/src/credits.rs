//! credits.csv → actors file conversion.
//!
//! Each CSV row after the header holds one movie's cast in its first column.
//! Every row becomes one line of the actors file: a JSON array of the cast's
//! names, in credit order. Rows with an empty cast still produce a line (`[]`)
//! so line numbers follow the CSV.

use std::fs::{self, File};
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use std::time::Instant;

use serde::{Deserialize, Serialize};

use bacon_core::CastGroup;

use crate::error::{ParseError, Result};
use crate::literal::parse_literal;

/// Rows between progress log lines.
const PROGRESS_INTERVAL: usize = 100;

/// One credited cast member. The dataset carries more fields; only the name is kept.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct CastMember {
    pub name: String,
}

/// Summary of a conversion run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ParseStats {
    /// Data rows converted, header excluded.
    pub rows: usize,
    /// Total names written.
    pub credits: usize,
    pub duration_ms: u64,
}

/// Parse one cast cell into a cast group. `row` is the 1-based CSV row, for errors.
pub fn parse_cast(cell: &str, row: usize) -> Result<CastGroup> {
    let value = parse_literal(cell).map_err(|source| ParseError::InvalidLiteral { row, source })?;
    let members: Vec<CastMember> =
        serde_json::from_value(value).map_err(|source| ParseError::InvalidCast { row, source })?;
    Ok(CastGroup::new(members.into_iter().map(|m| m.name)))
}

/// Convert credits CSV from `input` into actors lines on `output`.
pub fn convert<R: Read, W: Write>(input: R, output: W) -> Result<ParseStats> {
    let start = Instant::now();
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(input);
    let mut out = BufWriter::new(output);

    let mut rows = 0;
    let mut credits = 0;
    for (i, record) in reader.records().enumerate() {
        let record = record?;
        // Row 1 is the header.
        let row = i + 2;
        let cell = record.get(0).ok_or(ParseError::MissingColumn { row })?;
        let cast = parse_cast(cell, row)?;

        serde_json::to_writer(&mut out, &cast)?;
        out.write_all(b"\n")?;

        rows += 1;
        credits += cast.len();
        if row % PROGRESS_INTERVAL == 0 {
            tracing::info!(rows = row, "Rows parsed");
        }
    }
    out.flush()?;

    Ok(ParseStats {
        rows,
        credits,
        duration_ms: start.elapsed().as_millis() as u64,
    })
}

/// Convert `csv_path` into the actors file at `out_path`, creating its directory.
pub fn convert_file(csv_path: &Path, out_path: &Path) -> Result<ParseStats> {
    tracing::info!(
        input = %csv_path.display(),
        output = %out_path.display(),
        "Parsing credits"
    );

    if let Some(parent) = out_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    let input = File::open(csv_path)?;
    let output = File::create(out_path)?;
    let stats = convert(input, output)?;

    tracing::info!(
        rows = stats.rows,
        credits = stats.credits,
        duration_ms = stats.duration_ms,
        output = %out_path.display(),
        "Finished parsing credits"
    );
    Ok(stats)
}
