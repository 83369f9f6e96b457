//! Cast log: trait + JSON Lines implementation.
//!
//! Movies added at runtime are appended to the actors file in the same
//! one-array-per-line format the graph is built from, so a restart replays
//! them.

use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use bacon_core::CastGroup;

use crate::store::Result;

/// Trait for durable cast persistence backends.
pub trait CastLog: Send + Sync {
    /// Append a batch of cast groups. Called after the batch was applied.
    fn append(&self, groups: &[CastGroup]) -> Result<()>;
}

/// Appends casts to a JSON Lines actors file.
#[derive(Debug, Clone)]
pub struct JsonlCastLog {
    path: PathBuf,
}

impl JsonlCastLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CastLog for JsonlCastLog {
    fn append(&self, groups: &[CastGroup]) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        // Serialize everything first so a bad group can't leave a partial batch.
        let mut buf = Vec::new();
        if !ends_with_newline(&self.path)? {
            buf.push(b'\n');
        }
        for group in groups {
            serde_json::to_writer(&mut buf, group)?;
            buf.push(b'\n');
        }

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(&buf)?;
        file.flush()?;

        tracing::debug!(
            path = %self.path.display(),
            groups = groups.len(),
            "Casts appended to log"
        );

        Ok(())
    }
}

/// Whether the file is missing, empty, or already newline-terminated.
fn ends_with_newline(path: &Path) -> Result<bool> {
    let mut file = match File::open(path) {
        Ok(file) => file,
        Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(true),
        Err(e) => return Err(e.into()),
    };
    if file.metadata()?.len() == 0 {
        return Ok(true);
    }
    file.seek(SeekFrom::End(-1))?;
    let mut last = [0u8; 1];
    file.read_exact(&mut last)?;
    Ok(last[0] == b'\n')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::read_cast_groups;

    #[test]
    fn append_then_replay() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("actors.jsonl");
        let log = JsonlCastLog::new(&path);

        log.append(&[CastGroup::new(["A", "B"])]).unwrap();
        log.append(&[CastGroup::new(["C"]), CastGroup::new(["B", "D"])])
            .unwrap();

        let groups = read_cast_groups(&path).unwrap();
        assert_eq!(
            groups,
            vec![
                CastGroup::new(["A", "B"]),
                CastGroup::new(["C"]),
                CastGroup::new(["B", "D"]),
            ]
        );
    }

    #[test]
    fn append_terminates_unterminated_last_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actors.jsonl");
        fs::write(&path, "[\"A\",\"B\"]").unwrap();

        JsonlCastLog::new(&path)
            .append(&[CastGroup::new(["B", "C"])])
            .unwrap();

        assert_eq!(read_cast_groups(&path).unwrap().len(), 2);
    }

    #[test]
    fn append_preserves_existing_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("actors.jsonl");
        fs::write(&path, "[\"Kevin Bacon\",\"Sean Astin\"]\n").unwrap();

        JsonlCastLog::new(&path)
            .append(&[CastGroup::new(["Orlando Bloom"])])
            .unwrap();

        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents,
            "[\"Kevin Bacon\",\"Sean Astin\"]\n[\"Orlando Bloom\"]\n"
        );
    }
}
