//! Flat-file persistence for ledger records.
//!
//! The on-disk format is JSON Lines: one serialized [`Transaction`] per line.
//! JSON string escaping keeps arbitrary note text (delimiters, quotes,
//! newlines) round-trip safe while the file stays human-readable.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{errors::LedgerError, ledger::Transaction};

/// Serialize all records and replace the file at `path`, staging the write
/// through a sibling temporary file.
pub fn save_records(path: &Path, records: &[Transaction]) -> Result<(), LedgerError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)?;
        }
    }
    let mut contents = String::new();
    for record in records {
        contents.push_str(&serde_json::to_string(record)?);
        contents.push('\n');
    }
    let tmp = tmp_path(path);
    fs::write(&tmp, contents)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Parse every non-blank line of the file at `path`. Any malformed line fails
/// the whole load; callers treat that the same as a missing file.
pub fn load_records(path: &Path) -> Result<Vec<Transaction>, LedgerError> {
    let data = fs::read_to_string(path)?;
    let mut records = Vec::new();
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        records.push(serde_json::from_str(line)?);
    }
    Ok(records)
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.tmp"),
        None => String::from("tmp"),
    };
    tmp.set_extension(ext);
    tmp
}
