//! JSON file handling

use std::path::Path;

use crate::error::{DataStudioError, Result};

/// Read a JSON document.
pub fn read_json(path: &Path) -> Result<serde_json::Value> {
    let file = std::fs::File::open(path).map_err(|e| DataStudioError::io(path, e))?;
    let reader = std::io::BufReader::new(file);
    Ok(serde_json::from_reader(reader)?)
}

/// Write a JSON document, pretty-printed.
pub fn write_json(path: &Path, value: &serde_json::Value) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| DataStudioError::io(path, e))?;
    let writer = std::io::BufWriter::new(file);
    serde_json::to_writer_pretty(writer, value)?;
    Ok(())
}
