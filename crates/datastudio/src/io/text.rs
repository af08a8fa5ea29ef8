//! Plain-text file handling

use std::path::Path;

use crate::error::{DataStudioError, Result};

/// Read a text file into a string.
pub fn read_text(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| DataStudioError::io(path, e))
}

/// Write a string to a text file.
pub fn write_text(path: &Path, body: &str) -> Result<()> {
    std::fs::write(path, body).map_err(|e| DataStudioError::io(path, e))
}
