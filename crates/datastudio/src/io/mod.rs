//! File input and output
//!
//! Tabular files move in and out of the crate through a small strategy
//! layer: [`FileFormat`] is detected from the extension, each format has a
//! handler, and [`read`]/[`write`] dispatch to it. Supported formats:
//! `.csv`, gzip-compressed `.csv.gz`, `.json` and `.txt`.

mod csv;
mod file;
mod json;
mod text;

pub use file::File;

use std::path::{Path, PathBuf};

use crate::error::{DataStudioError, Result};
use crate::frame::DataFrame;

/// File formats with a registered handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    /// Comma-separated values
    Csv,
    /// gzip-compressed CSV
    CsvGz,
    /// JSON document
    Json,
    /// Plain text
    Txt,
}

impl FileFormat {
    /// Detect the format from a path's extension.
    pub fn from_path(path: &Path) -> Result<FileFormat> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        if name.ends_with(".csv.gz") || name.ends_with(".gz") {
            Ok(FileFormat::CsvGz)
        } else if name.ends_with(".csv") {
            Ok(FileFormat::Csv)
        } else if name.ends_with(".json") {
            Ok(FileFormat::Json)
        } else if name.ends_with(".txt") {
            Ok(FileFormat::Txt)
        } else {
            Err(DataStudioError::UnsupportedFormat {
                extension: path
                    .extension()
                    .map(|e| e.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            })
        }
    }

    /// The canonical extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            FileFormat::Csv => "csv",
            FileFormat::CsvGz => "csv.gz",
            FileFormat::Json => "json",
            FileFormat::Txt => "txt",
        }
    }
}

/// What a file read produced, by format.
#[derive(Debug, Clone)]
pub enum FileContent {
    /// Tabular content (csv, csv.gz)
    Frame(DataFrame),
    /// JSON content
    Json(serde_json::Value),
    /// Plain text content
    Text(String),
}

impl FileContent {
    fn kind(&self) -> &'static str {
        match self {
            FileContent::Frame(_) => "frame",
            FileContent::Json(_) => "json",
            FileContent::Text(_) => "text",
        }
    }

    /// The tabular content, or a content-type error.
    pub fn into_frame(self) -> Result<DataFrame> {
        match self {
            FileContent::Frame(frame) => Ok(frame),
            other => Err(DataStudioError::ContentType {
                expected: "frame".to_string(),
                got: other.kind().to_string(),
            }),
        }
    }

    /// The JSON content, or a content-type error.
    pub fn into_json(self) -> Result<serde_json::Value> {
        match self {
            FileContent::Json(value) => Ok(value),
            other => Err(DataStudioError::ContentType {
                expected: "json".to_string(),
                got: other.kind().to_string(),
            }),
        }
    }

    /// The text content, or a content-type error.
    pub fn into_text(self) -> Result<String> {
        match self {
            FileContent::Text(text) => Ok(text),
            other => Err(DataStudioError::ContentType {
                expected: "text".to_string(),
                got: other.kind().to_string(),
            }),
        }
    }
}

/// Read a file, dispatching on its extension.
pub fn read(path: &Path) -> Result<FileContent> {
    let format = FileFormat::from_path(path)?;
    tracing::debug!(path = %path.display(), format = format.extension(), "reading file");
    match format {
        FileFormat::Csv => Ok(FileContent::Frame(csv::read_csv(path, false)?)),
        FileFormat::CsvGz => Ok(FileContent::Frame(csv::read_csv(path, true)?)),
        FileFormat::Json => Ok(FileContent::Json(json::read_json(path)?)),
        FileFormat::Txt => Ok(FileContent::Text(text::read_text(path)?)),
    }
}

/// Read a tabular file and keep only the named columns.
pub fn read_columns(path: &Path, columns: &[&str]) -> Result<DataFrame> {
    let frame = read(path)?.into_frame()?;
    Ok(frame.select(columns).map_err(DataStudioError::Frame)?)
}

/// Write content to a file, dispatching on its extension.
///
/// Missing parent directories are created. When the extension does not
/// match the content's natural format the canonical extension is appended
/// and the corrected path returned.
pub fn write(path: &Path, content: &FileContent) -> Result<PathBuf> {
    let path = ensure_extension(path, content)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent).map_err(|e| DataStudioError::io(parent, e))?;
            tracing::info!(directory = %parent.display(), "created missing directory");
        }
    }
    let format = FileFormat::from_path(&path)?;
    tracing::debug!(path = %path.display(), format = format.extension(), "writing file");
    match (format, content) {
        (FileFormat::Csv, FileContent::Frame(frame)) => csv::write_csv(&path, frame, false)?,
        (FileFormat::CsvGz, FileContent::Frame(frame)) => csv::write_csv(&path, frame, true)?,
        (FileFormat::Json, FileContent::Json(value)) => json::write_json(&path, value)?,
        (FileFormat::Txt, FileContent::Text(body)) => text::write_text(&path, body)?,
        (_, other) => {
            return Err(DataStudioError::ContentType {
                expected: format.extension().to_string(),
                got: other.kind().to_string(),
            })
        }
    }
    Ok(path)
}

/// Append the canonical extension when the path carries an incompatible one.
fn ensure_extension(path: &Path, content: &FileContent) -> Result<PathBuf> {
    let matches = match (FileFormat::from_path(path), content) {
        (Ok(FileFormat::Csv | FileFormat::CsvGz), FileContent::Frame(_)) => true,
        (Ok(FileFormat::Json), FileContent::Json(_)) => true,
        (Ok(FileFormat::Txt), FileContent::Text(_)) => true,
        _ => false,
    };
    if matches {
        return Ok(path.to_path_buf());
    }
    let wanted = match content {
        FileContent::Frame(_) => FileFormat::Csv,
        FileContent::Json(_) => FileFormat::Json,
        FileContent::Text(_) => FileFormat::Txt,
    };
    let mut corrected = path.as_os_str().to_os_string();
    corrected.push(".");
    corrected.push(wanted.extension());
    let corrected = PathBuf::from(corrected);
    tracing::warn!(
        from = %path.display(),
        to = %corrected.display(),
        "extension incompatible with content; corrected"
    );
    Ok(corrected)
}
