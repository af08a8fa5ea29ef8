//! Data sources and stores
//!
//! A `DataSource` is an immutable origin a dataset can be sourced from; a
//! `DataStore` is read-write persistence. The file-backed implementations
//! sit on top of the io layer and carry file metadata profiles.

use std::path::{Path, PathBuf};

use crate::entity::Entity;
use crate::error::Result;
use crate::frame::DataFrame;
use crate::io::{self, FileContent};
use crate::metadata::Metadata;

/// An immutable origin datasets are sourced from.
pub trait DataSource {
    /// Load the source's tabular content.
    fn load(&self) -> Result<DataFrame>;
}

/// Read-write persistence for datasets.
pub trait DataStore: DataSource {
    /// Persist a frame to the store.
    fn save(&mut self, frame: &DataFrame) -> Result<PathBuf>;
}

/// A data source backed by a tabular file (csv, csv.gz).
#[derive(Debug, Clone)]
pub struct FileDataSource {
    metadata: Metadata,
    path: PathBuf,
}

impl FileDataSource {
    /// Create a source over the file at `path`.
    pub fn new(name: &str, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        FileDataSource {
            metadata: Metadata::builder("FileDataSource", name).file(path).build(),
            path: path.to_path_buf(),
        }
    }

    /// The backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Entity for FileDataSource {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl DataSource for FileDataSource {
    fn load(&self) -> Result<DataFrame> {
        tracing::debug!(source = self.name(), path = %self.path.display(), "sourcing frame");
        io::read(&self.path)?.into_frame()
    }
}

/// A data store backed by a tabular file (csv, csv.gz).
#[derive(Debug, Clone)]
pub struct FileDataStore {
    metadata: Metadata,
    path: PathBuf,
}

impl FileDataStore {
    /// Create a store over the file at `path`.
    pub fn new(name: &str, path: impl AsRef<Path>) -> Self {
        let path = path.as_ref();
        FileDataStore {
            metadata: Metadata::builder("FileDataStore", name).file(path).build(),
            path: path.to_path_buf(),
        }
    }

    /// The backing path.
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Entity for FileDataStore {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

impl DataSource for FileDataStore {
    fn load(&self) -> Result<DataFrame> {
        tracing::debug!(store = self.name(), path = %self.path.display(), "loading frame");
        io::read(&self.path)?.into_frame()
    }
}

impl DataStore for FileDataStore {
    fn save(&mut self, frame: &DataFrame) -> Result<PathBuf> {
        let written = io::write(&self.path, &FileContent::Frame(frame.clone()))?;
        let rows = frame.n_rows();
        self.metadata
            .record(format!("saved {rows} rows to {}", written.display()));
        self.metadata.update();
        tracing::info!(store = self.name(), path = %written.display(), rows, "saved frame");
        Ok(written)
    }
}
