//! A managed handle to a single file on disk

use std::path::{Path, PathBuf};

use crate::error::{DataStudioError, Result};
use crate::io::{self, FileContent};

/// A file on disk with lock, move, copy and rename behaviors.
///
/// The name identifies the `File` object, not the file itself; the file
/// name lives in the path. Locking makes the handle read-only: writes,
/// moves and renames on a locked handle return
/// [`DataStudioError::Locked`].
#[derive(Debug, Clone)]
pub struct File {
    name: String,
    path: PathBuf,
    locked: bool,
}

impl File {
    /// Wrap a path. The object name defaults to the file stem.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        File {
            name,
            path,
            locked: false,
        }
    }

    /// Wrap a path under an explicit object name.
    pub fn with_name(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        File {
            name: name.into(),
            path: path.into(),
            locked: false,
        }
    }

    /// The object name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The full path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The file name component of the path.
    pub fn filename(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// The parent directory.
    pub fn directory(&self) -> &Path {
        self.path.parent().unwrap_or_else(|| Path::new(""))
    }

    /// The extension, without the dot.
    pub fn extension(&self) -> String {
        self.path
            .extension()
            .map(|e| e.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    /// Whether the file currently exists on disk.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }

    /// Whether the handle is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock the handle, preventing writes, moves and renames.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlock the handle.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    fn check_unlocked(&self, operation: &str) -> Result<()> {
        if self.locked {
            return Err(DataStudioError::locked(&self.name, operation));
        }
        Ok(())
    }

    /// Copy the file to `dest`. Allowed on locked handles.
    pub fn copy(&self, dest: impl AsRef<Path>) -> Result<PathBuf> {
        let dest = dest.as_ref();
        std::fs::copy(&self.path, dest).map_err(|e| DataStudioError::io(dest, e))?;
        tracing::info!(from = %self.path.display(), to = %dest.display(), "copied file");
        Ok(dest.to_path_buf())
    }

    /// Move the file to `dest` and update the handle.
    pub fn move_to(&mut self, dest: impl AsRef<Path>) -> Result<PathBuf> {
        self.check_unlocked("move")?;
        let dest = dest.as_ref();
        std::fs::rename(&self.path, dest).map_err(|e| DataStudioError::io(dest, e))?;
        tracing::info!(from = %self.path.display(), to = %dest.display(), "moved file");
        self.path = dest.to_path_buf();
        Ok(self.path.clone())
    }

    /// Rename the file's stem in place, keeping directory and extension.
    /// Multi-part suffixes such as `.csv.gz` are kept whole.
    pub fn rename(&mut self, stem: &str) -> Result<PathBuf> {
        self.check_unlocked("rename")?;
        let filename = self.filename();
        let mut new_name = stem.to_string();
        if let Some(dot) = filename.find('.') {
            new_name.push_str(&filename[dot..]);
        }
        let dest = self.directory().join(new_name);
        std::fs::rename(&self.path, &dest).map_err(|e| DataStudioError::io(&dest, e))?;
        tracing::info!(from = %self.path.display(), to = %dest.display(), "renamed file");
        self.path = dest.clone();
        Ok(dest)
    }

    /// Read the file through the format dispatch layer.
    pub fn read(&self) -> Result<FileContent> {
        io::read(&self.path)
    }

    /// Write content through the format dispatch layer.
    ///
    /// Returns the path actually written, which may carry a corrected
    /// extension.
    pub fn write(&self, content: &FileContent) -> Result<PathBuf> {
        self.check_unlocked("write")?;
        io::write(&self.path, content)
    }
}
