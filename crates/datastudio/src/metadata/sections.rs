//! The four metadata sections: administrative, descriptive, technical, process

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sysinfo::System;
use uuid::Uuid;

use crate::format::{scale_bytes, snake};

/// The login name of the current user, or `unknown`.
pub(crate) fn login() -> String {
    std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_else(|_| "unknown".to_string())
}

/// Administrative metadata: identity, authorship and revision tracking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminMetadata {
    /// Stable identifier for the entity
    pub id: Uuid,
    /// The entity's name
    pub name: String,
    /// Login of whoever created the entity
    pub creator: String,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Login of whoever last modified the entity
    pub modifier: String,
    /// Last modification time
    pub modified: DateTime<Utc>,
    /// Number of updates applied
    pub updates: u64,
    /// Type name of the owning entity
    pub classname: String,
    /// Derived storage name: `creator_timestamp_classname_name`
    pub objectname: String,
    /// Filesystem facts, present for file-backed entities
    pub file: Option<FileFacts>,
}

impl AdminMetadata {
    pub(crate) fn new(classname: &str, name: &str) -> Self {
        let creator = login();
        let created = Utc::now();
        let objectname = format!(
            "{}_{}_{}_{}",
            snake(&creator),
            created.format("%Y-%m-%d_%H-%M-%S"),
            snake(classname),
            snake(name)
        );
        AdminMetadata {
            id: Uuid::new_v4(),
            name: name.to_string(),
            creator: creator.clone(),
            created,
            modifier: creator,
            modified: created,
            updates: 0,
            classname: classname.to_string(),
            objectname,
            file: None,
        }
    }

    /// Record a modification: refresh modifier/modified, bump the counter.
    pub(crate) fn touch(&mut self) {
        self.modifier = login();
        self.modified = Utc::now();
        self.updates += 1;
    }
}

/// Filesystem facts for file-backed entities.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileFacts {
    /// Full path
    pub path: PathBuf,
    /// Parent directory
    pub directory: PathBuf,
    /// File name component
    pub filename: String,
    /// Extension, without the dot
    pub extension: String,
    /// Whether the file currently exists
    pub exists: bool,
    /// Size as reported by the filesystem, human scaled
    pub size: Option<String>,
    /// Filesystem creation time, where the platform reports one
    pub created: Option<DateTime<Utc>>,
    /// Filesystem modification time
    pub modified: Option<DateTime<Utc>>,
    /// Filesystem access time
    pub accessed: Option<DateTime<Utc>>,
}

impl FileFacts {
    /// Probe the filesystem for facts about `path`.
    ///
    /// Missing files are not an error; `exists` is simply false.
    pub fn probe(path: &Path) -> Self {
        let meta = std::fs::metadata(path).ok();
        FileFacts {
            path: path.to_path_buf(),
            directory: path.parent().unwrap_or_else(|| Path::new("")).to_path_buf(),
            filename: path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default(),
            extension: path
                .extension()
                .map(|e| e.to_string_lossy().into_owned())
                .unwrap_or_default(),
            exists: meta.is_some(),
            size: meta.as_ref().map(|m| scale_bytes(m.len())),
            created: meta
                .as_ref()
                .and_then(|m| m.created().ok())
                .map(DateTime::<Utc>::from),
            modified: meta
                .as_ref()
                .and_then(|m| m.modified().ok())
                .map(DateTime::<Utc>::from),
            accessed: meta
                .as_ref()
                .and_then(|m| m.accessed().ok())
                .map(DateTime::<Utc>::from),
        }
    }
}

/// Descriptive metadata: what the entity is about, in the author's words.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescMetadata {
    /// User-defined type
    pub kind: String,
    /// User-defined category
    pub category: String,
    /// Capital-case title
    pub title: String,
    /// One-line description
    pub description_short: String,
    /// Long description
    pub description: String,
    /// Type name of the owning entity
    pub classname: String,
    /// Entity version
    pub version: String,
    /// Member counts, maintained for collections only
    pub members: Option<MemberCounts>,
}

impl DescMetadata {
    pub(crate) fn new(classname: &str, members: bool) -> Self {
        DescMetadata {
            kind: String::new(),
            category: String::new(),
            title: String::new(),
            description_short: String::new(),
            description: String::new(),
            classname: classname.to_string(),
            version: "0.1.0".to_string(),
            members: members.then(MemberCounts::default),
        }
    }
}

/// Counts of a collection's members by kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberCounts {
    /// All members
    pub total: usize,
    /// Members that are themselves collections
    pub collections: usize,
    /// Members that are datasets
    pub datasets: usize,
}

/// Technical metadata: the host the entity was produced on.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechMetadata {
    /// Operating system name
    pub system: Option<String>,
    /// Host name
    pub node: Option<String>,
    /// Kernel version
    pub kernel: Option<String>,
    /// OS version
    pub os_version: Option<String>,
    /// CPU architecture
    pub machine: String,
    /// CPU brand string
    pub processor: Option<String>,
    /// Physical core count
    pub physical_cores: Option<usize>,
    /// Logical core count
    pub logical_cores: usize,
    /// Total memory, human scaled
    pub total_memory: String,
    /// Available memory, human scaled
    pub available_memory: String,
    /// Used memory, human scaled
    pub used_memory: String,
    /// Percent of memory in use
    pub pct_memory_used: f64,
}

impl TechMetadata {
    /// Sample the host.
    pub(crate) fn sample() -> Self {
        let mut sys = System::new_all();
        sys.refresh_all();
        let total = sys.total_memory();
        let used = sys.used_memory();
        TechMetadata {
            system: System::name(),
            node: System::host_name(),
            kernel: System::kernel_version(),
            os_version: System::os_version(),
            machine: std::env::consts::ARCH.to_string(),
            processor: sys.cpus().first().map(|c| c.brand().trim().to_string()),
            physical_cores: sys.physical_core_count(),
            logical_cores: sys.cpus().len(),
            total_memory: scale_bytes(total),
            available_memory: scale_bytes(sys.available_memory()),
            used_memory: scale_bytes(used),
            pct_memory_used: if total == 0 {
                0.0
            } else {
                used as f64 / total as f64 * 100.0
            },
        }
    }
}

/// A single entry in the process log.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessEvent {
    /// When the event happened
    pub at: DateTime<Utc>,
    /// What happened
    pub message: String,
}

/// Process metadata: an append-only activity log.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProcessMetadata {
    /// Events in chronological order
    pub log: Vec<ProcessEvent>,
}

impl ProcessMetadata {
    /// Append an event to the log.
    pub fn record(&mut self, message: impl Into<String>) {
        self.log.push(ProcessEvent {
            at: Utc::now(),
            message: message.into(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_probe_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("facts.txt");
        std::fs::write(&path, "hello").unwrap();

        let facts = FileFacts::probe(&path);
        assert!(facts.exists);
        assert_eq!(facts.extension, "txt");
        assert!(facts.modified.is_some());
        // birth time is platform dependent; when reported it precedes
        // the modification time
        if let (Some(created), Some(modified)) = (facts.created, facts.modified) {
            assert!(created <= modified);
        }
    }

    #[test]
    fn test_probe_missing_file() {
        let facts = FileFacts::probe(Path::new("/nonexistent/facts.txt"));
        assert!(!facts.exists);
        assert!(facts.created.is_none());
        assert!(facts.modified.is_none());
        assert!(facts.size.is_none());
    }
}
