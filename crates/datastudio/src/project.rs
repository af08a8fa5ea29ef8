//! Project model after the CRISP-DM process
//!
//! A [`Project`] is an ordered set of named [`Task`]s, each belonging
//! to a process phase through its [`TaskKind`]. Projects persist as
//! JSON next to the data they describe.

use std::fmt;
use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::entity::Entity;
use crate::error::{DataStudioError, Result};
use crate::metadata::Metadata;

/// The six CRISP-DM phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    /// Framing objectives and success criteria
    BusinessUnderstanding,
    /// Collecting and exploring the data
    DataUnderstanding,
    /// Selecting, cleaning and shaping the data
    DataPreparation,
    /// Building models
    Modeling,
    /// Assessing models against the objectives
    Evaluation,
    /// Putting results into use
    Deployment,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Phase::BusinessUnderstanding => "business understanding",
            Phase::DataUnderstanding => "data understanding",
            Phase::DataPreparation => "data preparation",
            Phase::Modeling => "modeling",
            Phase::Evaluation => "evaluation",
            Phase::Deployment => "deployment",
        };
        f.write_str(label)
    }
}

/// The kinds of work tracked in the understanding and preparation phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TaskKind {
    /// Acquiring raw data
    Collection,
    /// Descriptive summaries
    Summary,
    /// Data quality assessment
    Quality,
    /// Exploratory and statistical analysis
    Analysis,
    /// Choosing rows and columns to keep
    Selection,
    /// Fixing or dropping bad values
    Cleaning,
    /// Reshaping and rescaling
    Transformation,
    /// Filling in missing values
    Imputation,
    /// Deriving new variables
    Engineering,
    /// Final layout for downstream consumers
    Formatting,
}

impl TaskKind {
    /// The CRISP-DM phase this kind of work belongs to.
    pub fn phase(&self) -> Phase {
        match self {
            TaskKind::Collection
            | TaskKind::Summary
            | TaskKind::Quality
            | TaskKind::Analysis => Phase::DataUnderstanding,
            TaskKind::Selection
            | TaskKind::Cleaning
            | TaskKind::Transformation
            | TaskKind::Imputation
            | TaskKind::Engineering
            | TaskKind::Formatting => Phase::DataPreparation,
        }
    }
}

/// Lifecycle state of a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum TaskStatus {
    /// Not started
    #[default]
    Pending,
    /// Being worked on
    InProgress,
    /// Finished
    Complete,
}

/// A single unit of work within a project.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    /// Stable identifier
    pub id: Uuid,
    /// Task name, unique within the project
    pub name: String,
    /// What kind of work this is
    pub kind: TaskKind,
    /// Lifecycle state
    pub status: TaskStatus,
    /// When the task was added
    pub created: DateTime<Utc>,
    /// When the task was completed, if it has been
    pub completed: Option<DateTime<Utc>>,
    /// Free-form working notes
    #[serde(default)]
    pub notes: Option<String>,
}

impl Task {
    fn new(name: &str, kind: TaskKind) -> Self {
        Task {
            id: Uuid::new_v4(),
            name: name.to_string(),
            kind,
            status: TaskStatus::Pending,
            created: Utc::now(),
            completed: None,
            notes: None,
        }
    }

    /// The phase this task belongs to.
    pub fn phase(&self) -> Phase {
        self.kind.phase()
    }
}

/// A data project: metadata plus an ordered set of tasks.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    metadata: Metadata,
    tasks: IndexMap<String, Task>,
}

impl Project {
    /// Create an empty project.
    pub fn new(name: &str) -> Self {
        Project {
            metadata: Metadata::builder("Project", name).build(),
            tasks: IndexMap::new(),
        }
    }

    /// Number of tasks.
    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    /// True when the project has no tasks.
    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    /// Tasks in insertion order.
    pub fn tasks(&self) -> impl Iterator<Item = &Task> {
        self.tasks.values()
    }

    /// Add a task; its name must not already be taken.
    pub fn add_task(&mut self, name: &str, kind: TaskKind) -> Result<()> {
        if self.tasks.contains_key(name) {
            return Err(DataStudioError::CollectionKey(format!(
                "task {name} already exists"
            )));
        }
        self.metadata.record(format!("added task {name}"));
        self.tasks.insert(name.to_string(), Task::new(name, kind));
        self.metadata.update();
        Ok(())
    }

    /// Look up a task by name.
    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.get(name)
    }

    /// Mark the named task in progress.
    pub fn start_task(&mut self, name: &str) -> Result<()> {
        self.transition(name, TaskStatus::InProgress)
    }

    /// Mark the named task complete and stamp its completion time.
    pub fn complete_task(&mut self, name: &str) -> Result<()> {
        self.transition(name, TaskStatus::Complete)
    }

    fn transition(&mut self, name: &str, status: TaskStatus) -> Result<()> {
        let task = self.tasks.get_mut(name).ok_or_else(|| {
            DataStudioError::CollectionKey(format!("no task named {name}"))
        })?;
        task.status = status;
        task.completed = match status {
            TaskStatus::Complete => Some(Utc::now()),
            _ => None,
        };
        self.metadata
            .record(format!("task {name} is now {status:?}"));
        self.metadata.update();
        Ok(())
    }

    /// Attach working notes to the named task, replacing any previous ones.
    pub fn annotate_task(&mut self, name: &str, notes: &str) -> Result<()> {
        let task = self.tasks.get_mut(name).ok_or_else(|| {
            DataStudioError::CollectionKey(format!("no task named {name}"))
        })?;
        task.notes = Some(notes.to_string());
        self.metadata.record(format!("annotated task {name}"));
        self.metadata.update();
        Ok(())
    }

    /// Remove the named task. Missing names are ignored.
    pub fn remove_task(&mut self, name: &str) {
        if self.tasks.shift_remove(name).is_some() {
            self.metadata.record(format!("removed task {name}"));
            self.metadata.update();
        }
    }

    /// Count of tasks in each status: (pending, in progress, complete).
    pub fn status_counts(&self) -> (usize, usize, usize) {
        let mut counts = (0, 0, 0);
        for task in self.tasks.values() {
            match task.status {
                TaskStatus::Pending => counts.0 += 1,
                TaskStatus::InProgress => counts.1 += 1,
                TaskStatus::Complete => counts.2 += 1,
            }
        }
        counts
    }

    /// Tasks belonging to a phase, in insertion order.
    pub fn tasks_in_phase(&self, phase: Phase) -> Vec<&Task> {
        self.tasks.values().filter(|t| t.phase() == phase).collect()
    }

    /// Persist the project as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| DataStudioError::io(parent, e))?;
        }
        let file = fs::File::create(path).map_err(|e| DataStudioError::io(path, e))?;
        serde_json::to_writer_pretty(file, self)?;
        tracing::info!(path = %path.display(), tasks = self.tasks.len(), "saved project");
        Ok(())
    }

    /// Load a project previously written by [`Project::save`].
    pub fn load(path: &Path) -> Result<Self> {
        let file = fs::File::open(path).map_err(|e| DataStudioError::io(path, e))?;
        let project = serde_json::from_reader(std::io::BufReader::new(file))?;
        Ok(project)
    }
}

impl Entity for Project {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}
