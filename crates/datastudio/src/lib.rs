//! # Data Studio
//!
//! A data understanding and preparation toolkit.
//!
//! Data Studio wraps tabular data in managed entities that carry their
//! own metadata, know how to move through files, and answer the
//! statistical questions of the data understanding phase.
//!
//! ## Architecture
//!
//! - **Frames**: typed, column-ordered tabular data with summaries
//! - **Entities**: metadata-carrying datasets, collections and projects
//! - **I/O**: CSV (plain and gzipped), JSON and text files
//! - **Statistics**: hypothesis tests for association, centrality,
//!   comparison, dispersion and normality
//!
//! ## Example
//!
//! ```no_run
//! use datastudio::data::DataSet;
//! use datastudio::io;
//!
//! # fn main() -> datastudio::Result<()> {
//! let frame = io::read("data/churn.csv".as_ref())?.into_frame()?;
//! let set = DataSet::from_frame("churn", frame);
//! println!("{}", set.summarize().quantitative);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod data;
pub mod entity;
pub mod error;
pub mod format;
pub mod frame;
pub mod io;
pub mod metadata;
pub mod project;
pub mod stats;

// Re-export main types
pub use data::{DataCollection, DataNode, DataSet, DataSource, DataStore};
pub use entity::Entity;
pub use error::{DataStudioError, FrameError, Result, StatsError};
pub use frame::{DataFrame, DataType, Series};
pub use io::{File, FileContent, FileFormat};
pub use metadata::Metadata;
pub use project::{Phase, Project, Task, TaskKind, TaskStatus};
pub use stats::{Alternative, TestResult};

/// Data Studio version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
