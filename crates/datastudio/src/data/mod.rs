//! Managed datasets and dataset collections
//!
//! [`DataSet`] wraps a single [`DataFrame`] with metadata, locking, and
//! optional source/store backends. [`DataCollection`] is the composite:
//! an ordered group of datasets and nested collections keyed by
//! `classname_name`, with merge and reporting behaviors.

mod store;

pub use store::{DataSource, DataStore, FileDataSource, FileDataStore};

use indexmap::IndexMap;

use crate::entity::Entity;
use crate::error::{DataStudioError, Result};
use crate::frame::{DataFrame, Description, Series};
use crate::format::snake;
use crate::metadata::Metadata;

/// A named, metadata-carrying wrapper around a single frame.
#[derive(Debug, Clone)]
pub struct DataSet {
    metadata: Metadata,
    frame: DataFrame,
    locked: bool,
    source: Option<FileDataSource>,
    store: Option<FileDataStore>,
}

impl DataSet {
    /// Create an empty dataset.
    pub fn new(name: &str) -> Self {
        DataSet {
            metadata: Metadata::builder("DataSet", name).build(),
            frame: DataFrame::new(),
            locked: false,
            source: None,
            store: None,
        }
    }

    /// Create a dataset over an existing frame.
    pub fn from_frame(name: &str, frame: DataFrame) -> Self {
        let mut set = DataSet::new(name);
        set.frame = frame;
        set
    }

    /// Borrow the underlying frame.
    pub fn frame(&self) -> &DataFrame {
        &self.frame
    }

    /// Replace the underlying frame. Rejected while locked.
    pub fn set_frame(&mut self, frame: DataFrame) -> Result<()> {
        if self.locked {
            return Err(DataStudioError::locked(self.name(), "replace data"));
        }
        self.frame = frame;
        self.metadata.update();
        Ok(())
    }

    /// Designate the immutable origin for [`DataSet::source`].
    pub fn set_source(&mut self, source: FileDataSource) {
        self.source = Some(source);
    }

    /// Designate the store for [`DataSet::load`] and [`DataSet::save`].
    pub fn set_store(&mut self, store: FileDataStore) {
        self.store = Some(store);
    }

    /// Whether the dataset is locked.
    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Lock the dataset, making it immutable.
    pub fn lock(&mut self) {
        self.locked = true;
    }

    /// Unlock the dataset.
    pub fn unlock(&mut self) {
        self.locked = false;
    }

    /// Read the frame from the designated source.
    pub fn source(&mut self) -> Result<()> {
        let source = self.source.as_ref().ok_or_else(|| {
            DataStudioError::MissingBackend {
                entity: self.name().to_string(),
                role: "source".to_string(),
            }
        })?;
        let frame = source.load()?;
        self.metadata
            .record(format!("sourced {} rows", frame.n_rows()));
        self.frame = frame;
        self.metadata.update();
        Ok(())
    }

    /// Read the frame from the designated store.
    pub fn load(&mut self) -> Result<()> {
        let store = self.store.as_ref().ok_or_else(|| {
            DataStudioError::MissingBackend {
                entity: self.name().to_string(),
                role: "store".to_string(),
            }
        })?;
        let frame = store.load()?;
        self.metadata
            .record(format!("loaded {} rows", frame.n_rows()));
        self.frame = frame;
        self.metadata.update();
        Ok(())
    }

    /// Persist the frame to the designated store. Rejected while locked.
    pub fn save(&mut self) -> Result<()> {
        if self.locked {
            return Err(DataStudioError::locked(self.name(), "save"));
        }
        let store = self.store.as_mut().ok_or_else(|| {
            DataStudioError::MissingBackend {
                entity: self.metadata.admin.name.clone(),
                role: "store".to_string(),
            }
        })?;
        store.save(&self.frame)?;
        self.metadata.record("saved to store");
        Ok(())
    }

    /// Quantitative and qualitative summaries of the frame.
    pub fn summarize(&self) -> Description {
        self.frame.describe()
    }
}

impl Entity for DataSet {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

/// A member of a collection: a dataset or a nested collection.
#[derive(Debug, Clone)]
pub enum DataNode {
    /// A leaf dataset
    Set(DataSet),
    /// A nested collection
    Collection(DataCollection),
}

impl DataNode {
    /// The member's type name, as used in collection keys.
    pub fn classname(&self) -> &'static str {
        match self {
            DataNode::Set(_) => "DataSet",
            DataNode::Collection(_) => "DataCollection",
        }
    }

    /// The member's name.
    pub fn name(&self) -> &str {
        match self {
            DataNode::Set(s) => s.name(),
            DataNode::Collection(c) => c.name(),
        }
    }

    fn metadata(&self) -> &Metadata {
        match self {
            DataNode::Set(s) => s.metadata(),
            DataNode::Collection(c) => c.metadata(),
        }
    }

    /// Whether the member (for collections: every descendant) is locked.
    /// An empty collection counts as unlocked.
    pub fn is_locked(&self) -> bool {
        match self {
            DataNode::Set(s) => s.is_locked(),
            DataNode::Collection(c) => {
                !c.members.is_empty() && c.members.values().all(DataNode::is_locked)
            }
        }
    }

    fn lock(&mut self) {
        match self {
            DataNode::Set(s) => s.lock(),
            DataNode::Collection(c) => c.lock_all(),
        }
    }

    fn unlock(&mut self) {
        match self {
            DataNode::Set(s) => s.unlock(),
            DataNode::Collection(c) => c.unlock_all(),
        }
    }

    /// Frames of this member, merged for collections.
    fn merged_frame(&self) -> Result<DataFrame> {
        match self {
            DataNode::Set(s) => Ok(s.frame().clone()),
            DataNode::Collection(c) => c.merge(),
        }
    }
}

/// An ordered composite of datasets and nested collections.
#[derive(Debug, Clone)]
pub struct DataCollection {
    metadata: Metadata,
    members: IndexMap<String, DataNode>,
}

impl DataCollection {
    /// Create an empty collection.
    pub fn new(name: &str) -> Self {
        DataCollection {
            metadata: Metadata::builder("DataCollection", name)
                .collection()
                .build(),
            members: IndexMap::new(),
        }
    }

    fn key_for(node: &DataNode) -> String {
        format!("{}_{}", snake(node.classname()), snake(node.name()))
    }

    /// Number of direct members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// True when the collection has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Member keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.keys().map(String::as_str)
    }

    /// Add a member; its key must not already exist.
    pub fn add(&mut self, node: DataNode) -> Result<()> {
        let key = Self::key_for(&node);
        if self.members.contains_key(&key) {
            return Err(DataStudioError::CollectionKey(format!(
                "unable to add {}: key {key} already exists",
                node.name()
            )));
        }
        self.metadata
            .record(format!("added member {key}"));
        self.members.insert(key, node);
        self.refresh_member_counts();
        Ok(())
    }

    /// Replace the member stored under `key`; the key must exist.
    pub fn change(&mut self, key: &str, node: DataNode) -> Result<()> {
        if !self.members.contains_key(key) {
            return Err(DataStudioError::CollectionKey(format!(
                "key {key} does not exist"
            )));
        }
        self.members.insert(key.to_string(), node);
        self.metadata.record(format!("changed member {key}"));
        self.refresh_member_counts();
        Ok(())
    }

    /// Remove the member stored under `key`. Missing keys are ignored.
    pub fn remove(&mut self, key: &str) {
        if self.members.shift_remove(key).is_some() {
            self.metadata.record(format!("removed member {key}"));
            self.refresh_member_counts();
        }
    }

    /// Find a member by its own name.
    pub fn get(&self, name: &str) -> Option<&DataNode> {
        self.members.values().find(|n| n.name() == name)
    }

    /// Clone the member named `name` into a new member named `new_name`.
    pub fn copy_member(&mut self, name: &str, new_name: &str) -> Result<()> {
        let node = self
            .get(name)
            .ok_or_else(|| {
                DataStudioError::CollectionKey(format!("no member named {name}"))
            })?
            .clone();
        let renamed = match node {
            DataNode::Set(mut set) => {
                set.rename(new_name);
                DataNode::Set(set)
            }
            DataNode::Collection(mut coll) => {
                coll.rename(new_name);
                DataNode::Collection(coll)
            }
        };
        self.add(renamed)
    }

    /// Lock every member, recursively.
    pub fn lock_all(&mut self) {
        for node in self.members.values_mut() {
            node.lock();
        }
    }

    /// Unlock every member, recursively.
    pub fn unlock_all(&mut self) {
        for node in self.members.values_mut() {
            node.unlock();
        }
    }

    /// Lock the member named `name`.
    pub fn lock_member(&mut self, name: &str) -> Result<()> {
        match self.members.values_mut().find(|n| n.name() == name) {
            Some(node) => {
                node.lock();
                Ok(())
            }
            None => Err(DataStudioError::CollectionKey(format!(
                "no member named {name}"
            ))),
        }
    }

    /// Unlock the member named `name`.
    pub fn unlock_member(&mut self, name: &str) -> Result<()> {
        match self.members.values_mut().find(|n| n.name() == name) {
            Some(node) => {
                node.unlock();
                Ok(())
            }
            None => Err(DataStudioError::CollectionKey(format!(
                "no member named {name}"
            ))),
        }
    }

    /// Row-concatenate every member's frame into one.
    ///
    /// Members must share a schema; nested collections are merged first.
    pub fn merge(&self) -> Result<DataFrame> {
        let mut merged = DataFrame::new();
        for node in self.members.values() {
            let frame = node.merged_frame()?;
            merged = merged
                .concat_rows(&frame)
                .map_err(DataStudioError::Frame)?;
        }
        Ok(merged)
    }

    /// One row per member: class, name, lock state and revision facts.
    pub fn member_summary(&self) -> DataFrame {
        let mut classes = Vec::new();
        let mut names = Vec::new();
        let mut locked = Vec::new();
        let mut created = Vec::new();
        let mut modified = Vec::new();
        let mut updates = Vec::new();
        let mut creators = Vec::new();
        for node in self.members.values() {
            let md = node.metadata();
            classes.push(node.classname().to_string());
            names.push(node.name().to_string());
            locked.push(node.is_locked());
            created.push(md.admin.created.format("%Y-%m-%d %H:%M:%S").to_string());
            modified.push(md.admin.modified.format("%Y-%m-%d %H:%M:%S").to_string());
            updates.push(md.admin.updates as i64);
            creators.push(md.admin.creator.clone());
        }
        DataFrame::from_columns([
            ("class", Series::str(classes)),
            ("name", Series::str(names)),
            ("locked", Series::bool(locked)),
            ("created", Series::str(created)),
            ("modified", Series::str(modified)),
            ("updates", Series::int(updates)),
            ("creator", Series::str(creators)),
        ])
        .unwrap_or_default()
    }

    /// Merged summaries across every member's frame.
    pub fn summarize(&self) -> Result<Description> {
        Ok(self.merge()?.describe())
    }

    fn refresh_member_counts(&mut self) {
        let collections = self
            .members
            .values()
            .filter(|n| matches!(n, DataNode::Collection(_)))
            .count();
        let total = self.members.len();
        if let Some(counts) = self.metadata.desc.members.as_mut() {
            counts.total = total;
            counts.collections = collections;
            counts.datasets = total - collections;
        }
        self.metadata.admin.touch();
    }
}

impl Entity for DataCollection {
    fn metadata(&self) -> &Metadata {
        &self.metadata
    }
    fn metadata_mut(&mut self) -> &mut Metadata {
        &mut self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame() -> DataFrame {
        DataFrame::from_columns([("x", Series::int([1, 2]))]).unwrap()
    }

    #[test]
    fn test_locked_set_rejects_writes() {
        let mut set = DataSet::from_frame("prices", frame());
        set.lock();
        assert!(set.set_frame(DataFrame::new()).is_err());
        set.unlock();
        assert!(set.set_frame(frame()).is_ok());
    }

    #[test]
    fn test_missing_backend() {
        let mut set = DataSet::new("prices");
        assert!(matches!(
            set.source(),
            Err(DataStudioError::MissingBackend { .. })
        ));
        assert!(matches!(
            set.load(),
            Err(DataStudioError::MissingBackend { .. })
        ));
    }

    #[test]
    fn test_collection_add_duplicate() {
        let mut coll = DataCollection::new("all");
        coll.add(DataNode::Set(DataSet::from_frame("a", frame())))
            .unwrap();
        let dup = coll.add(DataNode::Set(DataSet::from_frame("a", frame())));
        assert!(matches!(dup, Err(DataStudioError::CollectionKey(_))));
    }

    #[test]
    fn test_member_counts() {
        let mut coll = DataCollection::new("all");
        coll.add(DataNode::Set(DataSet::from_frame("a", frame())))
            .unwrap();
        coll.add(DataNode::Collection(DataCollection::new("inner")))
            .unwrap();
        let counts = coll.metadata().desc.members.unwrap();
        assert_eq!(counts.total, 2);
        assert_eq!(counts.datasets, 1);
        assert_eq!(counts.collections, 1);
    }

    #[test]
    fn test_merge() {
        let mut coll = DataCollection::new("all");
        coll.add(DataNode::Set(DataSet::from_frame("a", frame())))
            .unwrap();
        coll.add(DataNode::Set(DataSet::from_frame("b", frame())))
            .unwrap();
        let merged = coll.merge().unwrap();
        assert_eq!(merged.shape(), (4, 1));
    }

    #[test]
    fn test_copy_member() {
        let mut coll = DataCollection::new("all");
        coll.add(DataNode::Set(DataSet::from_frame("a", frame())))
            .unwrap();
        coll.copy_member("a", "a-clone").unwrap();
        assert_eq!(coll.len(), 2);
        assert!(coll.get("a-clone").is_some());
    }
}
