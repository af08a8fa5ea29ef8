//! Metadata taxonomy for Data Studio entities
//!
//! Every managed entity (dataset, collection, file store, project) carries a
//! [`Metadata`] record with four sections:
//!
//! - **administrative**: identity, authorship, revision tracking
//! - **descriptive**: titles, descriptions, versions
//! - **technical**: the host the entity was produced on
//! - **process**: an append-only activity log
//!
//! plus free-form extra attributes. [`MetadataBuilder`] assembles the right
//! profile for plain entities, collections and file-backed objects.

mod sections;

pub use sections::{
    AdminMetadata, DescMetadata, FileFacts, MemberCounts, ProcessEvent, ProcessMetadata,
    TechMetadata,
};

use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::{DataStudioError, Result};

/// The full metadata record carried by an entity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Metadata {
    /// Administrative section
    pub admin: AdminMetadata,
    /// Descriptive section
    pub desc: DescMetadata,
    /// Technical section
    pub tech: TechMetadata,
    /// Process section
    pub process: ProcessMetadata,
    /// Free-form attributes
    extra: IndexMap<String, String>,
}

impl Metadata {
    /// Start building a metadata record for a plain entity.
    pub fn builder(classname: &str, name: &str) -> MetadataBuilder {
        MetadataBuilder::new(classname, name)
    }

    /// Record a modification in the administrative section and resample
    /// the technical section.
    pub fn update(&mut self) {
        self.admin.touch();
        self.tech = TechMetadata::sample();
    }

    /// Append an event to the process log.
    pub fn record(&mut self, message: impl Into<String>) {
        self.process.record(message);
    }

    /// Add a free-form attribute; the key must not already exist.
    pub fn add_attr(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        if self.extra.contains_key(key) {
            return Err(DataStudioError::MetadataKey(format!(
                "key {key} already exists"
            )));
        }
        self.extra.insert(key.to_string(), value.into());
        Ok(())
    }

    /// Change an existing free-form attribute.
    pub fn change_attr(&mut self, key: &str, value: impl Into<String>) -> Result<()> {
        match self.extra.get_mut(key) {
            Some(slot) => {
                *slot = value.into();
                Ok(())
            }
            None => Err(DataStudioError::MetadataKey(format!(
                "key {key} does not exist"
            ))),
        }
    }

    /// Remove a free-form attribute. Removing a missing key is not an error.
    pub fn remove_attr(&mut self, key: &str) {
        self.extra.shift_remove(key);
    }

    /// Look up a free-form attribute.
    pub fn attr(&self, key: &str) -> Result<&str> {
        self.extra
            .get(key)
            .map(String::as_str)
            .ok_or_else(|| DataStudioError::MetadataKey(format!("key {key} does not exist")))
    }

    /// All free-form attributes, in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.extra.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

/// Builds [`Metadata`] profiles, mirroring an entity's kind.
#[derive(Debug)]
pub struct MetadataBuilder {
    classname: String,
    name: String,
    collection: bool,
    path: Option<std::path::PathBuf>,
}

impl MetadataBuilder {
    fn new(classname: &str, name: &str) -> Self {
        MetadataBuilder {
            classname: classname.to_string(),
            name: name.to_string(),
            collection: false,
            path: None,
        }
    }

    /// Maintain member counts in the descriptive section (collections).
    pub fn collection(mut self) -> Self {
        self.collection = true;
        self
    }

    /// Attach filesystem facts for a file-backed entity.
    pub fn file(mut self, path: &Path) -> Self {
        self.path = Some(path.to_path_buf());
        self
    }

    /// Assemble the record. The process log opens with a creation event.
    pub fn build(self) -> Metadata {
        let mut admin = AdminMetadata::new(&self.classname, &self.name);
        if let Some(path) = &self.path {
            admin.file = Some(FileFacts::probe(path));
        }
        let mut process = ProcessMetadata::default();
        process.record(format!(
            "{} object named '{}' was instantiated by {}.",
            self.classname,
            self.name,
            admin.creator
        ));
        Metadata {
            admin,
            desc: DescMetadata::new(&self.classname, self.collection),
            tech: TechMetadata::sample(),
            process,
            extra: IndexMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_profiles() {
        let plain = Metadata::builder("DataSet", "prices").build();
        assert_eq!(plain.admin.classname, "DataSet");
        assert!(plain.desc.members.is_none());
        assert!(plain.admin.file.is_none());
        assert_eq!(plain.process.log.len(), 1);

        let coll = Metadata::builder("DataCollection", "all").collection().build();
        assert_eq!(coll.desc.members, Some(MemberCounts::default()));
    }

    #[test]
    fn test_update_bumps_counter() {
        let mut md = Metadata::builder("DataSet", "prices").build();
        let before = md.admin.modified;
        md.update();
        assert_eq!(md.admin.updates, 1);
        assert!(md.admin.modified >= before);
    }

    #[test]
    fn test_attrs_lifecycle() {
        let mut md = Metadata::builder("DataSet", "prices").build();
        md.add_attr("source", "airbnb").unwrap();
        assert!(md.add_attr("source", "again").is_err());
        md.change_attr("source", "inside-airbnb").unwrap();
        assert_eq!(md.attr("source").unwrap(), "inside-airbnb");
        assert!(md.change_attr("missing", "x").is_err());
        md.remove_attr("source");
        assert!(md.attr("source").is_err());
    }

    #[test]
    fn test_objectname_shape() {
        let md = Metadata::builder("DataSet", "My Prices").build();
        assert!(md.admin.objectname.contains("dataset"));
        assert!(md.admin.objectname.ends_with("my_prices"));
    }
}
