//! The `Entity` trait shared by all managed objects

use crate::metadata::Metadata;

/// Behavior common to every managed object: datasets, collections, file
/// stores and projects. An entity owns a [`Metadata`] record; naming and
/// description accessors read and write through it, and every write is
/// reflected in the administrative revision tracking.
pub trait Entity {
    /// Borrow the entity's metadata.
    fn metadata(&self) -> &Metadata;

    /// Mutably borrow the entity's metadata.
    fn metadata_mut(&mut self) -> &mut Metadata;

    /// The entity's name.
    fn name(&self) -> &str {
        &self.metadata().admin.name
    }

    /// Rename the entity.
    fn rename(&mut self, name: impl Into<String>)
    where
        Self: Sized,
    {
        let md = self.metadata_mut();
        md.admin.name = name.into();
        md.admin.touch();
    }

    /// The display title.
    fn title(&self) -> &str {
        &self.metadata().desc.title
    }

    /// Set the display title.
    fn set_title(&mut self, title: impl Into<String>)
    where
        Self: Sized,
    {
        let md = self.metadata_mut();
        md.desc.title = title.into();
        md.admin.touch();
    }

    /// The long description.
    fn description(&self) -> &str {
        &self.metadata().desc.description
    }

    /// Set the long description.
    fn set_description(&mut self, text: impl Into<String>)
    where
        Self: Sized,
    {
        let md = self.metadata_mut();
        md.desc.description = text.into();
        md.admin.touch();
    }

    /// The entity version.
    fn version(&self) -> &str {
        &self.metadata().desc.version
    }

    /// Set the entity version.
    fn set_version(&mut self, version: impl Into<String>)
    where
        Self: Sized,
    {
        let md = self.metadata_mut();
        md.desc.version = version.into();
        md.admin.touch();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metadata::Metadata;

    struct Thing {
        metadata: Metadata,
    }

    impl Entity for Thing {
        fn metadata(&self) -> &Metadata {
            &self.metadata
        }
        fn metadata_mut(&mut self) -> &mut Metadata {
            &mut self.metadata
        }
    }

    #[test]
    fn test_rename_touches_admin() {
        let mut thing = Thing {
            metadata: Metadata::builder("Thing", "old").build(),
        };
        thing.rename("new");
        assert_eq!(thing.name(), "new");
        assert_eq!(thing.metadata().admin.updates, 1);
    }

    #[test]
    fn test_title_round_trip() {
        let mut thing = Thing {
            metadata: Metadata::builder("Thing", "t").build(),
        };
        thing.set_title("Quarterly sales");
        assert_eq!(thing.title(), "Quarterly sales");
        assert_eq!(thing.metadata().admin.updates, 1);
    }

    #[test]
    fn test_default_version() {
        let thing = Thing {
            metadata: Metadata::builder("Thing", "t").build(),
        };
        assert_eq!(thing.version(), "0.1.0");
    }
}
