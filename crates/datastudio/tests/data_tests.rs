//! Comprehensive tests for datasets, collections and file backends

use pretty_assertions::assert_eq;

use datastudio::data::{DataCollection, DataNode, DataSet, FileDataSource, FileDataStore};
use datastudio::frame::{DataFrame, Series};
use datastudio::io::{self, FileContent};
use datastudio::{DataStudioError, Entity};

fn sales() -> DataFrame {
    DataFrame::from_columns([
        ("region", Series::str(["north", "south", "north"])),
        ("amount", Series::float([120.0, 80.5, 64.25])),
    ])
    .unwrap()
}

#[test]
fn test_dataset_metadata_profile() {
    let set = DataSet::from_frame("sales", sales());
    assert_eq!(set.name(), "sales");
    assert_eq!(set.metadata().admin.classname, "DataSet");
    assert_eq!(set.metadata().admin.updates, 0);
    assert!(set
        .metadata()
        .admin
        .objectname
        .ends_with("dataset_sales"));
}

#[test]
fn test_dataset_save_and_load() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sales.csv");

    let mut set = DataSet::from_frame("sales", sales());
    set.set_store(FileDataStore::new("sales-store", &path));
    set.save().unwrap();
    assert!(path.exists());

    let mut restored = DataSet::new("sales");
    restored.set_store(FileDataStore::new("sales-store", &path));
    restored.load().unwrap();
    assert_eq!(restored.frame(), &sales());
    // revision tracking recorded the load
    assert!(restored.metadata().admin.updates > 0);
}

#[test]
fn test_dataset_source_is_separate_from_store() {
    let dir = tempfile::tempdir().unwrap();
    let raw = dir.path().join("raw.csv");
    io::write(&raw, &FileContent::Frame(sales())).unwrap();

    let mut set = DataSet::new("sales");
    set.set_source(FileDataSource::new("raw-sales", &raw));
    set.source().unwrap();
    assert_eq!(set.frame().shape(), (3, 2));

    // no store attached: saving is an error, sourcing was fine
    assert!(matches!(
        set.save(),
        Err(DataStudioError::MissingBackend { .. })
    ));
}

#[test]
fn test_locked_dataset_refuses_save() {
    let dir = tempfile::tempdir().unwrap();
    let mut set = DataSet::from_frame("sales", sales());
    set.set_store(FileDataStore::new("s", dir.path().join("sales.csv")));
    set.lock();
    assert!(matches!(set.save(), Err(DataStudioError::Locked { .. })));
    set.unlock();
    assert!(set.save().is_ok());
}

#[test]
fn test_collection_membership() {
    let mut coll = DataCollection::new("quarterly");
    coll.add(DataNode::Set(DataSet::from_frame("q1", sales())))
        .unwrap();
    coll.add(DataNode::Set(DataSet::from_frame("q2", sales())))
        .unwrap();

    assert_eq!(coll.len(), 2);
    assert!(coll.get("q1").is_some());
    assert!(coll.get("q9").is_none());
    let keys: Vec<&str> = coll.keys().collect();
    assert_eq!(keys, vec!["dataset_q1", "dataset_q2"]);

    coll.remove("dataset_q1");
    assert_eq!(coll.len(), 1);
    coll.remove("dataset_q1"); // absent keys are ignored
}

#[test]
fn test_nested_collection_merge() {
    let mut inner = DataCollection::new("h1");
    inner
        .add(DataNode::Set(DataSet::from_frame("q1", sales())))
        .unwrap();
    inner
        .add(DataNode::Set(DataSet::from_frame("q2", sales())))
        .unwrap();

    let mut outer = DataCollection::new("year");
    outer.add(DataNode::Collection(inner)).unwrap();
    outer
        .add(DataNode::Set(DataSet::from_frame("q3", sales())))
        .unwrap();

    let merged = outer.merge().unwrap();
    assert_eq!(merged.shape(), (9, 2));
}

#[test]
fn test_collection_lock_cascades() {
    let mut coll = DataCollection::new("quarterly");
    coll.add(DataNode::Set(DataSet::from_frame("q1", sales())))
        .unwrap();
    coll.add(DataNode::Set(DataSet::from_frame("q2", sales())))
        .unwrap();

    coll.lock_member("q1").unwrap();
    assert!(coll.get("q1").unwrap().is_locked());
    assert!(!coll.get("q2").unwrap().is_locked());

    coll.unlock_member("q1").unwrap();
    assert!(!coll.get("q1").unwrap().is_locked());

    coll.lock_all();
    assert!(coll.get("q2").unwrap().is_locked());
    coll.unlock_all();
    assert!(!coll.get("q1").unwrap().is_locked());

    assert!(coll.lock_member("q9").is_err());
    assert!(coll.unlock_member("q9").is_err());
}

#[test]
fn test_empty_nested_collection_reports_unlocked() {
    let mut coll = DataCollection::new("quarterly");
    coll.add(DataNode::Collection(DataCollection::new("archive")))
        .unwrap();
    assert!(!coll.get("archive").unwrap().is_locked());
    coll.lock_all();
    assert!(!coll.get("archive").unwrap().is_locked());
}

#[test]
fn test_member_summary_frame() {
    let mut coll = DataCollection::new("quarterly");
    coll.add(DataNode::Set(DataSet::from_frame("q1", sales())))
        .unwrap();
    coll.add(DataNode::Collection(DataCollection::new("archive")))
        .unwrap();

    let summary = coll.member_summary();
    assert_eq!(summary.n_rows(), 2);
    assert_eq!(summary.column("class").unwrap().format_cell(0), "DataSet");
    assert_eq!(
        summary.column("class").unwrap().format_cell(1),
        "DataCollection"
    );
    assert_eq!(summary.column("name").unwrap().format_cell(0), "q1");
}

#[test]
fn test_member_counts_follow_membership() {
    let mut coll = DataCollection::new("quarterly");
    coll.add(DataNode::Set(DataSet::from_frame("q1", sales())))
        .unwrap();
    coll.add(DataNode::Collection(DataCollection::new("archive")))
        .unwrap();

    let counts = coll.metadata().desc.members.unwrap();
    assert_eq!((counts.total, counts.datasets, counts.collections), (2, 1, 1));

    coll.remove("datacollection_archive");
    let counts = coll.metadata().desc.members.unwrap();
    assert_eq!((counts.total, counts.datasets, counts.collections), (1, 1, 0));
}
