//! Tests for the CRISP-DM project model and its persistence

use pretty_assertions::assert_eq;

use datastudio::project::{Phase, Project, TaskKind, TaskStatus};
use datastudio::Entity;

fn sample_project() -> Project {
    let mut project = Project::new("churn-study");
    project.add_task("acquire", TaskKind::Collection).unwrap();
    project.add_task("profile", TaskKind::Summary).unwrap();
    project.add_task("audit-quality", TaskKind::Quality).unwrap();
    project.add_task("impute-age", TaskKind::Imputation).unwrap();
    project
}

#[test]
fn test_ordering_and_lookup() {
    let project = sample_project();
    let names: Vec<&str> = project.tasks().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["acquire", "profile", "audit-quality", "impute-age"]);
    assert_eq!(project.task("profile").unwrap().kind, TaskKind::Summary);
    assert!(project.task("model").is_none());
}

#[test]
fn test_status_progression() {
    let mut project = sample_project();
    assert_eq!(project.status_counts(), (4, 0, 0));

    project.start_task("acquire").unwrap();
    project.complete_task("acquire").unwrap();
    project.start_task("profile").unwrap();
    assert_eq!(project.status_counts(), (2, 1, 1));

    let done = project.task("acquire").unwrap();
    assert_eq!(done.status, TaskStatus::Complete);
    assert!(done.completed.is_some());
    assert!(project.task("profile").unwrap().completed.is_none());
}

#[test]
fn test_phase_partition() {
    let project = sample_project();
    let understanding = project.tasks_in_phase(Phase::DataUnderstanding);
    let preparation = project.tasks_in_phase(Phase::DataPreparation);
    assert_eq!(understanding.len(), 3);
    assert_eq!(preparation.len(), 1);
    assert_eq!(preparation[0].name, "impute-age");
    assert!(project.tasks_in_phase(Phase::Modeling).is_empty());
}

#[test]
fn test_json_round_trip() -> anyhow::Result<()> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join("projects/churn.json");

    let mut project = sample_project();
    project.complete_task("acquire")?;
    project.annotate_task("profile", "start with the numeric columns")?;
    project.save(&path)?;

    let restored = Project::load(&path)?;
    assert_eq!(restored.name(), "churn-study");
    assert_eq!(restored.len(), 4);
    assert_eq!(restored.status_counts(), (3, 0, 1));
    assert_eq!(
        restored.task("profile").unwrap().notes.as_deref(),
        Some("start with the numeric columns")
    );
    assert_eq!(
        restored.task("acquire").unwrap().id,
        project.task("acquire").unwrap().id
    );
    Ok(())
}

#[test]
fn test_process_log_follows_activity() {
    let mut project = sample_project();
    let before = project.metadata().process.log.len();
    project.complete_task("profile").unwrap();
    assert_eq!(project.metadata().process.log.len(), before + 1);
}

#[test]
fn test_load_missing_file() {
    assert!(Project::load("no/such/project.json".as_ref()).is_err());
}
