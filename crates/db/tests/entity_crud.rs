//! Integration tests for create/read/update through the generic repository,
//! optimistic concurrency, store-level constraints and the per-project
//! assignment aggregation.

use assert_matches::assert_matches;
use sqlx::PgPool;
use staffing_core::developer::{Seniority, ValidDeveloper};
use staffing_core::project::{ProjectStatus, ValidProject};
use staffing_core::types::Date;
use staffing_db::entity::SoftDeletable;
use staffing_db::filter::Filter;
use staffing_db::models::assignment::Assignment;
use staffing_db::models::developer::Developer;
use staffing_db::models::project::Project;
use staffing_db::repositories::{AssignmentRepo, DeveloperRepo, ProjectRepo};

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd_opt(y, m, d).unwrap()
}

fn new_project(name: &str) -> Project {
    Project::new(ValidProject {
        name: name.to_string(),
        client: Some("Acme".to_string()),
        status: ProjectStatus::InProgress,
        start_date: date(2024, 3, 1),
        end_date: Some(date(2024, 12, 31)),
    })
}

fn new_developer(name: &str, email: &str) -> Developer {
    Developer::new(ValidDeveloper {
        full_name: name.to_string(),
        email: email.to_string(),
        seniority: Seniority::Junior,
    })
}

fn new_assignment(project_id: i64, developer_id: i64, role: &str) -> Assignment {
    Assignment {
        project_id,
        developer_id,
        role: role.to_string(),
        weekly_hours: 20,
        assignment_date: date(2024, 3, 2),
        is_deleted: false,
        row_version: 1,
    }
}

// ---------------------------------------------------------------------------
// Round trip
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_create_then_find_round_trip(pool: PgPool) {
    let draft = new_project("Round Trip");
    let created = ProjectRepo::create(&pool, &draft).await.unwrap();
    assert!(created.project_id > 0);

    let found = ProjectRepo::find_by_id(&pool, created.project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
    assert_eq!(
        Project {
            project_id: draft.project_id,
            ..found
        },
        draft,
        "only the generated key differs"
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_developer_round_trip(pool: PgPool) {
    let created = DeveloperRepo::create(&pool, &new_developer("Ana", "ana@x.com"))
        .await
        .unwrap();
    let found = DeveloperRepo::find_by_id(&pool, created.developer_id)
        .await
        .unwrap();
    assert_eq!(found, Some(created));
}

// ---------------------------------------------------------------------------
// Update and concurrency token
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_update_replaces_fields_and_bumps_version(pool: PgPool) {
    let mut project = ProjectRepo::create(&pool, &new_project("Before")).await.unwrap();
    project.name = "After".to_string();
    project.client = None;
    project.status = ProjectStatus::Closed.as_str().to_string();

    let updated = ProjectRepo::update(&pool, &project).await.unwrap().unwrap();
    assert_eq!(updated.name, "After");
    assert_eq!(updated.client, None);
    assert_eq!(updated.status, "closed");
    assert_eq!(updated.row_version, project.row_version + 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_with_stale_version_matches_nothing(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Race")).await.unwrap();

    let mut first = project.clone();
    first.name = "Race A".to_string();
    assert!(ProjectRepo::update(&pool, &first).await.unwrap().is_some());

    let mut second = project;
    second.name = "Race B".to_string();
    assert_matches!(ProjectRepo::update(&pool, &second).await, Ok(None));

    let stored = ProjectRepo::find_by_id(&pool, first.project_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "Race A");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_can_toggle_visibility(pool: PgPool) {
    let mut dev = DeveloperRepo::create(&pool, &new_developer("Ivy", "ivy@x.com"))
        .await
        .unwrap();
    dev.set_visible(false);

    let updated = DeveloperRepo::update(&pool, &dev).await.unwrap().unwrap();
    assert!(!updated.is_active);
    assert!(DeveloperRepo::find_by_id(&pool, dev.developer_id)
        .await
        .unwrap()
        .is_none());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_by_keys_keeps_key(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Keys")).await.unwrap();
    let dev = DeveloperRepo::create(&pool, &new_developer("Jo", "jo@x.com"))
        .await
        .unwrap();
    let mut assignment = AssignmentRepo::upsert_reviving(
        &pool,
        &new_assignment(project.project_id, dev.developer_id, "Dev"),
    )
    .await
    .unwrap()
    .unwrap();

    assignment.weekly_hours = 40;
    assignment.role = "Lead".to_string();
    let updated = AssignmentRepo::update_by_keys(&pool, &assignment)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(updated.weekly_hours, 40);
    assert_eq!(updated.key(), assignment.key());

    assert_matches!(
        AssignmentRepo::update_by_keys(&pool, &assignment).await,
        Ok(None),
        "the token was consumed by the first update"
    );
}

// ---------------------------------------------------------------------------
// Find with predicate
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_find_applies_visibility_then_predicate(pool: PgPool) {
    let a = ProjectRepo::create(&pool, &new_project("Find A")).await.unwrap();
    let b = ProjectRepo::create(&pool, &new_project("Find B")).await.unwrap();
    ProjectRepo::soft_delete(&pool, b.project_id).await.unwrap();

    let filter = Filter::new().eq("client", Some("Acme".to_string()));
    let found = ProjectRepo::find(&pool, &filter).await.unwrap();
    assert_eq!(found.iter().map(|p| p.project_id).collect::<Vec<_>>(), vec![a.project_id]);

    let others = ProjectRepo::find(&pool, &Filter::new().ne("project_id", a.project_id))
        .await
        .unwrap();
    assert!(others.is_empty());
}

// ---------------------------------------------------------------------------
// Store-level constraints
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_unique_index_rejects_second_active_name(pool: PgPool) {
    ProjectRepo::create(&pool, &new_project("Dup")).await.unwrap();
    let err = ProjectRepo::create(&pool, &new_project("Dup"))
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23505"));
    assert_eq!(db_err.constraint(), Some("uq_projects_name_active"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_check_constraint_rejects_out_of_range_hours(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Hours")).await.unwrap();
    let dev = DeveloperRepo::create(&pool, &new_developer("Kai", "kai@x.com"))
        .await
        .unwrap();
    let mut assignment = new_assignment(project.project_id, dev.developer_id, "Dev");
    assignment.weekly_hours = 41;

    let err = AssignmentRepo::upsert_reviving(&pool, &assignment)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23514"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_foreign_key_rejects_unknown_project(pool: PgPool) {
    let dev = DeveloperRepo::create(&pool, &new_developer("Lu", "lu@x.com"))
        .await
        .unwrap();
    let orphan = new_assignment(999_999, dev.developer_id, "Dev");
    let err = AssignmentRepo::upsert_reviving(&pool, &orphan)
        .await
        .unwrap_err();
    let db_err = err.as_database_error().expect("database error");
    assert_eq!(db_err.code().as_deref(), Some("23503"));
}

// ---------------------------------------------------------------------------
// Transactions
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_lock_visible_inside_transaction(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Locked")).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    let locked = ProjectRepo::lock_visible(&mut *tx, project.project_id)
        .await
        .unwrap();
    assert!(locked.is_some());
    assert!(ProjectRepo::soft_delete(&mut *tx, project.project_id).await.unwrap());
    assert!(ProjectRepo::lock_visible(&mut *tx, project.project_id)
        .await
        .unwrap()
        .is_none());
    tx.rollback().await.unwrap();

    assert!(ProjectRepo::find_by_id(&pool, project.project_id)
        .await
        .unwrap()
        .is_some(), "rolled back delete leaves the project visible");
}

// ---------------------------------------------------------------------------
// Aggregation
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "./migrations")]
async fn test_details_by_project_empty(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Empty")).await.unwrap();
    let rows = AssignmentRepo::details_by_project(&pool, project.project_id)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_details_by_project_joins_developer(pool: PgPool) {
    let project = ProjectRepo::create(&pool, &new_project("Joined")).await.unwrap();
    let zoe = DeveloperRepo::create(&pool, &new_developer("Zoe", "zoe@x.com"))
        .await
        .unwrap();
    let abe = DeveloperRepo::create(&pool, &new_developer("Abe", "abe@x.com"))
        .await
        .unwrap();
    let max = DeveloperRepo::create(&pool, &new_developer("Max", "max@x.com"))
        .await
        .unwrap();
    for (dev, role) in [(&zoe, "QA"), (&abe, "Lead"), (&max, "Dev")] {
        AssignmentRepo::upsert_reviving(
            &pool,
            &new_assignment(project.project_id, dev.developer_id, role),
        )
        .await
        .unwrap();
    }
    AssignmentRepo::delete_by_keys(&pool, project.project_id, max.developer_id)
        .await
        .unwrap();

    let rows = AssignmentRepo::details_by_project(&pool, project.project_id)
        .await
        .unwrap();
    assert_eq!(rows.len(), 2, "deleted assignments are excluded");
    assert_eq!(rows[0].full_name, "Abe");
    assert_eq!(rows[0].role, "Lead");
    assert_eq!(rows[0].email, "abe@x.com");
    assert_eq!(rows[0].seniority, "JR");
    assert_eq!(rows[1].full_name, "Zoe");
    assert_eq!(rows[1].weekly_hours, 20);
    assert_eq!(rows[1].assignment_date, date(2024, 3, 2));
}
