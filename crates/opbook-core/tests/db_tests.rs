use jiff::{Timestamp, ToSpan};
use opbook_core::{
    Database, ErrorKind, Plan, PlanContent, PlanId, PlanStore,
    models::{Clause, Field, PlanFilter, Sort, SortDirection, SortField},
};
use tempfile::NamedTempFile;

mod common;

/// Helper function to create a temporary database for testing
fn create_test_db() -> (NamedTempFile, Database) {
    let temp_file = NamedTempFile::new().expect("Failed to create temporary file");
    let db = Database::new(temp_file.path()).expect("Failed to create test database");
    (temp_file, db)
}

fn stored_plan(id: &str, uploader: &str, content: PlanContent) -> Plan {
    let now = Timestamp::now();
    Plan {
        id: PlanId::from(id),
        uploader_id: format!("{uploader}-id"),
        uploader_name: uploader.to_string(),
        content,
        views: 0,
        created_at: now,
        updated_at: now,
    }
}

fn seed(db: &mut Database) {
    let plans = [
        stored_plan("a", "Doctor", common::plan_content("1-7", "Amiya solo", &["Amiya"])),
        stored_plan(
            "b",
            "Doctor",
            common::plan_content("1-8", "Snow", &["Amiya", "Silverash"]),
        ),
        stored_plan("c", "Kal'tsit", common::plan_content("2-1", "Easy", &["Kroos"])),
    ];
    for plan in &plans {
        db.insert(plan).expect("Failed to insert plan");
    }
}

fn ids(plans: &[Plan]) -> Vec<&str> {
    plans.iter().map(|plan| plan.id.as_str()).collect()
}

#[test]
fn test_database_initialization() {
    let (temp_file, _db) = create_test_db();
    assert!(temp_file.path().exists());

    // Reopening an initialized file is fine
    Database::new(temp_file.path()).expect("Failed to reopen database");
}

#[test]
fn test_insert_and_find_round_trip() {
    let (_temp_file, mut db) = create_test_db();
    let plan = stored_plan("a", "Doctor", common::plan_content("1-7", "T", &["Amiya"]));

    db.insert(&plan).expect("Failed to insert plan");

    let found = db
        .find_by_id(&plan.id)
        .expect("Failed to query plan")
        .expect("Plan should exist");
    assert_eq!(found, plan);

    assert!(db.find_by_id(&PlanId::from("missing")).unwrap().is_none());
}

#[test]
fn test_duplicate_insert_fails() {
    let (_temp_file, mut db) = create_test_db();
    let plan = stored_plan("a", "Doctor", PlanContent::default());

    db.insert(&plan).expect("Failed to insert plan");
    let err = db.insert(&plan).expect_err("Duplicate id must fail");
    assert_eq!(err.kind(), ErrorKind::Persistence);
}

#[test]
fn test_save_replaces_content_but_keeps_views() {
    let (_temp_file, mut db) = create_test_db();
    let mut plan = stored_plan("a", "Doctor", common::plan_content("1-7", "T", &["Amiya"]));
    db.insert(&plan).unwrap();
    db.increment_views(&plan.id).unwrap();
    db.increment_views(&plan.id).unwrap();

    plan.content = common::plan_content("1-8", "New", &["Kroos"]);
    plan.views = 0;
    db.save(&plan).expect("Failed to save plan");

    let found = db.find_by_id(&plan.id).unwrap().unwrap();
    assert_eq!(found.content.stage_name, "1-8");
    assert_eq!(found.operator_names().collect::<Vec<_>>(), ["Kroos"]);
    assert_eq!(found.views, 2);

    // Operator index follows the new content
    let filter = PlanFilter::builder()
        .matches(Field::OperatorName, "Amiya")
        .build();
    let (total, _) = db.count_and_find(&filter, &Sort::default(), 0, 10).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_save_inserts_when_missing() {
    let (_temp_file, mut db) = create_test_db();
    let plan = stored_plan("fresh", "Doctor", PlanContent::default());

    db.save(&plan).expect("Upsert should insert");
    assert!(db.find_by_id(&plan.id).unwrap().is_some());
}

#[test]
fn test_delete_plan() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);

    db.delete_by_id(&PlanId::from("b")).expect("Failed to delete");
    assert!(db.find_by_id(&PlanId::from("b")).unwrap().is_none());

    // Deleting again is a no-op at the store level
    db.delete_by_id(&PlanId::from("b")).expect("Repeated delete");

    let filter = PlanFilter::builder()
        .matches(Field::OperatorName, "Silverash")
        .build();
    let (total, _) = db.count_and_find(&filter, &Sort::default(), 0, 10).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_increment_views_on_missing_plan_is_noop() {
    let (_temp_file, mut db) = create_test_db();
    db.increment_views(&PlanId::from("missing"))
        .expect("Increment on missing id should not fail");
}

#[test]
fn test_empty_filter_returns_everything() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);

    let (total, plans) = db
        .count_and_find(&PlanFilter::default(), &Sort::default(), 0, 10)
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(ids(&plans), ["a", "b", "c"]);
}

#[test]
fn test_operator_inclusion_and_exclusion() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);

    let filter = PlanFilter::builder()
        .matches(Field::OperatorName, "Amiya")
        .excludes(Clause::matches(Field::OperatorName, "Silverash"))
        .build();
    let (total, plans) = db.count_and_find(&filter, &Sort::default(), 0, 10).unwrap();

    assert_eq!(total, 1);
    assert_eq!(ids(&plans), ["a"]);
}

#[test]
fn test_pattern_matches_anywhere() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);

    let filter = PlanFilter::builder()
        .any_of([
            Clause::matches(Field::DocumentTitle, "now"),
            Clause::matches(Field::DocumentDetails, "now"),
        ])
        .build();
    let (_, plans) = db.count_and_find(&filter, &Sort::default(), 0, 10).unwrap();
    assert_eq!(ids(&plans), ["b"]);

    let anchored = PlanFilter::builder()
        .matches(Field::StageName, "^1-")
        .build();
    let (total, _) = db.count_and_find(&anchored, &Sort::default(), 0, 10).unwrap();
    assert_eq!(total, 2);
}

#[test]
fn test_uploader_is_exact_match() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);

    let exact = PlanFilter::builder()
        .equals(Field::UploaderName, "Doctor")
        .build();
    let (total, _) = db.count_and_find(&exact, &Sort::default(), 0, 10).unwrap();
    assert_eq!(total, 2);

    let partial = PlanFilter::builder()
        .equals(Field::UploaderName, "Doc")
        .build();
    let (total, _) = db.count_and_find(&partial, &Sort::default(), 0, 10).unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_sort_and_window() {
    let (_temp_file, mut db) = create_test_db();
    seed(&mut db);
    for _ in 0..3 {
        db.increment_views(&PlanId::from("c")).unwrap();
    }
    db.increment_views(&PlanId::from("a")).unwrap();

    let by_views = Sort {
        field: SortField::Views,
        direction: SortDirection::Descending,
    };
    let (total, plans) = db
        .count_and_find(&PlanFilter::default(), &by_views, 0, 2)
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(ids(&plans), ["c", "a"]);

    let (_, rest) = db
        .count_and_find(&PlanFilter::default(), &by_views, 2, 2)
        .unwrap();
    assert_eq!(ids(&rest), ["b"]);
}

#[test]
fn test_sort_by_updated_at() {
    let (_temp_file, mut db) = create_test_db();
    let base = Timestamp::now();
    for (id, offset) in [("x", 2), ("y", 0), ("z", 1)] {
        let mut plan = stored_plan(id, "Doctor", PlanContent::default());
        plan.updated_at = base + offset.hours();
        db.insert(&plan).unwrap();
    }

    let sort = Sort {
        field: SortField::UpdatedAt,
        direction: SortDirection::Ascending,
    };
    let (_, plans) = db
        .count_and_find(&PlanFilter::default(), &sort, 0, 10)
        .unwrap();
    assert_eq!(ids(&plans), ["y", "z", "x"]);
}
