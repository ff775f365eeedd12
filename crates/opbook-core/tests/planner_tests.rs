use opbook_core::{
    Database, ErrorKind, MemoryStore, PlanContent, PlanId, PlanStore, SearchPlans, UpdatePlan,
    User,
    models::{Action, ActionType},
    operations,
};

mod common;

fn doctor() -> User {
    User::new("u1", "Doctor")
}

fn stranger() -> User {
    User::new("u2", "Kal'tsit")
}

fn search_operator(operator: &str) -> SearchPlans {
    SearchPlans {
        operator: Some(operator.to_string()),
        ..Default::default()
    }
}

/// Runs `check` against both store implementations.
fn with_each_store(check: impl Fn(&mut dyn PlanStore)) {
    let mut memory = MemoryStore::new();
    check(&mut memory);

    let mut db = Database::open_in_memory().expect("Failed to open database");
    check(&mut db);
}

#[test]
fn test_upload_assigns_ownership_and_fresh_ids() {
    with_each_store(|store| {
        let content = common::plan_content("1-7", "T", &["Amiya"]);
        let first = operations::upload(store, &doctor(), content.clone()).unwrap();
        let second = operations::upload(store, &doctor(), content).unwrap();
        assert_ne!(first, second);

        let plan = operations::get_by_id(store, &first).unwrap();
        assert_eq!(plan.uploader_id, "u1");
        assert_eq!(plan.uploader_name, "Doctor");
        assert_eq!(plan.views, 0);
        assert_eq!(plan.created_at, plan.updated_at);
    });
}

#[test]
fn test_upload_rejects_invalid_actions() {
    with_each_store(|store| {
        let content = PlanContent {
            actions: Some(vec![
                Action::default(),
                Action::new(ActionType::SkillUsage.as_str()),
            ]),
            ..Default::default()
        };

        let err = operations::upload(store, &doctor(), content).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
        assert_eq!(err.to_string(), "Invalid action #1: skill usage required");

        let content = PlanContent {
            actions: Some(vec![Action {
                location: Some(vec![1, 2, 3]),
                ..Action::default()
            }]),
            ..Default::default()
        };
        let err = operations::upload(store, &doctor(), content).unwrap_err();
        assert!(err.to_string().contains("invalid location format"));

        let (total, _) = store
            .count_and_find(&Default::default(), &Default::default(), 0, 10)
            .unwrap();
        assert_eq!(total, 0);
    });
}

#[test]
fn test_upload_raw() {
    with_each_store(|store| {
        let raw = r#"{
            "stageName": "1-7",
            "doc": { "title": "Raw", "details": "from json" },
            "operators": [{ "name": "Amiya", "skill": 1 }],
            "actions": [{ "type": "技能用法", "skillUsage": 2 }, { "name": "Amiya" }]
        }"#;
        let id = operations::upload_raw(store, &doctor(), raw).unwrap();

        let plan = operations::get_by_id(store, &id).unwrap();
        assert_eq!(plan.content.document.title, "Raw");
        let actions = plan.content.actions.unwrap_or_default();
        assert_eq!(actions[0].kind(), Some(ActionType::SkillUsage));
        assert_eq!(actions[1].action_type, "Deploy");

        let err = operations::upload_raw(store, &doctor(), "[1, 2").unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = operations::upload_raw(store, &doctor(), r#"{"operators": 5}"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);
    });
}

#[test]
fn test_get_by_id_increments_views() {
    with_each_store(|store| {
        let id = operations::upload(store, &doctor(), PlanContent::default()).unwrap();

        for expected in 0..3 {
            let plan = operations::get_by_id(store, &id).unwrap();
            assert_eq!(plan.views, expected);
        }

        let err = operations::get_by_id(store, &PlanId::from("missing")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    });
}

#[test]
fn test_update_by_owner() {
    with_each_store(|store| {
        let id = operations::upload(
            store,
            &doctor(),
            common::plan_content("1-7", "Old", &["Amiya"]),
        )
        .unwrap();
        let before = operations::get_by_id(store, &id).unwrap();

        let updated = operations::update(
            store,
            &doctor(),
            UpdatePlan {
                id: id.clone(),
                content: common::plan_content("1-8", "New", &["Kroos"]),
            },
        )
        .unwrap();

        assert_eq!(updated.id, id);
        assert_eq!(updated.content.stage_name, "1-8");
        assert_eq!(updated.created_at, before.created_at);
        assert!(updated.updated_at >= before.updated_at);

        // Views counted before the update survive it
        let after = operations::get_by_id(store, &id).unwrap();
        assert_eq!(after.views, 1);
        assert_eq!(after.content.document.title, "New");
    });
}

#[test]
fn test_update_checks_existence_then_ownership_then_content() {
    with_each_store(|store| {
        let invalid = PlanContent {
            actions: Some(vec![Action::new("SkillUsage")]),
            ..Default::default()
        };

        let missing = UpdatePlan {
            id: PlanId::from("missing"),
            content: invalid.clone(),
        };
        let err = operations::update(store, &stranger(), missing).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let id = operations::upload(store, &doctor(), PlanContent::default()).unwrap();
        let foreign = UpdatePlan {
            id: id.clone(),
            content: invalid.clone(),
        };
        let err = operations::update(store, &stranger(), foreign).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let own = UpdatePlan {
            id: id.clone(),
            content: invalid,
        };
        let err = operations::update(store, &doctor(), own).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let plan = operations::get_by_id(store, &id).unwrap();
        assert!(plan.content.actions.is_none());
    });
}

#[test]
fn test_update_raw_checks_plan_before_payload() {
    with_each_store(|store| {
        let broken = "{ \"stageName\": ";
        let invalid = r#"{ "actions": [{ "type": "SkillUsage" }] }"#;

        let err =
            operations::update_raw(store, &doctor(), &PlanId::from("missing"), broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let id = operations::upload(
            store,
            &doctor(),
            common::plan_content("1-7", "Old", &["Amiya"]),
        )
        .unwrap();

        let err = operations::update_raw(store, &stranger(), &id, broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);

        let err = operations::update_raw(store, &doctor(), &id, broken).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Parse);

        let err = operations::update_raw(store, &doctor(), &id, invalid).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let updated =
            operations::update_raw(store, &doctor(), &id, r#"{ "stageName": "1-8" }"#).unwrap();
        assert_eq!(updated.id, id);
        assert_eq!(updated.uploader_id, "u1");
        assert_eq!(updated.content.stage_name, "1-8");
        assert!(updated.content.operators.is_empty());
    });
}

#[test]
fn test_delete_ownership() {
    with_each_store(|store| {
        let id = operations::upload(store, &doctor(), PlanContent::default()).unwrap();

        let err = operations::delete(store, &stranger(), &id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Forbidden);
        assert!(operations::get_by_id(store, &id).is_ok());

        operations::delete(store, &doctor(), &id).unwrap();
        let err = operations::get_by_id(store, &id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);

        let err = operations::delete(store, &doctor(), &id).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::NotFound);
    });
}

#[test]
fn test_search_operator_composition() {
    with_each_store(|store| {
        let amiya = operations::upload(
            store,
            &doctor(),
            common::plan_content("1-7", "Solo", &["Amiya"]),
        )
        .unwrap();
        operations::upload(
            store,
            &doctor(),
            common::plan_content("1-8", "Duo", &["Amiya", "Silverash"]),
        )
        .unwrap();
        operations::upload(
            store,
            &stranger(),
            common::plan_content("2-1", "Other", &["Kroos"]),
        )
        .unwrap();

        let page = operations::search(&*store, &search_operator("Amiya,~Silverash")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, amiya);

        let page = operations::search(&*store, &search_operator("Amiya")).unwrap();
        assert_eq!(page.total, 2);

        let page = operations::search(&*store, &search_operator("~Amiya")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].content.stage_name, "2-1");

        let page = operations::search(
            &*store,
            &SearchPlans {
                uploader: Some("Kal'tsit".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(page.total, 1);

        let page = operations::search(
            &*store,
            &SearchPlans {
                document: Some("uo".to_string()),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].content.stage_name, "1-8");
    });
}

#[test]
fn test_search_operator_includes_and_excludes_each_name() {
    with_each_store(|store| {
        let amiya = operations::upload(
            store,
            &doctor(),
            common::plan_content("1-7", "With Amiya", &["Amiya"]),
        )
        .unwrap();
        let silverash = operations::upload(
            store,
            &doctor(),
            common::plan_content("1-7", "With Silverash", &["Silverash"]),
        )
        .unwrap();

        let page = operations::search(&*store, &search_operator("Amiya")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, amiya);

        let page = operations::search(&*store, &search_operator("~Amiya")).unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.data[0].id, silverash);

        // Every included name must be present on the same plan
        let page = operations::search(&*store, &search_operator("Amiya,Silverash")).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());

        let page = operations::search(&*store, &search_operator("~Amiya,~Silverash")).unwrap();
        assert_eq!(page.total, 0);
        assert!(page.data.is_empty());
    });
}

#[test]
fn test_search_pagination() {
    with_each_store(|store| {
        for index in 0..25 {
            operations::upload(
                store,
                &doctor(),
                common::plan_content(&format!("1-{index}"), "T", &["Amiya"]),
            )
            .unwrap();
        }

        let first = operations::search(
            &*store,
            &SearchPlans {
                page: Some(1),
                limit: Some(10),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(first.total, 25);
        assert_eq!(first.page, 3);
        assert!(first.has_next);
        assert_eq!(first.data.len(), 10);

        let last = operations::search(
            &*store,
            &SearchPlans {
                page: Some(3),
                limit: Some(10),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(!last.has_next);
        assert_eq!(last.data.len(), 5);

        let coerced = operations::search(
            &*store,
            &SearchPlans {
                page: Some(0),
                limit: Some(-3),
                ..Default::default()
            },
        )
        .unwrap();
        assert_eq!(coerced.data.len(), 10);
        assert_eq!(coerced.data, first.data);

        let beyond = operations::search(
            &*store,
            &SearchPlans {
                page: Some(9),
                ..Default::default()
            },
        )
        .unwrap();
        assert!(beyond.data.is_empty());
        assert_eq!(beyond.total, 25);
    });
}

#[test]
fn test_search_rejects_bad_input() {
    with_each_store(|store| {
        let err = operations::search(&*store, &search_operator("(")).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);

        let err = operations::search(
            &*store,
            &SearchPlans {
                order_by: Some("hotness".to_string()),
                ..Default::default()
            },
        )
        .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Validation);
    });
}

#[tokio::test]
async fn test_planner_persists_across_connections() {
    let (_temp_dir, planner) = common::create_test_planner().await;

    let id = planner
        .upload(&doctor(), common::plan_content("1-7", "T", &["Amiya"]))
        .await
        .expect("Failed to upload");

    let reopened = opbook_core::PlannerBuilder::new()
        .with_database_path(planner.database_path())
        .build()
        .await
        .expect("Failed to reopen planner");

    let plan = reopened.get_by_id(&id).await.expect("Plan should persist");
    assert_eq!(plan.content.stage_name, "1-7");

    let page = reopened
        .search(&search_operator("Amiya"))
        .await
        .expect("Search should succeed");
    assert_eq!(page.total, 1);
}
