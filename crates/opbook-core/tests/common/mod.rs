#![allow(dead_code)]

use opbook_core::{
    Operator, PlanContent, PlannerBuilder,
    models::{Action, PlanDocument},
};
use tempfile::TempDir;

/// Helper function to create a test planner
pub async fn create_test_planner() -> (TempDir, opbook_core::Planner) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let planner = PlannerBuilder::new()
        .with_database_path(&db_path)
        .build()
        .await
        .expect("Failed to create planner");
    (temp_dir, planner)
}

/// Plan content with the given stage, title and operator names.
pub fn plan_content(stage: &str, title: &str, operators: &[&str]) -> PlanContent {
    PlanContent {
        stage_name: stage.to_string(),
        document: PlanDocument {
            title: title.to_string(),
            details: String::new(),
        },
        operators: operators.iter().map(|name| Operator::new(*name)).collect(),
        actions: Some(vec![Action::default()]),
    }
}
