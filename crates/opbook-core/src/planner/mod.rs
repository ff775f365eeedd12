//! High-level async planner API.
//!
//! [`Planner`] is the entry point application layers use. Each call opens a
//! fresh SQLite connection on a blocking worker thread, runs the matching
//! function from [`crate::operations`], and drops the connection again; no
//! state is shared between calls.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │     Planner     │    │   Operations    │    │    Database     │
//! │  (async facade) │───▶│ (plan service)  │───▶│  (PlanStore)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! # Usage Examples
//!
//! ```rust,no_run
//! use opbook_core::{
//!     PlannerBuilder,
//!     models::{PlanContent, User},
//!     params::SearchPlans,
//! };
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("/tmp/opbook.db")
//!     .build()
//!     .await?;
//!
//! let user = User::new("u1", "Doctor");
//! let id = planner
//!     .upload(&user, PlanContent {
//!         stage_name: "1-7".to_string(),
//!         ..Default::default()
//!     })
//!     .await?;
//!
//! let plan = planner.get_by_id(&id).await?;
//! let page = planner
//!     .search(&SearchPlans {
//!         level_keyword: Some("1-".to_string()),
//!         ..Default::default()
//!     })
//!     .await?;
//! # Ok(())
//! # }
//! ```

use std::path::{Path, PathBuf};

use tokio::task;

use crate::{
    db::Database,
    error::{PlannerError, Result},
};

pub mod builder;
pub mod plan_ops;


pub use builder::PlannerBuilder;

/// Main planner interface for managing plans.
pub struct Planner {
    pub(crate) db_path: PathBuf,
}

impl Planner {
    /// Creates a new planner with the specified database path.
    pub(crate) fn new(db_path: PathBuf) -> Self {
        Self { db_path }
    }

    /// Path of the backing database file.
    pub fn database_path(&self) -> &Path {
        &self.db_path
    }

    /// Runs `op` against a freshly opened database on a blocking thread.
    pub(crate) async fn with_database<T, F>(&self, op: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&mut Database) -> Result<T> + Send + 'static,
    {
        let db_path = self.db_path.clone();

        task::spawn_blocking(move || {
            let mut db = Database::new(&db_path)?;
            op(&mut db)
        })
        .await
        .map_err(|e| PlannerError::Configuration {
            message: format!("Task join error: {e}"),
        })?
    }
}
