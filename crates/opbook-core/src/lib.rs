//! Core library for the opbook operation plan manager.
//!
//! This crate holds the business logic for sharing operation plans: content
//! validation, the plan service (upload, view, update, delete, search), the
//! store gateway with its SQLite and in-memory implementations, and the
//! data models and their markdown rendering.
//!
//! # Layers
//!
//! - **Models** ([`models`]): plans, actions, filters and pages; each
//!   implements [`std::fmt::Display`] via [`display`]
//! - **Operations** ([`operations`]): synchronous service functions over any
//!   [`store::PlanStore`]
//! - **Planner** ([`planner`]): async facade over the SQLite store for
//!   application layers
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use opbook_core::{PlannerBuilder, models::User};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let planner = PlannerBuilder::new()
//!     .with_database_path("opbook.db")
//!     .build()
//!     .await?;
//!
//! let user = User::new("u1", "Doctor");
//! let id = planner
//!     .upload_raw(&user, r#"{"stageName": "1-7", "operators": [{"name": "Amiya"}]}"#)
//!     .await?;
//!
//! let plan = planner.get_by_id(&id).await?;
//! println!("{plan}");
//! # Ok(())
//! # }
//! ```

pub mod db;
pub mod display;
pub mod error;
pub mod models;
pub mod operations;
pub mod params;
pub mod planner;
pub mod store;
pub mod validate;

// Re-export commonly used types
pub use db::Database;
pub use display::{LocalDateTime, OperationStatus};
pub use error::{ErrorKind, PlannerError, Result};
pub use models::{
    Action, ActionType, Operator, Plan, PlanContent, PlanDocument, PlanFilter, PlanId, PlanPage,
    User,
};
pub use params::{SearchPlans, UpdatePlan};
pub use planner::{Planner, PlannerBuilder};
pub use store::{MemoryStore, PlanStore};
pub use validate::validate;
