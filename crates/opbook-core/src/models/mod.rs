//! Data models for plans, actions and search.
//!
//! This module contains the core domain models of the opbook system. Display
//! implementations for these models are located in [`crate::display::models`]
//! to keep data structures separate from presentation logic.
//!
//! - [`plan`]: the stored [`Plan`] and its client-editable [`PlanContent`]
//! - [`action`]: embedded [`Action`]s and the [`ActionType`] alias table
//! - [`user`]: caller identity
//! - [`filters`]: store-agnostic search filters and sort options
//! - [`page`]: pagination request and result
//!
//! # Examples
//!
//! ```rust
//! use opbook_core::models::{Action, ActionType, PlanContent};
//!
//! let content: PlanContent = serde_json::from_str(
//!     r#"{
//!         "stageName": "1-7",
//!         "doc": { "title": "Low rarity clear" },
//!         "operators": [{ "name": "Amiya", "skill": 1 }],
//!         "actions": [{ "type": "技能用法", "skillUsage": 1 }]
//!     }"#,
//! )
//! .unwrap();
//!
//! assert_eq!(content.document.title, "Low rarity clear");
//! let actions = content.actions.unwrap_or_default();
//! assert_eq!(actions[0].kind(), Some(ActionType::SkillUsage));
//! assert_eq!(Action::default().kind(), Some(ActionType::Deploy));
//! ```

pub mod action;
pub mod filters;
pub mod page;
pub mod plan;
pub mod user;


pub use action::{Action, ActionType};
pub use filters::{Clause, Field, FilterBuilder, PlanFilter, Sort, SortDirection, SortField};
pub use page::{DEFAULT_LIMIT, DEFAULT_PAGE, PageRequest, PlanPage};
pub use plan::{Operator, Plan, PlanContent, PlanDocument, PlanId};
pub use user::User;
