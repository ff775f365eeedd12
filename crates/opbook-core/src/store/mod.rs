//! Store gateway contract.
//!
//! The plan service talks to persistent storage only through [`PlanStore`].
//! Implementations translate the abstract [`PlanFilter`] into their own query
//! language.
//!
//! - [`crate::db::Database`]: SQLite-backed store used by the
//!   [`crate::Planner`]
//! - [`MemoryStore`]: in-process store, handy for embedding and tests

use crate::{
    error::Result,
    models::{Plan, PlanFilter, PlanId, Sort},
};

pub mod memory;

pub use memory::MemoryStore;

/// Operations the plan service needs from a document store.
pub trait PlanStore {
    /// Inserts a new plan. Fails if the id is already taken.
    fn insert(&mut self, plan: &Plan) -> Result<()>;

    /// Fetches a plan by id.
    fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>>;

    /// Upserts a plan by id, replacing every stored field except `views`.
    fn save(&mut self, plan: &Plan) -> Result<()>;

    /// Removes a plan. Deleting a missing id is not an error.
    fn delete_by_id(&mut self, id: &PlanId) -> Result<()>;

    /// Atomically adds one to the view counter of a plan.
    fn increment_views(&mut self, id: &PlanId) -> Result<()>;

    /// Counts every plan matching `filter` and fetches one sorted window of
    /// at most `size` plans starting at `offset`.
    fn count_and_find(
        &self,
        filter: &PlanFilter,
        sort: &Sort,
        offset: u64,
        size: u64,
    ) -> Result<(u64, Vec<Plan>)>;
}
