//! Plan operations for the Planner.

use super::Planner;
use crate::{
    error::Result,
    models::{Plan, PlanContent, PlanId, PlanPage, User},
    operations,
    params::{SearchPlans, UpdatePlan},
};

impl Planner {
    /// Uploads new plan content owned by `user` and returns the generated id.
    ///
    /// # Errors
    ///
    /// `PlannerError::InvalidAction` if an action is malformed,
    /// `PlannerError::Database` if the insert fails.
    pub async fn upload(&self, user: &User, content: PlanContent) -> Result<PlanId> {
        let user = user.clone();
        self.with_database(move |db| operations::upload(db, &user, content))
            .await
    }

    /// Uploads a raw JSON plan payload.
    ///
    /// # Errors
    ///
    /// `PlannerError::Parse` if the payload is not a well-formed plan, then
    /// the same errors as [`Planner::upload`].
    pub async fn upload_raw(&self, user: &User, raw: &str) -> Result<PlanId> {
        let user = user.clone();
        let raw = raw.to_string();
        self.with_database(move |db| operations::upload_raw(db, &user, &raw))
            .await
    }

    /// Retrieves a plan by id and counts one view.
    ///
    /// # Errors
    ///
    /// `PlannerError::PlanNotFound` if no plan has this id.
    pub async fn get_by_id(&self, id: &PlanId) -> Result<Plan> {
        let id = id.clone();
        self.with_database(move |db| operations::get_by_id(db, &id))
            .await
    }

    /// Replaces the content of a plan owned by `user`.
    ///
    /// # Errors
    ///
    /// `PlannerError::PlanNotFound`, then `PlannerError::Forbidden` for a
    /// plan uploaded by someone else, then `PlannerError::InvalidAction`.
    pub async fn update(&self, user: &User, params: UpdatePlan) -> Result<Plan> {
        let user = user.clone();
        self.with_database(move |db| operations::update(db, &user, params))
            .await
    }

    /// Replaces the content of a plan owned by `user` from a raw JSON
    /// payload.
    ///
    /// # Errors
    ///
    /// `PlannerError::PlanNotFound`, then `PlannerError::Forbidden`, then
    /// `PlannerError::Parse`, then `PlannerError::InvalidAction`.
    pub async fn update_raw(&self, user: &User, id: &PlanId, raw: &str) -> Result<Plan> {
        let user = user.clone();
        let id = id.clone();
        let raw = raw.to_string();
        self.with_database(move |db| operations::update_raw(db, &user, &id, &raw))
            .await
    }

    /// Permanently deletes a plan owned by `user`.
    ///
    /// # Errors
    ///
    /// `PlannerError::PlanNotFound`, then `PlannerError::Forbidden`.
    pub async fn delete(&self, user: &User, id: &PlanId) -> Result<()> {
        let user = user.clone();
        let id = id.clone();
        self.with_database(move |db| operations::delete(db, &user, &id))
            .await
    }

    /// Runs a paginated search.
    ///
    /// # Errors
    ///
    /// `PlannerError::InvalidInput` for an unknown sort field or a pattern
    /// that is not a valid regular expression.
    pub async fn search(&self, criteria: &SearchPlans) -> Result<PlanPage> {
        let criteria = criteria.clone();
        self.with_database(move |db| operations::search(&*db, &criteria))
            .await
    }
}
