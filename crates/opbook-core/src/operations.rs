//! Plan service operations.
//!
//! Every operation is a synchronous function over any [`PlanStore`], so the
//! same business rules run against SQLite (through [`crate::Planner`]) and
//! against [`crate::store::MemoryStore`].
//!
//! # Examples
//!
//! ```rust
//! use opbook_core::{
//!     models::{PlanContent, User},
//!     operations,
//!     params::SearchPlans,
//!     store::MemoryStore,
//! };
//!
//! let mut store = MemoryStore::new();
//! let user = User::new("u1", "Doctor");
//!
//! let id = operations::upload(
//!     &mut store,
//!     &user,
//!     PlanContent {
//!         stage_name: "1-7".to_string(),
//!         ..Default::default()
//!     },
//! )
//! .unwrap();
//!
//! let plan = operations::get_by_id(&mut store, &id).unwrap();
//! assert_eq!(plan.uploader_name, "Doctor");
//!
//! let page = operations::search(&store, &SearchPlans::default()).unwrap();
//! assert_eq!(page.total, 1);
//! ```

use jiff::Timestamp;
use log::{debug, error, info, warn};

use crate::{
    error::{PlannerError, Result},
    models::{Plan, PlanContent, PlanFilter, PlanId, PlanPage, Sort, User},
    params::{SearchPlans, UpdatePlan},
    store::PlanStore,
    validate::validate,
};

/// Whether `user` may modify or delete `plan`.
pub fn can_mutate(user: &User, plan: &Plan) -> bool {
    plan.uploader_id == user.id
}

fn find_existing<S: PlanStore + ?Sized>(store: &S, id: &PlanId) -> Result<Plan> {
    debug!("Fetching plan {id}");
    store
        .find_by_id(id)?
        .ok_or_else(|| PlannerError::PlanNotFound { id: id.clone() })
}

fn validated(content: &PlanContent) -> Result<()> {
    validate(content).inspect_err(|e| warn!("Rejected plan content: {e}"))
}

/// Stores new content under a fresh id owned by `user` and returns the id.
pub fn upload<S: PlanStore + ?Sized>(
    store: &mut S,
    user: &User,
    content: PlanContent,
) -> Result<PlanId> {
    validated(&content)?;

    let now = Timestamp::now();
    let plan = Plan {
        id: PlanId::generate(),
        uploader_id: user.id.clone(),
        uploader_name: user.name.clone(),
        content,
        views: 0,
        created_at: now,
        updated_at: now,
    };

    store.insert(&plan)?;
    info!("User {} uploaded plan {}", user.id, plan.id);
    Ok(plan.id)
}

fn parse_content(user: &User, raw: &str) -> Result<PlanContent> {
    serde_json::from_str(raw).map_err(|e| {
        error!("Failed to parse plan from user {}: {e}", user.id);
        PlannerError::from(e)
    })
}

/// Parses a raw JSON payload and uploads it.
pub fn upload_raw<S: PlanStore + ?Sized>(store: &mut S, user: &User, raw: &str) -> Result<PlanId> {
    let content = parse_content(user, raw)?;
    upload(store, user, content)
}

/// Fetches a plan and records one view.
///
/// The returned snapshot is read before the increment, so its `views` does
/// not include this call.
pub fn get_by_id<S: PlanStore + ?Sized>(store: &mut S, id: &PlanId) -> Result<Plan> {
    let plan = find_existing(&*store, id)?;
    store.increment_views(id)?;
    Ok(plan)
}

fn owned_for_update<S: PlanStore + ?Sized>(store: &S, user: &User, id: &PlanId) -> Result<Plan> {
    let existing = find_existing(store, id)?;

    if !can_mutate(user, &existing) {
        warn!("User {} tried to modify plan {}", user.id, existing.id);
        return Err(PlannerError::forbidden("cannot modify another user's plan"));
    }
    Ok(existing)
}

fn replace_content<S: PlanStore + ?Sized>(
    store: &mut S,
    user: &User,
    existing: Plan,
    content: PlanContent,
) -> Result<Plan> {
    validated(&content)?;

    let plan = Plan {
        content,
        updated_at: Timestamp::now().max(existing.updated_at),
        ..existing
    };

    store.save(&plan)?;
    info!("User {} updated plan {}", user.id, plan.id);
    Ok(plan)
}

/// Replaces the content of a plan owned by `user` and returns the stored
/// result.
///
/// Identity, ownership, creation time and the view counter are carried over
/// from the stored plan; everything else comes from `params.content`.
pub fn update<S: PlanStore + ?Sized>(
    store: &mut S,
    user: &User,
    params: UpdatePlan,
) -> Result<Plan> {
    let existing = owned_for_update(&*store, user, &params.id)?;
    replace_content(store, user, existing, params.content)
}

/// Like [`update`], with the new content given as a raw JSON payload.
///
/// The payload is parsed only after the plan is found and ownership is
/// confirmed, so a missing or foreign plan is reported before a malformed
/// body.
pub fn update_raw<S: PlanStore + ?Sized>(
    store: &mut S,
    user: &User,
    id: &PlanId,
    raw: &str,
) -> Result<Plan> {
    let existing = owned_for_update(&*store, user, id)?;
    let content = parse_content(user, raw)?;
    replace_content(store, user, existing, content)
}

/// Permanently removes a plan owned by `user`.
pub fn delete<S: PlanStore + ?Sized>(store: &mut S, user: &User, id: &PlanId) -> Result<()> {
    let existing = find_existing(&*store, id)?;

    if !can_mutate(user, &existing) {
        warn!("User {} tried to delete plan {}", user.id, existing.id);
        return Err(PlannerError::forbidden("cannot delete another user's plan"));
    }

    store.delete_by_id(id)?;
    info!("User {} deleted plan {id}", user.id);
    Ok(())
}

/// Runs a paginated multi-criteria search.
pub fn search<S: PlanStore + ?Sized>(store: &S, criteria: &SearchPlans) -> Result<PlanPage> {
    let request = criteria.page_request();
    let sort = Sort::try_from(criteria)?;
    let filter = PlanFilter::try_from(criteria)?;

    debug!(
        "Searching plans: {} clauses, page {} of size {}, {:?}",
        filter.clauses().len(),
        request.page,
        request.limit,
        sort
    );

    let (total, data) = store.count_and_find(&filter, &sort, request.offset(), request.limit)?;
    Ok(PlanPage::new(total, request, data))
}
