//! Structural validation of plan content.

use crate::{
    error::{PlannerError, Result},
    models::{ActionType, PlanContent},
};

/// Maximum number of components in an action location.
pub const MAX_LOCATION_COMPONENTS: usize = 2;

/// Checks the embedded action list of a plan.
///
/// Fails on the first action that is a skill-usage action without a skill
/// usage value, or whose location has more than two components.
///
/// ```rust
/// use opbook_core::{
///     models::{Action, PlanContent},
///     validate::validate,
/// };
///
/// let mut action = Action::new("SkillUsage");
/// let mut content = PlanContent {
///     actions: Some(vec![action.clone()]),
///     ..Default::default()
/// };
/// assert!(validate(&content).is_err());
///
/// action.skill_usage = Some(1);
/// content.actions = Some(vec![action]);
/// assert!(validate(&content).is_ok());
/// ```
pub fn validate(content: &PlanContent) -> Result<()> {
    let Some(actions) = &content.actions else {
        return Ok(());
    };

    for (index, action) in actions.iter().enumerate() {
        if action.kind() == Some(ActionType::SkillUsage) && action.skill_usage.is_none() {
            return Err(PlannerError::invalid_action(index, "skill usage required"));
        }

        if action
            .location
            .as_ref()
            .is_some_and(|location| location.len() > MAX_LOCATION_COMPONENTS)
        {
            return Err(PlannerError::invalid_action(index, "invalid location format"));
        }
    }

    Ok(())
}
