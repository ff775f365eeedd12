//! In-process plan store.

use std::{cmp::Ordering, collections::BTreeMap};

use log::debug;
use regex::Regex;

use super::PlanStore;
use crate::{
    error::{PlannerError, Result},
    models::{Clause, Field, Plan, PlanFilter, PlanId, Sort, SortDirection, SortField},
};

/// Plan store that keeps everything in a map, keyed and ordered by id.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    plans: BTreeMap<PlanId, Plan>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.plans.len()
    }

    pub fn is_empty(&self) -> bool {
        self.plans.is_empty()
    }
}

fn field_values(plan: &Plan, field: Field) -> Vec<&str> {
    match field {
        Field::StageName => vec![plan.content.stage_name.as_str()],
        Field::DocumentTitle => vec![plan.content.document.title.as_str()],
        Field::DocumentDetails => vec![plan.content.document.details.as_str()],
        Field::OperatorName => plan.operator_names().collect(),
        Field::UploaderName => vec![plan.uploader_name.as_str()],
    }
}

fn evaluate(clause: &Clause, plan: &Plan) -> Result<bool> {
    match clause {
        Clause::Matches { field, pattern } => {
            let regex = Regex::new(pattern).map_err(|e| PlannerError::Storage {
                message: format!("invalid pattern for {}: {e}", field.path()),
            })?;
            Ok(field_values(plan, *field)
                .into_iter()
                .any(|value| regex.is_match(value)))
        }
        Clause::Equals { field, value } => Ok(field_values(plan, *field)
            .into_iter()
            .any(|candidate| candidate == value)),
        Clause::AnyOf(clauses) => {
            for nested in clauses {
                if evaluate(nested, plan)? {
                    return Ok(true);
                }
            }
            Ok(false)
        }
        Clause::Not(nested) => Ok(!evaluate(nested, plan)?),
    }
}

fn matches_filter(filter: &PlanFilter, plan: &Plan) -> Result<bool> {
    for clause in filter.clauses() {
        if !evaluate(clause, plan)? {
            return Ok(false);
        }
    }
    Ok(true)
}

fn compare(sort: &Sort, a: &Plan, b: &Plan) -> Ordering {
    let primary = match sort.field {
        SortField::Id => a.id.cmp(&b.id),
        SortField::Views => a.views.cmp(&b.views),
        SortField::CreatedAt => a.created_at.cmp(&b.created_at),
        SortField::UpdatedAt => a.updated_at.cmp(&b.updated_at),
        SortField::StageName => a.content.stage_name.cmp(&b.content.stage_name),
        SortField::Uploader => a.uploader_name.cmp(&b.uploader_name),
    };
    let primary = match sort.direction {
        SortDirection::Ascending => primary,
        SortDirection::Descending => primary.reverse(),
    };
    primary.then_with(|| a.id.cmp(&b.id))
}

impl PlanStore for MemoryStore {
    fn insert(&mut self, plan: &Plan) -> Result<()> {
        if self.plans.contains_key(&plan.id) {
            return Err(PlannerError::Storage {
                message: format!("duplicate plan id {}", plan.id),
            });
        }
        self.plans.insert(plan.id.clone(), plan.clone());
        Ok(())
    }

    fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>> {
        Ok(self.plans.get(id).cloned())
    }

    fn save(&mut self, plan: &Plan) -> Result<()> {
        let views = self.plans.get(&plan.id).map_or(plan.views, |stored| stored.views);
        self.plans.insert(
            plan.id.clone(),
            Plan {
                views,
                ..plan.clone()
            },
        );
        Ok(())
    }

    fn delete_by_id(&mut self, id: &PlanId) -> Result<()> {
        self.plans.remove(id);
        Ok(())
    }

    fn increment_views(&mut self, id: &PlanId) -> Result<()> {
        if let Some(plan) = self.plans.get_mut(id) {
            plan.views += 1;
        }
        Ok(())
    }

    fn count_and_find(
        &self,
        filter: &PlanFilter,
        sort: &Sort,
        offset: u64,
        size: u64,
    ) -> Result<(u64, Vec<Plan>)> {
        let mut matched = Vec::new();
        for plan in self.plans.values() {
            if matches_filter(filter, plan)? {
                matched.push(plan);
            }
        }
        matched.sort_by(|a, b| compare(sort, a, b));

        let total = matched.len() as u64;
        let page = matched
            .into_iter()
            .skip(usize::try_from(offset).unwrap_or(usize::MAX))
            .take(usize::try_from(size).unwrap_or(usize::MAX))
            .cloned()
            .collect::<Vec<_>>();

        debug!("memory store matched {total} plans, returning {}", page.len());
        Ok((total, page))
    }
}
