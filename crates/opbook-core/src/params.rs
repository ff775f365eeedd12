//! Parameter structures for opbook operations
//!
//! This module contains shared parameter structures used across interfaces
//! (CLI, library callers) without framework-specific derives. Interface
//! layers define their own argument types and convert into these:
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │    │   Operations    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (plan service)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! Field names serialize in camelCase so a JSON request body maps directly
//! onto these types.

use serde::{Deserialize, Serialize};

use crate::models::{PageRequest, PlanContent, PlanId};

/// Criteria for a paginated plan search.
///
/// Every criterion is optional; empty strings are treated as absent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPlans {
    /// Pattern matched against the stage name
    pub level_keyword: Option<String>,
    /// Pattern matched against the document title or details
    pub document: Option<String>,
    /// Comma-separated operator names; `~name` excludes
    pub operator: Option<String>,
    /// Exact uploader name
    pub uploader: Option<String>,
    /// 1-based page index
    pub page: Option<i64>,
    /// Page size
    pub limit: Option<i64>,
    /// Sort field name (defaults to `id`)
    pub order_by: Option<String>,
    /// Sort descending instead of ascending
    #[serde(default)]
    pub desc: bool,
}

impl SearchPlans {
    /// The normalized pagination window for these criteria.
    pub fn page_request(&self) -> PageRequest {
        PageRequest::new(self.page, self.limit)
    }
}

/// Parameters for replacing the content of an existing plan.
///
/// The content is a complete replacement: fields left out are not merged
/// with the stored plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePlan {
    /// ID of the plan to update
    pub id: PlanId,
    /// New content
    #[serde(flatten)]
    pub content: PlanContent,
}
