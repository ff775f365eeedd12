//! Plan model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Action;

/// Opaque, globally unique plan identifier.
///
/// Identifiers are minted by the service at upload time and are time-ordered,
/// so sorting by id approximates sorting by creation time.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlanId(String);

impl PlanId {
    /// Mints a fresh identifier.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().simple().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for PlanId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for PlanId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl AsRef<str> for PlanId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Free-text description attached to a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct PlanDocument {
    /// Short headline
    #[serde(default)]
    pub title: String,

    /// Longer explanation
    #[serde(default)]
    pub details: String,
}

/// An operator referenced by a plan.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    /// Operator name, used for inclusion/exclusion search
    pub name: String,

    /// Skill slot the plan uses
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill: Option<u32>,

    /// Skill usage mode
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_usage: Option<u32>,
}

impl Operator {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// The client-editable body of a plan.
///
/// Uploads and updates carry only this part; identity, ownership, counters
/// and timestamps are owned by the service.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlanContent {
    /// Stage label, matched by the level keyword search
    #[serde(default)]
    pub stage_name: String,

    /// Title and details text, `doc` on the wire
    #[serde(default, rename = "doc", alias = "document")]
    pub document: PlanDocument,

    /// Operators used by the plan
    #[serde(default)]
    pub operators: Vec<Operator>,

    /// Ordered in-plan actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<Vec<Action>>,
}

/// Represents a stored plan with ownership and bookkeeping metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// Unique identifier for the plan
    pub id: PlanId,

    /// ID of the uploading user; the authorization key
    pub uploader_id: String,

    /// Display name of the uploading user
    pub uploader_name: String,

    /// Client-supplied content
    #[serde(flatten)]
    pub content: PlanContent,

    /// Number of times the plan has been fetched
    #[serde(default)]
    pub views: u64,

    /// Timestamp when the plan was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the plan was last modified (UTC)
    pub updated_at: Timestamp,
}

impl Plan {
    /// Names of all operators in the plan, in order.
    pub fn operator_names(&self) -> impl Iterator<Item = &str> {
        self.content.operators.iter().map(|o| o.name.as_str())
    }
}
