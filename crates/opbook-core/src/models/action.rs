//! Embedded plan actions and the action type alias table.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Closed set of recognized action discriminators.
///
/// Every type has a canonical spelling plus the localized spelling that
/// plans in the wild also use. Matching is exact and case-sensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ActionType {
    Deploy,
    Skill,
    Retreat,
    SpeedUp,
    BulletTime,
    SkillUsage,
    Output,
    SkillDaemon,
    MoveCamera,
    DrawCard,
    CheckIfStartOver,
}

impl ActionType {
    pub const ALL: [ActionType; 11] = [
        ActionType::Deploy,
        ActionType::Skill,
        ActionType::Retreat,
        ActionType::SpeedUp,
        ActionType::BulletTime,
        ActionType::SkillUsage,
        ActionType::Output,
        ActionType::SkillDaemon,
        ActionType::MoveCamera,
        ActionType::DrawCard,
        ActionType::CheckIfStartOver,
    ];

    /// Accepted spellings, canonical first.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            ActionType::Deploy => &["Deploy", "部署"],
            ActionType::Skill => &["Skill", "技能"],
            ActionType::Retreat => &["Retreat", "撤退"],
            ActionType::SpeedUp => &["SpeedUp", "二倍速"],
            ActionType::BulletTime => &["BulletTime", "子弹时间"],
            ActionType::SkillUsage => &["SkillUsage", "技能用法"],
            ActionType::Output => &["Output", "打印"],
            ActionType::SkillDaemon => &["SkillDaemon", "摆完挂机"],
            ActionType::MoveCamera => &["MoveCamera", "移动镜头"],
            ActionType::DrawCard => &["DrawCard", "抽卡"],
            ActionType::CheckIfStartOver => &["CheckIfStartOver", "检查重开"],
        }
    }

    /// Canonical spelling.
    pub fn as_str(self) -> &'static str {
        self.aliases()[0]
    }

    /// Resolves any accepted spelling to its type.
    pub fn from_alias(spelling: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.aliases().contains(&spelling))
    }
}

impl FromStr for ActionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_alias(s).ok_or_else(|| format!("Unknown action type: {s}"))
    }
}

fn default_action_type() -> String {
    ActionType::Deploy.as_str().to_string()
}

/// A single step of in-plan behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Action {
    /// Raw discriminator as submitted; see [`Action::kind`]
    #[serde(rename = "type", default = "default_action_type")]
    pub action_type: String,

    /// Operator the action applies to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Skill usage mode, required for skill-usage actions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skill_usage: Option<u32>,

    /// Map coordinates, at most two components
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Vec<i32>>,

    /// Free-text note
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doc: Option<String>,
}

impl Action {
    /// Creates an action with the given raw type and no optional fields.
    pub fn new(action_type: impl Into<String>) -> Self {
        Self {
            action_type: action_type.into(),
            name: None,
            skill_usage: None,
            location: None,
            doc: None,
        }
    }

    /// Resolves the discriminator through the alias table.
    pub fn kind(&self) -> Option<ActionType> {
        ActionType::from_alias(&self.action_type)
    }
}

impl Default for Action {
    fn default() -> Self {
        Self::new(default_action_type())
    }
}
