//! Display implementations for domain models.
//!
//! Plans render as markdown: a header with the stage and title, a metadata
//! list, the document details, then operators and actions. Search pages
//! render a compact entry per plan followed by pagination info.

use std::fmt;

use jiff::{Timestamp, tz::TimeZone};

use crate::models::{Action, ActionType, Plan, PlanId, PlanPage};

/// Formats a timestamp in the system time zone as `YYYY-MM-DD HH:MM:SS TZ`.
pub struct LocalDateTime<'a>(pub &'a Timestamp);

impl fmt::Display for LocalDateTime<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let zoned = self.0.to_zoned(TimeZone::system());
        write!(f, "{}", zoned.strftime("%Y-%m-%d %H:%M:%S %Z"))
    }
}

impl fmt::Display for PlanId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for ActionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind() {
            Some(kind) => write!(f, "{kind}")?,
            None => write!(f, "{}", self.action_type)?,
        }
        if let Some(name) = &self.name {
            write!(f, " {name}")?;
        }
        if let Some(location) = &self.location {
            let coords: Vec<String> = location.iter().map(i32::to_string).collect();
            write!(f, " at ({})", coords.join(", "))?;
        }
        if let Some(usage) = self.skill_usage {
            write!(f, " [skill usage {usage}]")?;
        }
        if let Some(doc) = &self.doc {
            write!(f, ": {doc}")?;
        }
        Ok(())
    }
}

impl Plan {
    fn heading(&self) -> String {
        let title = &self.content.document.title;
        match (self.content.stage_name.is_empty(), title.is_empty()) {
            (false, false) => format!("{}: {title}", self.content.stage_name),
            (false, true) => self.content.stage_name.clone(),
            (true, false) => title.clone(),
            (true, true) => "Untitled plan".to_string(),
        }
    }
}

impl fmt::Display for Plan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}", self.heading())?;
        writeln!(f)?;

        writeln!(f, "- ID: {}", self.id)?;
        writeln!(f, "- Uploader: {}", self.uploader_name)?;
        writeln!(f, "- Views: {}", self.views)?;
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if !self.content.document.details.is_empty() {
            writeln!(f)?;
            writeln!(f, "{}", self.content.document.details)?;
        }

        if !self.content.operators.is_empty() {
            writeln!(f, "\n## Operators")?;
            writeln!(f)?;
            for operator in &self.content.operators {
                match operator.skill {
                    Some(skill) => writeln!(f, "- {} (skill {skill})", operator.name)?,
                    None => writeln!(f, "- {}", operator.name)?,
                }
            }
        }

        match self.content.actions.as_deref() {
            Some(actions) if !actions.is_empty() => {
                writeln!(f, "\n## Actions")?;
                writeln!(f)?;
                for (position, action) in actions.iter().enumerate() {
                    writeln!(f, "{}. {action}", position + 1)?;
                }
            }
            _ => writeln!(f, "\nNo actions in this plan.")?,
        }

        Ok(())
    }
}

impl fmt::Display for PlanPage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.data.is_empty() {
            return writeln!(f, "No plans found.");
        }

        for plan in &self.data {
            writeln!(f, "## {} (ID: {})", plan.heading(), plan.id)?;
            writeln!(f)?;
            writeln!(f, "- **Uploader**: {}", plan.uploader_name)?;
            if !plan.content.operators.is_empty() {
                let names: Vec<&str> = plan.operator_names().collect();
                writeln!(f, "- **Operators**: {}", names.join(", "))?;
            }
            writeln!(f, "- **Views**: {}", plan.views)?;
            writeln!(f)?;
        }

        let more = if self.has_next { ", more available" } else { "" };
        writeln!(
            f,
            "{} plan(s) in total across {} page(s){more}.",
            self.total, self.page
        )
    }
}
