//! Store-agnostic filter expressions and sort options for plan search.
//!
//! A [`PlanFilter`] is a conjunction of [`Clause`]s. Each clause is a pattern
//! match, an exact match, a disjunction or a negation. Clauses name logical
//! plan fields ([`Field`]) and never carry storage syntax; translating them
//! is the job of the [`crate::store::PlanStore`] implementation.

use std::str::FromStr;

use regex::Regex;

use crate::{
    error::{PlannerError, Result},
    params::SearchPlans,
};

/// Searchable plan fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    StageName,
    DocumentTitle,
    DocumentDetails,
    /// Multi-valued: matches when any operator's name matches
    OperatorName,
    UploaderName,
}

impl Field {
    /// Dotted document path of the field.
    pub fn path(self) -> &'static str {
        match self {
            Field::StageName => "stageName",
            Field::DocumentTitle => "doc.title",
            Field::DocumentDetails => "doc.details",
            Field::OperatorName => "operators.name",
            Field::UploaderName => "uploaderName",
        }
    }

    pub fn is_multi_valued(self) -> bool {
        matches!(self, Field::OperatorName)
    }
}

/// One predicate of a filter.
#[derive(Debug, Clone, PartialEq)]
pub enum Clause {
    /// Regular-expression match anywhere in the field value
    Matches { field: Field, pattern: String },
    /// Exact equality
    Equals { field: Field, value: String },
    /// At least one nested clause holds
    AnyOf(Vec<Clause>),
    /// The nested clause does not hold
    Not(Box<Clause>),
}

impl Clause {
    pub fn matches(field: Field, pattern: impl Into<String>) -> Self {
        Clause::Matches {
            field,
            pattern: pattern.into(),
        }
    }

    pub fn equals(field: Field, value: impl Into<String>) -> Self {
        Clause::Equals {
            field,
            value: value.into(),
        }
    }

    pub fn any_of(clauses: impl IntoIterator<Item = Clause>) -> Self {
        Clause::AnyOf(clauses.into_iter().collect())
    }

    pub fn negate(clause: Clause) -> Self {
        Clause::Not(Box::new(clause))
    }
}

/// Conjunction of clauses. An empty filter matches every plan.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlanFilter {
    clauses: Vec<Clause>,
}

impl PlanFilter {
    pub fn builder() -> FilterBuilder {
        FilterBuilder::default()
    }

    pub fn clauses(&self) -> &[Clause] {
        &self.clauses
    }

    pub fn is_empty(&self) -> bool {
        self.clauses.is_empty()
    }
}

/// Accumulates independent clauses into a [`PlanFilter`].
#[derive(Debug, Default)]
pub struct FilterBuilder {
    clauses: Vec<Clause>,
}

impl FilterBuilder {
    /// Adds an arbitrary clause.
    pub fn clause(mut self, clause: Clause) -> Self {
        self.clauses.push(clause);
        self
    }

    pub fn matches(self, field: Field, pattern: impl Into<String>) -> Self {
        self.clause(Clause::matches(field, pattern))
    }

    pub fn equals(self, field: Field, value: impl Into<String>) -> Self {
        self.clause(Clause::equals(field, value))
    }

    pub fn any_of(self, clauses: impl IntoIterator<Item = Clause>) -> Self {
        self.clause(Clause::any_of(clauses))
    }

    pub fn excludes(self, clause: Clause) -> Self {
        self.clause(Clause::negate(clause))
    }

    pub fn build(self) -> PlanFilter {
        PlanFilter {
            clauses: self.clauses,
        }
    }
}

/// Ensures a user-supplied pattern is a valid regular expression.
fn checked_pattern<'a>(field: &str, pattern: &'a str) -> Result<&'a str> {
    Regex::new(pattern).map_err(|e| {
        PlannerError::invalid_input(field).with_reason(format!("invalid pattern: {e}"))
    })?;
    Ok(pattern)
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

impl TryFrom<&SearchPlans> for PlanFilter {
    type Error = PlannerError;

    /// Builds the search filter from optional criteria.
    ///
    /// - `levelKeyword`: stage name matches the pattern
    /// - `document`: title OR details matches the pattern
    /// - `operator`: comma-separated tokens; `~name` excludes plans with a
    ///   matching operator, any other token requires one. Every token is its
    ///   own AND clause.
    /// - `uploader`: exact uploader name
    ///
    /// # Examples
    ///
    /// ```rust
    /// use opbook_core::{
    ///     models::{Clause, Field, PlanFilter},
    ///     params::SearchPlans,
    /// };
    ///
    /// let criteria = SearchPlans {
    ///     operator: Some("Amiya,~Silverash".to_string()),
    ///     ..Default::default()
    /// };
    /// let filter = PlanFilter::try_from(&criteria).unwrap();
    /// assert_eq!(
    ///     filter.clauses(),
    ///     &[
    ///         Clause::matches(Field::OperatorName, "Amiya"),
    ///         Clause::negate(Clause::matches(Field::OperatorName, "Silverash")),
    ///     ]
    /// );
    /// ```
    fn try_from(criteria: &SearchPlans) -> Result<Self> {
        let mut builder = PlanFilter::builder();

        if let Some(keyword) = non_empty(criteria.level_keyword.as_ref()) {
            builder = builder.matches(Field::StageName, checked_pattern("levelKeyword", keyword)?);
        }

        if let Some(text) = non_empty(criteria.document.as_ref()) {
            let text = checked_pattern("document", text)?;
            builder = builder.any_of([
                Clause::matches(Field::DocumentTitle, text),
                Clause::matches(Field::DocumentDetails, text),
            ]);
        }

        if let Some(operators) = non_empty(criteria.operator.as_ref()) {
            for token in operators.split(',').map(str::trim) {
                match token.strip_prefix('~') {
                    Some(excluded) if !excluded.is_empty() => {
                        let excluded = checked_pattern("operator", excluded)?;
                        builder = builder.excludes(Clause::matches(Field::OperatorName, excluded));
                    }
                    Some(_) => {}
                    None if token.is_empty() => {}
                    None => {
                        builder = builder
                            .matches(Field::OperatorName, checked_pattern("operator", token)?);
                    }
                }
            }
        }

        if let Some(uploader) = non_empty(criteria.uploader.as_ref()) {
            builder = builder.equals(Field::UploaderName, uploader);
        }

        Ok(builder.build())
    }
}

/// Sortable plan fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortField {
    #[default]
    Id,
    Views,
    CreatedAt,
    UpdatedAt,
    StageName,
    Uploader,
}

impl FromStr for SortField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "id" | "_id" => Ok(SortField::Id),
            "views" => Ok(SortField::Views),
            "createdAt" | "createDate" | "created_at" => Ok(SortField::CreatedAt),
            "updatedAt" | "updateDate" | "updated_at" => Ok(SortField::UpdatedAt),
            "stageName" | "stage_name" => Ok(SortField::StageName),
            "uploader" | "uploaderName" | "uploader_name" => Ok(SortField::Uploader),
            _ => Err(format!("Unknown sort field: {s}")),
        }
    }
}

/// Sort direction; ascending unless descending is requested.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl TryFrom<&SearchPlans> for Sort {
    type Error = PlannerError;

    fn try_from(criteria: &SearchPlans) -> Result<Self> {
        let field = match non_empty(criteria.order_by.as_ref()) {
            Some(name) => name
                .parse::<SortField>()
                .map_err(|reason| PlannerError::invalid_input("orderBy").with_reason(reason))?,
            None => SortField::default(),
        };
        let direction = if criteria.desc {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };
        Ok(Sort { field, direction })
    }
}
