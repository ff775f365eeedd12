//! Translation of [`PlanFilter`]s into SQL and the paginated search queries.

use rusqlite::{params_from_iter, types::Value};

use super::plan_queries::{PLAN_COLUMNS, plan_from_row};
use crate::{
    error::{DatabaseResultExt, Result},
    models::{Clause, Field, Plan, PlanFilter, Sort, SortDirection, SortField},
};

/// A WHERE fragment with its positional parameters.
#[derive(Debug, Default, PartialEq)]
pub struct SqlFilter {
    pub condition: Option<String>,
    pub params: Vec<Value>,
}

impl SqlFilter {
    fn where_clause(&self) -> String {
        self.condition
            .as_ref()
            .map(|condition| format!(" WHERE {condition}"))
            .unwrap_or_default()
    }
}

fn scalar_column(field: Field) -> &'static str {
    match field {
        Field::StageName => "stage_name",
        Field::DocumentTitle => "doc_title",
        Field::DocumentDetails => "doc_details",
        Field::UploaderName => "uploader_name",
        Field::OperatorName => "name",
    }
}

/// Renders `field <op> ?`, wrapping multi-valued fields in an EXISTS over
/// their child table.
fn comparison(field: Field, operator: &str) -> String {
    let column = scalar_column(field);
    if field.is_multi_valued() {
        format!(
            "EXISTS (SELECT 1 FROM plan_operators o WHERE o.plan_id = plans.id AND o.{column} {operator} ?)"
        )
    } else {
        format!("{column} {operator} ?")
    }
}

fn clause_sql(clause: &Clause, params: &mut Vec<Value>) -> String {
    match clause {
        Clause::Matches { field, pattern } => {
            params.push(Value::Text(pattern.clone()));
            comparison(*field, "REGEXP")
        }
        Clause::Equals { field, value } => {
            params.push(Value::Text(value.clone()));
            comparison(*field, "=")
        }
        Clause::AnyOf(clauses) if clauses.is_empty() => "0".to_string(),
        Clause::AnyOf(clauses) => {
            let parts: Vec<String> = clauses.iter().map(|c| clause_sql(c, params)).collect();
            format!("({})", parts.join(" OR "))
        }
        Clause::Not(nested) => format!("NOT ({})", clause_sql(nested, params)),
    }
}

impl From<&PlanFilter> for SqlFilter {
    fn from(filter: &PlanFilter) -> Self {
        let mut params = Vec::new();
        let parts: Vec<String> = filter
            .clauses()
            .iter()
            .map(|clause| clause_sql(clause, &mut params))
            .collect();

        Self {
            condition: (!parts.is_empty()).then(|| parts.join(" AND ")),
            params,
        }
    }
}

fn order_by(sort: &Sort) -> String {
    let column = match sort.field {
        SortField::Id => "id",
        SortField::Views => "views",
        SortField::CreatedAt => "created_at",
        SortField::UpdatedAt => "updated_at",
        SortField::StageName => "stage_name",
        SortField::Uploader => "uploader_name",
    };
    let direction = match sort.direction {
        SortDirection::Ascending => "ASC",
        SortDirection::Descending => "DESC",
    };

    if sort.field == SortField::Id {
        format!(" ORDER BY id {direction}")
    } else {
        format!(" ORDER BY {column} {direction}, id ASC")
    }
}

fn to_sql_int(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

impl super::Database {
    /// Counts plans matching the filter.
    pub fn count_plans(&self, filter: &PlanFilter) -> Result<u64> {
        let sql_filter = SqlFilter::from(filter);
        let query = format!("SELECT COUNT(*) FROM plans{}", sql_filter.where_clause());

        let count: i64 = self
            .connection
            .query_row(&query, params_from_iter(sql_filter.params.iter()), |row| {
                row.get(0)
            })
            .db_context("Failed to count plans")?;

        Ok(count.max(0) as u64)
    }

    /// Fetches one sorted window of plans matching the filter.
    pub fn find_plans(
        &self,
        filter: &PlanFilter,
        sort: &Sort,
        offset: u64,
        size: u64,
    ) -> Result<Vec<Plan>> {
        let mut sql_filter = SqlFilter::from(filter);
        let query = format!(
            "SELECT {PLAN_COLUMNS} FROM plans{}{} LIMIT ? OFFSET ?",
            sql_filter.where_clause(),
            order_by(sort)
        );
        sql_filter.params.push(Value::Integer(to_sql_int(size)));
        sql_filter.params.push(Value::Integer(to_sql_int(offset)));

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare search query")?;

        let plans = stmt
            .query_map(params_from_iter(sql_filter.params.iter()), plan_from_row)
            .db_context("Failed to query plans")?
            .collect::<std::result::Result<Vec<_>, _>>()
            .db_context("Failed to fetch plans")?;

        Ok(plans)
    }
}
