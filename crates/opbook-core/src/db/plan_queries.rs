//! Plan CRUD operations and the view counter.

use jiff::{Timestamp, fmt::temporal::DateTimePrinter};
use rusqlite::{OptionalExtension, Row, Transaction, params, types::Type};

use crate::{
    error::{DatabaseResultExt, PlannerError, Result},
    models::{Plan, PlanContent, PlanId},
};

const INSERT_PLAN_SQL: &str = "INSERT INTO plans (id, uploader_id, uploader_name, stage_name, doc_title, doc_details, body, views, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
// `views` is only written for new rows; existing counters belong to
// increment_plan_views.
const UPSERT_PLAN_SQL: &str = "INSERT INTO plans (id, uploader_id, uploader_name, stage_name, doc_title, doc_details, body, views, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10) \
     ON CONFLICT(id) DO UPDATE SET uploader_id = excluded.uploader_id, uploader_name = excluded.uploader_name, stage_name = excluded.stage_name, doc_title = excluded.doc_title, doc_details = excluded.doc_details, body = excluded.body, created_at = excluded.created_at, updated_at = excluded.updated_at";
const SELECT_PLAN_SQL: &str = "SELECT id, uploader_id, uploader_name, body, views, created_at, updated_at FROM plans WHERE id = ?1";
const INCREMENT_VIEWS_SQL: &str = "UPDATE plans SET views = views + 1 WHERE id = ?1";
const INSERT_OPERATOR_SQL: &str =
    "INSERT INTO plan_operators (plan_id, position, name) VALUES (?1, ?2, ?3)";
const DELETE_PLAN_OPERATORS_SQL: &str = "DELETE FROM plan_operators WHERE plan_id = ?1";
const DELETE_PLAN_SQL: &str = "DELETE FROM plans WHERE id = ?1";

/// Columns read by [`plan_from_row`], in order.
pub(super) const PLAN_COLUMNS: &str =
    "id, uploader_id, uploader_name, body, views, created_at, updated_at";

/// Formats a timestamp with fixed nanosecond precision so that text order
/// equals chronological order.
pub(super) fn timestamp_to_sql(ts: &Timestamp) -> String {
    DateTimePrinter::new()
        .precision(Some(9))
        .timestamp_to_string(ts)
}

fn timestamp_from_row(row: &Row<'_>, index: usize) -> rusqlite::Result<Timestamp> {
    row.get::<_, String>(index)?
        .parse::<Timestamp>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(index, Type::Text, Box::new(e)))
}

/// Builds a [`Plan`] from a row selected with [`PLAN_COLUMNS`].
pub(super) fn plan_from_row(row: &Row<'_>) -> rusqlite::Result<Plan> {
    let body: String = row.get(3)?;
    let content: PlanContent = serde_json::from_str(&body)
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(3, Type::Text, Box::new(e)))?;

    Ok(Plan {
        id: PlanId::from(row.get::<_, String>(0)?),
        uploader_id: row.get(1)?,
        uploader_name: row.get(2)?,
        content,
        views: row.get::<_, i64>(4)?.max(0) as u64,
        created_at: timestamp_from_row(row, 5)?,
        updated_at: timestamp_from_row(row, 6)?,
    })
}

fn encode_body(plan: &Plan) -> Result<String> {
    serde_json::to_string(&plan.content).map_err(|e| PlannerError::Storage {
        message: format!("Failed to encode plan {}: {e}", plan.id),
    })
}

fn write_plan_row(tx: &Transaction<'_>, sql: &str, plan: &Plan, body: &str) -> Result<()> {
    let views = i64::try_from(plan.views).unwrap_or(i64::MAX);
    tx.execute(
        sql,
        params![
            plan.id.as_str(),
            &plan.uploader_id,
            &plan.uploader_name,
            &plan.content.stage_name,
            &plan.content.document.title,
            &plan.content.document.details,
            body,
            views,
            timestamp_to_sql(&plan.created_at),
            timestamp_to_sql(&plan.updated_at),
        ],
    )
    .db_context("Failed to write plan")?;
    Ok(())
}

fn replace_operators(tx: &Transaction<'_>, plan: &Plan) -> Result<()> {
    tx.execute(DELETE_PLAN_OPERATORS_SQL, params![plan.id.as_str()])
        .db_context("Failed to clear plan operators")?;

    let mut stmt = tx
        .prepare(INSERT_OPERATOR_SQL)
        .db_context("Failed to prepare operator insert")?;
    for (position, name) in plan.operator_names().enumerate() {
        stmt.execute(params![plan.id.as_str(), position as i64, name])
            .db_context("Failed to insert plan operator")?;
    }
    Ok(())
}

impl super::Database {
    /// Inserts a new plan together with its operator index rows.
    pub fn insert_plan(&mut self, plan: &Plan) -> Result<()> {
        let body = encode_body(plan)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        write_plan_row(&tx, INSERT_PLAN_SQL, plan, &body)?;
        replace_operators(&tx, plan)?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Retrieves a plan by its ID.
    pub fn get_plan(&self, id: &PlanId) -> Result<Option<Plan>> {
        let mut stmt = self
            .connection
            .prepare(SELECT_PLAN_SQL)
            .db_context("Failed to prepare query")?;

        stmt.query_row(params![id.as_str()], plan_from_row)
            .optional()
            .db_context("Failed to query plan")
    }

    /// Upserts a plan by ID. The stored view counter is left untouched.
    pub fn save_plan(&mut self, plan: &Plan) -> Result<()> {
        let body = encode_body(plan)?;
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        write_plan_row(&tx, UPSERT_PLAN_SQL, plan, &body)?;
        replace_operators(&tx, plan)?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Permanently deletes a plan and its operator rows.
    pub fn delete_plan(&mut self, id: &PlanId) -> Result<()> {
        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        // Operator rows first; the foreign key cascade is not relied on.
        tx.execute(DELETE_PLAN_OPERATORS_SQL, params![id.as_str()])
            .db_context("Failed to delete plan operators")?;
        tx.execute(DELETE_PLAN_SQL, params![id.as_str()])
            .db_context("Failed to delete plan")?;

        tx.commit().db_context("Failed to commit transaction")
    }

    /// Adds one to the view counter in a single statement.
    pub fn increment_plan_views(&mut self, id: &PlanId) -> Result<()> {
        self.connection
            .execute(INCREMENT_VIEWS_SQL, params![id.as_str()])
            .db_context("Failed to increment plan views")?;
        Ok(())
    }
}
