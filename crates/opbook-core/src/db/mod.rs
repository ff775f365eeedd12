//! Database operations and SQLite management for plans.
//!
//! This module provides the SQLite-backed [`PlanStore`]. It handles
//! connections, schema management, the `regexp` SQL function used for
//! pattern search, and translation of [`PlanFilter`]s into SQL.

use std::{path::Path, time::Duration};

use rusqlite::Connection;

use crate::{
    error::{DatabaseResultExt, Result},
    models::{Plan, PlanFilter, PlanId, Sort},
    store::PlanStore,
};

pub mod functions;
pub mod migrations;
pub mod plan_queries;
pub mod search;

/// How long a connection waits on a locked database before failing.
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Creates a new database connection and initializes the schema.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;
        Self::with_connection(connection)
    }

    /// Opens a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let connection =
            Connection::open_in_memory().db_context("Failed to open in-memory database")?;
        Self::with_connection(connection)
    }

    fn with_connection(connection: Connection) -> Result<Self> {
        connection
            .busy_timeout(BUSY_TIMEOUT)
            .db_context("Failed to set busy timeout")?;
        functions::register_regexp(&connection).db_context("Failed to register regexp")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

impl PlanStore for Database {
    fn insert(&mut self, plan: &Plan) -> Result<()> {
        self.insert_plan(plan)
    }

    fn find_by_id(&self, id: &PlanId) -> Result<Option<Plan>> {
        self.get_plan(id)
    }

    fn save(&mut self, plan: &Plan) -> Result<()> {
        self.save_plan(plan)
    }

    fn delete_by_id(&mut self, id: &PlanId) -> Result<()> {
        self.delete_plan(id)
    }

    fn increment_views(&mut self, id: &PlanId) -> Result<()> {
        self.increment_plan_views(id)
    }

    fn count_and_find(
        &self,
        filter: &PlanFilter,
        sort: &Sort,
        offset: u64,
        size: u64,
    ) -> Result<(u64, Vec<Plan>)> {
        let total = self.count_plans(filter)?;
        let plans = self.find_plans(filter, sort, offset, size)?;
        Ok((total, plans))
    }
}
