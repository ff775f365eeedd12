//! Builder for creating and configuring Planner instances.

use std::path::{Path, PathBuf};

use log::debug;

use super::Planner;
use crate::error::{PlannerError, Result};

/// Builder for creating and configuring Planner instances.
#[derive(Debug, Clone, Default)]
pub struct PlannerBuilder {
    database_path: Option<PathBuf>,
}

impl PlannerBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/opbook/opbook.db` or `~/.local/share/opbook/opbook.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.database_path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Builds the configured planner instance.
    ///
    /// # Errors
    ///
    /// Returns `PlannerError::FileSystem` if the database directory cannot be
    /// created, `PlannerError::XdgDirectory` if no default location exists,
    /// and `PlannerError::Database` if schema initialization fails.
    pub async fn build(self) -> Result<Planner> {
        let db_path = match self.database_path {
            Some(path) => path,
            None => Self::default_database_path()?,
        };

        if let Some(parent) = db_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| PlannerError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("Initializing plan database at {}", db_path.display());
        let planner = Planner::new(db_path);
        // Opening runs schema setup and the version check
        planner.with_database(|_| Ok(())).await?;

        Ok(planner)
    }

    /// `$XDG_DATA_HOME/opbook/opbook.db`, creating the directory as needed.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("opbook")
            .place_data_file("opbook.db")
            .map_err(|e| PlannerError::XdgDirectory(e.to_string()))
    }
}
