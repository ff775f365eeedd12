//! Command-line argument definitions using clap.
//!
//! Argument structs carry clap attributes only; each converts into the
//! matching core parameter type so the core stays free of CLI concerns:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Operations
//! ```

use std::{fmt, path::PathBuf};

use clap::{Args as ClapArgs, Parser, Subcommand};
use opbook_core::{PlanId, SearchPlans};

/// Share, browse and search operation plans.
///
/// Plans are JSON documents describing a stage clear: the operators used and
/// the ordered actions taken. Uploading, updating and deleting act on behalf
/// of the user given by `--user-id` and `--user-name`.
#[derive(Parser)]
#[command(version, about, name = "opbook")]
pub struct Args {
    /// Path to the SQLite database file. Defaults to
    /// $XDG_DATA_HOME/opbook/opbook.db
    #[arg(long, global = true)]
    pub database_file: Option<PathBuf>,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Print results as JSON instead of markdown
    #[arg(long, global = true)]
    pub json: bool,

    /// ID of the acting user
    #[arg(long, global = true, env = "OPBOOK_USER_ID")]
    pub user_id: Option<String>,

    /// Display name of the acting user
    #[arg(long, global = true, env = "OPBOOK_USER_NAME")]
    pub user_name: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Upload a new plan from a JSON file
    #[command(alias = "u")]
    Upload(UploadArgs),
    /// Show a plan (counts as a view)
    #[command(alias = "s")]
    Show(ShowArgs),
    /// Replace the content of one of your plans
    Update(UpdateArgs),
    /// Delete one of your plans permanently
    #[command(aliases = ["d", "rm"])]
    Delete(DeleteArgs),
    /// Search plans
    #[command(aliases = ["f", "find"])]
    Search(SearchArgs),
}

/// Where a JSON plan payload is read from.
#[derive(Debug, Clone)]
pub enum Source {
    Stdin,
    File(PathBuf),
}

impl From<String> for Source {
    fn from(value: String) -> Self {
        if value == "-" {
            Source::Stdin
        } else {
            Source::File(PathBuf::from(value))
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Source::Stdin => f.write_str("standard input"),
            Source::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Upload a new plan
#[derive(ClapArgs)]
pub struct UploadArgs {
    /// JSON plan file, or `-` for standard input
    pub source: Source,
}

/// Show a plan
#[derive(ClapArgs)]
pub struct ShowArgs {
    /// ID of the plan to display
    pub id: String,
}

impl From<ShowArgs> for PlanId {
    fn from(val: ShowArgs) -> Self {
        PlanId::from(val.id)
    }
}

/// Replace a plan's content
///
/// The file holds the complete new content; anything left out is cleared.
#[derive(ClapArgs)]
pub struct UpdateArgs {
    /// ID of the plan to update
    pub id: String,
    /// JSON plan file, or `-` for standard input
    pub source: Source,
}

/// Delete a plan
#[derive(ClapArgs)]
pub struct DeleteArgs {
    /// ID of the plan to delete
    pub id: String,
    /// Confirm deletion (required)
    #[arg(long, help = "Confirm permanent deletion of the plan")]
    pub confirm: bool,
}

/// Search plans
///
/// Patterns are regular expressions matched anywhere in the field. The
/// operator list is comma separated; prefix a name with `~` to exclude plans
/// using that operator, e.g. `--operator "Amiya,~Silverash"`.
#[derive(ClapArgs)]
pub struct SearchArgs {
    /// Pattern matched against the stage name
    #[arg(short, long)]
    pub level: Option<String>,
    /// Pattern matched against the document title or details
    #[arg(short, long)]
    pub document: Option<String>,
    /// Comma-separated operator names; `~name` excludes
    #[arg(short, long)]
    pub operator: Option<String>,
    /// Exact uploader name
    #[arg(short, long)]
    pub uploader: Option<String>,
    /// Page to show, starting at 1
    #[arg(short, long, allow_negative_numbers = true)]
    pub page: Option<i64>,
    /// Plans per page
    #[arg(long, allow_negative_numbers = true)]
    pub limit: Option<i64>,
    /// Sort field: id, views, createdAt, updatedAt, stageName, uploader
    #[arg(long)]
    pub order_by: Option<String>,
    /// Sort descending
    #[arg(long)]
    pub desc: bool,
}

impl From<SearchArgs> for SearchPlans {
    fn from(val: SearchArgs) -> Self {
        SearchPlans {
            level_keyword: val.level,
            document: val.document,
            operator: val.operator,
            uploader: val.uploader,
            page: val.page,
            limit: val.limit,
            order_by: val.order_by,
            desc: val.desc,
        }
    }
}
