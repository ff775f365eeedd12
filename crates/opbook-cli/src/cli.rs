//! Command handlers for the opbook CLI.
//!
//! [`Cli`] owns the planner, the renderer and the acting user, and turns
//! each parsed command into one planner call plus output. Results print as
//! markdown through the [`TerminalRenderer`] or, with `--json`, as
//! pretty-printed JSON.

use std::{fmt::Display, fs, io};

use anyhow::{Context, Result, bail};
use log::debug;
use opbook_core::{OperationStatus, PlanId, Planner, SearchPlans, User};
use serde::Serialize;
use serde_json::json;

use crate::{
    args::{Commands, DeleteArgs, SearchArgs, ShowArgs, Source, UpdateArgs, UploadArgs},
    renderer::TerminalRenderer,
};

/// Runs parsed commands against a planner.
pub struct Cli {
    planner: Planner,
    renderer: TerminalRenderer,
    user: Option<User>,
    json: bool,
}

impl Cli {
    pub fn new(planner: Planner, renderer: TerminalRenderer) -> Self {
        Self {
            planner,
            renderer,
            user: None,
            json: false,
        }
    }

    /// Sets the acting user from the optional identity flags.
    ///
    /// Both an id and a name are needed; a partial identity counts as none.
    pub fn with_user(mut self, id: Option<String>, name: Option<String>) -> Self {
        self.user = id.zip(name).map(|(id, name)| User::new(id, name));
        self
    }

    pub fn with_json(mut self, json: bool) -> Self {
        self.json = json;
        self
    }

    /// Dispatches a command.
    pub async fn handle_command(&self, command: Commands) -> Result<()> {
        match command {
            Commands::Upload(args) => self.upload(args).await,
            Commands::Show(args) => self.show(args).await,
            Commands::Update(args) => self.update(args).await,
            Commands::Delete(args) => self.delete(args).await,
            Commands::Search(args) => self.search(args).await,
        }
    }

    async fn upload(&self, args: UploadArgs) -> Result<()> {
        let user = self.require_user()?;
        let raw = read_source(&args.source)?;

        let id = self
            .planner
            .upload_raw(user, &raw)
            .await
            .context("Failed to upload plan")?;

        if self.json {
            return print_json(&json!({ "id": id }));
        }
        self.render(OperationStatus::success(format!("Uploaded plan {id}")))
    }

    async fn show(&self, args: ShowArgs) -> Result<()> {
        let id = PlanId::from(args);
        let plan = self
            .planner
            .get_by_id(&id)
            .await
            .with_context(|| format!("Failed to show plan {id}"))?;

        self.output(&plan)
    }

    async fn update(&self, args: UpdateArgs) -> Result<()> {
        let user = self.require_user()?;
        let raw = read_source(&args.source)?;

        let id = PlanId::from(args.id);
        let plan = self
            .planner
            .update_raw(user, &id, &raw)
            .await
            .with_context(|| format!("Failed to update plan {id} from {}", args.source))?;

        self.output(&plan)
    }

    async fn delete(&self, args: DeleteArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Refusing to delete plan {} without --confirm; deletion is permanent",
                args.id
            );
        }

        let user = self.require_user()?;
        let id = PlanId::from(args.id);
        self.planner
            .delete(user, &id)
            .await
            .with_context(|| format!("Failed to delete plan {id}"))?;

        if self.json {
            return print_json(&json!({ "id": id, "deleted": true }));
        }
        self.render(OperationStatus::success(format!("Deleted plan {id}")))
    }

    async fn search(&self, args: SearchArgs) -> Result<()> {
        let criteria = SearchPlans::from(args);
        debug!("Search criteria: {criteria:?}");

        let page = self
            .planner
            .search(&criteria)
            .await
            .context("Failed to search plans")?;

        self.output(&page)
    }

    fn require_user(&self) -> Result<&User> {
        self.user.as_ref().context(
            "This command acts on your behalf; pass --user-id and --user-name \
             (or set OPBOOK_USER_ID and OPBOOK_USER_NAME)",
        )
    }

    fn output<T: Serialize + Display>(&self, value: &T) -> Result<()> {
        if self.json {
            print_json(value)
        } else {
            self.render(value)
        }
    }

    fn render(&self, value: impl Display) -> Result<()> {
        self.renderer.render(&value.to_string())
    }
}

fn read_source(source: &Source) -> Result<String> {
    match source {
        Source::Stdin => io::read_to_string(io::stdin()).context("Failed to read standard input"),
        Source::File(path) => fs::read_to_string(path)
            .with_context(|| format!("Failed to read plan file {}", path.display())),
    }
}

fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    let text = serde_json::to_string_pretty(value).context("Failed to serialize output")?;
    println!("{text}");
    Ok(())
}
