//! Runtime configuration, resolved once at startup.

use crate::cli::Args;
use crate::error::{Result, UpdaterError};
use clap::ValueEnum;
use std::env;
use std::path::{Path, PathBuf};

/// Directory name of the content repository inside the workspace.
pub const DEFAULT_REPO_NAME: &str = "EmailUsersPackageBuilder";
/// File name of the prepared statement.
pub const STATEMENT_FILE: &str = "updated_template_set.sql";
/// Tooling directory holding the statement in the standard variant.
pub const SCRIPTS_DIR: &str = "scripts";
/// Directory of candidate templates inside the content repository.
pub const TEMPLATES_DIR: &str = "templates";

/// The two historical flavours of the workflow.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Fetch only; statement read from `<workspace>/scripts/`; file kept.
    #[default]
    Standard,
    /// Confirmed hard reset and pull first; statement read from the
    /// workspace root; file removed after publishing.
    Strict,
}

impl Variant {
    fn hard_reset(self) -> bool {
        self == Variant::Strict
    }

    fn cleanup(self) -> bool {
        self == Variant::Strict
    }

    fn statement_path(self, workspace: &Path) -> PathBuf {
        match self {
            Variant::Standard => workspace.join(SCRIPTS_DIR).join(STATEMENT_FILE),
            Variant::Strict => workspace.join(STATEMENT_FILE),
        }
    }
}

/// Paths and switches every pipeline step reads from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Content repository all git commands run in.
    pub repo: PathBuf,
    /// Directory listed for the template menu, always `<repo>/templates`.
    /// Moving the repository with `--repo` moves it too.
    pub templates_dir: PathBuf,
    /// Prepared `SET @html_content` statement.
    pub statement_path: PathBuf,
    /// Run a confirmed `git reset --hard` and `git pull` before fetching.
    pub hard_reset: bool,
    /// Delete the statement file once publishing is over.
    pub cleanup: bool,
}

impl Config {
    /// Builds a config rooted at `workspace` with the defaults of `variant`.
    ///
    /// # Parameters
    ///
    /// * `workspace` – Directory holding `EmailUsersPackageBuilder/` and the
    ///   statement file (directly or under `scripts/`, per variant).
    /// * `variant` – Supplies the `hard_reset`, `cleanup` and statement path
    ///   defaults.
    pub fn for_workspace(workspace: &Path, variant: Variant) -> Self {
        let repo = workspace.join(DEFAULT_REPO_NAME);
        Self {
            templates_dir: repo.join(TEMPLATES_DIR),
            repo,
            statement_path: variant.statement_path(workspace),
            hard_reset: variant.hard_reset(),
            cleanup: variant.cleanup(),
        }
    }

    /// Resolves the config from parsed arguments (flags or their env vars).
    ///
    /// The workspace defaults to the current directory. Explicit `--repo`,
    /// `--sql-file`, `--reset` and `--cleanup` win over variant defaults.
    ///
    /// # Errors
    ///
    /// [`UpdaterError::Io`] when no workspace was given and the current
    /// directory cannot be read.
    pub fn from_args(args: &Args) -> Result<Self> {
        let workspace = match &args.workspace {
            Some(dir) => dir.clone(),
            None => env::current_dir().map_err(|e| UpdaterError::io(".", e))?,
        };

        let mut config = Config::for_workspace(&workspace, args.variant);
        if let Some(repo) = &args.repo {
            config.repo = repo.clone();
            config.templates_dir = repo.join(TEMPLATES_DIR);
        }
        if let Some(sql) = &args.sql_file {
            config.statement_path = sql.clone();
        }
        config.hard_reset |= args.reset;
        config.cleanup |= args.cleanup;
        Ok(config)
    }

    /// Absolute path of a template inside [`Config::templates_dir`].
    pub fn template_path(&self, name: &str) -> PathBuf {
        self.templates_dir.join(name)
    }
}
