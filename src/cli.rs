use crate::config::{Config, Variant};
use crate::error::{Result, SUCCESS, UpdaterError};
use crate::interrupt;
use crate::prompt::{DialoguerConfirmPrompter, DialoguerStringPrompter};
use crate::runner::SystemRunner;
use crate::workflow::{self, Inputs};

use clap::Parser;
use console::style;
use log::{info, warn};
use std::path::PathBuf;

/// Update an email template with new HTML content, then commit, push and
/// optionally open a pull request.
///
/// The new content is read from `updated_template_set.sql`, which must hold a
/// single `SET @html_content := '...';` statement. Every value not given as a
/// flag is asked for interactively; press enter to skip it.
#[derive(Parser, Debug)]
#[command(name = "template-updater")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// The filename of the template to update. If not provided, will be prompted.
    #[arg(long)]
    pub template: Option<String>,

    /// The base branch to branch out from and create the PR to. If not provided, will be prompted.
    #[arg(long)]
    pub base: Option<String>,

    /// The git branch to switch to before updating the template. If not provided, will be prompted.
    #[arg(long)]
    pub ticket: Option<String>,

    /// Directory holding the content repository and the statement file
    /// [default: current directory]
    #[arg(long, env = "TEMPLATE_UPDATER_WORKSPACE")]
    pub workspace: Option<PathBuf>,

    /// Content repository [default: <workspace>/EmailUsersPackageBuilder]
    #[arg(long, env = "TEMPLATE_UPDATER_REPO")]
    pub repo: Option<PathBuf>,

    /// Statement file to inject [default depends on --variant]
    #[arg(long, env = "TEMPLATE_UPDATER_SQL")]
    pub sql_file: Option<PathBuf>,

    /// `standard` only fetches; `strict` also hard-resets first and removes
    /// the statement file afterwards.
    #[arg(long, value_enum, default_value_t = Variant::Standard)]
    pub variant: Variant,

    /// Offer `git reset --hard` and `git pull` before switching branches.
    #[arg(long)]
    pub reset: bool,

    /// Delete the statement file after publishing.
    #[arg(long)]
    pub cleanup: bool,

    /// Log every git and gh invocation.
    #[arg(short, long)]
    pub verbose: bool,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default));
    if verbose {
        builder.filter_level(log::LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

/// Checks that `git` is on PATH; a missing `gh` only matters for PRs.
fn verify_environment() -> Result<()> {
    if which::which("git").is_err() {
        return Err(UpdaterError::ToolMissing("git".to_string()));
    }
    if which::which("gh").is_err() {
        warn!("`gh` not found in PATH; pull request creation will fail");
    }
    Ok(())
}

/// Main CLI entry point for `template-updater`.
///
/// Parses flags, sets up logging, resolves the [`Config`], asks for any
/// missing inputs and runs the [`workflow`]. Returns the exit code on
/// success.
///
/// # Errors
///
/// Any [`UpdaterError`] from the pipeline; see [`report_error`] for how the
/// binary turns it into output and an exit code.
pub fn entry() -> Result<i32> {
    let args = Args::parse();
    init_logging(args.verbose);
    if let Err(e) = interrupt::install() {
        warn!("could not install the Ctrl-C handler: {}", e);
    }

    verify_environment()?;
    let config = Config::from_args(&args)?;
    info!("using {:?}", config);

    let mut prompter = DialoguerStringPrompter;
    let mut confirm = DialoguerConfirmPrompter;
    let inputs = Inputs::resolve(
        &mut prompter,
        args.template.clone(),
        args.base.clone(),
        args.ticket.clone(),
    )?;

    let report = workflow::run(
        &config,
        &inputs,
        &mut SystemRunner,
        &mut prompter,
        &mut confirm,
    )?;
    info!("finished: {:?}", report);

    println!("{}", style("Done.").green().bold());
    Ok(SUCCESS)
}

/// Prints `err` for the user and returns the exit code to use.
///
/// An interrupt is not a failure: it prints `Exiting.` (unless the signal
/// handler already did) and exits cleanly.
pub fn report_error(err: &UpdaterError) -> i32 {
    match err {
        UpdaterError::Interrupted => {
            interrupt::announce_exit();
        }
        other => eprintln!("{}", style(format!("Error: {}", other)).red().bold()),
    }
    err.exit_code()
}
