//! Wrappers around the `git` and `gh` invocations used by the pipeline.
//!
//! Each function runs one command in the content repository through a
//! [`CommandRunner`]. Commands whose output the user should see (fetch, pull,
//! push, ...) inherit stdio, matching what running them by hand looks like.

use crate::error::Result;
use crate::runner::{CommandOutput, CommandRunner, display_command};
use std::path::Path;

/// Commit message used for every template update.
pub const COMMIT_MESSAGE: &str = "Update template HTML";

const GIT: &str = "git";
const GH: &str = "gh";

/// Runs an interactive git command and fails on a non-zero exit.
fn git_checked<R: CommandRunner>(runner: &mut R, repo: &Path, args: &[&str]) -> Result<()> {
    runner
        .run_interactive(GIT, args, repo)?
        .into_success(&display_command(GIT, args))?;
    Ok(())
}

/// Runs `git fetch`.
pub fn fetch<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<()> {
    git_checked(runner, repo, &["fetch"])
}

/// Runs `git reset --hard`, discarding every uncommitted change.
pub fn reset_hard<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<()> {
    git_checked(runner, repo, &["reset", "--hard"])
}

/// Runs `git pull` for the current branch's upstream.
pub fn pull_current<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<()> {
    git_checked(runner, repo, &["pull"])
}

/// Runs `git pull origin <branch>`.
pub fn pull<R: CommandRunner>(runner: &mut R, repo: &Path, branch: &str) -> Result<()> {
    git_checked(runner, repo, &["pull", "origin", branch])
}

/// Returns the short name of the checked-out branch
/// (`git rev-parse --abbrev-ref HEAD`).
pub fn current_branch<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<String> {
    let args = ["rev-parse", "--abbrev-ref", "HEAD"];
    let out = runner
        .run(GIT, &args, repo)?
        .into_success(&display_command(GIT, &args))?;
    Ok(out.stdout)
}

/// Runs `git checkout <branch>` and returns the raw outcome.
///
/// Unlike the other wrappers this does not fail on a non-zero exit: a failed
/// checkout means the branch does not exist, and the caller decides what to
/// do about it.
pub fn checkout<R: CommandRunner>(
    runner: &mut R,
    repo: &Path,
    branch: &str,
) -> Result<CommandOutput> {
    runner.run_interactive(GIT, &["checkout", branch], repo)
}

/// Runs `git checkout -b <branch>` from the current HEAD.
pub fn create_branch<R: CommandRunner>(runner: &mut R, repo: &Path, branch: &str) -> Result<()> {
    git_checked(runner, repo, &["checkout", "-b", branch])
}

/// Runs `git push -u origin <branch>` to publish a new branch with tracking.
pub fn push_upstream<R: CommandRunner>(runner: &mut R, repo: &Path, branch: &str) -> Result<()> {
    git_checked(runner, repo, &["push", "-u", "origin", branch])
}

/// Runs `git add <path>`.
pub fn add<R: CommandRunner>(runner: &mut R, repo: &Path, path: &Path) -> Result<()> {
    let path = path.to_string_lossy();
    git_checked(runner, repo, &["add", &*path])
}

/// Runs `git commit -m "Update template HTML"`.
pub fn commit<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<()> {
    git_checked(runner, repo, &["commit", "-m", COMMIT_MESSAGE])
}

/// Runs `git push`.
pub fn push<R: CommandRunner>(runner: &mut R, repo: &Path) -> Result<()> {
    git_checked(runner, repo, &["push"])
}

/// Runs `gh pr create --base <base>`.
///
/// `gh` asks for the title and body itself, so stdio is inherited.
pub fn create_pull_request<R: CommandRunner>(runner: &mut R, repo: &Path, base: &str) -> Result<()> {
    let args = ["pr", "create", "--base", base];
    runner
        .run_interactive(GH, &args, repo)?
        .into_success(&display_command(GH, &args))?;
    Ok(())
}
