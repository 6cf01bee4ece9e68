//! Committing, pushing and opening the pull request.

use crate::error::Result;
use crate::git;
use crate::prompt::ConfirmPrompter;
use crate::runner::CommandRunner;
use console::style;
use log::info;
use std::path::Path;

/// What the publish step actually did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PublishOutcome {
    pub pushed: bool,
    pub pull_request: bool,
}

/// Stages, commits and pushes `template` after a confirmation.
pub fn push_changes<R: CommandRunner, C: ConfirmPrompter>(
    runner: &mut R,
    confirm: &mut C,
    repo: &Path,
    template: &Path,
    ticket: &str,
) -> Result<bool> {
    println!("Committing and pushing changes to ticket branch: {}", ticket);
    if !confirm.confirm("Continue")? {
        info!("push declined");
        return Ok(false);
    }

    git::add(runner, repo, template)?;
    git::commit(runner, repo)?;
    git::push(runner, repo)?;
    println!("{}", style("Pushed template changes.").green().bold());
    Ok(true)
}

/// Opens a pull request against `base` after two confirmations: a generic
/// `Continue`, then one naming the target branch.
///
/// Does nothing when `base` is empty, whatever the answers.
///
/// # Returns
///
/// `Ok(true)` when `gh pr create` ran successfully, `Ok(false)` when the step
/// was declined or skipped.
pub fn create_pull_request<R: CommandRunner, C: ConfirmPrompter>(
    runner: &mut R,
    confirm: &mut C,
    repo: &Path,
    base: &str,
) -> Result<bool> {
    println!("Creating PR to base branch: {}", base);
    if !confirm.confirm("Continue")? {
        info!("pull request declined");
        return Ok(false);
    }
    if base.is_empty() {
        info!("no base branch given, skipping pull request");
        return Ok(false);
    }
    if !confirm.confirm(&format!("Do you want to create PR to branch {}?", base))? {
        info!("pull request to {} declined", base);
        return Ok(false);
    }

    git::create_pull_request(runner, repo, base)?;
    Ok(true)
}

/// Runs the push step and then the pull request step.
pub fn publish<R: CommandRunner, C: ConfirmPrompter>(
    runner: &mut R,
    confirm: &mut C,
    repo: &Path,
    template: &Path,
    ticket: &str,
    base: &str,
) -> Result<PublishOutcome> {
    let pushed = push_changes(runner, confirm, repo, template, ticket)?;
    let pull_request = create_pull_request(runner, confirm, repo, base)?;
    Ok(PublishOutcome {
        pushed,
        pull_request,
    })
}
