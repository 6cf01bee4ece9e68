//! Getting the content repository onto the ticket branch.

use crate::config::Config;
use crate::error::Result;
use crate::git;
use crate::prompt::ConfirmPrompter;
use crate::runner::CommandRunner;
use console::style;
use log::info;

/// How branch synchronization ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BranchOutcome {
    /// No ticket branch was given; stayed on `current`.
    Skipped { current: String },
    /// Already on the ticket branch.
    AlreadyOn,
    /// Checked out and pulled an existing ticket branch.
    Switched,
    /// Created the ticket branch from `from` and pushed it upstream.
    Created { from: String },
    /// The branch did not exist and the user declined to create it.
    Declined { current: String },
}

/// Asks before `git reset --hard`; returns whether the reset should run.
fn confirm_reset<C: ConfirmPrompter>(confirm: &mut C, config: &Config) -> Result<bool> {
    eprintln!(
        "{}",
        style(format!(
            "Warning: this discards ALL uncommitted changes in {}",
            config.repo.display()
        ))
        .yellow()
        .bold()
    );
    confirm.confirm("Reset the working copy to its last commit?")
}

/// Makes the ticket branch the current branch of the content repository.
///
/// Fetches first (after a confirmed hard reset and pull when
/// `config.hard_reset` is set). When checking out `ticket` fails, offers to
/// branch it out from `base`, or from the current branch when `base` is
/// empty.
pub fn synchronize<R: CommandRunner, C: ConfirmPrompter>(
    runner: &mut R,
    confirm: &mut C,
    config: &Config,
    base: &str,
    ticket: &str,
) -> Result<BranchOutcome> {
    let repo = config.repo.as_path();

    if config.hard_reset {
        if confirm_reset(confirm, config)? {
            git::reset_hard(runner, repo)?;
            git::pull_current(runner, repo)?;
        } else {
            info!("hard reset declined, keeping local changes");
        }
    }
    git::fetch(runner, repo)?;

    let current = git::current_branch(runner, repo)?;
    if ticket.is_empty() {
        println!(
            "{}",
            style(format!("No ticket branch given. Staying on {}", current)).yellow()
        );
        return Ok(BranchOutcome::Skipped { current });
    }
    if current == ticket {
        info!("already on {}", ticket);
        return Ok(BranchOutcome::AlreadyOn);
    }

    println!("Current branch: {}. Switching to {}", current, ticket);
    if git::checkout(runner, repo, ticket)?.success() {
        git::pull(runner, repo, ticket)?;
        return Ok(BranchOutcome::Switched);
    }

    println!(
        "{}",
        style(format!("The branch '{}' does not exist.", ticket)).yellow()
    );
    let source = if base.is_empty() {
        current.clone()
    } else {
        base.to_string()
    };

    if confirm.confirm(&format!("Confirm branching out from {}?", source))? {
        git::checkout(runner, repo, &source)?.into_success(&format!("git checkout {}", source))?;
        git::pull(runner, repo, &source)?;
        git::create_branch(runner, repo, ticket)?;
        git::push_upstream(runner, repo, ticket)?;
        println!(
            "{}",
            style(format!("Created {} from {}", ticket, source)).green()
        );
        Ok(BranchOutcome::Created { from: source })
    } else {
        let current = git::current_branch(runner, repo)?;
        println!(
            "{}",
            style(format!("Branch change aborted. proceeding with {}", current)).yellow()
        );
        Ok(BranchOutcome::Declined { current })
    }
}
