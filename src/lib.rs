//! # template-updater
//!
//! A CLI tool that injects updated HTML into an email template and publishes
//! the change.
//!
//! This crate provides functionality to:
//! - Put the content repository on a ticket branch, creating it if needed
//! - Pick a template from the `templates/` directory
//! - Replace its `SET @html_content` line with a prepared statement
//! - Commit, push and optionally open a pull request with `gh`
//!
//! ## Usage
//!
//! ```bash
//! # Prompt for everything
//! template-updater
//!
//! # Fully specified
//! template-updater --template welcome.sql --base develop --ticket TICKET-42
//!
//! # Hard reset first and delete the statement file afterwards
//! template-updater --variant strict
//! ```
//!
//! ## Modules
//!
//! - [`cli`] - Command-line interface and main entry point
//! - [`config`] - Paths and switches resolved at startup
//! - [`workflow`] - The pipeline from branch sync to cleanup
//! - [`branch`] - Ticket branch checkout and creation
//! - [`template`] - Template listing and menu selection
//! - [`statement`] - `SET @html_content` validation and injection
//! - [`publish`] - Commit, push and pull request
//! - [`git`] - Git and gh command wrappers
//! - [`runner`] - External command execution
//! - [`prompt`] - User input abstractions
//! - [`interrupt`] - Ctrl-C handling
//! - [`banner`] - Change summary box
//! - [`error`] - Error type and exit codes

pub mod banner;
pub mod branch;
pub mod cli;
pub mod config;
pub mod error;
pub mod git;
pub mod interrupt;
pub mod prompt;
pub mod publish;
pub mod runner;
pub mod statement;
pub mod template;
pub mod workflow;

#[cfg(test)]
pub(crate) mod test_support;
