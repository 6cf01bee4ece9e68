use crate::error::{Result, UpdaterError};
use dialoguer::{Input, theme::ColorfulTheme};
use std::io;

/// Abstraction over a free-text input prompt.
///
/// Implementors define how input is collected from the user. The pipeline
/// only sees this trait, so tests can answer prompts from a script.
pub trait StringPrompter {
    /// Prompt the user for a line of text.
    ///
    /// # Parameters
    /// - `prompt`: The message shown to the user.
    ///
    /// # Returns
    /// `Ok(String)` with the raw answer, which may be empty, or an error if
    /// input could not be read. Ctrl-C is [`UpdaterError::Interrupted`].
    fn prompt(&mut self, prompt: &str) -> Result<String>;
}

/// Abstraction over a yes/no confirmation prompt.
///
/// This trait allows confirmations to be injected or scripted, so the
/// pipeline's branching can be tested without a terminal.
pub trait ConfirmPrompter {
    /// Ask the user to confirm an action.
    ///
    /// # Parameters
    /// - `prompt`: The question, without the `(y/n)` suffix.
    ///
    /// # Returns
    /// `Ok(true)` only when the user answered yes, `Ok(false)` for anything
    /// else, or an error if input could not be read.
    fn confirm(&mut self, prompt: &str) -> Result<bool>;
}

/// `StringPrompter` using `dialoguer::Input` with the `ColorfulTheme`.
pub struct DialoguerStringPrompter;

impl StringPrompter for DialoguerStringPrompter {
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        read_line(prompt)
    }
}

/// `ConfirmPrompter` that reads a free-text answer and accepts only `y`.
///
/// A `dialoguer::Confirm` would reject anything but y/n; here any other
/// answer, including an empty one, simply means no.
pub struct DialoguerConfirmPrompter;

impl ConfirmPrompter for DialoguerConfirmPrompter {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        let answer = read_line(&format!("{} (y/n)", prompt))?;
        Ok(is_affirmative(&answer))
    }
}

fn read_line(prompt: &str) -> Result<String> {
    let theme = ColorfulTheme::default();
    Input::<String>::with_theme(&theme)
        .with_prompt(prompt)
        .allow_empty(true)
        .interact_text()
        .map_err(prompt_error)
}

/// Maps a dialoguer failure, turning Ctrl-C into [`UpdaterError::Interrupted`].
fn prompt_error(err: dialoguer::Error) -> UpdaterError {
    match err {
        dialoguer::Error::IO(e) if e.kind() == io::ErrorKind::Interrupted => {
            UpdaterError::Interrupted
        }
        other => UpdaterError::Prompt(other.to_string()),
    }
}

/// Returns `true` when `answer` is exactly `y` or `Y`, ignoring surrounding
/// whitespace.
pub fn is_affirmative(answer: &str) -> bool {
    answer.trim().eq_ignore_ascii_case("y")
}

/// Returns `value` when it was given on the command line, otherwise asks.
///
/// # Parameters
/// - `prompter`: A mutable reference to a `StringPrompter` implementation.
/// - `value`: The flag value, if the flag was passed.
/// - `prompt`: The message used when the flag is absent.
///
/// # Returns
/// - `Ok(String)` with the flag value, or the trimmed answer. An empty
///   answer stays empty; callers treat it as skip.
/// - `Err` if the prompt failed.
pub fn value_or_ask<P: StringPrompter>(
    prompter: &mut P,
    value: Option<String>,
    prompt: &str,
) -> Result<String> {
    match value {
        Some(v) => Ok(v),
        None => Ok(prompter.prompt(prompt)?.trim().to_string()),
    }
}
