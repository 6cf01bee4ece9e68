//! Choosing which template file to update.

use crate::error::{Result, UpdaterError};
use crate::prompt::StringPrompter;
use std::fs;
use std::path::Path;

/// Returns the names of the regular files in `dir`, sorted.
pub fn list_templates(dir: &Path) -> Result<Vec<String>> {
    let entries = fs::read_dir(dir).map_err(|e| UpdaterError::io(dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| UpdaterError::io(dir, e))?;
        let file_type = entry.file_type().map_err(|e| UpdaterError::io(entry.path(), e))?;
        if file_type.is_file() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
    }
    names.sort();
    Ok(names)
}

/// Builds the numbered menu lines, starting at 1.
pub fn menu_lines(names: &[String]) -> Vec<String> {
    names
        .iter()
        .enumerate()
        .map(|(i, name)| format!("{}. {}", i + 1, name))
        .collect()
}

/// Maps a 1-based menu answer back to a name.
///
/// # Errors
///
/// [`UpdaterError::InvalidChoice`] when the answer is not a number or falls
/// outside `1..=names.len()`.
pub fn resolve_choice(answer: &str, names: &[String]) -> Result<String> {
    let answer = answer.trim();
    match answer.parse::<usize>() {
        Ok(n) if n >= 1 && n <= names.len() => Ok(names[n - 1].clone()),
        _ => Err(UpdaterError::InvalidChoice(answer.to_string())),
    }
}

/// Returns `given` when non-empty, otherwise shows the menu for `dir` and
/// asks for a number.
pub fn select<P: StringPrompter>(prompter: &mut P, dir: &Path, given: &str) -> Result<String> {
    if !given.is_empty() {
        return Ok(given.to_string());
    }

    let names = list_templates(dir)?;
    println!("Select template to update:");
    for line in menu_lines(&names) {
        println!("{}", line);
    }
    let answer = prompter.prompt("Enter number")?;
    resolve_choice(&answer, &names)
}
