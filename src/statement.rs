//! Loading, validating and injecting the `SET @html_content` statement.

use crate::error::{Result, UpdaterError};
use log::{debug, warn};
use regex::Regex;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use std::sync::LazyLock;

/// Template lines starting with this text are replaced by the new statement.
pub const MARKER: &str = "SET @html_content";

/// Shape a statement must have, anchored to the whole line.
pub const STATEMENT_PATTERN: &str = r#"^SET\s+@html_content\s*:=\s*(?:'.+'|".+");$"#;

static STATEMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(STATEMENT_PATTERN).expect("statement pattern is valid"));

/// Reads the statement file and trims surrounding whitespace.
pub fn load(path: &Path) -> Result<String> {
    let body = fs::read_to_string(path).map_err(|e| UpdaterError::io(path, e))?;
    Ok(body.trim().to_string())
}

/// Checks that `statement` is a single `SET @html_content := '...';` line.
///
/// # Errors
///
/// [`UpdaterError::InvalidStatement`] carrying [`STATEMENT_PATTERN`].
pub fn validate(statement: &str) -> Result<()> {
    if STATEMENT_RE.is_match(statement) {
        Ok(())
    } else {
        Err(UpdaterError::InvalidStatement {
            pattern: STATEMENT_PATTERN.to_string(),
        })
    }
}

/// Replaces every line of `content` that starts with [`MARKER`] by
/// `statement`.
///
/// Lines are split on `\n` and joined back the same way, so every other byte
/// (including a trailing newline) is preserved. A replaced line that ended in
/// `\r` keeps it, so CRLF templates stay CRLF.
///
/// # Returns
///
/// The new content and the number of lines replaced.
pub fn replace_lines(content: &str, statement: &str) -> (String, usize) {
    let mut replaced = 0;
    let lines: Vec<Cow<'_, str>> = content
        .split('\n')
        .map(|line| {
            if !line.starts_with(MARKER) {
                return Cow::Borrowed(line);
            }
            replaced += 1;
            if line.ends_with('\r') {
                Cow::Owned(format!("{}\r", statement))
            } else {
                Cow::Borrowed(statement)
            }
        })
        .collect();
    (lines.join("\n"), replaced)
}

/// Rewrites the template at `path` with `statement` in place of the marker
/// line and returns how many lines were replaced.
///
/// When the template holds no marker line the file is left untouched.
pub fn update_template(path: &Path, statement: &str) -> Result<usize> {
    let content = fs::read_to_string(path).map_err(|e| UpdaterError::io(path, e))?;
    let (updated, replaced) = replace_lines(&content, statement);

    if replaced == 0 {
        warn!("no line starting with `{}` in {}", MARKER, path.display());
        return Ok(0);
    }

    fs::write(path, updated).map_err(|e| UpdaterError::io(path, e))?;
    debug!("replaced {} line(s) in {}", replaced, path.display());
    Ok(replaced)
}
