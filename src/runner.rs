//! External command execution.
//!
//! `git` and `gh` are never spawned directly by the pipeline; every call goes
//! through a [`CommandRunner`] so tests can substitute a scripted runner.

use crate::error::{Result, UpdaterError};
use crate::interrupt;
use log::debug;
use std::path::Path;
use std::process::{Command, Output, Stdio};

/// Exit code and captured streams of a finished command.
///
/// Streams are empty for commands run with inherited stdio.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == 0
    }

    /// Turns a non-zero exit into [`UpdaterError::CommandFailed`].
    ///
    /// `command` is the human-readable command line used in the message.
    pub fn into_success(self, command: &str) -> Result<CommandOutput> {
        if self.success() {
            Ok(self)
        } else {
            Err(UpdaterError::CommandFailed {
                command: command.to_string(),
                code: self.code,
                stderr: self.stderr,
            })
        }
    }
}

/// Abstraction over spawning an external program in a working directory.
pub trait CommandRunner {
    /// Runs `program args...` in `cwd`, capturing stdout and stderr.
    ///
    /// A non-zero exit is returned as `Ok` with its code. A failure to spawn
    /// is an `Err`, and so is a child that ended because of Ctrl-C
    /// ([`UpdaterError::Interrupted`]).
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput>;

    /// Runs `program args...` in `cwd` with stdin, stdout and stderr inherited
    /// from this process, so the tool can talk to the user directly.
    fn run_interactive(
        &mut self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput>;
}

/// Formats a command line for messages and logs.
pub fn display_command(program: &str, args: &[&str]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.contains(' ') {
            line.push_str(&format!("\"{}\"", arg));
        } else {
            line.push_str(arg);
        }
    }
    line
}

/// [`CommandRunner`] backed by [`std::process::Command`].
pub struct SystemRunner;

impl CommandRunner for SystemRunner {
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        let line = display_command(program, args);
        debug!("running `{}` in {}", line, cwd.display());

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        cmd.stdin(Stdio::null());
        cmd.stdout(Stdio::piped());
        cmd.stderr(Stdio::piped());

        let output = cmd.output().map_err(|source| UpdaterError::CommandSpawn {
            command: line.clone(),
            source,
        })?;
        if interrupt::is_interrupted(&output.status) {
            return Err(UpdaterError::Interrupted);
        }
        let result = CommandOutput::from_output(&output);
        debug!("`{}` exited with {}", line, result.code);
        Ok(result)
    }

    fn run_interactive(
        &mut self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput> {
        let line = display_command(program, args);
        debug!("running `{}` in {} (interactive)", line, cwd.display());

        let mut cmd = Command::new(program);
        cmd.args(args).current_dir(cwd);
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().map_err(|source| UpdaterError::CommandSpawn {
            command: line.clone(),
            source,
        })?;
        if interrupt::is_interrupted(&status) {
            return Err(UpdaterError::Interrupted);
        }
        let code = status.code().unwrap_or(-1);
        debug!("`{}` exited with {}", line, code);
        Ok(CommandOutput {
            code,
            ..CommandOutput::default()
        })
    }
}
