use crate::error::Result;
use crate::prompt::{ConfirmPrompter, StringPrompter};
use crate::runner::{CommandOutput, CommandRunner, display_command};
use std::collections::VecDeque;
use std::path::{Path, PathBuf};

struct Rule {
    prefix: String,
    code: i32,
    stdout: String,
    used: bool,
}

/// Records every command and replays scripted exit codes.
///
/// Each `respond` rule fires once, for the first command line starting with
/// its prefix. Commands without a matching rule succeed with empty output.
#[derive(Default)]
pub(crate) struct ScriptedRunner {
    rules: Vec<Rule>,
    calls: Vec<(String, PathBuf)>,
}

impl ScriptedRunner {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn respond(mut self, prefix: &str, code: i32, stdout: &str) -> Self {
        self.rules.push(Rule {
            prefix: prefix.to_string(),
            code,
            stdout: stdout.to_string(),
            used: false,
        });
        self
    }

    pub(crate) fn calls(&self) -> Vec<String> {
        self.calls.iter().map(|(c, _)| c.clone()).collect()
    }

    pub(crate) fn cwds(&self) -> Vec<PathBuf> {
        self.calls.iter().map(|(_, p)| p.clone()).collect()
    }

    fn answer(&mut self, program: &str, args: &[&str], cwd: &Path) -> CommandOutput {
        let line = display_command(program, args);
        self.calls.push((line.clone(), cwd.to_path_buf()));
        match self
            .rules
            .iter_mut()
            .find(|r| !r.used && line.starts_with(&r.prefix))
        {
            Some(rule) => {
                rule.used = true;
                CommandOutput {
                    code: rule.code,
                    stdout: rule.stdout.clone(),
                    stderr: String::new(),
                }
            }
            None => CommandOutput::default(),
        }
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&mut self, program: &str, args: &[&str], cwd: &Path) -> Result<CommandOutput> {
        Ok(self.answer(program, args, cwd))
    }

    fn run_interactive(
        &mut self,
        program: &str,
        args: &[&str],
        cwd: &Path,
    ) -> Result<CommandOutput> {
        Ok(self.answer(program, args, cwd))
    }
}

/// Answers text prompts from a queue and records what was asked.
#[derive(Default)]
pub(crate) struct ScriptedInput {
    answers: VecDeque<String>,
    pub(crate) prompts: Vec<String>,
}

impl ScriptedInput {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            prompts: Vec::new(),
        }
    }
}

impl StringPrompter for ScriptedInput {
    fn prompt(&mut self, prompt: &str) -> Result<String> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(a) => Ok(a),
            None => panic!("unexpected prompt: {}", prompt),
        }
    }
}

/// Answers confirmations from a queue and records what was asked.
#[derive(Default)]
pub(crate) struct ScriptedConfirm {
    answers: VecDeque<bool>,
    pub(crate) prompts: Vec<String>,
}

impl ScriptedConfirm {
    pub(crate) fn new(answers: &[bool]) -> Self {
        Self {
            answers: answers.iter().copied().collect(),
            prompts: Vec::new(),
        }
    }
}

impl ConfirmPrompter for ScriptedConfirm {
    fn confirm(&mut self, prompt: &str) -> Result<bool> {
        self.prompts.push(prompt.to_string());
        match self.answers.pop_front() {
            Some(a) => Ok(a),
            None => panic!("unexpected confirmation: {}", prompt),
        }
    }
}
