//! The template update pipeline, end to end.

use crate::banner::{Summary, print_summary};
use crate::branch::{self, BranchOutcome};
use crate::config::Config;
use crate::error::{Result, UpdaterError};
use crate::prompt::{ConfirmPrompter, StringPrompter, value_or_ask};
use crate::publish::{self, PublishOutcome};
use crate::runner::CommandRunner;
use crate::{statement, template};
use log::{debug, warn};
use std::fs;
use std::io;
use std::path::Path;

pub const TEMPLATE_PROMPT: &str = "Enter template filename (or press enter to skip)";
pub const BASE_PROMPT: &str =
    "Enter base branch to branching out and process PR (or press enter to skip)";
pub const TICKET_PROMPT: &str = "Enter ticket branch -existing or new- (or press enter to skip)";

/// The three user-supplied values. Empty strings mean "skipped".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    pub template: String,
    pub base: String,
    pub ticket: String,
}

impl Inputs {
    /// Fills in every value not given as a flag by prompting, in the order
    /// template, base, ticket.
    pub fn resolve<P: StringPrompter>(
        prompter: &mut P,
        template: Option<String>,
        base: Option<String>,
        ticket: Option<String>,
    ) -> Result<Self> {
        Ok(Self {
            template: value_or_ask(prompter, template, TEMPLATE_PROMPT)?,
            base: value_or_ask(prompter, base, BASE_PROMPT)?,
            ticket: value_or_ask(prompter, ticket, TICKET_PROMPT)?,
        })
    }
}

/// Everything a finished run did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Report {
    pub branch: BranchOutcome,
    pub template: String,
    pub replaced: usize,
    pub publish: PublishOutcome,
    pub cleaned_up: bool,
}

/// Runs branch sync, template selection, injection, publish and cleanup.
///
/// The statement is validated before the template is touched. With
/// `config.cleanup` the statement file is removed once publishing is over,
/// even when publishing failed; that failure is still returned.
pub fn run<R, P, C>(
    config: &Config,
    inputs: &Inputs,
    runner: &mut R,
    prompter: &mut P,
    confirm: &mut C,
) -> Result<Report>
where
    R: CommandRunner,
    P: StringPrompter,
    C: ConfirmPrompter,
{
    let branch = branch::synchronize(runner, confirm, config, &inputs.base, &inputs.ticket)?;
    debug!("branch sync: {:?}", branch);

    let name = template::select(prompter, &config.templates_dir, &inputs.template)?;
    let path = config.template_path(&name);

    let stmt = statement::load(&config.statement_path)?;
    statement::validate(&stmt)?;
    let replaced = statement::update_template(&path, &stmt)?;

    print_summary(&Summary {
        template: &name,
        ticket: &inputs.ticket,
        base: &inputs.base,
        replaced,
    });

    let published = publish::publish(
        runner,
        confirm,
        &config.repo,
        &path,
        &inputs.ticket,
        &inputs.base,
    );
    let cleaned_up = if config.cleanup {
        remove_statement(&config.statement_path)
    } else {
        Ok(false)
    };
    let (publish, cleaned_up) = settle(published, cleaned_up)?;

    Ok(Report {
        branch,
        template: name,
        replaced,
        publish,
        cleaned_up,
    })
}

/// Combines the publish and cleanup results. A publish failure is reported
/// first; a cleanup failure that comes on top of it is only logged.
fn settle(
    published: Result<PublishOutcome>,
    cleaned_up: Result<bool>,
) -> Result<(PublishOutcome, bool)> {
    match (published, cleaned_up) {
        (Ok(outcome), Ok(cleaned)) => Ok((outcome, cleaned)),
        (Ok(_), Err(cleanup_err)) => Err(cleanup_err),
        (Err(publish_err), Ok(_)) => Err(publish_err),
        (Err(publish_err), Err(cleanup_err)) => {
            warn!("statement cleanup failed: {}", cleanup_err);
            Err(publish_err)
        }
    }
}

/// Deletes the consumed statement file; a file that is already gone is only
/// worth a warning.
fn remove_statement(path: &Path) -> Result<bool> {
    match fs::remove_file(path) {
        Ok(()) => {
            debug!("removed {}", path.display());
            Ok(true)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            warn!("{} was already removed", path.display());
            Ok(false)
        }
        Err(e) => Err(UpdaterError::io(path, e)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Variant;
    use crate::test_support::{ScriptedConfirm, ScriptedInput, ScriptedRunner};

    const STMT: &str = "SET @html_content := '<h1>Hi</h1>';";

    struct Fixture {
        dir: tempfile::TempDir,
        config: Config,
    }

    fn fixture(variant: Variant, statement: &str) -> Fixture {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let config = Config::for_workspace(dir.path(), variant);
        fs::create_dir_all(&config.templates_dir).expect("mkdir templates");
        fs::create_dir_all(config.statement_path.parent().expect("parent")).expect("mkdir");
        fs::write(&config.statement_path, format!("{}\n", statement)).expect("write statement");
        fs::write(
            config.templates_dir.join("a.sql"),
            "USE mail;\nSET @html_content := 'old';\nCALL save(@html_content);\n",
        )
        .expect("write template");
        fs::write(config.templates_dir.join("b.sql"), "SELECT 1;\n").expect("write template");
        Fixture { dir, config }
    }

    fn inputs(template: &str, base: &str, ticket: &str) -> Inputs {
        Inputs {
            template: template.to_string(),
            base: base.to_string(),
            ticket: ticket.to_string(),
        }
    }

    #[test]
    fn resolve_prompts_only_for_missing_values() {
        let mut prompter = ScriptedInput::new(&["develop"]);
        let resolved = Inputs::resolve(
            &mut prompter,
            Some("a.sql".to_string()),
            None,
            Some("T-1".to_string()),
        )
        .unwrap();

        assert_eq!(resolved, inputs("a.sql", "develop", "T-1"));
        assert_eq!(prompter.prompts, vec![BASE_PROMPT]);
    }

    #[test]
    fn full_run_updates_and_publishes() {
        let fx = fixture(Variant::Standard, STMT);
        let mut runner = ScriptedRunner::new().respond("git rev-parse", 0, "T-1");
        let mut prompter = ScriptedInput::new(&["1"]);
        let mut confirm = ScriptedConfirm::new(&[true, true, true]);

        let report = run(
            &fx.config,
            &inputs("", "develop", "T-1"),
            &mut runner,
            &mut prompter,
            &mut confirm,
        )
        .unwrap();

        assert_eq!(report.branch, BranchOutcome::AlreadyOn);
        assert_eq!(report.template, "a.sql");
        assert_eq!(report.replaced, 1);
        assert!(report.publish.pushed && report.publish.pull_request);
        assert!(!report.cleaned_up);
        assert!(fx.config.statement_path.exists());

        let body = fs::read_to_string(fx.config.templates_dir.join("a.sql")).unwrap();
        assert_eq!(
            body,
            format!("USE mail;\n{}\nCALL save(@html_content);\n", STMT)
        );
        assert!(runner.calls().contains(&"gh pr create --base develop".to_string()));
    }

    #[test]
    fn invalid_statement_leaves_template_untouched() {
        let fx = fixture(Variant::Standard, "SET @html_content = 'x';");
        let mut runner = ScriptedRunner::new().respond("git rev-parse", 0, "T-1");
        let mut prompter = ScriptedInput::new(&[]);
        let mut confirm = ScriptedConfirm::new(&[]);

        let err = run(
            &fx.config,
            &inputs("a.sql", "", "T-1"),
            &mut runner,
            &mut prompter,
            &mut confirm,
        )
        .unwrap_err();

        assert!(matches!(err, UpdaterError::InvalidStatement { .. }));
        let body = fs::read_to_string(fx.config.templates_dir.join("a.sql")).unwrap();
        assert!(body.contains("SET @html_content := 'old';"));
        assert!(!runner.calls().iter().any(|c| c.starts_with("git add")));
    }

    #[test]
    fn invalid_menu_choice_is_fatal() {
        let fx = fixture(Variant::Standard, STMT);
        let mut runner = ScriptedRunner::new().respond("git rev-parse", 0, "T-1");
        let mut prompter = ScriptedInput::new(&["3"]);
        let mut confirm = ScriptedConfirm::new(&[]);

        let err = run(
            &fx.config,
            &inputs("", "", "T-1"),
            &mut runner,
            &mut prompter,
            &mut confirm,
        )
        .unwrap_err();

        assert!(matches!(err, UpdaterError::InvalidChoice(_)));
    }

    #[test]
    fn strict_variant_removes_statement_even_when_push_fails() {
        let fx = fixture(Variant::Strict, STMT);
        let mut runner = ScriptedRunner::new()
            .respond("git rev-parse", 0, "T-1")
            .respond("git push", 1, "");
        let mut prompter = ScriptedInput::new(&[]);
        let mut confirm = ScriptedConfirm::new(&[false, true]);

        let err = run(
            &fx.config,
            &inputs("a.sql", "develop", "T-1"),
            &mut runner,
            &mut prompter,
            &mut confirm,
        )
        .unwrap_err();

        assert!(matches!(err, UpdaterError::CommandFailed { .. }));
        assert!(!fx.config.statement_path.exists());
        assert!(fx.dir.path().exists());
    }

    #[test]
    fn strict_variant_removes_statement_when_publish_declined() {
        let fx = fixture(Variant::Strict, STMT);
        let mut runner = ScriptedRunner::new().respond("git rev-parse", 0, "T-1");
        let mut prompter = ScriptedInput::new(&[]);
        let mut confirm = ScriptedConfirm::new(&[false, false, false]);

        let report = run(
            &fx.config,
            &inputs("b.sql", "", "T-1"),
            &mut runner,
            &mut prompter,
            &mut confirm,
        )
        .unwrap();

        assert_eq!(report.replaced, 0);
        assert_eq!(report.publish, PublishOutcome::default());
        assert!(report.cleaned_up);
        assert!(!fx.config.statement_path.exists());
    }

    #[test]
    fn publish_failure_wins_over_cleanup_failure() {
        let publish_err = UpdaterError::CommandFailed {
            command: "git push".to_string(),
            code: 1,
            stderr: String::new(),
        };
        let cleanup_err = UpdaterError::io(
            "/w/updated_template_set.sql",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        let err = settle(Err(publish_err), Err(cleanup_err)).unwrap_err();
        assert!(matches!(err, UpdaterError::CommandFailed { .. }));
    }

    #[test]
    fn cleanup_failure_after_successful_publish_is_reported() {
        let cleanup_err = UpdaterError::io(
            "/w/updated_template_set.sql",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );

        let err = settle(Ok(PublishOutcome::default()), Err(cleanup_err)).unwrap_err();
        assert!(matches!(err, UpdaterError::Io { .. }));
    }

    #[test]
    fn removing_a_directory_in_place_of_the_statement_fails() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        let err = remove_statement(dir.path()).unwrap_err();
        assert!(matches!(err, UpdaterError::Io { .. }));
    }

    #[test]
    fn missing_statement_on_cleanup_is_not_an_error() {
        let dir = tempfile::tempdir().expect("failed to create temp dir");
        assert!(!remove_statement(&dir.path().join("gone.sql")).unwrap());
    }
}
