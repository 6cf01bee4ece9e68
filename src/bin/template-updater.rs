/// Entry point for the `template-updater` binary.
///
/// Delegates to the CLI entry function and exits the process with the
/// returned exit code. Errors are printed and mapped to their exit code;
/// Ctrl-C at a prompt exits with status 0.
fn main() {
    match template_updater::cli::entry() {
        Ok(code) => std::process::exit(code),
        Err(e) => std::process::exit(template_updater::cli::report_error(&e)),
    }
}
