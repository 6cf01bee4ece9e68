//! Process-wide Ctrl-C handling.
//!
//! Prompts read keys in raw mode, so Ctrl-C there arrives as a read error and
//! is handled by [`crate::prompt`]. Everywhere else (while `git` or `gh` runs
//! with the terminal) SIGINT is delivered as a signal; [`install`] listens for
//! it on a background thread and exits cleanly.

use crate::error::SUCCESS;
use log::debug;
use std::io;
use std::process::ExitStatus;
use std::sync::atomic::{AtomicBool, Ordering};
use std::thread;

/// Exit code a shell reports for a child killed by SIGINT.
pub const SIGINT_EXIT_CODE: i32 = 130;

static ANNOUNCED: AtomicBool = AtomicBool::new(false);

/// Prints `Exiting.` once per process.
///
/// Both the signal thread and the main thread may see the same interrupt;
/// only the first caller prints.
///
/// # Returns
///
/// `true` if this call printed the message.
pub fn announce_exit() -> bool {
    if ANNOUNCED.swap(true, Ordering::SeqCst) {
        return false;
    }
    println!("Exiting.");
    true
}

/// Installs the Ctrl-C listener.
///
/// A current-thread tokio runtime is moved to a background thread that
/// waits for the signal, announces the exit and terminates the process with
/// status 0. The signal is registered before this function returns.
///
/// # Errors
///
/// The runtime or the signal registration could not be created.
pub fn install() -> io::Result<()> {
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_io()
        .build()?;

    #[cfg(unix)]
    let mut interrupt = {
        use tokio::signal::unix::{SignalKind, signal};
        let _guard = runtime.enter();
        signal(SignalKind::interrupt())?
    };

    thread::Builder::new()
        .name("interrupt".to_string())
        .spawn(move || {
            runtime.block_on(async move {
                #[cfg(unix)]
                let received = interrupt.recv().await.is_some();
                #[cfg(not(unix))]
                let received = tokio::signal::ctrl_c().await.is_ok();

                if received {
                    debug!("interrupt received");
                    announce_exit();
                    std::process::exit(SUCCESS);
                }
            });
        })?;
    Ok(())
}

/// Returns `true` when a child process ended because of Ctrl-C: killed by
/// SIGINT, or exited with the conventional status 130.
pub fn is_interrupted(status: &ExitStatus) -> bool {
    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if status.signal() == Some(2) {
            return true;
        }
    }
    status.code() == Some(SIGINT_EXIT_CODE)
}
