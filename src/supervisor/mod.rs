//! Child process lifecycle around the relay loop.
//!
//! spawn → non-blocking read ends → ignore SIGINT/SIGQUIT → relay until both
//! pipes close → wait → exit code. Any failure after spawn terminates the
//! child with SIGTERM and returns without waiting for it.

pub mod process;
pub mod signals;

use std::io::Write;
use std::process::Child;

use scopeguard::ScopeGuard;

use crate::cli::CommandLine;
use crate::config::Config;
use crate::error::RederrError;
use crate::relay::{mux, run_loop, StreamChannel, StreamKind};

pub use process::{exit_code, set_nonblocking, spawn};
pub use signals::{ignore_terminal_signals, terminate};

/// Runs `command` to completion, relaying its output into `stdout` and
/// `stderr` with the configured decorations.
///
/// Returns the child's exit code on success.
pub fn run<O, E>(
    command: &CommandLine,
    config: &Config,
    stdout: O,
    stderr: E,
) -> Result<i32, RederrError>
where
    O: Write,
    E: Write,
{
    let child = spawn(command)?;
    let pid = child.id();
    tracing::info!(
        pid,
        command = %command.program_lossy(),
        args = command.args.len(),
        "spawned child"
    );

    let mut child = scopeguard::guard(child, |child: Child| terminate(child.id()));

    let out_pipe = child
        .stdout
        .take()
        .ok_or_else(|| setup_error("capture stdout", "stdout pipe missing"))?;
    let err_pipe = child
        .stderr
        .take()
        .ok_or_else(|| setup_error("capture stderr", "stderr pipe missing"))?;

    set_nonblocking(&out_pipe).map_err(|source| RederrError::Setup {
        step: "set stdout pipe non-blocking",
        source,
    })?;
    set_nonblocking(&err_pipe).map_err(|source| RederrError::Setup {
        step: "set stderr pipe non-blocking",
        source,
    })?;
    ignore_terminal_signals().map_err(|source| RederrError::Setup {
        step: "ignore SIGINT/SIGQUIT",
        source,
    })?;

    let mut out_channel =
        StreamChannel::new(StreamKind::Stdout, out_pipe, config.stdout.clone(), stdout);
    let mut err_channel =
        StreamChannel::new(StreamKind::Stderr, err_pipe, config.stderr.clone(), stderr);

    let stats = run_loop(&mut out_channel, &mut err_channel).map_err(|err| {
        tracing::error!(pid, error = %err, "relay aborted");
        err
    })?;
    tracing::debug!(
        pid,
        stdout = %mux::describe(StreamKind::Stdout, stats.stdout),
        stderr = %mux::describe(StreamKind::Stderr, stats.stderr),
        "relay finished"
    );

    // Both pipes are drained; from here on the child is waited for, not killed.
    let mut child = ScopeGuard::into_inner(child);
    let status = child.wait().map_err(RederrError::Wait)?;
    tracing::info!(pid, %status, "child exited");
    exit_code(status)
}

fn setup_error(step: &'static str, message: &str) -> RederrError {
    RederrError::Setup {
        step,
        source: std::io::Error::other(message.to_string()),
    }
}
