use std::io;

use signal_hook::consts::signal::{SIGINT, SIGQUIT, SIGTERM};
use signal_hook::low_level::signal_name;

/// Signals the terminal sends to the whole foreground process group.
/// The parent ignores them so the child alone decides how to react.
pub const TERMINAL_SIGNALS: [libc::c_int; 2] = [SIGINT, SIGQUIT];

/// Sets SIGINT and SIGQUIT to `SIG_IGN` for this process.
///
/// Must run after the child is spawned: an ignored disposition survives
/// `exec`, so doing it earlier would make the child ignore them too. The
/// disposition is never restored.
pub fn ignore_terminal_signals() -> io::Result<()> {
    for signal in TERMINAL_SIGNALS {
        let previous = unsafe { libc::signal(signal, libc::SIG_IGN) };
        if previous == libc::SIG_ERR {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Human-readable form of a signal number, e.g. `SIGKILL (9)`.
pub fn signal_label(signal: libc::c_int) -> String {
    match signal_name(signal) {
        Some(name) => format!("{name} ({signal})"),
        None => signal.to_string(),
    }
}

/// Sends SIGTERM to `pid`. Best effort: a child that already exited is not
/// an error worth reporting.
pub fn terminate(pid: u32) {
    let Ok(pid) = libc::pid_t::try_from(pid) else {
        return;
    };
    let rc = unsafe { libc::kill(pid, SIGTERM) };
    if rc != 0 {
        let err = io::Error::last_os_error();
        tracing::debug!(pid, error = %err, "failed to signal child");
    } else {
        tracing::info!(pid, "sent SIGTERM to child");
    }
}
