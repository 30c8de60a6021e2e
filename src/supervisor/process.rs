use std::io;
use std::os::unix::io::{AsRawFd, RawFd};
use std::os::unix::process::ExitStatusExt;
use std::process::{Child, Command, ExitStatus, Stdio};

use crate::cli::CommandLine;
use crate::error::RederrError;

/// Spawns `command` with stdout and stderr redirected into fresh pipes.
///
/// Stdin is inherited. The child stays in our process group, so the
/// terminal's interrupt and quit signals reach it directly. The parent keeps
/// only the read ends; `Command` closes its copies of the write ends once
/// the child is running, which is what lets the relay see end-of-stream.
pub fn spawn(command: &CommandLine) -> Result<Child, RederrError> {
    Command::new(&command.program)
        .args(&command.args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|source| RederrError::Spawn {
            command: command.program_lossy(),
            source,
        })
}

/// Puts `fd` into non-blocking mode.
pub fn set_nonblocking<F: AsRawFd>(file: &F) -> io::Result<()> {
    let fd: RawFd = file.as_raw_fd();
    unsafe {
        let flags = libc::fcntl(fd, libc::F_GETFL);
        if flags < 0 {
            return Err(io::Error::last_os_error());
        }
        if flags & libc::O_NONBLOCK != 0 {
            return Ok(());
        }
        if libc::fcntl(fd, libc::F_SETFL, flags | libc::O_NONBLOCK) < 0 {
            return Err(io::Error::last_os_error());
        }
    }
    Ok(())
}

/// Maps the child's status to rederr's own exit code.
///
/// A normal exit passes its code through. Death by signal is an error
/// (reported by the caller, exit 111).
pub fn exit_code(status: ExitStatus) -> Result<i32, RederrError> {
    if let Some(code) = status.code() {
        return Ok(code);
    }
    if let Some(signal) = status.signal() {
        return Err(RederrError::ChildSignaled { signal });
    }
    Err(RederrError::Wait(io::Error::other(format!(
        "unrecognized child status: {status}"
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::ffi::OsString;
    use std::os::unix::net::UnixStream;

    #[test]
    fn normal_exit_code_passes_through() {
        for code in [0, 1, 42, 255] {
            let status = ExitStatus::from_raw(code << 8);
            assert_eq!(exit_code(status).unwrap(), code);
        }
    }

    #[test]
    fn signal_death_is_an_error() {
        let status = ExitStatus::from_raw(libc::SIGKILL);
        match exit_code(status) {
            Err(RederrError::ChildSignaled { signal }) => assert_eq!(signal, libc::SIGKILL),
            other => panic!("unexpected result: {other:?}"),
        }
    }

    #[test]
    fn set_nonblocking_sets_the_flag() {
        let (a, _b) = UnixStream::pair().unwrap();
        set_nonblocking(&a).unwrap();
        let flags = unsafe { libc::fcntl(a.as_raw_fd(), libc::F_GETFL) };
        assert!(flags & libc::O_NONBLOCK != 0);
        // Setting it twice is fine.
        set_nonblocking(&a).unwrap();
    }

    #[test]
    fn spawn_missing_program_reports_command() {
        let command = CommandLine {
            program: OsString::from("rederr-test-no-such-program"),
            args: Vec::new(),
        };
        match spawn(&command) {
            Err(RederrError::Spawn { command, source }) => {
                assert_eq!(command, "rederr-test-no-such-program");
                assert_eq!(source.kind(), io::ErrorKind::NotFound);
            }
            Err(other) => panic!("unexpected error: {other:?}"),
            Ok(_) => panic!("spawn should fail"),
        }
    }

    #[test]
    fn spawn_captures_both_streams() {
        use std::io::Read;
        let command = CommandLine {
            program: OsString::from("sh"),
            args: vec!["-c".into(), "printf out; printf err >&2".into()],
        };
        let mut child = spawn(&command).unwrap();
        let mut out = String::new();
        let mut err = String::new();
        child.stdout.take().unwrap().read_to_string(&mut out).unwrap();
        child.stderr.take().unwrap().read_to_string(&mut err).unwrap();
        assert!(child.wait().unwrap().success());
        assert_eq!(out, "out");
        assert_eq!(err, "err");
    }
}
