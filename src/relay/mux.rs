//! Readiness loop over the two child output channels.
//!
//! There is no ordering guarantee between stdout and stderr. When both pipes
//! are readable in the same wakeup, stdout is drained first, regardless of
//! which one the child wrote to first. Within one stream bytes are always
//! forwarded in the order they were read.

use std::io::{self, Read, Write};
use std::os::unix::io::{AsRawFd, RawFd};
use std::time::Duration;

use crate::error::RelayError;
use crate::relay::channel::{ChannelStats, StreamChannel, StreamKind};

/// Upper bound on one readiness wait. Nothing is done on timeout; the loop
/// simply waits again.
pub const POLL_TIMEOUT: Duration = Duration::from_secs(1);

/// What the readiness wait reported for one descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Idle,
    /// Data is available, or the writer hung up and a read will see EOF.
    Readable,
    /// Error or invalid descriptor with nothing left to read.
    Exceptional,
}

impl Readiness {
    fn from_revents(revents: libc::c_short) -> Self {
        if revents & (libc::POLLIN | libc::POLLHUP) != 0 {
            Readiness::Readable
        } else if revents & (libc::POLLERR | libc::POLLNVAL) != 0 {
            Readiness::Exceptional
        } else {
            Readiness::Idle
        }
    }
}

/// Per-stream totals for a finished relay.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RelayStats {
    pub stdout: ChannelStats,
    pub stderr: ChannelStats,
}

/// Waits until at least one of `fds` is readable or in an exceptional state.
///
/// `None` entries are skipped and reported as `Idle`. Returns `Ok(None)` on
/// timeout. `EINTR` restarts the wait.
pub fn wait_readable(
    fds: [Option<RawFd>; 2],
    timeout: Duration,
) -> io::Result<Option<[Readiness; 2]>> {
    let mut pollfds: Vec<libc::pollfd> = fds
        .iter()
        .flatten()
        .map(|&fd| libc::pollfd {
            fd,
            events: libc::POLLIN,
            revents: 0,
        })
        .collect();
    let timeout_ms = timeout.as_millis().min(i32::MAX as u128) as libc::c_int;

    loop {
        let ret = unsafe {
            libc::poll(
                pollfds.as_mut_ptr(),
                pollfds.len() as libc::nfds_t,
                timeout_ms,
            )
        };
        if ret < 0 {
            let err = io::Error::last_os_error();
            if err.kind() == io::ErrorKind::Interrupted {
                for pfd in &mut pollfds {
                    pfd.revents = 0;
                }
                continue;
            }
            return Err(err);
        }
        if ret == 0 {
            return Ok(None);
        }
        break;
    }

    let mut ready = [Readiness::Idle; 2];
    let mut polled = pollfds.iter();
    for (slot, fd) in ready.iter_mut().zip(fds.iter()) {
        if fd.is_some() {
            if let Some(pfd) = polled.next() {
                *slot = Readiness::from_revents(pfd.revents);
            }
        }
    }
    Ok(Some(ready))
}

/// Relays both channels until each has closed.
///
/// A channel closes on end-of-stream or when the wait reports an exceptional
/// condition for it (any bytes still buffered in that pipe are forfeited).
/// A hard read or write error aborts the whole loop.
pub fn run_loop<R1, W1, R2, W2>(
    stdout: &mut StreamChannel<R1, W1>,
    stderr: &mut StreamChannel<R2, W2>,
) -> Result<RelayStats, RelayError>
where
    R1: Read + AsRawFd,
    W1: Write,
    R2: Read + AsRawFd,
    W2: Write,
{
    while !(stdout.is_closed() && stderr.is_closed()) {
        let fds = [stdout.raw_fd(), stderr.raw_fd()];
        let Some([out_ready, err_ready]) =
            wait_readable(fds, POLL_TIMEOUT).map_err(RelayError::Wait)?
        else {
            tracing::trace!("readiness wait timed out");
            continue;
        };

        dispatch(stdout, out_ready)?;
        dispatch(stderr, err_ready)?;
    }

    Ok(RelayStats {
        stdout: stdout.stats(),
        stderr: stderr.stats(),
    })
}

fn dispatch<R, W>(channel: &mut StreamChannel<R, W>, readiness: Readiness) -> Result<(), RelayError>
where
    R: Read + AsRawFd,
    W: Write,
{
    match readiness {
        Readiness::Idle => {}
        Readiness::Readable => {
            channel.pump()?;
        }
        Readiness::Exceptional => {
            tracing::warn!(stream = %channel.kind(), "exceptional condition on pipe, closing");
            channel.close();
        }
    }
    Ok(())
}

/// One-line summary of a channel's totals, for logs.
pub fn describe(kind: StreamKind, stats: ChannelStats) -> String {
    format!("{kind}: {} chunks, {} bytes", stats.chunks, stats.bytes)
}
