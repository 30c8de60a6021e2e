//! Error types for the supervisor and the relay loop.
//!
//! Every internal fault collapses to a single exit code so that callers
//! (usually shell scripts) can tell "the child said k" apart from "rederr
//! itself broke" without parsing output.

use std::io;
use thiserror::Error;

use crate::relay::StreamKind;
use crate::supervisor::signals::signal_label;

/// Exit code used for every failure that is not the child's own exit code.
pub const INTERNAL_ERROR_EXIT: i32 = 111;

/// Errors raised while relaying the child's output streams.
#[derive(Debug, Error)]
pub enum RelayError {
    /// A read from the child's pipe or a write to our own stream failed.
    #[error("I/O error on {stream}: {source}")]
    Io {
        stream: StreamKind,
        #[source]
        source: io::Error,
    },

    /// The readiness wait itself failed.
    #[error("failed to wait for child output: {0}")]
    Wait(#[source] io::Error),
}

/// Top-level errors for one supervised run.
#[derive(Debug, Error)]
pub enum RederrError {
    /// The child could not be started (pipe creation, fork or exec).
    #[error("failed to execute '{command}': {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// A post-spawn setup step failed (descriptor mode, signal disposition).
    #[error("setup failed ({step}): {source}")]
    Setup {
        step: &'static str,
        #[source]
        source: io::Error,
    },

    #[error(transparent)]
    Relay(#[from] RelayError),

    /// The child was terminated by a signal instead of exiting.
    #[error("child terminated by signal {}", signal_label(*signal))]
    ChildSignaled { signal: i32 },

    #[error("failed to wait for child: {0}")]
    Wait(#[source] io::Error),
}

impl RederrError {
    /// Exit code for this error. Deliberately undifferentiated.
    pub fn exit_code(&self) -> i32 {
        INTERNAL_ERROR_EXIT
    }
}
