//! Run a command with its stdout and stderr decorated so the two streams
//! can be told apart on one terminal.

pub mod cli;
pub mod config;
pub mod error;
pub mod help;
pub mod logging;
pub mod relay;
pub mod supervisor;

pub use error::{RederrError, RelayError, INTERNAL_ERROR_EXIT};
