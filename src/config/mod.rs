//! Decoration configuration, resolved from the environment.

pub mod loader;
pub mod types;

pub use loader::{STDERR_PREFIX_VAR, STDERR_SUFFIX_VAR, STDOUT_PREFIX_VAR, STDOUT_SUFFIX_VAR};
pub use types::{Config, Decoration, ANSI_RED, ANSI_RESET};
