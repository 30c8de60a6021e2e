//! Shared helpers for running the rederr binary.

#![allow(dead_code)]

use std::process::{Command, Output};

pub const RED: &[u8] = b"\x1b[31m";
pub const RESET: &[u8] = b"\x1b[0m";

pub const DECORATION_VARS: [&str; 4] = [
    "REDERR_STDOUT_PREFIX",
    "REDERR_STDOUT_SUFFIX",
    "REDERR_STDERR_PREFIX",
    "REDERR_STDERR_SUFFIX",
];

/// A `rederr` command with a clean decoration environment.
pub fn rederr_cmd() -> Command {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_rederr"));
    for var in DECORATION_VARS {
        cmd.env_remove(var);
    }
    cmd.env_remove("REDERR_LOG");
    cmd
}

/// Runs `script` under `sh -c` through rederr.
pub fn run_sh(script: &str) -> Output {
    rederr_cmd()
        .args(["sh", "-c", script])
        .output()
        .expect("Failed to execute rederr")
}

/// Runs `script` under `sh -c` directly, for comparison.
pub fn run_sh_direct(script: &str) -> Output {
    Command::new("sh")
        .args(["-c", script])
        .output()
        .expect("Failed to execute sh")
}

/// Removes every occurrence of `prefix` and `suffix`, leaving the payload.
///
/// Only valid when the payload itself cannot contain either marker.
pub fn strip_markers(bytes: &[u8], prefix: &[u8], suffix: &[u8]) -> Vec<u8> {
    let mut out = Vec::with_capacity(bytes.len());
    let mut rest = bytes;
    while !rest.is_empty() {
        if !prefix.is_empty() && rest.starts_with(prefix) {
            rest = &rest[prefix.len()..];
        } else if !suffix.is_empty() && rest.starts_with(suffix) {
            rest = &rest[suffix.len()..];
        } else {
            out.push(rest[0]);
            rest = &rest[1..];
        }
    }
    out
}

/// Number of times `needle` occurs in `haystack`.
pub fn count(haystack: &[u8], needle: &[u8]) -> usize {
    haystack.windows(needle.len()).filter(|w| *w == needle).count()
}
