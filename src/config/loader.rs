use std::ffi::OsString;
use std::os::unix::ffi::OsStringExt;

use crate::config::types::{Config, Decoration};

pub const STDOUT_PREFIX_VAR: &str = "REDERR_STDOUT_PREFIX";
pub const STDOUT_SUFFIX_VAR: &str = "REDERR_STDOUT_SUFFIX";
pub const STDERR_PREFIX_VAR: &str = "REDERR_STDERR_PREFIX";
pub const STDERR_SUFFIX_VAR: &str = "REDERR_STDERR_SUFFIX";

impl Config {
    /// Resolves decoration strings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var_os(name))
    }

    /// Resolves decoration strings through `lookup`.
    ///
    /// - An unset variable keeps the default.
    /// - A set variable, even an empty one, replaces the default verbatim.
    ///   Values are raw bytes; no escape processing is done.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<OsString>,
    {
        let defaults = Config::default();
        let resolve = |name: &str, default: &[u8]| -> Vec<u8> {
            match lookup(name) {
                Some(value) => {
                    tracing::debug!(variable = name, "decoration overridden from environment");
                    value.into_vec()
                }
                None => default.to_vec(),
            }
        };

        Config {
            stdout: Decoration {
                prefix: resolve(STDOUT_PREFIX_VAR, &defaults.stdout.prefix[..]),
                suffix: resolve(STDOUT_SUFFIX_VAR, &defaults.stdout.suffix[..]),
            },
            stderr: Decoration {
                prefix: resolve(STDERR_PREFIX_VAR, &defaults.stderr.prefix[..]),
                suffix: resolve(STDERR_SUFFIX_VAR, &defaults.stderr.suffix[..]),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<OsString> {
        let map: HashMap<String, OsString> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), OsString::from(v)))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn unset_variables_use_defaults() {
        let config = Config::from_lookup(lookup_from(&[]));
        assert_eq!(config, Config::default());
    }

    #[test]
    fn empty_value_disables_decoration() {
        let config = Config::from_lookup(lookup_from(&[
            (STDERR_PREFIX_VAR, ""),
            (STDERR_SUFFIX_VAR, ""),
        ]));
        assert!(config.stderr.is_plain());
        assert!(config.stdout.is_plain());
    }

    #[test]
    fn each_variable_binds_to_its_own_slot() {
        let config = Config::from_lookup(lookup_from(&[
            (STDOUT_PREFIX_VAR, "a"),
            (STDOUT_SUFFIX_VAR, "b"),
            (STDERR_PREFIX_VAR, "c"),
            (STDERR_SUFFIX_VAR, "d"),
        ]));
        assert_eq!(config.stdout, Decoration::new("a", "b"));
        assert_eq!(config.stderr, Decoration::new("c", "d"));
    }

    #[test]
    fn stdout_override_leaves_stderr_default() {
        let config = Config::from_lookup(lookup_from(&[(STDOUT_PREFIX_VAR, "\x1b[1m")]));
        assert_eq!(config.stdout.prefix, b"\x1b[1m");
        assert!(config.stdout.suffix.is_empty());
        assert_eq!(config.stderr, Config::default().stderr);
    }

    #[test]
    fn non_utf8_values_are_kept_as_bytes() {
        let raw = OsString::from_vec(vec![0xff, b'x']);
        let config = Config::from_lookup(move |name| {
            (name == STDOUT_PREFIX_VAR).then(|| raw.clone())
        });
        assert_eq!(config.stdout.prefix, vec![0xff, b'x']);
    }
}
