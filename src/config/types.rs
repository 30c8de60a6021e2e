/// ANSI "set foreground red".
pub const ANSI_RED: &[u8] = b"\x1b[31m";
/// ANSI "reset attributes".
pub const ANSI_RESET: &[u8] = b"\x1b[0m";

/// Bytes wrapped around every chunk forwarded on one stream.
///
/// An empty prefix or suffix means "omit".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Decoration {
    pub prefix: Vec<u8>,
    pub suffix: Vec<u8>,
}

impl Decoration {
    pub fn new(prefix: impl Into<Vec<u8>>, suffix: impl Into<Vec<u8>>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    /// True when neither prefix nor suffix adds any bytes.
    pub fn is_plain(&self) -> bool {
        self.prefix.is_empty() && self.suffix.is_empty()
    }

    /// Wrap `text` the way a chunk would be wrapped.
    pub fn wrap(&self, text: &[u8]) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.prefix.len() + text.len() + self.suffix.len());
        out.extend_from_slice(&self.prefix);
        out.extend_from_slice(text);
        out.extend_from_slice(&self.suffix);
        out
    }
}

/// Resolved decoration for both relayed streams.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub stdout: Decoration,
    pub stderr: Decoration,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            stdout: Decoration::default(),
            stderr: Decoration::new(ANSI_RED, ANSI_RESET),
        }
    }
}
