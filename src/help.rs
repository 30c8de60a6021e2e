//! Usage and help text.
//!
//! Help is rendered as bytes because the example line is printed with the
//! resolved decorations, which are arbitrary bytes.

use crate::cli::HelpLevel;
use crate::config::{
    Config, STDERR_PREFIX_VAR, STDERR_SUFFIX_VAR, STDOUT_PREFIX_VAR, STDOUT_SUFFIX_VAR,
};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Renders the usage synopsis, plus the long sections for `--help`.
pub fn render(level: HelpLevel, program: &str, config: &Config) -> Vec<u8> {
    let mut out = Vec::new();
    out.extend_from_slice(format!("Usage: {program} [-h|--help] COMMAND [ARG]...\n\n").as_bytes());

    out.extend_from_slice(b"    Runs COMMAND with its ");
    out.extend_from_slice(&config.stdout.wrap(b"stdout decorated like this"));
    out.extend_from_slice(b" and its ");
    out.extend_from_slice(&config.stderr.wrap(b"stderr decorated like this"));
    out.extend_from_slice(b"\n\n");
    out.extend_from_slice(format!("    Example: {program} make -j8\n").as_bytes());

    if level == HelpLevel::Long {
        out.extend_from_slice(long_sections(program).as_bytes());
    }
    out
}

fn long_sections(program: &str) -> String {
    let defaults = Config::default();
    let vars = [
        (STDOUT_PREFIX_VAR, "written before each stdout chunk", &defaults.stdout.prefix),
        (STDOUT_SUFFIX_VAR, "written after each stdout chunk", &defaults.stdout.suffix),
        (STDERR_PREFIX_VAR, "written before each stderr chunk", &defaults.stderr.prefix),
        (STDERR_SUFFIX_VAR, "written after each stderr chunk", &defaults.stderr.suffix),
    ];

    let mut text = format!("\n{program} {VERSION}\n\nEnvironment:\n");
    for (name, meaning, default) in vars {
        text.push_str(&format!(
            "    {name:<22} {meaning} (default: \"{}\")\n",
            escape(default)
        ));
    }
    text.push_str("    Set a variable to the empty string to disable that decoration.\n");
    text.push_str(
        "\nNotes:\n\
         \x20   - COMMAND's stdout and stderr are pipes, not a terminal. Programs that\n\
         \x20     check for a terminal may change their output.\n\
         \x20   - Output written to stdout and stderr at nearly the same time may be\n\
         \x20     shown out of order.\n\
         \x20   - Only the decoration bytes above are added. Escape sequences printed\n\
         \x20     by COMMAND itself are neither interpreted nor stripped.\n",
    );
    text
}

/// Printable form of a decoration, e.g. `\x1b[31m`.
pub fn escape(bytes: &[u8]) -> String {
    bytes
        .iter()
        .flat_map(|&b| std::ascii::escape_default(b))
        .map(char::from)
        .collect()
}
