//! Command-line parsing: `rederr [-h|--help] COMMAND [ARG...]`.

use clap::{ArgAction, Parser};
use std::ffi::OsString;

#[derive(Debug, Parser)]
#[command(
    name = "rederr",
    disable_help_flag = true,
    disable_version_flag = true,
    args_override_self = true,
    override_usage = "rederr [-h|--help] COMMAND [ARG]..."
)]
pub struct Cli {
    /// Show usage.
    #[arg(short = 'h', action = ArgAction::SetTrue)]
    pub short_help: bool,

    /// Show usage, environment variables and notes.
    #[arg(long = "help", action = ArgAction::SetTrue)]
    pub long_help: bool,

    /// Command to run, followed by its arguments. Everything from here on is
    /// passed through untouched, including arguments that look like flags.
    #[arg(
        value_name = "COMMAND",
        trailing_var_arg = true,
        allow_hyphen_values = true,
        num_args = 0..
    )]
    pub command: Vec<OsString>,
}

/// How much help text to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HelpLevel {
    Short,
    Long,
}

/// The program and arguments of the child to run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandLine {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl CommandLine {
    pub fn program_lossy(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

/// What a parsed command line asks rederr to do.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Invocation {
    Usage(HelpLevel),
    Run(CommandLine),
}

impl Cli {
    pub fn into_invocation(self) -> Invocation {
        if self.long_help {
            return Invocation::Usage(HelpLevel::Long);
        }
        if self.short_help {
            return Invocation::Usage(HelpLevel::Short);
        }
        let mut command = self.command.into_iter();
        match command.next() {
            Some(program) => Invocation::Run(CommandLine {
                program,
                args: command.collect(),
            }),
            None => Invocation::Usage(HelpLevel::Short),
        }
    }
}

/// Parses `argv` (including the program name).
pub fn parse_invocation_from<I, T>(argv: I) -> Result<Invocation, clap::Error>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString> + Clone,
{
    Cli::try_parse_from(argv).map(Cli::into_invocation)
}

pub fn parse_invocation() -> Result<Invocation, clap::Error> {
    parse_invocation_from(std::env::args_os())
}
