use std::io::{self, Write};
use std::path::Path;
use std::process::ExitCode;

use rederr::cli::{parse_invocation, Invocation};
use rederr::config::Config;
use rederr::{help, logging, supervisor};

/// Exit code after printing usage instead of running anything.
const USAGE_EXIT: u8 = 1;

fn main() -> ExitCode {
    if let Some(path) = logging::init_tracing() {
        tracing::info!(log = %path.display(), "rederr {} starting", help::VERSION);
    }

    let program = program_name();
    let config = Config::from_env();

    let invocation = match parse_invocation() {
        Ok(invocation) => invocation,
        Err(err) => {
            tracing::warn!(error = %err, "invalid command line");
            if let Err(print_err) = err.print() {
                tracing::warn!(error = %print_err, "failed to print command-line error");
            }
            return ExitCode::from(USAGE_EXIT);
        }
    };

    match invocation {
        Invocation::Usage(level) => {
            let mut stdout = io::stdout().lock();
            let written = stdout
                .write_all(&help::render(level, &program, &config))
                .and_then(|()| stdout.flush());
            if let Err(err) = written {
                tracing::warn!(error = %err, "failed to write usage");
            }
            ExitCode::from(USAGE_EXIT)
        }
        Invocation::Run(command) => {
            let result = supervisor::run(
                &command,
                &config,
                io::stdout().lock(),
                io::stderr().lock(),
            );
            match result {
                Ok(code) => exit_code(code),
                Err(err) => {
                    tracing::error!(error = %err, "run failed");
                    eprintln!("rederr: {err}");
                    exit_code(err.exit_code())
                }
            }
        }
    }
}

fn exit_code(code: i32) -> ExitCode {
    // Exit codes from `ExitStatus::code` are already in 0..=255.
    ExitCode::from(u8::try_from(code).unwrap_or(rederr::INTERNAL_ERROR_EXIT as u8))
}

fn program_name() -> String {
    std::env::args_os()
        .next()
        .as_deref()
        .and_then(|arg0| Path::new(arg0).file_name())
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "rederr".to_string())
}
