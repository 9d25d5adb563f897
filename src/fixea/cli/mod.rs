//! # CLI Layer
//!
//! The CLI layer is the **only** place that:
//! - Knows about stdin, stdout and stderr
//! - Parses arguments
//! - Installs the logger
//! - Decides the process exit code
//!
//! ## Flow
//!
//! 1. Parse flags with clap (`setup.rs`). Parse errors exit with `EX_USAGE`.
//! 2. Pick the path: a line piped on stdin wins over the positional argument.
//! 3. Build `FixEaApi<FsHost>` from the options and run it with a
//!    `ConsoleReporter` (`print.rs`).
//! 4. Map the `Outcome`, or the error that stopped the run, to an exit code.

mod print;
mod setup;

use clap::error::ErrorKind;
use clap::{CommandFactory, Parser};
use fixea::api::FixEaApi;
use fixea::error::{FixEaError, EX_OK, EX_USAGE};
use fixea::store::fs::FsHost;
use print::{init_logging, ConsoleReporter};
use setup::Cli;
use std::ffi::OsString;
use std::io::{self, BufRead, IsTerminal};
use std::os::unix::ffi::OsStringExt;
use std::path::PathBuf;

pub fn run() -> i32 {
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let code = match err.kind() {
                ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => EX_OK,
                _ => EX_USAGE,
            };
            let _ = err.print();
            return code;
        }
    };

    init_logging(cli.debug);

    let Some(path) = path_from_stdin().or_else(|| cli.path.clone()) else {
        let err = FixEaError::Usage("no path given".to_string());
        eprintln!("fix_ea: {}\n\n{}", err, Cli::command().render_help());
        return err.exit_code();
    };

    let api = FixEaApi::new(FsHost::new(), cli.options());
    let mut reporter = ConsoleReporter::stdout();
    match api.run(&path, &mut reporter) {
        Ok(outcome) => outcome.exit_code(),
        Err(err) => {
            eprintln!("fix_ea: {}", err);
            err.exit_code()
        }
    }
}

/// The first line of stdin, when stdin is a pipe or file and not empty.
fn path_from_stdin() -> Option<PathBuf> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return None;
    }
    read_path_line(stdin.lock())
}

fn read_path_line<R: BufRead>(mut input: R) -> Option<PathBuf> {
    let mut line = Vec::new();
    input.read_until(b'\n', &mut line).ok()?;
    if line.last() == Some(&b'\n') {
        line.pop();
    }
    if line.is_empty() {
        return None;
    }
    Some(PathBuf::from(OsString::from_vec(line)))
}
