//! # fix_ea
//!
//! The binary only calls `cli::run()` and exits with the code it returns.
//! Everything user-facing (flags, stdin, printing, logging) lives in `cli/`;
//! everything else lives in the `fixea` library.

mod cli;

fn main() {
    std::process::exit(cli::run());
}
