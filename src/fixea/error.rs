use std::ffi::OsString;
use std::path::PathBuf;
use thiserror::Error;

/// Exit code for a run that found (and did not fix) corrupted attributes.
pub const EX_EA_CORRUPTED: i32 = 1;
/// sysexits(3) codes used by the binary.
pub const EX_OK: i32 = 0;
pub const EX_USAGE: i32 = 64;
pub const EX_DATAERR: i32 = 65;
pub const EX_OSERR: i32 = 71;

#[derive(Error, Debug)]
pub enum FixEaError {
    #[error("{}: cannot open: {source}", path.display())]
    Unavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: cannot list extended attributes: {source}", path.display())]
    ReadFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: cannot grow value buffer ({} bytes)", name.to_string_lossy(), requested)]
    AppendFailure { name: OsString, requested: usize },

    #[error("{}: realpath: {source}", path.display())]
    Resolve {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{}: stat: {source}", path.display())]
    Stat {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} must be a directory when -r is used", path.display())]
    NotADirectory { path: PathBuf },

    #[error("{0}")]
    Usage(String),
}

impl FixEaError {
    /// The process exit code for an error that stops the whole run.
    pub fn exit_code(&self) -> i32 {
        match self {
            FixEaError::Usage(_) | FixEaError::NotADirectory { .. } => EX_USAGE,
            FixEaError::ReadFailure { .. } | FixEaError::AppendFailure { .. } => EX_DATAERR,
            FixEaError::Unavailable { .. }
            | FixEaError::Resolve { .. }
            | FixEaError::Stat { .. } => EX_OSERR,
        }
    }
}

pub type Result<T> = std::result::Result<T, FixEaError>;
