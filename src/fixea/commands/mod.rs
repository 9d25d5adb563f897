//! # Command Layer
//!
//! One module per stage of the per-object pipeline:
//!
//! ```text
//! walk ──▶ process ──▶ read ──▶ classify ──▶ repair
//!                           └─▶ append::select ──▶ append
//! ```
//!
//! Nothing here prints. Stages that have something to tell the user emit
//! [`Event`]s into a [`Reporter`]; failures worth a warning go to `tracing`.

use crate::config::Options;
use std::ffi::OsString;
use std::path::{Path, PathBuf};

pub mod append;
pub mod classify;
pub mod helpers;
pub mod process;
pub mod read;
pub mod repair;
pub mod walk;

/// Something the user asked to be told about a single record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Bytes of the record before it is touched (debug mode).
    Dump { name: OsString, dump: String },
    Corrupted { name: OsString },
    Fixed { name: OsString },
    Appended { name: OsString },
}

impl Event {
    pub fn name(&self) -> &OsString {
        match self {
            Event::Dump { name, .. }
            | Event::Corrupted { name }
            | Event::Fixed { name }
            | Event::Appended { name } => name,
        }
    }
}

pub trait Reporter {
    fn report(&mut self, path: &Path, event: Event);
}

/// Collects events, mostly for tests.
impl Reporter for Vec<(PathBuf, Event)> {
    fn report(&mut self, path: &Path, event: Event) {
        self.push((path.to_path_buf(), event));
    }
}

/// Discards every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NullReporter;

impl Reporter for NullReporter {
    fn report(&mut self, _path: &Path, _event: Event) {}
}

/// What the record-level stages need to know about the object being processed.
pub struct ObjectContext<'a> {
    pub path: &'a Path,
    pub options: &'a Options,
    reporter: &'a mut dyn Reporter,
}

impl<'a> ObjectContext<'a> {
    pub fn new(path: &'a Path, options: &'a Options, reporter: &'a mut dyn Reporter) -> Self {
        Self {
            path,
            options,
            reporter,
        }
    }

    pub fn emit(&mut self, event: Event) {
        self.reporter.report(self.path, event);
    }

    /// Emit `event` only in verbose mode.
    pub fn verbose(&mut self, event: Event) {
        if self.options.verbose {
            self.emit(event);
        }
    }
}
