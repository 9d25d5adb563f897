//! # API Facade
//!
//! [`FixEaApi`] is the single entry point for every UI. It resolves the target
//! path, applies the "recursive needs a directory" rule and dispatches to the
//! object processor or the tree walker.
//!
//! Like the command layer it never prints; per-record events go to the
//! [`Reporter`] the caller passes in, and the result is an [`Outcome`] (or an
//! error that stopped the run before any object was touched).
//!
//! `FixEaApi<H: AttrHost>` is generic over the host:
//! - Production: `FixEaApi<FsHost>`
//! - Testing: `FixEaApi<MemoryHost>`

use crate::commands::{process, walk, Reporter};
use crate::config::Options;
use crate::error::{FixEaError, Result};
use crate::model::Outcome;
use crate::store::AttrHost;
use std::fs;
use std::path::{Path, PathBuf};

pub struct FixEaApi<H: AttrHost> {
    host: H,
    options: Options,
    order: walk::NameOrder,
}

impl<H: AttrHost> FixEaApi<H> {
    pub fn new(host: H, options: Options) -> Self {
        Self {
            host,
            options,
            order: walk::by_name,
        }
    }

    /// Replace the sibling order used by recursive runs.
    pub fn with_order(mut self, order: walk::NameOrder) -> Self {
        self.order = order;
        self
    }

    /// Process a single object.
    pub fn process(&self, path: &Path, reporter: &mut dyn Reporter) -> Outcome {
        process::run(&self.host, path, &self.options, reporter)
    }

    /// Process every directory and file below `roots`.
    pub fn walk(&self, roots: &[PathBuf], reporter: &mut dyn Reporter) -> Outcome {
        walk::run(&self.host, roots, self.order, &self.options, reporter)
    }

    /// Resolve `path` and process it, recursively if the options say so.
    pub fn run(&self, path: &Path, reporter: &mut dyn Reporter) -> Result<Outcome> {
        let resolved = fs::canonicalize(path).map_err(|source| FixEaError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;

        if !self.options.recursive {
            return Ok(self.process(&resolved, reporter));
        }

        let metadata = fs::metadata(&resolved).map_err(|source| FixEaError::Stat {
            path: resolved.clone(),
            source,
        })?;
        if !metadata.is_dir() {
            return Err(FixEaError::NotADirectory {
                path: path.to_path_buf(),
            });
        }

        Ok(self.walk(&[resolved], reporter))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{Event, NullReporter};
    use crate::error::{EX_OSERR, EX_USAGE};
    use crate::store::memory::fixtures::{CORRUPTED_RSRC, REPAIRED_RSRC};
    use crate::store::memory::MemoryHost;
    use std::cmp::Ordering;
    use std::ffi::OsStr;
    use tempfile::TempDir;

    fn setup() -> (TempDir, PathBuf, MemoryHost) {
        let temp_dir = tempfile::tempdir().unwrap();
        let root = fs::canonicalize(temp_dir.path()).unwrap();
        let host = MemoryHost::new();
        (temp_dir, root, host)
    }

    #[test]
    fn single_object_is_resolved_before_processing() {
        let (_tmp, root, host) = setup();
        let file = root.join("obj");
        fs::write(&file, b"").unwrap();
        host.set_attr(&file, "DosStream.rsrc", &CORRUPTED_RSRC);

        let api = FixEaApi::new(host.clone(), Options::fix());
        let outcome = api
            .run(&root.join(".").join("obj"), &mut NullReporter)
            .unwrap();

        assert!(outcome.is_ok());
        assert_eq!(host.attr(&file, "DosStream.rsrc").unwrap(), REPAIRED_RSRC);
    }

    #[test]
    fn missing_path_cannot_be_resolved() {
        let (_tmp, root, host) = setup();
        let api = FixEaApi::new(host, Options::check());
        let err = api.run(&root.join("absent"), &mut NullReporter).unwrap_err();
        assert!(matches!(err, FixEaError::Resolve { .. }));
        assert_eq!(err.exit_code(), EX_OSERR);
    }

    #[test]
    fn recursive_requires_a_directory() {
        let (_tmp, root, host) = setup();
        let file = root.join("obj");
        fs::write(&file, b"").unwrap();
        host.add_object(&file);

        let api = FixEaApi::new(host.clone(), Options::check().with_recursive(true));
        let err = api.run(&file, &mut NullReporter).unwrap_err();
        assert_eq!(err.exit_code(), EX_USAGE);
        assert!(host.opened().is_empty());
    }

    #[test]
    fn recursive_run_walks_the_directory() {
        let (_tmp, root, host) = setup();
        host.add_object(&root);
        for name in ["one", "two"] {
            fs::write(root.join(name), b"").unwrap();
            host.set_attr(root.join(name), "DosStream.rsrc", &CORRUPTED_RSRC);
        }

        let api = FixEaApi::new(
            host.clone(),
            Options::check().with_recursive(true).with_verbose(true),
        );
        let mut events: Vec<(PathBuf, Event)> = Vec::new();
        let outcome = api.run(&root, &mut events).unwrap();

        assert_eq!(outcome, Outcome::CORRUPTED);
        assert_eq!(events.len(), 2);
        assert_eq!(host.opened().len(), 3);
    }

    #[test]
    fn custom_order_is_used() {
        fn reversed(a: &OsStr, b: &OsStr) -> Ordering {
            walk::by_name(b, a)
        }

        let (_tmp, root, host) = setup();
        host.add_object(&root);
        for name in ["a", "b"] {
            fs::write(root.join(name), b"").unwrap();
            host.add_object(root.join(name));
        }

        let api = FixEaApi::new(host.clone(), Options::check()).with_order(reversed);
        api.walk(&[root.clone()], &mut NullReporter);

        assert_eq!(host.opened(), vec![root.clone(), root.join("b"), root.join("a")]);
    }
}
