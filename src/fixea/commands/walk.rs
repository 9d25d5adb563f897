use crate::commands::{process, Reporter};
use crate::config::Options;
use crate::model::Outcome;
use crate::store::AttrHost;
use std::cmp::Ordering;
use std::ffi::OsStr;
use std::os::unix::ffi::OsStrExt;
use std::path::PathBuf;
use tracing::{trace, warn};
use walkdir::WalkDir;

/// Orders sibling entries during a walk.
pub type NameOrder = fn(&OsStr, &OsStr) -> Ordering;

/// Byte-wise name order, i.e. collation in the C locale.
pub fn by_name(a: &OsStr, b: &OsStr) -> Ordering {
    a.as_bytes().cmp(b.as_bytes())
}

/// Process every directory and regular file below `roots`.
///
/// Symbolic links are followed. Each directory is processed before its
/// children, and siblings are visited in `order`. Entries that cannot be
/// read are logged and skipped; the walk always runs to the end.
pub fn run<H: AttrHost>(
    host: &H,
    roots: &[PathBuf],
    order: NameOrder,
    options: &Options,
    reporter: &mut dyn Reporter,
) -> Outcome {
    let mut outcome = Outcome::OK;

    for root in roots {
        let entries = WalkDir::new(root)
            .follow_links(true)
            .sort_by(move |a, b| order(a.file_name(), b.file_name()));

        for entry in entries {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!("{err}");
                    continue;
                }
            };

            let file_type = entry.file_type();
            if file_type.is_dir() || file_type.is_file() {
                outcome |= process::run(host, entry.path(), options, reporter);
            } else {
                trace!(path = %entry.path().display(), "skipping special file");
            }
        }
    }

    outcome
}
