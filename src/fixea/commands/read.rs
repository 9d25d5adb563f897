use crate::error::{FixEaError, Result};
use crate::model::{is_dos_stream, AttributeRecord, AttributeSet};
use crate::store::{AttrHandle, ListError};
use std::path::Path;
use tracing::debug;

/// Read every `DosStream.` attribute of the object behind `handle`.
///
/// Records whose value cannot be fetched are skipped. An object whose
/// attributes cannot be listed at all reads as empty; only a listing that
/// fails after the size query is an error.
pub fn run<A: AttrHandle>(handle: &A, path: &Path) -> Result<AttributeSet> {
    let names = match handle.list_names() {
        Ok(names) => names,
        Err(ListError::Unavailable(err)) => {
            debug!(path = %path.display(), error = %err, "no attribute listing, treating as empty");
            return Ok(AttributeSet::new());
        }
        Err(ListError::Fatal(source)) => {
            return Err(FixEaError::ReadFailure {
                path: path.to_path_buf(),
                source,
            });
        }
    };

    let mut set = AttributeSet::new();
    for name in names.into_iter().filter(|n| is_dos_stream(n)) {
        match handle.get_value(&name) {
            Ok(Some(value)) => set.push(AttributeRecord { name, value }),
            Ok(None) => {
                debug!(path = %path.display(), name = %name.to_string_lossy(), "attribute vanished before it was read");
            }
            Err(err) => {
                debug!(path = %path.display(), name = %name.to_string_lossy(), error = %err, "skipping unreadable attribute");
            }
        }
    }

    Ok(set)
}
