//! # Attribute Storage
//!
//! The engine never talks to the host filesystem directly. It opens objects
//! through an [`AttrHost`] and reads and writes their user-namespace extended
//! attributes through the returned [`AttrHandle`].
//!
//! ## Implementations
//!
//! - [`fs::FsHost`]: production host backed by the `xattr` crate. Objects are
//!   opened read-only; closing happens when the handle is dropped.
//! - [`memory::MemoryHost`]: in-memory host for testing. Counts writes and
//!   open handles and can be told to fail any primitive for a given object.
//!
//! ## Names
//!
//! Attribute names crossing this boundary are namespace-relative
//! (`DosStream.rsrc`, never `user.DosStream.rsrc`). Mapping to the platform's
//! spelling of the user namespace is the host's job.

use std::ffi::{OsStr, OsString};
use std::io;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Why a handle could not enumerate its attribute names.
#[derive(Debug)]
pub enum ListError {
    /// The size query failed (no support, no permission, ...). The object is
    /// treated as having no attributes.
    Unavailable(io::Error),
    /// The names could not be fetched even though the size query worked.
    Fatal(io::Error),
}

/// An open filesystem object. Dropping the handle closes it.
pub trait AttrHandle {
    /// Names of all attributes in the user namespace, in host order.
    fn list_names(&self) -> Result<Vec<OsString>, ListError>;

    /// Full value of one attribute. `Ok(None)` if it no longer exists.
    fn get_value(&self, name: &OsStr) -> io::Result<Option<Vec<u8>>>;

    /// Replace the value of one attribute.
    fn set_value(&self, name: &OsStr, value: &[u8]) -> io::Result<()>;
}

/// Opens filesystem objects for attribute access.
pub trait AttrHost {
    type Handle: AttrHandle;

    /// Open `path` read-only.
    fn open(&self, path: &Path) -> io::Result<Self::Handle>;
}
