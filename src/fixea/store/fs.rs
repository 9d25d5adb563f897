use super::{AttrHandle, AttrHost, ListError};
use std::ffi::{OsStr, OsString};
use std::fs::File;
use std::io;
use std::os::unix::ffi::{OsStrExt, OsStringExt};
use std::path::Path;
use xattr::FileExt;

#[cfg(target_os = "macos")]
const USER_NAMESPACE: &[u8] = b"";
#[cfg(not(target_os = "macos"))]
const USER_NAMESPACE: &[u8] = b"user.";

/// Host backed by the real filesystem.
#[derive(Debug, Default, Clone, Copy)]
pub struct FsHost;

impl FsHost {
    pub fn new() -> Self {
        Self
    }
}

impl AttrHost for FsHost {
    type Handle = FsHandle;

    fn open(&self, path: &Path) -> io::Result<FsHandle> {
        let file = File::open(path)?;
        Ok(FsHandle { file })
    }
}

#[derive(Debug)]
pub struct FsHandle {
    file: File,
}

fn qualify(name: &OsStr) -> OsString {
    let mut full = Vec::with_capacity(USER_NAMESPACE.len() + name.len());
    full.extend_from_slice(USER_NAMESPACE);
    full.extend_from_slice(name.as_bytes());
    OsString::from_vec(full)
}

fn unqualify(name: &OsStr) -> Option<&OsStr> {
    name.as_bytes()
        .strip_prefix(USER_NAMESPACE)
        .map(OsStr::from_bytes)
}

impl AttrHandle for FsHandle {
    fn list_names(&self) -> Result<Vec<OsString>, ListError> {
        let names = self.file.list_xattr().map_err(|err| match err.kind() {
            io::ErrorKind::OutOfMemory => ListError::Fatal(err),
            _ => ListError::Unavailable(err),
        })?;

        Ok(names
            .filter_map(|name| unqualify(&name).map(OsStr::to_os_string))
            .collect())
    }

    fn get_value(&self, name: &OsStr) -> io::Result<Option<Vec<u8>>> {
        self.file.get_xattr(qualify(name))
    }

    fn set_value(&self, name: &OsStr, value: &[u8]) -> io::Result<()> {
        self.file.set_xattr(qualify(name), value)
    }
}
