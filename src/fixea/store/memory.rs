use super::{AttrHandle, AttrHost, ListError};
use std::cell::RefCell;
use std::collections::{BTreeMap, HashSet};
use std::ffi::{OsStr, OsString};
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

#[derive(Default)]
struct MemState {
    objects: BTreeMap<PathBuf, Vec<(OsString, Vec<u8>)>>,
    unavailable: HashSet<PathBuf>,
    unlisted: HashSet<PathBuf>,
    fatal_listing: HashSet<PathBuf>,
    failing_gets: HashSet<(PathBuf, OsString)>,
    failing_sets: HashSet<(PathBuf, OsString)>,
    writes: Vec<(PathBuf, OsString)>,
    opened: Vec<PathBuf>,
    open_handles: usize,
}

/// In-memory host for testing. Does NOT touch the filesystem.
///
/// Uses `Rc<RefCell<_>>` so handles can reach back into the shared state
/// while the engine only ever holds `&self`. Cloning the host shares state.
#[derive(Clone, Default)]
pub struct MemoryHost {
    state: Rc<RefCell<MemState>>,
}

impl MemoryHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an object with no attributes.
    pub fn add_object(&self, path: impl Into<PathBuf>) {
        self.state
            .borrow_mut()
            .objects
            .entry(path.into())
            .or_default();
    }

    /// Create or replace an attribute, registering the object if needed.
    pub fn set_attr(&self, path: impl Into<PathBuf>, name: &str, value: &[u8]) {
        let mut state = self.state.borrow_mut();
        let attrs = state.objects.entry(path.into()).or_default();
        store(attrs, OsStr::new(name), value);
    }

    pub fn attr(&self, path: impl AsRef<Path>, name: &str) -> Option<Vec<u8>> {
        let state = self.state.borrow();
        state
            .objects
            .get(path.as_ref())?
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    pub fn fail_open(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().unavailable.insert(path.into());
    }

    /// Make the size query of the listing fail.
    pub fn fail_listing(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().unlisted.insert(path.into());
    }

    /// Make the listing fail after the size query.
    pub fn fail_listing_fatally(&self, path: impl Into<PathBuf>) {
        self.state.borrow_mut().fatal_listing.insert(path.into());
    }

    pub fn fail_get(&self, path: impl Into<PathBuf>, name: &str) {
        self.state
            .borrow_mut()
            .failing_gets
            .insert((path.into(), OsString::from(name)));
    }

    pub fn fail_set(&self, path: impl Into<PathBuf>, name: &str) {
        self.state
            .borrow_mut()
            .failing_sets
            .insert((path.into(), OsString::from(name)));
    }

    /// Successful `set_value` calls so far.
    pub fn write_count(&self) -> usize {
        self.state.borrow().writes.len()
    }

    pub fn writes(&self) -> Vec<(PathBuf, OsString)> {
        self.state.borrow().writes.clone()
    }

    /// Paths passed to a successful `open`, in call order.
    pub fn opened(&self) -> Vec<PathBuf> {
        self.state.borrow().opened.clone()
    }

    /// Handles opened and not yet dropped.
    pub fn open_handles(&self) -> usize {
        self.state.borrow().open_handles
    }
}

fn store(attrs: &mut Vec<(OsString, Vec<u8>)>, name: &OsStr, value: &[u8]) {
    match attrs.iter_mut().find(|(n, _)| n == name) {
        Some((_, v)) => *v = value.to_vec(),
        None => attrs.push((name.to_os_string(), value.to_vec())),
    }
}

impl AttrHost for MemoryHost {
    type Handle = MemoryHandle;

    fn open(&self, path: &Path) -> io::Result<MemoryHandle> {
        let mut state = self.state.borrow_mut();
        if state.unavailable.contains(path) {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        if !state.objects.contains_key(path) {
            return Err(io::Error::from(io::ErrorKind::NotFound));
        }
        state.opened.push(path.to_path_buf());
        state.open_handles += 1;
        Ok(MemoryHandle {
            state: Rc::clone(&self.state),
            path: path.to_path_buf(),
        })
    }
}

pub struct MemoryHandle {
    state: Rc<RefCell<MemState>>,
    path: PathBuf,
}

impl AttrHandle for MemoryHandle {
    fn list_names(&self) -> Result<Vec<OsString>, ListError> {
        let state = self.state.borrow();
        if state.unlisted.contains(&self.path) {
            return Err(ListError::Unavailable(io::Error::from(
                io::ErrorKind::Unsupported,
            )));
        }
        if state.fatal_listing.contains(&self.path) {
            return Err(ListError::Fatal(io::Error::from(io::ErrorKind::OutOfMemory)));
        }
        Ok(state
            .objects
            .get(&self.path)
            .map(|attrs| attrs.iter().map(|(n, _)| n.clone()).collect())
            .unwrap_or_default())
    }

    fn get_value(&self, name: &OsStr) -> io::Result<Option<Vec<u8>>> {
        let state = self.state.borrow();
        if state
            .failing_gets
            .contains(&(self.path.clone(), name.to_os_string()))
        {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        Ok(state.objects.get(&self.path).and_then(|attrs| {
            attrs
                .iter()
                .find(|(n, _)| n == name)
                .map(|(_, v)| v.clone())
        }))
    }

    fn set_value(&self, name: &OsStr, value: &[u8]) -> io::Result<()> {
        let mut state = self.state.borrow_mut();
        if state
            .failing_sets
            .contains(&(self.path.clone(), name.to_os_string()))
        {
            return Err(io::Error::from(io::ErrorKind::PermissionDenied));
        }
        let attrs = state
            .objects
            .get_mut(&self.path)
            .ok_or_else(|| io::Error::from(io::ErrorKind::NotFound))?;
        store(attrs, name, value);
        state.writes.push((self.path.clone(), name.to_os_string()));
        Ok(())
    }
}

impl Drop for MemoryHandle {
    fn drop(&mut self) {
        self.state.borrow_mut().open_handles -= 1;
    }
}

// --- Test Fixtures ---

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures {
    use super::*;

    /// `DosStream.rsrc` with a damaged AFP header.
    pub const CORRUPTED_RSRC: [u8; 5] = [0x00, 0x46, 0x50, 0x01, 0x02];
    /// The same value after repair.
    pub const REPAIRED_RSRC: [u8; 5] = [0x41, 0x46, 0x50, 0x01, 0x02];

    pub struct HostFixture {
        pub host: MemoryHost,
    }

    impl Default for HostFixture {
        fn default() -> Self {
            Self::new()
        }
    }

    impl HostFixture {
        pub fn new() -> Self {
            Self {
                host: MemoryHost::new(),
            }
        }

        pub fn with_corrupted(self, path: &str) -> Self {
            self.host.set_attr(path, "DosStream.rsrc", &CORRUPTED_RSRC);
            self
        }

        pub fn with_attr(self, path: &str, name: &str, value: &[u8]) -> Self {
            self.host.set_attr(path, name, value);
            self
        }
    }
}
