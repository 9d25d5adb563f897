use crate::error::{EX_DATAERR, EX_EA_CORRUPTED, EX_OK, EX_OSERR};
use bitflags::bitflags;
use std::ffi::{OsStr, OsString};
use std::os::unix::ffi::OsStrExt;

/// Name prefix of the attributes that mirror AFP resource-fork streams.
pub const DOS_STREAM_PREFIX: &[u8] = b"DosStream.";

/// Leading bytes of a damaged AFP stream header.
pub const AFP_CORRUPTED_MARKER: [u8; 3] = [0x00, b'F', b'P'];

/// Replacement for the first marker byte.
pub const AFP_REPAIR_BYTE: u8 = b'A';

pub const TERMINATOR: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeRecord {
    pub name: OsString,
    pub value: Vec<u8>,
}

impl AttributeRecord {
    pub fn new(name: impl Into<OsString>, value: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            value: value.into(),
        }
    }

    pub fn len(&self) -> usize {
        self.value.len()
    }

    pub fn is_empty(&self) -> bool {
        self.value.is_empty()
    }

    pub fn is_corrupted(&self) -> bool {
        self.value.starts_with(&AFP_CORRUPTED_MARKER)
    }
}

pub fn is_dos_stream(name: &OsStr) -> bool {
    name.as_bytes().starts_with(DOS_STREAM_PREFIX)
}

/// All `DosStream.` records of one object, in enumeration order.
///
/// The set is the only owner of its records; [`SelectionView`]s refer to
/// them by index.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct AttributeSet {
    records: Vec<AttributeRecord>,
}

impl AttributeSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, record: AttributeRecord) {
        self.records.push(record);
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &AttributeRecord> {
        self.records.iter()
    }

    pub fn get(&self, index: usize) -> Option<&AttributeRecord> {
        self.records.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut AttributeRecord> {
        self.records.get_mut(index)
    }
}

impl FromIterator<AttributeRecord> for AttributeSet {
    fn from_iter<I: IntoIterator<Item = AttributeRecord>>(iter: I) -> Self {
        Self {
            records: iter.into_iter().collect(),
        }
    }
}

/// A labelled subset of an [`AttributeSet`], held as indices into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionView {
    pub label: &'static str,
    indices: Vec<usize>,
}

impl SelectionView {
    pub fn new(label: &'static str) -> Self {
        Self {
            label,
            indices: Vec::new(),
        }
    }

    pub fn select(&mut self, index: usize) {
        self.indices.push(index);
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Resolves the view against the set it was built from.
    pub fn records<'a>(&'a self, set: &'a AttributeSet) -> impl Iterator<Item = &'a AttributeRecord> {
        self.indices.iter().filter_map(move |&i| set.get(i))
    }
}

bitflags! {
    /// Result bits of processing one or more objects. Combine with `|`.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Outcome: u8 {
        const CORRUPTED = 1 << 0;
        const WRITE_FAILED = 1 << 1;
        const OBJECT_UNAVAILABLE = 1 << 2;
        const READ_FAILED = 1 << 3;
        const APPEND_FAILED = 1 << 4;
    }
}

impl Outcome {
    pub const OK: Self = Self::empty();

    pub fn is_ok(self) -> bool {
        self.is_empty()
    }

    /// Maps the aggregate to a process exit status.
    ///
    /// Precedence follows what OR-ing the classic codes yields:
    /// EX_OSERR over EX_DATAERR over "corrupted" over success.
    pub fn exit_code(self) -> i32 {
        if self.contains(Outcome::OBJECT_UNAVAILABLE) {
            EX_OSERR
        } else if self.intersects(Outcome::READ_FAILED | Outcome::APPEND_FAILED) {
            EX_DATAERR
        } else if self.intersects(Outcome::CORRUPTED | Outcome::WRITE_FAILED) {
            EX_EA_CORRUPTED
        } else {
            EX_OK
        }
    }
}
