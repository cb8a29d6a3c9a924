//! Public types for the sweepdir API: matched records, attribute flags, the
//! per-walk skip log, and walk options.

use bitflags::bitflags;
use chrono::{DateTime, Local, Utc};
use serde::Serialize;
use std::path::{Path, PathBuf};

use crate::source::raw::RawEntry;

bitflags! {
    /// Attribute bits of one filesystem entry, in the layout the native
    /// enumeration primitive reports (FILE_ATTRIBUTE_* values). Backends that
    /// have no native attribute word synthesize the same bits from what the
    /// platform offers.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    pub struct EntryAttributes: u32 {
        const READ_ONLY = 0x0001;
        const HIDDEN = 0x0002;
        const SYSTEM = 0x0004;
        const DIRECTORY = 0x0010;
        const ARCHIVE = 0x0020;
        const SYMLINK = 0x0400;
    }
}

impl Serialize for EntryAttributes {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u32(self.bits())
    }
}

/// Immutable snapshot of one matched entry at the moment it was observed.
///
/// `full_path` is `name` joined onto the directory that was being scanned when
/// the entry was found. It is captured at discovery time and never recomputed,
/// so it stays correct even if the tree is mutated after the walk.
#[derive(Clone, Debug, Serialize)]
pub struct FileRecord {
    pub attributes: EntryAttributes,
    /// Creation time, UTC. A zero file-time decodes to the native epoch
    /// (1601-01-01) on filesystems that don't report creation time.
    pub created_at_utc: DateTime<Utc>,
    /// Last access time, UTC.
    pub accessed_at_utc: DateTime<Utc>,
    /// Last modification time, UTC.
    pub modified_at_utc: DateTime<Utc>,
    /// Size in bytes; 0 for directories.
    pub size_bytes: u64,
    /// Base name as reported by the native primitive.
    pub name: String,
    /// Directory being scanned at discovery time, joined with `name`.
    pub full_path: PathBuf,
}

impl FileRecord {
    /// Build a record from a raw native entry found while scanning `dir`.
    pub(crate) fn from_raw(dir: &Path, raw: RawEntry) -> FileRecord {
        FileRecord {
            full_path: dir.join(&raw.name),
            attributes: raw.attributes,
            created_at_utc: raw.created.to_utc(),
            accessed_at_utc: raw.accessed.to_utc(),
            modified_at_utc: raw.modified.to_utc(),
            size_bytes: raw.size.to_u64(),
            name: raw.name,
        }
    }

    pub fn is_dir(&self) -> bool {
        self.attributes.contains(EntryAttributes::DIRECTORY)
    }

    pub fn is_hidden(&self) -> bool {
        self.attributes.contains(EntryAttributes::HIDDEN)
    }

    pub fn is_read_only(&self) -> bool {
        self.attributes.contains(EntryAttributes::READ_ONLY)
    }

    pub fn is_symlink(&self) -> bool {
        self.attributes.contains(EntryAttributes::SYMLINK)
    }

    /// Creation time projected into the local timezone. Derived on demand;
    /// the stored source of truth is always UTC.
    pub fn created_at_local(&self) -> DateTime<Local> {
        self.created_at_utc.with_timezone(&Local)
    }

    /// Last access time projected into the local timezone.
    pub fn accessed_at_local(&self) -> DateTime<Local> {
        self.accessed_at_utc.with_timezone(&Local)
    }

    /// Last modification time projected into the local timezone.
    pub fn modified_at_local(&self) -> DateTime<Local> {
        self.modified_at_utc.with_timezone(&Local)
    }
}

/// One directory that could not be listed during a walk, with the reason.
#[derive(Clone, Debug, Serialize)]
pub struct SkippedDir {
    pub path: PathBuf,
    pub reason: String,
}

/// Ordered record of directories skipped during one walk.
///
/// Owned by a single walk invocation and handed to the caller when it ends;
/// a fresh walk starts with a fresh, empty log. Skips are never raised as
/// errors.
#[derive(Clone, Debug, Default, Serialize)]
pub struct SkipLog {
    entries: Vec<SkippedDir>,
}

impl SkipLog {
    pub fn new() -> SkipLog {
        SkipLog::default()
    }

    pub(crate) fn push(&mut self, path: PathBuf, reason: String) {
        self.entries.push(SkippedDir { path, reason });
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &SkippedDir> {
        self.entries.iter()
    }

    pub fn into_vec(self) -> Vec<SkippedDir> {
        self.entries
    }
}

impl<'a> IntoIterator for &'a SkipLog {
    type Item = &'a SkippedDir;
    type IntoIter = std::slice::Iter<'a, SkippedDir>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter()
    }
}

/// Options for a walk. The default is a non-recursive walk with the standard
/// `|` pattern delimiter.
#[derive(Clone, Debug)]
pub struct WalkOptions {
    /// Descend into subdirectories.
    pub recursive: bool,
    /// Character separating patterns in the filter string.
    pub delimiter: char,
}

impl Default for WalkOptions {
    fn default() -> Self {
        WalkOptions {
            recursive: false,
            delimiter: crate::pattern::PATTERN_DELIMITER,
        }
    }
}
