//! Production [`DirectorySource`] backed by `std::fs`.

use log::warn;
use std::fs::{self, Metadata, ReadDir};
use std::io;
use std::path::{Path, PathBuf};

use crate::pattern::Pattern;
use crate::types::EntryAttributes;

use super::raw::{RawEntry, RawFileTime, SplitU64};
use super::{DirectorySource, EntryCursor};

/// Filesystem-backed source. One lazy `ReadDir` handle per cursor; the handle
/// closes when the cursor is dropped.
#[derive(Clone, Copy, Debug, Default)]
pub struct StdSource;

impl StdSource {
    pub fn new() -> StdSource {
        StdSource
    }
}

impl DirectorySource for StdSource {
    type Cursor = StdCursor;

    fn check_root(&self, path: &Path) -> io::Result<()> {
        let meta = fs::metadata(path)?;
        if !meta.is_dir() {
            return Err(io::Error::new(
                io::ErrorKind::NotADirectory,
                "not a directory",
            ));
        }
        // Probe listability up front so an unreadable root fails the walk
        // before any traversal, not mid-stream.
        fs::read_dir(path).map(|_| ())
    }

    fn open_cursor(&self, dir: &Path, pattern: &Pattern) -> io::Result<StdCursor> {
        Ok(StdCursor {
            handle: fs::read_dir(dir)?,
            pattern: pattern.clone(),
        })
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut children = Vec::new();
        for entry in fs::read_dir(dir)? {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!("error reading entry in {}: {err}", dir.display());
                    continue;
                }
            };
            // file_type does not follow symlinks, so symlinked directories
            // are never descended into.
            if entry.file_type().map(|t| t.is_dir()).unwrap_or(false) {
                children.push(entry.path());
            }
        }
        // Platform readdir order is arbitrary; sort so traversal order is
        // stable across runs.
        children.sort();
        Ok(children)
    }
}

/// Cursor over one directory for one pattern, wrapping a live `ReadDir`.
pub struct StdCursor {
    handle: ReadDir,
    pattern: Pattern,
}

impl EntryCursor for StdCursor {
    fn advance(&mut self) -> io::Result<Option<RawEntry>> {
        for entry in self.handle.by_ref() {
            let entry = match entry {
                Ok(e) => e,
                Err(err) => {
                    warn!("error fetching directory entry: {err}");
                    continue;
                }
            };
            let Some(name) = entry.file_name().to_str().map(str::to_owned) else {
                // Non-UTF-8 names can't be matched against a textual pattern.
                continue;
            };
            if !self.pattern.matches(&name) {
                continue;
            }
            let meta = match entry.metadata() {
                Ok(m) => m,
                Err(err) => {
                    warn!("stat failed for {}: {err}", entry.path().display());
                    continue;
                }
            };
            return Ok(Some(raw_entry(name, &meta)));
        }
        Ok(None)
    }
}

fn raw_entry(name: String, meta: &Metadata) -> RawEntry {
    let size = if meta.is_dir() { 0 } else { meta.len() };
    RawEntry {
        attributes: attributes(&name, meta),
        size: SplitU64::from_u64(size),
        created: RawFileTime::from_system_time(meta.created().ok()),
        accessed: RawFileTime::from_system_time(meta.accessed().ok()),
        modified: RawFileTime::from_system_time(meta.modified().ok()),
        name,
    }
}

#[cfg(windows)]
fn attributes(_name: &str, meta: &Metadata) -> EntryAttributes {
    use std::os::windows::fs::MetadataExt;
    EntryAttributes::from_bits_truncate(meta.file_attributes())
}

#[cfg(not(windows))]
fn attributes(name: &str, meta: &Metadata) -> EntryAttributes {
    let mut attrs = EntryAttributes::empty();
    if meta.is_dir() {
        attrs |= EntryAttributes::DIRECTORY;
    }
    if meta.file_type().is_symlink() {
        attrs |= EntryAttributes::SYMLINK;
    }
    if meta.permissions().readonly() {
        attrs |= EntryAttributes::READ_ONLY;
    }
    if name.starts_with('.') {
        attrs |= EntryAttributes::HIDDEN;
    }
    attrs
}
