//! The seam between the walk core and the host filesystem.
//!
//! The core only ever talks to a [`DirectorySource`]: open an enumeration
//! cursor for one (directory, pattern) pair, list a directory's immediate
//! subdirectories, verify the root. Production walks use [`StdSource`];
//! tests substitute in-memory trees with injected failures.

pub mod raw;
mod std_fs;

pub use std_fs::StdSource;

use std::io;
use std::path::{Path, PathBuf};

use crate::pattern::Pattern;
use raw::RawEntry;

/// A scoped native enumeration session over one (directory, pattern) pair.
///
/// The underlying handle is released when the cursor is dropped, on every
/// exit path; a walk holds at most one cursor at a time.
pub trait EntryCursor {
    /// Fetch the next entry matching the cursor's pattern. `Ok(None)` is
    /// ordinary exhaustion, not a failure.
    fn advance(&mut self) -> io::Result<Option<RawEntry>>;
}

/// The host capabilities the walk core consumes.
pub trait DirectorySource {
    type Cursor: EntryCursor;

    /// Verify that `path` exists, is a directory, and can be listed. A walk
    /// refuses to start otherwise; this is the one fatal check.
    fn check_root(&self, path: &Path) -> io::Result<()>;

    /// Open an enumeration cursor over `dir` for a single pattern. An error
    /// here means the directory could not be opened for this pattern; the
    /// scanner treats it as zero matches and moves on.
    fn open_cursor(&self, dir: &Path, pattern: &Pattern) -> io::Result<Self::Cursor>;

    /// Immediate child directories of `dir`. A failure here is recoverable:
    /// the orchestrator logs the skip and carries on with the rest of the
    /// frontier.
    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}
