//! Sweepdir: resilient directory-tree enumeration.
//!
//! A walk matches one or more glob patterns against every directory in a
//! tree in a single pass, using an explicit work list instead of call-stack
//! recursion, and converts unreadable subdirectories into skip-log entries
//! instead of failures. The visitation order is that of a naive recursive
//! depth-first walk.
//!
//! ```no_run
//! let (files, skipped) = sweepdir::enumerate("/var/log".as_ref(), "*.log|*.txt", true)?;
//! for f in &files {
//!     println!("{} ({} bytes)", f.full_path.display(), f.size_bytes);
//! }
//! for s in &skipped {
//!     eprintln!("skipped {}: {}", s.path.display(), s.reason);
//! }
//! # Ok::<(), sweepdir::WalkError>(())
//! ```

pub mod cli;
pub mod error;
pub mod pattern;
pub mod source;
pub mod types;
pub mod utils;
pub mod walk;

pub use error::WalkError;
pub use pattern::{PATTERN_DELIMITER, Pattern, PatternSet};
pub use source::{DirectorySource, EntryCursor, StdSource};
pub use types::{EntryAttributes, FileRecord, SkipLog, SkippedDir, WalkOptions};
pub use walk::Walker;

use std::path::Path;

/// Enumerate files under `root` matching `filter`, eagerly.
///
/// Returns the ordered matches plus the skip log for directories that could
/// not be listed. The only fatal outcome is an invalid root (missing, not a
/// directory, or unreadable); everything else is recoverable and logged.
pub fn enumerate(
    root: &Path,
    filter: &str,
    recursive: bool,
) -> Result<(Vec<FileRecord>, SkipLog), WalkError> {
    Ok(Walker::new(root, filter, recursive)?.collect_all())
}

/// [`enumerate`] with an explicit [`WalkOptions`] (custom pattern delimiter).
pub fn enumerate_with_options(
    root: &Path,
    filter: &str,
    options: &WalkOptions,
) -> Result<(Vec<FileRecord>, SkipLog), WalkError> {
    Ok(Walker::with_source(StdSource::new(), root, filter, options)?.collect_all())
}

/// Lazy variant of [`enumerate`]: a pull-based iterator of [`FileRecord`].
/// Stop pulling to stop the walk; drain it fully for a complete skip log.
pub fn walker(root: &Path, filter: &str, recursive: bool) -> Result<Walker<StdSource>, WalkError> {
    Walker::new(root, filter, recursive)
}
