//! Per-directory sequencing of a pattern set against one native enumeration
//! handle at a time.

use log::debug;
use std::path::PathBuf;

use crate::pattern::PatternSet;
use crate::source::{DirectorySource, EntryCursor};
use crate::types::FileRecord;

/// Sequences the patterns of one walk against one directory: open a cursor
/// for the first pattern, drain it, drop it, open the next pattern's cursor,
/// and so on. Each pattern is tried at most once per directory, and each
/// pattern is drained fully regardless of whether earlier patterns matched
/// anything.
///
/// The scanner is pattern-aware only. Directory-kind records pass through;
/// the orchestrator filters them from results.
pub(crate) struct MultiPatternScanner<C> {
    dir: PathBuf,
    next_pattern: usize,
    cursor: Option<C>,
}

impl<C: EntryCursor> MultiPatternScanner<C> {
    pub fn new(dir: PathBuf) -> MultiPatternScanner<C> {
        MultiPatternScanner {
            dir,
            next_pattern: 0,
            cursor: None,
        }
    }

    /// The directory this scanner is bound to.
    pub fn dir(&self) -> &std::path::Path {
        &self.dir
    }

    /// Next matching record, or `None` when every pattern has been drained.
    pub fn next_match<S>(&mut self, source: &S, patterns: &PatternSet) -> Option<FileRecord>
    where
        S: DirectorySource<Cursor = C>,
    {
        loop {
            if let Some(cursor) = self.cursor.as_mut() {
                match cursor.advance() {
                    Ok(Some(raw)) => return Some(FileRecord::from_raw(&self.dir, raw)),
                    Ok(None) => {
                        // Exhausted: release the handle before the next
                        // pattern's cursor opens.
                        self.cursor = None;
                    }
                    Err(err) => {
                        debug!(
                            "enumeration of {} stopped early: {err}",
                            self.dir.display()
                        );
                        self.cursor = None;
                    }
                }
                continue;
            }
            let pattern = patterns.get(self.next_pattern)?;
            self.next_pattern += 1;
            match source.open_cursor(&self.dir, pattern) {
                Ok(cursor) => self.cursor = Some(cursor),
                Err(err) => {
                    // Zero matches for this pattern in this directory; the
                    // remaining patterns still get their turn.
                    debug!(
                        "open {} for pattern {:?} failed: {err}",
                        self.dir.display(),
                        pattern.as_str()
                    );
                }
            }
        }
    }
}
