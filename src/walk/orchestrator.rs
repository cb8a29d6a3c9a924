//! The traversal driver: pops directories off the frontier, runs the
//! multi-pattern scanner over each, and expands the frontier with
//! subdirectories in recursive mode.

use log::{debug, warn};
use std::path::Path;

use crate::error::WalkError;
use crate::pattern::PatternSet;
use crate::source::{DirectorySource, StdSource};
use crate::types::{FileRecord, SkipLog, WalkOptions};

use super::frontier::Frontier;
use super::scanner::MultiPatternScanner;

/// Pull-based walk over a directory tree.
///
/// Yields one [`FileRecord`] per matched file; directories reported by the
/// native primitive are filtered out here. A caller wanting early termination
/// simply stops pulling. Unreadable subdirectories never fail the iteration;
/// they are appended to the [`SkipLog`], which is complete once the iterator
/// returns `None` and can then be taken with [`Walker::into_skip_log`].
pub struct Walker<S: DirectorySource = StdSource> {
    source: S,
    patterns: PatternSet,
    recursive: bool,
    frontier: Frontier,
    scanner: Option<MultiPatternScanner<S::Cursor>>,
    skip_log: SkipLog,
}

impl Walker<StdSource> {
    /// Walk `root` on the real filesystem. Fails up front when `root` does
    /// not exist, is not a directory, or cannot be listed.
    pub fn new(root: &Path, filter: &str, recursive: bool) -> Result<Walker<StdSource>, WalkError> {
        let options = WalkOptions {
            recursive,
            ..WalkOptions::default()
        };
        Walker::with_source(StdSource::new(), root, filter, &options)
    }
}

impl<S: DirectorySource> Walker<S> {
    /// Walk `root` through an arbitrary [`DirectorySource`].
    pub fn with_source(
        source: S,
        root: &Path,
        filter: &str,
        options: &WalkOptions,
    ) -> Result<Walker<S>, WalkError> {
        source
            .check_root(root)
            .map_err(|err| WalkError::invalid_root(root, err))?;
        let patterns = PatternSet::parse(filter, options.delimiter);
        debug!(
            "walking {} with {} pattern(s), recursive={}",
            root.display(),
            patterns.len(),
            options.recursive
        );
        Ok(Walker {
            source,
            patterns,
            recursive: options.recursive,
            frontier: Frontier::seeded(root.to_path_buf()),
            scanner: None,
            skip_log: SkipLog::new(),
        })
    }

    /// Skips recorded so far. Complete only after the iterator is exhausted.
    pub fn skip_log(&self) -> &SkipLog {
        &self.skip_log
    }

    /// Consume the walker and take the skip log.
    pub fn into_skip_log(self) -> SkipLog {
        self.skip_log
    }

    /// Drain the walk eagerly into `(records, skip_log)`.
    pub fn collect_all(mut self) -> (Vec<FileRecord>, SkipLog) {
        let mut records = Vec::new();
        for record in &mut self {
            records.push(record);
        }
        (records, self.skip_log)
    }

    /// List the children of a scanned directory onto the frontier. A listing
    /// failure is recoverable: the subtree is skipped and logged, the walk
    /// goes on.
    fn expand(&mut self, dir: &Path) {
        match self.source.subdirectories(dir) {
            Ok(children) => self.frontier.push_children(children),
            Err(err) => {
                warn!("skipping subtree {}: {err}", dir.display());
                self.skip_log.push(dir.to_path_buf(), err.to_string());
            }
        }
    }
}

impl<S: DirectorySource> Iterator for Walker<S> {
    type Item = FileRecord;

    fn next(&mut self) -> Option<FileRecord> {
        loop {
            if let Some(scanner) = self.scanner.as_mut() {
                while let Some(record) = scanner.next_match(&self.source, &self.patterns) {
                    // The native primitive reports directories alongside
                    // files; results carry files only.
                    if record.is_dir() {
                        continue;
                    }
                    return Some(record);
                }
                let done = self.scanner.take();
                if self.recursive
                    && let Some(scanner) = done
                {
                    self.expand(scanner.dir());
                }
            }
            let dir = self.frontier.pop()?;
            self.scanner = Some(MultiPatternScanner::new(dir));
        }
    }
}
