//! Walk-core tests against an in-memory source with deterministic listing
//! order and injected failures.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};
use std::rc::Rc;

use sweepdir::source::raw::{RawEntry, RawFileTime, SplitU64};
use sweepdir::{
    DirectorySource, EntryAttributes, EntryCursor, Pattern, WalkOptions, Walker,
};

/// File-time ticks for 2020-01-01T00:00:00Z.
const TICKS_2020: u64 = (1_577_836_800 + 11_644_473_600) * 10_000_000;

#[derive(Default)]
struct MockDir {
    files: Vec<String>,
    subdirs: Vec<String>,
    deny_open: bool,
    deny_list: bool,
}

/// In-memory tree. Cloning shares the tree and the audit trails, so a test
/// can keep a handle while the walker owns its copy.
#[derive(Clone, Default)]
struct MockSource {
    dirs: Rc<RefCell<BTreeMap<PathBuf, MockDir>>>,
    cursor_opens: Rc<RefCell<Vec<(PathBuf, String)>>>,
    list_calls: Rc<RefCell<Vec<PathBuf>>>,
}

impl MockSource {
    fn add(&self, path: &str, files: &[&str], subdirs: &[&str]) {
        self.dirs.borrow_mut().insert(
            PathBuf::from(path),
            MockDir {
                files: files.iter().map(|s| s.to_string()).collect(),
                subdirs: subdirs.iter().map(|s| s.to_string()).collect(),
                ..MockDir::default()
            },
        );
    }

    fn deny_open(&self, path: &str) {
        self.dirs
            .borrow_mut()
            .get_mut(Path::new(path))
            .expect("dir exists")
            .deny_open = true;
    }

    fn deny_list(&self, path: &str) {
        self.dirs
            .borrow_mut()
            .get_mut(Path::new(path))
            .expect("dir exists")
            .deny_list = true;
    }
}

fn raw(name: &str, is_dir: bool) -> RawEntry {
    RawEntry {
        name: name.to_string(),
        attributes: if is_dir {
            EntryAttributes::DIRECTORY
        } else {
            EntryAttributes::empty()
        },
        size: SplitU64::from_u64(if is_dir { 0 } else { 42 }),
        created: RawFileTime::from_ticks(TICKS_2020),
        accessed: RawFileTime::from_ticks(TICKS_2020),
        modified: RawFileTime::from_ticks(TICKS_2020),
    }
}

fn denied() -> io::Error {
    io::Error::new(io::ErrorKind::PermissionDenied, "permission denied")
}

struct MockCursor {
    entries: Vec<RawEntry>,
    next: usize,
}

impl EntryCursor for MockCursor {
    fn advance(&mut self) -> io::Result<Option<RawEntry>> {
        let entry = self.entries.get(self.next).cloned();
        self.next += 1;
        Ok(entry)
    }
}

impl DirectorySource for MockSource {
    type Cursor = MockCursor;

    fn check_root(&self, path: &Path) -> io::Result<()> {
        let dirs = self.dirs.borrow();
        let dir = dirs
            .get(path)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))?;
        if dir.deny_open || dir.deny_list {
            return Err(denied());
        }
        Ok(())
    }

    fn open_cursor(&self, dir: &Path, pattern: &Pattern) -> io::Result<MockCursor> {
        self.cursor_opens
            .borrow_mut()
            .push((dir.to_path_buf(), pattern.as_str().to_string()));
        let dirs = self.dirs.borrow();
        let mock = dirs
            .get(dir)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))?;
        if mock.deny_open {
            return Err(denied());
        }
        // The native primitive reports files and directories alike, in
        // listing order, filtered by the single pattern.
        let mut entries: Vec<RawEntry> = Vec::new();
        for name in &mock.files {
            if pattern.matches(name) {
                entries.push(raw(name, false));
            }
        }
        for name in &mock.subdirs {
            if pattern.matches(name) {
                entries.push(raw(name, true));
            }
        }
        Ok(MockCursor { entries, next: 0 })
    }

    fn subdirectories(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        self.list_calls.borrow_mut().push(dir.to_path_buf());
        let dirs = self.dirs.borrow();
        let mock = dirs
            .get(dir)
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no such directory"))?;
        if mock.deny_list {
            return Err(denied());
        }
        Ok(mock.subdirs.iter().map(|n| dir.join(n)).collect())
    }
}

fn walk(source: &MockSource, root: &str, filter: &str, recursive: bool) -> Walker<MockSource> {
    let options = WalkOptions {
        recursive,
        ..WalkOptions::default()
    };
    Walker::with_source(source.clone(), Path::new(root), filter, &options)
        .expect("walk should start")
}

fn full_paths(walker: Walker<MockSource>) -> Vec<PathBuf> {
    walker.map(|r| r.full_path).collect()
}

// --- visitation order ---

#[test]
fn depth_first_preorder_matches_recursive_walk() {
    let source = MockSource::default();
    source.add("/r", &["r.txt"], &["A", "B"]);
    source.add("/r/A", &["a.txt"], &["A1"]);
    source.add("/r/A/A1", &["a1.txt"], &[]);
    source.add("/r/B", &["b.txt"], &[]);

    let paths = full_paths(walk(&source, "/r", "*.txt", true));
    let expected: Vec<PathBuf> = ["/r/r.txt", "/r/A/a.txt", "/r/A/A1/a1.txt", "/r/B/b.txt"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(paths, expected);
}

#[test]
fn same_directory_results_follow_pattern_order() {
    let source = MockSource::default();
    source.add("/r", &["a.txt", "b.log", "c.txt"], &[]);

    let paths = full_paths(walk(&source, "/r", "*.log|*.txt", false));
    let expected: Vec<PathBuf> = ["/r/b.log", "/r/a.txt", "/r/c.txt"]
        .iter()
        .map(PathBuf::from)
        .collect();
    assert_eq!(paths, expected);
}

// --- scan accounting ---

#[test]
fn each_directory_scanned_once_per_pattern() {
    let source = MockSource::default();
    source.add("/r", &["a.txt"], &["A"]);
    source.add("/r/A", &["b.log"], &[]);

    let walker = walk(&source, "/r", "*.txt|*.log", true);
    let _ = full_paths(walker);

    let mut opens = source.cursor_opens.borrow().clone();
    opens.sort();
    let mut expected: Vec<(PathBuf, String)> = vec![
        (PathBuf::from("/r"), "*.txt".to_string()),
        (PathBuf::from("/r"), "*.log".to_string()),
        (PathBuf::from("/r/A"), "*.txt".to_string()),
        (PathBuf::from("/r/A"), "*.log".to_string()),
    ];
    expected.sort();
    assert_eq!(opens, expected);
}

#[test]
fn non_recursive_never_lists_subdirectories() {
    let source = MockSource::default();
    source.add("/r", &["a.txt"], &["A"]);
    source.add("/r/A", &["b.txt"], &[]);

    let paths = full_paths(walk(&source, "/r", "*", false));
    assert_eq!(paths, vec![PathBuf::from("/r/a.txt")]);
    assert!(source.list_calls.borrow().is_empty());
}

// --- failure handling ---

#[test]
fn locked_subdirectory_is_logged_and_walk_continues() {
    let source = MockSource::default();
    source.add("/r", &[], &["Locked", "Open"]);
    source.add("/r/Locked", &["y.txt"], &[]);
    source.add("/r/Open", &["x.txt"], &[]);
    source.deny_open("/r/Locked");
    source.deny_list("/r/Locked");

    let mut walker = walk(&source, "/r", "*.txt", true);
    let paths: Vec<PathBuf> = walker.by_ref().map(|r| r.full_path).collect();
    let skipped = walker.into_skip_log();

    assert_eq!(paths, vec![PathBuf::from("/r/Open/x.txt")]);
    assert_eq!(skipped.len(), 1);
    let entry = skipped.iter().next().unwrap();
    assert_eq!(entry.path, PathBuf::from("/r/Locked"));
    assert_eq!(entry.reason, "permission denied");
}

#[test]
fn open_failure_for_one_directory_still_expands_its_subtree() {
    let source = MockSource::default();
    source.add("/r", &[], &["C"]);
    source.add("/r/C", &["hidden-from-scan.txt"], &["D"]);
    source.add("/r/C/D", &["d.txt"], &[]);
    source.deny_open("/r/C");

    let mut walker = walk(&source, "/r", "*.txt", true);
    let paths: Vec<PathBuf> = walker.by_ref().map(|r| r.full_path).collect();
    let skipped = walker.into_skip_log();

    // Scanning /r/C found nothing, but its children were still reachable and
    // nothing was recorded as skipped.
    assert_eq!(paths, vec![PathBuf::from("/r/C/D/d.txt")]);
    assert!(skipped.is_empty());
}

#[test]
fn unlistable_root_is_fatal() {
    let source = MockSource::default();
    source.add("/r", &["a.txt"], &[]);
    source.deny_list("/r");

    let options = WalkOptions {
        recursive: true,
        ..WalkOptions::default()
    };
    let result = Walker::with_source(source.clone(), Path::new("/r"), "*", &options);
    assert!(result.is_err());
}

// --- record construction ---

#[test]
fn directory_entries_from_cursor_never_reach_results() {
    let source = MockSource::default();
    source.add("/r", &["a.txt"], &["sub"]);
    source.add("/r/sub", &[], &[]);

    // "*" matches the subdirectory name too; the cursor reports it, the
    // orchestrator drops it.
    let records: Vec<_> = walk(&source, "/r", "*", true).collect();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].name, "a.txt");
    assert!(!records[0].is_dir());
}

#[test]
fn raw_filetimes_decode_to_utc() {
    let source = MockSource::default();
    source.add("/r", &["a.txt"], &[]);

    let records: Vec<_> = walk(&source, "/r", "*", false).collect();
    let rec = &records[0];
    assert_eq!(
        rec.modified_at_utc,
        chrono::DateTime::from_timestamp(1_577_836_800, 0).unwrap()
    );
    assert_eq!(rec.size_bytes, 42);
    assert_eq!(rec.full_path, PathBuf::from("/r/a.txt"));
}

#[test]
fn blank_filter_collapses_to_wildcard() {
    let source = MockSource::default();
    source.add("/r", &["a.txt", "b.log"], &[]);

    let paths = full_paths(walk(&source, "/r", " | ", false));
    assert_eq!(
        paths,
        vec![PathBuf::from("/r/a.txt"), PathBuf::from("/r/b.log")]
    );
}
