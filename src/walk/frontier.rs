//! Explicit work list of directories awaiting a scan.

use std::path::PathBuf;

/// LIFO frontier replacing the call stack of a recursive walk. Each entry is
/// pushed once when discovered and consumed once when popped.
#[derive(Debug)]
pub(crate) struct Frontier {
    stack: Vec<PathBuf>,
}

impl Frontier {
    /// A frontier seeded with the walk's root.
    pub fn seeded(root: PathBuf) -> Frontier {
        Frontier { stack: vec![root] }
    }

    /// Next directory to scan, or `None` when the walk is done.
    pub fn pop(&mut self) -> Option<PathBuf> {
        self.stack.pop()
    }

    /// Queue the children of the directory just scanned. They are pushed in
    /// reverse discovery order so the first-discovered child is popped (and
    /// visited) first, reproducing the visitation order of a recursive
    /// depth-first walk from a LIFO stack.
    pub fn push_children(&mut self, children: Vec<PathBuf>) {
        self.stack.extend(children.into_iter().rev());
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.stack.len()
    }
}
