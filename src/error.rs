//! The one fatal outcome a walk can produce.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error returned before any traversal begins when the root path cannot be
/// walked at all: it does not exist, is not a directory, or cannot be listed.
///
/// Everything that goes wrong *during* a walk is recoverable and lands in the
/// returned [`SkipLog`](crate::SkipLog) instead.
#[derive(Debug, Error)]
pub enum WalkError {
    #[error("cannot walk {}: {}", path.display(), source)]
    InvalidRoot {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl WalkError {
    pub(crate) fn invalid_root(path: &std::path::Path, source: io::Error) -> WalkError {
        WalkError::InvalidRoot {
            path: path.to_path_buf(),
            source,
        }
    }
}
