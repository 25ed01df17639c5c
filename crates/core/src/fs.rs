//! Filesystem utilities

use std::path::{Path, PathBuf};

use log::debug;

/// Check if a path exists and is a regular file
pub fn is_file(path: &str) -> bool {
    Path::new(path).is_file()
}

/// Return the first candidate that points at an existing file.
///
/// Candidates are checked in order, so callers list the preferred
/// location first.
pub fn first_existing<I, P>(candidates: I) -> Option<PathBuf>
where
    I: IntoIterator<Item = P>,
    P: Into<PathBuf>,
{
    candidates.into_iter().map(Into::into).find(|candidate| {
        let found = candidate.is_file();
        debug!("checked {}: found={}", candidate.display(), found);
        found
    })
}
