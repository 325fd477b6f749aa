use crate::error::{BzdirError, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing::{debug, warn};
use walkdir::WalkDir;

/// Names of the regular files directly inside `dir`, sorted by name.
///
/// Symlinks are followed, so a link to a regular file counts and a link to
/// a directory does not. Subdirectories are never entered.
pub fn list_files(dir: &Path) -> Result<Vec<String>> {
    let md = fs::metadata(dir).map_err(BzdirError::dir(dir))?;
    if !md.is_dir() {
        return Err(BzdirError::DirectoryInaccessible {
            path: dir.to_path_buf(),
            source: io::Error::new(io::ErrorKind::NotADirectory, "not a directory"),
        });
    }

    let mut names = Vec::new();
    for entry in WalkDir::new(dir)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name()
    {
        let entry = match entry {
            Ok(e) => e,
            Err(e) if e.depth() == 0 => return Err(BzdirError::dir(dir)(e.into())),
            Err(e) => {
                // dangling symlink or an entry that vanished mid-listing
                debug!(error = %e, "skipping unreadable entry");
                continue;
            }
        };
        if !entry.file_type().is_file() {
            continue;
        }
        match entry.file_name().to_str() {
            Some(name) => names.push(name.to_owned()),
            None => warn!(path = %entry.path().display(), "skipping non UTF-8 file name"),
        }
    }
    Ok(names)
}

/// Total size of `names` inside `dir` in decimal kilobytes (bytes / 1000).
pub fn size_kb<S: AsRef<str>>(dir: &Path, names: &[S]) -> Result<f64> {
    let mut bytes: u64 = 0;
    for name in names {
        let p = dir.join(name.as_ref());
        bytes += fs::metadata(&p).map_err(BzdirError::file(p))?.len();
    }
    Ok(bytes as f64 / 1000.0)
}
