use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::diagnostics::{FixtureError, Result};

/// Recursively lists the regular files under `dir`.
///
/// The returned list is sorted so that checks run in a deterministic order.
/// Paths are joined onto `dir` and therefore keep its `expected` segment. A
/// directory that does not exist yields an empty list.
pub fn expected_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let dir = dir.as_ref();
    if !dir.exists() {
        debug!("no expected tree at {}", dir.display());
        return Ok(Vec::new());
    }

    let mut files = Vec::new();
    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|source| FixtureError::Walk {
            path: dir.to_path_buf(),
            source,
        })?;
        if !entry.file_type().is_file() {
            continue;
        }
        debug!("discovered fixture {}", entry.path().display());
        files.push(entry.into_path());
    }
    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn lists_nested_files_sorted() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("b/c")).unwrap();
        fs::write(dir.path().join("b/c/z.js"), "").unwrap();
        fs::write(dir.path().join("b/a.js"), "").unwrap();
        fs::write(dir.path().join("a.js"), "").unwrap();

        let files = expected_files(dir.path()).unwrap();
        let rel: Vec<_> = files
            .iter()
            .map(|p| p.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();
        assert_eq!(
            rel,
            vec![
                PathBuf::from("a.js"),
                PathBuf::from("b/a.js"),
                PathBuf::from("b/c/z.js"),
            ]
        );
    }

    #[test]
    fn missing_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(expected_files(dir.path().join("absent")).unwrap().is_empty());
    }

    #[test]
    fn empty_directory_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(expected_files(dir.path()).unwrap().is_empty());
    }
}
