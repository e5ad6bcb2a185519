//! Compose file discovery.
//!
//! Finds every `docker-compose.yml` at any depth under the migration
//! root. The root itself must exist and be a directory; an empty result
//! set is not an error.

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// The fixed file name the migration targets.
pub const COMPOSE_FILE_NAME: &str = "docker-compose.yml";

/// Find all docker-compose.yml files under `root`, recursively.
///
/// Fails when `root` is missing or is not a directory. Entries that are
/// not regular files (e.g. a directory named docker-compose.yml) are
/// skipped.
pub fn find_compose_files(root: &Path) -> Result<Vec<PathBuf>> {
    if !root.exists() {
        return Err(Error::root_not_found(root.to_string_lossy()));
    }

    if !root.is_dir() {
        return Err(Error::root_not_a_directory(root.to_string_lossy()));
    }

    let pattern = root.join("**").join(COMPOSE_FILE_NAME);
    let pattern = pattern.to_string_lossy();

    let files: Vec<PathBuf> = glob::glob(&pattern)
        .map_err(|e| Error::scan_invalid_pattern(pattern.as_ref(), e.to_string()))?
        .filter_map(|entry| entry.ok())
        .filter(|p| p.is_file())
        .collect();

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn finds_files_at_any_depth() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::create_dir_all(root.join("app")).unwrap();
        fs::create_dir_all(root.join("group").join("deep")).unwrap();

        fs::write(root.join("docker-compose.yml"), "services:\n").unwrap();
        fs::write(root.join("app").join("docker-compose.yml"), "services:\n").unwrap();
        fs::write(
            root.join("group").join("deep").join("docker-compose.yml"),
            "services:\n",
        )
        .unwrap();

        let files = find_compose_files(&root).unwrap();
        assert_eq!(files.len(), 3);
    }

    #[test]
    fn ignores_other_file_names() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::create_dir_all(root.join("app")).unwrap();

        fs::write(root.join("app").join("docker-compose.yaml"), "services:\n").unwrap();
        fs::write(root.join("app").join("compose.yml"), "services:\n").unwrap();

        let files = find_compose_files(&root).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn ignores_directories_with_matching_name() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::create_dir_all(root.join("app").join("docker-compose.yml")).unwrap();

        let files = find_compose_files(&root).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn empty_root_is_not_an_error() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::create_dir_all(&root).unwrap();

        let files = find_compose_files(&root).unwrap();
        assert!(files.is_empty());
    }

    #[test]
    fn missing_root_is_fatal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");

        let err = find_compose_files(&root).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::RootNotFound);
    }

    #[test]
    fn root_that_is_a_file_is_fatal() {
        let dir = TempDir::new().unwrap();
        let root = dir.path().join("packages");
        fs::write(&root, "not a directory\n").unwrap();

        let err = find_compose_files(&root).unwrap_err();
        assert_eq!(err.code, crate::ErrorCode::RootNotADirectory);
    }
}
