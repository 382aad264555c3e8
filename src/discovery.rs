//! Input file discovery

use std::path::{Path, PathBuf};

use crate::error::KeyscanError;

/// Find files matching `pattern` under `base_path`, sorted by path
///
/// Absolute or `.`-relative patterns are used as given; anything else is
/// resolved against `base_path`.
pub fn discover_files(base_path: &Path, pattern: &str) -> Result<Vec<PathBuf>, KeyscanError> {
    let full_pattern = if pattern.starts_with('/') || pattern.starts_with('.') {
        pattern.to_string()
    } else {
        format!("{}/{}", base_path.display(), pattern)
    };

    let entries = glob::glob(&full_pattern)
        .map_err(|e| KeyscanError::InvalidPattern(format!("{}: {}", pattern, e)))?;

    let mut files = Vec::new();
    for entry in entries {
        match entry {
            Ok(path) => {
                if path.is_file() {
                    files.push(path);
                }
            }
            Err(e) => {
                tracing::warn!("Error accessing path: {}", e);
            }
        }
    }

    files.sort();
    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_discover_matching_files_sorted() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("b.json"), "{}\n").unwrap();
        std::fs::write(dir.path().join("a.json"), "{}\n").unwrap();
        std::fs::write(dir.path().join("notes.txt"), "x").unwrap();
        std::fs::create_dir(dir.path().join("dir.json")).unwrap();

        let files = discover_files(dir.path(), "*.json").unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a.json", "b.json"]);
    }

    #[test]
    fn test_invalid_pattern() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            discover_files(dir.path(), "[*.json"),
            Err(KeyscanError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_no_matches_is_empty() {
        let dir = TempDir::new().unwrap();
        assert!(discover_files(dir.path(), "*.jsonl").unwrap().is_empty());
    }
}
