//! Finding robot files on disk

use std::path::{Path, PathBuf};

use super::LoadError;
use crate::parser::FileFormat;

/// Collect robot files below `dir`, recursively and sorted by path.
pub fn collect_file_paths(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    let mut paths = Vec::new();
    collect_recursive(dir, &mut paths)?;
    paths.sort();
    Ok(paths)
}

fn collect_recursive(dir: &Path, paths: &mut Vec<PathBuf>) -> Result<(), LoadError> {
    for entry in std::fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            collect_recursive(&path, paths)?;
        } else if FileFormat::from_path(&path).is_some() {
            paths.push(path);
        }
    }
    Ok(())
}
