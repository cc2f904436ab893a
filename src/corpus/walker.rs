// src/corpus/walker.rs

use crate::utils::error::CorpusError;
use std::fs;
use std::path::{Path, PathBuf};

/// Recursively collects every file under `root` with the given extension.
/// Traversal order across directories follows the filesystem and is not a
/// correctness requirement; within-document ordering is what matters
/// downstream.
pub fn find_documents(root: &Path, extension: &str) -> Result<Vec<PathBuf>, CorpusError> {
    if !root.is_dir() {
        return Err(CorpusError::NotADirectory(root.display().to_string()));
    }

    let mut found = Vec::new();
    walk(root, extension, &mut found)?;
    tracing::debug!("Discovered {} .{} files under {}", found.len(), extension, root.display());
    Ok(found)
}

fn walk(dir: &Path, extension: &str, found: &mut Vec<PathBuf>) -> Result<(), CorpusError> {
    for entry in fs::read_dir(dir)? {
        let path = entry?.path();
        if path.is_dir() {
            walk(&path, extension, found)?;
        } else if path.extension().map_or(false, |e| e == extension) {
            found.push(path);
        }
    }
    Ok(())
}
