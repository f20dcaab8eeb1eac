//! Filesystem helpers: wholesale directory replacement, recursive copy, and
//! single-file includes with content digests.

use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};
use tracing::debug;
use walkdir::WalkDir;

use crate::errors::{Result, SyncError};
use crate::report::CopiedFile;

/// Delete `path` (if present) and recreate it empty.
pub fn reset_dir(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).map_err(|e| {
            SyncError::io(format!("Failed to remove {}: {}", path.display(), e)).with_source(e)
        })?;
    }
    fs::create_dir_all(path).map_err(|e| {
        SyncError::io(format!("Failed to create {}: {}", path.display(), e)).with_source(e)
    })
}

/// Recursively copy `src` into `dst`, creating `dst`. Returns the number of
/// files copied.
pub fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut copied = 0;

    for entry in WalkDir::new(src).follow_links(false).sort_by_file_name() {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(src)
            .map_err(|e| SyncError::io(format!("Walk escaped {}: {}", src.display(), e)))?;
        let target = dst.join(relative);

        if entry.file_type().is_dir() {
            fs::create_dir_all(&target)?;
        } else {
            if let Some(parent) = target.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &target).map_err(|e| {
                SyncError::io(format!(
                    "Failed to copy {} -> {}: {}",
                    entry.path().display(),
                    target.display(),
                    e
                ))
                .with_source(e)
            })?;
            copied += 1;
        }
    }

    debug!("Copied {} files {} -> {}", copied, src.display(), dst.display());
    Ok(copied)
}

/// Copy `src_dir/name` to `dst_dir/name` if it exists. Absence is not an
/// error; the grammar simply does not ship that file.
pub fn include_file(src_dir: &Path, dst_dir: &Path, name: &str) -> Result<Option<CopiedFile>> {
    let source = src_dir.join(name);
    if !source.is_file() {
        debug!("Skipping absent {}", source.display());
        return Ok(None);
    }

    let target = dst_dir.join(name);
    let bytes = fs::copy(&source, &target).map_err(|e| {
        SyncError::io(format!(
            "Failed to copy {} -> {}: {}",
            source.display(),
            target.display(),
            e
        ))
        .with_source(e)
    })?;
    debug!("Included {} ({} bytes)", target.display(), bytes);

    Ok(Some(CopiedFile {
        name: name.to_string(),
        bytes,
        sha256: file_digest(&target)?,
    }))
}

/// Hex SHA-256 of a file's content
pub fn file_digest(path: &Path) -> Result<String> {
    let content = fs::read(path)?;
    let mut hasher = Sha256::new();
    hasher.update(&content);
    Ok(format!("{:x}", hasher.finalize()))
}
