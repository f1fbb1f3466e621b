//! Workspace identification and hashing.
//!
//! A workspace is identified by a SHA256 hash of its root path, so the same
//! filesystem location maps to the same id across runs regardless of which
//! package it currently declares.

use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};

/// Strip trailing path separators, keeping a bare root (`/`) intact.
pub fn normalize_root(root: &Path) -> PathBuf {
    let raw = root.to_string_lossy();
    let trimmed = raw.trim_end_matches(['/', '\\']);
    if trimmed.is_empty() {
        root.to_path_buf()
    } else {
        PathBuf::from(trimmed)
    }
}

/// Hex-encoded SHA256 of the normalized root path.
pub fn workspace_id(root: &Path) -> String {
    let normalized = normalize_root(root);
    let mut hasher = Sha256::new();
    hasher.update(normalized.to_string_lossy().as_bytes());
    let result = hasher.finalize();
    hex::encode(&result[..])
}

/// Display name for a workspace: the last path segment of its root.
pub fn derive_name(root: &Path) -> String {
    let normalized = normalize_root(root);
    normalized
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| normalized.to_string_lossy().to_string())
}
