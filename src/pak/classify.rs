use crate::pak::resolve::{is_unsafe_relative, normalize_relative};
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Listed paths sorted by what they name under a base directory, each in
/// list order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PathStatus {
    pub files: Vec<String>,
    pub dirs: Vec<String>,
    pub missing: Vec<String>,
}

/// Paths are taken as written. No case folding happens here; use the resolver
/// for that.
pub fn classify_paths<'p>(base: &Path, paths: impl IntoIterator<Item = &'p str>) -> PathStatus {
    let mut status = PathStatus::default();
    for path in paths {
        if is_unsafe_relative(path) {
            debug!(path, "path escapes the base directory");
            status.missing.push(path.to_string());
            continue;
        }
        let full = base.join(normalize_relative(path));
        if full.is_file() {
            status.files.push(path.to_string());
        } else if full.is_dir() {
            status.dirs.push(path.to_string());
        } else {
            status.missing.push(path.to_string());
        }
    }
    status
}
