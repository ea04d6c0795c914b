use crate::error::PakError;
use crate::pak::archive::{ArchiveIndex, index_archives};
use crate::pak::digest::digest_bytes;
use crate::pak::disk::{DiskTree, LocalDisk};
use crate::pak::resolve::{PathResolver, Resolution, is_unsafe_relative};
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MatchMode {
    /// Join the entry name onto the base directory as-is.
    #[default]
    Exact,
    /// Locate each entry through the case-insensitive resolver.
    IgnoreCase,
}

#[derive(Debug, Clone)]
pub struct ReconcileOptions {
    pub archive_dir: PathBuf,
    pub base_dir: PathBuf,
    pub extension: String,
    pub mode: MatchMode,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    pub updated: Vec<String>,
    pub not_found: Vec<String>,
    /// Archive entry name to the relative path with on-disk casing.
    pub case_table: BTreeMap<String, String>,
    pub checked: usize,
}

impl ReconcileReport {
    pub fn is_clean(&self) -> bool {
        self.updated.is_empty() && self.not_found.is_empty()
    }
}

fn is_missing(kind: ErrorKind) -> bool {
    matches!(
        kind,
        ErrorKind::NotFound | ErrorKind::IsADirectory | ErrorKind::NotADirectory
    )
}

/// Compare an already-built index against the tree under `base`.
pub fn reconcile_index(
    index: &ArchiveIndex,
    base: &Path,
    mode: MatchMode,
    tree: &impl DiskTree,
) -> Result<ReconcileReport, PakError> {
    let resolver = PathResolver::with_tree(base, tree);
    let mut report = ReconcileReport::default();

    for (name, entry) in &index.entries {
        if name.ends_with('/') {
            continue;
        }
        report.checked += 1;

        if is_unsafe_relative(name) {
            warn!(entry = %name, archive = %entry.archive, "entry escapes the base directory");
            report.not_found.push(name.clone());
            continue;
        }

        let candidate = match mode {
            MatchMode::Exact => base.join(name),
            MatchMode::IgnoreCase => match resolver.resolve(name) {
                Resolution::Found(resolved) => {
                    let path = base.join(&resolved);
                    report.case_table.insert(name.clone(), resolved);
                    path
                }
                Resolution::NotFound(_) => {
                    report.not_found.push(name.clone());
                    continue;
                }
            },
        };

        let bytes = match (tree.read(&candidate), mode) {
            (Ok(bytes), _) => bytes,
            (Err(err), MatchMode::Exact) if is_missing(err.kind()) => {
                report.not_found.push(name.clone());
                continue;
            }
            (Err(err), MatchMode::Exact) => return Err(PakError::io(candidate, err)),
            (Err(source), MatchMode::IgnoreCase) => {
                return Err(PakError::ResolverInconsistency {
                    entry: name.clone(),
                    path: candidate,
                    source,
                });
            }
        };

        if digest_bytes(&bytes) != entry.digest {
            report.updated.push(name.clone());
        }
    }

    info!(
        checked = report.checked,
        updated = report.updated.len(),
        not_found = report.not_found.len(),
        "reconcile finished"
    );
    Ok(report)
}

pub fn reconcile(opts: &ReconcileOptions) -> Result<ReconcileReport, PakError> {
    if !opts.base_dir.is_dir() {
        return Err(PakError::NotFound(opts.base_dir.clone()));
    }
    let index = index_archives(&opts.archive_dir, &opts.extension)?;
    reconcile_index(&index, &opts.base_dir, opts.mode, &LocalDisk)
}
