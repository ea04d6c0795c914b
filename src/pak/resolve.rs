use crate::pak::disk::{DiskTree, LocalDisk};
use std::path::{Component, Path};
use tracing::debug;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Relative path with the casing found on disk.
    Found(String),
    /// Deepest directory reached before the walk gave up. Diagnostic only.
    NotFound(String),
}

/// Split an archive-style relative path into its components. Backslashes are
/// treated as separators; empty and `.` components are dropped.
pub fn path_components(relative: &str) -> Vec<&str> {
    relative
        .split(['/', '\\'])
        .filter(|part| !part.is_empty() && *part != ".")
        .collect()
}

pub fn normalize_relative(relative: &str) -> String {
    path_components(relative).join("/")
}

/// True for names that would escape the directory they are joined onto.
pub fn is_unsafe_relative(relative: &str) -> bool {
    if relative.starts_with('/') || relative.starts_with('\\') {
        return true;
    }
    if path_components(relative).iter().any(|part| *part == "..") {
        return true;
    }
    Path::new(relative)
        .components()
        .any(|c| matches!(c, Component::Prefix(_) | Component::RootDir))
}

fn same_name(a: &str, b: &str) -> bool {
    a == b || a.to_lowercase() == b.to_lowercase()
}

pub struct PathResolver<'a, T: DiskTree = LocalDisk> {
    base: &'a Path,
    tree: &'a T,
}

impl<'a> PathResolver<'a, LocalDisk> {
    pub fn new(base: &'a Path) -> Self {
        Self {
            base,
            tree: &LocalDisk,
        }
    }
}

impl<'a, T: DiskTree> PathResolver<'a, T> {
    pub fn with_tree(base: &'a Path, tree: &'a T) -> Self {
        Self { base, tree }
    }

    pub fn resolve(&self, relative: &str) -> Resolution {
        if is_unsafe_relative(relative) {
            debug!(target_path = relative, "refusing path outside the base directory");
            return Resolution::NotFound(String::new());
        }
        let parts = path_components(relative);
        let normalized = parts.join("/");
        if parts.is_empty() {
            return Resolution::NotFound(String::new());
        }

        if self.tree.is_file(&self.base.join(&normalized)) {
            return Resolution::Found(normalized);
        }

        let Some((leaf, dirs)) = parts.split_last() else {
            return Resolution::NotFound(String::new());
        };

        let mut current = self.base.to_path_buf();
        let mut reached: Vec<String> = Vec::new();

        for expected in dirs {
            let listing = match self.tree.list(&current) {
                Ok(listing) => listing,
                Err(err) => {
                    debug!(dir = %current.display(), %err, "directory unreadable during resolve");
                    return Resolution::NotFound(reached.join("/"));
                }
            };

            let mut matches = listing.dirs.into_iter().filter(|d| same_name(d, expected));
            let (Some(only), None) = (matches.next(), matches.next()) else {
                debug!(
                    target_path = relative,
                    component = *expected,
                    at = %reached.join("/"),
                    "no unique directory match"
                );
                return Resolution::NotFound(reached.join("/"));
            };

            current.push(&only);
            reached.push(only);
        }

        let files = match self.tree.list(&current) {
            Ok(listing) => listing.files,
            Err(err) => {
                debug!(dir = %current.display(), %err, "directory unreadable during resolve");
                return Resolution::NotFound(reached.join("/"));
            }
        };

        match files.into_iter().find(|f| same_name(f, leaf)) {
            Some(file) => {
                reached.push(file);
                Resolution::Found(reached.join("/"))
            }
            None => Resolution::NotFound(reached.join("/")),
        }
    }

    /// Resolve each path on its own. Returns the on-disk paths that were found
    /// and the inputs that were not, both in input order.
    pub fn resolve_all<'p>(
        &self,
        relatives: impl IntoIterator<Item = &'p str>,
    ) -> (Vec<String>, Vec<String>) {
        let mut resolved = Vec::new();
        let mut unresolved = Vec::new();
        for relative in relatives {
            match self.resolve(relative) {
                Resolution::Found(path) => resolved.push(path),
                Resolution::NotFound(_) => unresolved.push(relative.to_string()),
            }
        }
        (resolved, unresolved)
    }
}
