use std::fs;
use std::io;
use std::path::Path;

/// Names found directly inside one directory, split by kind and sorted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirListing {
    pub dirs: Vec<String>,
    pub files: Vec<String>,
}

/// Read-only view of the expanded tree used by the resolver and the
/// reconciler. `LocalDisk` is the real filesystem; tests swap in their own.
pub trait DiskTree {
    fn is_file(&self, path: &Path) -> bool;
    fn list(&self, dir: &Path) -> io::Result<DirListing>;
    fn read(&self, path: &Path) -> io::Result<Vec<u8>>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct LocalDisk;

impl DiskTree for LocalDisk {
    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn list(&self, dir: &Path) -> io::Result<DirListing> {
        let mut out = DirListing::default();
        for entry in fs::read_dir(dir)? {
            let entry = entry?;
            // Non UTF-8 names can never match a UTF-8 entry name.
            let Ok(name) = entry.file_name().into_string() else {
                continue;
            };
            // Follow symlinks the same way `Path::is_dir` does.
            let path = entry.path();
            if path.is_dir() {
                out.dirs.push(name);
            } else if path.is_file() {
                out.files.push(name);
            }
        }
        out.dirs.sort();
        out.files.sort();
        Ok(out)
    }

    fn read(&self, path: &Path) -> io::Result<Vec<u8>> {
        fs::read(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn listing_splits_and_sorts() {
        let tmp = tempdir().expect("tempdir");
        fs::create_dir_all(tmp.path().join("maps")).expect("mkdir");
        fs::create_dir_all(tmp.path().join("Models")).expect("mkdir");
        fs::write(tmp.path().join("z.cfg"), "").expect("write");
        fs::write(tmp.path().join("a.cfg"), "").expect("write");

        let listing = LocalDisk.list(tmp.path()).expect("list");
        assert_eq!(listing.dirs, vec!["Models", "maps"]);
        assert_eq!(listing.files, vec!["a.cfg", "z.cfg"]);
    }
}
