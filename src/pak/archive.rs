use crate::error::PakError;
use crate::pak::digest::digest_reader;
use serde::Serialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use zip::read::ZipArchive;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexEntry {
    pub archive: String,
    pub digest: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ArchiveIndex {
    /// Archive file names in search order.
    pub archives: Vec<String>,
    pub entries: BTreeMap<String, IndexEntry>,
}

impl ArchiveIndex {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn archive_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Archives directly inside `dir`, highest name first. The engine searches
/// paks in this order, so an entry in `pak002` shadows the same entry in
/// `pak000`.
pub fn list_archives(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, PakError> {
    if !dir.is_dir() {
        return Err(PakError::NotFound(dir.to_path_buf()));
    }

    let suffix = format!(".{extension}");
    let read_dir = fs::read_dir(dir).map_err(|err| PakError::io(dir, err))?;

    let mut out = Vec::new();
    for entry in read_dir {
        let entry = entry.map_err(|err| PakError::io(dir, err))?;
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if name.ends_with(&suffix) {
            out.push(path);
        }
    }

    out.sort_by_key(|path| archive_file_name(path));
    out.reverse();
    Ok(out)
}

fn index_one(path: &Path, index: &mut ArchiveIndex) -> Result<usize, PakError> {
    let archive_name = archive_file_name(path);
    let read_err = |reason: String| PakError::ArchiveRead {
        path: path.to_path_buf(),
        reason,
    };

    let file = fs::File::open(path).map_err(|err| read_err(format!("open failed: {err}")))?;
    let mut archive = ZipArchive::new(file).map_err(|err| read_err(format!("open failed: {err}")))?;

    let mut added = 0usize;
    for i in 0..archive.len() {
        let mut entry = archive
            .by_index(i)
            .map_err(|err| read_err(format!("entry {i} failed: {err}")))?;
        let name = entry.name().to_string();
        if index.entries.contains_key(&name) {
            debug!(entry = %name, archive = %archive_name, "shadowed by an earlier archive");
            continue;
        }

        let digest = digest_reader(&mut entry)
            .map_err(|err| read_err(format!("entry `{name}` failed: {err}")))?;
        index.entries.insert(
            name,
            IndexEntry {
                archive: archive_name.clone(),
                digest,
            },
        );
        added += 1;
    }

    index.archives.push(archive_name);
    Ok(added)
}

pub fn index_archives(dir: &Path, extension: &str) -> Result<ArchiveIndex, PakError> {
    let mut index = ArchiveIndex::default();
    for path in list_archives(dir, extension)? {
        let added = index_one(&path, &mut index)?;
        debug!(archive = %path.display(), added, "indexed archive");
    }
    info!(
        archives = index.archives.len(),
        entries = index.entries.len(),
        dir = %dir.display(),
        "archive index built"
    );
    Ok(index)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::pak::digest::digest_bytes;
    use std::io::Write;
    use tempfile::tempdir;

    pub(crate) fn write_zip(path: &Path, entries: &[(&str, &str)]) {
        let file = fs::File::create(path).expect("create zip");
        let mut writer = zip::ZipWriter::new(file);
        let options = zip::write::FileOptions::default();
        for (name, data) in entries {
            if name.ends_with('/') {
                writer.add_directory(*name, options).expect("add dir");
                continue;
            }
            writer.start_file(*name, options).expect("start file");
            writer.write_all(data.as_bytes()).expect("write entry");
        }
        writer.finish().expect("finish zip");
    }

    #[test]
    fn non_archive_files_are_ignored() {
        let tmp = tempdir().expect("tempdir");
        fs::write(tmp.path().join("readme.txt"), "x").expect("write");
        fs::write(tmp.path().join("pak000.pk4.bak"), "x").expect("write");
        fs::create_dir_all(tmp.path().join("dir.pk4")).expect("mkdir");

        let listed = list_archives(tmp.path(), "pk4").expect("list");
        assert!(listed.is_empty());
    }

    #[test]
    fn archives_are_listed_highest_name_first() {
        let tmp = tempdir().expect("tempdir");
        for name in ["pak000.pk4", "pak002.pk4", "pak001.pk4", "zpak_extra.pk4"] {
            write_zip(&tmp.path().join(name), &[]);
        }

        let listed = list_archives(tmp.path(), "pk4").expect("list");
        let names: Vec<String> = listed.iter().map(|p| archive_file_name(p)).collect();
        assert_eq!(
            names,
            vec!["zpak_extra.pk4", "pak002.pk4", "pak001.pk4", "pak000.pk4"]
        );

        let again = list_archives(tmp.path(), "pk4").expect("list again");
        assert_eq!(listed, again);
    }

    #[test]
    fn missing_directory_is_not_found() {
        let tmp = tempdir().expect("tempdir");
        let err = list_archives(&tmp.path().join("absent"), "pk4").expect_err("missing");
        assert!(matches!(err, PakError::NotFound(_)));
    }

    #[test]
    fn first_archive_in_search_order_wins() {
        let tmp = tempdir().expect("tempdir");
        write_zip(&tmp.path().join("pak000.pk4"), &[("x", "old"), ("only_a", "a")]);
        write_zip(&tmp.path().join("pak001.pk4"), &[("x", "new")]);

        let index = index_archives(tmp.path(), "pk4").expect("index");
        assert_eq!(index.archives, vec!["pak001.pk4", "pak000.pk4"]);

        let x = index.entries.get("x").expect("x indexed");
        assert_eq!(x.archive, "pak001.pk4");
        assert_eq!(x.digest, digest_bytes(b"new"));

        let only_a = index.entries.get("only_a").expect("only_a indexed");
        assert_eq!(only_a.archive, "pak000.pk4");
    }

    #[test]
    fn corrupt_archive_aborts_the_pass() {
        let tmp = tempdir().expect("tempdir");
        write_zip(&tmp.path().join("pak000.pk4"), &[("x", "ok")]);
        fs::write(tmp.path().join("pak001.pk4"), b"definitely not a zip").expect("write");

        let err = index_archives(tmp.path(), "pk4").expect_err("corrupt");
        match err {
            PakError::ArchiveRead { path, .. } => {
                assert_eq!(archive_file_name(&path), "pak001.pk4");
            }
            other => panic!("unexpected error: {other}"),
        }
    }
}
