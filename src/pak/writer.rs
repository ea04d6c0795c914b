use crate::error::PakError;
use crate::pak::resolve::{is_unsafe_relative, normalize_relative};
use std::collections::BTreeSet;
use std::fs;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zip::CompressionMethod;
use zip::write::FileOptions;

#[derive(Debug, Clone)]
pub struct BuildOutcome {
    pub archive_path: PathBuf,
    pub entries: Vec<String>,
    pub bytes: u64,
}

/// Entry names in list order, normalized to `/` and deduplicated.
fn plan_entries<'a>(files: impl IntoIterator<Item = &'a str>) -> Result<Vec<String>, PakError> {
    let mut seen = BTreeSet::new();
    let mut out = Vec::new();
    for raw in files {
        let name = normalize_relative(raw);
        if name.is_empty() {
            continue;
        }
        if is_unsafe_relative(raw) {
            return Err(PakError::InvalidConfig(format!(
                "refusing to pack `{raw}`: path escapes the base directory"
            )));
        }
        if seen.insert(name.clone()) {
            out.push(name);
        } else {
            debug!(entry = %name, "duplicate input skipped");
        }
    }
    Ok(out)
}

/// Pack `files` (relative to `base`) into a new deflate-compressed archive at
/// `output`. Inputs are checked before anything is written; the archive is
/// staged next to `output` and only renamed into place once complete.
pub fn build_archive<'a>(
    base: &Path,
    files: impl IntoIterator<Item = &'a str>,
    output: &Path,
) -> Result<BuildOutcome, PakError> {
    let entries = plan_entries(files)?;
    for name in &entries {
        let source = base.join(name);
        if !source.is_file() {
            return Err(PakError::NotFound(source));
        }
    }

    let write_err = |reason: String| PakError::ArchiveWrite {
        path: output.to_path_buf(),
        reason,
    };

    let out_dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    };
    fs::create_dir_all(&out_dir).map_err(|err| PakError::io(&out_dir, err))?;
    let staged = NamedTempFile::new_in(&out_dir).map_err(|err| PakError::io(&out_dir, err))?;

    let mut writer = zip::ZipWriter::new(BufWriter::new(staged));
    let options = FileOptions::default().compression_method(CompressionMethod::Deflated);

    for name in &entries {
        let source = base.join(name);
        let mut input = fs::File::open(&source).map_err(|err| PakError::io(&source, err))?;
        writer
            .start_file(name.as_str(), options)
            .map_err(|err| write_err(format!("entry `{name}` failed: {err}")))?;
        io::copy(&mut input, &mut writer).map_err(|err| PakError::io(&source, err))?;
    }

    let buffered = writer
        .finish()
        .map_err(|err| write_err(format!("finish failed: {err}")))?;
    let staged = buffered
        .into_inner()
        .map_err(|err| write_err(format!("flush failed: {}", err.error())))?;
    staged
        .persist(output)
        .map_err(|err| write_err(format!("persist failed: {}", err.error)))?;

    let bytes = fs::metadata(output)
        .map_err(|err| PakError::io(output, err))?
        .len();
    info!(archive = %output.display(), entries = entries.len(), bytes, "archive written");

    Ok(BuildOutcome {
        archive_path: output.to_path_buf(),
        entries,
        bytes,
    })
}

/// Lines of a newline-delimited path list, trimmed of surrounding whitespace.
/// Blank lines and `#` comments are skipped. Media lists have their own reader
/// in `audit`.
pub fn read_path_list(path: &Path) -> Result<Vec<String>, PakError> {
    let raw = fs::read_to_string(path).map_err(|err| PakError::io(path, err))?;
    Ok(raw
        .lines()
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(ToOwned::to_owned)
        .collect())
}
