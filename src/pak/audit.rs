use crate::error::PakError;
use crate::pak::archive::{ArchiveIndex, index_archives};
use serde::Serialize;
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

/// Textures under this prefix ship pre-compressed.
const DDS_PREFIX: &str = "dds/";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AuditReport {
    pub checked: usize,
    /// Packed names that were expected but absent, lower-cased, in list order.
    pub missing: Vec<String>,
    /// Lines under `dds/` that name neither a `.dds` nor a `.tga`.
    pub bad: Vec<String>,
}

/// Lower-cased lines of a media list with line terminators removed. Blank
/// lines are skipped; nothing else is trimmed.
pub fn read_media_list(path: &Path) -> Result<Vec<String>, PakError> {
    let raw = fs::read_to_string(path).map_err(|err| PakError::io(path, err))?;
    Ok(raw
        .split('\n')
        .map(|line| line.trim_end_matches(['\r', '\n']).to_lowercase())
        .filter(|line| !line.is_empty())
        .collect())
}

/// Media lists name source assets. The build converts some of them, so a
/// listed `.wav` is looked up as `.ogg` and a `dds/*.tga` as `.dds`. A plain
/// `.tga` that is missing also reports the `dds/` copy it would ship as.
pub fn audit_index(index: &ArchiveIndex, listed: &[String]) -> AuditReport {
    let packed: BTreeSet<String> = index.entries.keys().map(|name| name.to_lowercase()).collect();

    let mut report = AuditReport::default();
    for line in listed {
        let wanted = line.to_lowercase();
        report.checked += 1;

        if wanted.starts_with(DDS_PREFIX) {
            let target = if let Some(stem) = wanted.strip_suffix(".tga") {
                format!("{stem}.dds")
            } else if wanted.ends_with(".dds") {
                wanted
            } else {
                debug!(path = %wanted, "unexpected extension under dds/");
                report.bad.push(wanted);
                continue;
            };
            if !packed.contains(&target) {
                report.missing.push(target);
            }
        } else if let Some(stem) = wanted.strip_suffix(".wav") {
            let ogg = format!("{stem}.ogg");
            if !packed.contains(&ogg) {
                report.missing.push(ogg);
                report.missing.push(wanted);
            }
        } else if let Some(stem) = wanted.strip_suffix(".tga") {
            if !packed.contains(&wanted) {
                let dds = format!("{DDS_PREFIX}{stem}.dds");
                report.missing.push(wanted);
                report.missing.push(dds);
            }
        } else if !packed.contains(&wanted) {
            report.missing.push(wanted);
        }
    }
    report
}

pub fn audit_media(
    archive_dir: &Path,
    extension: &str,
    list_file: &Path,
) -> Result<AuditReport, PakError> {
    let listed = read_media_list(list_file)?;
    let index = index_archives(archive_dir, extension)?;
    let report = audit_index(&index, &listed);
    info!(
        checked = report.checked,
        missing = report.missing.len(),
        bad = report.bad.len(),
        list = %list_file.display(),
        "media audit finished"
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pak::archive::tests::write_zip;
    use tempfile::tempdir;

    fn audit(packed: &[(&str, &str)], list: &str) -> AuditReport {
        let tmp = tempdir().expect("tempdir");
        let paks = tmp.path().join("paks");
        fs::create_dir_all(&paks).expect("mkdir");
        write_zip(&paks.join("pak000.pk4"), packed);
        let list_file = tmp.path().join("media.txt");
        fs::write(&list_file, list).expect("write list");
        audit_media(&paks, "pk4", &list_file).expect("audit")
    }

    #[test]
    fn listed_media_is_matched_case_insensitively() {
        let report = audit(
            &[("Sound/VO/Intro.ogg", "ogg"), ("maps/a.map", "m")],
            "sound/vo/intro.ogg\r\nMAPS/A.MAP\nmaps/b.map\n\n",
        );
        assert_eq!(report.checked, 3);
        assert_eq!(report.missing, vec!["maps/b.map"]);
        assert!(report.bad.is_empty());
    }

    #[test]
    fn converted_assets_are_checked_under_their_packed_names() {
        let report = audit(
            &[("dds/textures/a.dds", "dds"), ("sound/x.ogg", "ogg")],
            "dds/textures/a.tga\nsound/x.wav\ntextures/b.tga\n",
        );
        assert_eq!(report.checked, 3);
        assert_eq!(report.missing, vec!["textures/b.tga", "dds/textures/b.dds"]);
        assert!(report.bad.is_empty());
    }

    #[test]
    fn wav_without_ogg_reports_both_names() {
        let report = audit(&[("sound/y.wav", "wav")], "Sound/Y.WAV\n");
        assert_eq!(report.missing, vec!["sound/y.ogg", "sound/y.wav"]);
    }

    #[test]
    fn packed_tga_outside_dds_is_enough() {
        let report = audit(&[("textures/c.tga", "tga")], "textures/c.tga\n");
        assert!(report.missing.is_empty());
    }

    #[test]
    fn dds_lines_are_checked_as_dds_and_other_extensions_are_bad() {
        let report = audit(
            &[("dds/gui/logo.dds", "dds")],
            "dds/gui/logo.dds\ndds/gui/missing.tga\ndds/gui/notes.txt\n",
        );
        assert_eq!(report.checked, 3);
        assert_eq!(report.missing, vec!["dds/gui/missing.dds"]);
        assert_eq!(report.bad, vec!["dds/gui/notes.txt"]);
    }

    #[test]
    fn media_lines_keep_surrounding_text() {
        let tmp = tempdir().expect("tempdir");
        let list = tmp.path().join("media.txt");
        fs::write(&list, "# header\r\n  Maps/A.map\n\nb.map").expect("write");
        let lines = read_media_list(&list).expect("read");
        assert_eq!(lines, vec!["# header", "  maps/a.map", "b.map"]);
    }

    #[test]
    fn missing_list_file_is_not_found() {
        let tmp = tempdir().expect("tempdir");
        let err = audit_media(tmp.path(), "pk4", &tmp.path().join("absent.txt"))
            .expect_err("missing list");
        assert!(matches!(err, PakError::NotFound(_)));
    }
}
