use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::pak::config::PakConfig;
use crate::pak::writer::{build_archive, read_path_list};

#[derive(Debug, Clone, Default)]
pub struct BuildOptions {
    pub output: PathBuf,
    pub files: Vec<String>,
    pub from_list: Option<PathBuf>,
}

pub fn run(cfg: &PakConfig, opts: &BuildOptions) -> Result<CommandReport> {
    let mut files = opts.files.clone();
    if let Some(list) = &opts.from_list {
        files.extend(read_path_list(list)?);
    }
    if files.is_empty() {
        bail!("nothing to pack: pass file paths or --from-list");
    }

    let mut report = CommandReport::new("build");
    report.detail(format!("base_dir={}", cfg.base_dir.display()));

    let outcome = build_archive(&cfg.base_dir, files.iter().map(String::as_str), &opts.output)?;
    for name in &outcome.entries {
        report.detail(format!("packed {name}"));
    }
    report.detail(format!("archive={}", outcome.archive_path.display()));
    report.detail(format!(
        "entries={} bytes={}",
        outcome.entries.len(),
        outcome.bytes
    ));

    Ok(report)
}
