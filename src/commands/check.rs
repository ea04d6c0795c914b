use anyhow::{Result, bail};
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::pak::classify::classify_paths;
use crate::pak::config::PakConfig;
use crate::pak::writer::read_path_list;

#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub list: PathBuf,
}

pub fn run(cfg: &PakConfig, opts: &CheckOptions) -> Result<CommandReport> {
    if !cfg.base_dir.is_dir() {
        bail!("base dir does not exist: {}", cfg.base_dir.display());
    }
    let paths = read_path_list(&opts.list)?;

    let mut report = CommandReport::new("check");
    report.detail(format!("base_dir={}", cfg.base_dir.display()));
    report.detail(format!("list={}", opts.list.display()));

    let status = classify_paths(&cfg.base_dir, paths.iter().map(String::as_str));
    for path in &status.files {
        report.detail(format!("file {path}"));
    }
    for path in &status.dirs {
        report.detail(format!("dir {path}"));
    }
    for path in &status.missing {
        report.issue(format!("missing {path}"));
    }
    report.detail(format!(
        "files={} dirs={} missing={}",
        status.files.len(),
        status.dirs.len(),
        status.missing.len()
    ));

    Ok(report)
}
