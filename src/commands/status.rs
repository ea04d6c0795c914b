use anyhow::Result;

use crate::commands::CommandReport;
use crate::pak::config::PakConfig;

pub fn run(cfg: &PakConfig) -> Result<CommandReport> {
    let mut report = CommandReport::new("status");

    report.detail(format!("base_dir={}", cfg.base_dir.display()));
    report.detail(format!("archive_dir={}", cfg.archive_dir.display()));
    report.detail(format!("extension={}", cfg.extension));
    report.detail(format!("ignore_case={}", cfg.ignore_case));
    match &cfg.config_path {
        Some(path) => report.detail(format!("config_path={}", path.display())),
        None => report.detail("config_path=none (defaults and environment)"),
    }

    if !cfg.base_dir.is_dir() {
        report.issue(format!("missing base dir ({})", cfg.base_dir.display()));
    }
    if !cfg.archive_dir.is_dir() {
        report.issue(format!("missing archive dir ({})", cfg.archive_dir.display()));
    }

    Ok(report)
}
