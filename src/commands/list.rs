use anyhow::Result;

use crate::commands::CommandReport;
use crate::pak::archive::{archive_file_name, list_archives};
use crate::pak::config::PakConfig;

pub fn run(cfg: &PakConfig) -> Result<CommandReport> {
    let mut report = CommandReport::new("list");
    report.detail(format!("archive_dir={}", cfg.archive_dir.display()));

    let archives = list_archives(&cfg.archive_dir, &cfg.extension)?;
    for path in &archives {
        report.detail(format!("archive {}", archive_file_name(path)));
    }
    report.detail(format!("archives={}", archives.len()));

    Ok(report)
}
