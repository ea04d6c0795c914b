use anyhow::Result;

use crate::commands::CommandReport;
use crate::pak::archive::index_archives;
use crate::pak::config::PakConfig;

#[derive(Debug, Clone, Default)]
pub struct IndexOptions {
    pub digests: bool,
}

pub fn run(cfg: &PakConfig, opts: &IndexOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("index");
    report.detail(format!("archive_dir={}", cfg.archive_dir.display()));

    let index = index_archives(&cfg.archive_dir, &cfg.extension)?;
    if index.is_empty() {
        report.detail("no entries found");
    }
    for (name, entry) in &index.entries {
        if opts.digests {
            report.detail(format!("{name} {} {}", entry.archive, entry.digest));
        } else {
            report.detail(format!("{name} {}", entry.archive));
        }
    }
    report.detail(format!("archives={}", index.archives.len()));
    report.detail(format!("entries={}", index.len()));

    Ok(report)
}
