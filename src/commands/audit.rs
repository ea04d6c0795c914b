use anyhow::Result;
use std::path::PathBuf;

use crate::commands::CommandReport;
use crate::pak::audit::audit_media;
use crate::pak::config::PakConfig;

#[derive(Debug, Clone, Default)]
pub struct AuditOptions {
    pub list: PathBuf,
    pub strict: bool,
}

pub fn run(cfg: &PakConfig, opts: &AuditOptions) -> Result<CommandReport> {
    let mut report = CommandReport::new("audit");
    report.detail(format!("archive_dir={}", cfg.archive_dir.display()));
    report.detail(format!("list={}", opts.list.display()));

    let result = audit_media(&cfg.archive_dir, &cfg.extension, &opts.list)?;
    for path in &result.missing {
        report.finding(opts.strict, format!("missing {path}"));
    }
    for path in &result.bad {
        report.issue(format!("bad {path}"));
    }
    report.detail(format!(
        "checked={} missing={} bad={}",
        result.checked,
        result.missing.len(),
        result.bad.len()
    ));

    Ok(report)
}
