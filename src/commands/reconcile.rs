use anyhow::{Context, Result};

use crate::commands::CommandReport;
use crate::pak::config::PakConfig;
use crate::pak::reconcile::{self, MatchMode, ReconcileOptions};

#[derive(Debug, Clone, Default)]
pub struct ReconcileCommandOptions {
    pub ignore_case: bool,
    pub exact: bool,
    pub strict: bool,
}

/// Command-line flags win over the configured `ignore_case`.
fn match_mode(cfg: &PakConfig, opts: &ReconcileCommandOptions) -> MatchMode {
    if opts.exact {
        MatchMode::Exact
    } else if opts.ignore_case || cfg.ignore_case {
        MatchMode::IgnoreCase
    } else {
        MatchMode::Exact
    }
}

pub fn run(cfg: &PakConfig, opts: &ReconcileCommandOptions) -> Result<CommandReport> {
    let mode = match_mode(cfg, opts);

    let mut report = CommandReport::new("reconcile");
    report.detail(format!("archive_dir={}", cfg.archive_dir.display()));
    report.detail(format!("base_dir={}", cfg.base_dir.display()));
    report.detail(format!(
        "match_mode={}",
        match mode {
            MatchMode::Exact => "exact",
            MatchMode::IgnoreCase => "ignore-case",
        }
    ));

    let result = reconcile::reconcile(&ReconcileOptions {
        archive_dir: cfg.archive_dir.clone(),
        base_dir: cfg.base_dir.clone(),
        extension: cfg.extension.clone(),
        mode,
    })
    .with_context(|| format!("reconcile of {} failed", cfg.archive_dir.display()))?;

    for name in &result.updated {
        report.finding(opts.strict, format!("updated {name}"));
    }
    for name in &result.not_found {
        report.finding(opts.strict, format!("not_found {name}"));
    }
    for (entry, on_disk) in &result.case_table {
        if entry != on_disk {
            report.detail(format!("case {entry} -> {on_disk}"));
        }
    }
    if result.is_clean() {
        report.detail("all archived entries match the expanded tree");
    }
    report.detail(format!(
        "checked={} updated={} not_found={}",
        result.checked,
        result.updated.len(),
        result.not_found.len()
    ));

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn config(ignore_case: bool) -> PakConfig {
        PakConfig {
            base_dir: PathBuf::from("/game"),
            archive_dir: PathBuf::from("/game/base"),
            archive_dir_is_default: true,
            extension: "pk4".to_string(),
            ignore_case,
            config_path: None,
        }
    }

    #[test]
    fn exact_flag_overrides_configured_ignore_case() {
        let opts = ReconcileCommandOptions {
            exact: true,
            ..Default::default()
        };
        assert_eq!(match_mode(&config(true), &opts), MatchMode::Exact);
    }

    #[test]
    fn configured_ignore_case_applies_without_flags() {
        let opts = ReconcileCommandOptions::default();
        assert_eq!(match_mode(&config(true), &opts), MatchMode::IgnoreCase);
        assert_eq!(match_mode(&config(false), &opts), MatchMode::Exact);

        let forced = ReconcileCommandOptions {
            ignore_case: true,
            ..Default::default()
        };
        assert_eq!(match_mode(&config(false), &forced), MatchMode::IgnoreCase);
    }
}
