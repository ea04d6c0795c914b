use anyhow::{Result, bail};

use crate::commands::CommandReport;
use crate::pak::config::PakConfig;
use crate::pak::resolve::PathResolver;

#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    pub paths: Vec<String>,
}

pub fn run(cfg: &PakConfig, opts: &ResolveOptions) -> Result<CommandReport> {
    if !cfg.base_dir.is_dir() {
        bail!("base dir does not exist: {}", cfg.base_dir.display());
    }

    let mut report = CommandReport::new("resolve");
    report.detail(format!("base_dir={}", cfg.base_dir.display()));

    let resolver = PathResolver::new(&cfg.base_dir);
    let (resolved, unresolved) = resolver.resolve_all(opts.paths.iter().map(String::as_str));
    for path in &resolved {
        report.detail(format!("found {path}"));
    }
    for path in &unresolved {
        report.issue(format!("unresolved {path}"));
    }

    Ok(report)
}
