use anyhow::{Result, bail};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::commands::{self, CommandReport};
use crate::logging;
use crate::error::PakError;
use crate::pak::config::{self, PakConfig};

/// Maintain engine pak archives against an expanded content tree
#[derive(Parser, Debug)]
#[command(name = "paktool")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Print the report as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Expanded content tree (overrides PAKTOOL_BASE_DIR and the config file)
    #[arg(long, global = true)]
    pub base_dir: Option<PathBuf>,

    /// Directory holding the archives (overrides PAKTOOL_ARCHIVE_DIR)
    #[arg(long, global = true)]
    pub archive_dir: Option<PathBuf>,

    /// Archive file extension, without the dot (overrides PAKTOOL_ARCHIVE_EXT)
    #[arg(long, global = true)]
    pub ext: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// List archives in search order
    List,

    /// Show every entry and the archive it is served from
    Index {
        /// Include content digests
        #[arg(long)]
        digests: bool,
    },

    /// Resolve relative paths against the base dir ignoring case
    Resolve {
        #[arg(required = true)]
        paths: Vec<String>,
    },

    /// Compare archived entries against the expanded tree
    Reconcile {
        /// Locate entries on disk without regard to case
        #[arg(long)]
        ignore_case: bool,

        /// Join entry names as-is, even when the config enables ignore_case
        #[arg(long, conflicts_with = "ignore_case")]
        exact: bool,

        /// Treat updated or missing entries as failures
        #[arg(long)]
        strict: bool,
    },

    /// Pack files from the base dir into a new archive
    Build {
        /// Archive to write
        #[arg(short, long)]
        output: PathBuf,

        /// Newline-delimited file with more paths to pack
        #[arg(long)]
        from_list: Option<PathBuf>,

        /// Paths relative to the base dir
        files: Vec<String>,
    },

    /// Check that every path in a media list is packed
    Audit {
        /// Newline-delimited media list
        #[arg(short, long)]
        list: PathBuf,

        /// Treat missing media as failures
        #[arg(long)]
        strict: bool,
    },

    /// Sort listed paths into files, directories and missing under the base dir
    Check {
        /// Newline-delimited path list
        #[arg(short, long)]
        list: PathBuf,
    },

    /// Show the effective configuration
    Status,
}

fn apply_overrides(cli: &Cli, cfg: &mut PakConfig) -> Result<(), PakError> {
    if let Some(base) = &cli.base_dir {
        cfg.base_dir = base.clone();
        if cfg.archive_dir_is_default {
            cfg.archive_dir = base.join(config::DEFAULT_ARCHIVE_SUBDIR);
        }
    }
    if let Some(dir) = &cli.archive_dir {
        cfg.archive_dir = dir.clone();
    }
    if let Some(ext) = &cli.ext {
        cfg.extension = config::normalize_extension(ext);
    }
    config::validate(cfg)
}

fn print_report(report: &CommandReport, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(report)?);
        return Ok(());
    }

    println!("{}: {}", report.command, if report.ok { "ok" } else { "issues" });
    for line in &report.details {
        println!("  {line}");
    }
    for line in &report.issues {
        println!("  ! {line}");
    }
    Ok(())
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut cfg = config::load_config()?;
    apply_overrides(&cli, &mut cfg)?;
    tracing::debug!(?cfg, "effective configuration");

    let report = match &cli.command {
        Commands::List => commands::list::run(&cfg)?,
        Commands::Index { digests } => {
            commands::index::run(&cfg, &commands::index::IndexOptions { digests: *digests })?
        }
        Commands::Resolve { paths } => commands::resolve::run(
            &cfg,
            &commands::resolve::ResolveOptions {
                paths: paths.clone(),
            },
        )?,
        Commands::Reconcile {
            ignore_case,
            exact,
            strict,
        } => commands::reconcile::run(
            &cfg,
            &commands::reconcile::ReconcileCommandOptions {
                ignore_case: *ignore_case,
                exact: *exact,
                strict: *strict,
            },
        )?,
        Commands::Build {
            output,
            from_list,
            files,
        } => commands::build::run(
            &cfg,
            &commands::build::BuildOptions {
                output: output.clone(),
                files: files.clone(),
                from_list: from_list.clone(),
            },
        )?,
        Commands::Audit { list, strict } => commands::audit::run(
            &cfg,
            &commands::audit::AuditOptions {
                list: list.clone(),
                strict: *strict,
            },
        )?,
        Commands::Check { list } => commands::check::run(
            &cfg,
            &commands::check::CheckOptions { list: list.clone() },
        )?,
        Commands::Status => commands::status::run(&cfg)?,
    };

    print_report(&report, cli.json)?;
    if !report.ok {
        bail!("{} reported {} issue(s)", report.command, report.issues.len());
    }
    Ok(())
}
