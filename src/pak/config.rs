use crate::error::PakError;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const DEFAULT_ARCHIVE_EXTENSION: &str = "pk4";
pub const DEFAULT_ARCHIVE_SUBDIR: &str = "base";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchivesConfig {
    pub dir: Option<PathBuf>,
    #[serde(default = "default_extension")]
    pub extension: String,
}

fn default_extension() -> String {
    DEFAULT_ARCHIVE_EXTENSION.to_string()
}

impl Default for ArchivesConfig {
    fn default() -> Self {
        Self {
            dir: None,
            extension: default_extension(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TreeConfig {
    pub base_dir: Option<PathBuf>,
    #[serde(default)]
    pub ignore_case: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
struct PartialPakConfig {
    archives: Option<ArchivesConfig>,
    tree: Option<TreeConfig>,
}

/// Effective settings for one invocation. Built once in the CLI layer and
/// passed down by reference; nothing here is cached between runs.
#[derive(Debug, Clone)]
pub struct PakConfig {
    pub base_dir: PathBuf,
    pub archive_dir: PathBuf,
    /// Set when `archive_dir` was derived from `base_dir` rather than given.
    pub archive_dir_is_default: bool,
    pub extension: String,
    pub ignore_case: bool,
    pub config_path: Option<PathBuf>,
}

fn env_or_path(var: &str) -> Option<PathBuf> {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => Some(PathBuf::from(v.trim())),
        _ => None,
    }
}

fn env_or_string(var: &str, fallback: &str) -> String {
    match env::var(var) {
        Ok(v) if !v.trim().is_empty() => v.trim().to_string(),
        _ => fallback.to_string(),
    }
}

fn env_or_bool(var: &str, fallback: bool) -> bool {
    match env::var(var) {
        Ok(v) => match v.trim() {
            "1" | "true" | "TRUE" | "yes" | "on" => true,
            "0" | "false" | "FALSE" | "no" | "off" => false,
            _ => fallback,
        },
        Err(_) => fallback,
    }
}

pub fn normalize_extension(raw: &str) -> String {
    raw.trim().trim_start_matches('.').to_string()
}

pub(crate) fn validate(cfg: &PakConfig) -> Result<(), PakError> {
    if cfg.extension.is_empty() {
        return Err(PakError::InvalidConfig(
            "archive extension cannot be empty".to_string(),
        ));
    }
    if cfg.extension.contains(['/', '\\']) {
        return Err(PakError::InvalidConfig(format!(
            "archive extension `{}` must not contain a path separator",
            cfg.extension
        )));
    }
    Ok(())
}

fn resolve_config_path() -> Option<PathBuf> {
    if let Some(custom) = env_or_path("PAKTOOL_CONFIG_PATH") {
        return Some(custom);
    }
    let home = dirs::home_dir()?;
    Some(home.join(".paktool.toml"))
}

fn read_file_config(path: &Path) -> Result<PartialPakConfig, PakError> {
    let raw = fs::read_to_string(path).map_err(|err| {
        PakError::InvalidConfig(format!("failed to read {}: {err}", path.display()))
    })?;
    toml::from_str(&raw).map_err(|err| {
        PakError::InvalidConfig(format!("failed to parse {}: {err}", path.display()))
    })
}

fn build_config(
    cwd: &Path,
    file: PartialPakConfig,
    config_path: Option<PathBuf>,
) -> Result<PakConfig, PakError> {
    let archives = file.archives.unwrap_or_default();
    let tree = file.tree.unwrap_or_default();

    let base_dir = env_or_path("PAKTOOL_BASE_DIR")
        .or(tree.base_dir)
        .unwrap_or_else(|| cwd.to_path_buf());
    let explicit_archive_dir = env_or_path("PAKTOOL_ARCHIVE_DIR").or(archives.dir);
    let archive_dir_is_default = explicit_archive_dir.is_none();
    let archive_dir =
        explicit_archive_dir.unwrap_or_else(|| base_dir.join(DEFAULT_ARCHIVE_SUBDIR));
    let extension = normalize_extension(&env_or_string("PAKTOOL_ARCHIVE_EXT", &archives.extension));
    let ignore_case = env_or_bool("PAKTOOL_IGNORE_CASE", tree.ignore_case);

    let cfg = PakConfig {
        base_dir,
        archive_dir,
        archive_dir_is_default,
        extension,
        ignore_case,
        config_path,
    };
    validate(&cfg)?;
    Ok(cfg)
}

pub fn load_config() -> Result<PakConfig, PakError> {
    let cwd = env::current_dir().map_err(|err| PakError::io(".", err))?;

    let mut loaded_from = None;
    let mut file = PartialPakConfig::default();
    if let Some(path) = resolve_config_path().filter(|p| p.exists()) {
        file = read_file_config(&path)?;
        loaded_from = Some(path);
    }

    build_config(&cwd, file, loaded_from)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(raw: &str) -> PartialPakConfig {
        toml::from_str(raw).expect("parse config")
    }

    #[test]
    fn extension_is_normalized_without_leading_dot() {
        assert_eq!(normalize_extension(" .pk4 "), "pk4");
        assert_eq!(normalize_extension("zip"), "zip");
    }

    #[test]
    fn file_values_feed_the_effective_config() {
        let file = parse(
            r#"
[archives]
dir = "/game/base"
extension = ".PK4"

[tree]
base_dir = "/game/expanded"
ignore_case = true
"#,
        );
        let cfg = build_config(Path::new("/cwd"), file, None).expect("config");
        if env::var_os("PAKTOOL_BASE_DIR").is_none() {
            assert_eq!(cfg.base_dir, PathBuf::from("/game/expanded"));
        }
        if env::var_os("PAKTOOL_ARCHIVE_DIR").is_none() {
            assert_eq!(cfg.archive_dir, PathBuf::from("/game/base"));
        }
        if env::var_os("PAKTOOL_ARCHIVE_EXT").is_none() {
            assert_eq!(cfg.extension, "PK4");
        }
    }

    #[test]
    fn archive_dir_defaults_under_base_dir() {
        if env::var_os("PAKTOOL_BASE_DIR").is_some() || env::var_os("PAKTOOL_ARCHIVE_DIR").is_some()
        {
            return;
        }
        let cfg = build_config(Path::new("/work"), PartialPakConfig::default(), None)
            .expect("config");
        assert_eq!(cfg.base_dir, PathBuf::from("/work"));
        assert_eq!(cfg.archive_dir, PathBuf::from("/work/base"));
        assert!(cfg.archive_dir_is_default);
    }

    #[test]
    fn separator_in_extension_is_rejected() {
        let file = parse("[archives]\nextension = \"pk4/x\"\n");
        if env::var_os("PAKTOOL_ARCHIVE_EXT").is_some() {
            return;
        }
        let err = build_config(Path::new("/cwd"), file, None).expect_err("invalid");
        assert!(matches!(err, PakError::InvalidConfig(_)));
    }
}
