use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PakError {
    #[error("not found: {}", .0.display())]
    NotFound(PathBuf),
    #[error("failed to read archive {}: {reason}", path.display())]
    ArchiveRead { path: PathBuf, reason: String },
    #[error("`{entry}` resolved to {} but could not be read: {source}", path.display())]
    ResolverInconsistency {
        entry: String,
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to write archive {}: {reason}", path.display())]
    ArchiveWrite { path: PathBuf, reason: String },
    #[error("config invalid or unreadable: {0}")]
    InvalidConfig(String),
}

impl PakError {
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        if source.kind() == io::ErrorKind::NotFound {
            return Self::NotFound(path);
        }
        Self::Io { path, source }
    }

    pub fn code(&self) -> PakErrorCode {
        match self {
            Self::NotFound(_) => PakErrorCode::E001NotFound,
            Self::ArchiveRead { .. } => PakErrorCode::E002ArchiveRead,
            Self::ResolverInconsistency { .. } => PakErrorCode::E003ResolverInconsistency,
            Self::Io { .. } => PakErrorCode::E004Io,
            Self::ArchiveWrite { .. } => PakErrorCode::E005ArchiveWrite,
            Self::InvalidConfig(_) => PakErrorCode::E006InvalidConfig,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PakErrorCode {
    E001NotFound,
    E002ArchiveRead,
    E003ResolverInconsistency,
    E004Io,
    E005ArchiveWrite,
    E006InvalidConfig,
}

impl PakErrorCode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::E001NotFound => "E001_NOT_FOUND",
            Self::E002ArchiveRead => "E002_ARCHIVE_READ",
            Self::E003ResolverInconsistency => "E003_RESOLVER_INCONSISTENCY",
            Self::E004Io => "E004_IO",
            Self::E005ArchiveWrite => "E005_ARCHIVE_WRITE",
            Self::E006InvalidConfig => "E006_INVALID_CONFIG",
        }
    }
}
