//! Error types
//!
//! Two failures are surfaced to callers: a bad language directory at
//! construction time, and a locale table that cannot be loaded. A missing
//! translation key is not an error; lookups degrade to the key itself.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Crate-wide result alias
pub type Result<T> = std::result::Result<T, TranslatorError>;

/// Top-level error type for the translator.
#[derive(Debug, Error)]
pub enum TranslatorError {
    /// The language directory is missing, not a directory, or unreadable.
    #[error("language directory '{}' does not exist or is not readable: {reason}", .path.display())]
    Configuration { path: PathBuf, reason: String },

    /// A locale's data file could not be read or parsed.
    #[error("failed to load locale '{locale}' from '{}' ({kind}): {reason}", .path.display())]
    Load {
        locale: String,
        path: PathBuf,
        kind: LoadErrorKind,
        reason: String,
    },
}

/// What went wrong while loading a locale table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadErrorKind {
    /// The locale identifier cannot be used as a path component.
    InvalidLocale,
    /// The data file is missing or unreadable.
    Io,
    /// The data file is not valid for its format.
    Parse,
    /// The document parsed, but is not a mapping of strings and tables.
    NotATable,
}

impl fmt::Display for LoadErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            LoadErrorKind::InvalidLocale => "invalid locale",
            LoadErrorKind::Io => "io",
            LoadErrorKind::Parse => "parse",
            LoadErrorKind::NotATable => "not a table",
        };
        f.write_str(label)
    }
}

impl TranslatorError {
    pub(crate) fn configuration(path: impl Into<PathBuf>, reason: impl fmt::Display) -> Self {
        TranslatorError::Configuration {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub(crate) fn load(
        locale: &str,
        path: impl Into<PathBuf>,
        kind: LoadErrorKind,
        reason: impl fmt::Display,
    ) -> Self {
        TranslatorError::Load {
            locale: locale.to_string(),
            path: path.into(),
            kind,
            reason: reason.to_string(),
        }
    }

    /// The load failure kind, if this is a load error.
    pub fn load_kind(&self) -> Option<LoadErrorKind> {
        match self {
            TranslatorError::Load { kind, .. } => Some(*kind),
            TranslatorError::Configuration { .. } => None,
        }
    }

    /// Whether the language directory was rejected.
    pub fn is_configuration(&self) -> bool {
        matches!(self, TranslatorError::Configuration { .. })
    }

    /// Whether a locale table failed to load.
    pub fn is_load(&self) -> bool {
        matches!(self, TranslatorError::Load { .. })
    }
}
