//! Locale data file loading
//!
//! Each locale lives in its own directory holding a single data file with
//! the fixed stem `all`:
//!
//! ```text
//! <language_dir>/<locale>/all.json
//! ```
//!
//! The file is parsed as plain data; nothing in it is executed. The parsed
//! document then goes through [`PatternTable`]'s `Deserialize` impl, so
//! scalars are coerced the same way whichever format the file uses.

use serde::Deserialize;
use serde_json::Value;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use tracing::debug;

use crate::error::{LoadErrorKind, Result, TranslatorError};
use crate::locale::validate_locale;
use crate::pattern::PatternTable;

/// Stem of every locale data file
pub const DATA_FILE_STEM: &str = "all";

/// Serialization format of the locale data files.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DataFormat {
    #[default]
    Json,
    Yaml,
    Toml,
}

impl DataFormat {
    /// File extension of `all.<ext>` for this format.
    pub fn extension(self) -> &'static str {
        match self {
            DataFormat::Json => "json",
            DataFormat::Yaml => "yaml",
            DataFormat::Toml => "toml",
        }
    }

    fn parse(self, content: &str) -> std::result::Result<Value, String> {
        match self {
            DataFormat::Json => serde_json::from_str(content).map_err(|e| e.to_string()),
            DataFormat::Yaml => serde_yaml::from_str(content).map_err(|e| e.to_string()),
            DataFormat::Toml => toml::from_str(content).map_err(|e| e.to_string()),
        }
    }
}

impl fmt::Display for DataFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for DataFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(DataFormat::Json),
            "yaml" | "yml" => Ok(DataFormat::Yaml),
            "toml" => Ok(DataFormat::Toml),
            other => Err(format!("unsupported data format '{other}'")),
        }
    }
}

/// Path of the data file for `locale` under `base`.
pub fn data_file_path(base: &Path, locale: &str, format: DataFormat) -> PathBuf {
    base.join(locale)
        .join(format!("{DATA_FILE_STEM}.{}", format.extension()))
}

/// Read and parse the pattern table for `locale`.
///
/// Fails as a whole: a table is either returned complete or not at all.
pub fn load_patterns(base: &Path, locale: &str, format: DataFormat) -> Result<PatternTable> {
    let path = data_file_path(base, locale, format);

    validate_locale(locale)
        .map_err(|reason| TranslatorError::load(locale, &path, LoadErrorKind::InvalidLocale, reason))?;

    let content = fs::read_to_string(&path)
        .map_err(|e| TranslatorError::load(locale, &path, LoadErrorKind::Io, e))?;

    let document = format
        .parse(&content)
        .map_err(|reason| TranslatorError::load(locale, &path, LoadErrorKind::Parse, reason))?;

    let table = PatternTable::deserialize(document)
        .map_err(|reason| TranslatorError::load(locale, &path, LoadErrorKind::NotATable, reason))?;

    debug!(locale, path = %path.display(), entries = table.len(), "loaded locale patterns");

    Ok(table)
}
