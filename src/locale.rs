//! Locale selection
//!
//! This module derives the initial locale from an accept-language style
//! signal (for example an HTTP `Accept-Language` header, or the system
//! locale reported by the OS) and validates locale identifiers before they
//! are used to build data file paths.

use std::path::{Component, Path};
use sys_locale::get_locale;

/// Locale used when no signal is available
pub const DEFAULT_LOCALE: &str = "zh_CN";

/// Maximum accepted length of a locale identifier
const MAX_LOCALE_LEN: usize = 64;

/// Pick the preferred locale from an accept-language style signal.
///
/// Hyphens become underscores, the list is split on commas and the first
/// entry wins. Quality parameters (`;q=0.9`) and surrounding whitespace are
/// dropped. Returns `None` when the signal is absent or its first entry is
/// empty.
pub fn parse_accept_language(signal: Option<&str>) -> Option<String> {
    let normalized = signal?.replace('-', "_");
    let first = normalized.split(',').next().unwrap_or_default();
    let tag = first.split(';').next().unwrap_or_default().trim();

    if tag.is_empty() {
        return None;
    }

    Some(tag.to_string())
}

/// Derive the default locale from a signal, falling back to `fallback`.
pub fn default_locale(signal: Option<&str>, fallback: &str) -> String {
    parse_accept_language(signal).unwrap_or_else(|| fallback.to_string())
}

/// The system locale as an accept-language style signal, e.g. `en-US`.
pub fn system_accept_language() -> Option<String> {
    get_locale()
}

/// Check that a locale identifier is safe to use as a directory name.
pub(crate) fn validate_locale(locale: &str) -> Result<(), &'static str> {
    if locale.is_empty() {
        return Err("locale identifier is empty");
    }

    if locale.len() > MAX_LOCALE_LEN {
        return Err("locale identifier is too long");
    }

    // Path traversal and injection
    if locale.contains('/') || locale.contains('\\') || locale.contains('\0') || locale.contains("..") {
        return Err("locale identifier contains forbidden characters");
    }

    // Exactly one plain directory name; rejects "." and the like
    let mut components = Path::new(locale).components();
    if !matches!((components.next(), components.next()), (Some(Component::Normal(_)), None)) {
        return Err("locale identifier is not a single directory name");
    }

    Ok(())
}
