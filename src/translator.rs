//! The translator
//!
//! A [`Translator`] owns a language directory, a current locale and a cache
//! of loaded pattern tables. Tables are loaded eagerly for the initial
//! locale, explicitly by [`Translator::set_locale`] (which always re-reads
//! the data file), and lazily by lookups against a locale that has not been
//! loaded yet. Cache entries are never evicted.
//!
//! Lookups that may load take `&mut self`. To share one translator between
//! threads, wrap it in a `Mutex`.

use std::collections::hash_map::Entry as CacheEntry;
use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use crate::error::{Result, TranslatorError};
use crate::format::{format, FormatData};
use crate::loader::{load_patterns, DataFormat};
use crate::locale::{default_locale, DEFAULT_LOCALE};
use crate::pattern::{resolve_dotted_path, Entry, PatternTable};

type SignalFn = Box<dyn FnOnce() -> Option<String>>;

/// Resolves keys against per-locale pattern tables.
#[derive(Debug)]
pub struct Translator {
    base_path: PathBuf,
    locale: String,
    format: DataFormat,
    patterns: HashMap<String, PatternTable>,
}

/// Configures and constructs a [`Translator`].
pub struct TranslatorBuilder {
    language_dir: PathBuf,
    locale: Option<String>,
    accept_language: Option<SignalFn>,
    fallback_locale: String,
    format: DataFormat,
}

impl TranslatorBuilder {
    /// Start from defaults: derived locale, `zh_CN` fallback, JSON files.
    pub fn new(language_dir: impl AsRef<Path>) -> Self {
        Self {
            language_dir: language_dir.as_ref().to_path_buf(),
            locale: None,
            accept_language: None,
            fallback_locale: DEFAULT_LOCALE.to_string(),
            format: DataFormat::default(),
        }
    }

    /// Initial locale. An empty string means "derive it".
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Accept-language style signal, e.g. `zh-CN,en-US;q=0.9`.
    pub fn accept_language(mut self, signal: impl Into<String>) -> Self {
        let signal = signal.into();
        self.accept_language = Some(Box::new(move || Some(signal)));
        self
    }

    /// Accessor for the accept-language signal.
    ///
    /// Only called when no explicit locale was given.
    pub fn accept_language_from<F>(mut self, accessor: F) -> Self
    where
        F: FnOnce() -> Option<String> + 'static,
    {
        self.accept_language = Some(Box::new(accessor));
        self
    }

    /// Locale used when the accept-language signal is absent or empty.
    pub fn fallback_locale(mut self, locale: impl Into<String>) -> Self {
        self.fallback_locale = locale.into();
        self
    }

    /// Format of the locale data files.
    pub fn data_format(mut self, format: DataFormat) -> Self {
        self.format = format;
        self
    }

    /// Validate the language directory and load the initial locale.
    pub fn build(self) -> Result<Translator> {
        let dir = &self.language_dir;

        let metadata = fs::metadata(dir).map_err(|e| TranslatorError::configuration(dir, e))?;
        if !metadata.is_dir() {
            return Err(TranslatorError::configuration(dir, "not a directory"));
        }
        fs::read_dir(dir).map_err(|e| TranslatorError::configuration(dir, e))?;

        // Drops trailing separators
        let base_path: PathBuf = dir.components().collect();

        let locale = match self.locale.filter(|l| !l.is_empty()) {
            Some(locale) => locale,
            None => {
                let signal = self.accept_language.and_then(|accessor| accessor());
                default_locale(signal.as_deref(), &self.fallback_locale)
            }
        };

        let mut translator = Translator {
            base_path,
            locale: String::new(),
            format: self.format,
            patterns: HashMap::new(),
        };
        translator.set_locale(&locale)?;

        Ok(translator)
    }
}

impl Translator {
    /// Create a translator for `language_dir`.
    ///
    /// An empty `locale` selects the fallback locale (`zh_CN`); use
    /// [`Translator::builder`] to derive it from an accept-language signal.
    pub fn new(language_dir: impl AsRef<Path>, locale: &str) -> Result<Self> {
        TranslatorBuilder::new(language_dir).locale(locale).build()
    }

    /// A builder for non-default configuration.
    pub fn builder(language_dir: impl AsRef<Path>) -> TranslatorBuilder {
        TranslatorBuilder::new(language_dir)
    }

    /// Switch to `locale`, re-reading its data file even if it is cached.
    ///
    /// On failure the current locale and the cache are left untouched.
    pub fn set_locale(&mut self, locale: &str) -> Result<&mut Self> {
        let table = load_patterns(&self.base_path, locale, self.format)?;

        if self.patterns.insert(locale.to_string(), table).is_some() {
            debug!(locale, "reloaded locale patterns");
        }
        self.locale = locale.to_string();

        Ok(self)
    }

    /// Substitute `{name}` placeholders in a literal pattern.
    pub fn format(&self, pattern: &str, data: impl Into<FormatData>) -> String {
        format(pattern, &data.into())
    }

    /// Translate one key in the current locale.
    pub fn trans(&mut self, name: &str, data: impl Into<FormatData>) -> Result<String> {
        self.get_line(name, data, None)
    }

    /// Translate several keys, each with its own data.
    ///
    /// The result has exactly the input's keys.
    pub fn trans_map<I, K, D>(&mut self, names: I) -> Result<BTreeMap<String, String>>
    where
        I: IntoIterator<Item = (K, D)>,
        K: Into<String>,
        D: Into<FormatData>,
    {
        let mut strings = BTreeMap::new();
        for (key, data) in names {
            let key = key.into();
            let line = self.get_line(&key, data, None)?;
            strings.insert(key, line);
        }
        Ok(strings)
    }

    /// Resolve `key` and fill in its placeholders.
    ///
    /// A key with no pattern (or with an empty pattern, or naming a nested
    /// table) comes back unchanged. `locale` defaults to the current one.
    pub fn get_line(&mut self, key: &str, data: impl Into<FormatData>, locale: Option<&str>) -> Result<String> {
        let data = data.into();

        let pattern = match self.get_pattern(key, locale)? {
            Some(Entry::Pattern(pattern)) if !pattern.is_empty() => pattern,
            _ => {
                trace!(key, "no pattern for key");
                return Ok(key.to_string());
            }
        };

        if data.is_empty() {
            return Ok(pattern.to_string());
        }

        Ok(format(pattern, &data))
    }

    /// Look up the raw entry for `name`, loading the locale if needed.
    pub fn get_pattern(&mut self, name: &str, locale: Option<&str>) -> Result<Option<Entry<'_>>> {
        let locale = match locale {
            Some(locale) if !locale.is_empty() => locale.to_string(),
            _ => self.locale.clone(),
        };

        let table = match self.patterns.entry(locale) {
            CacheEntry::Occupied(entry) => entry.into_mut(),
            CacheEntry::Vacant(entry) => {
                debug!(locale = entry.key().as_str(), "loading locale patterns on first use");
                let table = load_patterns(&self.base_path, entry.key(), self.format)?;
                entry.insert(table)
            }
        };

        Ok(resolve_dotted_path(table, Some(name)))
    }

    /// The current locale.
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// The language directory, without trailing separators.
    pub fn base_path(&self) -> &Path {
        &self.base_path
    }

    /// Format of the locale data files.
    pub fn data_format(&self) -> DataFormat {
        self.format
    }

    /// Whether `locale`'s table is in the cache.
    pub fn is_loaded(&self, locale: &str) -> bool {
        self.patterns.contains_key(locale)
    }

    /// Locales currently in the cache, in no particular order.
    pub fn loaded_locales(&self) -> impl Iterator<Item = &str> {
        self.patterns.keys().map(String::as_str)
    }

    /// The cached table for `locale`, without loading it.
    pub fn patterns(&self, locale: &str) -> Option<&PatternTable> {
        self.patterns.get(locale)
    }
}
