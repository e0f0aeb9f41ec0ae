//! translator - per-locale pattern tables with `{name}` substitution
//!
//! ```text
//! i18n/
//! |-- zh_CN/
//! |    |-- all.json   # {"user_not_exists": "用户 {name} 不存在。"}
//! |-- en_US/
//! |    |-- all.json   # {"user_not_exists": "user {name} not exists."}
//! ```
//!
//! ```no_run
//! use translator::{FormatData, Translator};
//!
//! # fn main() -> translator::Result<()> {
//! let mut translator = Translator::new("app/i18n", "zh_CN")?;
//! let line = translator.trans("user_not_exists", [("name", "ann")])?;
//! let other = translator.format("user {name} not exists.", FormatData::new().arg("name", "ann"));
//! # let _ = (line, other);
//! # Ok(())
//! # }
//! ```

pub mod error;
pub mod format;
pub mod loader;
pub mod locale;
pub mod pattern;
pub mod translator;

pub use error::{LoadErrorKind, Result, TranslatorError};
pub use format::{format, FormatData};
pub use loader::DataFormat;
pub use pattern::{resolve_dotted_path, Entry, PatternTable, PatternValue};
pub use translator::{Translator, TranslatorBuilder};
