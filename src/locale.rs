//! Languages and on-disk locale locations
//!
//! Extension packaging expects one directory per language under a common
//! base path, e.g. `_locales/en/messages.json`, `_locales/zh_CN/messages.json`.
//! The directory name does not always match the code the translation service
//! wants (`zh_CN` vs `zh-CN`), so a [`Language`] carries both.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// A language as known to the translation service and to the filesystem
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Language {
    /// BCP-47 / ISO-639-1 code sent to the translation service
    pub iso_code: String,
    /// Folder name for this language inside the locale base path
    #[serde(rename = "dir")]
    pub directory_name: String,
}

impl Language {
    pub fn new(iso_code: impl Into<String>, directory_name: impl Into<String>) -> Self {
        Self {
            iso_code: iso_code.into(),
            directory_name: directory_name.into(),
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.iso_code)
    }
}

/// Location of one localized file: `base_path/<language dir>/filename`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Locale {
    #[serde(rename = "path")]
    pub base_path: PathBuf,
    pub filename: String,
    pub language: Language,
}

impl Locale {
    pub fn new(
        base_path: impl Into<PathBuf>,
        filename: impl Into<String>,
        language: Language,
    ) -> Self {
        Self {
            base_path: base_path.into(),
            filename: filename.into(),
            language,
        }
    }

    /// Directory holding this language's files
    pub fn dir(&self) -> PathBuf {
        self.base_path.join(&self.language.directory_name)
    }

    /// Full path of the file
    pub fn file_path(&self) -> PathBuf {
        self.dir().join(&self.filename)
    }

    /// Same base path and filename, different language
    pub fn with_language(&self, language: &Language) -> Locale {
        Locale {
            base_path: self.base_path.clone(),
            filename: self.filename.clone(),
            language: language.clone(),
        }
    }

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}
