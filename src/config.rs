use crate::error::{Error, Result};
use crate::locale::{Language, Locale};
use crate::mt::validate_locale;
use serde::Deserialize;
use std::path::Path;

/// Input configuration: where the source files live and which languages to produce
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Configuration {
    /// Source `messages.json` catalog
    pub messages: Locale,
    /// Source store description text
    pub description: Locale,
    /// Target languages, in output order
    pub languages: Vec<Language>,
}

impl Configuration {
    /// Read and validate the configuration file
    pub async fn load(path: &Path) -> Result<Self> {
        let content = tokio::fs::read_to_string(path).await.map_err(|e| {
            Error::Config(format!("Failed to load {}: {}", path.display(), e))
        })?;

        let config: Configuration = serde_json::from_str(&content)
            .map_err(|e| Error::Config(format!("Invalid {}: {}", path.display(), e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Parse and validate configuration JSON
    pub fn from_json(content: &str) -> Result<Self> {
        let config: Configuration = serde_json::from_str(content)
            .map_err(|e| Error::Config(format!("Invalid configuration: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Check every required field is present and usable
    pub fn validate(&self) -> Result<()> {
        validate_locale_entry("messages", &self.messages)?;
        validate_locale_entry("description", &self.description)?;

        if self.languages.is_empty() {
            return Err(Error::Config(
                "'languages' must list at least one target language".to_string(),
            ));
        }
        for (i, language) in self.languages.iter().enumerate() {
            validate_language(&format!("languages[{}]", i), language)?;
        }
        Ok(())
    }
}

fn validate_locale_entry(name: &str, locale: &Locale) -> Result<()> {
    if locale.base_path.as_os_str().is_empty() {
        return Err(Error::Config(format!("'{}.path' is empty", name)));
    }
    if locale.filename.trim().is_empty() {
        return Err(Error::Config(format!("'{}.filename' is empty", name)));
    }
    validate_language(&format!("{}.language", name), &locale.language)
}

fn validate_language(name: &str, language: &Language) -> Result<()> {
    if language.directory_name.trim().is_empty() {
        return Err(Error::Config(format!("'{}.dir' is empty", name)));
    }
    if language.directory_name.contains(['/', '\\']) || language.directory_name == ".." {
        return Err(Error::Config(format!(
            "'{}.dir' must be a plain folder name, got '{}'",
            name, language.directory_name
        )));
    }
    validate_locale(&language.iso_code)
        .map_err(|e| Error::Config(format!("'{}.iso_code': {}", name, e)))
}

/// Google Cloud credentials for the translation service
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub api_key: String,
    /// Project billed for the requests
    pub project_id: String,
}

impl Credentials {
    pub const API_KEY_VAR: &'static str = "GOOGLE_TRANSLATE_API_KEY";
    pub const PROJECT_VARS: [&'static str; 2] = ["GOOGLE_CLOUD_PROJECT", "GCLOUD_PROJECT"];

    /// Load credentials from the environment
    ///
    /// Reads `GOOGLE_TRANSLATE_API_KEY` and `GOOGLE_CLOUD_PROJECT`
    /// (falling back to `GCLOUD_PROJECT`).
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load credentials through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let present = |name: &str| lookup(name).filter(|v| !v.trim().is_empty());

        let api_key = present(Self::API_KEY_VAR).ok_or_else(|| {
            Error::Config(format!(
                "{} environment variable not set",
                Self::API_KEY_VAR
            ))
        })?;

        let project_id = Self::PROJECT_VARS
            .iter()
            .find_map(|name| present(*name))
            .ok_or_else(|| {
                Error::Config(format!(
                    "project id not specified. Set the {} environment variable",
                    Self::PROJECT_VARS[0]
                ))
            })?;

        Ok(Self {
            api_key,
            project_id,
        })
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("api_key", &"***")
            .field("project_id", &self.project_id)
            .finish()
    }
}
