//! Google Translate API provider for machine translation
//!
//! This module integrates with Google Translate API v2 to provide real
//! machine translation capabilities.
//!
//! # Authentication
//!
//! The provider is built from [`Credentials`]: an API key, sent as the `key`
//! query parameter, and a Google Cloud project id, sent as the
//! `x-goog-user-project` header so usage is billed to that project.
//! See [`Credentials::from_env`] for the environment variables.
//!
//! # Example
//!
//! ```ignore
//! use webext_locales_mt::config::Credentials;
//! use webext_locales_mt::mt::{GoogleTranslateProvider, MachineTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::new(Credentials::from_env()?)?;
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = provider.translate_chunk(&texts, "en", "fr").await?;
//!     println!("{:?}", results);
//!     Ok(())
//! }
//! ```

use crate::config::Credentials;
use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::{MachineTranslator, validate_locale};
use async_trait::async_trait;
use reqwest::Url;
use serde::{Deserialize, Serialize};

/// Default endpoint for Google Translate API v2
pub const DEFAULT_BASE_URL: &str = "https://translation.googleapis.com/language/translate/v2";

/// Request body for the v2 `translate` method
#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a [String],
    source: &'a str,
    target: &'a str,
    format: &'static str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    translations: OneOrMany<Translation>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Translation {
    translated_text: String,
}

/// A field the API may return either as an array or, for single-item
/// batches, as a bare object
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum OneOrMany<T> {
    Many(Vec<T>),
    One(T),
}

impl<T> OneOrMany<T> {
    fn into_vec(self) -> Vec<T> {
        match self {
            OneOrMany::Many(items) => items,
            OneOrMany::One(item) => vec![item],
        }
    }
}

/// Google Translate API v2 provider
///
/// Communicates with Google's translation API to perform real translations.
/// Each call to [`translate_chunk`](MachineTranslator::translate_chunk) is one
/// HTTP request; chunking is handled by the
/// [`TranslationClient`](crate::mt::TranslationClient).
#[derive(Clone)]
pub struct GoogleTranslateProvider {
    /// Key and billing project
    credentials: Credentials,
    /// HTTP client for async requests
    client: reqwest::Client,
    /// Base URL for Google Translate API
    base_url: String,
}

impl GoogleTranslateProvider {
    /// Maximum number of texts per API request.
    /// Larger requests fail with 'Too many text segments'.
    pub const MAX_BATCH_SIZE: usize = 128;

    /// Maximum characters per string (30KB per Google Translate API limits)
    const MAX_CHARS_PER_STRING: usize = 30_000;

    /// Create a new GoogleTranslateProvider
    ///
    /// # Returns
    ///
    /// * `Ok(Self)` - New provider instance
    /// * `Err(MtError)` - If the API key or project id is empty, or HTTP client creation fails
    pub fn new(credentials: Credentials) -> MtResult<Self> {
        if credentials.api_key.trim().is_empty() {
            return Err(MtError::Config("API key cannot be empty".to_string()));
        }
        if credentials.project_id.trim().is_empty() {
            return Err(MtError::Config("Project id cannot be empty".to_string()));
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| MtError::Config(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            credentials,
            client,
            base_url: DEFAULT_BASE_URL.to_string(),
        })
    }

    /// Point the provider at a different endpoint (proxies, test servers)
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

impl std::fmt::Debug for GoogleTranslateProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GoogleTranslateProvider")
            .field("credentials", &self.credentials)
            .field("base_url", &self.base_url)
            .finish()
    }
}

#[async_trait]
impl MachineTranslator for GoogleTranslateProvider {
    async fn translate_chunk(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        validate_locale(source_locale)?;
        validate_locale(target_locale)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        if texts.len() > Self::MAX_BATCH_SIZE {
            return Err(MtError::InvalidRequest(format!(
                "{} texts exceed the limit of {} per request",
                texts.len(),
                Self::MAX_BATCH_SIZE
            )));
        }

        for (i, text) in texts.iter().enumerate() {
            if text.len() > Self::MAX_CHARS_PER_STRING {
                return Err(MtError::InvalidRequest(format!(
                    "Text at index {} exceeds maximum length of {} characters",
                    i,
                    Self::MAX_CHARS_PER_STRING
                )));
            }
        }

        let url = Url::parse_with_params(
            &self.base_url,
            [("key", self.credentials.api_key.as_str())],
        )
        .map_err(|e| MtError::Config(format!("Invalid endpoint {}: {}", self.base_url, e)))?;
        let body = TranslateRequest {
            q: texts,
            source: source_locale,
            target: target_locale,
            format: "text",
        };

        let response = self
            .client
            .post(url)
            .header("x-goog-user-project", &self.credentials.project_id)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|e| format!("<failed to read body: {}>", e));
            return Err(MtError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: TranslateResponse = response
            .json()
            .await
            .map_err(|e| {
                MtError::InvalidResponse(format!(
                    "Failed to parse API response: {}",
                    e.without_url()
                ))
            })?;

        Ok(parsed
            .data
            .translations
            .into_vec()
            .into_iter()
            .map(|t| t.translated_text)
            .collect())
    }

    fn max_batch_size(&self) -> usize {
        Self::MAX_BATCH_SIZE
    }

    fn provider_name(&self) -> &str {
        "Google Translate"
    }

    fn attribution(&self) -> &str {
        "Google Translate API"
    }
}
