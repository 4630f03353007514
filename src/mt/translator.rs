//! Machine Translation trait and utilities
//!
//! This module defines the `MachineTranslator` trait for provider abstraction,
//! enabling support for different MT backends (Google Translate, mock, etc.)
//! without coupling the translators to any specific implementation.
//!
//! A provider only knows how to translate a single request's worth of strings.
//! Splitting large batches, running the requests concurrently and putting the
//! results back together is the job of [`TranslationClient`](crate::mt::TranslationClient).
//!
//! # Example
//!
//! ```ignore
//! use webext_locales_mt::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = MockTranslator::new(MockMode::Suffix);
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let results = provider.translate_chunk(&texts, "en", "fr").await?;
//!     assert_eq!(results, vec!["Hello_fr", "Goodbye_fr"]);
//!     Ok(())
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use async_trait::async_trait;

/// Generic trait for machine translation providers
///
/// Implementations of this trait handle the actual translation work,
/// whether through an API (Google Translate) or deterministic logic (Mock).
///
/// All methods that talk to the backend are async to support I/O-bound
/// operations like network requests.
#[async_trait]
pub trait MachineTranslator: Send + Sync {
    /// Translate one request's worth of strings
    ///
    /// Callers never pass more than [`max_batch_size`](Self::max_batch_size)
    /// strings at once.
    ///
    /// # Arguments
    ///
    /// * `texts` - Strings to translate, at most `max_batch_size()` of them
    /// * `source_locale` - Source language code (e.g., "en", "pt-BR")
    /// * `target_locale` - Target language code (e.g., "fr", "zh-CN")
    ///
    /// # Returns
    ///
    /// * `Ok(Vec<String>)` - Translated strings in the same order as input
    /// * `Err(MtError)` - If translation fails
    async fn translate_chunk(
        &self,
        texts: &[String],
        source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>>;

    /// Maximum number of strings the backend accepts in a single request
    fn max_batch_size(&self) -> usize;

    /// Get the name of this translation provider
    ///
    /// Used for logging and debugging to identify which provider handled a translation.
    fn provider_name(&self) -> &str;

    /// Text recorded in the `translationInfo` block of translated catalogs
    fn attribution(&self) -> &str {
        self.provider_name()
    }
}

/// Validate that a locale code is in acceptable format
///
/// Checks that the locale code contains only alphanumeric characters,
/// hyphens, and underscores (following ISO 639 conventions).
///
/// Region and script subtags are kept as-is: `zh-CN` and `zh-TW` are
/// different targets for the translation service.
///
/// # Example
///
/// ```ignore
/// validate_locale("en")?; // OK
/// validate_locale("zh-CN")?; // OK
/// validate_locale("invalid@code").unwrap_err(); // Error
/// ```
pub fn validate_locale(locale: &str) -> MtResult<()> {
    if locale.is_empty() {
        return Err(MtError::InvalidLocale("Locale code is empty".to_string()));
    }

    if !locale
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(MtError::InvalidLocale(format!(
            "Invalid characters in locale code: {}",
            locale
        )));
    }

    Ok(())
}
