//! Machine Translation Module
//!
//! This module provides the connection to the translation service used by the
//! catalog and description translators.
//!
//! # Overview
//!
//! 1. **MT Trait & Providers** - `MachineTranslator` with a Google Translate v2 implementation
//!    and a deterministic mock
//! 2. **Translation Client** - splits payloads to the provider's per-request limit, runs the
//!    requests concurrently and reassembles results in input order
//!
//! # Example
//!
//! ```ignore
//! use webext_locales_mt::config::Credentials;
//! use webext_locales_mt::locale::Language;
//! use webext_locales_mt::mt::{GoogleTranslateProvider, TranslationClient};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let provider = GoogleTranslateProvider::new(Credentials::from_env()?)?;
//!     let client = TranslationClient::new(provider);
//!
//!     let texts = vec!["Hello".to_string(), "Goodbye".to_string()];
//!     let translated = client
//!         .translate(&texts, &Language::new("en", "en"), &Language::new("fr", "fr"))
//!         .await?;
//!
//!     println!("{:?}", translated);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod google_translate;
pub mod mock;
pub mod translator;

pub use client::TranslationClient;
pub use error::{MtError, MtResult};
pub use google_translate::GoogleTranslateProvider;
pub use mock::{MockMode, MockTranslator};
pub use translator::{MachineTranslator, validate_locale};
