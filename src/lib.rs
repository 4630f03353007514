//! Machine-translate a browser extension's locale files.
//!
//! Given a source `messages.json` catalog and a store description, produce a
//! translated copy of each for every target language, laid out as
//! `<path>/<language dir>/<filename>`.

pub mod catalog;
pub mod config;
pub mod description;
pub mod error;
pub mod job;
pub mod loader;
pub mod locale;
pub mod mt;
pub mod orchestrator;
pub mod retry;

pub use catalog::{MessageBatch, MessageCatalog, TRANSLATION_INFO_KEY, translate_catalog};
pub use config::{Configuration, Credentials};
pub use description::translate_description;
pub use error::{Error, Result};
pub use job::{TranslationJob, TranslationReport};
pub use locale::{Language, Locale};
pub use orchestrator::{RunSummary, run};
