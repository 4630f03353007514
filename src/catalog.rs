//! `messages.json` catalogs
//!
//! A catalog maps message keys to entries:
//!
//! ```json
//! {
//!     "greeting": {"message": "Hello", "description": "Shown on startup"},
//!     "count": {"message": "$COUNT$ items", "placeholders": {"count": {"content": "$1"}}}
//! }
//! ```
//!
//! Only the `message` strings are sent for translation. They are collected in
//! file order together with their keys, and the translations are written back
//! into exactly those keys, so descriptions, placeholders and any entry
//! without a `message` come through untouched.

use crate::error::{Error, Result};
use crate::job::{TranslationJob, TranslationReport};
use crate::loader;
use crate::locale::{Language, Locale};
use crate::mt::TranslationClient;
use futures::future::join_all;
use serde_json::{Map, Value, json};
use std::path::PathBuf;
use tracing::{error, info, warn};

/// Attribution block added to every translated catalog
pub const TRANSLATION_INFO_KEY: &str = "translationInfo";

const MESSAGE_FIELD: &str = "message";
const CONTACT_PLACEHOLDER: &str = "Add your name and contact info, if you want";

/// Translatable strings pulled out of a catalog, paired by index with their keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageBatch {
    pub keys: Vec<String>,
    pub messages: Vec<String>,
}

impl MessageBatch {
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

/// An ordered message catalog; iteration follows the source file's key order
#[derive(Debug, Clone, PartialEq)]
pub struct MessageCatalog {
    entries: Map<String, Value>,
}

impl MessageCatalog {
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(Error::Catalog(format!(
                "root must be an object, found {}",
                json_type(&other)
            ))),
        }
    }

    /// Read the catalog stored at `locale`
    pub async fn load(locale: &Locale) -> Result<Self> {
        let path = locale.file_path();
        match loader::read_json(&path).await? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(Error::Catalog(format!(
                "{}: root must be an object, found {}",
                path.display(),
                json_type(&other)
            ))),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Collect every non-empty `message` string, in catalog order
    ///
    /// The attribution block is skipped: it is replaced on output anyway.
    pub fn extract_messages(&self) -> MessageBatch {
        let mut batch = MessageBatch::default();
        for (key, entry) in &self.entries {
            if key == TRANSLATION_INFO_KEY {
                continue;
            }
            if let Some(message) = message_of(entry) {
                batch.keys.push(key.clone());
                batch.messages.push(message.to_string());
            }
        }
        batch
    }

    /// Copy of this catalog with `translated[i]` written into `keys[i]`'s message
    pub fn splice(&self, keys: &[String], translated: Vec<String>) -> Result<MessageCatalog> {
        if keys.len() != translated.len() {
            return Err(Error::Catalog(format!(
                "{} keys but {} translated messages",
                keys.len(),
                translated.len()
            )));
        }

        let mut output = self.clone();
        for (key, text) in keys.iter().zip(translated) {
            match output.entries.get_mut(key) {
                Some(Value::Object(entry)) if entry.contains_key(MESSAGE_FIELD) => {
                    entry.insert(MESSAGE_FIELD.to_string(), Value::String(text));
                }
                _ => {
                    return Err(Error::Catalog(format!(
                        "key '{}' has no message to replace",
                        key
                    )));
                }
            }
        }
        Ok(output)
    }

    /// Add or overwrite the `translationInfo` block
    pub fn set_translation_info(&mut self, attribution: &str) {
        self.entries.insert(
            TRANSLATION_INFO_KEY.to_string(),
            json!({
                "message": attribution,
                "description": CONTACT_PLACEHOLDER,
            }),
        );
    }

    pub fn to_value(&self) -> Value {
        Value::Object(self.entries.clone())
    }
}

fn message_of(entry: &Value) -> Option<&str> {
    entry
        .get(MESSAGE_FIELD)
        .and_then(Value::as_str)
        .filter(|message| !message.is_empty())
}

fn json_type(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

/// Translate the catalog at `source` into every target language
///
/// Each language is translated and written independently and concurrently.
/// A language that fails is logged and left without an output file; the
/// others are unaffected.
///
/// # Errors
///
/// Only when the source catalog itself cannot be read; nothing is written then.
pub async fn translate_catalog(
    client: &TranslationClient,
    source: &Locale,
    targets: &[Language],
) -> Result<TranslationReport> {
    let catalog = MessageCatalog::load(source).await?;
    let batch = catalog.extract_messages();
    info!(
        "Loaded {} ({} entries, {} messages)",
        source.file_path().display(),
        catalog.len(),
        batch.len()
    );
    if batch.is_empty() {
        warn!("{} has no messages to translate", source.file_path().display());
    }

    let jobs = targets
        .iter()
        .map(|language| translate_into(client, &catalog, &batch, source, language));
    let outcomes = join_all(jobs).await;

    let mut report = TranslationReport::default();
    for (language, outcome) in targets.iter().zip(outcomes) {
        match &outcome {
            Ok(_) => info!(
                "Translated {} file {} => {}",
                source.filename, source.language.iso_code, language.iso_code
            ),
            Err(e) => error!(
                "Failed to translate {} file {} => {}: {}",
                source.filename, source.language.iso_code, language.iso_code, e
            ),
        }
        report.record(language.clone(), outcome);
    }
    Ok(report)
}

async fn translate_into(
    client: &TranslationClient,
    catalog: &MessageCatalog,
    batch: &MessageBatch,
    source: &Locale,
    language: &Language,
) -> Result<PathBuf> {
    let job = TranslationJob::new(source, language, batch.messages.clone());
    let (target, translated) = job.run(client).await?;

    let mut output = catalog.splice(&batch.keys, translated)?;
    output.set_translation_info(client.attribution().unwrap_or_default());

    loader::write_json(&target, &output.to_value()).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::{MockMode, MockTranslator};
    use std::collections::HashMap;
    use tempfile::TempDir;

    fn catalog(value: Value) -> MessageCatalog {
        MessageCatalog::from_value(value).unwrap()
    }

    fn sample() -> MessageCatalog {
        catalog(json!({
            "greeting": {"message": "Hello", "description": "d"},
            "version": {"description": "no message here"},
            "count": {
                "message": "$COUNT$ items",
                "placeholders": {"count": {"content": "$1", "example": "3"}}
            },
            "empty": {"message": ""},
            "farewell": {"message": "Bye"}
        }))
    }

    fn write_source(dir: &TempDir, value: &Value) -> Locale {
        let locale = Locale::new(dir.path(), "messages.json", Language::new("en", "en"));
        std::fs::create_dir_all(locale.dir()).unwrap();
        std::fs::write(locale.file_path(), serde_json::to_string(value).unwrap()).unwrap();
        locale
    }

    fn read_output(dir: &TempDir, lang_dir: &str) -> Value {
        let path = dir.path().join(lang_dir).join("messages.json");
        serde_json::from_str(&std::fs::read_to_string(path).unwrap()).unwrap()
    }

    // ========== Extraction Tests ==========

    #[test]
    fn test_extract_in_catalog_order() {
        let batch = sample().extract_messages();
        assert_eq!(batch.keys, vec!["greeting", "count", "farewell"]);
        assert_eq!(batch.messages, vec!["Hello", "$COUNT$ items", "Bye"]);
    }

    #[test]
    fn test_extract_skips_non_objects_and_translation_info() {
        let catalog = catalog(json!({
            "stray": "just a string",
            "number": {"message": 42},
            "translationInfo": {"message": "Old attribution"},
            "title": {"message": "Title"}
        }));
        let batch = catalog.extract_messages();
        assert_eq!(batch.keys, vec!["title"]);
    }

    #[test]
    fn test_root_must_be_object() {
        match MessageCatalog::from_value(json!(["a", "b"])) {
            Err(Error::Catalog(msg)) => assert!(msg.contains("an array")),
            other => panic!("Expected Catalog error, got {:?}", other),
        }
    }

    // ========== Splice Tests ==========

    #[test]
    fn test_splice_round_trip() {
        let source = sample();
        let batch = source.extract_messages();
        let translated = vec![
            "Bonjour".to_string(),
            "$COUNT$ articles".to_string(),
            "Au revoir".to_string(),
        ];

        let output = source.splice(&batch.keys, translated).unwrap();

        // same keys, same order
        assert_eq!(
            output.keys().collect::<Vec<_>>(),
            source.keys().collect::<Vec<_>>()
        );
        assert_eq!(
            output.get("greeting").unwrap(),
            &json!({"message": "Bonjour", "description": "d"})
        );
        assert_eq!(output.get("farewell").unwrap(), &json!({"message": "Au revoir"}));
        // auxiliary fields and untranslated entries are identical
        assert_eq!(output.get("version"), source.get("version"));
        assert_eq!(output.get("empty"), source.get("empty"));
        assert_eq!(
            output.get("count").unwrap()["placeholders"],
            source.get("count").unwrap()["placeholders"]
        );
        assert_eq!(output.get("count").unwrap()["message"], "$COUNT$ articles");
        // the original is not modified
        assert_eq!(source.get("greeting").unwrap()["message"], "Hello");
    }

    #[test]
    fn test_splice_length_mismatch() {
        let source = sample();
        let batch = source.extract_messages();
        let result = source.splice(&batch.keys, vec!["only one".to_string()]);
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_splice_unknown_key() {
        let source = sample();
        let result = source.splice(&["version".to_string()], vec!["x".to_string()]);
        assert!(matches!(result, Err(Error::Catalog(_))));
    }

    #[test]
    fn test_translation_info_appended_then_overwritten() {
        let mut output = sample();
        output.set_translation_info("Google Translate API");
        assert_eq!(output.keys().last(), Some(TRANSLATION_INFO_KEY));
        assert_eq!(
            output.get(TRANSLATION_INFO_KEY).unwrap(),
            &json!({
                "message": "Google Translate API",
                "description": "Add your name and contact info, if you want"
            })
        );

        output.set_translation_info("Mock Translator");
        assert_eq!(output.len(), sample().len() + 1);
        assert_eq!(output.get(TRANSLATION_INFO_KEY).unwrap()["message"], "Mock Translator");
    }

    // ========== Translator Tests ==========

    #[tokio::test]
    async fn test_translate_catalog_scenario() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = write_source(
            &temp_dir,
            &json!({
                "greeting": {"message": "Hello", "description": "d"},
                "farewell": {"message": "Bye"}
            }),
        );

        let mut map = HashMap::new();
        map.insert(("Hello".to_string(), "fr".to_string()), "Bonjour".to_string());
        map.insert(("Bye".to_string(), "fr".to_string()), "Au revoir".to_string());
        let client = TranslationClient::new(MockTranslator::new(MockMode::Mappings(map)));

        let report = translate_catalog(&client, &source, &[Language::new("fr", "fr")])
            .await
            .unwrap();
        assert!(report.is_complete());

        let output = read_output(&temp_dir, "fr");
        assert_eq!(
            output,
            json!({
                "greeting": {"message": "Bonjour", "description": "d"},
                "farewell": {"message": "Au revoir"},
                "translationInfo": {
                    "message": "Mock Translator",
                    "description": "Add your name and contact info, if you want"
                }
            })
        );
        let keys: Vec<&String> = output.as_object().unwrap().keys().collect();
        assert_eq!(keys, vec!["greeting", "farewell", "translationInfo"]);
    }

    #[tokio::test]
    async fn test_failed_language_is_isolated() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = write_source(&temp_dir, &json!({"title": {"message": "Title"}}));
        let client = TranslationClient::new(MockTranslator::new(MockMode::FailFor(vec![
            "de".to_string(),
        ])));

        let targets = [
            Language::new("fr", "fr"),
            Language::new("de", "de"),
            Language::new("es", "es"),
        ];
        let report = translate_catalog(&client, &source, &targets).await.unwrap();

        assert_eq!(report.written.len(), 2);
        assert_eq!(report.failed_codes(), vec!["de"]);
        assert_eq!(read_output(&temp_dir, "fr")["title"]["message"], "Title_fr");
        assert_eq!(read_output(&temp_dir, "es")["title"]["message"], "Title_es");
        assert!(!temp_dir.path().join("de").exists());
    }

    #[tokio::test]
    async fn test_write_failure_is_isolated() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = write_source(&temp_dir, &json!({"title": {"message": "Title"}}));
        // A plain file where the `de` directory should go
        std::fs::write(temp_dir.path().join("de"), "not a directory").unwrap();
        let client = TranslationClient::new(MockTranslator::new(MockMode::Suffix));

        let targets = [
            Language::new("fr", "fr"),
            Language::new("de", "de"),
            Language::new("es", "es"),
        ];
        let report = translate_catalog(&client, &source, &targets).await.unwrap();

        assert_eq!(report.failed_codes(), vec!["de"]);
        assert!(matches!(report.failed[0].1, Error::Io { .. }));
        assert_eq!(report.written.len(), 2);
        assert_eq!(read_output(&temp_dir, "fr")["title"]["message"], "Title_fr");
        assert_eq!(read_output(&temp_dir, "es")["title"]["message"], "Title_es");
        assert!(temp_dir.path().join("de").is_file());
    }

    #[tokio::test]
    async fn test_missing_source_aborts_pass() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let source = Locale::new(temp_dir.path(), "messages.json", Language::new("en", "en"));
        let client = TranslationClient::new(MockTranslator::new(MockMode::Suffix));

        let result = translate_catalog(&client, &source, &[Language::new("fr", "fr")]).await;
        assert!(matches!(result, Err(Error::Io { .. })));
        assert!(!temp_dir.path().join("fr").exists());
    }

    #[tokio::test]
    async fn test_large_catalog_spans_chunks() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let mut entries = Map::new();
        for i in 0..300 {
            entries.insert(
                format!("key{}", i),
                json!({"message": format!("m{}", i), "description": "x"}),
            );
        }
        let source = write_source(&temp_dir, &Value::Object(entries));
        let mock = std::sync::Arc::new(MockTranslator::new(MockMode::Suffix));
        let client = TranslationClient::from_arc(mock.clone());

        translate_catalog(&client, &source, &[Language::new("it", "it")])
            .await
            .unwrap();

        assert_eq!(mock.calls(), 3);
        let output = read_output(&temp_dir, "it");
        assert_eq!(output["key0"]["message"], "m0_it");
        assert_eq!(output["key128"]["message"], "m128_it");
        assert_eq!(output["key299"]["message"], "m299_it");
        assert_eq!(output["key299"]["description"], "x");
    }
}
