//! Store description translation
//!
//! The description is a single block of plain text. Each target language gets
//! one translation request carrying the whole text, and the result is written
//! verbatim next to the other locales.

use crate::error::Result;
use crate::job::{TranslationJob, TranslationReport};
use crate::loader;
use crate::locale::{Language, Locale};
use crate::mt::{MtError, TranslationClient};
use futures::future::join_all;
use std::path::PathBuf;
use tracing::{error, info};

/// Translate the description at `source` into every target language
///
/// A missing or blank source file is not an error: there is nothing to
/// translate and an empty report is returned.
///
/// # Errors
///
/// Only when the source exists but cannot be read.
pub async fn translate_description(
    client: &TranslationClient,
    source: &Locale,
    targets: &[Language],
) -> Result<TranslationReport> {
    let path = source.file_path();
    let text = match loader::read_text(&path).await? {
        Some(text) if !text.trim().is_empty() => text,
        Some(_) => {
            info!("{} is empty, skipping description", path.display());
            return Ok(TranslationReport::default());
        }
        None => {
            info!("{} not found, skipping description", path.display());
            return Ok(TranslationReport::default());
        }
    };

    let jobs = targets
        .iter()
        .map(|language| translate_into(client, &text, source, language));
    let outcomes = join_all(jobs).await;

    let mut report = TranslationReport::default();
    for (language, outcome) in targets.iter().zip(outcomes) {
        match &outcome {
            Ok(_) => info!(
                "Translated description file {} => {}",
                source.language.iso_code, language.iso_code
            ),
            Err(e) => error!(
                "Failed to translate description file {} => {}: {}",
                source.language.iso_code, language.iso_code, e
            ),
        }
        report.record(language.clone(), outcome);
    }
    Ok(report)
}

async fn translate_into(
    client: &TranslationClient,
    text: &str,
    source: &Locale,
    language: &Language,
) -> Result<PathBuf> {
    let job = TranslationJob::new(source, language, vec![text.to_string()]);
    let (target, translated) = job.run(client).await?;

    let translated = translated
        .into_iter()
        .next()
        .ok_or(MtError::LengthMismatch {
            expected: 1,
            actual: 0,
        })?;

    loader::write_text(&target, &translated).await
}
