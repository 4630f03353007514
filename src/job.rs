use crate::error::Error;
use crate::locale::{Language, Locale};
use crate::mt::{MtResult, TranslationClient};
use std::path::PathBuf;

/// One target language's worth of work: translate `payload` from the source
/// locale's language into the target locale's language
#[derive(Debug, Clone)]
pub struct TranslationJob {
    pub source: Locale,
    pub target: Locale,
    pub payload: Vec<String>,
}

impl TranslationJob {
    pub fn new(source: &Locale, target: &Language, payload: Vec<String>) -> Self {
        Self {
            source: source.clone(),
            target: source.with_language(target),
            payload,
        }
    }

    /// Send the payload through the client. Consumes the job.
    pub async fn run(self, client: &TranslationClient) -> MtResult<(Locale, Vec<String>)> {
        let translated = client
            .translate(&self.payload, &self.source.language, &self.target.language)
            .await?;
        Ok((self.target, translated))
    }
}

/// Outcome of one translator pass over every target language
#[derive(Debug, Default)]
pub struct TranslationReport {
    /// Target languages whose file was written, with the path
    pub written: Vec<(Language, PathBuf)>,
    /// Target languages skipped because translation or writing failed
    pub failed: Vec<(Language, Error)>,
}

impl TranslationReport {
    pub fn record(&mut self, language: Language, outcome: Result<PathBuf, Error>) {
        match outcome {
            Ok(path) => self.written.push((language, path)),
            Err(e) => self.failed.push((language, e)),
        }
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }

    pub fn failed_codes(&self) -> Vec<&str> {
        self.failed
            .iter()
            .map(|(language, _)| language.iso_code.as_str())
            .collect()
    }
}
