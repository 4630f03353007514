use crate::catalog::translate_catalog;
use crate::config::Configuration;
use crate::description::translate_description;
use crate::error::{Error, Result};
use crate::job::TranslationReport;
use crate::mt::TranslationClient;
use tracing::{error, info, warn};

/// Result of both translator passes
///
/// A pass is `Err` when its source could not be read; per-language failures
/// live inside the report.
#[derive(Debug)]
pub struct RunSummary {
    pub messages: Result<TranslationReport>,
    pub description: Result<TranslationReport>,
}

impl RunSummary {
    /// True when both passes ran and every language was written
    pub fn is_clean(&self) -> bool {
        [&self.messages, &self.description]
            .into_iter()
            .all(|pass| matches!(pass, Ok(report) if report.is_complete()))
    }
}

/// Translate the message catalog and the description into every configured language
///
/// # Errors
///
/// Returns [`Error::Config`] before anything is written when the
/// configuration is invalid or the client has no provider. Failures after
/// that point are logged and recorded in the [`RunSummary`].
pub async fn run(config: &Configuration, client: &TranslationClient) -> Result<RunSummary> {
    config.validate()?;
    if !client.is_configured() {
        return Err(Error::Config(
            "translation client not initialized; credentials are required".to_string(),
        ));
    }

    info!(
        "Translating from {} into {} language(s) with {}",
        config.messages.language.iso_code,
        config.languages.len(),
        client.provider_name().unwrap_or_default()
    );

    let (messages, description) = tokio::join!(
        translate_catalog(client, &config.messages, &config.languages),
        translate_description(client, &config.description, &config.languages),
    );

    log_pass(&config.messages.filename, &messages);
    log_pass(&config.description.filename, &description);

    Ok(RunSummary {
        messages,
        description,
    })
}

fn log_pass(name: &str, pass: &Result<TranslationReport>) {
    match pass {
        Ok(report) if report.is_complete() => {
            info!("{}: {} language(s) written", name, report.written.len());
        }
        Ok(report) => {
            warn!(
                "{}: {} language(s) written, failed: {}",
                name,
                report.written.len(),
                report.failed_codes().join(", ")
            );
        }
        Err(e) => error!("{}: skipped: {}", name, e),
    }
}
