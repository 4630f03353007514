//! Batching translation client
//!
//! [`TranslationClient`] sits between the translators and a
//! [`MachineTranslator`] provider. It splits a payload into chunks no larger
//! than the provider's per-request cap, sends every chunk concurrently and
//! stitches the results back together by chunk index, so the output always
//! lines up one-to-one with the input.

use crate::locale::Language;
use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use crate::retry::{RetryConfig, with_retry_if};
use futures::future::try_join_all;
use std::sync::Arc;
use tracing::debug;

/// Handle used by every translator to reach the translation service
///
/// Built once at startup and shared by reference. A client created with
/// [`TranslationClient::unconfigured`] has no provider and rejects every call
/// with [`MtError::ClientNotInitialized`] without touching the network.
#[derive(Clone, Default)]
pub struct TranslationClient {
    provider: Option<Arc<dyn MachineTranslator>>,
    retry: RetryConfig,
}

impl TranslationClient {
    pub fn new<T>(provider: T) -> Self
    where
        T: MachineTranslator + 'static,
    {
        Self::from_arc(Arc::new(provider))
    }

    /// Wrap a provider the caller keeps a handle to (e.g. to inspect a mock)
    pub fn from_arc(provider: Arc<dyn MachineTranslator>) -> Self {
        Self {
            provider: Some(provider),
            retry: RetryConfig::none(),
        }
    }

    pub fn unconfigured() -> Self {
        Self::default()
    }

    /// Retry policy applied to each chunk request
    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn is_configured(&self) -> bool {
        self.provider.is_some()
    }

    pub fn provider_name(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.provider_name())
    }

    pub fn attribution(&self) -> Option<&str> {
        self.provider.as_deref().map(|p| p.attribution())
    }

    /// Translate `texts` from one language to another
    ///
    /// # Guarantees
    ///
    /// - Output order matches input order
    /// - Output length equals input length
    /// - Either every chunk succeeds or the whole call fails; no partial result
    pub async fn translate(
        &self,
        texts: &[String],
        from: &Language,
        to: &Language,
    ) -> MtResult<Vec<String>> {
        let provider = self
            .provider
            .as_deref()
            .ok_or(MtError::ClientNotInitialized)?;

        if texts.is_empty() {
            return Ok(Vec::new());
        }

        let chunks = chunk_batch(texts, provider.max_batch_size());
        debug!(
            "Translating {} strings {} => {} in {} request(s)",
            texts.len(),
            from.iso_code,
            to.iso_code,
            chunks.len()
        );

        let requests = chunks
            .iter()
            .enumerate()
            .map(|(index, chunk)| self.request_chunk(provider, index, chunk, from, to));

        // try_join_all yields results in the order of the futures, not of completion
        let translated = try_join_all(requests).await?;

        Ok(translated.into_iter().flatten().collect())
    }

    async fn request_chunk(
        &self,
        provider: &dyn MachineTranslator,
        index: usize,
        chunk: &[String],
        from: &Language,
        to: &Language,
    ) -> MtResult<Vec<String>> {
        let operation = format!(
            "{} chunk {} ({} => {})",
            provider.provider_name(),
            index,
            from.iso_code,
            to.iso_code
        );

        let results = with_retry_if(
            &self.retry,
            &operation,
            || provider.translate_chunk(chunk, &from.iso_code, &to.iso_code),
            MtError::is_retryable,
        )
        .await?;

        if results.len() != chunk.len() {
            return Err(MtError::LengthMismatch {
                expected: chunk.len(),
                actual: results.len(),
            });
        }
        Ok(results)
    }
}

impl std::fmt::Debug for TranslationClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TranslationClient")
            .field("provider", &self.provider_name())
            .field("retry", &self.retry)
            .finish()
    }
}

/// Split a batch into consecutive slices of at most `max_size` texts
///
/// Chunk `i` covers `texts[i * max_size..(i + 1) * max_size]`.
fn chunk_batch(texts: &[String], max_size: usize) -> Vec<&[String]> {
    texts.chunks(max_size.max(1)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::mt::mock::{MockMode, MockTranslator};
    use std::time::Duration;

    fn lang(code: &str) -> Language {
        Language::new(code, code)
    }

    fn numbered(count: usize) -> Vec<String> {
        (0..count).map(|i| format!("text{}", i)).collect()
    }

    fn mock_client(mode: MockMode) -> (Arc<MockTranslator>, TranslationClient) {
        let mock = Arc::new(MockTranslator::new(mode));
        let client = TranslationClient::from_arc(mock.clone());
        (mock, client)
    }

    // ========== Chunking Tests ==========

    #[test]
    fn test_chunk_under_limit() {
        let texts = numbered(2);
        let chunks = chunk_batch(&texts, 128);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 2);
    }

    #[test]
    fn test_chunk_at_limit() {
        let texts = numbered(128);
        let chunks = chunk_batch(&texts, 128);
        assert_eq!(chunks.len(), 1);
        assert_eq!(chunks[0].len(), 128);
    }

    #[test]
    fn test_chunk_partial_chunk() {
        let texts = numbered(200);
        let chunks = chunk_batch(&texts, 128);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].len(), 128);
        assert_eq!(chunks[1].len(), 72);
        assert_eq!(chunks[1][0], "text128");
    }

    #[test]
    fn test_chunk_empty() {
        let texts: Vec<String> = vec![];
        assert!(chunk_batch(&texts, 128).is_empty());
    }

    #[test]
    fn test_chunk_zero_size_treated_as_one() {
        let texts = numbered(3);
        assert_eq!(chunk_batch(&texts, 0).len(), 3);
    }

    // ========== Length and Order Tests ==========

    #[tokio::test]
    async fn test_translate_preserves_length_and_order() {
        let cap = MockTranslator::DEFAULT_BATCH_SIZE;
        for len in [0, 1, cap, cap + 1, 3 * cap] {
            let (_, client) = mock_client(MockMode::Suffix);
            let texts = numbered(len);
            let results = client.translate(&texts, &lang("en"), &lang("fr")).await.unwrap();

            assert_eq!(results.len(), len, "length for L={}", len);
            for (input, output) in texts.iter().zip(results.iter()) {
                assert_eq!(output, &format!("{}_fr", input));
            }
        }
    }

    #[tokio::test]
    async fn test_200_strings_make_two_requests() {
        let (mock, client) = mock_client(MockMode::Suffix);
        let texts = numbered(200);
        let results = client.translate(&texts, &lang("en"), &lang("fr")).await.unwrap();

        assert_eq!(mock.calls(), 2);
        let mut sizes = mock.chunk_sizes();
        sizes.sort_unstable();
        assert_eq!(sizes, vec![72, 128]);
        assert_eq!(results.len(), 200);
        assert_eq!(results[0], "text0_fr");
        assert_eq!(results[127], "text127_fr");
        assert_eq!(results[128], "text128_fr");
        assert_eq!(results[199], "text199_fr");
    }

    #[tokio::test]
    async fn test_empty_input_makes_no_request() {
        let (mock, client) = mock_client(MockMode::Suffix);
        let results = client.translate(&[], &lang("en"), &lang("fr")).await.unwrap();
        assert!(results.is_empty());
        assert_eq!(mock.calls(), 0);
    }

    #[tokio::test]
    async fn test_order_kept_when_chunks_finish_out_of_order() {
        // Small chunks with a delay so all requests overlap
        let mock = Arc::new(MockTranslator::with_delay(MockMode::Suffix, 20).with_batch_size(3));
        let client = TranslationClient::from_arc(mock.clone());
        let texts = numbered(10);

        let start = std::time::Instant::now();
        let results = client.translate(&texts, &lang("en"), &lang("de")).await.unwrap();

        assert_eq!(mock.calls(), 4);
        // Sequential requests would take at least 80ms
        assert!(start.elapsed() < Duration::from_millis(80));
        let expected: Vec<String> = texts.iter().map(|t| format!("{}_de", t)).collect();
        assert_eq!(results, expected);
    }

    // ========== Failure Tests ==========

    #[tokio::test]
    async fn test_unconfigured_client_fails_fast() {
        let client = TranslationClient::unconfigured();
        assert!(!client.is_configured());
        let result = client.translate(&numbered(1), &lang("en"), &lang("fr")).await;
        assert!(matches!(result, Err(MtError::ClientNotInitialized)));
    }

    #[tokio::test]
    async fn test_unconfigured_client_fails_even_for_empty_input() {
        let client = TranslationClient::unconfigured();
        let result = client.translate(&[], &lang("en"), &lang("fr")).await;
        assert!(matches!(result, Err(MtError::ClientNotInitialized)));
    }

    #[tokio::test]
    async fn test_remote_error_surfaces() {
        let (_, client) = mock_client(MockMode::Error("quota exceeded".to_string()));
        let result = client.translate(&numbered(300), &lang("en"), &lang("fr")).await;
        match result {
            Err(MtError::Api { body, .. }) => assert_eq!(body, "quota exceeded"),
            other => panic!("Expected Api error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_short_chunk_is_rejected() {
        let (_, client) = mock_client(MockMode::DropLast);
        let result = client.translate(&numbered(5), &lang("en"), &lang("fr")).await;
        assert!(matches!(
            result,
            Err(MtError::LengthMismatch {
                expected: 5,
                actual: 4
            })
        ));
    }

    #[tokio::test]
    async fn test_non_retryable_error_not_retried() {
        let mock = Arc::new(MockTranslator::new(MockMode::FailFor(vec!["xx".to_string()])));
        let client = TranslationClient::from_arc(mock.clone()).with_retry(
            RetryConfig::new(3, Duration::from_millis(1)).with_max_delay(Duration::from_millis(1)),
        );
        let result = client.translate(&numbered(1), &lang("en"), &lang("xx")).await;
        assert!(result.is_err());
        assert_eq!(mock.calls(), 1);
    }

    #[tokio::test]
    async fn test_retryable_error_retried() {
        let mock = Arc::new(MockTranslator::new(MockMode::Error("unavailable".to_string())));
        let client = TranslationClient::from_arc(mock.clone()).with_retry(
            RetryConfig::new(3, Duration::from_millis(1)).with_max_delay(Duration::from_millis(1)),
        );
        let result = client.translate(&numbered(1), &lang("en"), &lang("fr")).await;
        assert!(result.is_err());
        assert_eq!(mock.calls(), 3);
    }

    // ========== Accessor Tests ==========

    #[test]
    fn test_provider_accessors() {
        let (_, client) = mock_client(MockMode::Suffix);
        assert!(client.is_configured());
        assert_eq!(client.provider_name(), Some("Mock Translator"));
        assert_eq!(client.attribution(), Some("Mock Translator"));
        assert_eq!(TranslationClient::unconfigured().attribution(), None);
    }
}
