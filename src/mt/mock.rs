//! Mock Machine Translator for testing
//!
//! This module provides a deterministic, API-free translator for testing
//! the translation pipeline without requiring credentials or network access.
//! The CLI uses it for `--mock` dry runs.
//!
//! # Example
//!
//! ```ignore
//! use webext_locales_mt::mt::{MachineTranslator, MockMode, MockTranslator};
//!
//! #[tokio::test]
//! async fn test_translation() {
//!     let mock = MockTranslator::new(MockMode::Suffix);
//!     let result = mock.translate_chunk(&["hello".to_string()], "en", "fr").await.unwrap();
//!     assert_eq!(result, vec!["hello_fr"]);
//! }
//! ```

use crate::mt::error::{MtError, MtResult};
use crate::mt::translator::MachineTranslator;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

/// Mock translation modes for testing different scenarios
#[derive(Debug, Clone)]
pub enum MockMode {
    /// Append locale suffix: "hello" → "hello_fr"
    Suffix,

    /// Use predefined mappings for realistic translations
    /// (text, target_locale) → translation
    Mappings(HashMap<(String, String), String>),

    /// Simulate API errors for every request
    Error(String),

    /// Fail only for the listed target locales, suffix for the rest
    FailFor(Vec<String>),

    /// Return one string fewer than requested (a misbehaving backend)
    DropLast,

    /// No-op: return input unchanged
    NoOp,
}

/// Mock translator that simulates various translation scenarios
///
/// Every call to `translate_chunk` is counted and the chunk sizes recorded,
/// so tests can assert how a batch was split.
#[derive(Debug)]
pub struct MockTranslator {
    mode: MockMode,
    /// Optional simulated network delay (in milliseconds)
    delay_ms: u64,
    max_batch_size: usize,
    calls: AtomicUsize,
    chunk_sizes: Mutex<Vec<usize>>,
}

impl MockTranslator {
    /// Same per-request cap as Google Translate v2
    pub const DEFAULT_BATCH_SIZE: usize = 128;

    /// Create a new MockTranslator with the given mode
    pub fn new(mode: MockMode) -> Self {
        Self {
            mode,
            delay_ms: 0,
            max_batch_size: Self::DEFAULT_BATCH_SIZE,
            calls: AtomicUsize::new(0),
            chunk_sizes: Mutex::new(Vec::new()),
        }
    }

    /// Create a MockTranslator with simulated network delay
    ///
    /// # Example
    ///
    /// ```ignore
    /// let mock = MockTranslator::with_delay(MockMode::Suffix, 50);
    /// // Each request will take ~50ms
    /// ```
    pub fn with_delay(mode: MockMode, delay_ms: u64) -> Self {
        Self {
            delay_ms,
            ..Self::new(mode)
        }
    }

    /// Override the per-request cap
    pub fn with_batch_size(mut self, max_batch_size: usize) -> Self {
        self.max_batch_size = max_batch_size.max(1);
        self
    }

    /// Number of `translate_chunk` calls made so far
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Sizes of the chunks received, in call order
    pub fn chunk_sizes(&self) -> Vec<usize> {
        self.chunk_sizes
            .lock()
            .map(|sizes| sizes.clone())
            .unwrap_or_default()
    }

    /// Internal helper to apply the simulated delay
    async fn apply_delay(&self) {
        if self.delay_ms > 0 {
            tokio::time::sleep(Duration::from_millis(self.delay_ms)).await;
        }
    }

    fn record(&self, size: usize) {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Ok(mut sizes) = self.chunk_sizes.lock() {
            sizes.push(size);
        }
    }

    /// Apply translation logic based on the mode
    fn apply_translation(&self, text: &str, target: &str) -> MtResult<String> {
        match &self.mode {
            MockMode::Suffix | MockMode::DropLast => Ok(format!("{}_{}", text, target)),
            MockMode::Mappings(map) => {
                let key = (text.to_string(), target.to_string());
                Ok(map
                    .get(&key)
                    .cloned()
                    .unwrap_or_else(|| format!("{}_{}", text, target)))
            }
            MockMode::Error(msg) => Err(MtError::Api {
                status: 500,
                body: msg.clone(),
            }),
            MockMode::FailFor(targets) => {
                if targets.iter().any(|t| t == target) {
                    Err(MtError::Api {
                        status: 400,
                        body: format!("Bad language pair: {}", target),
                    })
                } else {
                    Ok(format!("{}_{}", text, target))
                }
            }
            MockMode::NoOp => Ok(text.to_string()),
        }
    }
}

#[async_trait]
impl MachineTranslator for MockTranslator {
    async fn translate_chunk(
        &self,
        texts: &[String],
        _source_locale: &str,
        target_locale: &str,
    ) -> MtResult<Vec<String>> {
        self.record(texts.len());

        // Simulated delay is per request, not per string
        self.apply_delay().await;

        let mut results = texts
            .iter()
            .map(|text| self.apply_translation(text, target_locale))
            .collect::<MtResult<Vec<_>>>()?;

        if matches!(self.mode, MockMode::DropLast) {
            results.pop();
        }
        Ok(results)
    }

    fn max_batch_size(&self) -> usize {
        self.max_batch_size
    }

    fn provider_name(&self) -> &str {
        "Mock Translator"
    }
}
