/*!
 * Mock engine implementations for testing.
 *
 * This module provides a mock loader that simulates different behaviors:
 * - `MockEngineLoader::working()` - Always loads
 * - `MockEngineLoader::failing()` - Always fails to load
 * - `MockEngineLoader::fail_first(n)` - Fails the first `n` loads, then works
 * - `MockEngineLoader::slow(ms)` - Loads after a delay
 * - `MockEngineLoader::broken_reader()` - Loads, but every read fails
 *
 * Any behavior can be delayed with `with_delay` to keep a load in flight.
 */

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use crate::errors::EngineError;
use crate::nlp::{EngineHandle, EngineLoader, TokenizedDocument};

/// Behavior mode for the mock loader
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MockBehavior {
    /// Always loads
    Working,
    /// Always fails to load
    Failing,
    /// Fails the first `failures` loads
    FailFirst { failures: usize },
    /// Loads, but every read fails
    BrokenReader,
}

/// Mock loader with a load counter
#[derive(Debug)]
pub struct MockEngineLoader {
    behavior: MockBehavior,
    load_count: Arc<AtomicUsize>,
    delay: Option<Duration>,
    document: Option<TokenizedDocument>,
}

impl MockEngineLoader {
    /// Create a new mock loader with the specified behavior
    pub fn new(behavior: MockBehavior) -> Self {
        Self {
            behavior,
            load_count: Arc::new(AtomicUsize::new(0)),
            delay: None,
            document: None,
        }
    }

    pub fn working() -> Self {
        Self::new(MockBehavior::Working)
    }

    pub fn failing() -> Self {
        Self::new(MockBehavior::Failing)
    }

    pub fn fail_first(failures: usize) -> Self {
        Self::new(MockBehavior::FailFirst { failures })
    }

    pub fn slow(delay_ms: u64) -> Self {
        Self::working().with_delay(delay_ms)
    }

    pub fn broken_reader() -> Self {
        Self::new(MockBehavior::BrokenReader)
    }

    /// Sleep for `delay_ms` before every load outcome
    pub fn with_delay(mut self, delay_ms: u64) -> Self {
        self.delay = Some(Duration::from_millis(delay_ms));
        self
    }

    /// Return this document for every read instead of splitting on whitespace
    pub fn with_document(mut self, document: TokenizedDocument) -> Self {
        self.document = Some(document);
        self
    }

    /// Number of times `load` has been called
    pub fn load_count(&self) -> usize {
        self.load_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl EngineLoader for MockEngineLoader {
    async fn load(&self) -> Result<Arc<dyn EngineHandle>, EngineError> {
        let attempt = self.load_count.fetch_add(1, Ordering::SeqCst) + 1;

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        match self.behavior {
            MockBehavior::Failing => {
                return Err(EngineError::LoadFailed("mock engine unavailable".to_string()));
            }
            MockBehavior::FailFirst { failures } if attempt <= failures => {
                return Err(EngineError::LoadFailed(format!("mock load attempt {} failed", attempt)));
            }
            _ => {}
        }

        Ok(Arc::new(MockEngine {
            broken: self.behavior == MockBehavior::BrokenReader,
            document: self.document.clone(),
        }))
    }

    fn name(&self) -> &str {
        "mock"
    }
}

/// Handle returned by `MockEngineLoader`
#[derive(Debug)]
pub struct MockEngine {
    broken: bool,
    document: Option<TokenizedDocument>,
}

impl EngineHandle for MockEngine {
    fn read_document(&self, text: &str) -> Result<TokenizedDocument, EngineError> {
        if self.broken {
            return Err(EngineError::ReadFailed("mock reader is broken".to_string()));
        }

        if let Some(document) = &self.document {
            return Ok(document.clone());
        }

        let tokens = text.split_whitespace().map(str::to_string).collect();
        let sentences = if text.trim().is_empty() {
            Vec::new()
        } else {
            vec![text.trim().to_string()]
        };
        Ok(TokenizedDocument::new(tokens, sentences, Vec::new(), Vec::new()))
    }
}
