/*!
 * Pluggable NLP engine capability.
 *
 * The analyzers never tokenize or tag text themselves. They consume a
 * `TokenizedDocument` produced by an `EngineHandle`, which is obtained once
 * from an `EngineLoader` through the shared `EngineCell`:
 * - `builtin`: rule-based English engine used by the CLI
 * - `mock`: scripted engine for tests
 * - `engine_cell`: one-time, retryable engine initialization
 */

use async_trait::async_trait;
use serde::Serialize;
use std::fmt::Debug;
use std::sync::Arc;

use crate::errors::EngineError;

pub mod builtin;
pub mod engine_cell;
pub mod mock;

pub use engine_cell::{EngineCell, EngineState};

/// Tokenized and tagged view of a text.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TokenizedDocument {
    tokens: Vec<String>,
    sentences: Vec<String>,
    noun_phrases: Vec<String>,
    verbs: Vec<String>,
}

impl TokenizedDocument {
    /// Assemble a document from engine output
    pub fn new(
        tokens: Vec<String>,
        sentences: Vec<String>,
        noun_phrases: Vec<String>,
        verbs: Vec<String>,
    ) -> Self {
        Self {
            tokens,
            sentences,
            noun_phrases,
            verbs,
        }
    }

    /// Surface tokens in document order
    pub fn tokens(&self) -> &[String] {
        &self.tokens
    }

    /// Sentences in document order
    pub fn sentences(&self) -> &[String] {
        &self.sentences
    }

    /// Noun phrases in document order
    pub fn noun_phrases(&self) -> &[String] {
        &self.noun_phrases
    }

    /// Verbs in document order
    pub fn verbs(&self) -> &[String] {
        &self.verbs
    }
}

/// A loaded engine able to read text into a tokenized document.
pub trait EngineHandle: Send + Sync + Debug {
    /// Tokenize, split and tag `text`
    ///
    /// # Arguments
    /// * `text` - The clean text corpus
    ///
    /// # Returns
    /// * `Result<TokenizedDocument, EngineError>` - The document or a read failure
    fn read_document(&self, text: &str) -> Result<TokenizedDocument, EngineError>;
}

/// Produces an engine handle. Loading may be slow and may fail.
///
/// Implementations are not required to be idempotent themselves; the
/// `EngineCell` guarantees a single load at a time.
#[async_trait]
pub trait EngineLoader: Send + Sync + Debug {
    /// Load the engine
    async fn load(&self) -> Result<Arc<dyn EngineHandle>, EngineError>;

    /// Human readable engine name for logs
    fn name(&self) -> &str;
}
