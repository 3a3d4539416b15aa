/*!
 * # subvocab - Subtitle vocabulary and text analytics
 *
 * A Rust library for turning SRT subtitles into study material.
 *
 * ## Features
 *
 * - Extract a deduplicated vocabulary list from subtitle captions
 * - Rebuild one sentence per subtitle block
 * - Produce a clean text corpus for NLP analysis
 * - Rank the most frequent words
 * - Score language complexity and estimate a difficulty level
 * - Mine recurring noun phrases and verbs with example sentences
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `subtitle_processor`: SRT parsing into vocabulary, sentences and clean text
 * - `analysis`: Text analytics over a tokenized document:
 *   - `analysis::frequency`: Word frequency ranking
 *   - `analysis::complexity`: Readability metrics
 *   - `analysis::collocation`: Noun phrase and verb collocations
 * - `nlp`: Pluggable NLP engine and its one-time loader
 * - `session`: Per-file session state and view dispatch
 * - `file_utils`: File system operations
 * - `errors`: Custom error types for the application
 *
 * ## License
 *
 * This project is licensed under the MIT License
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod analysis;
pub mod app_config;
pub mod errors;
pub mod file_utils;
pub mod nlp;
pub mod session;
pub mod subtitle_processor;

// Re-export main types for easier usage
pub use analysis::{AnalysisReport, AnalysisView};
pub use app_config::Config;
pub use errors::{AnalysisError, AppError, EngineError};
pub use nlp::{EngineCell, EngineHandle, EngineLoader, TokenizedDocument};
pub use session::AnalysisSession;
pub use subtitle_processor::{ParsedSubtitle, SubtitleDocument, SubtitleParser};
