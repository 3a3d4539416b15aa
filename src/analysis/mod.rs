/*!
 * Text analytics over a tokenized document.
 *
 * This module contains the analyzers and the mapping from a view to the
 * analyzer that renders it:
 * - `token_classifier`: which tokens count as words
 * - `ranking`: insertion-ordered counting with stable ranking
 * - `frequency`: top-N word frequencies
 * - `complexity`: readability metrics and difficulty tier
 * - `collocation`: recurring noun phrases and verbs with context
 */

use serde::Serialize;
use std::fmt;

use crate::app_config::AnalysisConfig;
use crate::nlp::TokenizedDocument;

pub mod collocation;
pub mod complexity;
pub mod frequency;
pub mod ranking;
pub mod token_classifier;

pub use collocation::{CollocationAnalyzer, CollocationReport};
pub use complexity::{ComplexityAnalyzer, ComplexityReport, DifficultyTier};
pub use frequency::{FrequencyAnalyzer, FrequencyReport};
pub use ranking::FrequencyTable;
pub use token_classifier::TokenClassifier;

/// Analyzer entry point shared by every NLP-backed view
pub type AnalyzerFn = fn(&TokenizedDocument, &AnalysisConfig) -> AnalysisReport;

/// The views a user can switch between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisView {
    Vocabulary,
    Sentences,
    Frequency,
    Complexity,
    Collocation,
}

impl AnalysisView {
    /// Every view, in tab order
    pub const ALL: [AnalysisView; 5] = [
        Self::Vocabulary,
        Self::Sentences,
        Self::Frequency,
        Self::Complexity,
        Self::Collocation,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Vocabulary => "vocabulary",
            Self::Sentences => "sentences",
            Self::Frequency => "frequency",
            Self::Complexity => "complexity",
            Self::Collocation => "collocation",
        }
    }

    /// Analyzer for views that need the NLP engine; `None` for parse-only views
    pub fn analyzer(&self) -> Option<AnalyzerFn> {
        match self {
            Self::Vocabulary | Self::Sentences => None,
            Self::Frequency => Some(run_frequency),
            Self::Complexity => Some(run_complexity),
            Self::Collocation => Some(run_collocation),
        }
    }

    pub fn needs_engine(&self) -> bool {
        self.analyzer().is_some()
    }
}

impl fmt::Display for AnalysisView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

fn run_frequency(document: &TokenizedDocument, config: &AnalysisConfig) -> AnalysisReport {
    AnalysisReport::Frequency(FrequencyAnalyzer::new(config).analyze(document))
}

fn run_complexity(document: &TokenizedDocument, config: &AnalysisConfig) -> AnalysisReport {
    AnalysisReport::Complexity(ComplexityAnalyzer::new(config).analyze(document))
}

fn run_collocation(document: &TokenizedDocument, config: &AnalysisConfig) -> AnalysisReport {
    AnalysisReport::Collocation(CollocationAnalyzer::new(config).analyze(document))
}

/// Report produced by one of the NLP-backed views.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "view", rename_all = "lowercase")]
pub enum AnalysisReport {
    Frequency(FrequencyReport),
    Complexity(ComplexityReport),
    Collocation(CollocationReport),
}

impl AnalysisReport {
    /// View that produced this report
    pub fn view(&self) -> AnalysisView {
        match self {
            Self::Frequency(_) => AnalysisView::Frequency,
            Self::Complexity(_) => AnalysisView::Complexity,
            Self::Collocation(_) => AnalysisView::Collocation,
        }
    }
}

impl fmt::Display for AnalysisReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Frequency(report) => write!(f, "{}", report),
            Self::Complexity(report) => write!(f, "{}", report),
            Self::Collocation(report) => write!(f, "{}", report),
        }
    }
}
