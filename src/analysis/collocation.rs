/*!
 * Collocation mining: recurring noun phrases and verbs with context.
 *
 * Noun phrases and verbs are ranked independently. Each retained entry
 * carries the first sentence that mentions it.
 */

use serde::Serialize;
use std::fmt;

use crate::analysis::ranking::FrequencyTable;
use crate::app_config::AnalysisConfig;
use crate::nlp::TokenizedDocument;

/// Placeholder used when no sentence mentions a phrase
pub const CONTEXT_NOT_AVAILABLE: &str = "Context not available";

/// One ranked phrase with an example sentence.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Collocation {
    /// Lowercase phrase
    pub phrase: String,
    pub frequency: usize,
    pub example_sentence: String,
}

/// Which sequence of the document a section was built from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CollocationKind {
    NounPhrase,
    Verb,
}

impl CollocationKind {
    fn heading(&self) -> &'static str {
        match self {
            Self::NounPhrase => "Common Noun Phrases",
            Self::Verb => "Common Verbs",
        }
    }

    fn empty_message(&self) -> &'static str {
        match self {
            Self::NounPhrase => "No significant noun phrases found.",
            Self::Verb => "No significant verbs found.",
        }
    }
}

/// Ranked entries for one kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollocationSection {
    pub kind: CollocationKind,
    pub entries: Vec<Collocation>,
}

impl CollocationSection {
    /// True when the document had no phrases of this kind
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Result of a collocation analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CollocationReport {
    pub noun_phrases: CollocationSection,
    pub verbs: CollocationSection,
}

/// Ranks noun phrases and verbs.
#[derive(Debug, Clone)]
pub struct CollocationAnalyzer {
    top_n: usize,
}

impl Default for CollocationAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl CollocationAnalyzer {
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            top_n: config.collocation_top_n,
        }
    }

    /// Rank both sections of a document
    pub fn analyze(&self, document: &TokenizedDocument) -> CollocationReport {
        let sentences = document.sentences();
        CollocationReport {
            noun_phrases: self.rank_section(CollocationKind::NounPhrase, document.noun_phrases(), sentences),
            verbs: self.rank_section(CollocationKind::Verb, document.verbs(), sentences),
        }
    }

    /// Count, rank and attach context to one sequence of phrases
    pub fn rank_section(
        &self,
        kind: CollocationKind,
        phrases: &[String],
        sentences: &[String],
    ) -> CollocationSection {
        let table: FrequencyTable = phrases.iter().map(|phrase| phrase.to_lowercase()).collect();

        let entries = table
            .ranked(self.top_n)
            .into_iter()
            .map(|(phrase, frequency)| Collocation {
                example_sentence: find_context(&phrase, sentences),
                phrase,
                frequency,
            })
            .collect();

        CollocationSection { kind, entries }
    }
}

/// First sentence whose lowercase text contains `phrase`
pub fn find_context(phrase: &str, sentences: &[String]) -> String {
    let needle = phrase.to_lowercase();
    sentences
        .iter()
        .find(|sentence| sentence.to_lowercase().contains(&needle))
        .cloned()
        .unwrap_or_else(|| CONTEXT_NOT_AVAILABLE.to_string())
}

impl fmt::Display for CollocationSection {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        if self.entries.is_empty() {
            return writeln!(f, "{}", self.kind.empty_message());
        }

        writeln!(f, "{}", self.kind.heading())?;
        for entry in &self.entries {
            writeln!(f, "  {}", entry.phrase)?;
            writeln!(f, "    Frequency: {} times", entry.frequency)?;
            writeln!(f, "    {}", entry.example_sentence)?;
        }
        Ok(())
    }
}

impl fmt::Display for CollocationReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Collocation Analysis")?;
        writeln!(f)?;
        write!(f, "{}", self.noun_phrases)?;
        writeln!(f)?;
        write!(f, "{}", self.verbs)
    }
}
