/*!
 * Word frequency ranking over a tokenized document.
 */

use serde::Serialize;
use std::fmt;

use crate::analysis::ranking::FrequencyTable;
use crate::analysis::token_classifier::TokenClassifier;
use crate::app_config::AnalysisConfig;
use crate::nlp::TokenizedDocument;

/// One ranked word.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WordFrequency {
    /// Lowercase word
    pub word: String,
    /// Occurrences in the document
    pub count: usize,
    /// Count relative to the top-ranked word (0 - 100)
    pub relative_percentage: f64,
}

/// Result of a frequency analysis.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FrequencyReport {
    /// Number of tokens that passed the word filter
    pub total_words: usize,
    /// Maximum number of ranked entries
    pub limit: usize,
    /// Ranked words, highest count first
    pub top_words: Vec<WordFrequency>,
}

impl FrequencyReport {
    pub fn is_empty(&self) -> bool {
        self.top_words.is_empty()
    }
}

/// Ranks words by occurrence count.
#[derive(Debug, Clone)]
pub struct FrequencyAnalyzer {
    classifier: TokenClassifier,
    top_n: usize,
}

impl Default for FrequencyAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl FrequencyAnalyzer {
    /// Create an analyzer from configured thresholds
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: TokenClassifier::new(config.min_word_length, config.complex_word_length),
            top_n: config.frequency_top_n,
        }
    }

    /// Count filtered, lowercased tokens
    pub fn build_table(&self, document: &TokenizedDocument) -> FrequencyTable {
        document
            .tokens()
            .iter()
            .filter(|token| self.classifier.is_countable(token))
            .map(|token| token.to_lowercase())
            .collect()
    }

    /// Rank the document's words
    pub fn analyze(&self, document: &TokenizedDocument) -> FrequencyReport {
        let table = self.build_table(document);
        let ranked = table.ranked(self.top_n);
        let max_count = ranked.first().map_or(0, |(_, count)| *count);

        let top_words = ranked
            .into_iter()
            .map(|(word, count)| WordFrequency {
                relative_percentage: count as f64 / max_count as f64 * 100.0,
                word,
                count,
            })
            .collect();

        FrequencyReport {
            total_words: table.total(),
            limit: self.top_n,
            top_words,
        }
    }
}

impl fmt::Display for FrequencyReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Word Frequency Analysis")?;
        writeln!(f, "Analysis of {} words in the text", self.total_words)?;

        if self.top_words.is_empty() {
            return writeln!(f, "No frequent words found.");
        }

        writeln!(f)?;
        writeln!(f, "Top {} Most Frequent Words", self.limit)?;
        let width = self.top_words.iter().map(|w| w.word.len()).max().unwrap_or(0);
        for entry in &self.top_words {
            let bar_len = (entry.relative_percentage / 5.0).round() as usize;
            writeln!(
                f,
                "  {:<width$}  {:>4} occurrences  {}",
                entry.word,
                entry.count,
                "#".repeat(bar_len),
                width = width
            )?;
        }
        Ok(())
    }
}
