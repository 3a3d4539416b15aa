/*!
 * Readability metrics and difficulty tiering.
 *
 * All ratios are zero-guarded: a document without sentences or words
 * reports zero averages instead of NaN.
 */

use serde::Serialize;
use std::fmt;

use crate::analysis::token_classifier::TokenClassifier;
use crate::app_config::AnalysisConfig;
use crate::nlp::TokenizedDocument;

/// Estimated difficulty of a text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum DifficultyTier {
    Beginner,
    Intermediate,
    Advanced,
}

impl DifficultyTier {
    /// Tier for a complex-word ratio. Boundary values fall to the lower tier.
    pub fn from_ratio(ratio: f64, intermediate_above: f64, advanced_above: f64) -> Self {
        if ratio > advanced_above {
            Self::Advanced
        } else if ratio > intermediate_above {
            Self::Intermediate
        } else {
            Self::Beginner
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Beginner => "Beginner",
            Self::Intermediate => "Intermediate",
            Self::Advanced => "Advanced",
        }
    }
}

impl fmt::Display for DifficultyTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Result of a complexity analysis, kept at full precision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComplexityReport {
    pub sentence_count: usize,
    pub word_count: usize,
    pub complex_word_count: usize,
    /// Words per sentence
    pub avg_sentence_length: f64,
    /// Characters per word
    pub avg_word_length: f64,
    /// Complex words over all words (0.0 - 1.0)
    pub complex_word_ratio: f64,
    pub difficulty: DifficultyTier,
    /// Length a word must exceed to be complex
    pub complex_word_length: usize,
}

/// Computes sentence and word length statistics.
#[derive(Debug, Clone)]
pub struct ComplexityAnalyzer {
    classifier: TokenClassifier,
    intermediate_ratio: f64,
    advanced_ratio: f64,
}

impl Default for ComplexityAnalyzer {
    fn default() -> Self {
        Self::new(&AnalysisConfig::default())
    }
}

impl ComplexityAnalyzer {
    /// Create an analyzer from configured thresholds
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            classifier: TokenClassifier::new(config.min_word_length, config.complex_word_length),
            intermediate_ratio: config.intermediate_ratio,
            advanced_ratio: config.advanced_ratio,
        }
    }

    /// Compute the report for a document
    pub fn analyze(&self, document: &TokenizedDocument) -> ComplexityReport {
        let sentence_count = document.sentences().len();
        let words: Vec<&str> = document
            .tokens()
            .iter()
            .map(String::as_str)
            .filter(|token| TokenClassifier::is_alphabetic(token))
            .collect();

        let word_count = words.len();
        let total_chars: usize = words.iter().map(|word| word.len()).sum();
        let complex_word_count = words
            .iter()
            .filter(|word| self.classifier.is_complex(word))
            .count();

        let complex_word_ratio = ratio(complex_word_count, word_count);

        ComplexityReport {
            sentence_count,
            word_count,
            complex_word_count,
            avg_sentence_length: ratio(word_count, sentence_count),
            avg_word_length: ratio(total_chars, word_count),
            complex_word_ratio,
            difficulty: DifficultyTier::from_ratio(
                complex_word_ratio,
                self.intermediate_ratio,
                self.advanced_ratio,
            ),
            complex_word_length: self.classifier.complex_length(),
        }
    }
}

fn ratio(numerator: usize, denominator: usize) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64
    }
}

impl fmt::Display for ComplexityReport {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Language Complexity Analysis")?;
        writeln!(f)?;
        writeln!(f, "Text Statistics")?;
        writeln!(f, "  Total Sentences: {}", self.sentence_count)?;
        writeln!(f, "  Total Words: {}", self.word_count)?;
        writeln!(f, "  Average Sentence Length: {:.1} words", self.avg_sentence_length)?;
        writeln!(f, "  Average Word Length: {:.1} characters", self.avg_word_length)?;
        writeln!(f)?;
        writeln!(f, "Complexity Score")?;
        writeln!(f, "  {:.1}%", self.complex_word_ratio * 100.0)?;
        writeln!(
            f,
            "  Percentage of complex words (longer than {} characters)",
            self.complex_word_length
        )?;
        writeln!(f)?;
        writeln!(f, "Estimated Difficulty Level")?;
        writeln!(f, "  {}", self.difficulty)
    }
}
