use std::collections::BTreeSet;
use std::fmt;
use regex::Regex;
use once_cell::sync::Lazy;
use log::debug;
use serde::Serialize;

use crate::analysis::token_classifier::MIN_WORD_LENGTH;

// @module: Subtitle parsing into vocabulary, sentences and clean text

// @const: Timestamp range marker
const TIMESTAMP_MARKER: &str = "-->";

// @const: HTML-like tag regex, removed in a single pass
static TAG_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<[^>]*>").unwrap()
});

// @const: Whitespace run regex used to split caption lines
static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\s+").unwrap()
});

// @enum: Classification of a single SRT line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineKind {
    /// Block index, digits only
    Index,
    /// Timestamp range, contains `-->`
    Timestamp,
    /// Blank, or only markup
    Blank,
    /// Caption text with tags stripped and surrounding whitespace trimmed
    Caption(String),
}

impl LineKind {
    /// Classify one raw line
    pub fn classify(line: &str) -> Self {
        let trimmed = line.trim();

        if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
            return LineKind::Index;
        }

        if trimmed.contains(TIMESTAMP_MARKER) {
            return LineKind::Timestamp;
        }

        let stripped = TAG_REGEX.replace_all(trimmed, "");
        let caption = stripped.trim();
        if caption.is_empty() {
            LineKind::Blank
        } else {
            LineKind::Caption(caption.to_string())
        }
    }
}

/// Raw SRT content of one uploaded file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubtitleDocument {
    content: String,
}

impl SubtitleDocument {
    /// Wrap decoded subtitle text
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: content.into() }
    }

    /// Iterate over classified lines in document order
    pub fn lines(&self) -> impl Iterator<Item = LineKind> + '_ {
        self.content.lines().map(LineKind::classify)
    }

    /// Run all three extraction passes with the default word-length bound
    pub fn parse(&self) -> ParsedSubtitle {
        self.parse_with(MIN_WORD_LENGTH)
    }

    /// Run all three extraction passes, keeping vocabulary words longer than `min_word_length`
    pub fn parse_with(&self, min_word_length: usize) -> ParsedSubtitle {
        let parsed = ParsedSubtitle {
            vocabulary: SubtitleParser::extract_vocabulary_longer_than(self, min_word_length),
            sentences: SubtitleParser::extract_sentences(self),
            clean_text: SubtitleParser::extract_clean_text(self),
        };

        debug!(
            "Parsed subtitle: {} vocabulary words, {} sentences, {} chars of clean text",
            parsed.vocabulary.len(),
            parsed.sentences.len(),
            parsed.clean_text.len()
        );

        parsed
    }
}

/// Artifacts derived once per subtitle file
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ParsedSubtitle {
    /// Distinct lowercase words, sorted ascending
    pub vocabulary: Vec<String>,

    /// One entry per timestamp block that carried text
    pub sentences: Vec<String>,

    /// Caption lines joined with single spaces
    pub clean_text: String,
}

impl ParsedSubtitle {
    /// Whether the document carried any caption text at all
    pub fn is_empty(&self) -> bool {
        self.clean_text.is_empty()
    }
}

impl fmt::Display for ParsedSubtitle {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        writeln!(f, "Parsed Subtitle")?;
        writeln!(f, "Vocabulary: {} words", self.vocabulary.len())?;
        writeln!(f, "Sentences: {}", self.sentences.len())?;
        writeln!(f, "Clean text: {} characters", self.clean_text.chars().count())?;
        Ok(())
    }
}

/// Stateless extraction passes over a subtitle document
pub struct SubtitleParser;

impl SubtitleParser {
    /// Parse raw SRT text in one call
    pub fn parse_srt_string(content: &str) -> ParsedSubtitle {
        SubtitleDocument::new(content).parse()
    }

    /// Collect distinct words longer than the vocabulary minimum
    pub fn extract_vocabulary(document: &SubtitleDocument) -> Vec<String> {
        Self::extract_vocabulary_longer_than(document, MIN_WORD_LENGTH)
    }

    /// Collect distinct words longer than `min_length`
    pub fn extract_vocabulary_longer_than(document: &SubtitleDocument, min_length: usize) -> Vec<String> {
        let mut words = BTreeSet::new();

        for line in document.lines() {
            let LineKind::Caption(caption) = line else {
                continue;
            };

            for raw in WHITESPACE_REGEX.split(&caption) {
                let word = Self::strip_non_word_chars(raw).to_lowercase();
                if word.len() > min_length {
                    words.insert(word);
                }
            }
        }

        words.into_iter().collect()
    }

    /// Join caption lines of each timestamp block into one sentence
    pub fn extract_sentences(document: &SubtitleDocument) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut current_block = String::new();

        for line in document.lines() {
            match line {
                LineKind::Index | LineKind::Blank => continue,
                LineKind::Timestamp => Self::flush_block(&mut current_block, &mut sentences),
                LineKind::Caption(caption) => {
                    if !current_block.is_empty() {
                        current_block.push(' ');
                    }
                    current_block.push_str(&caption);
                }
            }
        }

        Self::flush_block(&mut current_block, &mut sentences);
        sentences
    }

    /// Join every caption line into the analysis corpus
    pub fn extract_clean_text(document: &SubtitleDocument) -> String {
        let mut clean_text = String::new();

        for line in document.lines() {
            if let LineKind::Caption(caption) = line {
                if !clean_text.is_empty() {
                    clean_text.push(' ');
                }
                clean_text.push_str(&caption);
            }
        }

        clean_text
    }

    fn flush_block(block: &mut String, sentences: &mut Vec<String>) {
        let text = block.trim();
        if !text.is_empty() {
            sentences.push(text.to_string());
        }
        block.clear();
    }

    // Word characters are ASCII letters, digits and underscore
    fn strip_non_word_chars(token: &str) -> String {
        token
            .chars()
            .filter(|c| c.is_ascii_alphanumeric() || *c == '_')
            .collect()
    }
}
