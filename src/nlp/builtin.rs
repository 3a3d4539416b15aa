/*!
 * Rule-based English engine.
 *
 * A lightweight stand-in for a statistical tagger so the analyzers can run
 * without an external model:
 * - Tokens: letter runs, apostrophe suffixes (`'t`, `'s`), numbers, single punctuation marks
 * - Sentences: split after a run of `.`, `!` or `?` followed by whitespace
 * - Noun phrases: the word (or adjective + word) after a determiner, and
 *   capitalized words in the middle of a sentence
 * - Verbs: closed list of common verbs plus `-ing` / `-ed` forms
 */

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;
use std::sync::Arc;

use crate::errors::EngineError;
use crate::nlp::{EngineHandle, EngineLoader, TokenizedDocument};

// @const: Token regex
static TOKEN_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\p{L}+|'\p{L}+|\p{N}+(?:[.,:]\p{N}+)*|\S").unwrap()
});

// @const: Sentence boundary regex
static SENTENCE_BOUNDARY_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"[.!?]+\s+").unwrap()
});

static DETERMINERS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "the", "a", "an", "this", "that", "these", "those", "my", "your", "his", "her",
        "its", "our", "their", "some", "any", "every", "each", "no",
    ]
    .into_iter()
    .collect()
});

// Words that never head a noun phrase
static FUNCTION_WORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "i", "you", "he", "she", "it", "we", "they", "me", "him", "us", "them", "and", "or",
        "but", "if", "of", "to", "in", "on", "at", "for", "with", "from", "by", "about",
        "as", "into", "not", "so", "very", "too", "just", "then", "there", "here", "what",
        "who", "where", "when", "why", "how", "all", "more", "most", "other", "such", "only",
        "own", "same", "than", "can", "will", "would", "should", "could", "must", "may",
    ]
    .into_iter()
    .chain(DETERMINERS.iter().copied())
    .collect()
});

static COMMON_VERBS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "am", "is", "are", "was", "were", "be", "been", "have", "has", "had", "do", "does",
        "did", "go", "goes", "went", "gone", "get", "gets", "got", "make", "makes", "made",
        "know", "knows", "knew", "think", "thinks", "thought", "take", "takes", "took",
        "see", "sees", "saw", "seen", "come", "comes", "came", "want", "wants", "look",
        "looks", "use", "find", "finds", "found", "give", "gives", "gave", "tell", "tells",
        "told", "say", "says", "said", "work", "call", "try", "ask", "need", "needs", "feel",
        "felt", "leave", "left", "put", "mean", "keep", "kept", "let", "begin", "began",
        "seem", "seems", "help", "talk", "turn", "start", "show", "hear", "heard", "play",
        "run", "ran", "move", "like", "live", "believe", "bring", "brought", "happen",
        "write", "wrote", "sit", "sat", "stand", "stood", "lose", "lost", "pay", "paid",
        "meet", "met", "love", "wait", "stop", "kill", "remember", "understand", "eat",
        "ate", "drink", "sleep", "read", "speak", "spoke", "walk", "open", "close",
    ]
    .into_iter()
    .collect()
});

const ADJECTIVE_SUFFIXES: [&str; 10] = [
    "ful", "ous", "ive", "ic", "al", "less", "ish", "able", "ible", "y",
];

static COMMON_ADJECTIVES: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    [
        "good", "bad", "big", "small", "old", "new", "young", "long", "short", "great",
        "little", "high", "low", "red", "blue", "green", "black", "white", "dark", "light",
        "best", "last", "first", "next", "whole", "real", "true", "nice", "hot", "cold",
    ]
    .into_iter()
    .collect()
});

/// Loader for the rule-based engine. Loading never fails.
#[derive(Debug, Default)]
pub struct RuleBasedEngineLoader;

#[async_trait]
impl EngineLoader for RuleBasedEngineLoader {
    async fn load(&self) -> Result<Arc<dyn EngineHandle>, EngineError> {
        // Force the lexicons now rather than on the first read
        Lazy::force(&TOKEN_REGEX);
        Lazy::force(&FUNCTION_WORDS);
        Lazy::force(&COMMON_VERBS);
        Ok(Arc::new(RuleBasedEngine))
    }

    fn name(&self) -> &str {
        "rule-based-en"
    }
}

/// Rule-based English engine handle
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedEngine;

impl RuleBasedEngine {
    /// Split text into surface tokens
    pub fn tokenize(text: &str) -> Vec<String> {
        TOKEN_REGEX
            .find_iter(text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Split text into sentences, keeping terminal punctuation
    pub fn split_sentences(text: &str) -> Vec<String> {
        let mut sentences = Vec::new();
        let mut start = 0;

        for boundary in SENTENCE_BOUNDARY_REGEX.find_iter(text) {
            let sentence = text[start..boundary.end()].trim();
            if !sentence.is_empty() {
                sentences.push(sentence.to_string());
            }
            start = boundary.end();
        }

        let rest = text[start..].trim();
        if !rest.is_empty() {
            sentences.push(rest.to_string());
        }

        sentences
    }

    /// Noun phrases of one sentence, in order of appearance
    pub fn noun_phrases(sentence: &str) -> Vec<String> {
        let words: Vec<String> = Self::tokenize(sentence)
            .into_iter()
            .filter(|token| token.chars().all(char::is_alphabetic))
            .collect();

        let mut phrases = Vec::new();
        let mut i = 0;
        while i < words.len() {
            let lower = words[i].to_lowercase();

            if DETERMINERS.contains(lower.as_str()) {
                if let Some((phrase, consumed)) = Self::phrase_after_determiner(&words[i + 1..]) {
                    phrases.push(phrase);
                    i += 1 + consumed;
                    continue;
                }
            } else if i > 0 && Self::is_proper_noun(&words[i]) {
                let mut end = i + 1;
                while end < words.len() && Self::is_proper_noun(&words[end]) {
                    end += 1;
                }
                phrases.push(words[i..end].join(" "));
                i = end;
                continue;
            }

            i += 1;
        }

        phrases
    }

    /// Verbs of a token sequence, surface form preserved
    pub fn verbs(tokens: &[String]) -> Vec<String> {
        tokens
            .iter()
            .filter(|token| Self::is_verb(token))
            .cloned()
            .collect()
    }

    fn phrase_after_determiner(rest: &[String]) -> Option<(String, usize)> {
        let first = rest.first()?;
        if !Self::is_content_word(first) {
            return None;
        }

        if let Some(second) = rest.get(1) {
            if Self::is_adjective(first) && Self::is_content_word(second) && !Self::is_verb(second) {
                return Some((format!("{} {}", first, second), 2));
            }
        }

        Some((first.clone(), 1))
    }

    fn is_content_word(word: &str) -> bool {
        !FUNCTION_WORDS.contains(word.to_lowercase().as_str())
    }

    fn is_adjective(word: &str) -> bool {
        let lower = word.to_lowercase();
        COMMON_ADJECTIVES.contains(lower.as_str())
            || (lower.len() > 4 && ADJECTIVE_SUFFIXES.iter().any(|suffix| lower.ends_with(suffix)))
    }

    fn is_proper_noun(word: &str) -> bool {
        word != "I"
            && word.chars().next().is_some_and(char::is_uppercase)
            && !FUNCTION_WORDS.contains(word.to_lowercase().as_str())
    }

    fn is_verb(token: &str) -> bool {
        let lower = token.to_lowercase();
        if COMMON_VERBS.contains(lower.as_str()) {
            return true;
        }
        lower.len() > 4
            && lower.chars().all(|c| c.is_ascii_alphabetic())
            && !FUNCTION_WORDS.contains(lower.as_str())
            && (lower.ends_with("ing") || lower.ends_with("ed"))
    }
}

impl EngineHandle for RuleBasedEngine {
    fn read_document(&self, text: &str) -> Result<TokenizedDocument, EngineError> {
        let tokens = Self::tokenize(text);
        let sentences = Self::split_sentences(text);
        let noun_phrases = sentences
            .iter()
            .flat_map(|sentence| Self::noun_phrases(sentence))
            .collect();
        let verbs = Self::verbs(&tokens);

        Ok(TokenizedDocument::new(tokens, sentences, noun_phrases, verbs))
    }
}
