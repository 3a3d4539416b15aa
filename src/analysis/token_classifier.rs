/*!
 * Word classification shared by the vocabulary, frequency and complexity passes.
 */

/// Words must be strictly longer than this to enter the vocabulary or the frequency ranking
pub const MIN_WORD_LENGTH: usize = 3;

/// Words strictly longer than this count as complex
pub const COMPLEX_WORD_LENGTH: usize = 6;

/// Decides which surface tokens count as analyzable words.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TokenClassifier {
    min_length: usize,
    complex_length: usize,
}

impl Default for TokenClassifier {
    fn default() -> Self {
        Self::new(MIN_WORD_LENGTH, COMPLEX_WORD_LENGTH)
    }
}

impl TokenClassifier {
    /// Create a classifier with explicit (exclusive) length bounds
    pub fn new(min_length: usize, complex_length: usize) -> Self {
        Self { min_length, complex_length }
    }

    /// Length a word must exceed to count as complex
    pub fn complex_length(&self) -> usize {
        self.complex_length
    }

    /// Token consists of ASCII letters only
    pub fn is_alphabetic(token: &str) -> bool {
        !token.is_empty() && token.bytes().all(|b| b.is_ascii_alphabetic())
    }

    /// Alphabetic and longer than the minimum; used for frequency ranking
    pub fn is_countable(&self, token: &str) -> bool {
        Self::is_alphabetic(token) && token.len() > self.min_length
    }

    /// Longer than the complex-word bound; expects an alphabetic word
    pub fn is_complex(&self, word: &str) -> bool {
        word.len() > self.complex_length
    }
}
