/*!
 * Tests for word frequency ranking
 */

use subvocab::analysis::frequency::FrequencyAnalyzer;
use subvocab::app_config::AnalysisConfig;
use crate::common;

/// Short words are filtered and ties keep first-seen order
#[test]
fn test_analyze_withShortWordsAndTies_shouldKeepFirstSeenOrder() {
    let document = common::document_with_tokens(&["the", "cat", "sat", "quickly", "slowly"], &[]);
    let report = FrequencyAnalyzer::default().analyze(&document);

    assert_eq!(report.total_words, 2);
    let words: Vec<&str> = report.top_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["quickly", "slowly"]);
    assert!(report.top_words.iter().all(|w| w.count == 1));
}

/// Tokens are lowercased before counting
#[test]
fn test_analyze_withMixedCase_shouldMergeCounts() {
    let document = common::document_with_tokens(
        &["Harbour", "storm", "harbour", "HARBOUR", "Storm", "quiet"],
        &[],
    );
    let report = FrequencyAnalyzer::default().analyze(&document);

    assert_eq!(report.top_words[0].word, "harbour");
    assert_eq!(report.top_words[0].count, 3);
    assert_eq!(report.top_words[1].word, "storm");
    assert_eq!(report.top_words[1].count, 2);
    assert_eq!(report.top_words[2].word, "quiet");
    assert_eq!(report.total_words, 6);
}

/// Punctuation, numbers and contractions are not words
#[test]
fn test_analyze_withNonAlphabeticTokens_shouldSkipThem() {
    let document = common::document_with_tokens(&["hello", "!", "2024", "don't", "world", "..."], &[]);
    let report = FrequencyAnalyzer::default().analyze(&document);

    let words: Vec<&str> = report.top_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(words, vec!["hello", "world"]);
    assert_eq!(report.total_words, 2);
}

/// Ranking is truncated to the configured limit with non-increasing counts
#[test]
fn test_analyze_withManyWords_shouldTruncateToTwenty() {
    let mut tokens = Vec::new();
    for i in 0..26usize {
        // word i appears (i % 4) + 1 times
        let word = format!("word{}", (b'a' + i as u8) as char);
        for _ in 0..(i % 4) + 1 {
            tokens.push(word.clone());
        }
    }
    let refs: Vec<&str> = tokens.iter().map(String::as_str).collect();
    let report = FrequencyAnalyzer::default().analyze(&common::document_with_tokens(&refs, &[]));

    assert_eq!(report.top_words.len(), 20);
    assert_eq!(report.limit, 20);
    for pair in report.top_words.windows(2) {
        assert!(pair[0].count >= pair[1].count);
    }
    assert_eq!(report.top_words[0].count, 4);
}

/// Relative percentage is measured against the top entry
#[test]
fn test_analyze_withRepeatedWord_shouldScaleRelativePercentage() {
    let document = common::document_with_tokens(&["storm", "storm", "storm", "storm", "quiet"], &[]);
    let report = FrequencyAnalyzer::default().analyze(&document);

    assert_eq!(report.top_words[0].relative_percentage, 100.0);
    assert_eq!(report.top_words[1].relative_percentage, 25.0);
}

/// Configured limit overrides the default
#[test]
fn test_analyze_withCustomLimit_shouldHonorConfig() {
    let config = AnalysisConfig {
        frequency_top_n: 1,
        ..AnalysisConfig::default()
    };
    let document = common::document_with_tokens(&["quiet", "storm", "storm"], &[]);
    let report = FrequencyAnalyzer::new(&config).analyze(&document);

    assert_eq!(report.top_words.len(), 1);
    assert_eq!(report.top_words[0].word, "storm");
}

/// Empty input renders the empty-state message
#[test]
fn test_display_withNoWords_shouldShowEmptyMessage() {
    let document = common::document_with_tokens(&["a", "an", "the"], &[]);
    let report = FrequencyAnalyzer::default().analyze(&document);

    assert!(report.is_empty());
    let rendered = report.to_string();
    assert!(rendered.contains("Analysis of 0 words in the text"));
    assert!(rendered.contains("No frequent words found."));
}

/// Rendered report lists words in rank order
#[test]
fn test_display_withWords_shouldListRankedRows() {
    let document = common::document_with_tokens(&["quiet", "storm", "storm"], &[]);
    let rendered = FrequencyAnalyzer::default().analyze(&document).to_string();

    assert!(rendered.contains("Top 20 Most Frequent Words"));
    let storm = rendered.find("storm").unwrap();
    let quiet = rendered.find("quiet").unwrap();
    assert!(storm < quiet);
    assert!(rendered.contains("2 occurrences"));
}
