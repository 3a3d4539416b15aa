/*!
 * End-to-end tests for the analysis session
 */

use std::sync::Arc;
use std::time::Duration;

use subvocab::analysis::complexity::DifficultyTier;
use subvocab::analysis::{AnalysisReport, AnalysisView};
use subvocab::app_config::AnalysisConfig;
use subvocab::errors::{AnalysisError, EngineError};
use subvocab::nlp::builtin::RuleBasedEngineLoader;
use subvocab::nlp::mock::MockEngineLoader;
use subvocab::nlp::{EngineState, TokenizedDocument};
use subvocab::session::{render_outcome, AnalysisSession};
use crate::common;

fn rule_based_session() -> AnalysisSession {
    AnalysisSession::with_loader(AnalysisConfig::default(), Arc::new(RuleBasedEngineLoader))
}

/// Full pipeline with the rule-based engine
#[tokio::test]
async fn test_session_withRuleBasedEngine_shouldProduceAllReports() {
    let session = rule_based_session();
    let parsed = session.load_subtitle(common::SCENE_SRT);
    assert_eq!(parsed.sentences.len(), 4);

    let Ok(AnalysisReport::Frequency(frequency)) = session.request_analysis(AnalysisView::Frequency).await else {
        panic!("expected a frequency report");
    };
    assert_eq!(frequency.total_words, 15);
    assert_eq!(frequency.top_words[0].word, "lighthouse");
    assert_eq!(frequency.top_words[0].count, 2);
    assert_eq!(frequency.top_words[1].word, "harbour");
    assert_eq!(frequency.top_words[2].word, "keeper");

    let Ok(AnalysisReport::Complexity(complexity)) = session.request_analysis(AnalysisView::Complexity).await else {
        panic!("expected a complexity report");
    };
    assert_eq!(complexity.sentence_count, 4);
    assert_eq!(complexity.word_count, 25);
    assert_eq!(complexity.complex_word_count, 9);
    assert_eq!(complexity.avg_sentence_length, 6.25);
    assert_eq!(complexity.difficulty, DifficultyTier::Advanced);

    let Ok(AnalysisReport::Collocation(collocation)) = session.request_analysis(AnalysisView::Collocation).await else {
        panic!("expected a collocation report");
    };
    let phrases: Vec<&str> = collocation.noun_phrases.entries.iter().map(|e| e.phrase.as_str()).collect();
    assert_eq!(
        phrases,
        vec!["old lighthouse", "stormy harbour", "extraordinary storm", "harbour"]
    );
    assert_eq!(collocation.noun_phrases.entries[0].frequency, 2);
    assert_eq!(
        collocation.noun_phrases.entries[0].example_sentence,
        "The old lighthouse keeper was waiting."
    );
    assert_eq!(
        collocation.noun_phrases.entries[3].example_sentence,
        "He watched the stormy harbour."
    );
    let verbs: Vec<&str> = collocation.verbs.entries.iter().map(|e| e.phrase.as_str()).collect();
    assert_eq!(verbs, vec!["was", "waiting", "watched", "stood", "remembered"]);

    assert_eq!(session.engine().state(), EngineState::Ready);
    assert_eq!(session.active_view(), AnalysisView::Collocation);
}

/// Parse-only artifacts are available without the engine
#[tokio::test]
async fn test_session_loadSubtitle_shouldExposeArtifactsWithoutEngine() {
    let loader = Arc::new(MockEngineLoader::working());
    let session = AnalysisSession::with_loader(AnalysisConfig::default(), loader.clone());

    session.load_subtitle(common::TWO_BLOCK_SRT);

    assert_eq!(session.vocabulary(), vec!["again", "hello", "world"]);
    assert_eq!(session.sentences(), vec!["Hello world", "Hello again world"]);
    assert_eq!(session.clean_text(), "Hello world Hello again world");
    assert_eq!(loader.load_count(), 0);
}

/// The configured word-length bound applies to vocabulary and frequency alike
#[tokio::test]
async fn test_session_withCustomMinWordLength_shouldApplyToBothPasses() {
    let config = AnalysisConfig {
        min_word_length: 5,
        ..AnalysisConfig::default()
    };
    assert!(config.validate().is_ok());
    let session = AnalysisSession::with_loader(config, Arc::new(MockEngineLoader::working()));

    let parsed = session.load_subtitle("1\n00:00:01,000 --> 00:00:02,000\nHello extraordinary world again");
    assert_eq!(parsed.vocabulary, vec!["extraordinary"]);

    let Ok(AnalysisReport::Frequency(report)) = session.request_analysis(AnalysisView::Frequency).await else {
        panic!("expected a frequency report");
    };
    assert_eq!(report.total_words, 1);
    let ranked: Vec<&str> = report.top_words.iter().map(|w| w.word.as_str()).collect();
    assert_eq!(ranked, parsed.vocabulary);
}

/// Only the NLP-backed views need the engine
#[test]
fn test_needs_engine_shouldMatchAnalyzerViews() {
    let engine_views: Vec<AnalysisView> = AnalysisView::ALL
        .iter()
        .copied()
        .filter(|view| view.needs_engine())
        .collect();
    assert_eq!(
        engine_views,
        vec![AnalysisView::Frequency, AnalysisView::Complexity, AnalysisView::Collocation]
    );
}

/// Views without analysis are rejected
#[tokio::test]
async fn test_request_analysis_withParseOnlyView_shouldBeNotAnalytic() {
    let session = rule_based_session();
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let outcome = session.request_analysis(AnalysisView::Sentences).await;
    assert_eq!(outcome, Err(AnalysisError::NotAnalytic(AnalysisView::Sentences)));
    assert_eq!(session.active_view(), AnalysisView::Sentences);
}

/// Empty corpus is reported before the engine is loaded
#[tokio::test]
async fn test_request_analysis_withEmptyDocument_shouldReportEmptyCorpus() {
    let loader = Arc::new(MockEngineLoader::working());
    let session = AnalysisSession::with_loader(AnalysisConfig::default(), loader.clone());

    assert_eq!(
        session.request_analysis(AnalysisView::Frequency).await,
        Err(AnalysisError::EmptyCorpus)
    );

    session.load_subtitle("");
    for view in [AnalysisView::Frequency, AnalysisView::Complexity, AnalysisView::Collocation] {
        let outcome = session.request_analysis(view).await;
        assert_eq!(outcome, Err(AnalysisError::EmptyCorpus));
        assert_eq!(
            render_outcome(&outcome).as_deref(),
            Some("No text data available. Please process an SRT file first.")
        );
    }
    assert_eq!(loader.load_count(), 0);
}

/// An engine that returns no tokens is treated as an empty corpus
#[tokio::test]
async fn test_request_analysis_withEngineReturningNoTokens_shouldReportEmptyCorpus() {
    let loader = MockEngineLoader::working().with_document(TokenizedDocument::default());
    let session = AnalysisSession::with_loader(AnalysisConfig::default(), Arc::new(loader));
    session.load_subtitle(common::TWO_BLOCK_SRT);

    assert_eq!(
        session.request_analysis(AnalysisView::Complexity).await,
        Err(AnalysisError::EmptyCorpus)
    );
}

/// A failed load keeps the parsed artifacts and can be retried
#[tokio::test]
async fn test_request_analysis_afterLoadFailure_shouldRetryOnNextRequest() {
    let loader = Arc::new(MockEngineLoader::fail_first(1));
    let session = AnalysisSession::with_loader(AnalysisConfig::default(), loader.clone());
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let failed = session.request_analysis(AnalysisView::Frequency).await;
    assert!(matches!(
        failed,
        Err(AnalysisError::EngineUnavailable(EngineError::LoadFailed(_)))
    ));
    assert_eq!(
        render_outcome(&failed).as_deref(),
        Some("NLP model not loaded. Please try again.")
    );
    assert_eq!(session.vocabulary(), vec!["again", "hello", "world"]);
    assert_eq!(session.engine().state(), EngineState::Idle);

    let Ok(AnalysisReport::Frequency(report)) = session.request_analysis(AnalysisView::Frequency).await else {
        panic!("expected a frequency report after retry");
    };
    assert_eq!(report.top_words[0].word, "hello");
    assert_eq!(report.top_words[0].count, 2);
    assert_eq!(report.top_words[1].word, "world");
    assert_eq!(report.top_words[2].word, "again");
    assert_eq!(loader.load_count(), 2);
}

/// Read failures use the analysis error message
#[tokio::test]
async fn test_request_analysis_withBrokenReader_shouldReportReadFailure() {
    let session = AnalysisSession::with_loader(
        AnalysisConfig::default(),
        Arc::new(MockEngineLoader::broken_reader()),
    );
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let outcome = session.request_analysis(AnalysisView::Collocation).await;
    assert_eq!(
        render_outcome(&outcome).as_deref(),
        Some("Error analyzing text. Please try again.")
    );
}

/// A result that completes after a view switch is suppressed
#[tokio::test]
async fn test_request_analysis_whenViewChangesDuringLoad_shouldSuppressStaleResult() {
    let loader = Arc::new(MockEngineLoader::slow(50));
    let session = AnalysisSession::with_loader(AnalysisConfig::default(), loader.clone());
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let (stale, fresh) = tokio::join!(
        session.request_analysis(AnalysisView::Frequency),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.request_analysis(AnalysisView::Complexity).await
        }
    );

    assert_eq!(
        stale,
        Err(AnalysisError::Superseded {
            requested: AnalysisView::Frequency,
            active: AnalysisView::Complexity,
        })
    );
    assert_eq!(render_outcome(&stale), None);
    assert!(matches!(fresh, Ok(AnalysisReport::Complexity(_))));
    assert_eq!(loader.load_count(), 1);
}

/// Loading another file invalidates in-flight requests
#[tokio::test]
async fn test_request_analysis_whenNewSubtitleLoaded_shouldSuppressStaleResult() {
    let session = AnalysisSession::with_loader(
        AnalysisConfig::default(),
        Arc::new(MockEngineLoader::slow(50)),
    );
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let (stale, _) = tokio::join!(
        session.request_analysis(AnalysisView::Frequency),
        async {
            tokio::time::sleep(Duration::from_millis(10)).await;
            session.load_subtitle(common::SCENE_SRT);
        }
    );

    assert!(matches!(stale, Err(AnalysisError::Superseded { .. })));
    assert!(session.vocabulary().contains(&"lighthouse".to_string()));
}

/// Tickets issued before a later activation are no longer current
#[tokio::test]
async fn test_activate_shouldInvalidateEarlierTickets() {
    let session = rule_based_session();
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let first = session.activate(AnalysisView::Frequency);
    assert!(session.is_current(first));

    let second = session.activate(AnalysisView::Frequency);
    assert!(!session.is_current(first));
    assert!(session.is_current(second));

    assert!(matches!(session.run(first).await, Err(AnalysisError::Superseded { .. })));
    assert!(session.run(second).await.is_ok());
}

/// Reports serialize with a view tag
#[tokio::test]
async fn test_report_serialization_shouldTagView() -> anyhow::Result<()> {
    let session = rule_based_session();
    session.load_subtitle(common::SCENE_SRT);

    let report = session
        .request_analysis(AnalysisView::Complexity)
        .await
        .map_err(|e| anyhow::anyhow!(e.to_string()))?;
    assert_eq!(report.view(), AnalysisView::Complexity);

    let value = serde_json::to_value(&report)?;
    assert_eq!(value["view"], "complexity");
    assert_eq!(value["difficulty"], "Advanced");
    assert_eq!(value["word_count"], 25);
    Ok(())
}

/// Rendered text for a successful outcome is the report itself
#[tokio::test]
async fn test_render_outcome_withReport_shouldRenderReport() {
    let session = rule_based_session();
    session.load_subtitle(common::TWO_BLOCK_SRT);

    let outcome = session.request_analysis(AnalysisView::Frequency).await;
    let rendered = render_outcome(&outcome).unwrap();
    assert!(rendered.starts_with("Word Frequency Analysis"));
    assert!(rendered.contains("hello"));
}
