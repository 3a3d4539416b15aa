/*!
 * Analysis session for one loaded subtitle file.
 *
 * The session owns everything derived from the current file, the shared
 * engine cell and the active view. Analyses are requested per view; a
 * request that finishes after the user moved to another view (or loaded
 * another file) is reported as superseded instead of rendered.
 */

use log::{debug, info, warn};
use parking_lot::RwLock;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use crate::analysis::{AnalysisReport, AnalysisView};
use crate::app_config::AnalysisConfig;
use crate::errors::AnalysisError;
use crate::nlp::{EngineCell, EngineLoader};
use crate::subtitle_processor::{ParsedSubtitle, SubtitleDocument};

/// Identifies the view activation a request was made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewTicket {
    pub view: AnalysisView,
    generation: u64,
}

/// Session state shared by every view.
#[derive(Debug)]
pub struct AnalysisSession {
    config: AnalysisConfig,
    engine: Arc<EngineCell>,
    subtitle: RwLock<Option<Arc<ParsedSubtitle>>>,
    active_view: RwLock<AnalysisView>,
    generation: AtomicU64,
}

impl AnalysisSession {
    /// Create a session around an existing engine cell
    pub fn new(config: AnalysisConfig, engine: Arc<EngineCell>) -> Self {
        Self {
            config,
            engine,
            subtitle: RwLock::new(None),
            active_view: RwLock::new(AnalysisView::Vocabulary),
            generation: AtomicU64::new(0),
        }
    }

    /// Create a session with its own engine cell
    pub fn with_loader(config: AnalysisConfig, loader: Arc<dyn EngineLoader>) -> Self {
        Self::new(config, Arc::new(EngineCell::new(loader)))
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    pub fn engine(&self) -> &Arc<EngineCell> {
        &self.engine
    }

    /// Parse a subtitle with the configured word-length bound and make it the current file
    pub fn load_subtitle(&self, content: &str) -> Arc<ParsedSubtitle> {
        let parsed = Arc::new(SubtitleDocument::new(content).parse_with(self.config.min_word_length));
        *self.subtitle.write() = Some(parsed.clone());
        self.generation.fetch_add(1, Ordering::SeqCst);

        info!(
            "Loaded subtitle: {} vocabulary words, {} sentences",
            parsed.vocabulary.len(),
            parsed.sentences.len()
        );
        parsed
    }

    /// Artifacts of the current file, if any
    pub fn subtitle(&self) -> Option<Arc<ParsedSubtitle>> {
        self.subtitle.read().clone()
    }

    pub fn vocabulary(&self) -> Vec<String> {
        self.subtitle().map(|s| s.vocabulary.clone()).unwrap_or_default()
    }

    pub fn sentences(&self) -> Vec<String> {
        self.subtitle().map(|s| s.sentences.clone()).unwrap_or_default()
    }

    pub fn clean_text(&self) -> String {
        self.subtitle().map(|s| s.clean_text.clone()).unwrap_or_default()
    }

    pub fn active_view(&self) -> AnalysisView {
        *self.active_view.read()
    }

    /// Switch to `view`; results of earlier activations become stale
    pub fn activate(&self, view: AnalysisView) -> ViewTicket {
        let mut active = self.active_view.write();
        *active = view;
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        debug!("Activated {} view (generation {})", view, generation);
        ViewTicket { view, generation }
    }

    /// Whether `ticket` still describes the active view
    pub fn is_current(&self, ticket: ViewTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Activate `view` and run its analysis
    pub async fn request_analysis(&self, view: AnalysisView) -> Result<AnalysisReport, AnalysisError> {
        let ticket = self.activate(view);
        self.run(ticket).await
    }

    /// Run the analysis for a previously issued ticket
    pub async fn run(&self, ticket: ViewTicket) -> Result<AnalysisReport, AnalysisError> {
        let analyzer = ticket
            .view
            .analyzer()
            .ok_or(AnalysisError::NotAnalytic(ticket.view))?;

        let subtitle = match self.subtitle() {
            Some(subtitle) if !subtitle.is_empty() => subtitle,
            _ => return Err(AnalysisError::EmptyCorpus),
        };

        let engine = self.engine.get_or_load().await?;

        if !self.is_current(ticket) {
            let active = self.active_view();
            warn!("Discarding {} analysis, {} view is now active", ticket.view, active);
            return Err(AnalysisError::Superseded {
                requested: ticket.view,
                active,
            });
        }

        let document = engine.read_document(&subtitle.clean_text)?;
        if document.tokens().is_empty() {
            return Err(AnalysisError::EmptyCorpus);
        }

        debug!(
            "Running {} analysis over {} tokens, {} sentences",
            ticket.view,
            document.tokens().len(),
            document.sentences().len()
        );
        Ok(analyzer(&document, &self.config))
    }
}

/// Text to show for an analysis outcome; `None` when the result is stale
pub fn render_outcome(outcome: &Result<AnalysisReport, AnalysisError>) -> Option<String> {
    match outcome {
        Ok(report) => Some(report.to_string()),
        Err(AnalysisError::Superseded { .. }) => None,
        Err(e) => Some(e.user_message()),
    }
}
