/*!
 * Error types for the subvocab application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

use crate::analysis::AnalysisView;

/// Errors that can occur when loading or using an NLP engine
#[derive(Error, Debug, Clone, PartialEq)]
pub enum EngineError {
    /// The engine could not be loaded
    #[error("Failed to load NLP engine: {0}")]
    LoadFailed(String),

    /// The task driving the load was dropped before it finished
    #[error("NLP engine load was aborted before completion")]
    LoadAborted,

    /// The engine was loaded but could not process the text
    #[error("Failed to read document: {0}")]
    ReadFailed(String),
}

/// Errors that can occur while running an analysis view
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    /// No subtitle has been loaded, or it produced no clean text
    #[error("No text data available")]
    EmptyCorpus,

    /// The NLP engine is not available
    #[error("NLP engine unavailable: {0}")]
    EngineUnavailable(#[from] EngineError),

    /// The user switched to another view while this one was waiting
    #[error("Result for {requested} view discarded, {active} view is now active")]
    Superseded {
        /// View the request was made for
        requested: AnalysisView,
        /// View active when the result became ready
        active: AnalysisView,
    },

    /// The view does not run an NLP analysis
    #[error("The {0} view has no NLP analysis")]
    NotAnalytic(AnalysisView),
}

impl AnalysisError {
    /// Message shown in place of a report
    pub fn user_message(&self) -> String {
        match self {
            Self::EmptyCorpus => {
                "No text data available. Please process an SRT file first.".to_string()
            }
            Self::EngineUnavailable(EngineError::ReadFailed(_)) => {
                "Error analyzing text. Please try again.".to_string()
            }
            Self::EngineUnavailable(_) => "NLP model not loaded. Please try again.".to_string(),
            Self::Superseded { .. } => String::new(),
            Self::NotAnalytic(view) => format!("The {} view has no analysis to run.", view),
        }
    }
}

/// Main application error type that wraps all other errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Error from a file operation
    #[error("File error: {0}")]
    File(String),

    /// Error in the configuration file
    #[error("Configuration error: {0}")]
    Config(String),

    /// Error from the NLP engine
    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    /// Error from an analysis request
    #[error("Analysis error: {0}")]
    Analysis(#[from] AnalysisError),

    /// Any other error
    #[error("Unknown error: {0}")]
    Unknown(String),
}

// Utility functions for error conversion
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::Unknown(error.to_string())
    }
}

impl From<std::io::Error> for AppError {
    fn from(error: std::io::Error) -> Self {
        Self::File(error.to_string())
    }
}
