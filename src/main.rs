// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Result, anyhow, Context};
use log::{error, info, debug, LevelFilter, Log, Metadata, Record, Level, SetLoggerError};
use std::path::{Path, PathBuf};
use std::io::Write;
use std::sync::Arc;
use clap::{Args, Parser, ValueEnum, CommandFactory, Subcommand};
use clap_complete::{generate, Shell};
use serde_json::{json, Map, Value};

use subvocab::analysis::AnalysisView;
use subvocab::app_config::{self, Config, OutputFormat};
use subvocab::file_utils::FileManager;
use subvocab::nlp::builtin::RuleBasedEngineLoader;
use subvocab::session::{self, AnalysisSession};

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// Views selectable from the command line
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
enum CliView {
    All,
    Vocabulary,
    Sentences,
    Frequency,
    Complexity,
    Collocation,
}

impl CliView {
    fn views(self) -> Vec<AnalysisView> {
        match self {
            CliView::All => AnalysisView::ALL.to_vec(),
            CliView::Vocabulary => vec![AnalysisView::Vocabulary],
            CliView::Sentences => vec![AnalysisView::Sentences],
            CliView::Frequency => vec![AnalysisView::Frequency],
            CliView::Complexity => vec![AnalysisView::Complexity],
            CliView::Collocation => vec![AnalysisView::Collocation],
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Analyze subtitle files (default command)
    Analyze(AnalyzeArgs),

    /// Generate shell completions for subvocab
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

#[derive(Args, Debug, Clone)]
struct AnalyzeArgs {
    /// SRT file or directory of SRT files to analyze
    #[arg(value_name = "INPUT_PATH")]
    input_path: Option<PathBuf>,

    /// View to print
    #[arg(short, long, value_enum, default_value = "all")]
    view: CliView,

    /// Print reports as JSON
    #[arg(short, long)]
    json: bool,

    /// Configuration file path
    #[arg(short, long, default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(short, long, value_enum)]
    log_level: Option<CliLogLevel>,
}

/// subvocab - Subtitle vocabulary and text analytics
///
/// Extracts vocabulary, sentences, word frequencies, complexity scores and
/// collocations from SRT subtitle files.
#[derive(Parser, Debug)]
#[command(name = "subvocab")]
#[command(version = "1.0.0")]
#[command(about = "Vocabulary and text analytics for SRT subtitles")]
#[command(args_conflicts_with_subcommands = true)]
#[command(long_about = "subvocab parses SRT subtitles and reports vocabulary, sentences and text analytics.

EXAMPLES:
    subvocab movie.srt                       # Print every view
    subvocab -v frequency movie.srt          # Only the word frequency ranking
    subvocab --json movie.srt                # Reports as JSON
    subvocab --log-level debug /subtitles/   # Analyze a whole directory
    subvocab completions bash > subvocab.bash

CONFIGURATION:
    Analysis thresholds are stored in conf.json by default. If the config file
    doesn't exist, a default one will be created automatically.")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    analyze: AnalyzeArgs,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
}

impl CustomLogger {
    // @creates: New logger with specified level
    fn new(level: LevelFilter) -> Self {
        CustomLogger { level }
    }

    // @initializes: Global logger
    fn init(level: LevelFilter) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger::new(level));
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: ANSI color and tag for log level
    fn style_for_level(level: Level) -> (&'static str, &'static str) {
        match level {
            Level::Error => ("1;31", "ERROR"),
            Level::Warn => ("1;33", "WARN "),
            Level::Info => ("1;32", "INFO "),
            Level::Debug => ("1;36", "DEBUG"),
            Level::Trace => ("1;35", "TRACE"),
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            let now = chrono::Local::now().format("%H:%M:%S.%3f");
            let (color, tag) = Self::style_for_level(record.level());
            let _ = writeln!(
                std::io::stderr(),
                "\x1B[{}m{} {} {}\x1B[0m",
                color, now, tag, record.args()
            );
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // The logger accepts everything; the effective level is set via set_max_level
    CustomLogger::init(LevelFilter::Trace)?;
    log::set_max_level(LevelFilter::Info);

    let cli = CommandLineOptions::parse();

    match cli.command {
        Some(Commands::Completions { shell }) => {
            let mut cmd = CommandLineOptions::command();
            generate(shell, &mut cmd, "subvocab", &mut std::io::stdout());
            Ok(())
        }
        Some(Commands::Analyze(args)) => run_analyze(args).await,
        None => run_analyze(cli.analyze).await,
    }
}

async fn run_analyze(options: AnalyzeArgs) -> Result<()> {
    let input_path = options.input_path.clone().ok_or_else(|| {
        anyhow!("INPUT_PATH is required when no subcommand is specified")
    })?;

    // If log level is set via command line, apply it immediately
    if let Some(cmd_log_level) = &options.log_level {
        let level: app_config::LogLevel = cmd_log_level.clone().into();
        log::set_max_level(level.to_level_filter());
    }

    let mut config = Config::load_or_create(&options.config_path)?;

    if let Some(log_level) = &options.log_level {
        config.log_level = log_level.clone().into();
    }
    if options.json {
        config.output.format = OutputFormat::Json;
    }

    config.validate()
        .context("Configuration validation failed")?;

    if options.log_level.is_none() {
        log::set_max_level(config.log_level.to_level_filter());
    }

    let session = AnalysisSession::with_loader(
        config.analysis.clone(),
        Arc::new(RuleBasedEngineLoader),
    );
    let views = options.view.views();

    if FileManager::file_exists(&input_path) {
        analyze_file(&session, &input_path, &views, config.output.format).await
    } else if FileManager::dir_exists(&input_path) {
        let files = FileManager::find_subtitle_files(&input_path)?;
        info!("Found {} subtitle file(s) in {:?}", files.len(), input_path);

        let mut processed_count = 0;
        for file in &files {
            if let Err(e) = analyze_file(&session, file, &views, config.output.format).await {
                error!("Error processing file {:?}: {}", file, e);
            } else {
                processed_count += 1;
            }
        }

        info!("Finished processing {} files", processed_count);
        Ok(())
    } else {
        Err(anyhow!("Input path does not exist: {:?}", input_path))
    }
}

async fn analyze_file(
    session: &AnalysisSession,
    path: &Path,
    views: &[AnalysisView],
    format: OutputFormat,
) -> Result<()> {
    if !FileManager::is_subtitle_file(path) {
        debug!("File {:?} does not have an .srt extension, parsing anyway", path);
    }

    let content = FileManager::read_subtitle(path)?;
    let parsed = session.load_subtitle(&content);

    match format {
        OutputFormat::Text => {
            println!("==> {}", path.display());
            print!("{}", parsed);
            for view in views {
                println!();
                if view.needs_engine() {
                    let outcome = session.request_analysis(*view).await;
                    if let Some(text) = session::render_outcome(&outcome) {
                        print!("{}", text);
                        if !text.ends_with('\n') {
                            println!();
                        }
                    }
                    continue;
                }

                match view {
                    AnalysisView::Sentences => {
                        println!("Sentences ({})", parsed.sentences.len());
                        for (i, sentence) in parsed.sentences.iter().enumerate() {
                            println!("  {:>4}. {}", i + 1, sentence);
                        }
                    }
                    _ => {
                        println!("Vocabulary ({} words)", parsed.vocabulary.len());
                        for word in &parsed.vocabulary {
                            println!("  {}", word);
                        }
                    }
                }
            }
        }
        OutputFormat::Json => {
            let mut output = Map::new();
            output.insert("file".to_string(), json!(path.display().to_string()));

            for view in views {
                let value = if view.needs_engine() {
                    match session.request_analysis(*view).await {
                        Ok(report) => serde_json::to_value(&report)
                            .context("Failed to serialize report")?,
                        Err(e) => json!({ "error": e.to_string(), "message": e.user_message() }),
                    }
                } else if *view == AnalysisView::Sentences {
                    json!(parsed.sentences)
                } else {
                    json!(parsed.vocabulary)
                };
                output.insert(view.name().to_string(), value);
            }

            let rendered = serde_json::to_string_pretty(&Value::Object(output))
                .context("Failed to serialize output")?;
            println!("{}", rendered);
        }
    }

    Ok(())
}
