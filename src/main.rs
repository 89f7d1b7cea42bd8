use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};
use colored::*;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, SystemTime};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use jdq_cli::{FileDocumentSource, clear_screen, display_banner, print_session_view};
use jdq_core::{
    AnalysisRequest, DimensionAnalyzer, DocumentSource, Language, PresentationContext,
    QualityConfig, Theme,
};
use jdq_heuristics::HeuristicAnalyzer;
use jdq_llm::LlmAnalyzerClient;
use jdq_session::{AnalysisSession, AutoAnalyzer, SessionState, session_view};

#[derive(Parser)]
#[command(name = "jdq")]
#[command(about = "Quality and inclusive-language assessment for job descriptions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Analyze a job description once and print the dashboard
    Analyze {
        /// Markdown or plain-text job description
        file: PathBuf,

        /// Print the view model as JSON instead of rendering it
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        options: CommonOptions,
    },
    /// Re-analyze a job description whenever the file changes
    Watch {
        file: PathBuf,

        /// How often to check the file for changes
        #[arg(long, default_value_t = 250)]
        poll_ms: u64,

        #[command(flatten)]
        options: CommonOptions,
    },
}

#[derive(Args)]
struct CommonOptions {
    /// Language of the document and of the output
    #[arg(long, value_enum, default_value_t = LangArg::En)]
    lang: LangArg,

    #[arg(long, value_enum, default_value_t = ThemeArg::Light)]
    theme: ThemeArg,

    /// JSON configuration file; JDQ_* environment variables override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Use the LLM analyzer instead of the offline heuristics
    #[arg(long)]
    llm: bool,

    /// Do not print the highlighted text
    #[arg(long)]
    no_highlights: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum LangArg {
    En,
    Fr,
}

#[derive(Clone, Copy, ValueEnum)]
enum ThemeArg {
    Light,
    Dark,
}

impl CommonOptions {
    fn context(&self) -> PresentationContext {
        let language = match self.lang {
            LangArg::En => Language::En,
            LangArg::Fr => Language::Fr,
        };
        let theme = match self.theme {
            ThemeArg::Light => Theme::Light,
            ThemeArg::Dark => Theme::Dark,
        };
        PresentationContext::new(language, theme)
    }

    fn load_config(&self) -> Result<QualityConfig> {
        let config = match &self.config {
            Some(path) => {
                let mut config = QualityConfig::from_json_file(path)
                    .with_context(|| format!("Failed to load config from {}", path.display()))?;
                config.apply_env()?;
                config.validate()?;
                config
            }
            None => QualityConfig::from_env()?,
        };
        Ok(config)
    }

    fn analyzer(&self, config: &QualityConfig) -> Result<Arc<dyn DimensionAnalyzer>> {
        if self.llm {
            let client = LlmAnalyzerClient::from_env()
                .context("LLM analyzer requested but not configured")?
                .with_timeout(config.analyzer_timeout());
            info!(model = %client.config().model, "Using LLM analyzer");
            Ok(Arc::new(client))
        } else {
            Ok(Arc::new(HeuristicAnalyzer::new(config)?))
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("jdq=info,warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    dotenvy::dotenv().ok();
    init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Analyze { file, json, options } => analyze_once(&file, json, &options).await,
        Command::Watch {
            file,
            poll_ms,
            options,
        } => {
            watch(&file, Duration::from_millis(poll_ms), &options).await?;
            Ok(ExitCode::SUCCESS)
        }
    }
}

async fn analyze_once(file: &Path, json: bool, options: &CommonOptions) -> Result<ExitCode> {
    let config = options.load_config()?;
    let ctx = options.context();
    let source = FileDocumentSource::new(file);
    let document = source.load().await.with_context(|| format!("Failed to read {}", source.describe()))?;

    let session = AnalysisSession::new(options.analyzer(&config)?, config);
    session
        .analyze(AnalysisRequest::from_document(&document, ctx.language))
        .await;

    let state = session.state();
    let view = session_view(&state, &ctx);
    if json {
        println!("{}", serde_json::to_string_pretty(&view)?);
    } else {
        display_banner(&source.describe());
        print_session_view(&view, &document.text, &ctx, !options.no_highlights);
    }

    Ok(match state {
        SessionState::Ready { .. } => ExitCode::SUCCESS,
        _ => ExitCode::FAILURE,
    })
}

async fn watch(file: &Path, poll: Duration, options: &CommonOptions) -> Result<()> {
    let config = options.load_config()?;
    let ctx = options.context();
    let source = FileDocumentSource::new(file);
    if !file.exists() {
        bail!("{} does not exist", file.display());
    }

    let session = AnalysisSession::new(options.analyzer(&config)?, config);
    let mut auto = AutoAnalyzer::new(session.clone(), ctx.language);
    let mut states = session.subscribe();
    let mut last_modified: Option<SystemTime> = None;
    let mut ticker = tokio::time::interval(poll);

    info!(file = %source.describe(), "Watching for changes");
    println!("{} {}", "👀 Watching".cyan(), source.describe().bold());

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {
                println!();
                println!("{}", "👋 Goodbye!".green());
                return Ok(());
            }
            _ = ticker.tick() => {
                let modified = match source.modified().await {
                    Ok(modified) => modified,
                    Err(e) => {
                        warn!(error = %e, "Cannot read file metadata");
                        continue;
                    }
                };
                if last_modified == Some(modified) {
                    continue;
                }
                last_modified = Some(modified);
                match source.load().await {
                    Ok(document) => auto.on_edit(document.text),
                    Err(e) => warn!(error = %e, "Cannot read file"),
                }
            }
            changed = states.changed() => {
                if changed.is_err() {
                    return Ok(());
                }
                let state = states.borrow_and_update().clone();
                let text = state.outcome().map(|o| o.text.clone()).unwrap_or_default();
                clear_screen()?;
                display_banner(&source.describe());
                print_session_view(&session_view(&state, &ctx), &text, &ctx, !options.no_highlights);
            }
        }
    }
}
