use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use meetbrief_common::{logger, AppConfig};
use meetbrief_llm::{AnthropicClient, Summarizer};
use meetbrief_server::{Submission, Workflow};
use meetbrief_transcribe::MyMeetClient;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Find project root by looking for .git directory
fn find_project_root() -> Option<PathBuf> {
    let mut current_dir = std::env::current_dir().ok()?;

    loop {
        if current_dir.join(".git").exists() {
            return Some(current_dir);
        }

        if !current_dir.pop() {
            break;
        }
    }

    None
}

/// Load .env file from project root
fn load_dotenv_from_project_root() {
    if let Some(root) = find_project_root() {
        let env_path = root.join(".env");
        if env_path.exists() {
            dotenv::from_path(&env_path).ok();
        }
    } else {
        dotenv::dotenv().ok();
    }
}

#[derive(Parser)]
#[command(name = "meetbrief")]
#[command(about = "Meetbrief - meeting transcript summarization", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<String>,

        /// Port to bind to
        #[arg(long)]
        port: Option<u16>,
    },

    /// Summarize a transcript document (.txt, .json, .docx, .pdf) or media file
    Summarize {
        /// Path to the file
        path: PathBuf,
    },

    /// Transcribe and summarize a meeting link
    Link {
        /// Meeting link
        url: String,
    },
}

/// Build the workflow used by one-shot commands
fn build_workflow(config: &AppConfig) -> Result<Workflow> {
    let llm = Arc::new(AnthropicClient::from_config(config)?);
    let summarizer = Summarizer::from_config(llm, config)?;
    let transcriber = Arc::new(MyMeetClient::from_config(config)?);
    Ok(Workflow::new(transcriber, Arc::new(summarizer)))
}

/// Load, validate and apply logging for a one-shot command
fn one_shot_config() -> Result<AppConfig> {
    let config = AppConfig::from_env()?;
    config.validate()?;
    logger::setup_console_logging(&config.log_level)?;
    Ok(config)
}

async fn run_submission(config: &AppConfig, submission: Submission) -> Result<()> {
    let summary = build_workflow(config)?.execute(submission).await?;
    println!("{}", summary);
    Ok(())
}

fn file_submission(path: &Path) -> Result<Submission> {
    let bytes = std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let filename = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned());
    Ok(Submission::from_upload(filename, None, bytes))
}

async fn serve(config: AppConfig) -> Result<()> {
    config.validate()?;
    logger::setup_logging(&config)?;

    tracing::info!("Meetbrief starting...");
    tracing::info!("Configuration loaded:");
    tracing::info!("  Bind: {}", config.server_bind_address());
    tracing::info!("  Model: {}", config.llm_model);
    tracing::info!("  Chunk size: {} chars", config.chunk_max_chars);

    println!("Server listening on http://{}", config.server_bind_address());

    meetbrief_server::start_server(config).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load before AppConfig::from_env so CLI overrides win
    load_dotenv_from_project_root();

    match cli.command {
        Some(Commands::Serve { host, port }) => {
            if let Some(host) = &host {
                std::env::set_var("SERVER_HOST", host);
            }
            if let Some(port) = port {
                std::env::set_var("SERVER_PORT", port.to_string());
            }
            serve(AppConfig::from_env()?).await?;
        }
        Some(Commands::Summarize { path }) => {
            let config = one_shot_config()?;
            run_submission(&config, file_submission(&path)?).await?;
        }
        Some(Commands::Link { url }) => {
            let config = one_shot_config()?;
            run_submission(&config, Submission::from_message_text(&url)?).await?;
        }
        None => {
            serve(AppConfig::from_env()?).await?;
        }
    }

    Ok(())
}
