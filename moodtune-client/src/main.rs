//! moodtune - image to playlist from the command line
//!
//! Stages one image, submits it to the recommendation server, and prints the
//! analysis with the requested page of songs. Optionally writes the HTML
//! fragment for the same view.

use anyhow::{anyhow, bail, Context, Result};
use clap::Parser;
use moodtune_client::view::ViewModel;
use moodtune_client::{CandidateFile, RecommendClient, SubmitOutcome, UserAction, WorkflowSession};
use moodtune_common::config::{ClientConfig, SERVER_URL_ENV};
use std::path::PathBuf;
use tracing::{error, info, warn};

#[derive(Parser, Debug)]
#[command(name = "moodtune")]
#[command(about = "Get song recommendations for an image")]
#[command(version)]
struct Args {
    /// Image to analyze
    image: PathBuf,

    /// Recommendation server base URL
    #[arg(short, long, env = SERVER_URL_ENV)]
    server: Option<String>,

    /// TOML config file (default: ~/.config/moodtune/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Page of the playlist to show (1-based)
    #[arg(short, long, default_value_t = 1)]
    page: usize,

    /// Write the HTML fragment for the final view to this file
    #[arg(long)]
    html: Option<PathBuf>,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Resolved before the subscriber exists; the outcome is logged below
    let config = ClientConfig::resolve(args.server.as_deref(), args.config.as_deref())
        .context("Failed to load configuration")?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&config.log_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    info!(
        "Starting MoodTune v{} [{}] built {} ({})",
        env!("CARGO_PKG_VERSION"),
        env!("GIT_HASH"),
        env!("BUILD_TIMESTAMP"),
        env!("BUILD_PROFILE")
    );
    match &config.config_file {
        Some(path) => info!("Loaded config from {}", path.display()),
        None => info!("No config file found, using built-in defaults"),
    }
    info!(
        "Server URL {} (from {}), request timeout {}s",
        config.server_url,
        config.server_url_source,
        config.request_timeout.as_secs()
    );

    let client = RecommendClient::from_config(&config)?;
    info!("Recommendation endpoint: {}", client.endpoint());

    let candidate = CandidateFile::from_path(&args.image)
        .with_context(|| format!("Failed to read {}", args.image.display()))?;

    let mut session = WorkflowSession::new();
    if let Err(e) = session.select_file(Some(candidate)).await {
        error!("Selection rejected: {}", e);
        bail!(e.user_message());
    }

    match session.submit(&client).await {
        SubmitOutcome::ResultsReady { song_count } => {
            info!("Received {} recommendations", song_count);
        }
        SubmitOutcome::Failed(e) => {
            emit(&session, &args)?;
            bail!(e.user_message());
        }
        SubmitOutcome::Skipped | SubmitOutcome::Stale => {
            return Err(anyhow!("Submission did not complete"));
        }
    }

    for _ in 1..args.page {
        if session.dispatch(UserAction::NextPage)?.is_none() {
            let last = session.playlist().map(|p| p.current_page()).unwrap_or(1);
            warn!("Page {} is out of range, showing page {}", args.page, last);
            break;
        }
    }

    emit(&session, &args)
}

/// Print the text view and write the HTML view if requested
fn emit(session: &WorkflowSession, args: &Args) -> Result<()> {
    let view = ViewModel::from_session(session);
    print!("{}", view.to_text());

    if let Some(path) = &args.html {
        std::fs::write(path, view.to_html())
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote HTML view to {}", path.display());
    }
    Ok(())
}
