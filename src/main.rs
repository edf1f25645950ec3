use anyhow::{Context, Result};
use clap::Parser;
use paperdeck::config::{find_config_file, get_config, load_config, Config};
use paperdeck::feed::FeedClient;
use paperdeck::store::StateStore;
use paperdeck::tui;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Log file name inside the state directory
const LOG_FILE: &str = "paperdeck.log";

/// paperdeck - Swipe through the latest arXiv papers from your terminal
#[derive(Parser, Debug)]
#[command(name = "paperdeck")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Swipe through the latest arXiv papers, with bookmarks and a dark mode", long_about = None)]
struct Cli {
    /// Enable verbose logging (can be used multiple times for more verbosity: -v, -vv)
    #[arg(long, short, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Configuration file path
    #[arg(long)]
    config: Option<PathBuf>,

    /// arXiv category to browse (e.g. cs.AI, cs.LG, math.CO)
    #[arg(long, short)]
    category: Option<String>,

    /// Number of feed entries to request
    #[arg(long, short)]
    max_results: Option<usize>,

    /// Directory for bookmarks, the display mode and the log file
    #[arg(long)]
    state_dir: Option<PathBuf>,
}

/// CLI flags win over file and environment configuration.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(category) = &cli.category {
        config.feed.category = category.clone();
    }
    if let Some(max_results) = cli.max_results {
        config.feed.max_results = max_results;
    }
    if let Some(state_dir) = &cli.state_dir {
        config.storage.state_dir = Some(state_dir.clone());
    }
}

/// Route tracing output to a file in the state directory.
///
/// The terminal is in raw mode while the UI runs, so nothing may write to
/// stdout or stderr.
fn init_logging(verbose: u8, state_dir: &Path) -> Result<()> {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };

    fs::create_dir_all(state_dir)
        .with_context(|| format!("failed to create state directory {}", state_dir.display()))?;
    let log_file = fs::File::create(state_dir.join(LOG_FILE))
        .with_context(|| format!("failed to open the log file in {}", state_dir.display()))?;

    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| format!("paperdeck={}", log_level)),
        ))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(Arc::new(log_file))
                .with_ansi(false),
        )
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load configuration from file if specified or found in the default location
    let config_path = cli.config.clone().or_else(find_config_file);
    let mut config = match &config_path {
        Some(path) => load_config(path)
            .with_context(|| format!("failed to load config file {}", path.display()))?,
        None => get_config().context("failed to read configuration from the environment")?,
    };
    apply_cli_overrides(&mut config, &cli);

    let state_dir = config.state_dir();
    init_logging(cli.verbose, &state_dir)?;

    if let Some(path) = &config_path {
        tracing::info!("Using config file: {}", path.display());
    }
    tracing::info!(
        category = %config.feed.category,
        max_results = config.feed.max_results,
        state_dir = %state_dir.display(),
        "starting paperdeck"
    );

    let client = FeedClient::new()?;
    let store = StateStore::new(state_dir);

    tui::run(client, config.feed.category, config.feed.max_results, store).await?;

    Ok(())
}
