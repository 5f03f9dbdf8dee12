use anyhow::{Context, Result};
use clap::Parser;
use std::path::PathBuf;
use tokio::sync::mpsc;

use newsdesk::app::{App, AppEvent};
use newsdesk::config::Config;
use newsdesk::news::{NewsBrowser, NewsBundle};
use newsdesk::source::{ApiClient, NewsSource};
use newsdesk::ui;

/// Get the config directory path (~/.config/newsdesk/)
fn get_config_dir() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME environment variable not set")?;
    Ok(PathBuf::from(home).join(".config").join("newsdesk"))
}

#[derive(Parser, Debug)]
#[command(name = "newsdesk", about = "Terminal news browser")]
struct Args {
    /// News backend base URL (overrides backend_url in config)
    #[arg(long, value_name = "URL", conflicts_with = "file")]
    backend: Option<String>,

    /// Read articles from a JSON snapshot instead of the backend
    #[arg(long, value_name = "PATH")]
    file: Option<PathBuf>,

    /// Config file (default: ~/.config/newsdesk/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Start with this category selected
    #[arg(long, value_name = "NAME")]
    category: Option<String>,

    /// Print the first page of articles and exit without starting the TUI
    #[arg(long)]
    dump: bool,
}

/// Log to a file under the config directory so output never lands on the TUI.
fn init_tracing(config_dir: &std::path::Path) -> Result<()> {
    let log_path = config_dir.join("newsdesk.log");
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {}", log_path.display()))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(file))
        .with_ansi(false)
        .init();
    Ok(())
}

/// Print the visible page as plain text.
fn dump_page(browser: &NewsBrowser) {
    for article in browser.page() {
        if article.category.is_empty() {
            println!("{}", article.title);
        } else {
            println!("[{}] {}", article.category, article.title);
        }
    }
    println!("-- {}", browser.pager().range_label());
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let config_dir = get_config_dir()?;
    if !config_dir.exists() {
        std::fs::create_dir_all(&config_dir).context("Failed to create config directory")?;
    }
    init_tracing(&config_dir)?;

    let config_path = args
        .config
        .clone()
        .unwrap_or_else(|| config_dir.join("config.toml"));
    let mut config = Config::load(&config_path)
        .with_context(|| format!("Failed to load config from {}", config_path.display()))?;
    if let Some(backend) = &args.backend {
        config.backend_url = backend.clone();
    }

    let source = match &args.file {
        Some(path) => NewsSource::Snapshot(path.clone()),
        None => NewsSource::Remote(
            ApiClient::new(&config.backend_url, config.client_settings())
                .context("Invalid backend URL")?,
        ),
    };
    tracing::info!(source = %source.describe(), "Starting newsdesk");

    if args.dump {
        let bundle = source
            .load()
            .await
            .with_context(|| format!("Failed to load articles from {}", source.describe()))?;
        let mut browser = NewsBrowser::new(bundle, config.page_size, config.search_scope);
        if let Some(category) = &args.category {
            browser.select_category(Some(category));
        }
        dump_page(&browser);
        return Ok(());
    }

    let mut app = App::new(config, source, NewsBundle::default());
    if let Some(category) = &args.category {
        app.browser.select_category(Some(category));
    }

    let (event_tx, event_rx) = mpsc::channel::<AppEvent>(32);
    ui::spawn_load(&mut app, &event_tx);

    ui::run(&mut app, event_tx, event_rx).await?;

    Ok(())
}
