use std::fs;
use std::sync::Mutex;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

mod analysis;
mod api;
mod app;
mod config;
mod error;
mod handler;
mod journal;
mod mock;
mod render;
mod status;
mod transport;
mod tui;
mod ui;

use app::App;
use config::Config;
use journal::JournalStore;
use tui::EventHandler;

/// Logging goes to a file; the terminal is owned by the TUI.
fn init_logging() -> Result<()> {
    let log_dir = dirs::data_dir()
        .context("Could not determine data directory")?
        .join("mindshift");
    fs::create_dir_all(&log_dir)?;
    let log_file = fs::File::create(log_dir.join("mindshift.log"))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(Mutex::new(log_file))
        .with_ansi(false)
        .init();
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging()?;

    let config = Config::load().unwrap_or_else(|_| Config::new());
    let journal = JournalStore::open_default()?;
    let mut app = App::new(&config, journal);
    info!(use_mock = app.use_mock, "mindshift starting");

    tui::install_panic_hook();
    let mut terminal = tui::init()?;
    let mut events = EventHandler::new();

    while !app.should_quit {
        terminal.draw(|frame| ui::draw(&mut app, frame))?;
        match events.next().await {
            Some(event) => handler::handle_event(&mut app, event).await?,
            None => break,
        }
    }

    tui::restore()?;
    info!("mindshift exiting");
    Ok(())
}
