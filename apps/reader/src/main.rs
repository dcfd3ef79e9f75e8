use std::{
    io::{self, BufRead},
    path::PathBuf,
    thread,
};

mod backend_bridge;
mod config;
mod controller;
mod ui;

use anyhow::{Context, Result};
use clap::Parser;
use crossbeam_channel::{bounded, unbounded, Sender};
use tracing_subscriber::EnvFilter;

use crate::{
    backend_bridge::{commands::FeedCommand, runtime},
    config::load_settings,
    controller::{events::UiEvent, orchestration::dispatch_feed_command},
    ui::ReaderApp,
};

#[derive(Parser, Debug)]
#[command(name = "reader", about = "Browse subreddit listings page by page")]
struct Args {
    /// Settings file; `reader.toml` in the working directory when omitted.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long)]
    base_url: Option<String>,
    /// Subreddit to load on start.
    #[arg(long)]
    query: Option<String>,
    #[arg(long)]
    log_level: Option<String>,
    /// Visible list rows.
    #[arg(long)]
    rows: Option<u32>,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut settings = load_settings(args.config.as_deref()).context("failed to load settings")?;
    if let Some(base_url) = args.base_url {
        settings.base_url = base_url;
    }
    if let Some(log_level) = args.log_level {
        settings.log_level = log_level;
    }
    if let Some(rows) = args.rows {
        settings.viewport_rows = rows;
    }

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&settings.log_level))
        .context("invalid log filter")?;
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let (cmd_tx, cmd_rx) = bounded::<FeedCommand>(256);
    let (ui_tx, ui_rx) = bounded::<UiEvent>(2048);
    let backend = runtime::launch(settings.clone(), cmd_rx, ui_tx);

    let app = ReaderApp::new(&settings, cmd_tx.clone());
    if let Some(query) = args.query {
        dispatch_feed_command(&cmd_tx, FeedCommand::Submit { text: query });
    }

    let (input_tx, input_rx) = unbounded();
    spawn_stdin_reader(input_tx);

    let mut stdout = io::stdout().lock();
    ui::app::run(app, ui_rx, input_rx, &mut stdout).context("terminal output failed")?;
    drop(cmd_tx);

    if backend.join().is_err() {
        tracing::error!("backend worker panicked");
    }
    Ok(())
}

fn spawn_stdin_reader(input_tx: Sender<String>) {
    thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if input_tx.send(line).is_err() {
                        break;
                    }
                }
                Err(err) => {
                    tracing::warn!("stdin read failed: {err}");
                    break;
                }
            }
        }
    });
}
