use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};

use radar_core::{
    Config, DisplaySurface, HttpFeed, PollState, Poller, SnapshotSource, directives,
};

use crate::display::TerminalSurface;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "radar", version, about = "Live weather-radar map viewer")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the feed endpoint and refresh interval.
    Configure {
        /// Feed endpoint URL; prompted interactively when omitted.
        #[arg(long)]
        endpoint: Option<String>,

        /// Refresh interval in milliseconds.
        #[arg(long)]
        interval_ms: Option<u64>,
    },

    /// Fetch one snapshot and print the rendered markers.
    Show,

    /// Poll the feed continuously and live-update the display. Ctrl-C stops.
    Watch,
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Configure { endpoint, interval_ms } => configure(endpoint, interval_ms),
            Command::Show => show().await,
            Command::Watch => watch().await,
        }
    }
}

fn configure(endpoint: Option<String>, interval_ms: Option<u64>) -> anyhow::Result<()> {
    let mut cfg = Config::load()?;

    let endpoint = match endpoint {
        Some(url) => url,
        None => inquire::Text::new("Feed endpoint URL:")
            .with_initial_value(cfg.endpoint_url())
            .prompt()
            .context("Failed to read endpoint URL")?,
    };
    cfg.set_endpoint_url(endpoint);

    if let Some(ms) = interval_ms {
        cfg.set_refresh_interval_ms(ms)?;
    }

    cfg.save()?;
    println!("Saved {}", Config::config_file_path()?.display());
    Ok(())
}

async fn show() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let feed = HttpFeed::new(cfg.endpoint_url());

    let snapshot = feed
        .fetch()
        .await
        .with_context(|| format!("Failed to fetch radar snapshot from {}", feed.url()))?;

    let mut surface = TerminalSurface::new();
    surface.render(&directives(&snapshot));
    Ok(())
}

async fn watch() -> anyhow::Result<()> {
    let cfg = Config::load()?;
    let feed = Arc::new(HttpFeed::new(cfg.endpoint_url()));
    log::info!(
        "watching {} every {:?}",
        feed.url(),
        cfg.refresh_interval()
    );

    let poller = Poller::start(feed, cfg.refresh_interval());
    let mut rx = poller.subscribe();
    let mut surface = TerminalSurface::new();
    let mut last_update = None;

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = rx.changed() => {
                if changed.is_err() {
                    break;
                }
                let state = rx.borrow_and_update().clone();
                if let PollState::Ready { last_update: t, .. } = &state {
                    last_update = Some(*t);
                }
                surface.set_status(state.status(), last_update);
                if let Some(snapshot) = state.snapshot() {
                    surface.render(&directives(snapshot));
                }
            }
        }
    }

    poller.stop();
    Ok(())
}
