//! Strictly Hex - terminal front-end
//!
//! Reads moves from stdin and drives a single game session.

#![warn(missing_docs)]

mod cli;
mod terminal;

use anyhow::{Context, Result};
use clap::Parser;
use cli::Cli;
use std::io;
use strictly_hex::{GameSession, PlayerId, SessionConfig, StartOptions};
use terminal::{Terminal, TerminalRenderer};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    debug!(?cli, "Parsed arguments");

    let config = match &cli.config {
        Some(path) => SessionConfig::from_file(path)
            .with_context(|| format!("Failed to load {}", path.display()))?,
        None => SessionConfig::default(),
    };

    let mut options = StartOptions::default();
    if let Some(size) = cli.size {
        options = options.size(size);
    }
    if let Some(name) = &cli.first_name {
        options = options.name(PlayerId::First, name);
    }
    if let Some(name) = &cli.second_name {
        options = options.name(PlayerId::Second, name);
    }

    let mut session =
        GameSession::new(config).with_renderer(TerminalRenderer::new(io::stdout(), cli.json));
    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout(), cli.json);

    info!("Starting terminal session");
    let report = if cli.prompt {
        session.configure_with(&mut terminal)
    } else {
        session.start(options)
    };
    terminal.report_start(&report)?;

    terminal::play(&mut session, &mut terminal).context("Terminal session failed")?;
    info!("Terminal session finished");
    Ok(())
}
