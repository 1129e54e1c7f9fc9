//! Command-line interface for strictly_hex.

use clap::Parser;
use std::path::PathBuf;

/// Strictly Hex - play Hex in the terminal
#[derive(Parser, Debug)]
#[command(name = "strictly_hex")]
#[command(about = "Two-player Hex in the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML session config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Board edge length (4-19)
    #[arg(short, long)]
    pub size: Option<usize>,

    /// Name of the first (row) player
    #[arg(long)]
    pub first_name: Option<String>,

    /// Name of the second (column) player
    #[arg(long)]
    pub second_name: Option<String>,

    /// Ask for names and board size before the first game
    #[arg(long, conflicts_with_all = ["size", "first_name", "second_name"])]
    pub prompt: bool,

    /// Print JSON event lines instead of drawing the board
    #[arg(long)]
    pub json: bool,
}
