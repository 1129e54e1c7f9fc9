//! Line-oriented terminal front-end: renderer, prompter and game loop.

use anyhow::Result;
use serde::Serialize;
use std::io::{BufRead, Write};
use strictly_hex::{
    Color, Coord, GameSession, MoveOutcome, Player, PlayerId, Prompter, Renderer, StartReport,
};
use tracing::{debug, instrument, warn};

/// An output line in `--json` mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "event", rename_all = "snake_case")]
enum RenderEvent {
    TileClaimed { row: usize, col: usize, color: String },
    GameWon { seat: PlayerId, name: String },
    BoardReset { size: usize },
    Error { message: String },
    Notice { message: String },
}

fn write_event(out: &mut impl Write, event: &RenderEvent) -> std::io::Result<()> {
    let line = serde_json::to_string(event).map_err(std::io::Error::other)?;
    writeln!(out, "{line}")
}

/// Writes render notifications as text or JSON lines.
#[derive(Debug)]
pub struct TerminalRenderer<W> {
    out: W,
    json: bool,
}

impl<W: Write> TerminalRenderer<W> {
    /// Creates a renderer writing to `out`.
    pub fn new(out: W, json: bool) -> Self {
        Self { out, json }
    }

    fn emit(&mut self, event: RenderEvent, text: String) {
        let written = if self.json {
            write_event(&mut self.out, &event)
        } else {
            writeln!(self.out, "{text}")
        };
        if let Err(err) = written {
            warn!(%err, "Failed to write render event");
        }
    }
}

impl<W: Write> Renderer for TerminalRenderer<W> {
    fn tile_claimed(&mut self, coord: Coord, color: Color) {
        self.emit(
            RenderEvent::TileClaimed {
                row: coord.row,
                col: coord.col,
                color: color.to_string(),
            },
            format!("Claimed {coord} [{color}]"),
        );
    }

    fn game_won(&mut self, winner: PlayerId, player: &Player) {
        self.emit(
            RenderEvent::GameWon {
                seat: winner,
                name: player.name().clone(),
            },
            format!("{} wins!", player.name()),
        );
    }

    fn board_reset(&mut self, size: usize) {
        self.emit(
            RenderEvent::BoardReset { size },
            format!("New {size}x{size} board"),
        );
    }
}

/// A line typed at the move prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Claim `(row, col)`.
    Move(i64, i64),
    /// Re-run configuration and start over.
    Reset,
    /// Show usage.
    Help,
    /// Leave the game.
    Quit,
}

impl Command {
    /// Parses `row col`, `row,col` or a keyword.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim().to_lowercase();
        match line.as_str() {
            "q" | "quit" | "exit" => return Some(Command::Quit),
            "r" | "reset" => return Some(Command::Reset),
            "h" | "help" | "?" => return Some(Command::Help),
            _ => {}
        }
        let mut parts = line
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|p| !p.is_empty());
        let row = parts.next()?.parse().ok()?;
        let col = parts.next()?.parse().ok()?;
        if parts.next().is_some() {
            return None;
        }
        Some(Command::Move(row, col))
    }
}

const HELP: &str = "Enter `row col` to claim a cell, `reset` to start over, `quit` to leave.";

/// Terminal input and output shared by the prompts and the game loop.
pub struct Terminal<R, W> {
    input: R,
    out: W,
    json: bool,
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    /// Creates a terminal over the given reader and writer.
    pub fn new(input: R, out: W, json: bool) -> Self {
        Self { input, out, json }
    }

    /// Prints `prompt` and reads one line; `None` at end of input.
    fn ask(&mut self, prompt: &str) -> std::io::Result<Option<String>> {
        if !self.json {
            write!(self.out, "{prompt}")?;
            self.out.flush()?;
        }
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Like [`Terminal::ask`], but an empty answer or I/O failure counts as
    /// cancelled.
    fn answer(&mut self, prompt: &str) -> Option<String> {
        match self.ask(prompt) {
            Ok(Some(line)) if !line.is_empty() => Some(line),
            Ok(_) => None,
            Err(err) => {
                warn!(%err, "Prompt failed");
                None
            }
        }
    }

    fn say(&mut self, text: impl std::fmt::Display) -> std::io::Result<()> {
        writeln!(self.out, "{text}")
    }

    /// Informational text; a `notice` event in JSON mode.
    fn notice(&mut self, text: impl std::fmt::Display) -> std::io::Result<()> {
        if self.json {
            let message = text.to_string();
            write_event(&mut self.out, &RenderEvent::Notice { message })
        } else {
            self.say(text)
        }
    }

    /// A refused command or move; an `error` event in JSON mode.
    fn error(&mut self, text: impl std::fmt::Display) -> std::io::Result<()> {
        if self.json {
            let message = text.to_string();
            write_event(&mut self.out, &RenderEvent::Error { message })
        } else {
            self.say(text)
        }
    }

    /// Describes a start or reset, including a refused board size.
    pub fn report_start(&mut self, report: &StartReport) -> std::io::Result<()> {
        if let Some(err) = &report.rejected {
            self.error(format!("{err}; using {0}x{0}", report.size))?;
        }
        Ok(())
    }
}

impl<R: BufRead, W: Write> Prompter for Terminal<R, W> {
    fn confirm_restart(&mut self) -> Option<bool> {
        let answer = self.answer("Play again? [y/n] ")?;
        match answer.to_lowercase().as_str() {
            "y" | "yes" => Some(true),
            "n" | "no" => Some(false),
            _ => None,
        }
    }

    fn player_name(&mut self, seat: PlayerId, default: &str) -> Option<String> {
        self.answer(&format!("Name for the {seat} player [{default}]: "))
    }

    fn board_size(&mut self, default: usize) -> Option<usize> {
        let answer = self.answer(&format!("Board size 4-19 [{default}]: "))?;
        match answer.parse() {
            Ok(size) => Some(size),
            Err(_) => {
                debug!(%answer, "Size is not a number");
                None
            }
        }
    }
}

/// Runs the move loop until the players quit, decline a rematch or input
/// ends.
#[instrument(skip_all)]
pub fn play<R: BufRead, W: Write>(
    session: &mut GameSession,
    terminal: &mut Terminal<R, W>,
) -> Result<()> {
    loop {
        if !terminal.json {
            let seat = session.current_player();
            let player = session.player(seat);
            let status = format!(
                "{}{} ({}, connects {}s) to move",
                session.board(),
                player.name(),
                player.color(),
                player.axis()
            );
            terminal.say(status)?;
        }

        let Some(line) = terminal.ask("move> ")? else {
            debug!("Input closed");
            return Ok(());
        };

        match Command::parse(&line) {
            Some(Command::Quit) => return Ok(()),
            Some(Command::Help) => terminal.notice(HELP)?,
            Some(Command::Reset) => {
                let report = session.configure_with(terminal);
                terminal.report_start(&report)?;
            }
            Some(Command::Move(row, col)) => match session.apply_move(row, col) {
                Ok(MoveOutcome::Won { .. }) => {
                    if !terminal.json {
                        let board = session.board().to_string();
                        terminal.say(board)?;
                    }
                    match session.offer_restart(terminal) {
                        Some(report) => terminal.report_start(&report)?,
                        None => return Ok(()),
                    }
                }
                Ok(MoveOutcome::Continue { .. }) => {}
                Err(err) => terminal.error(err)?,
            },
            None => terminal.error(format!("Unrecognized input `{line}`. {HELP}"))?,
        }
    }
}
