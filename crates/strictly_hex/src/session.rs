//! Game session: the turn and lifecycle state machine for one Hex game.
//!
//! The session owns the board, both players and both connectivity graphs.
//! Every start or reset replaces board and graphs together, so no graph
//! ever refers to a tile of an earlier board generation.

use super::action::{HexError, Move};
use super::board::{Board, BoardSize};
use super::collaborator::{NullRenderer, Prompter, Renderer};
use super::config::{PlayerConfig, SessionConfig};
use super::contracts::{AcceptingMoves, Contract, MoveContract};
use super::graph::ConnectivityGraph;
use super::phases::{MoveOutcome, Phase};
use super::rules;
use super::types::{Axis, Coord, Player, PlayerId};
use serde::Serialize;
use std::fmt;
use tracing::{debug, info, instrument, warn};

/// Overrides applied when a session starts or resets.
///
/// Anything left unset keeps the session's previous value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StartOptions {
    size: Option<usize>,
    names: [Option<String>; 2],
}

impl StartOptions {
    /// Requests a board edge length.
    pub fn size(mut self, size: usize) -> Self {
        self.size = Some(size);
        self
    }

    /// Renames one seat.
    pub fn name(mut self, seat: PlayerId, name: impl Into<String>) -> Self {
        self.names[seat.index()] = Some(name.into());
        self
    }

    /// Renames both seats.
    pub fn names(self, first: impl Into<String>, second: impl Into<String>) -> Self {
        self.name(PlayerId::First, first)
            .name(PlayerId::Second, second)
    }
}

/// What a start or reset produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StartReport {
    /// Edge length of the new board.
    pub size: BoardSize,
    /// Generation number of the new board.
    pub generation: u64,
    /// Set when the requested size was refused and the default used.
    pub rejected: Option<HexError>,
}

/// Observable session state, for front-ends and tests.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    /// Lifecycle phase.
    pub phase: Phase,
    /// Seat to move (the last mover once the game is over).
    pub current: PlayerId,
    /// Winner, once the game is over.
    pub winner: Option<PlayerId>,
    /// Board and ownership.
    pub board: Board,
    /// Moves so far.
    pub history: Vec<Move>,
    /// `(vertices, edges)` of each seat's graph.
    pub graphs: [(usize, usize); 2],
}

/// A two-player Hex session.
pub struct GameSession {
    pub(crate) config: SessionConfig,
    pub(crate) phase: Phase,
    pub(crate) board: Board,
    pub(crate) players: [Player; 2],
    pub(crate) graphs: [ConnectivityGraph; 2],
    pub(crate) current: PlayerId,
    pub(crate) winner: Option<PlayerId>,
    pub(crate) history: Vec<Move>,
    renderer: Box<dyn Renderer + Send>,
}

impl fmt::Debug for GameSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameSession")
            .field("phase", &self.phase)
            .field("size", &self.board.size())
            .field("generation", &self.board.generation())
            .field("current", &self.current)
            .field("winner", &self.winner)
            .field("moves", &self.history.len())
            .finish_non_exhaustive()
    }
}

fn players_from(config: &SessionConfig) -> [Player; 2] {
    let build = |seat: PlayerId, axis: Axis| {
        let player: &PlayerConfig = config.player(seat);
        Player::new(player.name(), *player.color(), axis)
    };
    [build(PlayerId::First, Axis::Row), build(PlayerId::Second, Axis::Col)]
}

impl GameSession {
    /// Creates a session in [`Phase::Setup`] with an empty board.
    #[instrument]
    pub fn new(config: SessionConfig) -> Self {
        let players = players_from(&config);
        let board = Board::new(config.board_size());
        info!(size = board.size(), "Creating new game session");
        let mut session = Self {
            config,
            phase: Phase::Setup,
            board,
            players,
            graphs: Default::default(),
            current: PlayerId::First,
            winner: None,
            history: Vec::new(),
            renderer: Box::new(NullRenderer),
        };
        session.current = session.seat_with_axis(Axis::Row);
        session
    }

    /// Routes render notifications to `renderer`.
    pub fn with_renderer(mut self, renderer: impl Renderer + Send + 'static) -> Self {
        self.renderer = Box::new(renderer);
        self
    }

    /// Starts a game on a fresh board.
    ///
    /// Board and both graphs are rebuilt, the row-axis player moves first
    /// and the phase becomes [`Phase::InProgress`]. A size outside
    /// `4..=19` is refused: the game starts at the default size and the
    /// refusal is reported in [`StartReport::rejected`].
    #[instrument(skip(self), fields(generation = self.board.generation()))]
    pub fn start(&mut self, options: StartOptions) -> StartReport {
        let StartOptions { size, names } = options;

        let mut rejected = None;
        let size = match size {
            None => self.config.board_size(),
            Some(requested) => BoardSize::new(requested).unwrap_or_else(|err| {
                warn!(%err, fallback = %BoardSize::DEFAULT, "Board size refused");
                rejected = Some(err);
                BoardSize::DEFAULT
            }),
        };
        self.config.set_board_size(size);
        for (seat, name) in PlayerId::ALL.into_iter().zip(names) {
            if let Some(name) = name {
                self.config.set_name(seat, name);
            }
        }

        self.players = players_from(&self.config);
        self.board = self.board.next_generation(size);
        self.graphs = Default::default();
        self.history.clear();
        self.winner = None;
        self.current = self.seat_with_axis(Axis::Row);
        self.phase = Phase::InProgress;

        info!(
            size = size.get(),
            generation = self.board.generation(),
            first = %self.players[0].name(),
            second = %self.players[1].name(),
            "Game started"
        );
        self.renderer.board_reset(size.get());

        StartReport {
            size,
            generation: self.board.generation(),
            rejected,
        }
    }

    /// Discards the current game and starts again.
    ///
    /// Available in every phase; unset options keep their previous values.
    #[instrument(skip(self), fields(phase = %self.phase))]
    pub fn reset(&mut self, options: StartOptions) -> StartReport {
        info!("Resetting session");
        self.start(options)
    }

    /// Claims `(row, col)` for the player to move.
    ///
    /// On success the tile joins the mover's graph, linked to each of
    /// their neighboring tiles, and the win check runs for the mover. A win
    /// ends the game; otherwise the turn passes.
    ///
    /// # Errors
    ///
    /// - [`HexError::NotInProgress`] outside [`Phase::InProgress`]
    /// - [`HexError::NotFound`] for coordinates off the board
    /// - [`HexError::IllegalMove`] for an owned cell
    ///
    /// The session is unchanged after any of these.
    #[instrument(skip(self), fields(player = %self.current))]
    pub fn apply_move(&mut self, row: i64, col: i64) -> Result<MoveOutcome, HexError> {
        AcceptingMoves::check(self).inspect_err(|err| warn!(%err, "Move rejected"))?;
        let coord = self
            .board
            .coord(row, col)
            .inspect_err(|err| warn!(%err, "Move rejected"))?;
        let action = Move::new(self.current, coord);
        MoveContract::pre(self, &action).inspect_err(|err| warn!(%err, "Move rejected"))?;

        let mover = action.player;
        self.board.assign(coord, mover)?;
        self.history.push(action);

        let graph = &mut self.graphs[mover.index()];
        graph.add_vertex(coord);
        for neighbor in self.board.neighbors(coord) {
            if self.board.owner(neighbor) == Some(mover) {
                graph.add_edge(coord, neighbor);
            }
        }
        debug!(
            %coord,
            vertices = graph.vertex_count(),
            edges = graph.edge_count(),
            "Graph updated"
        );

        let axis = *self.players[mover.index()].axis();
        let outcome = match rules::winning_connection(graph, mover, axis, &self.board) {
            Some(connection) => {
                self.winner = Some(mover);
                self.phase = Phase::GameOver;
                info!(winner = %mover, %coord, moves = self.history.len(), "Game won");
                MoveOutcome::Won {
                    claimed: coord,
                    winner: mover,
                    connection,
                }
            }
            None => {
                self.current = mover.opponent();
                MoveOutcome::Continue {
                    claimed: coord,
                    next: self.current,
                }
            }
        };

        // A failed postcondition is a defect in this module, not bad input.
        // The move stays applied and no notifications are sent.
        #[cfg(debug_assertions)]
        MoveContract::post(self)?;

        let player = &self.players[mover.index()];
        self.renderer.tile_claimed(coord, *player.color());
        if outcome.winner().is_some() {
            self.renderer.game_won(mover, player);
        }

        Ok(outcome)
    }

    /// Runs the configuration prompts, then resets with the answers.
    ///
    /// Asks for both names and the board size, offering the current values
    /// as defaults. A cancelled or blank answer keeps the current value.
    #[instrument(skip_all)]
    pub fn configure_with(&mut self, prompter: &mut dyn Prompter) -> StartReport {
        let mut options = StartOptions::default();
        for seat in PlayerId::ALL {
            let current = self.player(seat).name().clone();
            let name = prompter
                .player_name(seat, &current)
                .map(|name| name.trim().to_string())
                .filter(|name| !name.is_empty())
                .unwrap_or_else(|| {
                    debug!(%seat, "Name prompt cancelled");
                    current
                });
            options = options.name(seat, name);
        }

        let current = self.board.size();
        let size = prompter.board_size(current).unwrap_or_else(|| {
            debug!("Size prompt cancelled");
            current
        });

        self.reset(options.size(size))
    }

    /// Asks whether to play again and resets if the answer is yes.
    #[instrument(skip_all)]
    pub fn offer_restart(&mut self, prompter: &mut dyn Prompter) -> Option<StartReport> {
        match prompter.confirm_restart() {
            Some(true) => Some(self.reset(StartOptions::default())),
            answer => {
                debug!(?answer, "Restart declined");
                None
            }
        }
    }

    /// Lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns true once a player has won.
    pub fn is_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    /// The board.
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Current configuration, including overrides from the last start.
    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// The player in `seat`.
    pub fn player(&self, seat: PlayerId) -> &Player {
        &self.players[seat.index()]
    }

    /// The connectivity graph of `seat`.
    pub fn graph(&self, seat: PlayerId) -> &ConnectivityGraph {
        &self.graphs[seat.index()]
    }

    /// Seat to move.
    pub fn current_player(&self) -> PlayerId {
        self.current
    }

    /// Winner, once the game is over.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    /// Moves of the current game.
    pub fn history(&self) -> &[Move] {
        &self.history
    }

    /// The seat that connects along `axis`.
    pub fn seat_with_axis(&self, axis: Axis) -> PlayerId {
        PlayerId::ALL
            .into_iter()
            .find(|seat| *self.players[seat.index()].axis() == axis)
            .unwrap_or(PlayerId::First)
    }

    /// Unowned cells while the game is in progress.
    pub fn legal_moves(&self) -> Vec<Coord> {
        if self.phase == Phase::InProgress {
            self.board.empty_cells().collect()
        } else {
            Vec::new()
        }
    }

    /// Copies out the observable state.
    pub fn snapshot(&self) -> Snapshot {
        let sizes = |seat: PlayerId| {
            let graph = self.graph(seat);
            (graph.vertex_count(), graph.edge_count())
        };
        Snapshot {
            phase: self.phase,
            current: self.current,
            winner: self.winner,
            board: self.board.clone(),
            history: self.history.clone(),
            graphs: [sizes(PlayerId::First), sizes(PlayerId::Second)],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Color;
    use std::collections::VecDeque;
    use std::sync::{Arc, Mutex};

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum Event {
        Claimed(Coord, Color),
        Won(PlayerId),
        Reset(usize),
    }

    #[derive(Clone, Default)]
    struct Recorder(Arc<Mutex<Vec<Event>>>);

    impl Recorder {
        fn events(&self) -> Vec<Event> {
            self.0.lock().unwrap().clone()
        }
    }

    impl Renderer for Recorder {
        fn tile_claimed(&mut self, coord: Coord, color: Color) {
            self.0.lock().unwrap().push(Event::Claimed(coord, color));
        }

        fn game_won(&mut self, winner: PlayerId, _player: &Player) {
            self.0.lock().unwrap().push(Event::Won(winner));
        }

        fn board_reset(&mut self, size: usize) {
            self.0.lock().unwrap().push(Event::Reset(size));
        }
    }

    #[derive(Default)]
    struct Scripted {
        restart: VecDeque<Option<bool>>,
        names: VecDeque<Option<String>>,
        sizes: VecDeque<Option<usize>>,
    }

    impl Prompter for Scripted {
        fn confirm_restart(&mut self) -> Option<bool> {
            self.restart.pop_front().flatten()
        }

        fn player_name(&mut self, _seat: PlayerId, _default: &str) -> Option<String> {
            self.names.pop_front().flatten()
        }

        fn board_size(&mut self, _default: usize) -> Option<usize> {
            self.sizes.pop_front().flatten()
        }
    }

    fn started(size: usize) -> GameSession {
        let mut session = GameSession::new(SessionConfig::default());
        session.start(StartOptions::default().size(size));
        session
    }

    #[test]
    fn test_new_session_is_in_setup() {
        let mut session = GameSession::new(SessionConfig::default());
        assert_eq!(session.phase(), Phase::Setup);
        assert_eq!(session.board().size(), 11);
        assert_eq!(
            session.apply_move(0, 0),
            Err(HexError::NotInProgress(Phase::Setup))
        );
        assert!(session.legal_moves().is_empty());
    }

    #[test]
    fn test_row_player_moves_first() {
        let session = started(5);
        assert_eq!(session.current_player(), PlayerId::First);
        assert_eq!(*session.player(PlayerId::First).axis(), Axis::Row);
        assert_eq!(*session.player(PlayerId::Second).axis(), Axis::Col);
    }

    #[test]
    fn test_turn_parity() {
        let mut session = started(6);
        let cells = [(0, 0), (5, 5), (0, 2), (5, 3), (0, 4), (5, 1), (2, 2)];
        for (k, (row, col)) in cells.into_iter().enumerate() {
            session.apply_move(row, col).unwrap();
            let expected = if (k + 1) % 2 == 0 {
                PlayerId::First
            } else {
                PlayerId::Second
            };
            assert_eq!(session.current_player(), expected, "after {} moves", k + 1);
        }
    }

    #[test]
    fn test_illegal_move_changes_nothing() {
        let mut session = started(5);
        session.apply_move(2, 2).unwrap();
        let before = session.snapshot();

        assert_eq!(
            session.apply_move(2, 2),
            Err(HexError::IllegalMove(Coord::new(2, 2)))
        );
        assert_eq!(session.snapshot(), before);
        assert_eq!(session.board().owner(Coord::new(2, 2)), Some(PlayerId::First));
    }

    #[test]
    fn test_out_of_bounds_changes_nothing() {
        let mut session = started(5);
        let before = session.snapshot();
        for (row, col) in [(-1, 0), (0, -1), (5, 0), (0, 5), (i64::MAX, 0)] {
            assert_eq!(
                session.apply_move(row, col),
                Err(HexError::NotFound { row, col })
            );
        }
        assert_eq!(session.snapshot(), before);
    }

    #[test]
    fn test_graph_links_only_own_neighbors() {
        let mut session = started(4);
        session.apply_move(1, 1).unwrap(); // first
        session.apply_move(1, 2).unwrap(); // second, adjacent to (1, 1)
        session.apply_move(2, 1).unwrap(); // first, adjacent to (1, 1) and (1, 2)

        let first = session.graph(PlayerId::First);
        assert_eq!(first.vertex_count(), 2);
        assert_eq!(first.edge_count(), 1);
        assert!(first.path_exists(Coord::new(1, 1), Coord::new(2, 1)));
        assert!(!first.contains(Coord::new(1, 2)));

        let second = session.graph(PlayerId::Second);
        assert_eq!(second.vertex_count(), 1);
        assert_eq!(second.edge_count(), 0);
    }

    #[test]
    fn test_win_ends_game_and_blocks_moves() {
        let mut session = started(4);
        // Second plays column 3, out of the way.
        let moves = [(0, 0), (0, 3), (1, 0), (1, 3), (2, 0), (2, 3), (3, 0)];
        let mut last = None;
        for (row, col) in moves {
            last = Some(session.apply_move(row, col).unwrap());
        }

        let outcome = last.unwrap();
        assert_eq!(outcome.winner(), Some(PlayerId::First));
        assert_eq!(session.phase(), Phase::GameOver);
        assert_eq!(session.winner(), Some(PlayerId::First));

        let before = session.snapshot();
        assert_eq!(
            session.apply_move(3, 3),
            Err(HexError::NotInProgress(Phase::GameOver))
        );
        assert_eq!(session.snapshot(), before);
        assert!(session.legal_moves().is_empty());
    }

    #[test]
    fn test_reset_rebuilds_everything() {
        let mut session = started(4);
        session.apply_move(0, 0).unwrap();
        session.apply_move(1, 1).unwrap();
        let old_generation = session.board().generation();

        let report = session.reset(StartOptions::default().size(6));
        assert_eq!(report.size.get(), 6);
        assert_eq!(report.rejected, None);
        assert_eq!(report.generation, old_generation + 1);
        assert_eq!(session.board().tiles().len(), 36);
        assert_eq!(session.board().claimed_count(), 0);
        assert!(session.graph(PlayerId::First).is_empty());
        assert!(session.graph(PlayerId::Second).is_empty());
        assert!(session.history().is_empty());
        assert_eq!(session.phase(), Phase::InProgress);
        assert_eq!(session.current_player(), PlayerId::First);
    }

    #[test]
    fn test_reset_keeps_previous_configuration() {
        let mut session = started(7);
        session.reset(StartOptions::default().names("Ada", "Bo"));
        assert_eq!(session.board().size(), 7);
        session.reset(StartOptions::default());
        assert_eq!(session.board().size(), 7);
        assert_eq!(session.player(PlayerId::First).name(), "Ada");
        assert_eq!(session.player(PlayerId::Second).name(), "Bo");
    }

    #[test]
    fn test_bad_size_falls_back_to_default() {
        let mut session = started(7);
        let report = session.start(StartOptions::default().size(25));
        assert_eq!(report.rejected, Some(HexError::InvalidConfiguration { size: 25 }));
        assert_eq!(report.size, BoardSize::DEFAULT);
        assert_eq!(session.board().size(), 11);
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn test_renderer_notifications() {
        let recorder = Recorder::default();
        let mut session = GameSession::new(SessionConfig::default()).with_renderer(recorder.clone());
        session.start(StartOptions::default().size(4));
        for (row, col) in [(0, 1), (0, 0), (1, 1), (1, 0), (2, 1), (2, 0), (3, 1)] {
            session.apply_move(row, col).unwrap();
        }
        let _ = session.apply_move(3, 3);

        let events = recorder.events();
        assert_eq!(events.first(), Some(&Event::Reset(4)));
        assert_eq!(events[1], Event::Claimed(Coord::new(0, 1), Color::RED));
        assert_eq!(events[2], Event::Claimed(Coord::new(0, 0), Color::BLUE));
        assert_eq!(events.last(), Some(&Event::Won(PlayerId::First)));
        assert_eq!(events.len(), 1 + 7 + 1);
    }

    #[test]
    fn test_configure_with_answers() {
        let mut session = GameSession::new(SessionConfig::default());
        let mut prompter = Scripted {
            names: VecDeque::from([Some("Ada".to_string()), Some("  ".to_string())]),
            sizes: VecDeque::from([Some(8)]),
            ..Default::default()
        };
        let report = session.configure_with(&mut prompter);
        assert_eq!(report.size.get(), 8);
        assert_eq!(session.player(PlayerId::First).name(), "Ada");
        assert_eq!(session.player(PlayerId::Second).name(), "Player 2");
        assert_eq!(session.phase(), Phase::InProgress);
    }

    #[test]
    fn test_configure_with_cancellations_keep_current_values() {
        let mut session = GameSession::new(SessionConfig::default());
        session.start(StartOptions::default().size(7).names("Ada", "Bo"));
        session.apply_move(3, 3).unwrap();

        let mut prompter = Scripted::default();
        let report = session.configure_with(&mut prompter);

        assert_eq!(report.rejected, None);
        assert_eq!(report.size.get(), 7);
        assert_eq!(session.board().size(), 7);
        assert_eq!(session.player(PlayerId::First).name(), "Ada");
        assert_eq!(session.player(PlayerId::Second).name(), "Bo");
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_configure_with_offers_current_defaults() {
        #[derive(Default)]
        struct Echo {
            seen: Vec<String>,
        }

        impl Prompter for Echo {
            fn confirm_restart(&mut self) -> Option<bool> {
                None
            }

            fn player_name(&mut self, _seat: PlayerId, default: &str) -> Option<String> {
                self.seen.push(default.to_string());
                None
            }

            fn board_size(&mut self, default: usize) -> Option<usize> {
                self.seen.push(default.to_string());
                None
            }
        }

        let mut session = GameSession::new(SessionConfig::default());
        session.start(StartOptions::default().size(5).name(PlayerId::Second, "Bo"));
        let mut prompter = Echo::default();
        session.configure_with(&mut prompter);
        assert_eq!(prompter.seen, ["Player 1", "Bo", "5"]);
    }

    #[test]
    fn test_offer_restart() {
        let mut session = started(4);
        session.apply_move(0, 0).unwrap();

        let mut prompter = Scripted {
            restart: VecDeque::from([None, Some(false), Some(true)]),
            ..Default::default()
        };
        assert!(session.offer_restart(&mut prompter).is_none());
        assert!(session.offer_restart(&mut prompter).is_none());
        assert_eq!(session.history().len(), 1);

        let report = session.offer_restart(&mut prompter).unwrap();
        assert_eq!(report.size.get(), 4);
        assert!(session.history().is_empty());
    }

    #[test]
    fn test_snapshot_serializes() {
        let mut session = started(4);
        session.apply_move(0, 0).unwrap();
        let json = serde_json::to_value(session.snapshot()).unwrap();
        assert_eq!(json["phase"], "InProgress");
        assert_eq!(json["history"][0]["coord"]["row"], 0);
        assert_eq!(json["graphs"][0][0], 1);
    }
}
