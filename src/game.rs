//! Game session: one playfield, one active piece and the piece bag
//!
//! The session owns all mutable state. Timing is the caller's business: it
//! calls [`Session::tick`] at whatever cadence it wants automatic descent to
//! run, and [`Session::apply`] for player commands.

use tracing::{debug, info};

use crate::bag::Bag;
use crate::board::{Direction, Playfield};
use crate::settings::Settings;
use crate::srs::{attempt_rotate, KickResult};
use crate::tetromino::{PieceType, RotationDirection, Tetromino};

/// Session state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Playing,
    GameOver,
}

/// Commands the session can process
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    RotateCw,
    RotateCcw,
}

/// What a command or tick did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Active piece translated
    Moved,
    /// Active piece rotated with the given kick
    Rotated(KickResult),
    /// Move or rotation did not fit; nothing changed
    Blocked,
    /// Piece attached; indices of the rows consumed, in consumption order
    Locked { rows_cleared: Vec<usize> },
    /// The session just ended (overfilled board or blocked spawn)
    GameOver,
    /// Session is already over
    Ignored,
}

/// A game session
#[derive(Debug, Clone)]
pub struct Session {
    board: Playfield,
    current: Tetromino,
    bag: Bag,
    state: SessionState,
    /// Total rows consumed
    lines: u32,
    /// Pieces attached to the board
    pieces_locked: u32,
}

impl Session {
    /// New session on a default playfield with a random bag
    pub fn new() -> Self {
        Self::with_parts(Playfield::new(), Bag::new())
    }

    /// New session on a default playfield with a seeded bag
    pub fn with_seed(seed: u64) -> Self {
        Self::with_parts(Playfield::new(), Bag::with_seed(seed))
    }

    /// New session sized and seeded from settings
    pub fn from_settings(settings: &Settings) -> Self {
        let board = Playfield::with_size(settings.board.visible_rows, settings.board.columns);
        let bag = match settings.randomizer.seed {
            Some(seed) => Bag::with_seed(seed),
            None => Bag::new(),
        };
        Self::with_parts(board, bag)
    }

    /// New session from an explicit board and bag; spawns the first piece
    pub fn with_parts(board: Playfield, mut bag: Bag) -> Self {
        let (row, col) = board.spawn_position();
        let current = Tetromino::new(bag.next(), row, col);
        info!(
            seed = bag.seed(),
            rows = board.visible_rows(),
            columns = board.columns(),
            "new game"
        );
        let mut session = Self {
            board,
            current,
            bag,
            state: SessionState::Playing,
            lines: 0,
            pieces_locked: 0,
        };
        session.check_spawn();
        session
    }

    pub fn board(&self) -> &Playfield {
        &self.board
    }

    /// The active piece
    pub fn current(&self) -> &Tetromino {
        &self.current
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_over(&self) -> bool {
        self.state == SessionState::GameOver
    }

    pub fn lines(&self) -> u32 {
        self.lines
    }

    pub fn pieces_locked(&self) -> u32 {
        self.pieces_locked
    }

    /// Preview of upcoming pieces
    pub fn preview(&mut self, count: usize) -> Vec<PieceType> {
        self.bag.preview(count)
    }

    /// Replace the active piece with a fresh one at the spawn position.
    /// `None` draws from the bag. A spawn that does not fit ends the session.
    pub fn spawn_piece(&mut self, piece_type: Option<PieceType>) -> &Tetromino {
        let piece_type = piece_type.unwrap_or_else(|| self.bag.next());
        let (row, col) = self.board.spawn_position();
        self.current = Tetromino::new(piece_type, row, col);
        self.check_spawn();
        &self.current
    }

    /// Process a player command
    pub fn apply(&mut self, command: Command) -> Outcome {
        if self.is_over() {
            return Outcome::Ignored;
        }

        match command {
            Command::MoveLeft => self.translate(Direction::Left),
            Command::MoveRight => self.translate(Direction::Right),
            Command::SoftDrop => self.translate(Direction::Down),
            Command::HardDrop => {
                while self.board.try_translate(&mut self.current, Direction::Down) {}
                self.lock_piece()
            }
            Command::RotateCw => self.rotate(RotationDirection::Clockwise),
            Command::RotateCcw => self.rotate(RotationDirection::CounterClockwise),
        }
    }

    /// One automatic-descent step: move down, or lock if the piece has settled
    pub fn tick(&mut self) -> Outcome {
        if self.is_over() {
            return Outcome::Ignored;
        }

        if self.board.try_translate(&mut self.current, Direction::Down) {
            Outcome::Moved
        } else {
            self.lock_piece()
        }
    }

    /// Row the active piece would land on if dropped
    pub fn ghost_row(&self) -> i32 {
        let mut ghost = self.current.clone();
        while self.board.try_translate(&mut ghost, Direction::Down) {}
        ghost.row()
    }

    fn translate(&mut self, direction: Direction) -> Outcome {
        if self.board.try_translate(&mut self.current, direction) {
            Outcome::Moved
        } else {
            Outcome::Blocked
        }
    }

    fn rotate(&mut self, direction: RotationDirection) -> Outcome {
        let kick = attempt_rotate(&self.board, &mut self.current, direction);
        if kick.succeeded {
            Outcome::Rotated(kick)
        } else {
            Outcome::Blocked
        }
    }

    /// Attach the active piece, consume full rows and spawn the next piece
    fn lock_piece(&mut self) -> Outcome {
        self.board.attach(&self.current);
        self.pieces_locked += 1;

        let rows_cleared = self.board.consume_all_full_rows();
        self.lines += rows_cleared.len() as u32;
        if !rows_cleared.is_empty() {
            debug!(count = rows_cleared.len(), total = self.lines, "rows cleared");
        }

        if self.board.is_overfilled() {
            self.end("spawn buffer occupied");
            return Outcome::GameOver;
        }

        self.spawn_piece(None);
        if self.is_over() {
            return Outcome::GameOver;
        }

        Outcome::Locked { rows_cleared }
    }

    fn check_spawn(&mut self) {
        let piece = &self.current;
        if !self.board.can_place(piece.row(), piece.col(), piece.shape()) {
            self.end("spawn blocked");
        }
    }

    fn end(&mut self, reason: &str) {
        self.state = SessionState::GameOver;
        info!(
            reason,
            lines = self.lines,
            pieces = self.pieces_locked,
            "game over"
        );
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}
