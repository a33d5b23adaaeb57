//! Playfield representation, collision detection and line clearing

use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::tetromino::{PieceType, Shape, Tetromino};

/// Standard playfield dimensions
pub const VISIBLE_ROWS: usize = 20;
pub const COLUMNS: usize = 10;
/// Hidden rows above the visible area used for spawning and rotation overflow
pub const SPAWN_BUFFER: usize = 3;
/// SRS centering offset applied to both axes of every piece matrix
pub const CENTER_OFFSET: i32 = 1;

/// A cell on the board - either empty or occupied by a locked block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    Filled(PieceType),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Cell::Filled(_))
    }
}

/// Unit translation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Left,
    Right,
    Down,
    Up,
}

impl Direction {
    /// (row, col) delta; rows grow downward
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
            Direction::Down => (1, 0),
            Direction::Up => (-1, 0),
        }
    }
}

/// The playfield
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Playfield {
    visible_rows: usize,
    columns: usize,
    /// Grid stored as [row][col], row 0 is the top of the spawn buffer
    cells: Vec<Vec<Cell>>,
}

impl Default for Playfield {
    fn default() -> Self {
        Self::new()
    }
}

impl Playfield {
    /// Create a new empty 20 × 10 playfield (plus spawn buffer)
    pub fn new() -> Self {
        Self::with_size(VISIBLE_ROWS, COLUMNS)
    }

    /// Create a new empty playfield with the given visible size.
    ///
    /// Anything smaller than 4 × 4 could never move or rotate an I piece.
    pub fn with_size(visible_rows: usize, columns: usize) -> Self {
        assert!(
            visible_rows >= 4 && columns >= 4,
            "playfield must be at least 4x4, got {visible_rows}x{columns}"
        );
        Self {
            visible_rows,
            columns,
            cells: vec![vec![Cell::Empty; columns]; visible_rows + SPAWN_BUFFER],
        }
    }

    pub fn visible_rows(&self) -> usize {
        self.visible_rows
    }

    pub fn columns(&self) -> usize {
        self.columns
    }

    /// Visible rows plus the spawn buffer
    pub fn total_rows(&self) -> usize {
        self.visible_rows + SPAWN_BUFFER
    }

    /// Anchor where new pieces appear: bottom row of the spawn buffer,
    /// horizontally centred
    pub fn spawn_position(&self) -> (i32, i32) {
        (SPAWN_BUFFER as i32, self.columns as i32 / 2 - 1)
    }

    /// Get the cell at a position (row, col)
    /// Returns None if out of bounds
    pub fn get(&self, row: i32, col: i32) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        self.cells
            .get(row as usize)
            .and_then(|cells| cells.get(col as usize))
            .copied()
    }

    /// Set a cell at a position
    /// Returns false if out of bounds
    pub fn set(&mut self, row: i32, col: i32, cell: Cell) -> bool {
        if row < 0 || col < 0 {
            return false;
        }
        match self
            .cells
            .get_mut(row as usize)
            .and_then(|cells| cells.get_mut(col as usize))
        {
            Some(slot) => {
                *slot = cell;
                true
            }
            None => false,
        }
    }

    /// Check whether `shape` anchored at (row, col) fits: every filled cell
    /// inside the board and on an empty cell
    pub fn can_place(&self, row: i32, col: i32, shape: &Shape) -> bool {
        shape.filled_cells().all(|(i, j)| {
            let board_row = row + i as i32 - CENTER_OFFSET;
            let board_col = col + j as i32 - CENTER_OFFSET;
            self.get(board_row, board_col)
                .is_some_and(|cell| cell.is_empty())
        })
    }

    /// Move the piece one cell in `direction` if it fits.
    /// Returns false and leaves the piece untouched otherwise.
    pub fn try_translate(&self, piece: &mut Tetromino, direction: Direction) -> bool {
        let (dr, dc) = direction.delta();
        if self.can_place(piece.row() + dr, piece.col() + dc, piece.shape()) {
            piece.shift(dr, dc);
            true
        } else {
            false
        }
    }

    /// Lock a piece onto the board at its current position.
    ///
    /// The caller decides when a piece has settled (a failed `Down` translate).
    pub fn attach(&mut self, piece: &Tetromino) {
        debug_assert!(
            self.can_place(piece.row(), piece.col(), piece.shape()),
            "attaching a piece that overlaps the board: {:?}",
            piece
        );
        let cell = Cell::Filled(piece.piece_type());
        for (i, j) in piece.shape().filled_cells() {
            let board_row = (piece.row() + i as i32 - CENTER_OFFSET) as usize;
            let board_col = (piece.col() + j as i32 - CENTER_OFFSET) as usize;
            self.cells[board_row][board_col] = cell;
        }
        debug!(
            piece = ?piece.piece_type(),
            row = piece.row(),
            col = piece.col(),
            "piece attached"
        );
    }

    /// Whether any spawn buffer cell is occupied (game over signal)
    pub fn is_overfilled(&self) -> bool {
        self.cells[..SPAWN_BUFFER]
            .iter()
            .any(|row| row.iter().any(|cell| cell.is_filled()))
    }

    /// Find the lowest full row, clear it and shift everything above it down
    /// by one. Returns the cleared row index, or None if no row is full.
    ///
    /// Only one row is consumed per call; call again until it returns None.
    pub fn consume_full_row(&mut self) -> Option<usize> {
        let row = (0..self.total_rows())
            .rev()
            .find(|&row| self.is_line_full(row))?;

        // Rows above shift down, the top row comes back empty
        self.cells.remove(row);
        self.cells.insert(0, vec![Cell::Empty; self.columns]);

        debug!(row, "row consumed");
        Some(row)
    }

    /// Consume full rows until none is left; returns the cleared indices in
    /// the order they were consumed
    pub fn consume_all_full_rows(&mut self) -> Vec<usize> {
        std::iter::from_fn(|| self.consume_full_row()).collect()
    }

    /// Check if a line is completely filled
    fn is_line_full(&self, row: usize) -> bool {
        self.cells[row].iter().all(|cell| cell.is_filled())
    }

    /// Check if the board is completely empty
    pub fn is_empty(&self) -> bool {
        self.cells
            .iter()
            .all(|row| row.iter().all(|cell| cell.is_empty()))
    }

    /// Number of occupied cells
    pub fn filled_count(&self) -> usize {
        self.cells
            .iter()
            .map(|row| row.iter().filter(|cell| cell.is_filled()).count())
            .sum()
    }

    /// Iterator over visible rows (top to bottom) with their board index
    pub fn visible(&self) -> impl Iterator<Item = (usize, &[Cell])> {
        self.cells
            .iter()
            .enumerate()
            .skip(SPAWN_BUFFER)
            .map(|(idx, row)| (idx, row.as_slice()))
    }

    /// Empty every cell
    pub fn reset(&mut self) {
        for row in &mut self.cells {
            row.fill(Cell::Empty);
        }
    }

    /// Serializable text dump of the board, one string per row
    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            visible_rows: self.visible_rows,
            columns: self.columns,
            spawn_buffer: SPAWN_BUFFER,
            rows: self.cells.iter().map(|row| row_text(row)).collect(),
        }
    }
}

fn row_text(row: &[Cell]) -> String {
    row.iter()
        .map(|cell| match cell {
            Cell::Empty => '.',
            Cell::Filled(piece) => piece.letter(),
        })
        .collect()
}

impl fmt::Display for Playfield {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (idx, row) in self.cells.iter().enumerate() {
            if idx == SPAWN_BUFFER {
                writeln!(f, "{}", "-".repeat(self.columns))?;
            }
            writeln!(f, "{}", row_text(row))?;
        }
        Ok(())
    }
}

/// Board state as plain text rows, top of the spawn buffer first
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub visible_rows: usize,
    pub columns: usize,
    pub spawn_buffer: usize,
    pub rows: Vec<String>,
}
