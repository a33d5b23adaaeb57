//! Tetromino definitions
//!
//! A piece is a type, an orientation, an occupancy matrix and an anchor
//! position on the playfield. Shapes follow the SRS (Super Rotation System)
//! bounding boxes.

use serde::{Deserialize, Serialize};

use crate::shapes;

/// The 7 tetromino types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PieceType {
    I, // long bar
    J,
    L,
    O, // square, never rotates
    S,
    T,
    Z,
}

impl PieceType {
    /// Get all tetromino types for bag randomization
    pub fn all() -> [PieceType; 7] {
        [
            PieceType::I,
            PieceType::J,
            PieceType::L,
            PieceType::O,
            PieceType::S,
            PieceType::T,
            PieceType::Z,
        ]
    }

    /// Single-letter name, used by the board text dump
    pub fn letter(&self) -> char {
        match self {
            PieceType::I => 'I',
            PieceType::J => 'J',
            PieceType::L => 'L',
            PieceType::O => 'O',
            PieceType::S => 'S',
            PieceType::T => 'T',
            PieceType::Z => 'Z',
        }
    }
}

/// Orientation states, cyclic. `Up` is the spawn state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Orientation {
    #[default]
    Up,
    Right,
    Down,
    Left,
}

impl Orientation {
    /// Ordinal 0..=3
    pub fn index(&self) -> u8 {
        match self {
            Orientation::Up => 0,
            Orientation::Right => 1,
            Orientation::Down => 2,
            Orientation::Left => 3,
        }
    }

    /// Rotate clockwise: Up → Right → Down → Left → Up
    pub fn cw(&self) -> Orientation {
        match self {
            Orientation::Up => Orientation::Right,
            Orientation::Right => Orientation::Down,
            Orientation::Down => Orientation::Left,
            Orientation::Left => Orientation::Up,
        }
    }

    /// Rotate counter-clockwise: Up → Left → Down → Right → Up
    pub fn ccw(&self) -> Orientation {
        match self {
            Orientation::Up => Orientation::Left,
            Orientation::Left => Orientation::Down,
            Orientation::Down => Orientation::Right,
            Orientation::Right => Orientation::Up,
        }
    }

    pub fn rotated(&self, direction: RotationDirection) -> Orientation {
        match direction {
            RotationDirection::Clockwise => self.cw(),
            RotationDirection::CounterClockwise => self.ccw(),
        }
    }
}

/// Direction for rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RotationDirection {
    Clockwise,
    CounterClockwise,
}

/// Occupancy matrix of a piece, stored row-major.
///
/// 3×3 for J/L/S/T/Z, 4×4 for I, 3×4 for O. A rotation always produces a new
/// `Shape`; nothing mutates one in place after construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Shape {
    rows: usize,
    cols: usize,
    cells: Vec<bool>,
}

impl Shape {
    /// Build a shape from a list of filled (row, col) cells
    pub fn from_cells(rows: usize, cols: usize, filled: &[(usize, usize)]) -> Self {
        let mut cells = vec![false; rows * cols];
        for &(row, col) in filled {
            cells[row * cols + col] = true;
        }
        Self { rows, cols, cells }
    }

    pub(crate) fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: vec![false; rows * cols],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn is_square(&self) -> bool {
        self.rows == self.cols
    }

    /// Whether the cell at (row, col) is filled
    pub fn get(&self, row: usize, col: usize) -> bool {
        self.cells[row * self.cols + col]
    }

    pub(crate) fn set(&mut self, row: usize, col: usize, filled: bool) {
        self.cells[row * self.cols + col] = filled;
    }

    /// Iterate over the filled (row, col) cells, row-major
    pub fn filled_cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &filled)| filled)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }
}

/// An active piece
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tetromino {
    piece_type: PieceType,
    orientation: Orientation,
    shape: Shape,
    /// Anchor position in playfield coordinates (row grows downward)
    row: i32,
    col: i32,
}

impl Tetromino {
    /// Create a piece of the given type in spawn orientation at (row, col)
    pub fn new(piece_type: PieceType, row: i32, col: i32) -> Self {
        Self {
            piece_type,
            orientation: Orientation::Up,
            shape: shapes::shape_for(piece_type),
            row,
            col,
        }
    }

    pub fn piece_type(&self) -> PieceType {
        self.piece_type
    }

    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn row(&self) -> i32 {
        self.row
    }

    pub fn col(&self) -> i32 {
        self.col
    }

    pub fn position(&self) -> (i32, i32) {
        (self.row, self.col)
    }

    pub(crate) fn shift(&mut self, row_delta: i32, col_delta: i32) {
        self.row += row_delta;
        self.col += col_delta;
    }

    /// Replace orientation, matrix and position in one step
    pub(crate) fn apply_rotation(
        &mut self,
        orientation: Orientation,
        shape: Shape,
        row_offset: i32,
        col_offset: i32,
    ) {
        debug_assert_eq!(shape.rows(), self.shape.rows());
        debug_assert_eq!(shape.cols(), self.shape.cols());
        self.orientation = orientation;
        self.shape = shape;
        self.shift(row_offset, col_offset);
    }
}
