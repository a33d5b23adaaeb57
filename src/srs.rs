//! Super Rotation System (SRS) wall kick resolution
//!
//! When a rotated matrix collides, SRS tries a fixed list of offsets in
//! order. The first one that fits wins. I pieces use their own table,
//! J/L/S/T/Z share one, O never rotates.

use tracing::trace;

use crate::board::Playfield;
use crate::shapes::rotate_matrix;
use crate::tetromino::{Orientation, PieceType, RotationDirection, Tetromino};

/// Outcome of a rotation attempt
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KickResult {
    pub succeeded: bool,
    pub row_offset: i32,
    pub col_offset: i32,
}

impl KickResult {
    pub const FAILED: KickResult = KickResult {
        succeeded: false,
        row_offset: 0,
        col_offset: 0,
    };
}

/// Get wall kick candidates for a rotation attempt.
/// Returns 5 (col_offset, row_offset) pairs, rows growing downward; the
/// first is always (0, 0).
///
/// O has no kicks and gets five identity entries.
pub fn get_wall_kicks(
    piece_type: PieceType,
    from: Orientation,
    direction: RotationDirection,
) -> [(i32, i32); 5] {
    match piece_type {
        PieceType::O => [(0, 0); 5],
        PieceType::I => i_piece_kicks(from, direction),
        _ => jlstz_kicks(from, direction),
    }
}

/// Wall kicks for J, L, S, T, Z pieces
fn jlstz_kicks(from: Orientation, direction: RotationDirection) -> [(i32, i32); 5] {
    use Orientation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (Up, Clockwise) => [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // R→0
        (Right, CounterClockwise) => [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // R→2
        (Right, Clockwise) => [(0, 0), (1, 0), (1, 1), (0, -2), (1, -2)],
        // 2→R
        (Down, CounterClockwise) => [(0, 0), (-1, 0), (-1, -1), (0, 2), (-1, 2)],
        // 2→L
        (Down, Clockwise) => [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
        // L→2
        (Left, CounterClockwise) => [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // L→0
        (Left, Clockwise) => [(0, 0), (-1, 0), (-1, 1), (0, -2), (-1, -2)],
        // 0→L
        (Up, CounterClockwise) => [(0, 0), (1, 0), (1, -1), (0, 2), (1, 2)],
    }
}

/// Wall kicks for the I piece
fn i_piece_kicks(from: Orientation, direction: RotationDirection) -> [(i32, i32); 5] {
    use Orientation::*;
    use RotationDirection::*;

    match (from, direction) {
        // 0→R
        (Up, Clockwise) => [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
        // R→0
        (Right, CounterClockwise) => [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
        // R→2
        (Right, Clockwise) => [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
        // 2→R
        (Down, CounterClockwise) => [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, 1)],
        // 2→L
        (Down, Clockwise) => [(0, 0), (2, 0), (-1, 0), (2, -1), (-1, 2)],
        // L→2
        (Left, CounterClockwise) => [(0, 0), (-2, 0), (1, 0), (-2, 1), (1, -2)],
        // L→0
        (Left, Clockwise) => [(0, 0), (1, 0), (-2, 0), (1, 2), (-2, -1)],
        // 0→L
        (Up, CounterClockwise) => [(0, 0), (-1, 0), (2, 0), (-1, -2), (2, 1)],
    }
}

/// Try to rotate `piece` on `board` using SRS wall kicks.
///
/// On success the new orientation, matrix and kick offset are applied
/// together. On failure (and always for O) the piece is left exactly as it
/// was.
pub fn attempt_rotate(
    board: &Playfield,
    piece: &mut Tetromino,
    direction: RotationDirection,
) -> KickResult {
    if piece.piece_type() == PieceType::O {
        return KickResult::FAILED;
    }

    let rotated = rotate_matrix(piece.shape(), direction);
    let kicks = get_wall_kicks(piece.piece_type(), piece.orientation(), direction);

    let Some((kick_idx, &(col_offset, row_offset))) =
        kicks.iter().enumerate().find(|&(_, &(dc, dr))| {
            board.can_place(piece.row() + dr, piece.col() + dc, &rotated)
        })
    else {
        trace!(piece = ?piece.piece_type(), from = ?piece.orientation(), ?direction, "rotation blocked");
        return KickResult::FAILED;
    };

    trace!(
        piece = ?piece.piece_type(),
        from = ?piece.orientation(),
        ?direction,
        kick_idx,
        col_offset,
        row_offset,
        "rotation kicked"
    );
    piece.apply_rotation(
        piece.orientation().rotated(direction),
        rotated,
        row_offset,
        col_offset,
    );

    KickResult {
        succeeded: true,
        row_offset,
        col_offset,
    }
}
