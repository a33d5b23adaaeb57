//! Shape catalog
//!
//! Canonical SRS spawn shapes and square-matrix rotation. Cells are
//! (row, col) from the top-left of the bounding matrix.

use crate::tetromino::{PieceType, RotationDirection, Shape};

/// Get the SRS spawn shape for a piece type
pub fn shape_for(piece_type: PieceType) -> Shape {
    match piece_type {
        // ....
        // IIII
        // ....
        // ....
        PieceType::I => Shape::from_cells(4, 4, &[(1, 0), (1, 1), (1, 2), (1, 3)]),
        PieceType::J => Shape::from_cells(3, 3, &[(0, 0), (1, 0), (1, 1), (1, 2)]),
        PieceType::L => Shape::from_cells(3, 3, &[(0, 2), (1, 0), (1, 1), (1, 2)]),
        // .OO.
        // .OO.
        // ....
        PieceType::O => Shape::from_cells(3, 4, &[(0, 1), (0, 2), (1, 1), (1, 2)]),
        PieceType::S => Shape::from_cells(3, 3, &[(0, 1), (0, 2), (1, 0), (1, 1)]),
        PieceType::T => Shape::from_cells(3, 3, &[(0, 1), (1, 0), (1, 1), (1, 2)]),
        PieceType::Z => Shape::from_cells(3, 3, &[(0, 0), (0, 1), (1, 1), (1, 2)]),
    }
}

/// Rotate a square matrix by 90 degrees, returning a new matrix.
///
/// Clockwise maps `result[col][n-1-row] = matrix[row][col]`, counter-clockwise
/// maps `result[n-1-col][row] = matrix[row][col]`. The O shape is not square
/// and comes back unchanged.
pub fn rotate_matrix(matrix: &Shape, direction: RotationDirection) -> Shape {
    if !matrix.is_square() {
        return matrix.clone();
    }

    let n = matrix.rows();
    let mut result = Shape::empty(n, n);
    for (row, col) in matrix.filled_cells() {
        match direction {
            RotationDirection::Clockwise => result.set(col, n - 1 - row, true),
            RotationDirection::CounterClockwise => result.set(n - 1 - col, row, true),
        }
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_shape_has_four_blocks() {
        for piece in PieceType::all() {
            assert_eq!(shape_for(piece).filled_cells().count(), 4, "{:?}", piece);
        }
    }

    #[test]
    fn test_bounding_sizes() {
        assert_eq!((shape_for(PieceType::I).rows(), shape_for(PieceType::I).cols()), (4, 4));
        assert_eq!((shape_for(PieceType::O).rows(), shape_for(PieceType::O).cols()), (3, 4));
        for piece in [PieceType::J, PieceType::L, PieceType::S, PieceType::T, PieceType::Z] {
            let shape = shape_for(piece);
            assert_eq!((shape.rows(), shape.cols()), (3, 3));
        }
    }

    #[test]
    fn test_t_clockwise_points_right() {
        // .T.    .T.
        // TTT -> .TT
        // ...    .T.
        let rotated = rotate_matrix(&shape_for(PieceType::T), RotationDirection::Clockwise);
        let expected = Shape::from_cells(3, 3, &[(0, 1), (1, 1), (1, 2), (2, 1)]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_i_clockwise_is_column_two() {
        let rotated = rotate_matrix(&shape_for(PieceType::I), RotationDirection::Clockwise);
        let expected = Shape::from_cells(4, 4, &[(0, 2), (1, 2), (2, 2), (3, 2)]);
        assert_eq!(rotated, expected);
    }

    #[test]
    fn test_ccw_undoes_cw() {
        for piece in PieceType::all() {
            let shape = shape_for(piece);
            let cw = rotate_matrix(&shape, RotationDirection::Clockwise);
            assert_eq!(rotate_matrix(&cw, RotationDirection::CounterClockwise), shape);
        }
    }

    #[test]
    fn test_four_turns_is_identity() {
        for piece in PieceType::all() {
            let shape = shape_for(piece);
            let mut turned = shape.clone();
            for _ in 0..4 {
                turned = rotate_matrix(&turned, RotationDirection::CounterClockwise);
            }
            assert_eq!(turned, shape);
        }
    }

    #[test]
    fn test_rotation_leaves_input_untouched() {
        let shape = shape_for(PieceType::L);
        let before = shape.clone();
        let _ = rotate_matrix(&shape, RotationDirection::Clockwise);
        assert_eq!(shape, before);
    }

    #[test]
    fn test_o_is_not_rotated() {
        let shape = shape_for(PieceType::O);
        assert_eq!(rotate_matrix(&shape, RotationDirection::Clockwise), shape);
    }
}
