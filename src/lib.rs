//! Tetromino rules engine
//!
//! Playfield model, piece representation, collision testing, SRS wall kicks
//! and line clearing. Rendering, timing and input policy belong to the caller:
//! it owns a [`Session`] (or a [`Playfield`] and a [`Tetromino`] directly),
//! issues commands and reacts to the returned outcomes.

pub mod bag;
pub mod board;
pub mod game;
pub mod settings;
pub mod shapes;
pub mod srs;
pub mod tetromino;

pub use bag::Bag;
pub use board::{Cell, Direction, Playfield};
pub use game::{Command, Outcome, Session, SessionState};
pub use settings::Settings;
pub use shapes::{rotate_matrix, shape_for};
pub use srs::{attempt_rotate, KickResult};
pub use tetromino::{Orientation, PieceType, RotationDirection, Shape, Tetromino};
