pub mod board;
pub mod error;
pub mod stone;

/// A board coordinate `(x, y)`, 1-indexed: `x` in `1..=rows`, `y` in `1..=cols`.
pub type Point = (u8, u8);

/// Largest board dimension the tile addressing scheme can express.
pub const MAX_DIMENSION: u8 = 15;

pub use board::{Board, Outcome, StoneCounts, StoneState};
pub use error::BoardError;
pub use stone::{Color, Direction, Emotion, Stone};
