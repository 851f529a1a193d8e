use std::fmt;

use crate::Point;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    OutOfBounds(Point),
    OccupiedCell(Point),
    EmptyCell(Point),
    InvalidAttribute(String),
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoardError::OutOfBounds((x, y)) => write!(f, "position ({x}, {y}) is out of bounds"),
            BoardError::OccupiedCell((x, y)) => {
                write!(f, "position ({x}, {y}) already has a stone")
            }
            BoardError::EmptyCell((x, y)) => write!(f, "no stone at position ({x}, {y})"),
            BoardError::InvalidAttribute(msg) => write!(f, "invalid attribute: {msg}"),
        }
    }
}

impl std::error::Error for BoardError {}
