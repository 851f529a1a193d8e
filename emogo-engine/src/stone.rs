use serde::Serialize;
use serde_repr::{Deserialize_repr, Serialize_repr};
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;

use crate::error::BoardError;

/// Wire value reported for a cell with no stone.
pub const NO_STONE: u8 = 0x00;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Color {
    Black = 0x01,
    White = 0x02,
}

impl Color {
    pub fn to_int(self) -> u8 {
        self as u8
    }

    pub fn opp(self) -> Self {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Wire value for an optional color; empty cells report [`NO_STONE`].
    pub fn code(color: Option<Color>) -> u8 {
        color.map_or(NO_STONE, Color::to_int)
    }
}

impl TryFrom<u8> for Color {
    type Error = BoardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0x01 => Ok(Color::Black),
            0x02 => Ok(Color::White),
            _ => Err(BoardError::InvalidAttribute(format!("color {v}"))),
        }
    }
}

impl FromStr for Color {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "white" => Ok(Color::White),
            _ => Err(BoardError::InvalidAttribute(format!("color {s}"))),
        }
    }
}

impl Neg for Color {
    type Output = Self;

    fn neg(self) -> Self {
        self.opp()
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "Black"),
            Color::White => write!(f, "White"),
        }
    }
}

/// Physical facing of a tile, carried as a bearing in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u16)]
pub enum Direction {
    West = 0,
    #[default]
    North = 90,
    East = 180,
    South = 270,
}

impl Direction {
    pub fn to_int(self) -> u16 {
        self as u16
    }
}

impl TryFrom<u16> for Direction {
    type Error = BoardError;

    fn try_from(v: u16) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Direction::West),
            90 => Ok(Direction::North),
            180 => Ok(Direction::East),
            270 => Ok(Direction::South),
            _ => Err(BoardError::InvalidAttribute(format!("direction {v}"))),
        }
    }
}

impl FromStr for Direction {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "north" => Ok(Direction::North),
            "east" => Ok(Direction::East),
            "south" => Ok(Direction::South),
            "west" => Ok(Direction::West),
            _ => Err(BoardError::InvalidAttribute(format!("direction {s}"))),
        }
    }
}

/// Liberty-derived mood of a stone.
///
/// `Offensive` is representable on the wire but never assigned by the
/// liberty pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize_repr, Deserialize_repr)]
#[repr(u8)]
pub enum Emotion {
    Dead = 0,
    Defensive = 1,
    #[default]
    Normal = 2,
    Offensive = 3,
}

impl Emotion {
    pub fn to_int(self) -> u8 {
        self as u8
    }

    /// Classification of a group by its distinct liberty count.
    pub fn from_liberties(count: usize) -> Self {
        match count {
            0 => Emotion::Dead,
            1 => Emotion::Defensive,
            _ => Emotion::Normal,
        }
    }

    pub fn is_dead(self) -> bool {
        self == Emotion::Dead
    }
}

impl TryFrom<u8> for Emotion {
    type Error = BoardError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Emotion::Dead),
            1 => Ok(Emotion::Defensive),
            2 => Ok(Emotion::Normal),
            3 => Ok(Emotion::Offensive),
            _ => Err(BoardError::InvalidAttribute(format!("emotion {v}"))),
        }
    }
}

impl FromStr for Emotion {
    type Err = BoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dead" => Ok(Emotion::Dead),
            "defensive" => Ok(Emotion::Defensive),
            "normal" => Ok(Emotion::Normal),
            "offensive" => Ok(Emotion::Offensive),
            _ => Err(BoardError::InvalidAttribute(format!("emotion {s}"))),
        }
    }
}

/// One occupied cell. The color is fixed at construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stone {
    color: Color,
    direction: Direction,
    emotion: Emotion,
}

impl Stone {
    pub fn new(color: Color) -> Self {
        Stone {
            color,
            direction: Direction::default(),
            emotion: Emotion::default(),
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    pub fn emotion(&self) -> Emotion {
        self.emotion
    }

    pub fn set_direction(&mut self, direction: Direction) {
        self.direction = direction;
    }

    pub fn set_emotion(&mut self, emotion: Emotion) {
        self.emotion = emotion;
    }

    pub fn is_dead(&self) -> bool {
        self.emotion.is_dead()
    }
}
