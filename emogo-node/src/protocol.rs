//! Tile bus framing.
//!
//! Tiles report events on `0x6XY` and are addressed on `0x4XY`, where `X` and
//! `Y` are the 1-indexed board coordinates packed into one nibble each.
//! `0x1FF` reaches every tile at once.

use std::fmt;
use std::str::FromStr;

use arrayvec::ArrayVec;
use emogo_engine::{Point, StoneState};

pub const TILE_BLOCK_MASK: u16 = 0xF00;
pub const TILE_EVENT_BLOCK: u16 = 0x600;
pub const TILE_STATE_BLOCK: u16 = 0x400;
pub const BROADCAST_ID: u16 = 0x1FF;
/// Largest standard (11-bit) identifier.
pub const MAX_ID: u16 = 0x7FF;
pub const MAX_PAYLOAD: usize = 8;

pub const CMD_STATE_CHANGED: u8 = 0x01;
pub const ACTION_HIGHLIGHT: u8 = 0x02;
pub const ACTION_BROADCAST_BLINK: u8 = 0x03;
pub const LIGHT_ON: u8 = 0xFF;
pub const LIGHT_OFF: u8 = 0x00;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProtocolError {
    UnknownId(u16),
    UnknownAction(u8),
    EmptyPayload,
    Malformed(String),
}

impl fmt::Display for ProtocolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProtocolError::UnknownId(id) => write!(f, "unknown frame id 0x{id:03X}"),
            ProtocolError::UnknownAction(action) => write!(f, "unknown action {action}"),
            ProtocolError::EmptyPayload => write!(f, "empty payload"),
            ProtocolError::Malformed(msg) => write!(f, "malformed frame: {msg}"),
        }
    }
}

impl std::error::Error for ProtocolError {}

/// A single bus frame: an 11-bit identifier and up to eight data bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Frame {
    id: u16,
    data: ArrayVec<u8, MAX_PAYLOAD>,
}

impl Frame {
    pub fn new(id: u16, data: &[u8]) -> Result<Self, ProtocolError> {
        if id > MAX_ID {
            return Err(ProtocolError::Malformed(format!("id 0x{id:X} exceeds 11 bits")));
        }
        let data = ArrayVec::try_from(data).map_err(|_| {
            ProtocolError::Malformed(format!("{} data bytes, at most {MAX_PAYLOAD}", data.len()))
        })?;
        Ok(Frame { id, data })
    }

    pub fn id(&self) -> u16 {
        self.id
    }

    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Identifier addressing the tile at `point`.
    pub fn tile_id((x, y): Point) -> u16 {
        TILE_STATE_BLOCK | (x as u16 & 0x0F) << 4 | (y as u16 & 0x0F)
    }

    /// Push a stone's color, emotion and direction to its tile.
    pub fn state_update(state: &StoneState) -> Self {
        let [direction_high, direction_low] = state.direction.to_int().to_be_bytes();
        Self::fixed(
            Self::tile_id(state.point()),
            [
                CMD_STATE_CHANGED,
                state.color.to_int(),
                state.emotion.to_int(),
                direction_high,
                direction_low,
            ],
        )
    }

    pub fn highlight(point: Point, on: bool) -> Self {
        Self::fixed(Self::tile_id(point), [ACTION_HIGHLIGHT, light(on)])
    }

    pub fn broadcast_blink(on: bool) -> Self {
        Self::fixed(BROADCAST_ID, [ACTION_BROADCAST_BLINK, light(on)])
    }

    fn fixed<const N: usize>(id: u16, bytes: [u8; N]) -> Self {
        Frame {
            id,
            data: bytes.into_iter().take(MAX_PAYLOAD).collect(),
        }
    }
}

fn light(on: bool) -> u8 {
    if on { LIGHT_ON } else { LIGHT_OFF }
}

/// `ID#DATA` with a three-digit hex id and unseparated hex bytes, as `cansend` takes it.
impl fmt::Display for Frame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:03X}#", self.id)?;
        for byte in &self.data {
            write!(f, "{byte:02X}")?;
        }
        Ok(())
    }
}

/// Accepts `cansend` form as well as `candump`-style spaced or dotted bytes.
impl FromStr for Frame {
    type Err = ProtocolError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (id, data) = s
            .trim()
            .split_once('#')
            .ok_or_else(|| ProtocolError::Malformed(format!("missing '#' in {s:?}")))?;
        let id = u16::from_str_radix(id.trim(), 16)
            .map_err(|e| ProtocolError::Malformed(format!("id {id:?}: {e}")))?;

        let digits: Vec<char> = data
            .chars()
            .filter(|c| !c.is_whitespace() && *c != '.')
            .collect();
        if digits.len() % 2 != 0 {
            return Err(ProtocolError::Malformed(format!("odd data length in {s:?}")));
        }
        let bytes = digits
            .chunks(2)
            .map(|pair| {
                let hex: String = pair.iter().collect();
                u8::from_str_radix(&hex, 16)
                    .map_err(|e| ProtocolError::Malformed(format!("byte {hex:?}: {e}")))
            })
            .collect::<Result<Vec<u8>, _>>()?;

        Frame::new(id, &bytes)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TileAction {
    Removed,
    Placed,
    Tapped,
}

impl TileAction {
    pub fn code(self) -> u8 {
        match self {
            TileAction::Removed => 0,
            TileAction::Placed => 1,
            TileAction::Tapped => 2,
        }
    }
}

impl TryFrom<u8> for TileAction {
    type Error = ProtocolError;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(TileAction::Removed),
            1 => Ok(TileAction::Placed),
            2 => Ok(TileAction::Tapped),
            _ => Err(ProtocolError::UnknownAction(v)),
        }
    }
}

impl fmt::Display for TileAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TileAction::Removed => write!(f, "removed"),
            TileAction::Placed => write!(f, "placed"),
            TileAction::Tapped => write!(f, "tapped"),
        }
    }
}

/// Something a tile reported about itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileEvent {
    pub point: Point,
    pub action: TileAction,
}

impl TileEvent {
    pub fn new(point: Point, action: TileAction) -> Self {
        TileEvent { point, action }
    }

    pub fn decode(frame: &Frame) -> Result<Self, ProtocolError> {
        if frame.id() & TILE_BLOCK_MASK != TILE_EVENT_BLOCK {
            return Err(ProtocolError::UnknownId(frame.id()));
        }
        let x = ((frame.id() & 0x0F0) >> 4) as u8;
        let y = (frame.id() & 0x00F) as u8;
        let code = *frame.data().first().ok_or(ProtocolError::EmptyPayload)?;

        Ok(TileEvent {
            point: (x, y),
            action: TileAction::try_from(code)?,
        })
    }

    /// The frame a tile would send for this event.
    pub fn encode(&self) -> Frame {
        let (x, y) = self.point;
        Frame::fixed(
            TILE_EVENT_BLOCK | (x as u16 & 0x0F) << 4 | (y as u16 & 0x0F),
            [self.action.code()],
        )
    }
}
