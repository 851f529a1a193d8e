use emogo_engine::BoardError;

use crate::protocol::ProtocolError;

#[derive(Debug)]
pub enum NodeError {
    Transport(String),
    UnrecognizedFrame(ProtocolError),
    Board(BoardError),
    Config(String),
    Io(std::io::Error),
}

impl std::fmt::Display for NodeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NodeError::Transport(msg) => write!(f, "Transport error: {msg}"),
            NodeError::UnrecognizedFrame(e) => write!(f, "Unrecognized frame: {e}"),
            NodeError::Board(e) => write!(f, "Board error: {e}"),
            NodeError::Config(msg) => write!(f, "Configuration error: {msg}"),
            NodeError::Io(e) => write!(f, "I/O error: {e}"),
        }
    }
}

impl std::error::Error for NodeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            NodeError::UnrecognizedFrame(e) => Some(e),
            NodeError::Board(e) => Some(e),
            NodeError::Io(e) => Some(e),
            NodeError::Transport(_) | NodeError::Config(_) => None,
        }
    }
}

impl From<ProtocolError> for NodeError {
    fn from(e: ProtocolError) -> Self {
        NodeError::UnrecognizedFrame(e)
    }
}

impl From<BoardError> for NodeError {
    fn from(e: BoardError) -> Self {
        NodeError::Board(e)
    }
}

impl From<std::io::Error> for NodeError {
    fn from(e: std::io::Error) -> Self {
        NodeError::Io(e)
    }
}
