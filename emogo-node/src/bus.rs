use std::io::Write;
use std::sync::Mutex;

use crate::error::NodeError;
use crate::protocol::Frame;

/// Outbound half of the tile bus.
///
/// Sends are synchronous and may be issued from the event worker and from
/// blink tasks at the same time.
pub trait Bus: Send + Sync + 'static {
    fn send(&self, frame: &Frame) -> Result<(), NodeError>;
}

/// Writes each frame as one `ID#DATA` text line, ready to pipe into `cansend`.
#[derive(Debug)]
pub struct LineBus<W> {
    out: Mutex<W>,
}

impl<W: Write + Send + 'static> LineBus<W> {
    pub fn new(out: W) -> Self {
        LineBus {
            out: Mutex::new(out),
        }
    }

    pub fn into_inner(self) -> Result<W, NodeError> {
        self.out
            .into_inner()
            .map_err(|_| NodeError::Transport("bus writer poisoned".to_string()))
    }
}

impl<W: Write + Send + 'static> Bus for LineBus<W> {
    fn send(&self, frame: &Frame) -> Result<(), NodeError> {
        let mut out = self
            .out
            .lock()
            .map_err(|_| NodeError::Transport("bus writer poisoned".to_string()))?;
        writeln!(out, "{frame}")
            .and_then(|_| out.flush())
            .map_err(|e| NodeError::Transport(e.to_string()))?;
        tracing::debug!("sent {frame}");
        Ok(())
    }
}
