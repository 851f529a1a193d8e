use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::mpsc;

use crate::bus::Bus;
use crate::controller::{Controller, Flow};
use crate::protocol::Frame;

/// Anything that can drive the game.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    Frame(Frame),
    Input(String),
}

pub type EventSender = mpsc::UnboundedSender<Event>;
pub type EventReceiver = mpsc::UnboundedReceiver<Event>;

pub fn channel() -> (EventSender, EventReceiver) {
    mpsc::unbounded_channel()
}

/// Consume events one at a time until `quit` or until every sender is gone.
///
/// This is the only task that touches the controller, so board mutations are
/// serialized by construction. Returns the controller for inspection.
pub async fn run<B: Bus>(mut controller: Controller<B>, mut rx: EventReceiver) -> Controller<B> {
    while let Some(event) = rx.recv().await {
        let flow = match event {
            Event::Frame(frame) => {
                tracing::debug!("received {frame}");
                controller.handle_frame(&frame);
                Flow::Continue
            }
            Event::Input(line) => controller.handle_input(&line),
        };
        if flow == Flow::Quit {
            break;
        }
    }
    controller
}

/// Forward `ID#DATA` lines from the bus as frame events.
pub async fn read_frames<R>(reader: R, tx: EventSender) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Frame>() {
            Ok(frame) => {
                if tx.send(Event::Frame(frame)).is_err() {
                    break;
                }
            }
            Err(e) => tracing::warn!("Skipping bus line {line:?}: {e}"),
        }
    }
    Ok(())
}

/// Forward operator input lines as events.
pub async fn read_input<R>(reader: R, tx: EventSender) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
{
    let mut lines = reader.lines();
    while let Some(line) = lines.next_line().await? {
        if tx.send(Event::Input(line)).is_err() {
            break;
        }
    }
    Ok(())
}
