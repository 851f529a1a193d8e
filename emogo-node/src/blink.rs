use std::sync::Arc;
use std::time::Duration;

use emogo_engine::Point;
use tokio::task::JoinHandle;

use crate::bus::Bus;
use crate::protocol::Frame;

pub const BLINK_CYCLES: usize = 3;

/// Blink every tile, then turn off the highlight on `group`.
///
/// Runs detached; it only reads `group` and writes to the bus, so the event
/// worker keeps going while it runs. Send failures are logged and skipped.
pub fn spawn<B: Bus>(bus: Arc<B>, group: Vec<Point>, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        for _ in 0..BLINK_CYCLES {
            tokio::time::sleep(interval).await;
            send(bus.as_ref(), &Frame::broadcast_blink(true));
            tokio::time::sleep(interval).await;
            send(bus.as_ref(), &Frame::broadcast_blink(false));
        }
        for &point in &group {
            send(bus.as_ref(), &Frame::highlight(point, false));
        }
    })
}

fn send<B: Bus>(bus: &B, frame: &Frame) {
    if let Err(e) = bus.send(frame) {
        tracing::error!("blink: failed to send {frame}: {e}");
    }
}
