#![allow(dead_code)]

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use emogo_engine::{Board, Emotion, Point};
use emogo_node::protocol::{BROADCAST_ID, TILE_BLOCK_MASK, TILE_STATE_BLOCK};
use emogo_node::{Bus, Controller, Frame, NodeError, TileAction, TileEvent};

/// In-memory bus that keeps every frame it is asked to send.
#[derive(Debug, Default)]
pub struct RecordingBus {
    frames: Mutex<Vec<Frame>>,
    failing: AtomicBool,
}

impl RecordingBus {
    pub fn frames(&self) -> Vec<Frame> {
        self.frames.lock().unwrap().clone()
    }

    pub fn clear(&self) {
        self.frames.lock().unwrap().clear();
    }

    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }
}

impl Bus for RecordingBus {
    fn send(&self, frame: &Frame) -> Result<(), NodeError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(NodeError::Transport("bus off".to_string()));
        }
        self.frames.lock().unwrap().push(frame.clone());
        Ok(())
    }
}

pub type TestController = Controller<RecordingBus>;

pub fn controller(rows: u8, cols: u8) -> (TestController, Arc<RecordingBus>) {
    controller_with_blink(rows, cols, Duration::from_millis(1))
}

pub fn controller_with_blink(
    rows: u8,
    cols: u8,
    blink_interval: Duration,
) -> (TestController, Arc<RecordingBus>) {
    let bus = Arc::new(RecordingBus::default());
    let controller = Controller::new(Board::new(rows, cols), Arc::clone(&bus), blink_interval);
    (controller, bus)
}

pub fn tile_frame(point: Point, action: TileAction) -> Frame {
    TileEvent::new(point, action).encode()
}

/// Place stones through the bus, alternating players as the controller allows.
pub fn place_all(controller: &mut TestController, points: &[Point]) {
    for &point in points {
        controller.handle_frame(&tile_frame(point, TileAction::Placed));
    }
}

pub fn remove(controller: &mut TestController, point: Point) {
    controller.handle_frame(&tile_frame(point, TileAction::Removed));
}

pub fn emotion_at(controller: &TestController, point: Point) -> Emotion {
    controller
        .board()
        .stone(point)
        .unwrap()
        .expect("stone expected")
        .emotion()
}

pub fn is_state_update(frame: &Frame) -> bool {
    frame.id() & TILE_BLOCK_MASK == TILE_STATE_BLOCK && frame.data().first() == Some(&0x01)
}

pub fn is_broadcast(frame: &Frame) -> bool {
    frame.id() == BROADCAST_ID
}
