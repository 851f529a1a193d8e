use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use emogo_engine::{Board, Color, Emotion, Outcome, Point, StoneCounts};
use tokio::task::JoinHandle;

use crate::blink;
use crate::bus::Bus;
use crate::command::{Command, USAGE};
use crate::protocol::{Frame, TileAction, TileEvent};

/// Where the game stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    Playing,
    /// Dead stones are on the board and must be lifted before play resumes.
    AwaitingRemoval,
    GameOver,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Playing => write!(f, "playing"),
            Phase::AwaitingRemoval => write!(f, "awaiting_removal"),
            Phase::GameOver => write!(f, "game_over"),
        }
    }
}

/// Whether the event worker should keep consuming events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// The game state machine. Owns the board; driven one event at a time.
pub struct Controller<B> {
    board: Board,
    bus: Arc<B>,
    current_player: Color,
    game_over: bool,
    waiting_for_removal: bool,
    dead_stones: Vec<Point>,
    consecutive_passes: u8,
    final_score: Option<(StoneCounts, Outcome)>,
    blink_interval: Duration,
}

impl<B: Bus> Controller<B> {
    pub fn new(board: Board, bus: Arc<B>, blink_interval: Duration) -> Self {
        Controller {
            board,
            bus,
            current_player: Color::Black,
            game_over: false,
            waiting_for_removal: false,
            dead_stones: Vec::new(),
            consecutive_passes: 0,
            final_score: None,
            blink_interval,
        }
    }

    // -- Accessors --

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn current_player(&self) -> Color {
        self.current_player
    }

    pub fn phase(&self) -> Phase {
        if self.game_over {
            Phase::GameOver
        } else if self.waiting_for_removal {
            Phase::AwaitingRemoval
        } else {
            Phase::Playing
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    /// Coordinates still waiting to be lifted, in the order they were reported.
    pub fn dead_stones(&self) -> &[Point] {
        &self.dead_stones
    }

    pub fn consecutive_passes(&self) -> u8 {
        self.consecutive_passes
    }

    /// Live stone counts and result, once both players have passed.
    pub fn final_score(&self) -> Option<(StoneCounts, Outcome)> {
        self.final_score
    }

    // -- Inbound dispatch --

    /// Decode a bus frame and apply it. Returns the blink task a tap starts.
    pub fn handle_frame(&mut self, frame: &Frame) -> Option<JoinHandle<()>> {
        let event = match TileEvent::decode(frame) {
            Ok(event) => event,
            Err(e) => {
                tracing::warn!("Discarding frame {frame}: {e}");
                return None;
            }
        };

        match event.action {
            TileAction::Removed => {
                self.handle_removed(event.point);
                None
            }
            TileAction::Placed => {
                self.handle_placed(event.point);
                None
            }
            TileAction::Tapped => self.handle_tapped(event.point),
        }
    }

    /// Apply one line of operator input.
    pub fn handle_input(&mut self, line: &str) -> Flow {
        match line.parse::<Command>() {
            Ok(Command::Pass) => {
                self.pass();
                Flow::Continue
            }
            Ok(Command::Quit) => {
                tracing::info!("Game terminated by user.");
                self.game_over = true;
                Flow::Quit
            }
            Err(e) => {
                tracing::warn!("{e}. {USAGE}");
                Flow::Continue
            }
        }
    }

    // -- Tile events --

    pub fn handle_placed(&mut self, point: Point) {
        if self.game_over {
            tracing::warn!("Game is over. Ignoring stone placed at {point:?}.");
            return;
        }

        let color = self.current_player;
        if let Err(e) = self.board.place_stone(point, color) {
            tracing::warn!("Cannot place {color} at {point:?}: {e}");
            return;
        }

        if self.waiting_for_removal {
            self.dead_stones.push(point);
            self.mark_pending_dead();
            if let Ok(state) = self.board.stone_state(point) {
                self.send(&Frame::state_update(&state));
            }
            self.display_board();
            tracing::info!("Stone placed at {point:?} is immediately dead.");
            return;
        }

        self.display_board();
        tracing::info!("{color} placed a stone at {point:?}.");
        let counts = self.board.stone_counts();
        tracing::info!(
            "Black stones: {}, White stones: {}",
            counts.black,
            counts.white
        );
        self.broadcast_board();
        self.consecutive_passes = 0;

        if !self.await_dead_stones() {
            self.switch_player();
        }
    }

    pub fn handle_removed(&mut self, point: Point) {
        if let Err(e) = self.board.remove_stone(point) {
            tracing::warn!("Cannot remove stone at {point:?}: {e}");
            return;
        }
        self.dead_stones.retain(|&p| p != point);
        self.display_board();
        tracing::info!("Stone at {point:?} was removed.");

        if !self.waiting_for_removal {
            return;
        }

        if !self.dead_stones.is_empty() {
            tracing::info!(
                "Please remove the remaining dead stones: {:?}",
                self.dead_stones
            );
            return;
        }

        self.waiting_for_removal = false;
        tracing::info!("All dead stones have been removed. Game resumes.");
        self.board.check_connect();
        self.broadcast_board();
        if !self.await_dead_stones() {
            self.switch_player();
        }
    }

    /// Highlight the tapped stone's group and start the blink sequence.
    pub fn handle_tapped(&mut self, point: Point) -> Option<JoinHandle<()>> {
        tracing::info!("Stone at {point:?} was tapped.");
        let group = match self.board.connected(point) {
            Ok(group) => group,
            Err(e) => {
                tracing::info!("No connected stones found for {point:?}: {e}");
                return None;
            }
        };

        for &p in &group {
            self.send(&Frame::highlight(p, true));
        }
        Some(blink::spawn(
            Arc::clone(&self.bus),
            group,
            self.blink_interval,
        ))
    }

    // -- Commands --

    /// Pass the current turn. Returns whether the pass was accepted.
    pub fn pass(&mut self) -> bool {
        if self.game_over {
            tracing::warn!("Game is over. Cannot pass.");
            return false;
        }
        if self.waiting_for_removal {
            tracing::warn!("Cannot pass while waiting for dead stones to be removed.");
            return false;
        }

        tracing::info!("{} passed.", self.current_player);
        self.consecutive_passes += 1;
        if self.consecutive_passes >= 2 {
            tracing::info!("Both players have passed consecutively. The game is over.");
            self.game_over = true;
            self.calculate_final_score();
        } else {
            self.switch_player();
        }
        true
    }

    // -- Internal helpers --

    /// Gate play on every dead stone currently on the board.
    /// Returns whether the gate closed.
    fn await_dead_stones(&mut self) -> bool {
        let dead = self.board.dead_stones();
        if dead.is_empty() {
            self.waiting_for_removal = false;
            self.dead_stones.clear();
            return false;
        }

        tracing::info!("Dead stones detected. Please remove the following stones: {dead:?}");
        self.waiting_for_removal = true;
        self.dead_stones = dead;
        true
    }

    /// Stones awaiting removal stay dead even if a later placement reclassified them.
    fn mark_pending_dead(&mut self) {
        for &p in &self.dead_stones {
            if let Err(e) = self.board.set_stone_state(p, Some(Emotion::Dead), None) {
                tracing::warn!("Cannot mark {p:?} dead: {e}");
            }
        }
    }

    fn switch_player(&mut self) {
        self.current_player = self.current_player.opp();
        tracing::info!("Now it's {}'s turn.", self.current_player);
    }

    fn calculate_final_score(&mut self) {
        let counts = self.board.stone_counts();
        let outcome = counts.outcome();
        tracing::info!(
            "Final score: Black stones: {}, White stones: {}. {outcome}!",
            counts.black,
            counts.white
        );
        self.final_score = Some((counts, outcome));
    }

    fn broadcast_board(&self) {
        for state in self.board.board_state() {
            self.send(&Frame::state_update(&state));
        }
    }

    fn send(&self, frame: &Frame) {
        if let Err(e) = self.bus.send(frame) {
            tracing::error!("Error sending {frame}: {e}");
        }
    }

    fn display_board(&self) {
        tracing::info!("\n{}", self.board);
        match serde_json::to_string(&self.board.board_state()) {
            Ok(snapshot) => tracing::debug!("board state: {snapshot}"),
            Err(e) => tracing::warn!("Failed to serialize board state: {e}"),
        }
    }
}
