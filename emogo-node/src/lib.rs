pub mod blink;
pub mod bus;
pub mod command;
pub mod config;
pub mod controller;
pub mod error;
pub mod protocol;
pub mod worker;

pub use bus::{Bus, LineBus};
pub use command::Command;
pub use config::Config;
pub use controller::{Controller, Flow, Phase};
pub use error::NodeError;
pub use protocol::{Frame, ProtocolError, TileAction, TileEvent};
pub use worker::Event;
