use std::fmt;

/// Operator commands typed at the console.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Command {
    Pass,
    Quit,
}

pub const USAGE: &str = "Type 'pass' to pass your turn or 'quit' to exit.";

impl std::str::FromStr for Command {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pass" => Ok(Command::Pass),
            "quit" => Ok(Command::Quit),
            _ => Err(format!("unknown command: {}", s.trim())),
        }
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Pass => write!(f, "pass"),
            Command::Quit => write!(f, "quit"),
        }
    }
}
