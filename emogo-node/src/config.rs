use std::path::PathBuf;
use std::time::Duration;

use emogo_engine::MAX_DIMENSION;

use crate::error::NodeError;

const DEFAULT_DIMENSION: u8 = 5;
const DEFAULT_BLINK_INTERVAL: Duration = Duration::from_millis(500);

/// Runtime settings, read from the environment.
///
/// - `EMOGO_ROWS` / `EMOGO_COLS`: board size, 1 to 15 (default 5)
/// - `EMOGO_BUS_IN`: line-oriented source of inbound frames (e.g. a FIFO fed by `candump`)
/// - `EMOGO_BLINK_INTERVAL_MS`: half-period of the tap blink (default 500)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub rows: u8,
    pub cols: u8,
    pub bus_in: Option<PathBuf>,
    pub blink_interval: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            rows: DEFAULT_DIMENSION,
            cols: DEFAULT_DIMENSION,
            bus_in: None,
            blink_interval: DEFAULT_BLINK_INTERVAL,
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, NodeError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, NodeError> {
        let defaults = Config::default();

        let rows = match lookup("EMOGO_ROWS") {
            Some(v) => parse_dimension("EMOGO_ROWS", &v)?,
            None => defaults.rows,
        };
        let cols = match lookup("EMOGO_COLS") {
            Some(v) => parse_dimension("EMOGO_COLS", &v)?,
            None => defaults.cols,
        };
        let blink_interval = match lookup("EMOGO_BLINK_INTERVAL_MS") {
            Some(v) => v
                .trim()
                .parse::<u64>()
                .map(Duration::from_millis)
                .map_err(|e| NodeError::Config(format!("EMOGO_BLINK_INTERVAL_MS={v}: {e}")))?,
            None => defaults.blink_interval,
        };
        let bus_in = lookup("EMOGO_BUS_IN")
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        Ok(Config {
            rows,
            cols,
            bus_in,
            blink_interval,
        })
    }
}

fn parse_dimension(key: &str, value: &str) -> Result<u8, NodeError> {
    let n = value
        .trim()
        .parse::<u8>()
        .map_err(|e| NodeError::Config(format!("{key}={value}: {e}")))?;
    if n == 0 || n > MAX_DIMENSION {
        return Err(NodeError::Config(format!(
            "{key}={n}: must be between 1 and {MAX_DIMENSION}"
        )));
    }
    Ok(n)
}
