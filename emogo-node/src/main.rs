use std::sync::Arc;

use emogo_engine::Board;
use emogo_node::{Config, Controller, LineBus, worker};
use tokio::io::BufReader;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "emogo_node=debug,emogo_engine=debug".into()),
        )
        .init();

    let config = Config::from_env().expect("Invalid configuration");
    let (tx, rx) = worker::channel();

    if let Some(path) = config.bus_in.clone() {
        let file = tokio::fs::File::open(&path)
            .await
            .expect("Failed to open bus input");
        let bus_tx = tx.clone();
        tokio::spawn(async move {
            if let Err(e) = worker::read_frames(BufReader::new(file), bus_tx).await {
                tracing::error!("Bus receive error: {e}");
            }
        });
    } else {
        tracing::info!("EMOGO_BUS_IN not set; accepting keyboard commands only");
    }

    tokio::spawn(async move {
        if let Err(e) = worker::read_input(BufReader::new(tokio::io::stdin()), tx).await {
            tracing::error!("Console input error: {e}");
        }
    });

    let bus = Arc::new(LineBus::new(std::io::stdout()));
    let board = Board::new(config.rows, config.cols);
    let controller = Controller::new(board, bus, config.blink_interval);

    tracing::info!(
        "Game started on a {}x{} board! Black goes first.",
        config.rows,
        config.cols
    );
    worker::run(controller, rx).await;

    // stdin's blocking reader would hold up runtime shutdown; blink tasks are abandoned.
    std::process::exit(0);
}
