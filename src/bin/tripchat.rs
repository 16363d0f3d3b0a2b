//! Terminal chat client for the trip-matching backend.
//!
//! Loads your conversation list over REST, opens one conversation at a time
//! over a WebSocket channel and keeps its thread live until you navigate
//! away.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin tripchat -- --token <token> --user-id alice@example.com
//! cargo run --bin tripchat -- -t <token> -u alice@example.com --compact
//! ```

use clap::Parser;

use tripchat::client::{ViewMode, run_client};
use tripchat::common::config::ClientConfig;
use tripchat::common::logger::setup_logger;

#[derive(Parser, Debug)]
#[command(name = "tripchat")]
#[command(about = "Terminal chat client with live one-to-one conversations", long_about = None)]
struct Args {
    /// Authentication token for the backend
    #[arg(short = 't', long)]
    token: String,

    /// Identity used to tell your messages apart from the counterpart's
    #[arg(short = 'u', long)]
    user_id: String,

    /// Base URL of the REST backend
    #[arg(short = 'a', long, default_value = "http://127.0.0.1:8000/api")]
    api_base: String,

    /// Base URL of the realtime backend
    #[arg(short = 'w', long, default_value = "ws://127.0.0.1:8000")]
    ws_base: String,

    /// Use the narrow single-column rendering
    #[arg(long)]
    compact: bool,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), "warn");

    let args = Args::parse();

    let config = ClientConfig::new(args.api_base, args.ws_base, args.token);
    let mode = if args.compact {
        ViewMode::Compact
    } else {
        ViewMode::Wide
    };

    if let Err(e) = run_client(config, args.user_id, mode).await {
        tracing::error!("Client error: {}", e);
        std::process::exit(1);
    }
}
