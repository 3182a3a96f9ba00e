//! Classroom poll and chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin kokuban-server -- --port 5000
//! ```

use clap::Parser;
use kokuban_server::ServerConfig;
use kokuban_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    // Run the server
    if let Err(e) = kokuban_server::run(config).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
