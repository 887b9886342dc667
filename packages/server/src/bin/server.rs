//! Room-scoped WebSocket chat server.
//!
//! Run with:
//! ```not_rust
//! cargo run --bin irori-server
//! cargo run --bin irori-server -- --host 0.0.0.0 --port 3000 --room general --room rust
//! ```

use clap::Parser;

use irori_server::{bootstrap::build_server, config::ServerConfig};
use irori_shared::logger::setup_logger;

#[tokio::main]
async fn main() {
    let config = ServerConfig::parse();

    // Initialize tracing
    setup_logger(env!("CARGO_BIN_NAME"), &config.log_level);

    tracing::info!("Starting chat server on {}", config.bind_addr());
    let server = build_server(&config).await;
    if let Err(e) = server.run(&config.host, config.port).await {
        tracing::error!("Server error: {}", e);
        std::process::exit(1);
    }
}
