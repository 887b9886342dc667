//! Server configuration, read from command-line flags with environment fallbacks.

use std::time::Duration;

use clap::Parser;

#[derive(Parser, Debug, Clone)]
#[command(name = "irori-server")]
#[command(about = "Room-scoped WebSocket chat server", long_about = None)]
pub struct ServerConfig {
    /// Host address to bind the server to
    #[arg(short = 'H', long, env = "IRORI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port number to bind the server to (0 picks a free port)
    #[arg(short = 'p', long, env = "IRORI_PORT", default_value_t = 8080)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "IRORI_LOG_LEVEL", default_value = "info")]
    pub log_level: String,

    /// Seconds to wait for open connections to drain on shutdown
    #[arg(long, env = "IRORI_SHUTDOWN_TIMEOUT_SECS", default_value_t = 1)]
    pub shutdown_timeout_secs: u64,

    /// Seconds a single frame write may take before the recipient is dropped
    #[arg(long, env = "IRORI_WRITE_TIMEOUT_SECS", default_value_t = 10)]
    pub write_timeout_secs: u64,

    /// Frames queued per connection before writers wait
    #[arg(
        long,
        env = "IRORI_OUTBOUND_BUFFER",
        default_value_t = 64,
        value_parser = clap::value_parser!(u16).range(1..)
    )]
    pub outbound_buffer: u16,

    /// Rooms created at startup (repeat the flag or pass a comma-separated list)
    #[arg(
        long = "room",
        env = "IRORI_ROOMS",
        value_delimiter = ',',
        default_values_t = [String::from("general"), String::from("random")]
    )]
    pub rooms: Vec<String>,
}

impl ServerConfig {
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }

    pub fn write_timeout(&self) -> Duration {
        Duration::from_secs(self.write_timeout_secs)
    }
}
