//! Server configuration from command-line flags and environment variables.

use clap::Parser;

#[derive(Debug, Clone, Parser)]
#[command(name = "kokuban-server", version, about = "Live classroom poll and chat server")]
pub struct ServerConfig {
    /// Address to bind
    #[arg(long, env = "KOKUBAN_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(short, long, env = "KOKUBAN_PORT", default_value_t = 5000)]
    pub port: u16,

    /// Default log level when RUST_LOG is not set
    #[arg(long, env = "KOKUBAN_LOG_LEVEL", default_value = "debug")]
    pub log_level: String,
}

impl ServerConfig {
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 5000,
            log_level: "debug".to_string(),
        }
    }
}
