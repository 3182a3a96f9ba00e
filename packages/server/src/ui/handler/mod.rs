//! Handler modules for HTTP and WebSocket endpoints.

pub mod http;
pub mod websocket;

// Re-export HTTP handlers
pub use http::{current_poll, health_check, poll_history};

// Re-export WebSocket handlers
pub use websocket::websocket_handler;
