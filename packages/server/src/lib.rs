//! Live classroom poll and chat server.
//!
//! One shared session per process: teachers create timed polls, students
//! answer once per poll, everyone chats. Clients talk JSON over a WebSocket
//! at `/ws`; a small read-only HTTP API exposes the current poll and history.

pub mod config;
pub mod domain;
pub mod infrastructure;
pub mod ui;
pub mod usecase;

// Re-export entry points
pub use config::ServerConfig;
pub use ui::{run, serve};
