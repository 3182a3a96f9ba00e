//! Infrastructure layer
//!
//! ドメイン層が定義する trait（Repository, Broadcaster）の具体的な実装と、
//! 通信用の DTO を提供します。

pub mod broadcast;
pub mod dto;
pub mod repository;

pub use broadcast::ChannelBroadcaster;
pub use repository::InMemorySessionRepository;
