//! Shared utilities for the Kokuban workspace.
//!
//! Logger setup and JST time helpers used by the server binary and tests.

pub mod logger;
pub mod time;
