//! Persistent storage for configuration and light UI state.

pub mod config;
