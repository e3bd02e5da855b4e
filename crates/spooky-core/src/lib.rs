//! Shared configuration, constants and domain types for the Spooky Route server.

pub mod config;
pub mod constants;
pub mod error;
pub mod types;
