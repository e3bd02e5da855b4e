//! HTTP surface of the Spooky Route server.
//!
//! ## Module Organization
//!
//! - `app`: routes and handlers
//! - `config`: settings hoop and depot accessor
//! - `store_handler`: storage hoop and depot accessor
//! - `geocode_handler`: provider and search gate hoop and depot accessors
//! - `middleware`: bearer-token authentication
//! - `error`: HTTP error mapping

pub mod app;
pub mod config;
pub mod error;
pub mod geocode_handler;
pub mod middleware;
pub mod store_handler;
