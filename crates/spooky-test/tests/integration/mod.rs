#![allow(clippy::unused_async)]
//! Integration tests for the HTTP endpoints.
//!
//! Every test builds its own service, so stores, rate windows and caches are
//! never shared between tests.

mod auth;
mod geocode;
mod helpers;
mod houses;
