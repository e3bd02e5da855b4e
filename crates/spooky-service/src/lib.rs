//! Domain logic of the Spooky Route server.
//!
//! ## Module Organization
//!
//! - `auth`: password hashing, bearer tokens, registration and login
//! - `geocode`: search gate, house-number detection, region filter, candidate merge and ranking
//! - `house`: address normalization, the house upsert rules and the duplicate-address audit
//! - `error`: the service error taxonomy

pub mod auth;
pub mod error;
pub mod geocode;
pub mod house;
