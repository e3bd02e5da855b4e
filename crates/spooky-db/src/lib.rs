//! Persistence for users and houses.
//!
//! ## Module Organization
//!
//! - `db`: pool, schema, migrations and the Postgres queries
//! - `model`: row types and the payloads written by the service layer
//! - `store`: the `HouseStore`/`UserStore` seams and their Postgres implementation
//! - `memory`: in-process store (`test-support` feature)

pub mod db;
pub mod error;
pub mod model;
pub mod store;

#[cfg(any(test, feature = "test-support"))]
pub mod memory;
