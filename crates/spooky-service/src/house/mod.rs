//! Houses and their addresses.
//!
//! ## Module Organization
//!
//! - `normalize`: canonical address and `addressText` derivation from client input
//! - `upsert`: one-house-per-owner and unique-address rules around the store
//! - `duplicates`: audit of stored address texts

pub mod duplicates;
pub mod normalize;
pub mod upsert;

pub use duplicates::{DuplicateAddressGroup, find_duplicate_addresses};
pub use normalize::{AddressInput, normalize};
pub use upsert::upsert_house;
