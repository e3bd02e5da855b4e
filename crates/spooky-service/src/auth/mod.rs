//! Identity: credentials and bearer tokens.
//!
//! ## Module Organization
//!
//! - `identity`: registration and login against the user store
//! - `password`: password hashing and verification with Argon2
//! - `token`: HS256 bearer token issue and verification

pub mod identity;
pub mod password;
pub mod token;

pub use identity::{login, register};
pub use token::{Claims, TokenIssuer};
