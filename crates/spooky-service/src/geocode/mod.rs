//! Address suggestions for free-text search input.
//!
//! ## Module Organization
//!
//! - `gate`: process-wide rate limit and response cache
//! - `house_number`: house-number token detection and word-order variations
//! - `region`: allowed-region filter
//! - `search`: candidate merge, ranking and the gated entry point

pub mod gate;
pub mod house_number;
pub mod region;
pub mod search;

pub use gate::SearchGate;
pub use search::{SimplifiedCandidate, gated_search, resolve_limit, search};
