//! Geocoding provider adapter.
//!
//! ## Module Organization
//!
//! - `error`: provider failures
//! - `place`: wire records returned by the provider (`jsonv2` shape)
//! - `provider`: the `GeocodeProvider` seam used by the search pipeline
//! - `nominatim`: HTTP client for an OpenStreetMap Nominatim instance
//! - `scripted`: in-process provider with canned answers (`test-support` feature)

pub mod error;
pub mod nominatim;
pub mod place;
pub mod provider;

#[cfg(any(test, feature = "test-support"))]
pub mod scripted;

pub use error::{GeocodeError, GeocodeResult};
pub use nominatim::NominatimClient;
pub use place::{Coordinate, PlaceAddress, PlaceId, PlaceRecord};
pub use provider::GeocodeProvider;
