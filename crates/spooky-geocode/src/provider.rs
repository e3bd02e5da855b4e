use async_trait::async_trait;

use crate::error::GeocodeResult;
use crate::place::PlaceRecord;

/// Upstream geocoding service.
///
/// Each call issues exactly one request and returns the provider's records
/// unfiltered; merging, region filtering and ranking happen in the caller.
#[async_trait]
pub trait GeocodeProvider: Send + Sync {
    /// Free-text search.
    ///
    /// ## Errors
    /// Returns an error on transport failure, a non-success status, or an
    /// undecodable body.
    async fn generic_search(&self, query: &str, limit: usize) -> GeocodeResult<Vec<PlaceRecord>>;

    /// Structured search placing `"{house_number} {street_and_rest}"` in the
    /// provider's street field.
    ///
    /// ## Errors
    /// Same as [`GeocodeProvider::generic_search`].
    async fn structured_search(
        &self,
        house_number: &str,
        street_and_rest: &str,
        limit: usize,
    ) -> GeocodeResult<Vec<PlaceRecord>>;
}
