use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use spooky_core::constants::MAX_SEARCH_LIMIT;
use spooky_geocode::{GeocodeProvider, GeocodeResult, PlaceAddress, PlaceId, PlaceRecord};

use super::gate::SearchGate;
use super::house_number::find_house_number;
use super::region::is_in_allowed_region;
use crate::error::{ServiceError, ServiceResult};

/// A suggestion as returned to the client.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimplifiedCandidate {
    pub lat: f64,
    pub lng: f64,
    pub display_name: String,
    pub address: PlaceAddress,
}

struct RankedCandidate {
    candidate: SimplifiedCandidate,
    importance: f64,
    has_house_number: bool,
}

impl RankedCandidate {
    fn from_record(record: PlaceRecord) -> Option<Self> {
        let (Some(lat), Some(lng)) = (record.lat.value(), record.lon.value()) else {
            tracing::trace!(
                place_id = record.place_id,
                "Dropping candidate without usable coordinates"
            );
            return None;
        };

        Some(Self {
            has_house_number: record.has_house_number(),
            importance: record.importance.unwrap_or(0.0),
            candidate: SimplifiedCandidate {
                lat,
                lng,
                display_name: record.display_name,
                address: record.address,
            },
        })
    }

    fn display_len(&self) -> usize {
        self.candidate.display_name.chars().count()
    }
}

/// Provider records collected across attempts, unique by provider id, in arrival order.
#[derive(Default)]
struct CandidatePool {
    seen: HashSet<PlaceId>,
    records: Vec<PlaceRecord>,
}

impl CandidatePool {
    fn merge(&mut self, records: Vec<PlaceRecord>) -> usize {
        let before = self.records.len();
        for record in records {
            if self.seen.insert(record.place_id) {
                self.records.push(record);
            }
        }
        self.records.len() - before
    }

    /// Folds one optional attempt into the pool; failures are logged and dropped.
    fn merge_best_effort(&mut self, attempt: &str, result: GeocodeResult<Vec<PlaceRecord>>) {
        match result {
            Ok(records) => {
                let added = self.merge(records);
                tracing::debug!(attempt, added, "Merged best-effort geocoding results");
            }
            Err(e) => {
                tracing::warn!(attempt, error = %e, "Best-effort geocoding attempt failed");
            }
        }
    }

    fn has_house_number(&self) -> bool {
        self.records.iter().any(PlaceRecord::has_house_number)
    }
}

/// ## Summary
/// Resolves the `limit` query parameter: unparsable or non-positive values fall
/// back to `default_limit`, and the result never exceeds [`MAX_SEARCH_LIMIT`].
#[must_use]
pub fn resolve_limit(raw: Option<&str>, default_limit: usize) -> usize {
    let requested = raw
        .and_then(|value| value.trim().parse::<i64>().ok())
        .filter(|&value| value > 0)
        .and_then(|value| usize::try_from(value).ok())
        .unwrap_or(default_limit);

    requested.min(MAX_SEARCH_LIMIT)
}

/// ## Summary
/// Searches the provider for `query` and returns ranked suggestions inside the
/// allowed region.
///
/// The free-text search runs first. When the query carries a house number that
/// none of the results resolved, a structured street + number search and then
/// up to four word-order variations are tried, stopping as soon as a result
/// with a house number shows up. Those follow-up attempts are best-effort.
///
/// Results are unique by provider id and ordered by: has a house number,
/// importance (descending), shorter display name.
///
/// ## Errors
/// Returns [`ServiceError::ProviderError`] if the initial free-text search fails.
#[tracing::instrument(skip(provider))]
pub async fn search<P: GeocodeProvider + ?Sized>(
    provider: &P,
    query: &str,
    requested_limit: usize,
    variation_limit: usize,
) -> ServiceResult<Vec<SimplifiedCandidate>> {
    let limit = requested_limit.min(MAX_SEARCH_LIMIT);

    let mut pool = CandidatePool::default();
    pool.merge(provider.generic_search(query, limit).await?);

    if let Some(token) = find_house_number(query)? {
        if token.rest.is_empty() {
            tracing::debug!(
                number = %token.number,
                "Query is only a house number, skipping follow-up searches"
            );
        } else if !pool.has_house_number() {
            pool.merge_best_effort(
                "structured",
                provider
                    .structured_search(&token.number, &token.rest, limit)
                    .await,
            );

            if !pool.has_house_number() {
                for variation in token.variations() {
                    pool.merge_best_effort(
                        &variation,
                        provider.generic_search(&variation, variation_limit).await,
                    );
                    if pool.has_house_number() {
                        break;
                    }
                }
            }
        }
    }

    let mut ranked: Vec<RankedCandidate> = pool
        .records
        .into_iter()
        .filter(|record| is_in_allowed_region(&record.address))
        .filter_map(RankedCandidate::from_record)
        .collect();

    ranked.sort_by(|a, b| {
        b.has_house_number
            .cmp(&a.has_house_number)
            .then_with(|| b.importance.total_cmp(&a.importance))
            .then_with(|| a.display_len().cmp(&b.display_len()))
    });
    ranked.truncate(limit);

    tracing::debug!(count = ranked.len(), "Geocoding search ranked");

    Ok(ranked.into_iter().map(|r| r.candidate).collect())
}

/// ## Summary
/// Runs [`search`] behind the shared rate limit and cache.
///
/// Blank queries return no suggestions without consuming rate budget. The
/// rate limit is checked before the cache, so cached answers still count.
///
/// ## Errors
/// Returns [`ServiceError::RateLimited`] when the window is full, or any error
/// from [`search`].
pub async fn gated_search<P: GeocodeProvider + ?Sized>(
    gate: &SearchGate,
    provider: &P,
    query: &str,
    requested_limit: usize,
    variation_limit: usize,
) -> ServiceResult<Vec<SimplifiedCandidate>> {
    let query = query.trim();
    if query.is_empty() {
        return Ok(Vec::new());
    }

    if !gate.should_allow() {
        return Err(ServiceError::RateLimited);
    }

    if let Some(mut cached) = gate.get_cached(query) {
        tracing::debug!(query, "Serving geocoding results from cache");
        cached.truncate(requested_limit);
        return Ok(cached);
    }

    let results = search(provider, query, requested_limit, variation_limit).await?;
    gate.put_cached(query, results.clone());
    Ok(results)
}
