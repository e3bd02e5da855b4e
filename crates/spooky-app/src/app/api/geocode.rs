use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};

use super::GEOCODE_ROUTE_COMPONENT;
use crate::config::get_config_from_depot;
use crate::error::AppResult;
use crate::geocode_handler::{get_gate_from_depot, get_provider_from_depot};
use spooky_service::geocode::{SimplifiedCandidate, gated_search, resolve_limit};

async fn search_addresses(
    depot: &Depot,
    query: &str,
    raw_limit: Option<&str>,
) -> AppResult<Vec<SimplifiedCandidate>> {
    let config = get_config_from_depot(depot)?;
    let provider = get_provider_from_depot(depot)?;
    let gate = get_gate_from_depot(depot)?;

    let limit = resolve_limit(raw_limit, config.geocode.default_limit);

    let results = gated_search(
        &gate,
        &*provider,
        query,
        limit,
        config.geocode.variation_limit,
    )
    .await?;

    Ok(results)
}

/// ## Summary
/// GET /geocode/search?q=<text>&limit=<n> - Ranked address suggestions
///
/// A blank `q` yields an empty array without touching the rate limit.
///
/// ## Errors
/// Returns HTTP 429 when the shared search window is full
/// Returns HTTP 500 if the provider fails
#[handler]
async fn search_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    let query = req.query::<String>("q").unwrap_or_default();
    let raw_limit = req.query::<String>("limit");

    match search_addresses(depot, &query, raw_limit.as_deref()).await {
        Ok(results) => {
            res.status_code(StatusCode::OK);
            res.render(Json(results));
        }
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(GEOCODE_ROUTE_COMPONENT).push(Router::with_path("search").get(search_handler))
}
