mod auth;
mod geocode;
mod health;
mod houses;

use salvo::Router;

// Re-export route constants from core
pub use spooky_core::constants::{
    API_ROUTE_COMPONENT, API_ROUTE_PREFIX, AUTH_ROUTE_COMPONENT, AUTH_ROUTE_PREFIX,
    GEOCODE_ROUTE_COMPONENT, GEOCODE_SEARCH_ROUTE, HOUSES_ROUTE_COMPONENT, HOUSES_ROUTE_PREFIX,
    MY_HOUSE_ROUTE,
};

/// ## Summary
/// Constructs the router with every public endpoint.
///
/// Expects the config, store and geocode hoops to be installed on a parent router.
#[must_use]
pub fn routes() -> Router {
    Router::new()
        .push(health::routes())
        .push(auth::routes())
        .push(geocode::routes())
        .push(houses::routes())
}
