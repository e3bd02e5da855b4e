/// Route component constants shared across crates
pub const API_ROUTE_COMPONENT: &str = "api";
pub const API_ROUTE_PREFIX: &str = const_str::concat!("/", API_ROUTE_COMPONENT);

pub const AUTH_ROUTE_COMPONENT: &str = "auth";
pub const AUTH_ROUTE_PREFIX: &str = const_str::concat!("/", AUTH_ROUTE_COMPONENT);

pub const GEOCODE_ROUTE_COMPONENT: &str = "geocode";
pub const GEOCODE_SEARCH_ROUTE: &str = const_str::concat!("/", GEOCODE_ROUTE_COMPONENT, "/search");

pub const HOUSES_ROUTE_COMPONENT: &str = "houses";
pub const HOUSES_ROUTE_PREFIX: &str = const_str::concat!("/", HOUSES_ROUTE_COMPONENT);
pub const MY_HOUSE_ROUTE: &str = const_str::concat!(HOUSES_ROUTE_PREFIX, "/me");

/// The only administrative area whose addresses are offered as suggestions.
///
/// Compared against normalized provider fields, so it is stored already
/// lowercased and without diacritics.
pub const ALLOWED_REGION: &str = "nuevo leon";

/// Upper bound on the number of suggestions a single search may return.
pub const MAX_SEARCH_LIMIT: usize = 30;
