use serde::{Deserialize, Serialize};

/// Canonical structured address, as persisted alongside a house.
///
/// `address_text` is the deterministic display form and the system-wide
/// uniqueness key; the remaining fields are kept for display and editing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub lat: f64,
    pub lng: f64,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub address_text: String,
}
