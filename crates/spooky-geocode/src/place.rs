use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Provider-assigned identifier, unique per provider.
pub type PlaceId = u64;

/// One search result as returned by the provider.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PlaceRecord {
    pub place_id: PlaceId,
    pub lat: Coordinate,
    pub lon: Coordinate,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub address: PlaceAddress,
    #[serde(default)]
    pub importance: Option<f64>,
}

impl PlaceRecord {
    /// Whether the provider resolved this result down to a house number.
    #[must_use]
    pub fn has_house_number(&self) -> bool {
        self.address.has_house_number()
    }
}

/// Nominatim sends coordinates as decimal strings; other deployments send numbers.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Coordinate {
    Number(f64),
    Text(String),
}

impl Coordinate {
    /// Parsed value, or `None` when the text is not a finite decimal.
    #[must_use]
    pub fn value(&self) -> Option<f64> {
        let parsed = match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse::<f64>().ok(),
        };
        parsed.filter(|value| value.is_finite())
    }
}

/// Structured address details of a result (`addressdetails=1`).
///
/// The provider uses several keys for the same logical field depending on the
/// kind of place (`road`/`street`, `city`/`town`, ...). The known keys are
/// modelled explicitly; anything else is kept verbatim in `other` so clients
/// see the full provider payload.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct PlaceAddress {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub road: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub street: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub house_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suburb: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub neighbourhood: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub colony: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub city: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub town: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub county: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub municipality: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_district: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub postcode: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country_code: Option<String>,
    #[serde(flatten)]
    pub other: BTreeMap<String, serde_json::Value>,
}

impl PlaceAddress {
    #[must_use]
    pub fn has_house_number(&self) -> bool {
        self.house_number.as_deref().is_some_and(|n| !n.is_empty())
    }

    /// Administrative fields consulted by the region filter, most specific last.
    #[must_use]
    pub fn region_fields(&self) -> [Option<&str>; 3] {
        [
            self.state.as_deref(),
            self.state_district.as_deref(),
            self.county.as_deref(),
        ]
    }
}
