use serde::Deserialize;

use spooky_core::error::{CoreError, CoreResult};
use spooky_core::types::Address;
use spooky_geocode::PlaceAddress;

/// Address payload sent by the client when saving a house.
///
/// Usually built from a chosen suggestion: `fullText` is the suggestion's
/// label, `address` its raw provider fields, and the top-level fields are
/// whatever the user filled in or corrected by hand.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressInput {
    #[serde(default)]
    pub full_text: Option<String>,
    /// Kept as raw JSON so that strings and nulls can be told apart from numbers.
    #[serde(default)]
    pub lat: Option<serde_json::Value>,
    #[serde(default)]
    pub lng: Option<serde_json::Value>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub house_number: Option<String>,
    /// Older clients send the house number under this name.
    #[serde(default)]
    pub number: Option<String>,
    #[serde(default)]
    pub suburb: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub municipality: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub postcode: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub address: Option<PlaceAddress>,
}

impl From<&Address> for AddressInput {
    fn from(address: &Address) -> Self {
        Self {
            full_text: Some(address.address_text.clone()),
            lat: Some(serde_json::Value::from(address.lat)),
            lng: Some(serde_json::Value::from(address.lng)),
            street: address.street.clone(),
            house_number: address.house_number.clone(),
            suburb: address.suburb.clone(),
            city: address.city.clone(),
            municipality: address.municipality.clone(),
            state: address.state.clone(),
            postcode: address.postcode.clone(),
            country: address.country.clone(),
            ..Self::default()
        }
    }
}

/// First non-empty value, in precedence order.
fn first_present<'a>(candidates: impl IntoIterator<Item = Option<&'a String>>) -> Option<String> {
    candidates
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .cloned()
}

fn coordinate(value: Option<&serde_json::Value>) -> Option<f64> {
    match value? {
        serde_json::Value::Number(number) => number.as_f64(),
        _ => None,
    }
}

/// ## Summary
/// Builds the canonical address for `input`.
///
/// Each field takes the first non-empty value from the top-level field and
/// then the provider fallbacks:
///
/// | field        | precedence                                              |
/// |--------------|---------------------------------------------------------|
/// | street       | `street`, `address.road`, `address.street`              |
/// | houseNumber  | `houseNumber`, `number`, `address.house_number`         |
/// | suburb       | `suburb`, `address.suburb`, `.neighbourhood`, `.colony` |
/// | city         | `city`, `address.city`, `address.town`                  |
/// | municipality | `municipality`, `address.county`, `.municipality`       |
/// | state        | `state`, `address.state`                                |
/// | postcode     | `postcode`, `address.postcode`                          |
/// | country      | `country`, `address.country`, `address.country_code`    |
///
/// `addressText` is derived by [`derive_address_text`].
///
/// ## Errors
/// Returns [`CoreError::MissingRequiredField`] if `fullText` is missing or
/// empty, or if `lat` and `lng` are not both JSON numbers.
pub fn normalize(input: &AddressInput) -> CoreResult<Address> {
    let full_text = input
        .full_text
        .as_deref()
        .filter(|text| !text.is_empty())
        .ok_or(CoreError::MissingRequiredField("address.fullText"))?;

    let (Some(lat), Some(lng)) = (coordinate(input.lat.as_ref()), coordinate(input.lng.as_ref()))
    else {
        return Err(CoreError::MissingRequiredField("address.lat/address.lng"));
    };

    let raw = input.address.as_ref();

    let street = first_present([
        input.street.as_ref(),
        raw.and_then(|a| a.road.as_ref()),
        raw.and_then(|a| a.street.as_ref()),
    ]);
    let house_number = first_present([
        input.house_number.as_ref(),
        input.number.as_ref(),
        raw.and_then(|a| a.house_number.as_ref()),
    ]);
    let suburb = first_present([
        input.suburb.as_ref(),
        raw.and_then(|a| a.suburb.as_ref()),
        raw.and_then(|a| a.neighbourhood.as_ref()),
        raw.and_then(|a| a.colony.as_ref()),
    ]);
    let city = first_present([
        input.city.as_ref(),
        raw.and_then(|a| a.city.as_ref()),
        raw.and_then(|a| a.town.as_ref()),
    ]);
    let municipality = first_present([
        input.municipality.as_ref(),
        raw.and_then(|a| a.county.as_ref()),
        raw.and_then(|a| a.municipality.as_ref()),
    ]);
    let state = first_present([input.state.as_ref(), raw.and_then(|a| a.state.as_ref())]);
    let postcode = first_present([input.postcode.as_ref(), raw.and_then(|a| a.postcode.as_ref())]);
    let country = first_present([
        input.country.as_ref(),
        raw.and_then(|a| a.country.as_ref()),
        raw.and_then(|a| a.country_code.as_ref()),
    ]);

    let mut address = Address {
        lat,
        lng,
        street,
        house_number,
        suburb,
        city,
        municipality,
        state,
        postcode,
        country,
        address_text: String::new(),
    };
    address.address_text = derive_address_text(&address, full_text);

    Ok(address)
}

/// ## Summary
/// Canonical display form of `address`, used as the uniqueness key.
///
/// With a street or house number: `"<street> <number>, <suburb>, <city or
/// municipality>, <state>, <postcode>, <country>"`, skipping empty parts.
/// Otherwise, or when that comes out blank, `full_text` is used as-is.
#[must_use]
pub fn derive_address_text(address: &Address, full_text: &str) -> String {
    if address.street.is_none() && address.house_number.is_none() {
        return full_text.to_string();
    }

    let line1 = [address.street.as_deref(), address.house_number.as_deref()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

    let tail = [
        address.suburb.as_deref(),
        address.city.as_deref().or(address.municipality.as_deref()),
        address.state.as_deref(),
        address.postcode.as_deref(),
        address.country.as_deref(),
    ];

    let composed = std::iter::once(Some(line1.trim()))
        .chain(tail)
        .flatten()
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join(", ");

    if composed.trim().is_empty() {
        full_text.to_string()
    } else {
        composed
    }
}
