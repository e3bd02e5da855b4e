use diesel::{pg::Pg, prelude::*};
use serde::{Deserialize, Serialize};

use spooky_core::types::Address;

use crate::db::schema;

#[derive(
    Debug, Clone, PartialEq, Identifiable, Queryable, Selectable, Serialize, Deserialize,
)]
#[diesel(table_name = schema::houses)]
#[diesel(check_for_backend(Pg))]
#[serde(rename_all = "camelCase")]
pub struct House {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub lat: f64,
    pub lng: f64,
    pub address_text: String,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub giving_candy: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl House {
    /// The canonical address embedded in this row.
    #[must_use]
    pub fn address(&self) -> Address {
        Address {
            lat: self.lat,
            lng: self.lng,
            street: self.street.clone(),
            house_number: self.house_number.clone(),
            suburb: self.suburb.clone(),
            city: self.city.clone(),
            municipality: self.municipality.clone(),
            state: self.state.clone(),
            postcode: self.postcode.clone(),
            country: self.country.clone(),
            address_text: self.address_text.clone(),
        }
    }
}

/// Everything an owner controls about their house. Writes replace all of it.
#[derive(Debug, Clone, PartialEq)]
pub struct HouseFields {
    pub address: Address,
    pub giving_candy: bool,
}

#[derive(Debug, Clone, Insertable)]
#[diesel(table_name = schema::houses)]
pub struct NewHouse<'a> {
    pub id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub lat: f64,
    pub lng: f64,
    pub address_text: &'a str,
    pub street: Option<&'a str>,
    pub house_number: Option<&'a str>,
    pub suburb: Option<&'a str>,
    pub city: Option<&'a str>,
    pub municipality: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postcode: Option<&'a str>,
    pub country: Option<&'a str>,
    pub giving_candy: bool,
}

impl<'a> NewHouse<'a> {
    #[must_use]
    pub fn new(owner_id: uuid::Uuid, fields: &'a HouseFields) -> Self {
        let address = &fields.address;
        Self {
            id: uuid::Uuid::now_v7(),
            user_id: owner_id,
            lat: address.lat,
            lng: address.lng,
            address_text: &address.address_text,
            street: address.street.as_deref(),
            house_number: address.house_number.as_deref(),
            suburb: address.suburb.as_deref(),
            city: address.city.as_deref(),
            municipality: address.municipality.as_deref(),
            state: address.state.as_deref(),
            postcode: address.postcode.as_deref(),
            country: address.country.as_deref(),
            giving_candy: fields.giving_candy,
        }
    }
}

/// Full replacement of an existing house; `None` clears the column.
#[derive(Debug, Clone, AsChangeset)]
#[diesel(table_name = schema::houses)]
#[diesel(treat_none_as_null = true)]
pub struct HouseChangeset<'a> {
    pub lat: f64,
    pub lng: f64,
    pub address_text: &'a str,
    pub street: Option<&'a str>,
    pub house_number: Option<&'a str>,
    pub suburb: Option<&'a str>,
    pub city: Option<&'a str>,
    pub municipality: Option<&'a str>,
    pub state: Option<&'a str>,
    pub postcode: Option<&'a str>,
    pub country: Option<&'a str>,
    pub giving_candy: bool,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl<'a> HouseChangeset<'a> {
    #[must_use]
    pub fn new(fields: &'a HouseFields) -> Self {
        let address = &fields.address;
        Self {
            lat: address.lat,
            lng: address.lng,
            address_text: &address.address_text,
            street: address.street.as_deref(),
            house_number: address.house_number.as_deref(),
            suburb: address.suburb.as_deref(),
            city: address.city.as_deref(),
            municipality: address.municipality.as_deref(),
            state: address.state.as_deref(),
            postcode: address.postcode.as_deref(),
            country: address.country.as_deref(),
            giving_candy: fields.giving_candy,
            updated_at: chrono::Utc::now(),
        }
    }
}

/// A giving house as shown on the public map, with its owner's username.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicHouse {
    pub id: uuid::Uuid,
    pub lat: f64,
    pub lng: f64,
    pub address_text: String,
    pub street: Option<String>,
    pub house_number: Option<String>,
    pub suburb: Option<String>,
    pub city: Option<String>,
    pub municipality: Option<String>,
    pub state: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub username: String,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl PublicHouse {
    #[must_use]
    pub fn new(house: House, username: String) -> Self {
        Self {
            id: house.id,
            lat: house.lat,
            lng: house.lng,
            address_text: house.address_text,
            street: house.street,
            house_number: house.house_number,
            suburb: house.suburb,
            city: house.city,
            municipality: house.municipality,
            state: house.state,
            postcode: house.postcode,
            country: house.country,
            username,
            updated_at: house.updated_at,
        }
    }
}

/// Key columns of a house, used to audit address uniqueness.
#[derive(Debug, Clone, PartialEq, Eq, Queryable)]
pub struct AddressIndexEntry {
    pub house_id: uuid::Uuid,
    pub user_id: uuid::Uuid,
    pub address_text: String,
}
