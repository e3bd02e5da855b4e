//! In-process provider with canned answers, for exercising the search pipeline
//! without network access.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{GeocodeError, GeocodeResult};
use crate::place::{Coordinate, PlaceAddress, PlaceId, PlaceRecord};
use crate::provider::GeocodeProvider;

/// A call received by a [`ScriptedProvider`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProviderCall {
    Generic {
        query: String,
        limit: usize,
    },
    Structured {
        house_number: String,
        street_and_rest: String,
        limit: usize,
    },
}

type Answer = Result<Vec<PlaceRecord>, String>;

/// Provider answering from a script keyed by query text.
///
/// Queries without a scripted answer return no records.
#[derive(Debug, Default)]
pub struct ScriptedProvider {
    generic: HashMap<String, Answer>,
    structured: HashMap<(String, String), Answer>,
    calls: Mutex<Vec<ProviderCall>>,
}

impl ScriptedProvider {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_generic(mut self, query: &str, records: Vec<PlaceRecord>) -> Self {
        self.generic.insert(query.to_string(), Ok(records));
        self
    }

    #[must_use]
    pub fn with_generic_failure(mut self, query: &str) -> Self {
        self.generic
            .insert(query.to_string(), Err(format!("scripted failure for {query:?}")));
        self
    }

    #[must_use]
    pub fn with_structured(
        mut self,
        house_number: &str,
        street_and_rest: &str,
        records: Vec<PlaceRecord>,
    ) -> Self {
        self.structured.insert(
            (house_number.to_string(), street_and_rest.to_string()),
            Ok(records),
        );
        self
    }

    #[must_use]
    pub fn with_structured_failure(mut self, house_number: &str, street_and_rest: &str) -> Self {
        self.structured.insert(
            (house_number.to_string(), street_and_rest.to_string()),
            Err(format!(
                "scripted failure for {house_number:?} {street_and_rest:?}"
            )),
        );
        self
    }

    /// Calls received so far, in order.
    #[must_use]
    pub fn calls(&self) -> Vec<ProviderCall> {
        self.lock_calls().clone()
    }

    fn lock_calls(&self) -> MutexGuard<'_, Vec<ProviderCall>> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn answer(answer: Option<&Answer>) -> GeocodeResult<Vec<PlaceRecord>> {
        match answer {
            Some(Ok(records)) => Ok(records.clone()),
            Some(Err(message)) => Err(GeocodeError::Unavailable(message.clone())),
            None => Ok(Vec::new()),
        }
    }
}

#[async_trait]
impl GeocodeProvider for ScriptedProvider {
    async fn generic_search(&self, query: &str, limit: usize) -> GeocodeResult<Vec<PlaceRecord>> {
        self.lock_calls().push(ProviderCall::Generic {
            query: query.to_string(),
            limit,
        });
        Self::answer(self.generic.get(query))
    }

    async fn structured_search(
        &self,
        house_number: &str,
        street_and_rest: &str,
        limit: usize,
    ) -> GeocodeResult<Vec<PlaceRecord>> {
        self.lock_calls().push(ProviderCall::Structured {
            house_number: house_number.to_string(),
            street_and_rest: street_and_rest.to_string(),
            limit,
        });
        let key = (house_number.to_string(), street_and_rest.to_string());
        Self::answer(self.structured.get(&key))
    }
}

/// ## Summary
/// Builds a record located in Nuevo León with the given id and label.
#[must_use]
pub fn place(place_id: PlaceId, display_name: &str) -> PlaceRecord {
    PlaceRecord {
        place_id,
        lat: Coordinate::Text("25.6866".to_string()),
        lon: Coordinate::Text("-100.3161".to_string()),
        display_name: display_name.to_string(),
        address: PlaceAddress {
            state: Some("Nuevo León".to_string()),
            country: Some("México".to_string()),
            country_code: Some("mx".to_string()),
            ..PlaceAddress::default()
        },
        importance: None,
    }
}

impl PlaceRecord {
    #[must_use]
    pub fn with_house_number(mut self, house_number: &str) -> Self {
        self.address.house_number = Some(house_number.to_string());
        self
    }

    #[must_use]
    pub fn with_road(mut self, road: &str) -> Self {
        self.address.road = Some(road.to_string());
        self
    }

    #[must_use]
    pub fn with_importance(mut self, importance: f64) -> Self {
        self.importance = Some(importance);
        self
    }

    #[must_use]
    pub fn with_state(mut self, state: Option<&str>) -> Self {
        self.address.state = state.map(str::to_string);
        self
    }

    #[must_use]
    pub fn with_state_district(mut self, state_district: &str) -> Self {
        self.address.state_district = Some(state_district.to_string());
        self
    }

    #[must_use]
    pub fn with_county(mut self, county: &str) -> Self {
        self.address.county = Some(county.to_string());
        self
    }

    #[must_use]
    pub fn with_coordinates(mut self, lat: Coordinate, lon: Coordinate) -> Self {
        self.lat = lat;
        self.lon = lon;
        self
    }
}
