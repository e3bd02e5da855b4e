//! In-process store mirroring the Postgres constraints, for tests.

use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use async_trait::async_trait;

use crate::error::{DbError, DbResult};
use crate::model::house::{AddressIndexEntry, House, HouseFields, PublicHouse};
use crate::model::user::User;
use crate::store::{HouseStore, UserStore};

#[derive(Debug, Default)]
struct State {
    users: Vec<User>,
    houses: Vec<House>,
}

impl State {
    fn address_taken(&self, address_text: &str, except_owner: uuid::Uuid) -> bool {
        self.houses
            .iter()
            .any(|h| h.address_text == address_text && h.user_id != except_owner)
    }
}

/// Store backed by vectors behind a mutex.
///
/// Enforces the same unique keys as the migrations: `users.username`,
/// `houses.user_id` and `houses.address_text`.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    state: Arc<Mutex<State>>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Inserts a house row as-is, skipping the unique checks.
    ///
    /// Lets tests seed data that the constraints would otherwise refuse, such
    /// as rows written before a constraint existed.
    pub fn seed_house(&self, house: House) {
        self.lock().houses.push(house);
    }
}

fn house_row(
    id: uuid::Uuid,
    owner_id: uuid::Uuid,
    fields: &HouseFields,
    created_at: chrono::DateTime<chrono::Utc>,
    updated_at: chrono::DateTime<chrono::Utc>,
) -> House {
    let address = &fields.address;
    House {
        id,
        user_id: owner_id,
        lat: address.lat,
        lng: address.lng,
        address_text: address.address_text.clone(),
        street: address.street.clone(),
        house_number: address.house_number.clone(),
        suburb: address.suburb.clone(),
        city: address.city.clone(),
        municipality: address.municipality.clone(),
        state: address.state.clone(),
        postcode: address.postcode.clone(),
        country: address.country.clone(),
        giving_candy: fields.giving_candy,
        created_at,
        updated_at,
    }
}

#[async_trait]
impl HouseStore for MemoryStore {
    async fn find_user_house(&self, owner_id: uuid::Uuid) -> DbResult<Option<House>> {
        Ok(self
            .lock()
            .houses
            .iter()
            .find(|h| h.user_id == owner_id)
            .cloned())
    }

    async fn find_house_by_address_text(
        &self,
        address_text: &str,
        exclude_owner: uuid::Uuid,
    ) -> DbResult<Option<House>> {
        Ok(self
            .lock()
            .houses
            .iter()
            .find(|h| h.address_text == address_text && h.user_id != exclude_owner)
            .cloned())
    }

    async fn create_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House> {
        let mut state = self.lock();
        if state.houses.iter().any(|h| h.user_id == owner_id) {
            return Err(DbError::UniqueViolation("houses_user_id_key".to_string()));
        }
        if state.address_taken(&fields.address.address_text, owner_id) {
            return Err(DbError::UniqueViolation(
                "houses_address_text_key".to_string(),
            ));
        }

        let now = chrono::Utc::now();
        let house = house_row(uuid::Uuid::now_v7(), owner_id, fields, now, now);
        state.houses.push(house.clone());
        Ok(house)
    }

    async fn update_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House> {
        let mut state = self.lock();
        if state.address_taken(&fields.address.address_text, owner_id) {
            return Err(DbError::UniqueViolation(
                "houses_address_text_key".to_string(),
            ));
        }

        let slot = state
            .houses
            .iter_mut()
            .find(|h| h.user_id == owner_id)
            .ok_or(DbError::DatabaseError(diesel::result::Error::NotFound))?;

        *slot = house_row(slot.id, owner_id, fields, slot.created_at, chrono::Utc::now());
        Ok(slot.clone())
    }

    async fn list_giving_houses(&self) -> DbResult<Vec<PublicHouse>> {
        let state = self.lock();
        let mut giving: Vec<&House> = state.houses.iter().filter(|h| h.giving_candy).collect();
        giving.sort_by_key(|h| h.created_at);

        Ok(giving
            .into_iter()
            .filter_map(|house| {
                let owner = state.users.iter().find(|u| u.id == house.user_id)?;
                Some(PublicHouse::new(house.clone(), owner.username.clone()))
            })
            .collect())
    }

    async fn address_index(&self) -> DbResult<Vec<AddressIndexEntry>> {
        let mut entries: Vec<AddressIndexEntry> = self
            .lock()
            .houses
            .iter()
            .map(|h| AddressIndexEntry {
                house_id: h.id,
                user_id: h.user_id,
                address_text: h.address_text.clone(),
            })
            .collect();
        entries.sort_by(|a, b| {
            a.address_text
                .cmp(&b.address_text)
                .then_with(|| a.house_id.cmp(&b.house_id))
        });
        Ok(entries)
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, username: &str, password_hash: &str) -> DbResult<User> {
        let mut state = self.lock();
        if state.users.iter().any(|u| u.username == username) {
            return Err(DbError::UniqueViolation("users_username_key".to_string()));
        }

        let user = User {
            id: uuid::Uuid::now_v7(),
            username: username.to_string(),
            password_hash: password_hash.to_string(),
            created_at: chrono::Utc::now(),
        };
        state.users.push(user.clone());
        Ok(user)
    }

    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<User>> {
        Ok(self
            .lock()
            .users
            .iter()
            .find(|u| u.username == username)
            .cloned())
    }
}
