//! Storage seams consumed by the service layer.
//!
//! The service only ever talks to these traits; `DbPool` implements them on
//! Postgres and [`crate::memory::MemoryStore`] implements them in-process for tests.

use async_trait::async_trait;

use crate::db::{DbProvider, connection::DbPool, query};
use crate::error::DbResult;
use crate::model::house::{AddressIndexEntry, House, HouseFields, PublicHouse};
use crate::model::user::User;

#[async_trait]
pub trait HouseStore: Send + Sync {
    async fn find_user_house(&self, owner_id: uuid::Uuid) -> DbResult<Option<House>>;

    async fn find_house_by_address_text(
        &self,
        address_text: &str,
        exclude_owner: uuid::Uuid,
    ) -> DbResult<Option<House>>;

    async fn create_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House>;

    async fn update_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House>;

    async fn list_giving_houses(&self) -> DbResult<Vec<PublicHouse>>;

    async fn address_index(&self) -> DbResult<Vec<AddressIndexEntry>>;
}

#[async_trait]
pub trait UserStore: Send + Sync {
    async fn create_user(&self, username: &str, password_hash: &str) -> DbResult<User>;

    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<User>>;
}

/// Everything the HTTP layer needs from storage.
pub trait Store: HouseStore + UserStore {}

impl<T: HouseStore + UserStore + ?Sized> Store for T {}

#[async_trait]
impl HouseStore for DbPool {
    #[tracing::instrument(skip(self))]
    async fn find_user_house(&self, owner_id: uuid::Uuid) -> DbResult<Option<House>> {
        let mut conn = self.get_connection().await?;
        query::house::find_by_owner(&mut conn, owner_id).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_house_by_address_text(
        &self,
        address_text: &str,
        exclude_owner: uuid::Uuid,
    ) -> DbResult<Option<House>> {
        let mut conn = self.get_connection().await?;
        query::house::find_by_address_text(&mut conn, address_text, exclude_owner).await
    }

    #[tracing::instrument(skip(self, fields))]
    async fn create_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House> {
        let mut conn = self.get_connection().await?;
        query::house::insert(&mut conn, owner_id, fields).await
    }

    #[tracing::instrument(skip(self, fields))]
    async fn update_house(&self, owner_id: uuid::Uuid, fields: &HouseFields) -> DbResult<House> {
        let mut conn = self.get_connection().await?;
        query::house::replace(&mut conn, owner_id, fields).await
    }

    #[tracing::instrument(skip(self))]
    async fn list_giving_houses(&self) -> DbResult<Vec<PublicHouse>> {
        let mut conn = self.get_connection().await?;
        query::house::list_giving(&mut conn).await
    }

    #[tracing::instrument(skip(self))]
    async fn address_index(&self) -> DbResult<Vec<AddressIndexEntry>> {
        let mut conn = self.get_connection().await?;
        query::house::address_index(&mut conn).await
    }
}

#[async_trait]
impl UserStore for DbPool {
    #[tracing::instrument(skip(self, password_hash))]
    async fn create_user(&self, username: &str, password_hash: &str) -> DbResult<User> {
        let mut conn = self.get_connection().await?;
        query::user::insert(&mut conn, username, password_hash).await
    }

    #[tracing::instrument(skip(self))]
    async fn find_user_by_username(&self, username: &str) -> DbResult<Option<User>> {
        let mut conn = self.get_connection().await?;
        query::user::find_by_username(&mut conn, username).await
    }
}
