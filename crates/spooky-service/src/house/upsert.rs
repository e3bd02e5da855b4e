use spooky_core::types::Address;
use spooky_db::error::DbError;
use spooky_db::model::house::{House, HouseFields};
use spooky_db::store::HouseStore;

use crate::error::{ServiceError, ServiceResult};

/// ## Summary
/// Creates or fully replaces the house owned by `owner_id`.
///
/// The address text must not belong to another user's house; this is checked
/// whether or not the owner already has a house. An update replaces every
/// field, so optional fields absent from `address` are cleared.
///
/// ## Errors
/// Returns [`ServiceError::DuplicateAddress`] if another user holds the same
/// address text, [`ServiceError::Conflict`] if a unique index rejects the
/// write anyway, or a database error.
#[tracing::instrument(skip(store, address), fields(address_text = %address.address_text))]
pub async fn upsert_house<S: HouseStore + ?Sized>(
    store: &S,
    owner_id: uuid::Uuid,
    address: Address,
    giving_candy: bool,
) -> ServiceResult<House> {
    let existing = store.find_user_house(owner_id).await?;

    if let Some(taken) = store
        .find_house_by_address_text(&address.address_text, owner_id)
        .await?
    {
        tracing::debug!(house_id = %taken.id, "Address already registered by another user");
        return Err(ServiceError::DuplicateAddress(address.address_text));
    }

    let fields = HouseFields {
        address,
        giving_candy,
    };

    let written = match existing {
        Some(house) => {
            tracing::debug!(house_id = %house.id, "Replacing existing house");
            store.update_house(owner_id, &fields).await
        }
        None => store.create_house(owner_id, &fields).await,
    };

    let house = written.map_err(|e| match e {
        DbError::UniqueViolation(constraint) => {
            tracing::warn!(%constraint, "House write rejected by unique index");
            ServiceError::Conflict(constraint)
        }
        other => other.into(),
    })?;

    tracing::info!(house_id = %house.id, giving_candy = house.giving_candy, "House saved");
    Ok(house)
}
