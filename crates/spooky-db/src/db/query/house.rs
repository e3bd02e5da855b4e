use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema};
use crate::error::DbResult;
use crate::model::house::{
    AddressIndexEntry, House, HouseChangeset, HouseFields, NewHouse, PublicHouse,
};

/// ## Summary
/// Loads the house owned by `owner_id`, if any.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_owner(
    conn: &mut DbConnection<'_>,
    owner_id: uuid::Uuid,
) -> DbResult<Option<House>> {
    Ok(schema::houses::table
        .filter(schema::houses::user_id.eq(owner_id))
        .select(House::as_select())
        .first::<House>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Loads a house with exactly `address_text` that belongs to someone other than `exclude_owner`.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_address_text(
    conn: &mut DbConnection<'_>,
    address_text: &str,
    exclude_owner: uuid::Uuid,
) -> DbResult<Option<House>> {
    Ok(schema::houses::table
        .filter(schema::houses::address_text.eq(address_text))
        .filter(schema::houses::user_id.ne(exclude_owner))
        .select(House::as_select())
        .first::<House>(conn)
        .await
        .optional()?)
}

/// ## Summary
/// Inserts a house for `owner_id`.
///
/// ## Errors
/// Returns [`crate::error::DbError::UniqueViolation`] if the owner already has a
/// house or the address text is taken.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    owner_id: uuid::Uuid,
    fields: &HouseFields,
) -> DbResult<House> {
    Ok(diesel::insert_into(schema::houses::table)
        .values(&NewHouse::new(owner_id, fields))
        .returning(House::as_returning())
        .get_result::<House>(conn)
        .await?)
}

/// ## Summary
/// Replaces every owner-controlled column of the house owned by `owner_id`.
///
/// ## Errors
/// Returns an error if no such house exists, or
/// [`crate::error::DbError::UniqueViolation`] if the address text is taken.
pub async fn replace(
    conn: &mut DbConnection<'_>,
    owner_id: uuid::Uuid,
    fields: &HouseFields,
) -> DbResult<House> {
    Ok(
        diesel::update(schema::houses::table.filter(schema::houses::user_id.eq(owner_id)))
            .set(&HouseChangeset::new(fields))
            .returning(House::as_returning())
            .get_result::<House>(conn)
            .await?,
    )
}

/// ## Summary
/// Lists houses that are giving candy together with their owners' usernames.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn list_giving(conn: &mut DbConnection<'_>) -> DbResult<Vec<PublicHouse>> {
    let rows = schema::houses::table
        .inner_join(schema::users::table)
        .filter(schema::houses::giving_candy.eq(true))
        .order(schema::houses::created_at.asc())
        .select((House::as_select(), schema::users::username))
        .load::<(House, String)>(conn)
        .await?;

    Ok(rows
        .into_iter()
        .map(|(house, username)| PublicHouse::new(house, username))
        .collect())
}

/// ## Summary
/// Loads the id, owner and address text of every house, ordered by address text.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn address_index(conn: &mut DbConnection<'_>) -> DbResult<Vec<AddressIndexEntry>> {
    Ok(schema::houses::table
        .select((
            schema::houses::id,
            schema::houses::user_id,
            schema::houses::address_text,
        ))
        .order((schema::houses::address_text.asc(), schema::houses::id.asc()))
        .load::<AddressIndexEntry>(conn)
        .await?)
}
