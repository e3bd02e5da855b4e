use diesel::prelude::*;
use diesel_async::RunQueryDsl;

use crate::db::{connection::DbConnection, schema};
use crate::error::DbResult;
use crate::model::user::{NewUser, User};

/// ## Summary
/// Inserts a user with an already-hashed password.
///
/// ## Errors
/// Returns [`crate::error::DbError::UniqueViolation`] if the username is taken.
pub async fn insert(
    conn: &mut DbConnection<'_>,
    username: &str,
    password_hash: &str,
) -> DbResult<User> {
    let new_user = NewUser {
        id: uuid::Uuid::now_v7(),
        username,
        password_hash,
    };

    Ok(diesel::insert_into(schema::users::table)
        .values(&new_user)
        .returning(User::as_returning())
        .get_result::<User>(conn)
        .await?)
}

/// ## Summary
/// Loads a user by username.
///
/// ## Errors
/// Returns an error if the query fails.
pub async fn find_by_username(
    conn: &mut DbConnection<'_>,
    username: &str,
) -> DbResult<Option<User>> {
    Ok(schema::users::table
        .filter(schema::users::username.eq(username))
        .select(User::as_select())
        .first::<User>(conn)
        .await
        .optional()?)
}
