use spooky_db::error::DbError;
use spooky_db::model::user::User;
use spooky_db::store::UserStore;

use super::password::{hash_password, verify_password};
use super::token::TokenIssuer;
use crate::error::{ServiceError, ServiceResult};

fn require_credentials(username: &str, password: &str) -> ServiceResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(ServiceError::ValidationError(
            "username and password are required".to_string(),
        ));
    }
    Ok(())
}

/// ## Summary
/// Registers a user with an Argon2id password hash.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] if either credential is empty,
/// [`ServiceError::UsernameTaken`] if the username exists, or a database error.
#[tracing::instrument(skip(store, password))]
pub async fn register<S: UserStore + ?Sized>(
    store: &S,
    username: &str,
    password: &str,
) -> ServiceResult<User> {
    require_credentials(username, password)?;

    if store.find_user_by_username(username).await?.is_some() {
        return Err(ServiceError::UsernameTaken(username.to_string()));
    }

    let password_hash = hash_password(password)?;
    let user = store
        .create_user(username, &password_hash)
        .await
        .map_err(|e| match e {
            DbError::UniqueViolation(_) => ServiceError::UsernameTaken(username.to_string()),
            other => other.into(),
        })?;

    tracing::info!(user_id = %user.id, "User registered");
    Ok(user)
}

/// ## Summary
/// Checks credentials and issues a bearer token.
///
/// Unknown usernames and wrong passwords fail the same way.
///
/// ## Errors
/// Returns [`ServiceError::ValidationError`] if either credential is empty,
/// [`ServiceError::NotAuthenticated`] on bad credentials, or a database error.
#[tracing::instrument(skip(store, issuer, password))]
pub async fn login<S: UserStore + ?Sized>(
    store: &S,
    issuer: &TokenIssuer,
    username: &str,
    password: &str,
) -> ServiceResult<String> {
    require_credentials(username, password)?;

    let user = store
        .find_user_by_username(username)
        .await?
        .ok_or(ServiceError::NotAuthenticated)?;

    verify_password(password, &user.password_hash)?;

    tracing::debug!(user_id = %user.id, "User logged in");
    issuer.issue(user.id, &user.username)
}
