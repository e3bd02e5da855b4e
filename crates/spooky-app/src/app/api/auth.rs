use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::{Deserialize, Serialize};

use super::AUTH_ROUTE_COMPONENT;
use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use crate::store_handler::get_store_from_depot;
use spooky_service::auth::{TokenIssuer, login, register};

/// ## Summary
/// Credentials payload shared by register and login.
///
/// Missing fields deserialize as empty and are rejected by the service.
#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct RegisterResponse {
    pub id: uuid::Uuid,
    pub username: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
}

async fn parse_credentials(req: &mut Request) -> AppResult<CredentialsRequest> {
    req.parse_json::<CredentialsRequest>().await.map_err(|e| {
        tracing::debug!(error = ?e, "Failed to parse credentials");
        AppError::InvalidBody
    })
}

async fn register_user(req: &mut Request, depot: &Depot) -> AppResult<RegisterResponse> {
    let credentials = parse_credentials(req).await?;
    let store = get_store_from_depot(depot)?;

    let user = register(&*store, &credentials.username, &credentials.password).await?;

    Ok(RegisterResponse {
        id: user.id,
        username: user.username,
    })
}

async fn login_user(req: &mut Request, depot: &Depot) -> AppResult<LoginResponse> {
    let credentials = parse_credentials(req).await?;
    let store = get_store_from_depot(depot)?;
    let config = get_config_from_depot(depot)?;
    let issuer = TokenIssuer::from_config(&config.auth);

    let token = login(&*store, &issuer, &credentials.username, &credentials.password).await?;

    Ok(LoginResponse { token })
}

/// ## Summary
/// POST /auth/register - Register a new user with username and password
///
/// ## Errors
/// Returns HTTP 400 if either credential is missing or empty
/// Returns HTTP 409 if the username is taken
#[handler]
async fn register_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match register_user(req, depot).await {
        Ok(created) => {
            res.status_code(StatusCode::CREATED);
            res.render(Json(created));
        }
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// POST /auth/login - Exchange credentials for a bearer token
///
/// ## Errors
/// Returns HTTP 400 if either credential is missing or empty
/// Returns HTTP 401 if the credentials do not match
#[handler]
async fn login_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match login_user(req, depot).await {
        Ok(token) => {
            res.status_code(StatusCode::OK);
            res.render(Json(token));
        }
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(AUTH_ROUTE_COMPONENT)
        .push(Router::with_path("register").post(register_handler))
        .push(Router::with_path("login").post(login_handler))
}
