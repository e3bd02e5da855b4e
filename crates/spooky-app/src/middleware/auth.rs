use salvo::Depot;
use salvo::http::header::AUTHORIZATION;

use crate::config::get_config_from_depot;
use crate::error::{AppError, AppResult};
use spooky_service::auth::{Claims, TokenIssuer};

/// Depot key the verified token claims are stored under.
pub const AUTHENTICATED_USER: &str = "authenticated_user";

const BEARER_SCHEME: &str = "Bearer ";

/// ## Summary
/// Extracts the token from an `Authorization: Bearer <token>` header value.
///
/// ## Errors
/// Returns [`AppError::Unauthorized`] if the header is missing, uses another
/// scheme, or carries an empty token.
pub fn bearer_token(header: Option<&str>) -> AppResult<&str> {
    let value = header.ok_or(AppError::Unauthorized("Missing authorization header"))?;

    value
        .strip_prefix(BEARER_SCHEME)
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .ok_or(AppError::Unauthorized("Invalid authorization format"))
}

fn authenticate(req: &salvo::Request, depot: &Depot) -> AppResult<Claims> {
    let header = req
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok());
    let token = bearer_token(header)?;

    let config = get_config_from_depot(depot)?;
    let claims = TokenIssuer::from_config(&config.auth).verify(token)?;
    Ok(claims)
}

/// ## Summary
/// Bearer-token middleware for routes that need a signed-in user.
///
/// ## Side Effects
/// Inserts the verified [`Claims`] into the depot under [`AUTHENTICATED_USER`].
///
/// ## Errors
/// Responds with HTTP 401 and `{error}` when the header is missing, uses
/// another scheme, or the token is invalid or expired.
pub struct BearerAuth;

#[salvo::async_trait]
impl salvo::Handler for BearerAuth {
    #[tracing::instrument(skip(self, req, depot, res, ctrl), fields(
        method = %req.method(),
        path = %req.uri().path()
    ))]
    async fn handle(
        &self,
        req: &mut salvo::Request,
        depot: &mut Depot,
        res: &mut salvo::Response,
        ctrl: &mut salvo::FlowCtrl,
    ) {
        match authenticate(req, depot) {
            Ok(claims) => {
                tracing::debug!(user_id = %claims.sub, "Bearer token accepted");
                depot.insert(AUTHENTICATED_USER, claims);
            }
            Err(e) => {
                e.render(res);
                ctrl.skip_rest();
            }
        }
    }
}

/// ## Summary
/// Retrieves the claims stored by [`BearerAuth`].
///
/// ## Errors
/// Returns an error if the route is not behind [`BearerAuth`].
pub fn get_claims_from_depot(depot: &Depot) -> AppResult<Claims> {
    depot
        .get::<Claims>(AUTHENTICATED_USER)
        .cloned()
        .map_err(|_err| {
            spooky_core::error::CoreError::InvariantViolation("Claims not found in depot").into()
        })
}
