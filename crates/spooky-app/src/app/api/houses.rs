use salvo::{Depot, Request, Response, Router, handler, http::StatusCode, writing::Json};
use serde::Deserialize;

use super::HOUSES_ROUTE_COMPONENT;
use crate::error::{AppError, AppResult};
use crate::middleware::auth::{BearerAuth, get_claims_from_depot};
use crate::store_handler::get_store_from_depot;
use spooky_core::error::CoreError;
use spooky_db::model::house::{House, PublicHouse};
use spooky_db::store::HouseStore;
use spooky_service::house::{AddressInput, normalize, upsert_house};

/// ## Summary
/// Body of POST /houses/me
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpsertHouseRequest {
    #[serde(default)]
    pub giving_candy: bool,
    #[serde(default)]
    pub address: Option<AddressInput>,
}

async fn list_public(depot: &Depot) -> AppResult<Vec<PublicHouse>> {
    let store = get_store_from_depot(depot)?;
    Ok(store.list_giving_houses().await?)
}

async fn find_mine(depot: &Depot) -> AppResult<Option<House>> {
    let claims = get_claims_from_depot(depot)?;
    let store = get_store_from_depot(depot)?;
    Ok(store.find_user_house(claims.sub).await?)
}

async fn save_mine(req: &mut Request, depot: &Depot) -> AppResult<House> {
    let claims = get_claims_from_depot(depot)?;
    let body = req
        .parse_json::<UpsertHouseRequest>()
        .await
        .map_err(|e| {
            tracing::debug!(error = ?e, "Failed to parse house payload");
            AppError::InvalidBody
        })?;

    let input = body
        .address
        .ok_or(CoreError::MissingRequiredField("address.fullText"))?;
    let address = normalize(&input)?;

    let store = get_store_from_depot(depot)?;
    Ok(upsert_house(&*store, claims.sub, address, body.giving_candy).await?)
}

/// ## Summary
/// GET /houses - Houses currently giving candy, with their owners' usernames
#[handler]
async fn list_handler(depot: &mut Depot, res: &mut Response) {
    match list_public(depot).await {
        Ok(houses) => res.render(Json(houses)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// GET /houses/me - The caller's house, or `null`
#[handler]
async fn get_mine_handler(depot: &mut Depot, res: &mut Response) {
    match find_mine(depot).await {
        Ok(house) => res.render(Json(house)),
        Err(e) => e.render(res),
    }
}

/// ## Summary
/// POST /houses/me - Create or replace the caller's house
///
/// ## Errors
/// Returns HTTP 400 if the address is missing, has no `fullText`, or lacks numeric coordinates
/// Returns HTTP 409 if another user already registered the same address
#[handler]
async fn upsert_mine_handler(req: &mut Request, depot: &mut Depot, res: &mut Response) {
    match save_mine(req, depot).await {
        Ok(house) => {
            res.status_code(StatusCode::OK);
            res.render(Json(house));
        }
        Err(e) => e.render(res),
    }
}

#[must_use]
pub fn routes() -> Router {
    Router::with_path(HOUSES_ROUTE_COMPONENT)
        .get(list_handler)
        .push(
            Router::with_path("me")
                .hoop(BearerAuth)
                .get(get_mine_handler)
                .post(upsert_mine_handler),
        )
}
