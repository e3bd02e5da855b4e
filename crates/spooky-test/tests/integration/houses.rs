//! Tests for saving and listing houses.

use salvo::http::StatusCode;
use serde_json::json;

use super::helpers::*;

async fn save_house(app: &TestApp, token: &str, body: &serde_json::Value) -> TestResponse {
    TestRequest::post("/houses/me")
        .bearer(token)
        .json(body)
        .send(&app.service)
        .await
}

// ============================================================================
// Upsert
// ============================================================================

#[test_log::test(tokio::test)]
async fn upsert_creates_house_with_derived_address_text() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let saved = save_house(
        &app,
        &token,
        &json!({ "givingCandy": true, "address": calle_falsa_address() }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(
        saved["addressText"],
        "Calle Falsa 123, Centro, Monterrey, Nuevo Leon"
    );
    assert_eq!(saved["givingCandy"], true);
    assert_eq!(saved["houseNumber"], "123");
    assert!(saved["postcode"].is_null());

    let mine = TestRequest::get("/houses/me")
        .bearer(&token)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(mine["id"], saved["id"]);
}

#[test_log::test(tokio::test)]
async fn same_address_for_another_user_conflicts() {
    let app = TestApp::new();
    let ana = app.signed_in("ana").await;
    let beto = app.signed_in("beto").await;
    let body = json!({ "givingCandy": true, "address": calle_falsa_address() });

    save_house(&app, &ana, &body)
        .await
        .assert_status(StatusCode::OK);

    save_house(&app, &beto, &body)
        .await
        .assert_status(StatusCode::CONFLICT)
        .assert_error("This address is already registered by another user");

    let beto_house = TestRequest::get("/houses/me")
        .bearer(&beto)
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert!(beto_house.is_null());
}

#[test_log::test(tokio::test)]
async fn owner_resubmitting_updates_in_place() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let first = save_house(
        &app,
        &token,
        &json!({ "givingCandy": true, "address": calle_falsa_address() }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    let second = save_house(
        &app,
        &token,
        &json!({ "givingCandy": false, "address": calle_falsa_address() }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(second["id"], first["id"]);
    assert_eq!(second["createdAt"], first["createdAt"]);
    assert_eq!(second["givingCandy"], false);
}

#[test_log::test(tokio::test)]
async fn giving_candy_defaults_to_false() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let saved = save_house(&app, &token, &json!({ "address": calle_falsa_address() }))
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(saved["givingCandy"], false);
}

#[test_log::test(tokio::test)]
async fn provider_fields_fill_in_and_number_alias_is_accepted() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let saved = save_house(
        &app,
        &token,
        &json!({
            "givingCandy": true,
            "address": {
                "fullText": "Madero 45B, Obispado, Monterrey",
                "lat": 25.68,
                "lng": -100.34,
                "number": "45B",
                "address": {
                    "road": "Avenida Madero",
                    "neighbourhood": "Obispado",
                    "town": "Monterrey",
                    "state": "Nuevo León",
                    "country_code": "mx"
                }
            }
        }),
    )
    .await
    .assert_status(StatusCode::OK)
    .json();

    assert_eq!(
        saved["addressText"],
        "Avenida Madero 45B, Obispado, Monterrey, Nuevo León, mx"
    );
    assert_eq!(saved["street"], "Avenida Madero");
    assert_eq!(saved["houseNumber"], "45B");
}

#[test_log::test(tokio::test)]
async fn invalid_addresses_are_bad_requests() {
    let app = TestApp::new();
    let token = app.signed_in("ana").await;

    let missing_address = save_house(&app, &token, &json!({ "givingCandy": true }))
        .await
        .assert_status(StatusCode::BAD_REQUEST)
        .error_message();
    assert!(missing_address.contains("address.fullText"), "{missing_address}");

    let missing_text = save_house(
        &app,
        &token,
        &json!({ "address": { "lat": 25.6, "lng": -100.3 } }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .error_message();
    assert!(missing_text.contains("address.fullText"), "{missing_text}");

    let text_coordinates = save_house(
        &app,
        &token,
        &json!({ "address": { "fullText": "Calle Falsa", "lat": "25.6", "lng": "-100.3" } }),
    )
    .await
    .assert_status(StatusCode::BAD_REQUEST)
    .error_message();
    assert!(
        text_coordinates.contains("address.lat/address.lng"),
        "{text_coordinates}"
    );
}

#[test_log::test(tokio::test)]
async fn upsert_requires_authentication() {
    let app = TestApp::new();

    TestRequest::post("/houses/me")
        .json(&json!({ "givingCandy": true, "address": calle_falsa_address() }))
        .send(&app.service)
        .await
        .assert_status(StatusCode::UNAUTHORIZED);
}

// ============================================================================
// Public listing
// ============================================================================

#[test_log::test(tokio::test)]
async fn public_list_shows_only_giving_houses_with_owner() {
    let app = TestApp::new();
    let ana = app.signed_in("ana").await;
    let beto = app.signed_in("beto").await;

    save_house(
        &app,
        &ana,
        &json!({ "givingCandy": true, "address": calle_falsa_address() }),
    )
    .await
    .assert_status(StatusCode::OK);

    save_house(
        &app,
        &beto,
        &json!({
            "givingCandy": false,
            "address": {
                "fullText": "Parque Fundidora, Monterrey",
                "lat": 25.6785,
                "lng": -100.2846
            }
        }),
    )
    .await
    .assert_status(StatusCode::OK);

    let listed = TestRequest::get("/houses")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let houses = listed.as_array().expect("array of houses");
    assert_eq!(houses.len(), 1);

    let house = &houses[0];
    assert_eq!(house["username"], "ana");
    assert_eq!(
        house["addressText"],
        "Calle Falsa 123, Centro, Monterrey, Nuevo Leon"
    );
    assert!(house.get("updatedAt").is_some());
    assert!(house.get("userId").is_none());
    assert!(house.get("givingCandy").is_none());
}

#[test_log::test(tokio::test)]
async fn public_list_is_empty_without_houses() {
    let app = TestApp::new();

    let listed = TestRequest::get("/houses")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(listed, json!([]));
}
