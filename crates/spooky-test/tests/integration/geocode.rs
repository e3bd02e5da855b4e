//! Tests for address search.

use salvo::http::StatusCode;

use spooky_test::component::config::Settings;
use spooky_test::component::places::{ProviderCall, ScriptedProvider, place};

use super::helpers::*;

fn display_names(body: &serde_json::Value) -> Vec<&str> {
    body.as_array()
        .expect("search returns an array")
        .iter()
        .map(|c| c["displayName"].as_str().expect("displayName"))
        .collect()
}

fn generic_calls(app: &TestApp) -> usize {
    app.provider
        .calls()
        .iter()
        .filter(|call| matches!(call, ProviderCall::Generic { .. }))
        .count()
}

fn throttled_settings(max_requests: usize) -> Settings {
    let mut settings = test_config();
    settings.geocode.rate_limit_max_requests = max_requests;
    settings
}

#[test_log::test(tokio::test)]
async fn blank_query_returns_nothing_without_calling_provider() {
    let app = TestApp::with_settings(throttled_settings(1), ScriptedProvider::new());

    for path in ["/geocode/search", "/geocode/search?q=", "/geocode/search?q=%20%20"] {
        let body = TestRequest::get(path)
            .send(&app.service)
            .await
            .assert_status(StatusCode::OK)
            .json();
        assert_eq!(body, serde_json::json!([]));
    }

    assert!(app.provider.calls().is_empty());

    // Blank queries did not use up the single allowed call.
    TestRequest::get("/geocode/search?q=Madero")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);
}

#[test_log::test(tokio::test)]
async fn madero_123_prefers_structured_match_with_house_number() {
    let provider = ScriptedProvider::new()
        .with_generic(
            "Madero 123",
            vec![place(1, "Calle Madero, Centro, Monterrey").with_importance(0.9)],
        )
        .with_structured(
            "123",
            "Madero",
            vec![
                place(2, "123, Calle Madero, Centro, Monterrey")
                    .with_house_number("123")
                    .with_road("Calle Madero")
                    .with_importance(0.2),
            ],
        );
    let app = TestApp::with_provider(provider);

    let body = TestRequest::get("/geocode/search?q=Madero%20123")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(
        display_names(&body),
        vec![
            "123, Calle Madero, Centro, Monterrey",
            "Calle Madero, Centro, Monterrey"
        ]
    );
    assert_eq!(body[0]["address"]["house_number"], "123");
    assert!(body[0]["lat"].is_f64());
    assert!(body[0]["lng"].is_f64());
    assert!(app.provider.calls().contains(&ProviderCall::Structured {
        house_number: "123".to_string(),
        street_and_rest: "Madero".to_string(),
        limit: 15,
    }));
}

#[test_log::test(tokio::test)]
async fn results_outside_region_are_dropped() {
    let provider = ScriptedProvider::new().with_generic(
        "Hidalgo",
        vec![
            place(1, "Hidalgo, Guadalajara, Jalisco").with_state(Some("Jalisco")),
            place(2, "Hidalgo, Monterrey, Nuevo León"),
            place(3, "Hidalgo, Apodaca")
                .with_state(None)
                .with_county("NUEVO LEON"),
        ],
    );
    let app = TestApp::with_provider(provider);

    let body = TestRequest::get("/geocode/search?q=Hidalgo")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    let names = display_names(&body);
    assert_eq!(names.len(), 2);
    assert!(!names.contains(&"Hidalgo, Guadalajara, Jalisco"));
}

#[test_log::test(tokio::test)]
async fn limit_parameter_is_honoured_and_defaulted() {
    let records = (1..=20)
        .map(|id| place(id, &format!("Calle {id:02}, Monterrey")))
        .collect();
    let app = TestApp::with_provider(ScriptedProvider::new().with_generic("Calle", records));

    let limited = TestRequest::get("/geocode/search?q=Calle&limit=3")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(display_names(&limited).len(), 3);

    let app = TestApp::with_provider(ScriptedProvider::new().with_generic(
        "Calle",
        (1..=20)
            .map(|id| place(id, &format!("Calle {id:02}, Monterrey")))
            .collect(),
    ));
    let defaulted = TestRequest::get("/geocode/search?q=Calle&limit=lots")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    assert_eq!(display_names(&defaulted).len(), 15);
    assert_eq!(
        app.provider.calls()[0],
        ProviderCall::Generic {
            query: "Calle".to_string(),
            limit: 15
        }
    );
}

#[test_log::test(tokio::test)]
async fn oversized_limit_is_capped() {
    let app = TestApp::new();

    TestRequest::get("/geocode/search?q=Calle&limit=500")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK);

    assert_eq!(
        app.provider.calls()[0],
        ProviderCall::Generic {
            query: "Calle".to_string(),
            limit: 30
        }
    );
}

#[test_log::test(tokio::test)]
async fn repeated_query_is_served_from_cache() {
    let app = TestApp::with_provider(
        ScriptedProvider::new().with_generic("Madero", vec![place(1, "Calle Madero, Monterrey")]),
    );

    let first = TestRequest::get("/geocode/search?q=Madero")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();
    let second = TestRequest::get("/geocode/search?q=%20Madero%20")
        .send(&app.service)
        .await
        .assert_status(StatusCode::OK)
        .json();

    assert_eq!(first, second);
    assert_eq!(generic_calls(&app), 1);
}

#[test_log::test(tokio::test)]
async fn sixteenth_search_in_window_is_rate_limited() {
    let app = TestApp::new();

    for i in 0..15 {
        TestRequest::get(&format!("/geocode/search?q=Calle%20{i}"))
            .send(&app.service)
            .await
            .assert_status(StatusCode::OK);
    }

    TestRequest::get("/geocode/search?q=Calle%2015")
        .send(&app.service)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS)
        .assert_error("Too many requests");
}

#[test_log::test(tokio::test)]
async fn cached_queries_still_count_against_rate_limit() {
    let app = TestApp::with_settings(throttled_settings(2), ScriptedProvider::new());

    for _ in 0..2 {
        TestRequest::get("/geocode/search?q=Madero")
            .send(&app.service)
            .await
            .assert_status(StatusCode::OK);
    }

    TestRequest::get("/geocode/search?q=Madero")
        .send(&app.service)
        .await
        .assert_status(StatusCode::TOO_MANY_REQUESTS);
}

#[test_log::test(tokio::test)]
async fn provider_failure_is_internal_error() {
    let app = TestApp::with_provider(ScriptedProvider::new().with_generic_failure("Madero"));

    TestRequest::get("/geocode/search?q=Madero")
        .send(&app.service)
        .await
        .assert_status(StatusCode::INTERNAL_SERVER_ERROR)
        .assert_error("Internal server error");
}
