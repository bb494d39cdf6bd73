//! Service document API integration tests.

mod common;

use axum::http::StatusCode;
use common::{body_json, CountingRenderer, InMemoryStore, TestApp, PUBLIC_BASE_URL, TOKEN};

#[tokio::test]
async fn returns_assembled_document_for_known_token() {
    let app = TestApp::with_sample();

    let response = app.get(&format!("/service-document/{}", TOKEN)).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["documentNumber"], "CH-2024-A1B2C3");
    assert_eq!(body["serviceDate"], "January 31, 2024");
    assert_eq!(body["nextService"], "July 31, 2024");
    assert_eq!(body["customer"]["name"], "Jane Doe");
    assert_eq!(body["customer"]["email"], "Email not provided");

    let equipment = body["equipment"].as_array().unwrap();
    assert_eq!(equipment.len(), 2);
    assert_eq!(equipment[0]["name"], "Condenser");
    assert_eq!(equipment[0]["services"].as_array().unwrap().len(), 7);
    assert_eq!(equipment[0]["warrantyExpires"], "Unknown");
    assert_eq!(equipment[0]["warranty"]["coverageEnd"], "Unknown");
    assert_eq!(equipment[1]["name"], "Gas Furnace");
    assert_eq!(equipment[1]["warranty"]["type"], "Daikin Furnace 10-Year Parts");
    assert_eq!(equipment[1]["warranty"]["coverageEnd"], "May 1, 2030");

    assert_eq!(body["invoice"]["items"][0]["code"], "SER-36573");
    assert_eq!(body["invoice"]["subtotal"], serde_json::json!(199.99));
    assert_eq!(body["invoice"]["hst"], serde_json::json!(26.0));
    assert_eq!(body["invoice"]["total"], serde_json::json!(225.99));
}

#[tokio::test]
async fn unknown_token_is_not_found() {
    let app = TestApp::with_sample();

    let response = app.get("/service-document/nope").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Service document not found");
}

#[tokio::test]
async fn blank_token_is_rejected_without_a_lookup() {
    let app = TestApp::with_sample();

    let response = app.get("/service-document/%20%20").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid token");
    assert_eq!(app.store.lookups(), 0);
}

#[tokio::test]
async fn store_failure_hides_detail() {
    let app = TestApp::new(InMemoryStore::failing(), CountingRenderer::default());

    let response = app.get(&format!("/service-document/{}", TOKEN)).await;

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Database error");
    assert!(!body.to_string().contains("connection refused"));
}

#[tokio::test]
async fn share_link_points_at_public_page() {
    let app = TestApp::with_sample();

    let response = app
        .get(&format!("/service-document/{}/share-link", TOKEN))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(
        body["url"],
        format!("{}/shared/{}", PUBLIC_BASE_URL, TOKEN)
    );
}

#[tokio::test]
async fn share_link_requires_an_existing_record() {
    let app = TestApp::with_sample();

    let response = app.get("/service-document/nope/share-link").await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn responses_carry_request_id_and_security_headers() {
    let app = TestApp::with_sample();

    let response = app.get(&format!("/service-document/{}", TOKEN)).await;

    assert!(response.headers().contains_key("x-request-id"));
    assert_eq!(
        response.headers().get("x-content-type-options").unwrap(),
        "nosniff"
    );
}
