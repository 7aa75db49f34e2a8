use std::sync::Arc;

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::Value;
use axum::response::IntoResponse;
use showbill_api::middleware::error_handling::AppError;
use showbill_core::errors::BookingError;

use crate::test_utils::{flash, location, pairs, server_for, MockStore, TestContext};

#[rstest]
#[case(BookingError::NotFound("Venue with ID 1 not found".into()), StatusCode::NOT_FOUND)]
#[case(BookingError::Validation("name is required".into()), StatusCode::BAD_REQUEST)]
#[case(BookingError::Database(eyre::eyre!("connection refused")), StatusCode::INTERNAL_SERVER_ERROR)]
#[case(
    BookingError::Internal(Box::new(std::io::Error::new(std::io::ErrorKind::Other, "boom"))),
    StatusCode::INTERNAL_SERVER_ERROR
)]
fn test_error_status_codes(#[case] error: BookingError, #[case] expected: StatusCode) {
    assert_eq!(AppError(error).into_response().status(), expected);
}

#[tokio::test]
async fn test_unknown_path_renders_not_found_page() {
    let ctx = TestContext::new();

    let response = ctx.server.get("/no/such/page").await;

    assert_eq!(response.status_code(), StatusCode::NOT_FOUND);
    let page: Value = response.json();
    assert_eq!(page["status"], 404);
    assert!(page["error"].as_str().unwrap().contains("/no/such/page"));
}

#[tokio::test]
async fn test_read_failure_renders_server_error_page() {
    let mut store = MockStore::new();
    store
        .expect_list_venues()
        .returning(|_| Err(eyre::eyre!("connection refused")));
    let server = server_for(Arc::new(store));

    let response = server.get("/venues").await;

    assert_eq!(response.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(response.json::<Value>()["status"], 500);
}

#[tokio::test]
async fn test_write_failure_becomes_flash_message() {
    let mut store = MockStore::new();
    store
        .expect_create_venue()
        .times(1)
        .returning(|_| Err(eyre::eyre!("duplicate key value violates unique constraint")));
    let server = server_for(Arc::new(store));

    let response = server
        .post("/venues/create")
        .form(&pairs(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
        ]))
        .await;

    assert_eq!(location(&response), "/venues/create");
    assert_eq!(
        flash(&response).as_deref(),
        Some(
            "An error occurred. Venue 'The Musical Hop' could not be listed. \
             Error: duplicate key value violates unique constraint"
        )
    );
}

#[tokio::test]
async fn test_failed_edit_reports_on_detail_page() {
    let ctx = TestContext::new();
    let venue = ctx.venue("The Musical Hop", "San Francisco", "CA").await;

    let mut store = MockStore::new();
    store
        .expect_get_venue()
        .returning(move |_| Ok(Some(venue.clone())));
    store
        .expect_update_venue()
        .returning(|_, _| Err(eyre::eyre!("connection reset")));
    let server = server_for(Arc::new(store));

    let response = server
        .post("/venues/1/edit")
        .form(&pairs(&[
            ("name", "The Musical Hop"),
            ("city", "San Francisco"),
            ("state", "CA"),
            ("address", "1015 Folsom Street"),
        ]))
        .await;

    assert_eq!(location(&response), "/venues/1");
    assert_eq!(
        flash(&response).as_deref(),
        Some("An error occurred: connection reset")
    );
}

#[tokio::test]
async fn test_health_and_version() {
    let ctx = TestContext::new();

    let health: Value = ctx.server.get("/health").await.json();
    let version: Value = ctx.server.get("/version").await.json();

    assert_eq!(health["status"], "ok");
    assert_eq!(version["name"], "showbill-api");
    assert!(version["version"].is_string());
}
