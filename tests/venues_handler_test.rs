//! Integration tests for venue handler routes
//!
//! Tests the venue pages end to end through the router:
//! - Grouped listing and search
//! - Detail pages and missing ids
//! - Create, edit and delete submissions

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::{faker::company::en::CompanyName, Fake};
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::db::entities::{venue, Venue};
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

/// Helper to create a test router with every HTML route
fn create_test_router(state: &AppState) -> Router {
    handlers::routes().with_state(state.clone())
}

/// Helper to encode form pairs as an urlencoded body
fn form_body(pairs: &[(&str, &str)]) -> Body {
    let encoded = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");
    Body::from(encoded)
}

fn post_form(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(form_body(pairs))
        .unwrap()
}

/// Helper to read the response body as text
async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_list_venues_empty() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_list_venues_groups_by_area() {
    let state = setup_test_app_state().await;
    seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("San Francisco"));
    assert!(body.contains("New York"));
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_search_venues() {
    let state = setup_test_app_state().await;
    seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form("/venues/search", &[("search_term", "hop")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("The Musical Hop"));
    assert!(!body.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_search_venues_without_term() {
    let state = setup_test_app_state().await;
    seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app.oneshot(post_form("/venues/search", &[])).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("The Dueling Pianos Bar"));
}

#[tokio::test]
async fn test_venue_detail() {
    let state = setup_test_app_state().await;
    let sample = seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/venues/{}", sample.musical_hop.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("The Musical Hop"));
    assert!(body.contains("Guns N Petals"));
}

#[tokio::test]
async fn test_venue_detail_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues/999").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_form_renders() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues/create").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("name=\"genres\""));
}

#[tokio::test]
async fn test_create_venue_submission() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let name: String = CompanyName().fake();

    let response = app
        .oneshot(post_form(
            "/venues/create",
            &[
                ("name", name.as_str()),
                ("city", "San Francisco"),
                ("state", "ca"),
                ("address", "1015 Folsom Street"),
                ("phone", "123-123-1234"),
                ("genres", "Jazz"),
                ("genres", "Reggae"),
                ("seeking_talent", "y"),
                ("seeking_description", "Looking for local acts"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("successfully listed"));

    // Verify in database
    let stored = Venue::find().all(&state.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, name);
    assert_eq!(stored[0].state, "CA");
    assert_eq!(stored[0].genres, "Jazz,Reggae");
    assert!(stored[0].seeking_talent);
}

#[tokio::test]
async fn test_create_venue_invalid_state() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/venues/create",
            &[
                ("name", "Nowhere Hall"),
                ("city", "Nowhere"),
                ("state", "ZZ"),
                ("address", "1 Main Street"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("could not be listed"));

    assert_eq!(Venue::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_venue_redirects_to_detail() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "Old Name", "Austin", "TX").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            &format!("/venues/{}/edit", venue.id),
            &[
                ("name", "New Name"),
                ("city", "Austin"),
                ("state", "TX"),
                ("address", "500 Congress Avenue"),
                ("genres", "Folk"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(
        response.headers().get(header::LOCATION).unwrap(),
        &format!("/venues/{}", venue.id)
    );

    let stored: venue::Model = Venue::find_by_id(venue.id)
        .one(&state.db)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.name, "New Name");
    assert_eq!(stored.address, "500 Congress Avenue");
    assert_eq!(stored.genres, "Folk");
}

#[tokio::test]
async fn test_edit_venue_invalid_rerenders_form() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "Old Name", "Austin", "TX").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            &format!("/venues/{}/edit", venue.id),
            &[("name", "New Name"), ("city", "Austin"), ("state", "TX")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_text(response).await;
    assert!(body.contains("was not edited"));

    let stored = Venue::find_by_id(venue.id).one(&state.db).await.unwrap().unwrap();
    assert_eq!(stored.name, "Old Name");
}

#[tokio::test]
async fn test_edit_form_missing_venue() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues/5/edit").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_venue_with_shows_conflicts() {
    let state = setup_test_app_state().await;
    let sample = seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{}", sample.park_square.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert!(Venue::find_by_id(sample.park_square.id)
        .one(&state.db)
        .await
        .unwrap()
        .is_some());
}

#[tokio::test]
async fn test_delete_venue() {
    let state = setup_test_app_state().await;
    let venue = create_test_venue(&state.db, "Empty Hall", "Austin", "TX").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/venues/{}", venue.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("deleted successfully"));
    assert_eq!(Venue::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_non_numeric_venue_id_renders_not_found_page() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/venues/abc").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let content_type = response.headers().get(header::CONTENT_TYPE).unwrap();
    assert!(content_type.to_str().unwrap().starts_with("text/html"));
    let body = body_text(response).await;
    assert!(body.contains("404 Not Found"));
}

#[tokio::test]
async fn test_non_numeric_venue_id_on_delete_and_edit() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let delete = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/venues/abc")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(delete.status(), StatusCode::NOT_FOUND);

    let edit = app
        .oneshot(post_form("/venues/abc/edit", &[("name", "Venue")]))
        .await
        .unwrap();
    assert_eq!(edit.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_invalid_edit_of_missing_venue_is_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/venues/999/edit",
            &[
                ("name", "Venue"),
                ("city", "Austin"),
                ("state", "ZZ"),
                ("address", "1 Main Street"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
