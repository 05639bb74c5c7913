//! Integration tests for artist handler routes

use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use chrono::Utc;
use fake::{faker::name::en::Name, Fake};
use sea_orm::{EntityTrait, PaginatorTrait};
use tower::util::ServiceExt;

use fyyur::db::entities::Artist;
use fyyur::handlers;
use fyyur::state::AppState;
use fyyur::test_utils::*;

fn create_test_router(state: &AppState) -> Router {
    handlers::routes().with_state(state.clone())
}

fn post_form(uri: &str, pairs: &[(&str, &str)]) -> Request<Body> {
    let encoded = pairs
        .iter()
        .map(|(k, v)| format!("{}={}", urlencoding::encode(k), urlencoding::encode(v)))
        .collect::<Vec<_>>()
        .join("&");

    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
        .body(Body::from(encoded))
        .unwrap()
}

async fn body_text(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

#[tokio::test]
async fn test_list_artists() {
    let state = setup_test_app_state().await;
    seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/artists").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let first = body.find("Guns N Petals").unwrap();
    let last = body.find("The Wild Sax Band").unwrap();
    assert!(first < last);
}

#[tokio::test]
async fn test_search_artists_case_insensitive() {
    let state = setup_test_app_state().await;
    seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form("/artists/search", &[("search_term", "BAND")]))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("The Wild Sax Band"));
    assert!(!body.contains("Matt Quevedo"));
}

#[tokio::test]
async fn test_artist_detail_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(Request::builder().uri("/artists/12").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_artist_detail_links_venues() {
    let state = setup_test_app_state().await;
    let sample = seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/artists/{}", sample.matt_quevedo.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Matt Quevedo"));
    assert!(body.contains(&format!("/venues/{}", sample.park_square.id)));
}

#[tokio::test]
async fn test_create_artist_submission() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);
    let name: String = Name().fake();

    let response = app
        .oneshot(post_form(
            "/artists/create",
            &[
                ("name", name.as_str()),
                ("city", "New York"),
                ("state", "NY"),
                ("genres", "Jazz"),
                ("website_link", "https://artist.example.com"),
                ("seeking_venue", "y"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("successfully listed"));

    let stored = Artist::find().all(&state.db).await.unwrap();
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].name, name);
    assert_eq!(stored[0].website.as_deref(), Some("https://artist.example.com"));
    assert!(stored[0].seeking_venue);
}

#[tokio::test]
async fn test_create_artist_bad_link() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/artists/create",
            &[
                ("name", "Link Breaker"),
                ("city", "New York"),
                ("state", "NY"),
                ("facebook_link", "facebook.com/nobody"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(Artist::find().count(&state.db).await.unwrap(), 0);
}

#[tokio::test]
async fn test_edit_artist_redirects() {
    let state = setup_test_app_state().await;
    let artist = create_test_artist(&state.db, "Matt Quevedo", "New York", "NY").await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            &format!("/artists/{}/edit", artist.id),
            &[
                ("name", "Matt Quevedo"),
                ("city", "Brooklyn"),
                ("state", "NY"),
                ("genres", "Jazz"),
            ],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);

    let stored = Artist::find_by_id(artist.id).one(&state.db).await.unwrap().unwrap();
    assert_eq!(stored.city, "Brooklyn");
    assert!(!stored.seeking_venue);
}

#[tokio::test]
async fn test_edit_missing_artist() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(post_form(
            "/artists/31/edit",
            &[("name", "Ghost"), ("city", "Boston"), ("state", "MA")],
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_artist_with_shows_conflicts() {
    let state = setup_test_app_state().await;
    let sample = seed_sample_directory(&state.db, Utc::now()).await;
    let app = create_test_router(&state);

    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/artists/{}", sample.guns_n_petals.id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
    assert_eq!(Artist::find().count(&state.db).await.unwrap(), 3);
}

#[tokio::test]
async fn test_non_numeric_artist_id_is_not_found() {
    let state = setup_test_app_state().await;
    let app = create_test_router(&state);

    for uri in ["/artists/abc", "/artists/abc/edit"] {
        let response = app
            .clone()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}
