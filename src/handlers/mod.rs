pub mod artists;
pub mod health;
pub mod pages;
pub mod shows;
pub mod venues;

use axum::{
    routing::{get, post},
    Router,
};

use crate::{
    error::{AppError, Result},
    state::AppState,
};

/// Ids in entity paths. Anything that is not an integer names no record.
pub(crate) fn parse_id(raw: &str) -> Result<i32> {
    raw.parse::<i32>()
        .map_err(|_| AppError::NotFound(format!("No record with id `{}`", raw)))
}

/// HTML routes of the directory.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::index))
        .route("/health", get(health::health_check))

        // Venues
        .route("/venues", get(venues::list))
        .route("/venues/search", post(venues::search))
        .route(
            "/venues/create",
            get(venues::create_form).post(venues::create_submission),
        )
        .route("/venues/:id", get(venues::detail).delete(venues::delete))
        .route(
            "/venues/:id/edit",
            get(venues::edit_form).post(venues::edit_submission),
        )

        // Artists
        .route("/artists", get(artists::list))
        .route("/artists/search", post(artists::search))
        .route(
            "/artists/create",
            get(artists::create_form).post(artists::create_submission),
        )
        .route("/artists/:id", get(artists::detail).delete(artists::delete))
        .route(
            "/artists/:id/edit",
            get(artists::edit_form).post(artists::edit_submission),
        )

        // Shows
        .route("/shows", get(shows::list))
        .route(
            "/shows/create",
            get(shows::create_form).post(shows::create_submission),
        )
        .fallback(pages::not_found)
}
