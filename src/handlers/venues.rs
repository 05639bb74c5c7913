use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;
use serde::Deserialize;

use super::parse_id;
use crate::{
    error::{AppError, Result},
    forms::{FormFields, VenueForm},
    services::venues,
    state::AppState,
    templates::{
        home_page, search_results_page, venue_detail_page, venue_form_page, venues_page, Flash,
    },
};

#[derive(Debug, Deserialize)]
pub struct SearchForm {
    #[serde(default)]
    pub search_term: String,
}

/// Venues grouped by city and state
pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let areas = venues::list_grouped_by_location(&state.db, Utc::now()).await?;
    Ok(Html(venues_page(&areas).into_string()))
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = venues::search(&state.db, &form.search_term, Utc::now()).await?;
    Ok(Html(
        search_results_page("venues", &form.search_term, &results).into_string(),
    ))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let id = parse_id(&id)?;
    let detail = venues::get_detail(&state.db, id, Utc::now()).await?;
    Ok(Html(venue_detail_page(&detail).into_string()))
}

pub async fn create_form() -> Html<String> {
    Html(venue_form_page("List a new venue", "/venues/create", &VenueForm::default(), None).into_string())
}

pub async fn create_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = VenueForm::from_fields(&FormFields::from(pairs));
    let name = form.name.clone();

    match venues::create(&state.db, form).await {
        Ok(venue) => {
            let flash = Flash::success(format!("Venue {} was successfully listed!", venue.name));
            Html(home_page(Some(&flash)).into_string()).into_response()
        }
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "An error occurred. Venue {} could not be listed. {}",
                name,
                err.public_message()
            ));
            (err.status_code(), Html(home_page(Some(&flash)).into_string())).into_response()
        }
    }
}

/// Edit form prefilled from the stored venue
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let id = parse_id(&id)?;
    let venue = venues::find(&state.db, id).await?;
    let form = VenueForm::from_model(&venue);
    Ok(Html(
        venue_form_page(
            &format!("Edit venue {}", venue.name),
            &format!("/venues/{}/edit", id),
            &form,
            None,
        )
        .into_string(),
    ))
}

pub async fn edit_submission(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    let form = VenueForm::from_fields(&FormFields::from(pairs));

    match venues::edit(&state.db, id, form.clone()).await {
        Ok(venue) => Redirect::to(&format!("/venues/{}", venue.id)).into_response(),
        Err(err @ AppError::NotFound(_)) => err.into_response(),
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "An error occurred. Venue {} was not edited. {}",
                form.name,
                err.public_message()
            ));
            let page = venue_form_page(
                "Edit venue",
                &format!("/venues/{}/edit", id),
                &form,
                Some(&flash),
            );
            (err.status_code(), Html(page.into_string())).into_response()
        }
    }
}

pub async fn delete(State(state): State<AppState>, Path(id): Path<String>) -> Response {
    let id = match parse_id(&id) {
        Ok(id) => id,
        Err(err) => return err.into_response(),
    };
    match venues::delete(&state.db, id).await {
        Ok(venue) => {
            let flash = Flash::success(format!("Venue {} was deleted successfully!", venue.name));
            Html(home_page(Some(&flash)).into_string()).into_response()
        }
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "Venue was not deleted successfully. {}",
                err.public_message()
            ));
            (err.status_code(), Html(home_page(Some(&flash)).into_string())).into_response()
        }
    }
}
