use axum::{
    extract::{Path, State},
    response::{Html, IntoResponse, Redirect, Response},
    Form,
};
use chrono::Utc;

use super::{parse_id, venues::SearchForm};
use crate::{
    error::{AppError, Result},
    forms::{ArtistForm, FormFields},
    services::artists,
    state::AppState,
    templates::{
        artist_detail_page, artist_form_page, artists_page, home_page, search_results_page, Flash,
    },
};

pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let summaries = artists::list(&state.db).await?;
    Ok(Html(artists_page(&summaries).into_string()))
}

pub async fn search(
    State(state): State<AppState>,
    Form(form): Form<SearchForm>,
) -> Result<Html<String>> {
    let results = artists::search(&state.db, &form.search_term, Utc::now()).await?;
    Ok(Html(
        search_results_page("artists", &form.search_term, &results).into_string(),
    ))
}

pub async fn detail(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let id = parse_id(&id)?;
    let detail = artists::get_detail(&state.db, id, Utc::now()).await?;
    Ok(Html(artist_detail_page(&detail).into_string()))
}

pub async fn create_form() -> Html<String> {
    Html(artist_form_page("List a new artist", "/artists/create", &ArtistForm::default(), None).into_string())
}

pub async fn create_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let form = ArtistForm::from_fields(&FormFields::from(pairs));
    let name = form.name.clone();

    match artists::create(&state.db, form).await {
        Ok(artist) => {
            let flash = Flash::success(format!("Artist {} was successfully listed!", artist.name));
            Html(home_page(Some(&flash)).into_string()).into_response()
        }
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "An error occurred. Artist {} could not be listed. {}",
                name,
                err.public_message()
            ));
            (err.status_code(), Html(home_page(Some(&flash)).into_string())).into_response()
        }
    }
}

/// Edit form prefilled from the stored artist
pub async fn edit_form(State(state): State<AppState>, Path(id): Path<String>) -> Result<Html<String>> {
    let id = parse_id(&id)?;
    let artist = artists::find(&state.db, id).await?;
    let form = ArtistForm::from_model(&artist);
    Ok(Html(
        artist_form_page(
            &format!("Edit artist {}", artist.name),
            &format!("/artists/{}/edit", id),
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
    let form = ArtistForm::from_fields(&FormFields::from(pairs));

    match artists::edit(&state.db, id, form.clone()).await {
        Ok(artist) => Redirect::to(&format!("/artists/{}", artist.id)).into_response(),
        Err(err @ AppError::NotFound(_)) => err.into_response(),
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "An error occurred. Artist {} was not edited. {}",
                form.name,
                err.public_message()
            ));
            let page = artist_form_page(
                "Edit artist",
                &format!("/artists/{}/edit", id),
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
    match artists::delete(&state.db, id).await {
        Ok(artist) => {
            let flash = Flash::success(format!("Artist {} was deleted successfully!", artist.name));
            Html(home_page(Some(&flash)).into_string()).into_response()
        }
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "Artist was not deleted successfully. {}",
                err.public_message()
            ));
            (err.status_code(), Html(home_page(Some(&flash)).into_string())).into_response()
        }
    }
}
