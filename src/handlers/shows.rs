use axum::{
    extract::State,
    response::{Html, IntoResponse, Response},
    Form,
};

use crate::{
    error::Result,
    forms::{FormFields, ShowForm},
    services::shows,
    state::AppState,
    templates::{home_page, show_form_page, shows_page, Flash},
};

pub async fn list(State(state): State<AppState>) -> Result<Html<String>> {
    let listings = shows::list(&state.db).await?;
    Ok(Html(shows_page(&listings).into_string()))
}

pub async fn create_form() -> Html<String> {
    Html(show_form_page(None).into_string())
}

pub async fn create_submission(
    State(state): State<AppState>,
    Form(pairs): Form<Vec<(String, String)>>,
) -> Response {
    let fields = FormFields::from(pairs);

    let result = match ShowForm::from_fields(&fields) {
        Ok(form) => shows::create(&state.db, form).await,
        Err(err) => Err(err),
    };

    match result {
        Ok(_) => {
            let flash = Flash::success("Show was successfully listed!");
            Html(home_page(Some(&flash)).into_string()).into_response()
        }
        Err(err) => {
            err.log();
            let flash = Flash::error(format!(
                "An error occurred. Show could not be listed. {}",
                err.public_message()
            ));
            (err.status_code(), Html(home_page(Some(&flash)).into_string())).into_response()
        }
    }
}
