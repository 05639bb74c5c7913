use axum::{http::StatusCode, response::Html};

use crate::templates::{error_page, home_page};

pub async fn index() -> Html<String> {
    Html(home_page(None).into_string())
}

pub async fn not_found() -> (StatusCode, Html<String>) {
    (
        StatusCode::NOT_FOUND,
        Html(error_page(StatusCode::NOT_FOUND, "The page you requested does not exist.").into_string()),
    )
}
