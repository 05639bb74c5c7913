use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::templates::error_page;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Referential integrity error: {0}")]
    Referential(String),

    #[error("Persistence error: {0}")]
    Persistence(#[from] sea_orm::DbErr),
}

impl AppError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Referential(_) => StatusCode::CONFLICT,
            Self::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Message that is safe to show to the visitor.
    pub fn public_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::NotFound(msg) | Self::Referential(msg) => msg.clone(),
            Self::Persistence(_) => "Database error occurred".to_string(),
        }
    }

    pub(crate) fn log(&self) {
        match self {
            Self::Persistence(e) => tracing::error!("Persistence error: {}", e),
            _ => tracing::debug!("Request rejected: {}", self),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.log();
        let status = self.status_code();
        let body = error_page(status, &self.public_message());

        (status, Html(body.into_string())).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            AppError::Validation("name is required".into()).status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            AppError::NotFound("Venue 1 not found".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            AppError::Referential("Artist 9 does not exist".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            AppError::Persistence(sea_orm::DbErr::Custom("boom".into())).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_storage_details_are_not_public() {
        let err = AppError::Persistence(sea_orm::DbErr::Custom("password=hunter2".into()));
        assert_eq!(err.public_message(), "Database error occurred");
        assert!(err.to_string().contains("hunter2"));
    }
}
