use axum::{
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use sea_orm::SqlErr;
use serde_json::json;
use thiserror::Error;

use crate::services::auth::{login_url, GALLERY_PATH};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sea_orm::DbErr),

    #[error("Session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed form submission: {0}")]
    Multipart(#[from] MultipartError),

    #[error("Storage error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// No usable session; the visitor is sent to the login page
    #[error("Login required")]
    LoginRequired { next: Option<String> },

    /// Ownership mismatch; the actor is sent back to their own gallery
    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl AppError {
    /// True when a write was rejected by a unique index
    pub fn is_unique_violation(&self) -> bool {
        matches!(
            self,
            Self::Database(e) if matches!(e.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
        )
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match self {
            Self::LoginRequired { ref next } => {
                return Redirect::to(&login_url(next.as_deref())).into_response();
            }
            Self::Forbidden => return Redirect::to(GALLERY_PATH).into_response(),
            Self::Database(ref e) => {
                tracing::error!("Database error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Database error occurred")
            }
            Self::Session(ref e) => {
                tracing::error!("Session error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Session store error occurred")
            }
            Self::Serialization(ref e) => {
                tracing::error!("Serialization error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Data processing error")
            }
            Self::Multipart(ref e) => {
                tracing::warn!("Rejected multipart body: {}", e);
                (StatusCode::BAD_REQUEST, "Malformed form submission")
            }
            Self::Io(ref e) => {
                tracing::error!("Media storage error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Could not store uploaded file")
            }
            Self::NotFound(ref msg) => (StatusCode::NOT_FOUND, msg.as_str()),
            Self::Internal(ref msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.as_str())
            }
            Self::Other(ref e) => {
                tracing::error!("Unexpected error: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "An unexpected error occurred")
            }
        };

        let body = Json(json!({
            "error": error_message,
            "details": self.to_string(),
        }));

        (status, body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
