//! Request-level errors and their HTTP mapping.
//!
//! Caller mistakes become 4xx responses, upstream failures become 500s; the
//! body is always `{"message": "..."}`.

use std::error::Error;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;
use tracing::{error, warn};

use crate::scrapers::FetchError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("Number of pages must be between 1 and {max}, got {requested}")]
    Validation { requested: i64, max: u32 },

    #[error("Invalid page number '{0}': expected an integer")]
    InvalidPageNumber(String),

    #[error("Failed to fetch Hacker News: {0}")]
    Fetch(#[from] FetchError),
}

impl ScrapeError {
    pub fn status(&self) -> StatusCode {
        match self {
            ScrapeError::Validation { .. } => StatusCode::BAD_REQUEST,
            ScrapeError::InvalidPageNumber(_) => StatusCode::UNPROCESSABLE_ENTITY,
            ScrapeError::Fetch(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ScrapeError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!("{}: {:?}", self, self.source());
        } else {
            warn!("{}", self);
        }

        let payload = Json(json!({"message": self.to_string()}));

        (status, payload).into_response()
    }
}
