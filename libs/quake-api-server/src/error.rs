use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use axum::extract::rejection::QueryRejection;

use quake_api::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The query string itself could not be read (repeated or conflicting keys).
    #[error("{0}")]
    BadQuery(String),

    #[error("missing parameter '{0}'")]
    MissingParam(&'static str),

    #[error("invalid {name} '{value}'")]
    InvalidParam { name: &'static str, value: String },

    #[error("month must be between 1 and 12, got {0}")]
    MonthOutOfRange(u32),

    #[error("{0} is not a supported region")]
    UnsupportedRegion(String),

    #[error("store: {0}")]
    Store(#[from] StoreError),
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        ApiError::BadQuery(rejection.body_text())
    }
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            _ => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        // Store details stay in the log.
        let message = match &self {
            ApiError::Store(e) => {
                tracing::error!(error = ?e, "lookup failed");
                "store error".to_owned()
            }
            other => other.to_string(),
        };
        (status, axum::Json(serde_json::json!({ "error": message }))).into_response()
    }
}
