//! HTTP mapping of [`ClimateError`].
//!
//! Every failure is a server-side fault: the dataset is fixed and request
//! input is never rejected. Clients get a generic message; the actual error
//! chain is logged.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use log::error;
use serde::Serialize;

use crate::error::ClimateError;

#[derive(Serialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Serialize)]
struct ErrorDetail {
    code: &'static str,
    message: &'static str,
}

impl ClimateError {
    fn error_code(&self) -> &'static str {
        match self {
            ClimateError::Store(_) => "QUERY_FAILED",
            ClimateError::TaskJoin(_) => "INTERNAL_ERROR",
            ClimateError::CacheDirCreation(_, _) | ClimateError::CacheDirResolution => {
                "STORAGE_UNAVAILABLE"
            }
        }
    }
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

impl IntoResponse for ClimateError {
    fn into_response(self) -> Response {
        error!("Request failed: {}", error_chain(&self));
        let body = ErrorResponse {
            error: ErrorDetail {
                code: self.error_code(),
                message: "An internal error occurred while querying the dataset",
            },
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
