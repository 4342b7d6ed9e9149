//! Mapping of handler failures to HTTP responses.
//!
//! | failure                | status | body                       |
//! |------------------------|--------|----------------------------|
//! | invalid form input     | 400    | plain-text reason          |
//! | catalog miss / outage  | 404    | rendered lookup error page |
//! | store insert failure   | 500    | `Data storage failure`     |
//! | store list failure     | 500    | `Data retrieval issue`     |
//! | page template failure  | 500    | `Page rendering failure`   |

use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;

use crate::domain::ValidationError;
use crate::http::views::{render, View};
use crate::store::StorageError;

/// Store operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreOp {
    Insert,
    List,
}

impl StoreOp {
    pub fn as_str(self) -> &'static str {
        match self {
            StoreOp::Insert => "insert",
            StoreOp::List => "list",
        }
    }

    /// Body returned to the client; never includes the cause.
    pub fn public_message(self) -> &'static str {
        match self {
            StoreOp::Insert => "Data storage failure",
            StoreOp::List => "Data retrieval issue",
        }
    }
}

/// Failure of a request handler.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("store {} failed: {source}", .op.as_str())]
    Storage {
        op: StoreOp,
        #[source]
        source: StorageError,
    },

    #[error("{message}")]
    NotFound { message: String, base_url: String },

    #[error("template {template} failed: {source}")]
    Render {
        template: &'static str,
        #[source]
        source: minijinja::Error,
    },
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::Validation(err) => (StatusCode::BAD_REQUEST, err.to_string()).into_response(),
            AppError::Storage { op, .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, op.public_message()).into_response()
            }
            AppError::NotFound { message, base_url } => {
                let view = View::LookupError {
                    message: message.clone(),
                    base_url,
                };
                match render(&view) {
                    Ok(page) => (StatusCode::NOT_FOUND, Html(page)).into_response(),
                    Err(e) => {
                        tracing::error!(error = %e, "Lookup error page failed to render");
                        (StatusCode::NOT_FOUND, message).into_response()
                    }
                }
            }
            AppError::Render { .. } => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Page rendering failure").into_response()
            }
        }
    }
}
