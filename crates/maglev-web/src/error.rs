//! Request failures. Every one of them is a 500.

use axum::extract::rejection::FormRejection;
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use maglev_common::ParameterError;
use maglev_model::ModelError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Unreadable form submission: {0}")]
    Form(#[from] FormRejection),

    #[error(transparent)]
    Parameters(#[from] ParameterError),

    #[error(transparent)]
    Model(#[from] ModelError),

    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),

    #[error("Prediction task failed: {0}")]
    Task(#[from] tokio::task::JoinError),
}

impl AppError {
    /// In debug mode the body carries the error text.
    pub fn into_response_with(self, debug: bool) -> Response {
        let body = if debug {
            format!(
                "<h1>Internal Server Error</h1>\n<pre>{}</pre>\n",
                minijinja::HtmlEscape(&self.to_string())
            )
        } else {
            "<h1>Internal Server Error</h1>\n".to_string()
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Html(body)).into_response()
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        self.into_response_with(false)
    }
}
