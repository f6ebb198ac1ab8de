//! Application error types and HTTP response mapping.
//!
//! Defines `AppError` for all error conditions. Unlike a JSON API, every
//! reachable code path replies with status 200 and an HTML body: errors that
//! escape a handler are converted into the generic error page. Failures that
//! only degrade part of a page (missing branch, bad path) are handled before
//! they ever become a response.

use axum::{
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::render::page::error_page;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("malformed route: {0}")]
    MalformedRoute(String),

    #[error("repository not found: {0}")]
    RepoNotFound(String),

    #[error("branch not found: {0}")]
    BranchNotFound(String),

    #[error("path not found: {0}")]
    PathNotFound(String),

    #[error("page exceeds maximum size of {0} bytes")]
    PageTooLarge(usize),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        (StatusCode::OK, Html(error_page(&self.to_string()))).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
