use axum::response::{Html, IntoResponse, Response};

/// Upstream fetch failures, tagged by what went wrong.
///
/// `Upstream` covers network errors, non-2xx replies, and bodies that are
/// not JSON at all; `MalformedPayload` covers JSON whose envelope cannot be
/// used. Cloneable so one result can be handed to every caller joined on a
/// shared in-flight fetch.
#[derive(Clone, Debug, Eq, PartialEq, thiserror::Error)]
pub enum FetchError {
    #[error("upstream request failed: {0}")]
    Upstream(String),
    #[error("malformed upstream payload: {0}")]
    MalformedPayload(String),
}

#[derive(Debug)]
pub struct AppError(anyhow::Error);

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for AppError {}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        Self(err)
    }
}

impl From<FetchError> for AppError {
    fn from(err: FetchError) -> Self {
        Self(anyhow::Error::new(err))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let body = crate::templates::error_page(self.to_string());
        Html(body).into_response()
    }
}

pub type AppResult<T> = Result<T, AppError>;
