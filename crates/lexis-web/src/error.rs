//! Error types and axum `IntoResponse` implementation.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use thiserror::Error;

use crate::html;

#[derive(Debug, Error)]
pub enum Error {
  #[error("not found")]
  NotFound,
  #[error("cross-origin form submission refused")]
  Forbidden,
  #[error("{0}")]
  Core(#[from] lexis_core::Error),
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  pub(crate) fn store<E: std::error::Error + Send + Sync + 'static>(e: E) -> Self {
    Error::Store(Box::new(e))
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = match &self {
      Error::NotFound => StatusCode::NOT_FOUND,
      Error::Forbidden => StatusCode::FORBIDDEN,
      Error::Core(lexis_core::Error::InvalidInput(_) | lexis_core::Error::Analysis { .. }) => {
        StatusCode::BAD_REQUEST
      }
      Error::Core(_) | Error::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    if status.is_server_error() {
      tracing::warn!(error = %self, "request failed");
    }
    (status, Html(html::error_page(status, &self.to_string()))).into_response()
  }
}
