pub mod analysis;
pub mod help;
pub mod lexemes;
pub mod words;

use axum::response::Redirect;

use crate::error::Error;

/// `GET /` — the help page doubles as the landing page.
pub async fn index() -> Redirect { Redirect::to("/help/") }

/// Fallback for unrouted paths.
pub async fn not_found() -> Error { Error::NotFound }
