//! `GET /help/`

use axum::response::Html;

use crate::html;

pub async fn page() -> Html<String> { Html(html::help_page()) }
