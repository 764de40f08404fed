//! Text submission: `GET|POST /analysis/`.

use axum::{
  Form,
  extract::State,
  response::{Html, IntoResponse, Redirect, Response},
};
use lexis_core::{ingest::Ingestor, store::LexiconStore};
use tracing::info;

use crate::{
  AppState,
  error::Error,
  forms::{FieldErrors, TextAnalysisForm},
  html,
  origin::SameOrigin,
};

/// `GET /analysis/` — empty submission form.
pub async fn form() -> Html<String> { Html(html::analysis_page("", &FieldErrors::new())) }

/// `POST /analysis/` — ingest the text, then redirect back to the form.
pub async fn submit<S>(
  State(state): State<AppState<S>>,
  _: SameOrigin,
  Form(form): Form<TextAnalysisForm>,
) -> Result<Response, Error>
where
  S: LexiconStore,
{
  let errors = form.validate();
  if !errors.is_empty() {
    return Ok(Html(html::analysis_page(&form.text, &errors)).into_response());
  }

  let report = Ingestor::new(state.store.as_ref(), state.analyzer.as_ref())
    .ingest_text(&form.text)
    .await?;
  info!(
    tokens = report.tokens,
    words_created = report.words_created,
    lexemes_created = report.lexemes_created,
    "text analysed"
  );

  Ok(Redirect::to("/analysis/").into_response())
}
