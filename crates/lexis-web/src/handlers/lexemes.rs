//! Lexeme listing: `GET /lexemes/` and `GET /lexemes/{id}/`.

use axum::{
  extract::{Path, State},
  response::Html,
};
use lexis_core::store::LexiconStore;

use crate::{AppState, error::Error, html};

pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: LexiconStore,
{
  let lexemes = state.store.list_lexemes().await.map_err(Error::store)?;
  Ok(Html(html::lexemes_page(&lexemes)))
}

pub async fn detail<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: LexiconStore,
{
  let entry = state
    .store
    .get_lexeme(id)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;
  Ok(Html(html::lexeme_page(&entry)))
}
