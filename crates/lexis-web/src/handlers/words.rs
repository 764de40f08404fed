//! Word pages: list, add, edit comment, delete.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/words/` | Ordered by surface form |
//! | `GET`  | `/words/add` | Empty form |
//! | `POST` | `/words/add` | Ingest one word → `/words/` |
//! | `GET`  | `/words/{id}/edit/` | Form prefilled with the comment |
//! | `POST` | `/words/{id}/edit/` | Overwrite the comment → `/words/` |
//! | `GET`  | `/words/{id}/delete` | Confirmation page |
//! | `POST` | `/words/{id}/delete` | Delete, keep the lexeme → `/words/` |

use axum::{
  Form,
  extract::{Path, State},
  response::{Html, IntoResponse, Redirect, Response},
};
use lexis_core::{
  ingest::Ingestor,
  store::LexiconStore,
  word::{Word, normalize_comment},
};
use tracing::info;

use crate::{
  AppState,
  error::Error,
  forms::{AddWordForm, FieldErrors, WordCommentForm},
  html,
  origin::SameOrigin,
};

const WORDS: &str = "/words/";

async fn load_word<S>(state: &AppState<S>, id: i64) -> Result<Word, Error>
where
  S: LexiconStore,
{
  state
    .store
    .get_word(id)
    .await
    .map_err(Error::store)?
    .map(|entry| entry.word)
    .ok_or(Error::NotFound)
}

// ─── List ─────────────────────────────────────────────────────────────────────

pub async fn list<S>(State(state): State<AppState<S>>) -> Result<Html<String>, Error>
where
  S: LexiconStore,
{
  let words = state.store.list_words().await.map_err(Error::store)?;
  Ok(Html(html::words_page(&words)))
}

// ─── Add ──────────────────────────────────────────────────────────────────────

pub async fn add_form() -> Html<String> {
  Html(html::add_word_page(&AddWordForm::default(), &FieldErrors::new()))
}

pub async fn add<S>(
  State(state): State<AppState<S>>,
  _: SameOrigin,
  Form(form): Form<AddWordForm>,
) -> Result<Response, Error>
where
  S: LexiconStore,
{
  let errors = form.validate();
  if !errors.is_empty() {
    return Ok(Html(html::add_word_page(&form, &errors)).into_response());
  }

  let word = Ingestor::new(state.store.as_ref(), state.analyzer.as_ref())
    .add_word(&form.word, Some(form.comment))
    .await?;
  info!(word_id = word.word_id, word = %word.word, "word added");

  Ok(Redirect::to(WORDS).into_response())
}

// ─── Edit ─────────────────────────────────────────────────────────────────────

pub async fn edit_form<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: LexiconStore,
{
  let word = load_word(&state, id).await?;
  let comment = word.comment.clone().unwrap_or_default();
  Ok(Html(html::edit_word_page(&word, &comment, &FieldErrors::new())))
}

pub async fn edit<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  _: SameOrigin,
  Form(form): Form<WordCommentForm>,
) -> Result<Response, Error>
where
  S: LexiconStore,
{
  let errors = form.validate();
  if !errors.is_empty() {
    let word = load_word(&state, id).await?;
    return Ok(Html(html::edit_word_page(&word, &form.comment, &errors)).into_response());
  }

  let comment = normalize_comment(Some(form.comment))?;
  state
    .store
    .set_comment(id, comment)
    .await
    .map_err(Error::store)?
    .ok_or(Error::NotFound)?;
  info!(word_id = id, "comment updated");

  Ok(Redirect::to(WORDS).into_response())
}

// ─── Delete ───────────────────────────────────────────────────────────────────

pub async fn delete_confirm<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
) -> Result<Html<String>, Error>
where
  S: LexiconStore,
{
  let word = load_word(&state, id).await?;
  Ok(Html(html::delete_word_page(&word)))
}

pub async fn delete<S>(
  State(state): State<AppState<S>>,
  Path(id): Path<i64>,
  _: SameOrigin,
) -> Result<Redirect, Error>
where
  S: LexiconStore,
{
  if !state.store.delete_word(id).await.map_err(Error::store)? {
    return Err(Error::NotFound);
  }
  info!(word_id = id, "word deleted");
  Ok(Redirect::to(WORDS))
}
