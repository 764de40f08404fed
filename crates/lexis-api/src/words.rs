//! Handlers for `/words` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `GET`    | `/words` | Ordered by surface form |
//! | `POST`   | `/words` | Body: [`AddWordBody`]; returns the stored word |
//! | `GET`    | `/words/:id` | 404 if not found |
//! | `PATCH`  | `/words/:id` | Body: `{"comment":"..."}` |
//! | `DELETE` | `/words/:id` | 204; the lexeme is kept |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
};
use lexis_core::{
  ingest::Ingestor,
  store::LexiconStore,
  word::{Word, WordEntry, normalize_comment},
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /words`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<WordEntry>>, ApiError>
where
  S: LexiconStore,
{
  let words = state.store.list_words().await.map_err(ApiError::store)?;
  Ok(Json(words))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /words/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<WordEntry>, ApiError>
where
  S: LexiconStore,
{
  let word = state
    .store
    .get_word(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(word))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /words`.
#[derive(Debug, Deserialize)]
pub struct AddWordBody {
  pub word:    String,
  pub comment: Option<String>,
}

/// `POST /words` — ingests a single word.
///
/// If the surface form is already stored, the existing word is returned and
/// `comment` is ignored.
pub async fn create<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<AddWordBody>,
) -> Result<Json<Word>, ApiError>
where
  S: LexiconStore,
{
  let word = Ingestor::new(state.store.as_ref(), state.analyzer.as_ref())
    .add_word(&body.word, body.comment)
    .await?;
  Ok(Json(word))
}

// ─── Update ───────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct CommentBody {
  pub comment: Option<String>,
}

/// `PATCH /words/:id` — overwrite the comment; `null` or blank clears it.
pub async fn update_comment<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
  Json(body): Json<CommentBody>,
) -> Result<Json<Word>, ApiError>
where
  S: LexiconStore,
{
  let comment = normalize_comment(body.comment)?;
  let word = state
    .store
    .set_comment(id, comment)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| not_found(id))?;
  Ok(Json(word))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /words/:id`
pub async fn delete_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<StatusCode, ApiError>
where
  S: LexiconStore,
{
  if state.store.delete_word(id).await.map_err(ApiError::store)? {
    Ok(StatusCode::NO_CONTENT)
  } else {
    Err(not_found(id))
  }
}

fn not_found(id: i64) -> ApiError { ApiError::NotFound(format!("word {id} not found")) }
