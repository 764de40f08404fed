//! Handlers for `/lexemes` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/lexemes` | Ordered by normal form, each with its words |
//! | `GET`  | `/lexemes/:id` | 404 if not found |

use axum::{
  Json,
  extract::{Path, State},
};
use lexis_core::{lexeme::LexemeEntry, store::LexiconStore};

use crate::{ApiState, error::ApiError};

/// `GET /lexemes`
pub async fn list<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<Vec<LexemeEntry>>, ApiError>
where
  S: LexiconStore,
{
  let lexemes = state.store.list_lexemes().await.map_err(ApiError::store)?;
  Ok(Json(lexemes))
}

/// `GET /lexemes/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<i64>,
) -> Result<Json<LexemeEntry>, ApiError>
where
  S: LexiconStore,
{
  let lexeme = state
    .store
    .get_lexeme(id)
    .await
    .map_err(ApiError::store)?
    .ok_or_else(|| ApiError::NotFound(format!("lexeme {id} not found")))?;
  Ok(Json(lexeme))
}
