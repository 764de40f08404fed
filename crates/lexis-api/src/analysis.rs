//! Handler for `POST /analysis`.

use axum::{Json, extract::State};
use lexis_core::{
  ingest::{IngestReport, Ingestor},
  store::LexiconStore,
};
use serde::Deserialize;

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct AnalysisBody {
  pub text: String,
}

/// `POST /analysis` — body: `{"text":"..."}`; returns the [`IngestReport`].
pub async fn submit<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<AnalysisBody>,
) -> Result<Json<IngestReport>, ApiError>
where
  S: LexiconStore,
{
  if body.text.trim().is_empty() {
    return Err(ApiError::BadRequest("text is required".into()));
  }

  let report = Ingestor::new(state.store.as_ref(), state.analyzer.as_ref())
    .ingest_text(&body.text)
    .await?;
  Ok(Json(report))
}
