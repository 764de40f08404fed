//! JSON REST API for Lexis.
//!
//! Exposes an axum [`Router`] backed by any [`lexis_core::store::LexiconStore`]
//! and [`MorphAnalyzer`]. TLS and transport concerns are the caller's
//! responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", lexis_api::api_router(store.clone(), analyzer.clone()))
//! ```

pub mod analysis;
pub mod error;
pub mod lexemes;
pub mod words;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use lexis_core::{analyzer::MorphAnalyzer, store::LexiconStore};

pub use error::ApiError;

/// State shared by the API handlers.
pub struct ApiState<S> {
  pub store:    Arc<S>,
  pub analyzer: Arc<dyn MorphAnalyzer>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), analyzer: Arc::clone(&self.analyzer) }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, analyzer: Arc<dyn MorphAnalyzer>) -> Router<()>
where
  S: LexiconStore + 'static,
{
  Router::new()
    // Lexemes
    .route("/lexemes", get(lexemes::list::<S>))
    .route("/lexemes/{id}", get(lexemes::get_one::<S>))
    // Words
    .route("/words", get(words::list::<S>).post(words::create::<S>))
    .route(
      "/words/{id}",
      get(words::get_one::<S>)
        .patch(words::update_comment::<S>)
        .delete(words::delete_one::<S>),
    )
    // Analysis
    .route("/analysis", post(analysis::submit::<S>))
    .with_state(ApiState { store, analyzer })
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use lexis_core::analyzer::DictionaryAnalyzer;
  use lexis_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let analyzer = DictionaryAnalyzer::from_reader(
      "кошки\tкошка\t0.8\nкошку\tкошка\t0.9\n".as_bytes(),
    )
    .unwrap();
    api_router(Arc::new(store), Arc::new(analyzer))
  }

  async fn call(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    let resp = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let value = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
  }

  #[tokio::test]
  async fn analysis_then_list() {
    let app = app().await;
    let (status, report) =
      call(&app, "POST", "/analysis", Some(json!({ "text": "Кошки видят кошку." }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["tokens"], 3);
    assert_eq!(report["words_created"], 3);
    assert_eq!(report["lexemes_created"], 2);

    let (_, words) = call(&app, "GET", "/words", None).await;
    let surface: Vec<&str> = words
      .as_array()
      .unwrap()
      .iter()
      .map(|e| e["word"]["word"].as_str().unwrap())
      .collect();
    assert_eq!(surface, ["видят", "кошки", "кошку"]);

    let (_, lexemes) = call(&app, "GET", "/lexemes", None).await;
    let lexemes = lexemes.as_array().unwrap();
    assert_eq!(lexemes.len(), 2);
    assert_eq!(lexemes[1]["lexeme"]["normal_form"], "кошка");
    assert_eq!(lexemes[1]["words"].as_array().unwrap().len(), 2);
  }

  #[tokio::test]
  async fn blank_analysis_is_rejected() {
    let app = app().await;
    let (status, body) = call(&app, "POST", "/analysis", Some(json!({ "text": "  " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("required"));
  }

  #[tokio::test]
  async fn word_crud() {
    let app = app().await;
    let (status, word) =
      call(&app, "POST", "/words", Some(json!({ "word": "Кошки", "comment": "plural" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(word["word"], "кошки");
    assert_eq!(word["comment"], "plural");
    let id = word["word_id"].as_i64().unwrap();
    let lexeme_id = word["lexeme_id"].as_i64().unwrap();

    let (status, entry) = call(&app, "GET", &format!("/words/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(entry["normal_form"], "кошка");

    let (status, updated) = call(
      &app,
      "PATCH",
      &format!("/words/{id}"),
      Some(json!({ "comment": "nominative plural" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["comment"], "nominative plural");
    assert_eq!(updated["score"], word["score"]);

    let (status, _) = call(&app, "DELETE", &format!("/words/{id}"), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = call(&app, "GET", &format!("/words/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, lexeme) = call(&app, "GET", &format!("/lexemes/{lexeme_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(lexeme["lexeme"]["normal_form"], "кошка");
  }

  #[tokio::test]
  async fn missing_ids_return_404() {
    let app = app().await;
    let (status, body) = call(&app, "GET", "/words/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "word 77 not found");

    let (status, _) =
      call(&app, "PATCH", "/words/77", Some(json!({ "comment": "x" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "DELETE", "/words/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&app, "GET", "/lexemes/77", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn blank_word_is_rejected() {
    let app = app().await;
    let (status, _) = call(&app, "POST", "/words", Some(json!({ "word": " " }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
