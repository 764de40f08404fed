//! HTML front end for Lexis.
//!
//! Exposes an axum [`Router`] serving the analysis, word and lexeme pages
//! backed by any [`LexiconStore`], with the JSON API nested under `/api`.

pub mod error;
pub mod forms;
pub mod handlers;
pub mod html;
pub mod origin;

pub use error::Error;

use std::{
  path::{Path, PathBuf},
  sync::Arc,
};

use axum::{Router, routing::get};
use lexis_core::{
  analyzer::{DictionaryAnalyzer, MorphAnalyzer},
  paradigm::ParadigmAnalyzer,
  store::LexiconStore,
};
use serde::Deserialize;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use handlers::{analysis, help, lexemes, words};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `LEXIS_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:           String,
  #[serde(default = "default_port")]
  pub port:           u16,
  #[serde(default = "default_store_path")]
  pub store_path:     PathBuf,
  /// Paradigm lexicon for the morphological analyzer. Takes precedence
  /// over `lexicon_path`.
  #[serde(default)]
  pub paradigms_path: Option<PathBuf>,
  /// Tab-separated form list for the dictionary analyzer, used when no
  /// paradigm lexicon is configured. Without either, every word is its own
  /// normal form.
  #[serde(default)]
  pub lexicon_path:   Option<PathBuf>,
  /// Score given to words the analyzer cannot place.
  #[serde(default)]
  pub unknown_score:  f64,
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 5000 }

fn default_store_path() -> PathBuf { PathBuf::from("lexis.db") }

/// Expand a leading `~` to the user's home directory.
pub fn expand_tilde(path: &Path) -> PathBuf {
  let s = path.to_string_lossy();
  if let Some(rest) = s.strip_prefix("~/")
    && let Ok(home) = std::env::var("HOME")
  {
    return PathBuf::from(home).join(rest);
  }
  path.to_path_buf()
}

// ─── Analyzer ─────────────────────────────────────────────────────────────────

/// Build the analyzer named by `config`: the paradigm lexicon if set, else
/// the dictionary lexicon, else the identity analyzer.
pub fn load_analyzer(config: &ServerConfig) -> lexis_core::Result<Arc<dyn MorphAnalyzer>> {
  if let Some(path) = &config.paradigms_path {
    if config.lexicon_path.is_some() {
      warn!("both paradigms_path and lexicon_path set; lexicon_path is ignored");
    }
    let path = expand_tilde(path);
    let analyzer = ParadigmAnalyzer::from_path(&path)?.with_unknown_score(config.unknown_score)?;
    info!(
      lemmas = analyzer.lemmas(),
      forms = analyzer.len(),
      "paradigm lexicon loaded from {path:?}"
    );
    return Ok(Arc::new(analyzer));
  }

  let analyzer = match &config.lexicon_path {
    Some(path) => {
      let path = expand_tilde(path);
      let analyzer = DictionaryAnalyzer::from_path(&path)?;
      info!(forms = analyzer.len(), "lexicon loaded from {path:?}");
      analyzer
    }
    None => {
      warn!("no lexicon configured; every word is its own normal form");
      DictionaryAnalyzer::empty()
    }
  };
  Ok(Arc::new(analyzer.with_unknown_score(config.unknown_score)?))
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
pub struct AppState<S> {
  pub store:    Arc<S>,
  pub analyzer: Arc<dyn MorphAnalyzer>,
}

impl<S> Clone for AppState<S> {
  fn clone(&self) -> Self {
    Self { store: Arc::clone(&self.store), analyzer: Arc::clone(&self.analyzer) }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the full application router: HTML pages plus `/api`.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: LexiconStore + 'static,
{
  let api = lexis_api::api_router(Arc::clone(&state.store), Arc::clone(&state.analyzer));

  Router::new()
    .route("/", get(handlers::index))
    .route("/help/", get(help::page))
    .route("/analysis/", get(analysis::form).post(analysis::submit::<S>))
    // Lexemes
    .route("/lexemes/", get(lexemes::list::<S>))
    .route("/lexemes/{id}/", get(lexemes::detail::<S>))
    // Words
    .route("/words/", get(words::list::<S>))
    .route("/words/add", get(words::add_form).post(words::add::<S>))
    .route(
      "/words/{id}/edit/",
      get(words::edit_form::<S>).post(words::edit::<S>),
    )
    .route(
      "/words/{id}/delete",
      get(words::delete_confirm::<S>).post(words::delete::<S>),
    )
    .with_state(state)
    .nest("/api", api)
    .fallback(handlers::not_found)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use lexis_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  const LEXICON: &str = "cats\tcat\t0.9\ncat\tcat\t1.0\nran\trun\t0.8\nruns\trun\t0.95\n";

  async fn make_state() -> AppState<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let analyzer = DictionaryAnalyzer::from_reader(LEXICON.as_bytes()).unwrap();
    AppState { store: Arc::new(store), analyzer: Arc::new(analyzer) }
  }

  async fn oneshot_raw(
    state:  AppState<SqliteStore>,
    method: &str,
    uri:    &str,
    form:   Option<&str>,
  ) -> axum::response::Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match form {
      Some(f) => {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
        Body::from(f.to_string())
      }
      None => Body::empty(),
    };
    router(state).oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn body_text(resp: axum::response::Response) -> String {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
  }

  fn location(resp: &axum::response::Response) -> &str {
    resp.headers().get(header::LOCATION).unwrap().to_str().unwrap()
  }

  // ── Navigation ──────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn root_redirects_to_help() {
    let resp = oneshot_raw(make_state().await, "GET", "/", None).await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/help/");
  }

  #[tokio::test]
  async fn help_page_renders() {
    let resp = oneshot_raw(make_state().await, "GET", "/help/", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("<h1>Help</h1>"));
  }

  #[tokio::test]
  async fn unknown_path_is_404() {
    let resp = oneshot_raw(make_state().await, "GET", "/nowhere", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Analysis ────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn analysis_ingests_and_redirects() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/analysis/",
      Some("text=Cats+ran%2C+cat+runs%21+Cat-nap."),
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/analysis/");

    let words = state.store.list_words().await.unwrap();
    let surface: Vec<&str> = words.iter().map(|e| e.word.word.as_str()).collect();
    assert_eq!(surface, ["cat", "catnap", "cats", "ran", "runs"]);

    let lexemes = state.store.list_lexemes().await.unwrap();
    let forms: Vec<&str> = lexemes.iter().map(|e| e.lexeme.normal_form.as_str()).collect();
    assert_eq!(forms, ["cat", "catnap", "run"]);

    let page = body_text(oneshot_raw(state, "GET", "/words/", None).await).await;
    assert!(page.contains("catnap"));
    assert!(page.contains("0.950"));
  }

  #[tokio::test]
  async fn empty_analysis_rerenders_form() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/analysis/", Some("text=+++")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("This field is required."));
    assert!(state.store.list_words().await.unwrap().is_empty());
  }

  // ── Words ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn add_word_then_edit_comment() {
    let state = make_state().await;
    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/words/add",
      Some("word=Cats&comment=plural"),
    )
    .await;
    assert!(resp.status().is_redirection());
    assert_eq!(location(&resp), "/words/");

    let word = state.store.find_word("cats").await.unwrap().unwrap();
    assert_eq!(word.comment.as_deref(), Some("plural"));

    let edit_uri = format!("/words/{}/edit/", word.word_id);
    let page = body_text(oneshot_raw(state.clone(), "GET", &edit_uri, None).await).await;
    assert!(page.contains(">plural</textarea>"));

    let resp = oneshot_raw(state.clone(), "POST", &edit_uri, Some("comment=more+than+one")).await;
    assert!(resp.status().is_redirection());

    let edited = state.store.find_word("cats").await.unwrap().unwrap();
    assert_eq!(edited.comment.as_deref(), Some("more than one"));
    assert_eq!(edited.word, word.word);
    assert_eq!(edited.score, word.score);
    assert_eq!(edited.lexeme_id, word.lexeme_id);
  }

  #[tokio::test]
  async fn add_word_requires_a_word() {
    let state = make_state().await;
    let resp = oneshot_raw(state.clone(), "POST", "/words/add", Some("word=&comment=x")).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("This field is required."));
    assert!(state.store.list_words().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn delete_word_keeps_lexeme() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/words/add", Some("word=ran&comment=")).await;
    let word = state.store.find_word("ran").await.unwrap().unwrap();

    let delete_uri = format!("/words/{}/delete", word.word_id);
    let page = body_text(oneshot_raw(state.clone(), "GET", &delete_uri, None).await).await;
    assert!(page.contains("<strong>ran</strong>"));

    let resp = oneshot_raw(state.clone(), "POST", &delete_uri, None).await;
    assert!(resp.status().is_redirection());
    assert!(state.store.find_word("ran").await.unwrap().is_none());

    let lexeme = state.store.get_lexeme(word.lexeme_id).await.unwrap().unwrap();
    assert_eq!(lexeme.lexeme.normal_form, "run");
    assert!(lexeme.words.is_empty());

    let page = body_text(
      oneshot_raw(state, "GET", &format!("/lexemes/{}/", word.lexeme_id), None).await,
    )
    .await;
    assert!(page.contains("No words refer to this lexeme."));
  }

  #[tokio::test]
  async fn missing_word_ids_are_404() {
    let state = make_state().await;
    for (method, uri, form) in [
      ("GET", "/words/5/edit/", None),
      ("POST", "/words/5/edit/", Some("comment=x")),
      ("GET", "/words/5/delete", None),
      ("POST", "/words/5/delete", None),
      ("GET", "/lexemes/5/", None),
    ] {
      let resp = oneshot_raw(state.clone(), method, uri, form).await;
      assert_eq!(resp.status(), StatusCode::NOT_FOUND, "{method} {uri}");
    }
  }

  #[tokio::test]
  async fn api_is_nested() {
    let state = make_state().await;
    oneshot_raw(state.clone(), "POST", "/words/add", Some("word=cat&comment=")).await;
    let resp = oneshot_raw(state, "GET", "/api/words", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_text(resp).await.contains("\"normal_form\":\"cat\""));
  }

  // ── Cross-origin posts ──────────────────────────────────────────────────────

  #[tokio::test]
  async fn cross_origin_posts_are_refused() {
    let state = make_state().await;
    for (uri, form) in [
      ("/analysis/", Some("text=cats")),
      ("/words/add", Some("word=cats&comment=")),
      ("/words/1/edit/", Some("comment=x")),
      ("/words/1/delete", None),
    ] {
      let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::HOST, "localhost:5000")
        .header(header::ORIGIN, "https://evil.example");
      if form.is_some() {
        builder = builder.header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
      }
      let body = form.map(|f| Body::from(f.to_owned())).unwrap_or_else(Body::empty);
      let resp = router(state.clone()).oneshot(builder.body(body).unwrap()).await.unwrap();
      assert_eq!(resp.status(), StatusCode::FORBIDDEN, "{uri}");
    }
    assert!(state.store.list_words().await.unwrap().is_empty());
  }

  #[tokio::test]
  async fn same_origin_post_is_accepted() {
    let state = make_state().await;
    let req = Request::builder()
      .method("POST")
      .uri("/words/add")
      .header(header::HOST, "localhost:5000")
      .header(header::ORIGIN, "http://localhost:5000")
      .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
      .body(Body::from("word=cats&comment="))
      .unwrap();
    let resp = router(state.clone()).oneshot(req).await.unwrap();
    assert!(resp.status().is_redirection());
    assert!(state.store.find_word("cats").await.unwrap().is_some());
  }

  // ── Analyzer selection ──────────────────────────────────────────────────────

  fn data_file(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data").join(name)
  }

  fn config(paradigms_path: Option<PathBuf>, lexicon_path: Option<PathBuf>) -> ServerConfig {
    ServerConfig {
      host:          default_host(),
      port:          default_port(),
      store_path:    default_store_path(),
      paradigms_path,
      lexicon_path,
      unknown_score: 0.0,
    }
  }

  #[test]
  fn paradigm_lexicon_wins() {
    let analyzer =
      load_analyzer(&config(Some(data_file("ru.paradigms")), Some(data_file("lexicon.tsv"))))
        .unwrap();
    assert_eq!(analyzer.analyze("кошкам").unwrap().normal_form, "кошка");
    assert_eq!(analyzer.analyze("кошек").unwrap().normal_form, "кошка");
  }

  #[test]
  fn dictionary_lexicon_is_the_fallback() {
    let analyzer = load_analyzer(&config(None, Some(data_file("lexicon.tsv")))).unwrap();
    assert_eq!(analyzer.analyze("cats").unwrap().normal_form, "cat");

    let analyzer = load_analyzer(&config(None, None)).unwrap();
    assert_eq!(analyzer.analyze("cats").unwrap().normal_form, "cats");
  }

  #[test]
  fn missing_lexicon_file_is_an_error() {
    let result = load_analyzer(&config(Some(data_file("no-such.paradigms")), None));
    assert!(matches!(result, Err(lexis_core::Error::Io(_))));
  }

  #[tokio::test]
  async fn shipped_paradigms_group_inflections() {
    let store = SqliteStore::open_in_memory().await.unwrap();
    let analyzer = load_analyzer(&config(Some(data_file("ru.paradigms")), None)).unwrap();
    let state = AppState { store: Arc::new(store), analyzer };

    let resp = oneshot_raw(
      state.clone(),
      "POST",
      "/analysis/",
      Some("text=%D0%BA%D0%BE%D1%88%D0%BA%D0%B0%D0%BC+%D0%BA%D0%BE%D1%88%D0%B5%D0%BA"),
    )
    .await;
    assert!(resp.status().is_redirection());

    let lexemes = state.store.list_lexemes().await.unwrap();
    assert_eq!(lexemes.len(), 1);
    assert_eq!(lexemes[0].lexeme.normal_form, "кошка");
    assert_eq!(lexemes[0].words.len(), 2);
  }
}
