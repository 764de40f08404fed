//! Error types for `lexis-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("lexicon line {line}: {message}")]
  Lexicon { line: usize, message: String },

  #[error("cannot analyse {token:?}: {message}")]
  Analysis { token: String, message: String },

  #[error("invalid input: {0}")]
  InvalidInput(String),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
