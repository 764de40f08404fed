//! Word — one observed surface form and its analysis.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Error, Result};

/// Longest surface form accepted from a user-facing form.
pub const MAX_WORD_LEN: usize = 40;
/// Longest comment accepted from a user-facing form.
pub const MAX_COMMENT_LEN: usize = 255;

/// A persisted surface form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Word {
  pub word_id:    i64,
  /// The surface form, lowercased.
  pub word:       String,
  pub comment:    Option<String>,
  /// Analyzer confidence for the chosen normal form, in `[0, 1]`.
  pub score:      f64,
  pub created_on: DateTime<Utc>,
  pub updated_on: DateTime<Utc>,
  pub lexeme_id:  i64,
}

/// A word joined with the normal form of its owning lexeme.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordEntry {
  pub word:        Word,
  pub normal_form: String,
}

/// A word staged for insertion by the ingestion pipeline.
///
/// The store resolves `normal_form` to a lexeme (creating it if needed)
/// when the batch is written.
#[derive(Debug, Clone, PartialEq)]
pub struct NewWord {
  pub word:        String,
  pub normal_form: String,
  pub score:       f64,
  pub comment:     Option<String>,
}

/// Collapse a blank comment to `None` and enforce [`MAX_COMMENT_LEN`].
pub fn normalize_comment(comment: Option<String>) -> Result<Option<String>> {
  let comment = comment.filter(|c| !c.trim().is_empty());
  if let Some(c) = &comment
    && c.chars().count() > MAX_COMMENT_LEN
  {
    return Err(Error::InvalidInput(format!(
      "comment is longer than {MAX_COMMENT_LEN} characters"
    )));
  }
  Ok(comment)
}
