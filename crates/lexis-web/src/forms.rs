//! Form bodies posted by the HTML pages, and their validation.
//!
//! A form that fails validation is rendered again with its values and the
//! per-field messages; nothing is written.

use std::collections::BTreeMap;

use lexis_core::word::{MAX_COMMENT_LEN, MAX_WORD_LEN};
use serde::Deserialize;

/// Field name → message, for every field that failed validation.
pub type FieldErrors = BTreeMap<&'static str, String>;

const REQUIRED: &str = "This field is required.";

fn check_len(errors: &mut FieldErrors, field: &'static str, value: &str, max: usize) {
  if value.chars().count() > max {
    errors.insert(field, format!("At most {max} characters."));
  }
}

/// `POST /analysis/`
#[derive(Debug, Default, Deserialize)]
pub struct TextAnalysisForm {
  #[serde(default)]
  pub text: String,
}

impl TextAnalysisForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    if self.text.trim().is_empty() {
      errors.insert("text", REQUIRED.into());
    }
    errors
  }
}

/// `POST /words/add`
#[derive(Debug, Default, Deserialize)]
pub struct AddWordForm {
  #[serde(default)]
  pub word:    String,
  #[serde(default)]
  pub comment: String,
}

impl AddWordForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    let word = self.word.trim();
    if word.is_empty() {
      errors.insert("word", REQUIRED.into());
    } else {
      check_len(&mut errors, "word", word, MAX_WORD_LEN);
    }
    check_len(&mut errors, "comment", &self.comment, MAX_COMMENT_LEN);
    errors
  }
}

/// `POST /words/{id}/edit/`
#[derive(Debug, Default, Deserialize)]
pub struct WordCommentForm {
  #[serde(default)]
  pub comment: String,
}

impl WordCommentForm {
  pub fn validate(&self) -> FieldErrors {
    let mut errors = FieldErrors::new();
    check_len(&mut errors, "comment", &self.comment, MAX_COMMENT_LEN);
    errors
  }
}
