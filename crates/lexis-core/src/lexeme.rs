//! Lexeme — the dictionary entry that groups surface forms.
//!
//! A lexeme holds a single normal form. The words that share it are not
//! stored on the lexeme; they are joined in on read as a [`LexemeEntry`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::word::Word;

/// A normalised (lemma) word form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lexeme {
  pub lexeme_id:   i64,
  pub normal_form: String,
  pub created_on:  DateTime<Utc>,
  pub updated_on:  DateTime<Utc>,
}

/// A lexeme bundled with every word linked to it, ordered by surface form.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LexemeEntry {
  pub lexeme: Lexeme,
  pub words:  Vec<Word>,
}
