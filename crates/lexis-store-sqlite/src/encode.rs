//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! All timestamps are stored as RFC 3339 strings. Rows are first read into
//! `Raw*` structs inside the connection thread and decoded afterwards.

use chrono::{DateTime, Utc};
use lexis_core::{
  lexeme::Lexeme,
  word::{Word, WordEntry},
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── Column lists ────────────────────────────────────────────────────────────

/// Columns read by [`RawWord::from_row`], in order.
pub const WORD_COLUMNS: &str =
  "word_id, word, comment, score, created_on, updated_on, lexeme_id";

/// Columns read by [`RawLexeme::from_row`], in order.
pub const LEXEME_COLUMNS: &str = "lexeme_id, normal_form, created_on, updated_on";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from a `words` row.
pub struct RawWord {
  pub word_id:    i64,
  pub word:       String,
  pub comment:    Option<String>,
  pub score:      f64,
  pub created_on: String,
  pub updated_on: String,
  pub lexeme_id:  i64,
}

impl RawWord {
  /// Read [`WORD_COLUMNS`] starting at column 0.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      word_id:    row.get(0)?,
      word:       row.get(1)?,
      comment:    row.get(2)?,
      score:      row.get(3)?,
      created_on: row.get(4)?,
      updated_on: row.get(5)?,
      lexeme_id:  row.get(6)?,
    })
  }

  pub fn into_word(self) -> Result<Word> {
    Ok(Word {
      word_id:    self.word_id,
      word:       self.word,
      comment:    self.comment,
      score:      self.score,
      created_on: decode_dt(&self.created_on)?,
      updated_on: decode_dt(&self.updated_on)?,
      lexeme_id:  self.lexeme_id,
    })
  }
}

/// A `words` row joined with its lexeme's normal form.
pub struct RawWordEntry {
  pub word:        RawWord,
  pub normal_form: String,
}

impl RawWordEntry {
  /// Read [`WORD_COLUMNS`] (prefixed `w.`) followed by `l.normal_form`.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      word:        RawWord::from_row(row)?,
      normal_form: row.get(7)?,
    })
  }

  pub fn into_entry(self) -> Result<WordEntry> {
    Ok(WordEntry {
      word:        self.word.into_word()?,
      normal_form: self.normal_form,
    })
  }
}

/// Raw values read directly from a `lexemes` row.
pub struct RawLexeme {
  pub lexeme_id:   i64,
  pub normal_form: String,
  pub created_on:  String,
  pub updated_on:  String,
}

impl RawLexeme {
  /// Read [`LEXEME_COLUMNS`] starting at column 0.
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      lexeme_id:   row.get(0)?,
      normal_form: row.get(1)?,
      created_on:  row.get(2)?,
      updated_on:  row.get(3)?,
    })
  }

  pub fn into_lexeme(self) -> Result<Lexeme> {
    Ok(Lexeme {
      lexeme_id:   self.lexeme_id,
      normal_form: self.normal_form,
      created_on:  decode_dt(&self.created_on)?,
      updated_on:  decode_dt(&self.updated_on)?,
    })
  }
}
