//! [`SqliteStore`] — the SQLite implementation of [`LexiconStore`].

use std::{collections::HashMap, path::Path};

use chrono::Utc;
use rusqlite::{OptionalExtension as _, TransactionBehavior};
use tracing::debug;

use lexis_core::{
  lexeme::LexemeEntry,
  store::{IngestOutcome, LexiconStore},
  word::{NewWord, Word, WordEntry},
};

use crate::{
  Result,
  encode::{LEXEME_COLUMNS, RawLexeme, RawWord, RawWordEntry, WORD_COLUMNS, encode_dt},
  schema::SCHEMA,
};

/// Upper bound on `?` placeholders in a single `IN (...)` lookup.
const LOOKUP_CHUNK: usize = 500;

/// Words joined with their normal form; `?1` filters by id when non-NULL.
const WORD_ENTRY_QUERY: &str = "
  SELECT w.word_id, w.word, w.comment, w.score, w.created_on, w.updated_on,
         w.lexeme_id, l.normal_form
  FROM words w
  JOIN lexemes l ON l.lexeme_id = w.lexeme_id
  WHERE (?1 IS NULL OR w.word_id = ?1)
  ORDER BY w.word";

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Lexis word store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  /// Missing parent directories are created.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref().to_path_buf();
    if let Some(parent) = path.parent()
      && !parent.as_os_str().is_empty()
    {
      tokio::fs::create_dir_all(parent).await?;
    }
    let conn = tokio_rusqlite::Connection::open(&path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    debug!(path = %path.display(), "opened sqlite store");
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Load lexemes (all, or the one with `lexeme_id`) with their words
  /// attached. Two queries stitched together by `lexeme_id`.
  async fn lexeme_entries(&self, lexeme_id: Option<i64>) -> Result<Vec<LexemeEntry>> {
    let (raw_lexemes, raw_words): (Vec<RawLexeme>, Vec<RawWord>) = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {LEXEME_COLUMNS} FROM lexemes
           WHERE (?1 IS NULL OR lexeme_id = ?1)
           ORDER BY normal_form"
        ))?;
        let lexemes = stmt
          .query_map(rusqlite::params![lexeme_id], RawLexeme::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        let mut stmt = conn.prepare(&format!(
          "SELECT {WORD_COLUMNS} FROM words
           WHERE (?1 IS NULL OR lexeme_id = ?1)
           ORDER BY word"
        ))?;
        let words = stmt
          .query_map(rusqlite::params![lexeme_id], RawWord::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;

        Ok((lexemes, words))
      })
      .await?;

    let mut by_lexeme: HashMap<i64, Vec<Word>> = HashMap::new();
    for raw in raw_words {
      let word = raw.into_word()?;
      by_lexeme.entry(word.lexeme_id).or_default().push(word);
    }

    raw_lexemes
      .into_iter()
      .map(|raw| {
        let lexeme = raw.into_lexeme()?;
        let words = by_lexeme.remove(&lexeme.lexeme_id).unwrap_or_default();
        Ok(LexemeEntry { lexeme, words })
      })
      .collect()
  }

  async fn word_entries(&self, word_id: Option<i64>) -> Result<Vec<WordEntry>> {
    let raws: Vec<RawWordEntry> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(WORD_ENTRY_QUERY)?;
        let rows = stmt
          .query_map(rusqlite::params![word_id], RawWordEntry::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawWordEntry::into_entry).collect()
  }
}

// ─── LexiconStore impl ───────────────────────────────────────────────────────

impl LexiconStore for SqliteStore {
  type Error = crate::Error;

  // ── Words ─────────────────────────────────────────────────────────────────

  async fn find_word(&self, word: &str) -> Result<Option<Word>> {
    let word = word.to_owned();

    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {WORD_COLUMNS} FROM words WHERE word = ?1"),
              rusqlite::params![word],
              RawWord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  async fn find_words(&self, words: &[String]) -> Result<Vec<Word>> {
    if words.is_empty() {
      return Ok(Vec::new());
    }
    let words = words.to_vec();

    let raws: Vec<RawWord> = self
      .conn
      .call(move |conn| {
        let mut raws = Vec::new();
        for chunk in words.chunks(LOOKUP_CHUNK) {
          let placeholders = vec!["?"; chunk.len()].join(", ");
          let mut stmt = conn.prepare(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE word IN ({placeholders})"
          ))?;
          let rows = stmt
            .query_map(rusqlite::params_from_iter(chunk.iter()), RawWord::from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          raws.extend(rows);
        }
        Ok(raws)
      })
      .await?;

    raws.into_iter().map(RawWord::into_word).collect()
  }

  async fn ingest(&self, batch: Vec<NewWord>) -> Result<IngestOutcome> {
    let now = encode_dt(Utc::now());

    let (raws, words_created, lexemes_created): (Vec<RawWord>, usize, usize) = self
      .conn
      .call(move |conn| {
        // Take the write lock before the first lookup.
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let mut raws = Vec::with_capacity(batch.len());
        let mut words_created = 0;
        let mut lexemes_created = 0;
        {
          let mut select_word = tx.prepare_cached(&format!(
            "SELECT {WORD_COLUMNS} FROM words WHERE word = ?1"
          ))?;
          let mut insert_lexeme = tx.prepare_cached(
            "INSERT INTO lexemes (normal_form, created_on, updated_on)
             VALUES (?1, ?2, ?2)
             ON CONFLICT (normal_form) DO NOTHING",
          )?;
          let mut select_lexeme =
            tx.prepare_cached("SELECT lexeme_id FROM lexemes WHERE normal_form = ?1")?;
          let mut insert_word = tx.prepare_cached(
            "INSERT INTO words (word, comment, score, created_on, updated_on, lexeme_id)
             VALUES (?1, ?2, ?3, ?4, ?4, ?5)
             ON CONFLICT (word) DO NOTHING",
          )?;

          for nw in &batch {
            let existing = select_word
              .query_row(rusqlite::params![nw.word], RawWord::from_row)
              .optional()?;
            if let Some(raw) = existing {
              raws.push(raw);
              continue;
            }

            lexemes_created += insert_lexeme.execute(rusqlite::params![nw.normal_form, now])?;
            let lexeme_id: i64 =
              select_lexeme.query_row(rusqlite::params![nw.normal_form], |r| r.get(0))?;

            words_created += insert_word.execute(rusqlite::params![
              nw.word, nw.comment, nw.score, now, lexeme_id,
            ])?;
            raws.push(select_word.query_row(rusqlite::params![nw.word], RawWord::from_row)?);
          }
        }
        tx.commit()?;
        Ok((raws, words_created, lexemes_created))
      })
      .await?;

    let words = raws
      .into_iter()
      .map(RawWord::into_word)
      .collect::<Result<Vec<_>>>()?;

    Ok(IngestOutcome { words, words_created, lexemes_created })
  }

  async fn get_word(&self, word_id: i64) -> Result<Option<WordEntry>> {
    Ok(self.word_entries(Some(word_id)).await?.pop())
  }

  async fn list_words(&self) -> Result<Vec<WordEntry>> { self.word_entries(None).await }

  async fn set_comment(&self, word_id: i64, comment: Option<String>) -> Result<Option<Word>> {
    let now = encode_dt(Utc::now());

    let raw: Option<RawWord> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!(
                "UPDATE words SET comment = ?1, updated_on = ?2
                 WHERE word_id = ?3
                 RETURNING {WORD_COLUMNS}"
              ),
              rusqlite::params![comment, now, word_id],
              RawWord::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawWord::into_word).transpose()
  }

  async fn delete_word(&self, word_id: i64) -> Result<bool> {
    let deleted = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM words WHERE word_id = ?1", rusqlite::params![word_id])?)
      })
      .await?;
    Ok(deleted > 0)
  }

  // ── Lexemes ───────────────────────────────────────────────────────────────

  async fn get_lexeme(&self, lexeme_id: i64) -> Result<Option<LexemeEntry>> {
    Ok(self.lexeme_entries(Some(lexeme_id)).await?.pop())
  }

  async fn list_lexemes(&self) -> Result<Vec<LexemeEntry>> { self.lexeme_entries(None).await }
}
