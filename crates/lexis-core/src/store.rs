//! The `LexiconStore` trait and supporting types.
//!
//! The trait is implemented by storage backends (e.g. `lexis-store-sqlite`).
//! Higher layers (`lexis-api`, `lexis-web`) and the ingestion pipeline depend
//! on this abstraction, not on any concrete backend.

use std::future::Future;

use crate::{
  lexeme::LexemeEntry,
  word::{NewWord, Word, WordEntry},
};

// ─── Batch result ────────────────────────────────────────────────────────────

/// What [`LexiconStore::ingest`] did with a batch.
#[derive(Debug, Clone, Default)]
pub struct IngestOutcome {
  /// One persisted word per input entry, in input order. Entries whose
  /// surface form already existed resolve to the existing row.
  pub words:           Vec<Word>,
  pub words_created:   usize,
  pub lexemes_created: usize,
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a Lexis word store backend.
///
/// Surface forms and normal forms are unique. Writes of new words go through
/// [`ingest`](LexiconStore::ingest), which resolves or creates both rows
/// atomically, so concurrent batches never duplicate either.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait LexiconStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Words ─────────────────────────────────────────────────────────────

  /// Look up a word by exact surface form.
  fn find_word<'a>(
    &'a self,
    word: &'a str,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + 'a;

  /// Return every stored word whose surface form is in `words`.
  fn find_words<'a>(
    &'a self,
    words: &'a [String],
  ) -> impl Future<Output = Result<Vec<Word>, Self::Error>> + Send + 'a;

  /// Write a batch of new words in a single transaction.
  ///
  /// For each entry: an existing word with the same surface form is reused
  /// untouched; otherwise the lexeme for `normal_form` is fetched or created
  /// and a new word linked to it. Nothing is written if any entry fails.
  fn ingest(
    &self,
    batch: Vec<NewWord>,
  ) -> impl Future<Output = Result<IngestOutcome, Self::Error>> + Send + '_;

  /// Retrieve a word and its normal form. Returns `None` if not found.
  fn get_word(
    &self,
    word_id: i64,
  ) -> impl Future<Output = Result<Option<WordEntry>, Self::Error>> + Send + '_;

  /// List all words ordered by surface form.
  fn list_words(
    &self,
  ) -> impl Future<Output = Result<Vec<WordEntry>, Self::Error>> + Send + '_;

  /// Overwrite a word's comment. Returns `None` if the word does not exist.
  fn set_comment(
    &self,
    word_id: i64,
    comment: Option<String>,
  ) -> impl Future<Output = Result<Option<Word>, Self::Error>> + Send + '_;

  /// Delete a word. The owning lexeme is left in place, even when no other
  /// word refers to it. Returns `false` if the word did not exist.
  fn delete_word(
    &self,
    word_id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Lexemes ───────────────────────────────────────────────────────────

  /// Retrieve a lexeme with its words. Returns `None` if not found.
  fn get_lexeme(
    &self,
    lexeme_id: i64,
  ) -> impl Future<Output = Result<Option<LexemeEntry>, Self::Error>> + Send + '_;

  /// List all lexemes ordered by normal form, each with its words.
  fn list_lexemes(
    &self,
  ) -> impl Future<Output = Result<Vec<LexemeEntry>, Self::Error>> + Send + '_;
}
