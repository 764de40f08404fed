//! The ingestion pipeline: text → tokens → analysis → stored words.
//!
//! An [`Ingestor`] borrows its store and analyzer; nothing here is global.
//! Existing surface forms are looked up first and only unseen tokens reach the
//! analyzer. The staged words are then written by a single
//! [`LexiconStore::ingest`] call, so a batch lands completely or not at all.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{
  Error, Result,
  analyzer::MorphAnalyzer,
  store::{IngestOutcome, LexiconStore},
  tokenize::tokenize,
  word::{MAX_WORD_LEN, NewWord, Word, normalize_comment},
};

/// Counts describing one ingested batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestReport {
  /// Distinct tokens in the batch.
  pub tokens:          usize,
  pub words_created:   usize,
  /// Tokens that resolved to an already stored word.
  pub words_reused:    usize,
  pub lexemes_created: usize,
}

/// Runs the pipeline against an injected store and analyzer.
pub struct Ingestor<'a, S: ?Sized, A: ?Sized> {
  store:    &'a S,
  analyzer: &'a A,
}

impl<'a, S, A> Ingestor<'a, S, A>
where
  S: LexiconStore,
  A: MorphAnalyzer + ?Sized,
{
  pub fn new(store: &'a S, analyzer: &'a A) -> Self { Self { store, analyzer } }

  /// Tokenize `text` and ingest every distinct token.
  pub async fn ingest_text(&self, text: &str) -> Result<IngestReport> {
    self.ingest_tokens(tokenize(text)).await
  }

  /// Ensure every token is stored as a word linked to its lexeme.
  ///
  /// Fails without writing anything if the analyzer rejects any token or the
  /// store cannot commit the batch.
  pub async fn ingest_tokens(&self, tokens: BTreeSet<String>) -> Result<IngestReport> {
    let tokens: Vec<String> = tokens.into_iter().collect();
    if tokens.is_empty() {
      return Ok(IngestReport::default());
    }

    let existing: HashSet<String> = self
      .store
      .find_words(&tokens)
      .await
      .map_err(store_err)?
      .into_iter()
      .map(|w| w.word)
      .collect();

    let mut batch = Vec::with_capacity(tokens.len() - existing.len());
    for token in tokens.iter().filter(|t| !existing.contains(*t)) {
      let analysis = self.analyzer.analyze(token)?;
      batch.push(NewWord {
        word:        token.clone(),
        normal_form: analysis.normal_form,
        score:       analysis.score,
        comment:     None,
      });
    }

    let outcome = if batch.is_empty() {
      IngestOutcome::default()
    } else {
      self.store.ingest(batch).await.map_err(store_err)?
    };

    let report = IngestReport {
      tokens:          tokens.len(),
      words_created:   outcome.words_created,
      words_reused:    tokens.len() - outcome.words_created,
      lexemes_created: outcome.lexemes_created,
    };
    debug!(
      tokens = report.tokens,
      words_created = report.words_created,
      lexemes_created = report.lexemes_created,
      "ingested batch"
    );
    Ok(report)
  }

  /// Ingest one explicitly supplied word, attaching `comment` if the word is
  /// new. An existing word is returned unchanged and the comment is dropped.
  pub async fn add_word(&self, word: &str, comment: Option<String>) -> Result<Word> {
    let word = word.trim().to_lowercase();
    if word.is_empty() {
      return Err(Error::InvalidInput("word is required".into()));
    }
    if word.chars().count() > MAX_WORD_LEN {
      return Err(Error::InvalidInput(format!(
        "word is longer than {MAX_WORD_LEN} characters"
      )));
    }
    let comment = normalize_comment(comment)?;

    if let Some(existing) = self.store.find_word(&word).await.map_err(store_err)? {
      return Ok(existing);
    }

    let analysis = self.analyzer.analyze(&word)?;
    let mut outcome = self
      .store
      .ingest(vec![NewWord {
        word,
        normal_form: analysis.normal_form,
        score: analysis.score,
        comment,
      }])
      .await
      .map_err(store_err)?;

    debug!(
      words_created = outcome.words_created,
      lexemes_created = outcome.lexemes_created,
      "added word"
    );
    outcome
      .words
      .pop()
      .ok_or_else(|| Error::Store("ingest returned no word".into()))
  }
}

fn store_err<E: std::error::Error + Send + Sync + 'static>(e: E) -> Error {
  Error::Store(Box::new(e))
}

// ─── Tests ───────────────────────────────────────────────────────────────────
