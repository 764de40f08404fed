//! Morphological analysis: mapping a surface form to its normal form.
//!
//! The pipeline only sees the [`MorphAnalyzer`] trait. The bundled
//! [`DictionaryAnalyzer`] answers from a tab-separated lexicon file and falls
//! back to the token itself for forms it does not know.

use std::{
  collections::{HashMap, hash_map::Entry},
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use crate::{Error, Result};

/// The most probable reading of a token.
#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
  pub normal_form: String,
  /// Confidence in `[0, 1]`.
  pub score:       f64,
}

/// Anything that can pick a normal form for a lowercase token.
pub trait MorphAnalyzer: Send + Sync {
  fn analyze(&self, token: &str) -> Result<Analysis>;
}

// ─── Dictionary analyzer ─────────────────────────────────────────────────────

/// A lookup-table analyzer.
///
/// Lexicon lines have the form `form<TAB>normal_form[<TAB>score]`. Blank lines
/// and lines starting with `#` are skipped, the score defaults to `1.0`, and
/// both columns are lowercased. When a form is listed more than once the
/// highest-scoring reading wins; on a tie the first one listed is kept.
#[derive(Debug, Clone)]
pub struct DictionaryAnalyzer {
  readings:      HashMap<String, Analysis>,
  unknown_score: f64,
}

impl DictionaryAnalyzer {
  /// An analyzer with no entries: every token is its own normal form.
  pub fn empty() -> Self {
    Self { readings: HashMap::new(), unknown_score: 0.0 }
  }

  /// Load a lexicon file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  /// Load a lexicon from any buffered reader.
  pub fn from_reader(reader: impl BufRead) -> Result<Self> {
    let mut analyzer = Self::empty();
    for (idx, line) in reader.lines().enumerate() {
      let line = line?;
      analyzer.load_line(idx + 1, strip_bom(idx, &line))?;
    }
    Ok(analyzer)
  }

  /// Score reported for tokens missing from the lexicon.
  pub fn with_unknown_score(mut self, score: f64) -> Result<Self> {
    check_score(score).map_err(Error::InvalidInput)?;
    self.unknown_score = score;
    Ok(self)
  }

  /// Add one reading, keeping the existing one if it scores at least as high.
  pub fn insert(&mut self, form: &str, normal_form: &str, score: f64) {
    let reading = Analysis { normal_form: normal_form.to_lowercase(), score };
    match self.readings.entry(form.to_lowercase()) {
      Entry::Occupied(mut slot) => {
        if score > slot.get().score {
          slot.insert(reading);
        }
      }
      Entry::Vacant(slot) => {
        slot.insert(reading);
      }
    }
  }

  pub fn len(&self) -> usize { self.readings.len() }

  pub fn is_empty(&self) -> bool { self.readings.is_empty() }

  fn load_line(&mut self, line_no: usize, line: &str) -> Result<()> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
      return Ok(());
    }

    let lexicon_err = |message: String| Error::Lexicon { line: line_no, message };

    let mut cols = line.split('\t').map(str::trim);
    let form = cols.next().filter(|s| !s.is_empty());
    let normal_form = cols.next().filter(|s| !s.is_empty());
    let (form, normal_form) = match (form, normal_form) {
      (Some(f), Some(n)) => (f, n),
      _ => return Err(lexicon_err("expected form<TAB>normal_form".into())),
    };

    let score = match cols.next() {
      None | Some("") => 1.0,
      Some(raw) => raw
        .parse::<f64>()
        .map_err(|e| lexicon_err(format!("bad score {raw:?}: {e}")))?,
    };
    check_score(score).map_err(lexicon_err)?;

    if cols.next().is_some() {
      return Err(lexicon_err("too many columns".into()));
    }

    self.insert(form, normal_form, score);
    Ok(())
  }
}

impl MorphAnalyzer for DictionaryAnalyzer {
  fn analyze(&self, token: &str) -> Result<Analysis> {
    if token.is_empty() {
      return Err(Error::Analysis {
        token:   token.to_owned(),
        message: "empty token".into(),
      });
    }

    Ok(match self.readings.get(token) {
      Some(reading) => reading.clone(),
      None => Analysis {
        normal_form: token.to_owned(),
        score:       self.unknown_score,
      },
    })
  }
}

/// Drop a UTF-8 byte order mark from the first line of a file.
pub(crate) fn strip_bom(idx: usize, line: &str) -> &str {
  if idx == 0 { line.strip_prefix('\u{feff}').unwrap_or(line) } else { line }
}

pub(crate) fn check_score(score: f64) -> std::result::Result<(), String> {
  if (0.0..=1.0).contains(&score) {
    Ok(())
  } else {
    Err(format!("score {score} is outside [0, 1]"))
  }
}
