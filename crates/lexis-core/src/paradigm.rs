//! Paradigm-based morphological analysis.
//!
//! A paradigm lexicon lists inflection classes and the lemmas that follow
//! them, so every inflected form is generated rather than listed:
//!
//! ```text
//! # A paradigm: name, then endings. The first ending belongs to the normal
//! # form; "-" is the empty ending.
//! @noun-f-ka	ка	ки	ке	ку	кой	кою	ек	кам	ками	ках
//! # A lemma: normal form, paradigm, optional weight (default 1).
//! кошка	noun-f-ka
//! ```
//!
//! A paradigm must be declared before the first lemma that uses it. When one
//! form belongs to several lemmas, each reading scores its share of the
//! lemma weights and the heaviest wins (ties: first listed).
//!
//! Forms missing from the lexicon are guessed from their endings. Every
//! generated form teaches a rewrite rule ("strip these characters, append
//! those") for each of its last [`MAX_SUFFIX`] characters; an unknown token
//! takes the most frequent rule of its longest known ending, scored at
//! [`GUESS_WEIGHT`] times that rule's share.

use std::{
  collections::{HashMap, hash_map::Entry},
  fs::File,
  io::{BufRead, BufReader},
  path::Path,
};

use crate::{
  Error, Result,
  analyzer::{Analysis, MorphAnalyzer, check_score, strip_bom},
};

/// Longest ending, in characters, used to guess unknown forms.
pub const MAX_SUFFIX: usize = 5;

/// Guessed readings never score above this.
pub const GUESS_WEIGHT: f64 = 0.5;

const EMPTY_ENDING: &str = "-";

/// How to turn a form into its normal form: drop `cut` trailing characters,
/// then append `append`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
struct Rewrite {
  cut:    usize,
  append: String,
}

impl Rewrite {
  fn between(form: &str, normal_form: &str) -> Self {
    let shared = form
      .chars()
      .zip(normal_form.chars())
      .take_while(|(a, b)| a == b)
      .count();
    Self {
      cut:    form.chars().count() - shared,
      append: normal_form.chars().skip(shared).collect(),
    }
  }

  fn apply(&self, token: &str) -> Option<String> {
    let len = token.chars().count();
    if self.cut > len {
      return None;
    }
    let mut out: String = token.chars().take(len - self.cut).collect();
    out.push_str(&self.append);
    Some(out)
  }
}

#[derive(Debug, Clone)]
struct Guess {
  rewrite: Rewrite,
  score:   f64,
}

/// A [`MorphAnalyzer`] generated from inflection paradigms.
#[derive(Debug, Clone)]
pub struct ParadigmAnalyzer {
  readings:      HashMap<String, Analysis>,
  guesses:       HashMap<String, Guess>,
  lemmas:        usize,
  unknown_score: f64,
}

impl ParadigmAnalyzer {
  /// Load a paradigm lexicon file.
  pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
    let file = File::open(path)?;
    Self::from_reader(BufReader::new(file))
  }

  /// Load a paradigm lexicon from any buffered reader.
  pub fn from_reader(reader: impl BufRead) -> Result<Self> {
    let mut loader = Loader::default();
    for (idx, line) in reader.lines().enumerate() {
      let line = line?;
      loader.load_line(idx + 1, strip_bom(idx, &line))?;
    }
    Ok(loader.finish())
  }

  /// Score reported for tokens that match neither a form nor an ending.
  pub fn with_unknown_score(mut self, score: f64) -> Result<Self> {
    check_score(score).map_err(Error::InvalidInput)?;
    self.unknown_score = score;
    Ok(self)
  }

  /// Number of distinct generated forms.
  pub fn len(&self) -> usize { self.readings.len() }

  pub fn is_empty(&self) -> bool { self.readings.is_empty() }

  /// Number of lemmas loaded.
  pub fn lemmas(&self) -> usize { self.lemmas }

  fn guess(&self, token: &str) -> Option<Analysis> {
    let chars: Vec<char> = token.chars().collect();
    // Keep at least one character of stem in front of the ending.
    let longest = MAX_SUFFIX.min(chars.len().saturating_sub(1));
    (1..=longest).rev().find_map(|len| {
      let ending: String = chars[chars.len() - len..].iter().collect();
      let guess = self.guesses.get(&ending)?;
      let normal_form = guess.rewrite.apply(token).filter(|n| !n.is_empty())?;
      Some(Analysis { normal_form, score: guess.score })
    })
  }
}

impl MorphAnalyzer for ParadigmAnalyzer {
  fn analyze(&self, token: &str) -> Result<Analysis> {
    if token.is_empty() {
      return Err(Error::Analysis {
        token:   token.to_owned(),
        message: "empty token".into(),
      });
    }

    if let Some(reading) = self.readings.get(token) {
      return Ok(reading.clone());
    }
    Ok(self.guess(token).unwrap_or_else(|| Analysis {
      normal_form: token.to_owned(),
      score:       self.unknown_score,
    }))
  }
}

// ─── Loading ─────────────────────────────────────────────────────────────────

#[derive(Default)]
struct Loader {
  paradigms: HashMap<String, Vec<String>>,
  /// form → (normal form, summed weight), in first-seen order.
  forms:     HashMap<String, Vec<(String, f64)>>,
  /// ending → rewrite → occurrences.
  endings:   HashMap<String, HashMap<Rewrite, u32>>,
  lemmas:    usize,
}

impl Loader {
  fn load_line(&mut self, line_no: usize, line: &str) -> Result<()> {
    let line = line.trim_end_matches('\r');
    if line.trim().is_empty() || line.trim_start().starts_with('#') {
      return Ok(());
    }

    let lexicon_err = |message: String| Error::Lexicon { line: line_no, message };

    if let Some(decl) = line.strip_prefix('@') {
      let mut cols = decl.split('\t').map(str::trim);
      let name = cols
        .next()
        .filter(|s| !s.is_empty())
        .ok_or_else(|| lexicon_err("paradigm without a name".into()))?;
      let endings: Vec<String> = cols
        .filter(|s| !s.is_empty())
        .map(|e| if e == EMPTY_ENDING { String::new() } else { e.to_lowercase() })
        .collect();
      if endings.is_empty() {
        return Err(lexicon_err(format!("paradigm {name} has no endings")));
      }
      match self.paradigms.entry(name.to_owned()) {
        Entry::Occupied(_) => Err(lexicon_err(format!("paradigm {name} declared twice"))),
        Entry::Vacant(slot) => {
          slot.insert(endings);
          Ok(())
        }
      }
    } else {
      let mut cols = line.split('\t').map(str::trim);
      let (lemma, name) = match (cols.next(), cols.next()) {
        (Some(l), Some(p)) if !l.is_empty() && !p.is_empty() => (l.to_lowercase(), p),
        _ => return Err(lexicon_err("expected normal_form<TAB>paradigm".into())),
      };
      let weight = match cols.next() {
        None | Some("") => 1.0,
        Some(raw) => raw
          .parse::<f64>()
          .ok()
          .filter(|w| w.is_finite() && *w > 0.0)
          .ok_or_else(|| lexicon_err(format!("bad weight {raw:?}")))?,
      };
      if cols.next().is_some() {
        return Err(lexicon_err("too many columns".into()));
      }

      let endings = self
        .paradigms
        .get(name)
        .ok_or_else(|| lexicon_err(format!("unknown paradigm {name}")))?
        .clone();
      let stem = lemma
        .strip_suffix(endings[0].as_str())
        .ok_or_else(|| lexicon_err(format!("{lemma} does not end in {:?}", endings[0])))?;

      let mut seen: Vec<String> = Vec::with_capacity(endings.len());
      for ending in &endings {
        let form = format!("{stem}{ending}");
        if form.is_empty() || seen.contains(&form) {
          continue;
        }
        self.add_form(&form, &lemma, weight);
        seen.push(form);
      }
      self.lemmas += 1;
      Ok(())
    }
  }

  fn add_form(&mut self, form: &str, lemma: &str, weight: f64) {
    let readings = self.forms.entry(form.to_owned()).or_default();
    match readings.iter_mut().find(|(n, _)| n == lemma) {
      Some((_, w)) => *w += weight,
      None => readings.push((lemma.to_owned(), weight)),
    }

    let rewrite = Rewrite::between(form, lemma);
    let chars: Vec<char> = form.chars().collect();
    // An ending only predicts a rewrite it fully contains.
    let shortest = rewrite.cut.max(1);
    let longest = MAX_SUFFIX.min(chars.len().saturating_sub(1));
    for len in shortest..=longest {
      let ending: String = chars[chars.len() - len..].iter().collect();
      *self
        .endings
        .entry(ending)
        .or_default()
        .entry(rewrite.clone())
        .or_default() += 1;
    }
  }

  fn finish(self) -> ParadigmAnalyzer {
    let readings = self
      .forms
      .into_iter()
      .filter_map(|(form, readings)| {
        let total: f64 = readings.iter().map(|(_, w)| w).sum();
        let (normal_form, weight) = readings
          .into_iter()
          .reduce(|best, next| if next.1 > best.1 { next } else { best })?;
        Some((form, Analysis { normal_form, score: weight / total }))
      })
      .collect();

    let guesses = self
      .endings
      .into_iter()
      .filter_map(|(ending, rewrites)| {
        let total: u32 = rewrites.values().sum();
        // Most frequent first; equal counts fall back to the smaller rewrite
        // so the choice does not depend on hash order.
        let (rewrite, count) = rewrites
          .into_iter()
          .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(&a.0)))?;
        let score = GUESS_WEIGHT * f64::from(count) / f64::from(total);
        Some((ending, Guess { rewrite, score }))
      })
      .collect();

    ParadigmAnalyzer {
      readings,
      guesses,
      lemmas: self.lemmas,
      unknown_score: 0.0,
    }
  }
}
