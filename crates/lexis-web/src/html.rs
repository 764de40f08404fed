//! HTML page generation.
//!
//! Pages are assembled with `format!`; every interpolated user value goes
//! through [`escape`], which delegates to `quick-xml`'s entity escaping.

use std::borrow::Cow;

use axum::http::StatusCode;
use chrono::{DateTime, Utc};
use lexis_core::{
  lexeme::LexemeEntry,
  word::{Word, WordEntry},
};

use crate::forms::{AddWordForm, FieldErrors};

const STYLE: &str = "
body { font-family: sans-serif; max-width: 60rem; margin: 2rem auto; padding: 0 1rem; }
nav a { margin-right: 1rem; }
table { border-collapse: collapse; width: 100%; }
th, td { text-align: left; padding: .3rem .6rem; border-bottom: 1px solid #ddd; }
textarea { width: 100%; }
.error { color: #b00020; }
.muted { color: #777; }
";

/// Escape `&`, `<`, `>`, `'` and `"`.
pub fn escape(s: &str) -> Cow<'_, str> { quick_xml::escape::escape(s) }

fn timestamp(dt: DateTime<Utc>) -> String { dt.format("%Y-%m-%d %H:%M").to_string() }

fn layout(title: &str, body: &str) -> String {
  format!(
    "<!DOCTYPE html>
<html>
<head>
<meta charset=\"utf-8\">
<title>{title} · Lexis</title>
<style>{STYLE}</style>
</head>
<body>
<nav>
  <a href=\"/analysis/\">Analysis</a>
  <a href=\"/words/\">Words</a>
  <a href=\"/lexemes/\">Lexemes</a>
  <a href=\"/words/add\">Add word</a>
  <a href=\"/help/\">Help</a>
</nav>
<h1>{title}</h1>
{body}
</body>
</html>
",
    title = escape(title),
  )
}

fn field_error(errors: &FieldErrors, field: &str) -> String {
  errors
    .get(field)
    .map(|m| format!("<p class=\"error\">{}</p>", escape(m)))
    .unwrap_or_default()
}

fn comment_cell(comment: Option<&str>) -> String {
  match comment {
    Some(c) => escape(c).into_owned(),
    None => "<span class=\"muted\">—</span>".to_owned(),
  }
}

// ─── Analysis ────────────────────────────────────────────────────────────────

pub fn analysis_page(text: &str, errors: &FieldErrors) -> String {
  let body = format!(
    "<form method=\"post\" action=\"/analysis/\">
<label for=\"text\">Text</label>
<textarea id=\"text\" name=\"text\" rows=\"12\">{text}</textarea>
{error}
<button type=\"submit\">Submit</button>
</form>",
    text = escape(text),
    error = field_error(errors, "text"),
  );
  layout("Text analysis", &body)
}

// ─── Lexemes ─────────────────────────────────────────────────────────────────

pub fn lexemes_page(lexemes: &[LexemeEntry]) -> String {
  if lexemes.is_empty() {
    return layout("Lexemes", "<p class=\"muted\">No lexemes yet.</p>");
  }

  let mut rows = String::new();
  for entry in lexemes {
    let words = entry
      .words
      .iter()
      .map(|w| escape(&w.word).into_owned())
      .collect::<Vec<_>>()
      .join(", ");
    rows.push_str(&format!(
      "<tr><td><a href=\"/lexemes/{id}/\">{normal_form}</a></td><td>{words}</td><td>{created}</td></tr>\n",
      id = entry.lexeme.lexeme_id,
      normal_form = escape(&entry.lexeme.normal_form),
      created = timestamp(entry.lexeme.created_on),
    ));
  }

  let body = format!(
    "<table>
<tr><th>Normal form</th><th>Words</th><th>Created</th></tr>
{rows}</table>"
  );
  layout("Lexemes", &body)
}

pub fn lexeme_page(entry: &LexemeEntry) -> String {
  let mut rows = String::new();
  for w in &entry.words {
    rows.push_str(&format!(
      "<tr><td>{word}</td><td>{score:.3}</td><td>{comment}</td><td><a href=\"/words/{id}/edit/\">edit</a></td></tr>\n",
      word = escape(&w.word),
      score = w.score,
      comment = comment_cell(w.comment.as_deref()),
      id = w.word_id,
    ));
  }

  let words = if entry.words.is_empty() {
    "<p class=\"muted\">No words refer to this lexeme.</p>".to_owned()
  } else {
    format!(
      "<table>
<tr><th>Word</th><th>Score</th><th>Comment</th><th></th></tr>
{rows}</table>"
    )
  };

  let body = format!(
    "<p>Created {created}, updated {updated}.</p>\n{words}",
    created = timestamp(entry.lexeme.created_on),
    updated = timestamp(entry.lexeme.updated_on),
  );
  layout(&entry.lexeme.normal_form, &body)
}

// ─── Words ───────────────────────────────────────────────────────────────────

pub fn words_page(words: &[WordEntry]) -> String {
  let add = "<p><a href=\"/words/add\">Add a word</a></p>";
  if words.is_empty() {
    return layout("Words", &format!("{add}\n<p class=\"muted\">No words yet.</p>"));
  }

  let mut rows = String::new();
  for entry in words {
    let w = &entry.word;
    rows.push_str(&format!(
      "<tr><td>{word}</td><td><a href=\"/lexemes/{lexeme_id}/\">{normal_form}</a></td>\
<td>{score:.3}</td><td>{comment}</td>\
<td><a href=\"/words/{id}/edit/\">edit</a> <a href=\"/words/{id}/delete\">delete</a></td></tr>\n",
      word = escape(&w.word),
      lexeme_id = w.lexeme_id,
      normal_form = escape(&entry.normal_form),
      score = w.score,
      comment = comment_cell(w.comment.as_deref()),
      id = w.word_id,
    ));
  }

  let body = format!(
    "{add}
<table>
<tr><th>Word</th><th>Normal form</th><th>Score</th><th>Comment</th><th></th></tr>
{rows}</table>"
  );
  layout("Words", &body)
}

pub fn add_word_page(form: &AddWordForm, errors: &FieldErrors) -> String {
  let body = format!(
    "<form method=\"post\" action=\"/words/add\">
<label for=\"word\">Word</label>
<input id=\"word\" name=\"word\" value=\"{word}\">
{word_error}
<label for=\"comment\">Comment</label>
<textarea id=\"comment\" name=\"comment\" rows=\"4\">{comment}</textarea>
{comment_error}
<button type=\"submit\">Submit</button>
</form>",
    word = escape(&form.word),
    word_error = field_error(errors, "word"),
    comment = escape(&form.comment),
    comment_error = field_error(errors, "comment"),
  );
  layout("Add word", &body)
}

pub fn edit_word_page(word: &Word, comment: &str, errors: &FieldErrors) -> String {
  let body = format!(
    "<form method=\"post\" action=\"/words/{id}/edit/\">
<label for=\"comment\">Comment</label>
<textarea id=\"comment\" name=\"comment\" rows=\"4\">{comment}</textarea>
{error}
<button type=\"submit\">Submit</button>
</form>",
    id = word.word_id,
    comment = escape(comment),
    error = field_error(errors, "comment"),
  );
  layout(&word.word, &body)
}

pub fn delete_word_page(word: &Word) -> String {
  let body = format!(
    "<p>Delete the word <strong>{word}</strong>? Its lexeme is kept.</p>
<form method=\"post\" action=\"/words/{id}/delete\">
<button type=\"submit\">Delete</button>
<a href=\"/words/\">Cancel</a>
</form>",
    word = escape(&word.word),
    id = word.word_id,
  );
  layout("Delete word", &body)
}

// ─── Static pages ────────────────────────────────────────────────────────────

pub fn help_page() -> String {
  layout(
    "Help",
    "<p>Lexis keeps a dictionary of the words you feed it.</p>
<ul>
<li><a href=\"/analysis/\">Analysis</a>: paste any text. Punctuation
(<code>. , ? ! ' \" ; : -</code>) is removed, the rest is lowercased and split
on whitespace. Every new word is analysed and linked to its normal form.</li>
<li><a href=\"/words/\">Words</a>: every surface form seen so far, with the
analyser's confidence score and your comment.</li>
<li><a href=\"/lexemes/\">Lexemes</a>: normal forms and the words that share
them.</li>
<li><a href=\"/words/add\">Add word</a>: add a single word with a comment.</li>
</ul>
<p>Deleting a word keeps its lexeme. Words already in the dictionary are
never analysed twice.</p>",
  )
}

pub fn error_page(status: StatusCode, message: &str) -> String {
  let title = status.canonical_reason().unwrap_or("Error");
  layout(title, &format!("<p class=\"error\">{}</p>", escape(message)))
}
