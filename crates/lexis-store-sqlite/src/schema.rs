//! SQL schema for the Lexis SQLite store.
//!
//! Executed once at connection startup. `PRAGMA user_version` records the
//! schema revision so later migrations can be gated on it.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

-- One row per normal form. Never deleted.
CREATE TABLE IF NOT EXISTS lexemes (
    lexeme_id   INTEGER PRIMARY KEY,
    normal_form TEXT NOT NULL UNIQUE,
    created_on  TEXT NOT NULL,   -- ISO 8601 UTC
    updated_on  TEXT NOT NULL
);

-- One row per surface form.
CREATE TABLE IF NOT EXISTS words (
    word_id    INTEGER PRIMARY KEY,
    word       TEXT NOT NULL UNIQUE,
    comment    TEXT,
    score      REAL NOT NULL,
    created_on TEXT NOT NULL,
    updated_on TEXT NOT NULL,
    lexeme_id  INTEGER NOT NULL REFERENCES lexemes(lexeme_id)
);

CREATE INDEX IF NOT EXISTS words_lexeme_idx ON words(lexeme_id);

PRAGMA user_version = 1;
";
