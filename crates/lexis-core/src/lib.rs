//! Core types and trait definitions for the Lexis word store.
//!
//! This crate is deliberately free of HTTP and database dependencies.
//! All other crates depend on it; it depends on nothing proprietary.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod analyzer;
pub mod error;
pub mod ingest;
pub mod lexeme;
pub mod paradigm;
pub mod store;
pub mod tokenize;
pub mod word;

pub use error::{Error, Result};
