//! Splitting submitted text into candidate surface forms.

use std::collections::BTreeSet;

/// Characters deleted from the text before splitting.
///
/// They are removed, not replaced with a space, so `hello-world` becomes the
/// single token `helloworld`.
pub const STRIPPED_PUNCTUATION: [char; 9] =
  ['.', ',', '?', '!', '\'', '"', ';', ':', '-'];

/// Return the set of unique lowercase tokens in `text`.
///
/// Tokens are not filtered for length or content.
pub fn tokenize(text: &str) -> BTreeSet<String> {
  let stripped: String = text
    .chars()
    .filter(|c| !STRIPPED_PUNCTUATION.contains(c))
    .collect();

  stripped
    .to_lowercase()
    .split_whitespace()
    .map(str::to_owned)
    .collect()
}
