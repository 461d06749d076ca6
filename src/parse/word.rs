//! Delimiter-bounded words

use super::{Parse, ParseResult};

/// Characters that separate words
pub const DELIMITERS: &[char] = &[' ', ',', '.', ';', ':', '='];

fn is_delimiter(c: char) -> bool {
    DELIMITERS.contains(&c)
}

/// Parses the next word, skipping any leading delimiters.
///
/// The terminating delimiter is left at the start of the remainder. An empty
/// word is a failure, so delimiter-only or empty input yields `None`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseWord;

impl Parse<String> for ParseWord {
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a, String> {
        let rest = input.trim_start_matches(is_delimiter);
        let end = rest.find(is_delimiter).unwrap_or(rest.len());
        if end == 0 {
            return None;
        }
        Some((rest[..end].to_string(), &rest[end..]))
    }
}

/// Iterator over every word in a span, applying [`ParseWord`] until it fails
#[derive(Debug, Clone)]
pub struct Words<'a> {
    rest: &'a str,
}

impl<'a> Words<'a> {
    pub fn new(input: &'a str) -> Self {
        Self { rest: input }
    }

    /// Input not yet consumed
    pub fn remainder(&self) -> &'a str {
        self.rest
    }
}

impl Iterator for Words<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        let (word, rest) = ParseWord.parse(self.rest)?;
        self.rest = rest;
        Some(word)
    }
}
