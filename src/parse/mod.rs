//! Parser primitives
//!
//! A parser takes a text span and either yields a value plus the unconsumed
//! remainder, or nothing. [`ParseWord`] is the only primitive so far.

pub mod word;

pub use word::{ParseWord, Words, DELIMITERS};

/// A parsed value and the remainder of the input, or `None` on failure
pub type ParseResult<'a, P> = Option<(P, &'a str)>;

/// Something that can parse a `P` off the front of a text span
pub trait Parse<P> {
    /// Try to parse one `P` from `input`
    fn parse<'a>(&self, input: &'a str) -> ParseResult<'a, P>;
}

/// Apply `parser` to `input`
pub fn parse<'a, P, T>(parser: &T, input: &'a str) -> ParseResult<'a, P>
where
    T: Parse<P> + ?Sized,
{
    parser.parse(input)
}
