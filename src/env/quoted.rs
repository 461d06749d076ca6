//! Quoted-string fields
//!
//! A field is written as `"` + text + `"`, where every `"` and `\` inside the
//! text is preceded by a `\`. When reading, a `\` makes the next character
//! literal whatever it is. No other escapes exist, so a line break inside a
//! field cannot be represented on a single line.

const QUOTE: char = '"';
const ESCAPE: char = '\\';

/// Quote and escape `text`
pub fn quote(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 2);
    out.push(QUOTE);
    for c in text.chars() {
        if c == QUOTE || c == ESCAPE {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out.push(QUOTE);
    out
}

/// Read one quoted field off the front of `input`.
///
/// Returns the unescaped text and whatever follows the closing quote.
pub fn unquote(input: &str) -> Result<(String, &str), &'static str> {
    let mut chars = input.char_indices();
    match chars.next() {
        Some((_, QUOTE)) => {}
        Some(_) => return Err("field does not start with a quote"),
        None => return Err("missing field"),
    }

    let mut text = String::new();
    while let Some((i, c)) = chars.next() {
        match c {
            QUOTE => return Ok((text, &input[i + c.len_utf8()..])),
            ESCAPE => match chars.next() {
                Some((_, escaped)) => text.push(escaped),
                None => return Err("dangling escape"),
            },
            _ => text.push(c),
        }
    }
    Err("unterminated quote")
}
