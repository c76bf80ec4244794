#![forbid(unsafe_code)]

//! Flat tokenizer for definition/config text.
//!
//! A token is one of:
//! - a `"quoted string"` (no escapes, quotes stripped)
//! - a single punctuation char from [`PUNCTUATION`]
//! - a run of bytes above space, stopping before punctuation
//!
//! `//` comments run to end of line. A NUL byte ends the input, same as the
//! real end of the text.

use crate::error::{ResourceError, ResourceResult};

/// Token buffer capacity including the terminator.
pub const MAX_TOKEN: usize = 1024;

pub const PUNCTUATION: &[u8] = b"{}()':";

#[inline]
fn is_punct(c: u8) -> bool {
    PUNCTUATION.contains(&c)
}

/// Clamp `s` to at most `MAX_TOKEN - 1` bytes without splitting a char.
fn bounded(s: &str) -> &str {
    let mut n = s.len().min(MAX_TOKEN - 1);
    while !s.is_char_boundary(n) {
        n -= 1;
    }
    &s[..n]
}

/// Cursor over a text buffer. Overlong tokens are truncated to
/// `MAX_TOKEN - 1` bytes; the rest of the token is still consumed.
#[derive(Debug, Clone)]
pub struct Lexer<'a> {
    text: &'a str,
    pos: usize,
    token: String,
    eof: bool,
}

impl<'a> Lexer<'a> {
    pub fn new(text: &'a str) -> Self {
        Self {
            text,
            pos: 0,
            token: String::new(),
            eof: false,
        }
    }

    /// The last token produced.
    pub fn token(&self) -> &str {
        &self.token
    }

    /// Set once the input ran out while looking for a token.
    pub fn eof(&self) -> bool {
        self.eof
    }

    /// Unconsumed input.
    pub fn rest(&self) -> &'a str {
        &self.text[self.pos..]
    }

    #[inline]
    fn peek(&self, at: usize) -> u8 {
        self.text.as_bytes().get(at).copied().unwrap_or(0)
    }

    fn set_token(&mut self, start: usize, end: usize) {
        self.token.clear();
        self.token.push_str(bounded(&self.text[start..end]));
    }

    pub fn next_token(&mut self) -> Option<&str> {
        self.token.clear();

        let mut c;
        loop {
            loop {
                c = self.peek(self.pos);
                if c > b' ' {
                    break;
                }
                if c == 0 {
                    self.eof = true;
                    return None;
                }
                self.pos += 1;
            }

            if c == b'/' && self.peek(self.pos + 1) == b'/' {
                while !matches!(self.peek(self.pos), 0 | b'\n') {
                    self.pos += 1;
                }
                continue;
            }
            break;
        }

        if c == b'"' {
            let start = self.pos + 1;
            let mut end = start;
            while !matches!(self.peek(end), 0 | b'"') {
                end += 1;
            }
            self.set_token(start, end);
            // unterminated: stop at end of input
            self.pos = if self.peek(end) == b'"' { end + 1 } else { end };
            return Some(self.token.as_str());
        }

        if is_punct(c) {
            self.set_token(self.pos, self.pos + 1);
            self.pos += 1;
            return Some(self.token.as_str());
        }

        let start = self.pos;
        let mut end = start + 1;
        loop {
            let c = self.peek(end);
            if is_punct(c) || c <= b' ' {
                break;
            }
            end += 1;
        }
        self.set_token(start, end);
        // the delimiting whitespace goes with the word, punctuation does not
        self.pos = if matches!(self.peek(end), 1..=b' ') {
            end + 1
        } else {
            end
        };
        Some(self.token.as_str())
    }
}

impl Iterator for Lexer<'_> {
    type Item = String;

    fn next(&mut self) -> Option<String> {
        self.next_token().map(str::to_owned)
    }
}

/// One-shot form of [`Lexer::next_token`]: the token and the remaining text,
/// or `None` at end of input.
pub fn parse_token(text: &str) -> Option<(String, &str)> {
    let mut lexer = Lexer::new(text);
    let token = lexer.next_token()?.to_owned();
    Some((token, lexer.rest()))
}

fn parse_hex(hex: &str, whole: &str) -> ResourceResult<i32> {
    let mut num: i32 = 0;
    for c in hex.chars() {
        let digit = c
            .to_digit(16)
            .ok_or_else(|| ResourceError::BadNumber(whole.to_string()))?;
        num = num.wrapping_shl(4).wrapping_add(digit as i32);
    }
    Ok(num)
}

fn atol(s: &str) -> i32 {
    let s = s.trim_start();
    let (neg, digits) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let mut num: i32 = 0;
    for c in digits.bytes().take_while(u8::is_ascii_digit) {
        num = num.wrapping_mul(10).wrapping_add(i32::from(c - b'0'));
    }
    if neg {
        num.wrapping_neg()
    } else {
        num
    }
}

/// `$1f` and `0x1f` are hex, anything else is read like C `atol`.
pub fn parse_num(s: &str) -> ResourceResult<i32> {
    if let Some(hex) = s.strip_prefix('$') {
        return parse_hex(hex, s);
    }
    if let Some(hex) = s.strip_prefix("0x") {
        return parse_hex(hex, s);
    }
    Ok(atol(s))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(text: &str) -> Vec<String> {
        Lexer::new(text).collect()
    }

    #[test]
    fn words_quotes_and_comments() {
        let mut lx = Lexer::new("foo \"bar baz\" // comment\nqux");
        assert_eq!(lx.next_token(), Some("foo"));
        assert_eq!(lx.next_token(), Some("bar baz"));
        assert_eq!(lx.next_token(), Some("qux"));
        assert!(!lx.eof());
        assert_eq!(lx.next_token(), None);
        assert!(lx.eof());
    }

    #[test]
    fn whitespace_only_is_eof() {
        let mut lx = Lexer::new(" \t\r\n  ");
        assert_eq!(lx.next_token(), None);
        assert!(lx.eof());
        assert_eq!(parse_token("   \n"), None);
        assert_eq!(parse_token(""), None);
    }

    #[test]
    fn punctuation_splits_words() {
        assert_eq!(tokens("foo:bar"), ["foo", ":", "bar"]);
        assert_eq!(tokens("{a(b)'c'}"), ["{", "a", "(", "b", ")", "'", "c", "'", "}"]);
    }

    #[test]
    fn cursor_placement() {
        let (tok, rest) = parse_token("foo:bar").unwrap();
        assert_eq!((tok.as_str(), rest), ("foo", ":bar"));
        let (tok, rest) = parse_token("foo bar").unwrap();
        assert_eq!((tok.as_str(), rest), ("foo", "bar"));
        let (tok, rest) = parse_token("\"a b\"c").unwrap();
        assert_eq!((tok.as_str(), rest), ("a b", "c"));
        let (tok, rest) = parse_token(":x").unwrap();
        assert_eq!((tok.as_str(), rest), (":", "x"));
    }

    #[test]
    fn comment_only_at_token_start() {
        assert_eq!(tokens("a//b c"), ["a//b", "c"]);
        assert_eq!(tokens("// only a comment"), Vec::<String>::new());
        assert_eq!(tokens("/ x"), ["/", "x"]);
    }

    #[test]
    fn unterminated_quote_runs_to_end() {
        let mut lx = Lexer::new("\"open ended");
        assert_eq!(lx.next_token(), Some("open ended"));
        assert_eq!(lx.rest(), "");
        assert_eq!(lx.next_token(), None);
    }

    #[test]
    fn nul_ends_input() {
        assert_eq!(tokens("a b\0c d"), ["a", "b"]);
    }

    #[test]
    fn overlong_tokens_truncate() {
        let long = "x".repeat(MAX_TOKEN * 2);
        let text = format!("{long} next");
        let toks = tokens(&text);
        assert_eq!(toks.len(), 2);
        assert_eq!(toks[0].len(), MAX_TOKEN - 1);
        assert_eq!(toks[1], "next");

        let quoted = format!("\"{}\"", "é".repeat(MAX_TOKEN));
        let toks = tokens(&quoted);
        assert!(toks[0].len() <= MAX_TOKEN - 1);
        assert!(toks[0].chars().all(|c| c == 'é'));
    }

    #[test]
    fn empty_quotes_give_empty_token() {
        assert_eq!(tokens("\"\" a"), ["", "a"]);
    }

    #[test]
    fn numbers() {
        assert_eq!(parse_num("42").unwrap(), 42);
        assert_eq!(parse_num("-17").unwrap(), -17);
        assert_eq!(parse_num("0x1F").unwrap(), 31);
        assert_eq!(parse_num("$ff").unwrap(), 255);
        assert_eq!(parse_num("12abc").unwrap(), 12);
        assert_eq!(parse_num("abc").unwrap(), 0);
        assert!(matches!(parse_num("0xzz"), Err(ResourceError::BadNumber(_))));
    }
}
