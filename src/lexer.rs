use std::fmt;

use lazy_static::lazy_static;
use log::trace;
use regex::Regex;

#[derive(Debug, PartialEq, Clone)]
pub enum Token {
    LeftBracket,
    RightBracket,
    Comma,
    /// raw text between two delimiters, whitespace kept as written
    Value(String),
}

impl Token {
    pub fn text(&self) -> Option<&str> {
        match self {
            Token::Value(text) => Some(text),
            _ => None,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Token::LeftBracket => write!(f, "("),
            Token::RightBracket => write!(f, ")"),
            Token::Comma => write!(f, ","),
            Token::Value(text) => write!(f, "{:?}", text),
        }
    }
}

lazy_static! {
    static ref DELIMITER_RE: Regex = Regex::new(r"[(),]").unwrap();
}

fn flush(pending: &str, res: &mut Vec<Token>) {
    if !pending.trim().is_empty() {
        res.push(Token::Value(pending.to_string()));
    }
}

/// lex the given input string into tokens, in source order
///
/// Never fails: anything that isn't a bracket or comma ends up inside a
/// `Value`, and blank runs between delimiters are skipped.
pub fn lex(input: &str) -> Vec<Token> {
    let mut res = Vec::new();
    let mut start = 0;
    for delimiter in DELIMITER_RE.find_iter(input) {
        flush(&input[start..delimiter.start()], &mut res);
        res.push(match delimiter.as_str() {
            "(" => Token::LeftBracket,
            ")" => Token::RightBracket,
            _ => Token::Comma,
        });
        start = delimiter.end();
    }
    flush(&input[start..], &mut res);
    trace!("lexed {:?} into {} tokens", input, res.len());
    res
}
