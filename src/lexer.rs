use std::sync::LazyLock;

use regex::Regex;
use thiserror::Error;
use tracing::trace;

use crate::ast::{Token, TokenKind};

/// A character that starts no valid token.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unexpected character '{character}' at position {position}")]
pub struct LexError {
    /// Character offset into the query
    pub position: usize,
    pub character: char,
}

struct Rule {
    /// `None` for input that is consumed without producing a token
    kind: Option<TokenKind>,
    pattern: Regex,
}

// First matching rule wins, so keywords precede identifiers and two-character
// operators precede their one-character prefixes.
static RULES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    [
        (None, r"^\s+"),
        (Some(TokenKind::Number), r"^[0-9]+"),
        (Some(TokenKind::String), r#"^"[^"]*""#),
        (Some(TokenKind::This), r"^this\b"),
        (Some(TokenKind::ValueKeyword), r"^(?:true|false|null)\b"),
        (Some(TokenKind::Identifier), r"^[A-Za-z_][A-Za-z0-9_]*"),
        (Some(TokenKind::Operator), r"^(?:=>|==|!=|<=|>=|&&|\|\||<|>|!|=)"),
        (Some(TokenKind::Punctuation), r"^[{},:\[\]]"),
        (Some(TokenKind::Dot), r"^\."),
        (Some(TokenKind::LParen), r"^\("),
        (Some(TokenKind::RParen), r"^\)"),
        (Some(TokenKind::MulDiv), r"^[*/]"),
        (Some(TokenKind::AddSub), r"^[+\-]"),
    ]
    .into_iter()
    .map(|(kind, pattern)| Rule {
        kind,
        pattern: Regex::new(pattern).expect("lexer rule must be a valid regex"),
    })
    .collect()
});

pub struct Lexer<'a> {
    input: &'a str,
    /// Byte offset of the unread input
    offset: usize,
    /// Character offset of the unread input
    position: usize,
}

impl<'a> Lexer<'a> {
    pub fn new(input: &'a str) -> Self {
        Lexer {
            input,
            offset: 0,
            position: 0,
        }
    }

    /// Scan the next token. Returns `Eof` at (and after) the end of input.
    pub fn next_token(&mut self) -> Result<Token, LexError> {
        loop {
            let rest = &self.input[self.offset..];
            let Some(first) = rest.chars().next() else {
                return Ok(Token::eof(self.position));
            };

            let (kind, lexeme) = RULES
                .iter()
                .find_map(|rule| rule.pattern.find(rest).map(|m| (rule.kind, m.as_str())))
                .ok_or(LexError {
                    position: self.position,
                    character: first,
                })?;

            let start = self.position;
            self.offset += lexeme.len();
            self.position += lexeme.chars().count();

            match kind {
                None => continue,
                Some(TokenKind::String) => {
                    // Quotes are single bytes
                    let content = &lexeme[1..lexeme.len() - 1];
                    return Ok(Token::new(TokenKind::String, content, start));
                }
                Some(kind) => return Ok(Token::new(kind, lexeme, start)),
            }
        }
    }

    /// Scan the whole input. The last token is always `Eof`.
    pub fn tokenize(mut self) -> Result<Vec<Token>, LexError> {
        let mut tokens = Vec::new();
        loop {
            let token = self.next_token()?;
            let done = token.kind == TokenKind::Eof;
            tokens.push(token);
            if done {
                return Ok(tokens);
            }
        }
    }
}

/// Scan a query into tokens.
pub fn scan(input: &str) -> Result<Vec<Token>, LexError> {
    let tokens = Lexer::new(input).tokenize()?;
    trace!(count = tokens.len(), "scanned query");
    Ok(tokens)
}
