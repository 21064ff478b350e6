use std::fmt;

/// Lexical class of a token.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    /// Unsigned integer digits
    ///
    /// # Examples
    /// ```text
    /// 42
    /// 007
    /// ```
    Number,

    /// Double-quoted string, no escape processing
    ///
    /// # Examples
    /// ```text
    /// "hello"
    /// "C:\temp"
    /// ```
    String,

    /// Field name, lambda parameter or method name
    ///
    /// Must start with an ASCII letter or underscore, followed by letters,
    /// digits, or underscores.
    Identifier,

    /// The reserved word `this`, bound to the input collection
    This,

    /// `true`, `false` or `null`
    ValueKeyword,

    /// Member access separator `.`
    Dot,

    /// Comparison, logical, lambda arrow and negation operators
    ///
    /// ```text
    /// => == != <= >= && || < > ! =
    /// ```
    Operator,

    /// `{ } , : [ ]`, scanned but not used by the grammar
    Punctuation,

    LParen,
    RParen,

    /// `*` or `/`
    MulDiv,

    /// `+` or `-`
    AddSub,

    /// End of input
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TokenKind::Number => "number",
            TokenKind::String => "string",
            TokenKind::Identifier => "identifier",
            TokenKind::This => "'this'",
            TokenKind::ValueKeyword => "keyword",
            TokenKind::Dot => "'.'",
            TokenKind::Operator => "operator",
            TokenKind::Punctuation => "punctuation",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::MulDiv => "'*' or '/'",
            TokenKind::AddSub => "'+' or '-'",
            TokenKind::Eof => "end of input",
        };
        f.write_str(name)
    }
}

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    /// The matched lexeme. For strings, the content between the quotes.
    /// `None` only for [`TokenKind::Eof`].
    pub text: Option<String>,
    /// Character offset of the first character in the query.
    pub position: usize,
}

impl Token {
    pub fn new(kind: TokenKind, text: impl Into<String>, position: usize) -> Self {
        Token {
            kind,
            text: Some(text.into()),
            position,
        }
    }

    pub fn eof(position: usize) -> Self {
        Token {
            kind: TokenKind::Eof,
            text: None,
            position,
        }
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// True if this is an operator token with exactly the given text.
    pub fn is_operator(&self, op: &str) -> bool {
        self.kind == TokenKind::Operator && self.text() == op
    }
}
