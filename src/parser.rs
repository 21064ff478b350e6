use thiserror::Error;
use tracing::trace;

use crate::{
    ast::{
        BinaryLogical, Collection, CompareOp, Expr, Identifier, Lambda, Linq, LogicalOp,
        MemberAccess, Token, TokenKind, UnaryOp, ValueKeyword,
    },
    methods::MethodRegistry,
};

/// A grammar rule's required token did not match.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected {expected}, found {found}{} at position {position}", quoted(.found_text))]
pub struct ParseError {
    /// Character offset of the offending token
    pub position: usize,
    /// What the grammar allowed here
    pub expected: String,
    pub found: TokenKind,
    pub found_text: Option<String>,
}

fn quoted(text: &Option<String>) -> String {
    text.as_deref().map(|t| format!(" '{t}'")).unwrap_or_default()
}

const VALUE_EXPECTED: &str = "value (number, string, true, false or null)";

pub struct Parser<'r> {
    tokens: Vec<Token>,
    index: usize,
    /// Returned once `tokens` runs out without its own `Eof`
    eof: Token,
    /// When set, method names must be registered here
    methods: Option<&'r MethodRegistry>,
}

impl<'r> Parser<'r> {
    /// Create a parser over a token stream. A missing trailing `Eof` is
    /// treated as if it were there.
    pub fn new(tokens: Vec<Token>) -> Self {
        let eof = Token::eof(tokens.last().map_or(0, |t| t.position));
        Parser {
            tokens,
            index: 0,
            eof,
            methods: None,
        }
    }

    /// Reject method names that `registry` does not know at parse time
    /// instead of leaving them to the evaluator.
    pub fn validate_methods(mut self, registry: &'r MethodRegistry) -> Self {
        self.methods = Some(registry);
        self
    }

    /// Parse a complete query. All tokens must be consumed.
    pub fn parse(&mut self) -> Result<Expr, ParseError> {
        let expr = self.parse_linq()?;
        self.expect(TokenKind::Eof, "end of input")?;
        trace!(kind = expr.kind_name(), "parsed query");
        Ok(expr)
    }

    fn current(&self) -> &Token {
        self.tokens.get(self.index).unwrap_or(&self.eof)
    }

    fn check(&self, kind: TokenKind) -> bool {
        self.current().kind == kind
    }

    fn check_operator(&self, op: &str) -> bool {
        self.current().is_operator(op)
    }

    fn advance(&mut self) -> Token {
        let token = self.current().clone();
        if self.index < self.tokens.len() {
            self.index += 1;
        }
        token
    }

    fn error(&self, expected: impl Into<String>) -> ParseError {
        let token = self.current();
        ParseError {
            position: token.position,
            expected: expected.into(),
            found: token.kind,
            found_text: token.text.clone(),
        }
    }

    fn expect(&mut self, kind: TokenKind, expected: &str) -> Result<Token, ParseError> {
        if self.check(kind) {
            Ok(self.advance())
        } else {
            Err(self.error(expected))
        }
    }

    fn expect_operator(&mut self, op: &str) -> Result<Token, ParseError> {
        if self.check_operator(op) {
            Ok(self.advance())
        } else {
            Err(self.error(format!("'{op}'")))
        }
    }

    fn parse_identifier(&mut self) -> Result<Identifier, ParseError> {
        let token = self.expect(TokenKind::Identifier, "identifier")?;
        Ok(Identifier::new(token.text()))
    }

    /// linq-expr ::= this-expr ( '.' method-name '(' lambda-expr ')' )*
    fn parse_linq(&mut self) -> Result<Expr, ParseError> {
        self.expect(TokenKind::This, "'this'")?;

        let mut collection = Collection::This;
        let mut calls = 0;

        while self.check(TokenKind::Dot) {
            self.advance(); // consume '.'
            let method = self.parse_method_name()?;
            self.expect(TokenKind::LParen, "'('")?;
            let lambda = self.parse_lambda()?;
            self.expect(TokenKind::RParen, "')'")?;

            collection = Collection::Linq(Box::new(Linq {
                collection,
                method,
                lambda,
            }));
            calls += 1;
        }

        trace!(calls, "parsed method chain");
        Ok(match collection {
            Collection::This => Expr::This,
            Collection::Linq(linq) => Expr::Linq(*linq),
        })
    }

    fn parse_method_name(&mut self) -> Result<Identifier, ParseError> {
        if let Some(registry) = self.methods {
            if self.check(TokenKind::Identifier) && !registry.contains(self.current().text()) {
                return Err(self.error(format!("method name ({})", registry.names().join(", "))));
            }
        }
        self.parse_identifier()
    }

    /// lambda-expr ::= identifier '=>' logical-or-expr
    fn parse_lambda(&mut self) -> Result<Lambda, ParseError> {
        let parameter = self.parse_identifier()?;
        self.expect_operator("=>")?;
        let body = self.parse_or()?;
        Ok(Lambda { parameter, body })
    }

    /// logical-or-expr ::= logical-and-expr ( '||' logical-and-expr )*
    fn parse_or(&mut self) -> Result<BinaryLogical, ParseError> {
        let mut left = self.parse_and()?;

        while self.check_operator("||") {
            self.advance();
            let right = self.parse_and()?;
            left = BinaryLogical::new(
                LogicalOp::Or,
                Expr::BinaryLogical(left),
                Expr::BinaryLogical(right),
            );
        }
        Ok(left)
    }

    /// logical-and-expr ::= comparison-expr ( '&&' comparison-expr )*
    ///
    /// A lone comparison comes back as `comparison && true`.
    fn parse_and(&mut self) -> Result<BinaryLogical, ParseError> {
        let first = self.parse_comparison()?;

        if !self.check_operator("&&") {
            return Ok(BinaryLogical::single(first));
        }

        self.advance();
        let mut node = BinaryLogical::new(LogicalOp::And, first, self.parse_comparison()?);
        while self.check_operator("&&") {
            self.advance();
            let right = self.parse_comparison()?;
            node = BinaryLogical::new(LogicalOp::And, Expr::BinaryLogical(node), right);
        }
        Ok(node)
    }

    /// comparison-expr ::= member-access [ cmp-op value-expr ]
    ///                   | value-expr [ cmp-op member-access ]
    ///                   | '(' logical-or-expr ')'
    ///                   | '!' member-access
    fn parse_comparison(&mut self) -> Result<Expr, ParseError> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Identifier => {
                let member = self.parse_member_access()?;
                match self.parse_compare_op() {
                    Some(op) => {
                        let value = self.parse_value()?;
                        Ok(Expr::BinaryCompare {
                            op,
                            left: Box::new(Expr::MemberAccess(member)),
                            right: Box::new(value),
                        })
                    }
                    None => Ok(Expr::MemberAccess(member)),
                }
            }
            TokenKind::Number | TokenKind::String | TokenKind::ValueKeyword | TokenKind::AddSub => {
                let value = self.parse_value()?;
                match self.parse_compare_op() {
                    Some(op) => {
                        let member = self.parse_member_access()?;
                        Ok(Expr::BinaryCompare {
                            op,
                            left: Box::new(value),
                            right: Box::new(Expr::MemberAccess(member)),
                        })
                    }
                    None => Ok(value),
                }
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_or()?;
                self.expect(TokenKind::RParen, "')'")?;
                Ok(Expr::BinaryLogical(inner))
            }
            TokenKind::Operator if self.check_operator("!") => {
                self.advance();
                let operand = self.parse_member_access()?;
                Ok(Expr::UnaryCompare {
                    op: UnaryOp::Not,
                    operand,
                })
            }
            _ => Err(self.error("comparison, member access, '(' or '!'")),
        }
    }

    fn parse_compare_op(&mut self) -> Option<CompareOp> {
        if !self.check(TokenKind::Operator) {
            return None;
        }
        let op = CompareOp::from_symbol(self.current().text())?;
        self.advance();
        Some(op)
    }

    /// member-access ::= identifier ( '.' identifier )*
    fn parse_member_access(&mut self) -> Result<MemberAccess, ParseError> {
        let identifier = self.parse_identifier()?;
        let tail = self.parse_member_tail()?;
        Ok(MemberAccess::new(identifier, tail))
    }

    fn parse_member_tail(&mut self) -> Result<Expr, ParseError> {
        if !self.check(TokenKind::Dot) {
            return Ok(Expr::Empty);
        }
        self.advance(); // consume '.'
        Ok(Expr::MemberAccess(self.parse_member_access()?))
    }

    /// value-expr ::= NUMBER | '-' NUMBER | STRING | 'true' | 'false' | 'null'
    fn parse_value(&mut self) -> Result<Expr, ParseError> {
        let kind = self.current().kind;
        match kind {
            TokenKind::Number => {
                let token = self.advance();
                self.number_literal(&token, token.text().to_string())
            }
            TokenKind::AddSub if self.current().text() == "-" => {
                self.advance();
                let digits = self.expect(TokenKind::Number, "number")?;
                self.number_literal(&digits, format!("-{}", digits.text()))
            }
            TokenKind::String => {
                let token = self.advance();
                Ok(Expr::String(token.text.unwrap_or_default()))
            }
            TokenKind::ValueKeyword => {
                let keyword = ValueKeyword::from_word(self.current().text());
                match keyword {
                    Some(keyword) => {
                        self.advance();
                        Ok(Expr::Keyword(keyword))
                    }
                    None => Err(self.error(VALUE_EXPECTED)),
                }
            }
            _ => Err(self.error(VALUE_EXPECTED)),
        }
    }

    fn number_literal(&self, token: &Token, literal: String) -> Result<Expr, ParseError> {
        literal.parse::<i64>().map(Expr::Number).map_err(|_| ParseError {
            position: token.position,
            expected: "number within the 64-bit integer range".to_string(),
            found: token.kind,
            found_text: Some(literal),
        })
    }
}
