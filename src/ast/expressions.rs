use crate::ast::{CompareOp, LogicalOp, UnaryOp};

/// Abstract Syntax Tree node representing a parsed expression.
///
/// The tree is built once by the parser and consumed once by the evaluator.
/// Nodes that the grammar constrains to a single shape (lambda bodies,
/// collections, member chains) are separate structs so the constraint is
/// carried by the type.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Marks the end of a member chain while parsing
    Empty,

    // Literals
    /// Integer literal
    ///
    /// # Example
    /// ```text
    /// 42
    /// -7
    /// ```
    Number(i64),

    /// String literal
    ///
    /// # Example
    /// ```text
    /// "hello"
    /// ```
    String(String),

    /// `true`, `false` or `null`
    Keyword(ValueKeyword),

    // References
    /// Bare identifier
    Identifier(Identifier),

    /// The input collection (`this`)
    This,

    /// Dotted field path
    ///
    /// # Examples
    /// ```text
    /// x.temperatureC
    /// x.address.city
    /// ```
    MemberAccess(MemberAccess),

    // Operations
    /// Negated field test
    ///
    /// # Example
    /// ```text
    /// !x.archived
    /// ```
    UnaryCompare { op: UnaryOp, operand: MemberAccess },

    /// Comparison between a field and a literal, in either order
    ///
    /// # Examples
    /// ```text
    /// x.age >= 18
    /// "admin" == x.role
    /// ```
    BinaryCompare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// `&&` / `||` combination
    BinaryLogical(BinaryLogical),

    /// Single-parameter lambda
    ///
    /// # Example
    /// ```text
    /// x => x.active
    /// ```
    Lambda(Lambda),

    /// Method call on a collection
    ///
    /// # Examples
    /// ```text
    /// this.Where(x => x.a > 1)
    /// this.Where(x => x.a > 1).Where(y => y.b)
    /// ```
    Linq(Linq),
}

impl Expr {
    /// Name of the node kind, for error messages.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Expr::Empty => "empty expression",
            Expr::Number(_) => "number literal",
            Expr::String(_) => "string literal",
            Expr::Keyword(_) => "keyword",
            Expr::Identifier(_) => "identifier",
            Expr::This => "'this'",
            Expr::MemberAccess(_) => "member access",
            Expr::UnaryCompare { .. } => "unary comparison",
            Expr::BinaryCompare { .. } => "comparison",
            Expr::BinaryLogical(_) => "logical expression",
            Expr::Lambda(_) => "lambda",
            Expr::Linq(_) => "method call",
        }
    }

    /// The `true` literal used to pad single-term logical expressions.
    pub fn truth() -> Expr {
        Expr::Keyword(ValueKeyword::True)
    }
}

/// Value keywords
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKeyword {
    True,
    False,
    Null,
}

impl ValueKeyword {
    pub fn from_word(word: &str) -> Option<Self> {
        match word {
            "true" => Some(ValueKeyword::True),
            "false" => Some(ValueKeyword::False),
            "null" => Some(ValueKeyword::Null),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identifier {
    pub name: String,
}

impl Identifier {
    pub fn new(name: impl Into<String>) -> Self {
        Identifier { name: name.into() }
    }
}

/// A right-leaning chain of identifiers: `x.a.b` is
/// `x -> (a -> (b -> None))`.
#[derive(Debug, Clone, PartialEq)]
pub struct MemberAccess {
    pub identifier: Identifier,
    pub tail: Option<Box<MemberAccess>>,
}

impl MemberAccess {
    /// Build a chain link. `Expr::Empty` and `Expr::MemberAccess` are the
    /// only tails the parser produces; `Empty` (or anything else) ends the
    /// chain.
    pub fn new(identifier: Identifier, tail: Expr) -> Self {
        let tail = match tail {
            Expr::MemberAccess(next) => Some(Box::new(next)),
            _ => None,
        };
        MemberAccess { identifier, tail }
    }

    /// The identifiers of the chain, in order.
    pub fn path(&self) -> Vec<&str> {
        let mut names = vec![self.identifier.name.as_str()];
        let mut link = self.tail.as_deref();
        while let Some(next) = link {
            names.push(next.identifier.name.as_str());
            link = next.tail.as_deref();
        }
        names
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryLogical {
    pub op: LogicalOp,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
}

impl BinaryLogical {
    pub fn new(op: LogicalOp, left: Expr, right: Expr) -> Self {
        BinaryLogical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// `term && true`
    pub fn single(term: Expr) -> Self {
        BinaryLogical::new(LogicalOp::And, term, Expr::truth())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Lambda {
    pub parameter: Identifier,
    pub body: BinaryLogical,
}

/// Source collection of a method call.
#[derive(Debug, Clone, PartialEq)]
pub enum Collection {
    This,
    Linq(Box<Linq>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Linq {
    pub collection: Collection,
    pub method: Identifier,
    pub lambda: Lambda,
}
