//! # Query Language - Abstract Syntax Tree
//!
//! This module defines the tokens and the expression tree for json-linq, a
//! small LINQ-style language for filtering sequences of JSON records.
//!
//! ## Architecture Overview
//!
//! - **[tokens]** - Lexical tokens produced by the lexer
//! - **[expressions]** - Expression nodes (literals, member access, comparisons, lambdas)
//! - **[operators]** - Comparison, logical and unary operators
//!
//! ## Quick Start
//!
//! ```text
//! this.Where(x => x.temperatureC >= 10)
//! ```
//!
//! This query keeps every record whose `temperatureC` field is at least 10.
//!
//! ## Core Concepts
//!
//! ### Collections and Methods
//!
//! Every query starts with `this`, the record sequence supplied by the
//! caller, followed by any number of method calls. Each call takes the
//! previous call's output as its input:
//!
//! ```text
//! this.Where(x => x.active).Where(x => x.age >= 18)
//! ```
//!
//! ### Lambdas
//!
//! A method's argument is a single-parameter lambda. Field paths in the body
//! start with a name for the current record, then walk fields with `.`:
//!
//! ```text
//! x => x.address.city == "Oslo"
//! ```
//!
//! ### Conditions
//!
//! - **Comparison** - a field against a literal, in either order
//! - **Field test** - a bare field is true when its value is truthy
//! - **Negation** - `!x.field` negates a field test
//! - **Grouping** - `&&`, `||` and parentheses
//!
//! ### Tree Shape
//!
//! Lambda bodies are always [`BinaryLogical`] nodes. A single condition `c`
//! is stored as `c && true`, so the evaluator sees one shape for every body.
pub mod tokens;
pub mod expressions;
pub mod operators;

pub use tokens::{Token, TokenKind};
pub use expressions::{
    BinaryLogical, Collection, Expr, Identifier, Lambda, Linq, MemberAccess, ValueKeyword,
};
pub use operators::{CompareOp, LogicalOp, UnaryOp};
