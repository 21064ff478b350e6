//! # json-linq
//!
//! Filter sequences of JSON records with LINQ-style queries:
//!
//! ```
//! let records = r#"[
//!     {"city": "Oslo", "temperatureC": 5},
//!     {"city": "Rome", "temperatureC": 21}
//! ]"#;
//!
//! let out = json_linq::process_json("this.Where(x => x.temperatureC >= 10)", records).unwrap();
//! assert_eq!(out, "[\n  {\n    \"city\": \"Rome\",\n    \"temperatureC\": 21\n  }\n]");
//! ```
//!
//! A query goes through three stages: [`lexer`] turns the text into tokens,
//! [`parser`] builds an [`Expr`] tree, and [`evaluator`] compiles the tree
//! into predicates and applies them to the records bound to `this`.

pub mod ast;
#[cfg(feature = "cli")]
pub mod cli;
pub mod convert;
pub mod evaluator;
pub mod lexer;
pub mod methods;
pub mod output;
pub mod parser;
pub mod value;

pub use ast::{Expr, Token, TokenKind};
pub use evaluator::{EvalContext, EvalError, Evaluator};
pub use lexer::{LexError, Lexer};
pub use methods::MethodRegistry;
pub use output::{to_json, to_json_pretty};
pub use parser::{ParseError, Parser};
pub use value::Value;

use thiserror::Error;
use tracing::debug;

/// Any failure of the query pipeline. No filtering happened when one of
/// these is returned.
#[derive(Debug, Error)]
pub enum Error {
    #[error("lex error: {0}")]
    Lex(#[from] LexError),

    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    #[error("evaluation error: {0}")]
    Eval(#[from] EvalError),

    /// Record input that is not valid JSON
    #[error("invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Record input whose top level is not an array
    #[error("records must be a JSON array, got {0}")]
    NotACollection(&'static str),
}

/// Scan and parse a query without evaluating it.
pub fn parse(query: &str) -> Result<Expr, Error> {
    let tokens = lexer::scan(query)?;
    Ok(Parser::new(tokens).parse()?)
}

/// Run a query and return the kept records.
pub fn filter(query: &str, records: &[Value]) -> Result<Vec<Value>, Error> {
    let expr = parse(query)?;
    let kept = Evaluator::new().evaluate(&expr, &EvalContext::new(records))?;
    debug!(query, records = records.len(), kept = kept.len(), "filtered records");
    Ok(kept)
}

/// Run a query and serialize the kept records as pretty-printed JSON.
pub fn process(query: &str, records: &[Value]) -> Result<String, Error> {
    let kept = filter(query, records)?;
    Ok(to_json_pretty(&Value::Array(kept)))
}

/// Like [`process`], with the records given as JSON text.
pub fn process_json(query: &str, records: &str) -> Result<String, Error> {
    let records = parse_records(records)?;
    process(query, &records)
}

/// Parse JSON text into a record sequence. The top level must be an array.
pub fn parse_records(json: &str) -> Result<Vec<Value>, Error> {
    let parsed: serde_json::Value = serde_json::from_str(json)?;
    match Value::from(parsed) {
        Value::Array(records) => Ok(records),
        other => Err(Error::NotACollection(other.type_name())),
    }
}
