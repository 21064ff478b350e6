//! Execute queries against JSON input

use tracing::debug;

use super::CliError;
use crate::{
    EvalContext, Evaluator, Expr, MethodRegistry, Parser, Value, lexer, parse_records,
    to_json, to_json_pretty,
};

/// Options for the check command
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    /// The query to execute
    pub query: String,
    /// JSON array of records
    pub input: Option<String>,
    /// Print single-line JSON instead of pretty output
    pub compact: bool,
    /// Only validate syntax, don't execute
    pub syntax_only: bool,
    /// Return the parsed tree instead of executing
    pub show_ast: bool,
}

/// Result of a check operation
#[derive(Debug)]
pub enum CheckResult {
    /// Syntax validation passed
    SyntaxValid,
    /// The parsed query
    Ast(Expr),
    /// Query executed successfully; serialized kept records
    Success(String),
}

/// Execute a check operation
pub fn execute_check(options: &CheckOptions) -> Result<CheckResult, CliError> {
    let tokens = lexer::scan(&options.query)?;

    if options.syntax_only {
        // Unknown method names are syntax errors here
        let registry = MethodRegistry::new();
        Parser::new(tokens).validate_methods(&registry).parse()?;
        return Ok(CheckResult::SyntaxValid);
    }

    let expr = Parser::new(tokens).parse()?;
    if options.show_ast {
        return Ok(CheckResult::Ast(expr));
    }

    let json = options.input.as_deref().ok_or(CliError::NoInput)?;
    let records = parse_records(json)?;
    debug!(records = records.len(), "loaded input");

    let kept = Evaluator::new().evaluate(&expr, &EvalContext::new(&records))?;
    let output = Value::Array(kept);

    let text = if options.compact {
        to_json(&output)
    } else {
        to_json_pretty(&output)
    };
    Ok(CheckResult::Success(text))
}
