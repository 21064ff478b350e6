use thiserror::Error;
use tracing::{debug, trace};

use crate::{
    ast::{BinaryLogical, Collection, CompareOp, Expr, Lambda, Linq, LogicalOp, MemberAccess, UnaryOp, ValueKeyword},
    methods::{MethodRegistry, Predicate, Stage},
    value::Value,
};

/// Evaluation context: the binding for `this`.
#[derive(Debug, Clone, Copy)]
pub struct EvalContext<'a> {
    /// The record sequence the query filters
    pub this: &'a [Value],
}

impl<'a> EvalContext<'a> {
    pub fn new(this: &'a [Value]) -> Self {
        EvalContext { this }
    }
}

/// Errors that can occur during query evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EvalError {
    /// Method name not present in the registry
    #[error("unknown method '{0}'")]
    UnknownMethod(String),

    /// Node kind that cannot appear where it was found
    #[error("unsupported expression: {0} cannot be evaluated here")]
    UnsupportedExpression(&'static str),

    /// Field path that does not start with the lambda parameter, reported
    /// only when parameter checking is enabled
    #[error("unbound identifier '{name}': lambda parameter is '{parameter}'")]
    UnboundIdentifier { name: String, parameter: String },
}

static NULL: Value = Value::Null;

/// One side of a comparison, ready to be read against a record.
#[derive(Debug, Clone, PartialEq)]
enum Operand {
    /// Field names after the lambda parameter
    Path(Vec<String>),
    Const(Value),
}

impl Operand {
    /// Read the operand for a record. Missing data resolves to `null`.
    fn resolve<'a>(&'a self, record: &'a Value) -> &'a Value {
        match self {
            Operand::Const(value) => value,
            Operand::Path(fields) => {
                let mut current = record;
                for field in fields {
                    match current.get(field) {
                        Some(next) => current = next,
                        None => return &NULL,
                    }
                }
                current
            }
        }
    }
}

fn compare(op: CompareOp, left: &Value, right: &Value) -> bool {
    use std::cmp::Ordering::*;

    match op {
        CompareOp::Equal => left.strict_eq(right),
        CompareOp::NotEqual => !left.strict_eq(right),
        CompareOp::LessThan => left.compare(right) == Some(Less),
        CompareOp::GreaterThan => left.compare(right) == Some(Greater),
        CompareOp::LessEqual => matches!(left.compare(right), Some(Less | Equal)),
        CompareOp::GreaterEqual => matches!(left.compare(right), Some(Greater | Equal)),
    }
}

fn keyword_value(keyword: ValueKeyword) -> Value {
    match keyword {
        ValueKeyword::True => Value::Boolean(true),
        ValueKeyword::False => Value::Boolean(false),
        ValueKeyword::Null => Value::Null,
    }
}

/// The query evaluator.
///
/// Compiles each method call's lambda into a [`Predicate`], asks the
/// [`MethodRegistry`] for the stage that applies it, and runs the stages of a
/// chain left to right.
#[derive(Debug, Default)]
pub struct Evaluator {
    methods: MethodRegistry,
    /// Require field paths to start with the lambda's parameter name
    check_parameters: bool,
}

impl Evaluator {
    /// Creates an evaluator with the built-in methods.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a custom set of methods.
    pub fn with_registry(mut self, methods: MethodRegistry) -> Self {
        self.methods = methods;
        self
    }

    /// Reject field paths whose first identifier is not the lambda parameter.
    ///
    /// Off by default: `this.Where(x => y.a == 1)` reads field `a` of the
    /// current record either way.
    pub fn with_parameter_check(mut self, enabled: bool) -> Self {
        self.check_parameters = enabled;
        self
    }

    pub fn methods(&self) -> &MethodRegistry {
        &self.methods
    }

    /// Evaluates a parsed query against the collection bound in `ctx`.
    ///
    /// # Examples
    ///
    /// ```
    /// use json_linq::{EvalContext, Evaluator, Value, lexer::scan, parser::Parser};
    ///
    /// let records = vec![Value::Integer(1), Value::Integer(0), Value::Integer(7)];
    /// let tokens = scan("this.Where(n => n)").unwrap();
    /// let query = Parser::new(tokens).parse().unwrap();
    ///
    /// let kept = Evaluator::new()
    ///     .evaluate(&query, &EvalContext::new(&records))
    ///     .unwrap();
    /// assert_eq!(kept, [Value::Integer(1), Value::Integer(7)]);
    /// ```
    pub fn evaluate(&self, expr: &Expr, ctx: &EvalContext<'_>) -> Result<Vec<Value>, EvalError> {
        match expr {
            Expr::This => Ok(ctx.this.to_vec()),
            Expr::Linq(linq) => self.eval_linq(linq, ctx),
            other => Err(EvalError::UnsupportedExpression(other.kind_name())),
        }
    }

    fn eval_linq(&self, linq: &Linq, ctx: &EvalContext<'_>) -> Result<Vec<Value>, EvalError> {
        let stage = self.compile_stage(linq)?;

        let input = match &linq.collection {
            Collection::This => ctx.this.to_vec(),
            Collection::Linq(inner) => self.eval_linq(inner, ctx)?,
        };

        let count = input.len();
        let output = stage(input);
        debug!(
            method = %linq.method.name,
            input = count,
            output = output.len(),
            "applied stage"
        );
        Ok(output)
    }

    fn compile_stage(&self, linq: &Linq) -> Result<Stage, EvalError> {
        let name = &linq.method.name;
        let builder = self
            .methods
            .get(name)
            .ok_or_else(|| EvalError::UnknownMethod(name.clone()))?;
        let predicate = self.compile_lambda(&linq.lambda)?;
        trace!(method = %name, "compiled stage");
        Ok(builder(predicate))
    }

    fn compile_lambda(&self, lambda: &Lambda) -> Result<Predicate, EvalError> {
        self.compile_logical(&lambda.body, &lambda.parameter.name)
    }

    fn compile_logical(&self, node: &BinaryLogical, param: &str) -> Result<Predicate, EvalError> {
        let left = self.compile_condition(&node.left, param)?;
        let right = self.compile_condition(&node.right, param)?;

        Ok(match node.op {
            LogicalOp::And => Box::new(move |record: &Value| left(record) && right(record)),
            LogicalOp::Or => Box::new(move |record: &Value| left(record) || right(record)),
        })
    }

    /// Compile an operand of `&&` / `||`.
    fn compile_condition(&self, expr: &Expr, param: &str) -> Result<Predicate, EvalError> {
        match expr {
            Expr::BinaryLogical(node) => self.compile_logical(node, param),
            Expr::BinaryCompare { op, left, right } => {
                let op = *op;
                let left = self.compile_operand(left, param)?;
                let right = self.compile_operand(right, param)?;
                Ok(Box::new(move |record: &Value| {
                    compare(op, left.resolve(record), right.resolve(record))
                }))
            }
            Expr::UnaryCompare {
                op: UnaryOp::Not,
                operand,
            } => {
                let operand = self.compile_path(operand, param)?;
                Ok(Box::new(move |record: &Value| !operand.resolve(record).is_truthy()))
            }
            Expr::MemberAccess(member) => {
                let operand = self.compile_path(member, param)?;
                Ok(Box::new(move |record: &Value| operand.resolve(record).is_truthy()))
            }
            Expr::Number(_) | Expr::String(_) | Expr::Keyword(_) => {
                let truth = self.compile_operand(expr, param)?.resolve(&NULL).is_truthy();
                Ok(Box::new(move |_: &Value| truth))
            }
            Expr::Empty | Expr::Identifier(_) | Expr::This | Expr::Lambda(_) | Expr::Linq(_) => {
                Err(EvalError::UnsupportedExpression(expr.kind_name()))
            }
        }
    }

    /// Compile one side of a comparison.
    fn compile_operand(&self, expr: &Expr, param: &str) -> Result<Operand, EvalError> {
        match expr {
            Expr::MemberAccess(member) => self.compile_path(member, param),
            Expr::Number(n) => Ok(Operand::Const(Value::Integer(*n))),
            Expr::String(s) => Ok(Operand::Const(Value::String(s.clone()))),
            Expr::Keyword(keyword) => Ok(Operand::Const(keyword_value(*keyword))),
            other => Err(EvalError::UnsupportedExpression(other.kind_name())),
        }
    }

    /// The first identifier names the record itself; the rest are fields.
    fn compile_path(&self, member: &MemberAccess, param: &str) -> Result<Operand, EvalError> {
        let path = member.path();
        if self.check_parameters && path[0] != param {
            return Err(EvalError::UnboundIdentifier {
                name: path[0].to_string(),
                parameter: param.to_string(),
            });
        }
        Ok(Operand::Path(
            path[1..].iter().map(|field| field.to_string()).collect(),
        ))
    }
}
