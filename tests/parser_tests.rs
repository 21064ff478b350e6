// tests/parser_tests.rs

use json_linq::ast::*;
use json_linq::lexer::scan;
use json_linq::methods::{Predicate, Stage};
use json_linq::{MethodRegistry, ParseError, Parser, Value};
use rstest::rstest;

fn parse(query: &str) -> Result<Expr, ParseError> {
    Parser::new(scan(query).expect("query should scan")).parse()
}

/// Parse `this.Where(<param> => <body>)` and return the lambda.
fn parse_lambda(query: &str) -> Lambda {
    match parse(query).unwrap() {
        Expr::Linq(Linq {
            collection: Collection::This,
            lambda,
            ..
        }) => lambda,
        other => panic!("expected a single method call, got {:?}", other),
    }
}

fn member(path: &[&str]) -> MemberAccess {
    let (last, init) = path.split_last().expect("path must not be empty");
    init.iter().rev().fold(
        MemberAccess::new(Identifier::new(*last), Expr::Empty),
        |tail, name| MemberAccess::new(Identifier::new(*name), Expr::MemberAccess(tail)),
    )
}

fn field(path: &[&str]) -> Expr {
    Expr::MemberAccess(member(path))
}

fn cmp(op: CompareOp, left: Expr, right: Expr) -> Expr {
    Expr::BinaryCompare {
        op,
        left: Box::new(left),
        right: Box::new(right),
    }
}

fn and(left: Expr, right: Expr) -> Expr {
    Expr::BinaryLogical(BinaryLogical::new(LogicalOp::And, left, right))
}

fn or(left: Expr, right: Expr) -> Expr {
    Expr::BinaryLogical(BinaryLogical::new(LogicalOp::Or, left, right))
}

fn reject(predicate: Predicate) -> Stage {
    Box::new(move |records: Vec<Value>| records.into_iter().filter(|r| !predicate(r)).collect())
}

fn body(query: &str) -> Expr {
    Expr::BinaryLogical(parse_lambda(query).body)
}

// ============================================================================
// Query Shape
// ============================================================================

#[test]
fn test_parse_bare_this() {
    assert_eq!(parse("this").unwrap(), Expr::This);
}

#[test]
fn test_parse_where() {
    let expr = parse("this.Where(x => x.temperatureC >= 10)").unwrap();
    let expected = Expr::Linq(Linq {
        collection: Collection::This,
        method: Identifier::new("Where"),
        lambda: Lambda {
            parameter: Identifier::new("x"),
            body: BinaryLogical::single(cmp(
                CompareOp::GreaterEqual,
                field(&["x", "temperatureC"]),
                Expr::Number(10),
            )),
        },
    });
    assert_eq!(expr, expected);
}

#[test]
fn test_parse_chain_nests_leftmost_innermost() {
    let Expr::Linq(outer) = parse("this.Where(x => x.a).Where(y => y.b)").unwrap() else {
        panic!("expected method call");
    };
    assert_eq!(outer.lambda.parameter, Identifier::new("y"));

    let Collection::Linq(inner) = &outer.collection else {
        panic!("expected chained call");
    };
    assert_eq!(inner.lambda.parameter, Identifier::new("x"));
    assert_eq!(inner.collection, Collection::This);
}

#[test]
fn test_parse_three_calls() {
    let Expr::Linq(outer) = parse("this.Where(a => a.x).Where(b => b.y).Where(c => c.z)").unwrap()
    else {
        panic!("expected method call");
    };
    let mut params = vec![outer.lambda.parameter.name.as_str()];
    let mut collection = &outer.collection;
    while let Collection::Linq(inner) = collection {
        params.push(inner.lambda.parameter.name.as_str());
        collection = &inner.collection;
    }
    assert_eq!(params, ["c", "b", "a"]);
}

#[test]
fn test_method_name_is_kept_verbatim() {
    let Expr::Linq(linq) = parse("this.Sum(x => x.a)").unwrap() else {
        panic!("expected method call");
    };
    assert_eq!(linq.method, Identifier::new("Sum"));
}

// ============================================================================
// Lambda Bodies
// ============================================================================

#[test]
fn test_single_term_is_and_true() {
    assert_eq!(
        body("this.Where(x => x.active)"),
        and(field(&["x", "active"]), Expr::truth())
    );
}

#[test]
fn test_and_chain_is_left_nested() {
    assert_eq!(
        body("this.Where(x => x.a && x.b && x.c)"),
        and(
            and(field(&["x", "a"]), field(&["x", "b"])),
            field(&["x", "c"])
        )
    );
}

#[test]
fn test_or_of_single_terms() {
    assert_eq!(
        body("this.Where(x => x.a == 1 || x.b == 2)"),
        or(
            and(
                cmp(CompareOp::Equal, field(&["x", "a"]), Expr::Number(1)),
                Expr::truth()
            ),
            and(
                cmp(CompareOp::Equal, field(&["x", "b"]), Expr::Number(2)),
                Expr::truth()
            ),
        )
    );
}

#[test]
fn test_and_binds_tighter_than_or() {
    assert_eq!(
        body("this.Where(x => x.a || x.b && x.c)"),
        or(
            and(field(&["x", "a"]), Expr::truth()),
            and(field(&["x", "b"]), field(&["x", "c"])),
        )
    );
}

#[test]
fn test_parentheses_group() {
    assert_eq!(
        body("this.Where(x => (x.a || x.b) && x.c)"),
        and(
            or(
                and(field(&["x", "a"]), Expr::truth()),
                and(field(&["x", "b"]), Expr::truth()),
            ),
            field(&["x", "c"])
        )
    );
}

#[test]
fn test_negated_member() {
    assert_eq!(
        body("this.Where(x => !x.archived)"),
        and(
            Expr::UnaryCompare {
                op: UnaryOp::Not,
                operand: member(&["x", "archived"]),
            },
            Expr::truth()
        )
    );
}

#[test]
fn test_bare_parameter_is_member_of_length_one() {
    assert_eq!(
        body("this.Where(x => x)"),
        and(field(&["x"]), Expr::truth())
    );
}

#[test]
fn test_deep_member_chain() {
    let path = member(&["x", "a", "b", "c"]);
    assert_eq!(path.path(), ["x", "a", "b", "c"]);
    assert_eq!(
        body("this.Where(x => x.a.b.c)"),
        and(Expr::MemberAccess(path), Expr::truth())
    );
}

// ============================================================================
// Comparisons and Literals
// ============================================================================

#[rstest]
#[case("==", CompareOp::Equal)]
#[case("!=", CompareOp::NotEqual)]
#[case("<", CompareOp::LessThan)]
#[case(">", CompareOp::GreaterThan)]
#[case("<=", CompareOp::LessEqual)]
#[case(">=", CompareOp::GreaterEqual)]
fn test_comparison_operators(#[case] symbol: &str, #[case] op: CompareOp) {
    let query = format!("this.Where(x => x.n {} 3)", symbol);
    assert_eq!(
        body(&query),
        and(cmp(op, field(&["x", "n"]), Expr::Number(3)), Expr::truth())
    );
}

#[rstest]
#[case::number("42", Expr::Number(42))]
#[case::negative("-7", Expr::Number(-7))]
#[case::string("\"Rome\"", Expr::String("Rome".into()))]
#[case::empty_string("\"\"", Expr::String(String::new()))]
#[case::true_kw("true", Expr::Keyword(ValueKeyword::True))]
#[case::false_kw("false", Expr::Keyword(ValueKeyword::False))]
#[case::null_kw("null", Expr::Keyword(ValueKeyword::Null))]
fn test_literal_values(#[case] literal: &str, #[case] expected: Expr) {
    let query = format!("this.Where(x => x.v == {})", literal);
    assert_eq!(
        body(&query),
        and(
            cmp(CompareOp::Equal, field(&["x", "v"]), expected),
            Expr::truth()
        )
    );
}

#[test]
fn test_literal_on_left() {
    assert_eq!(
        body("this.Where(x => 10 < x.count)"),
        and(
            cmp(CompareOp::LessThan, Expr::Number(10), field(&["x", "count"])),
            Expr::truth()
        )
    );
}

#[test]
fn test_bare_literal_term() {
    assert_eq!(
        body("this.Where(x => true)"),
        and(Expr::Keyword(ValueKeyword::True), Expr::truth())
    );
}

#[test]
fn test_i64_bounds() {
    assert_eq!(
        body("this.Where(x => x.n == -9223372036854775808)"),
        and(
            cmp(CompareOp::Equal, field(&["x", "n"]), Expr::Number(i64::MIN)),
            Expr::truth()
        )
    );
    assert!(parse("this.Where(x => x.n == 9223372036854775808)").is_err());
}

// ============================================================================
// Errors
// ============================================================================

#[test]
fn test_missing_value_after_operator() {
    let err = parse("this.Where(x => x.a >)").unwrap_err();
    assert_eq!(err.found, TokenKind::RParen);
    assert_eq!(err.position, 21);
    assert!(err.expected.starts_with("value"), "{}", err.expected);
}

#[rstest]
#[case::empty("", 0, TokenKind::Eof)]
#[case::not_this("that.Where(x => x.a)", 0, TokenKind::Identifier)]
#[case::trailing_dot("this.", 5, TokenKind::Eof)]
#[case::missing_paren("this.Where x => x.a", 11, TokenKind::Identifier)]
#[case::missing_arrow("this.Where(x x.a)", 13, TokenKind::Identifier)]
#[case::single_equals("this.Where(x = x.a)", 13, TokenKind::Operator)]
#[case::unclosed_call("this.Where(x => x.a", 19, TokenKind::Eof)]
#[case::empty_body("this.Where(x => )", 16, TokenKind::RParen)]
#[case::trailing_tokens("this.Where(x => x.a) x", 21, TokenKind::Identifier)]
#[case::member_after_dot("this.Where(x => x.)", 18, TokenKind::RParen)]
#[case::negated_group("this.Where(x => !(x.a))", 17, TokenKind::LParen)]
#[case::compare_after_group("this.Where(x => (x.a) > 1)", 22, TokenKind::Operator)]
#[case::literal_vs_literal("this.Where(x => 1 == 2)", 21, TokenKind::Number)]
#[case::field_vs_field("this.Where(x => x.a == x.b)", 23, TokenKind::Identifier)]
#[case::arithmetic("this.Where(x => x.a + 1 > 2)", 20, TokenKind::AddSub)]
#[case::decimal("this.Where(x => x.a > 1.5)", 23, TokenKind::Dot)]
#[case::punctuation("this.Where(x => x.a == [1])", 23, TokenKind::Punctuation)]
#[case::double_negation("this.Where(x => !!x.a)", 17, TokenKind::Operator)]
#[case::dangling_and("this.Where(x => x.a &&)", 22, TokenKind::RParen)]
fn test_parse_errors(#[case] query: &str, #[case] position: usize, #[case] found: TokenKind) {
    let err = parse(query).unwrap_err();
    assert_eq!(
        (err.position, err.found),
        (position, found),
        "unexpected error for {query:?}: {err}"
    );
}

#[test]
fn test_error_message_names_expected_and_found() {
    let err = parse("this.Where(x => x.a").unwrap_err();
    assert_eq!(err.to_string(), "expected ')', found end of input at position 19");

    let err = parse("this.Where(x => x.a == 1").unwrap_err();
    assert_eq!(err.to_string(), "expected ')', found end of input at position 24");
}

#[test]
fn test_out_of_range_number_reports_literal() {
    let err = parse("this.Where(x => x.n < -9223372036854775809)").unwrap_err();
    assert_eq!(err.found_text.as_deref(), Some("-9223372036854775809"));
    assert_eq!(err.position, 23);
}

// ============================================================================
// Method Validation
// ============================================================================

#[test]
fn test_strict_mode_rejects_unknown_method() {
    let registry = MethodRegistry::new();
    let tokens = scan("this.Sum(x => x.a)").unwrap();
    let err = Parser::new(tokens)
        .validate_methods(&registry)
        .parse()
        .unwrap_err();
    assert_eq!(err.position, 5);
    assert_eq!(err.found_text.as_deref(), Some("Sum"));
    assert_eq!(err.expected, "method name (Where)");
}

#[test]
fn test_strict_mode_is_case_sensitive() {
    let registry = MethodRegistry::new();
    let tokens = scan("this.where(x => x.a)").unwrap();
    assert!(Parser::new(tokens).validate_methods(&registry).parse().is_err());
}

#[test]
fn test_strict_mode_accepts_registered_methods() {
    let mut registry = MethodRegistry::new();
    registry.register("Reject", reject);

    let tokens = scan("this.Where(x => x.a).Reject(x => x.b)").unwrap();
    let expr = Parser::new(tokens).validate_methods(&registry).parse().unwrap();
    assert_eq!(expr, parse("this.Where(x => x.a).Reject(x => x.b)").unwrap());
}
