// tests/cli_tests.rs
#![cfg(feature = "cli")]

use json_linq::Expr;
use json_linq::cli::{
    CheckOptions, CheckResult, CliError, DocTopic, execute_check, get_doc_topic,
    get_docs_overview,
};

fn options(query: &str, input: Option<&str>) -> CheckOptions {
    CheckOptions {
        query: query.to_string(),
        input: input.map(str::to_string),
        ..Default::default()
    }
}

fn output(result: CheckResult) -> String {
    match result {
        CheckResult::Success(text) => text,
        other => panic!("expected output, got {:?}", other),
    }
}

// ============================================================================
// check
// ============================================================================

#[test]
fn test_check_pretty() {
    let opts = options(
        "this.Where(x => x.age >= 18)",
        Some(r#"[{"name": "a", "age": 17}, {"name": "b", "age": 30}]"#),
    );
    assert_eq!(
        output(execute_check(&opts).unwrap()),
        "[\n  {\n    \"name\": \"b\",\n    \"age\": 30\n  }\n]"
    );
}

#[test]
fn test_check_compact() {
    let opts = CheckOptions {
        compact: true,
        ..options(
            "this.Where(x => x.age >= 18)",
            Some(r#"[{"name": "a", "age": 17}, {"name": "b", "age": 30}]"#),
        )
    };
    assert_eq!(output(execute_check(&opts).unwrap()), r#"[{"name":"b","age":30}]"#);
}

#[test]
fn test_check_requires_input() {
    let err = execute_check(&options("this.Where(x => x.a)", None)).unwrap_err();
    assert!(matches!(err, CliError::NoInput));
}

#[test]
fn test_check_syntax_only() {
    let opts = CheckOptions {
        syntax_only: true,
        ..options("this.Where(x => x.a == 1)", None)
    };
    assert!(matches!(execute_check(&opts).unwrap(), CheckResult::SyntaxValid));
}

#[test]
fn test_syntax_only_rejects_unknown_methods() {
    let opts = CheckOptions {
        syntax_only: true,
        ..options("this.Sum(x => x.a)", None)
    };
    let err = execute_check(&opts).unwrap_err();
    assert!(matches!(err, CliError::Query(json_linq::Error::Parse(_))), "{:?}", err);
    assert_eq!(
        err.to_string(),
        "parse error: expected method name (Where), found identifier 'Sum' at position 5"
    );
}

#[test]
fn test_unknown_method_at_run_time() {
    let err = execute_check(&options("this.Sum(x => x.a)", Some("[]"))).unwrap_err();
    assert!(matches!(err, CliError::Query(json_linq::Error::Eval(_))), "{:?}", err);
}

#[test]
fn test_check_show_ast() {
    let opts = CheckOptions {
        show_ast: true,
        ..options("this", None)
    };
    match execute_check(&opts).unwrap() {
        CheckResult::Ast(expr) => assert_eq!(expr, Expr::This),
        other => panic!("expected tree, got {:?}", other),
    }
}

#[test]
fn test_check_errors() {
    let err = execute_check(&options("this.Where(x => x.a | 1)", Some("[]"))).unwrap_err();
    assert!(matches!(err, CliError::Query(json_linq::Error::Lex(_))));

    let err = execute_check(&options("this.Where(x => x.a >)", Some("[]"))).unwrap_err();
    assert!(matches!(err, CliError::Query(json_linq::Error::Parse(_))));

    let err = execute_check(&options("this", Some("{}"))).unwrap_err();
    assert!(matches!(
        err,
        CliError::Query(json_linq::Error::NotACollection("object"))
    ));

    let err = execute_check(&options("this", Some("[1,"))).unwrap_err();
    assert!(matches!(err, CliError::Query(json_linq::Error::Json(_))));
}

#[test]
fn test_malformed_records_are_query_errors() {
    let err = execute_check(&options("this", Some(r#"[{"a": }]"#))).unwrap_err();
    let CliError::Query(json_linq::Error::Json(_)) = &err else {
        panic!("expected JSON error, got {:?}", err);
    };
    assert!(err.to_string().starts_with("invalid JSON: "), "{}", err);
}

// ============================================================================
// docs
// ============================================================================

#[test]
fn test_docs_overview_lists_topics() {
    let overview = get_docs_overview();
    for topic in ["syntax", "operators", "semantics"] {
        assert!(overview.contains(topic), "missing topic: {}", topic);
    }
}

#[test]
fn test_doc_topics() {
    assert!(get_doc_topic("syntax").unwrap().contains("GRAMMAR"));
    assert!(get_doc_topic("OPERATORS").unwrap().contains("&&"));
    assert!(get_doc_topic("types").unwrap().contains("TRUTHINESS"));
    assert_eq!(DocTopic::parse("grammar"), Some(DocTopic::Syntax));
}

#[test]
fn test_unknown_doc_topic() {
    let err = get_doc_topic("joins").unwrap_err();
    assert!(matches!(err, CliError::UnknownTopic(ref t) if t == "joins"));
    assert!(err.to_string().contains("jlinq docs"));
}
