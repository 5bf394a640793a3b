use miniracket::{execute, Data, RunResult};

fn values(source: &str) -> Vec<Data> {
    execute(source)
        .into_iter()
        .map(|result| match result {
            RunResult {
                value: Some(value),
                error: None,
            } => value,
            other => panic!("unexpected result for {source}: {other:?}"),
        })
        .collect()
}

fn single_value(source: &str) -> Data {
    let mut all = values(source);
    assert_eq!(all.len(), 1, "expected one result for {source}");
    all.pop().unwrap()
}

fn single_error(source: &str) -> String {
    let mut results = execute(source);
    assert_eq!(results.len(), 1, "expected one result for {source}");
    match results.pop().unwrap() {
        RunResult {
            value: None,
            error: Some(error),
        } => error,
        other => panic!("expected an error for {source}, found {other:?}"),
    }
}

#[test]
fn arithmetic_programs() {
    let test_cases = [
        ("(+ )", 0.0),
        ("(+ 1 2 3)", 6.0),
        ("(* )", 1.0),
        ("(* 2 3 4)", 24.0),
        ("(- 5)", 5.0),
        ("(- 5 2)", 3.0),
        ("(/ 6)", 6.0),
        ("(/ 8 2)", 4.0),
        ("(/ 5 2)", 2.5),
        ("(+ (* 2 3) (/ 10 5))", 8.0),
    ];
    for (source, expected) in test_cases {
        assert_eq!(single_value(source), Data::Number(expected), "{source}");
    }
}

#[test]
fn comparison_programs() {
    let test_cases = [
        ("(> 3 2 1)", true),
        ("(> 1 2 3)", false),
        ("(< 1 2 3)", true),
        ("(< 3 2 1)", false),
        ("(= 2 2 2)", true),
        ("(= 2 3)", false),
        ("(>)", true),
        ("(< 7)", true),
    ];
    for (source, expected) in test_cases {
        assert_eq!(single_value(source), Data::Boolean(expected), "{source}");
    }
}

#[test]
fn lambda_and_define_programs() {
    let test_cases = [
        ("((lambda (x) (+ x 1)) 2)", 3.0),
        ("((λ (x) (* x 3)) 2)", 6.0),
        ("((lambda (op) (op 1 2 3)) (lambda (x y z) x))", 1.0),
        ("(define (square x) (* x x)) (square 4)", 16.0),
        ("(define (csurface length) (* 6 length length)) (csurface 3)", 54.0),
        (
            "(define (fact n) (if (= n 0) 1 (* n (fact (- n 1))))) (fact 5)",
            120.0,
        ),
    ];
    for (source, expected) in test_cases {
        assert_eq!(single_value(source), Data::Number(expected), "{source}");
    }
}

#[test]
fn conditional_programs() {
    let test_cases = [
        ("(if #t 1 0)", 1.0),
        ("(if #f 1 0)", 0.0),
        ("(if #true 1 0)", 1.0),
        ("(if #false 1 0)", 0.0),
        ("(if (> 2 1) (+ 1 1) (+ 2 2))", 2.0),
    ];
    for (source, expected) in test_cases {
        assert_eq!(single_value(source), Data::Number(expected), "{source}");
    }
}

#[test]
fn string_programs() {
    assert_eq!(single_value(r#"(string? "")"#), Data::Boolean(true));
    assert_eq!(single_value("(string? 1)"), Data::Boolean(false));
    assert_eq!(single_value(r#"(string-length "")"#), Data::Number(0.0));
    assert_eq!(single_value(r#"(string-length "abc")"#), Data::Number(3.0));
    assert_eq!(
        single_value(r#"(string-append "a" "b")"#),
        Data::String("ab".to_owned())
    );
    assert_eq!(
        single_value("(string-append)"),
        Data::String(String::new())
    );
    assert_eq!(single_value(r#"(string=? "" "")"#), Data::Boolean(true));
    assert_eq!(single_value(r#"(string=? "a" "a")"#), Data::Boolean(true));
    assert_eq!(single_value(r#"(string=? "a" "")"#), Data::Boolean(false));
    assert_eq!(single_value(r#"(string=? "a" "b")"#), Data::Boolean(false));
    assert_eq!(
        single_value(r#"(substring "abcd" 1)"#),
        Data::String("bcd".to_owned())
    );
    assert_eq!(
        single_value(r#"(substring "abcd" 1 2)"#),
        Data::String("b".to_owned())
    );
    assert_eq!(
        single_value(r#"(substring "abcd" 1 3)"#),
        Data::String("bc".to_owned())
    );
    assert_eq!(
        single_value(r#"(substring "abcd" 1 4)"#),
        Data::String("bcd".to_owned())
    );
}

#[test]
fn a_definition_with_an_unused_broken_body_is_harmless() {
    // cvolume's body would fail if applied, since let installs nothing;
    // merely defining it must not disturb the run
    let source = "(define (cvolume length) (let ((len length)) (* len len len))) \
                  (define (csurface length) (* 6 length length)) \
                  (csurface 3)";
    assert_eq!(single_value(source), Data::Number(54.0));
}

#[test]
fn let_bound_names_are_not_visible_in_the_body() {
    let error = single_error("(let ((x 5)) x)");
    assert_eq!(error, "undefined identifier: x");
}

#[test]
fn failing_programs_report_a_single_error() {
    let test_cases = [
        ("(foo 1)", "undefined identifier: foo"),
        (
            "(if #t 1)",
            "if expression must contain exactly three sub-expressions",
        ),
        ("(-)", "the expected number of arguments does not match the given number"),
        ("(/)", "the expected number of arguments does not match the given number"),
        ("(1 2)", "cannot cast data to procedure"),
        ("(if 1 2 3)", "cannot read number as boolean"),
        ("(string-length 5)", "expected a string value"),
    ];
    for (source, expected) in test_cases {
        assert_eq!(single_error(source), expected, "{source}");
    }
}

#[test]
fn one_failure_discards_the_whole_run() {
    let results = execute("(+ 1 2) (foo) (* 2 3)");
    assert_eq!(
        results,
        vec![RunResult::error("undefined identifier: foo".to_owned())]
    );
}

#[test]
fn successful_runs_report_every_expression_in_order() {
    let results = execute("(+ 1 2) (* 2 3)");
    assert_eq!(
        results,
        vec![
            RunResult::value(Data::Number(3.0)),
            RunResult::value(Data::Number(6.0)),
        ]
    );
}

#[test]
fn empty_source_reports_nothing() {
    assert_eq!(execute(""), Vec::new());
    assert_eq!(execute("   \n"), Vec::new());
}

#[test]
fn mixed_bracket_kinds_run_as_forms() {
    assert_eq!(single_value("[+ 1 2]"), Data::Number(3.0));
    assert_eq!(single_value("{* 2 3}"), Data::Number(6.0));
}

#[test]
fn results_serialize_to_the_wire_shape() {
    let results = execute("(+ 1 2)");
    assert_eq!(
        serde_json::to_string(&results).unwrap(),
        r#"[{"value":3.0,"error":null}]"#
    );

    let results = execute("(foo)");
    assert_eq!(
        serde_json::to_string(&results).unwrap(),
        r#"[{"value":null,"error":"undefined identifier: foo"}]"#
    );

    let results = execute(r#"(string-append "a" "b") (= 1 1)"#);
    assert_eq!(
        serde_json::to_string(&results).unwrap(),
        r#"[{"value":"ab","error":null},{"value":true,"error":null}]"#
    );
}
