use gifront::parser::{
    DiagnosticCollector, NeedMoreInputReason, Offending, ParseOptions, ParseStep, Parser,
};

fn pending(input: &str) -> (NeedMoreInputReason, bool) {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input(input, ParseOptions::default(), &mut collector);
    let report = parser.parse_top_level().expect("parse should not fault");
    match report.step {
        ParseStep::NeedMoreInput(reason) => (reason, report.observed_end_of_input),
        other => panic!("expected more input to be needed for {input:?}, got {other:?}"),
    }
}

#[test]
fn empty_and_comment_only_input() {
    assert_eq!(pending("").0, NeedMoreInputReason::EmptyInput);
    assert_eq!(pending("  \n\t\n").0, NeedMoreInputReason::EmptyInput);
    assert_eq!(pending("// nothing yet").0, NeedMoreInputReason::EmptyInput);
    assert_eq!(pending("/* still nothing */").0, NeedMoreInputReason::EmptyInput);
}

#[test]
fn truncated_tokens_name_the_open_literal() {
    let cases = [
        ("x := \"abc", NeedMoreInputReason::UnterminatedString),
        ("s := `raw\nline", NeedMoreInputReason::UnterminatedRawString),
        ("r := 'a", NeedMoreInputReason::UnterminatedRune),
        ("x := 1 /* later", NeedMoreInputReason::UnterminatedComment),
        ("x := 0x", NeedMoreInputReason::IncompleteNumber),
        ("x := 1e+", NeedMoreInputReason::IncompleteNumber),
    ];
    for (input, expected) in cases {
        assert_eq!(pending(input).0, expected, "input {input:?}");
    }
}

#[test]
fn open_delimiters_take_precedence_over_the_last_token() {
    let cases = [
        ("f(1,", NeedMoreInputReason::UnclosedParen),
        ("f(1,\n2", NeedMoreInputReason::UnclosedParen),
        ("func f(a int,\n", NeedMoreInputReason::UnclosedParen),
        ("a[1", NeedMoreInputReason::UnclosedBracket),
        ("type A struct {", NeedMoreInputReason::UnclosedBrace),
        ("if true {", NeedMoreInputReason::UnclosedBrace),
        ("switch {", NeedMoreInputReason::UnclosedBrace),
        ("select {", NeedMoreInputReason::UnclosedBrace),
        ("for {", NeedMoreInputReason::UnclosedBrace),
        ("x := []int{1,\n2,", NeedMoreInputReason::UnclosedBrace),
    ];
    for (input, expected) in cases {
        assert_eq!(pending(input).0, expected, "input {input:?}");
    }
}

#[test]
fn dangling_operators_and_keywords() {
    let cases = [
        ("x = 1 +", NeedMoreInputReason::TrailingOperator),
        ("a, b :=", NeedMoreInputReason::TrailingOperator),
        ("x.", NeedMoreInputReason::TrailingOperator),
        ("a, b := 3,", NeedMoreInputReason::TrailingComma),
        ("goto", NeedMoreInputReason::IncompleteStatement),
        ("if x {\n} else", NeedMoreInputReason::IncompleteStatement),
        ("a, b", NeedMoreInputReason::IncompleteStatement),
    ];
    for (input, expected) in cases {
        assert_eq!(pending(input).0, expected, "input {input:?}");
    }
}

#[test]
fn pending_reports_observe_end_of_input() {
    for input in ["", "x +", "if x {", "x := \"open", "f(a"] {
        assert!(pending(input).1, "input {input:?}");
    }
}

#[test]
fn pending_diagnostic_points_at_end_of_input() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input("x = 1 +", ParseOptions::default(), &mut collector);
    parser.parse_top_level().expect("parse should not fault");
    let diagnostic = collector.first().expect("a diagnostic should be reported");
    assert_eq!(diagnostic.offending, Offending::EndOfInput);
    assert!(diagnostic.message.starts_with("syntax error: unexpected EOF"));
}

#[test]
fn reasons_have_descriptions() {
    assert_eq!(NeedMoreInputReason::UnclosedBrace.describe(), "unclosed `{`");
    assert_eq!(NeedMoreInputReason::EmptyInput.describe(), "empty input");
}
