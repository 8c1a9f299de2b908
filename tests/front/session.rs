use gifront::front::{ClassifyError, ClassifyOptions, InternalFault, Session, SourceFragment};
use gifront::lexer::DiagnosticCode;
use gifront::parser::{ParseErrorKind, StatementKind};
use serde_json::json;

#[test]
fn boundary_appends_a_single_newline() {
    let fragment = SourceFragment::with_boundary("x := 1");
    assert!(fragment.has_boundary());
    assert_eq!(fragment.source(), "x := 1\n");
    assert_eq!(SourceFragment::with_boundary("x\n").source(), "x\n");
    assert_eq!(SourceFragment::new("x").source(), "x");
    assert!(SourceFragment::from(" \t\n").is_blank());
}

#[test]
fn boundary_does_not_change_verdicts() {
    let session = Session::default();
    for text in ["x := 1", "3 * ", "3 4", ""] {
        let plain = session
            .classify(&SourceFragment::new(text))
            .expect("classification should not fail");
        let bounded = session
            .classify(&SourceFragment::with_boundary(text))
            .expect("classification should not fail");
        assert_eq!(plain.result(), bounded.result(), "text {text:?}");
    }
}

#[test]
fn invalid_utf8_is_malformed_input() {
    let error = SourceFragment::from_bytes(b"x := \"\xff\"").expect_err("bytes are not UTF-8");
    assert!(error.is_malformed_input());
    assert_eq!(
        error.diagnostic().map(|diagnostic| diagnostic.code),
        Some(DiagnosticCode::InvalidEncoding)
    );
}

#[test]
fn nul_and_stray_bom_are_malformed_input() {
    let session = Session::default();
    for (text, code) in [
        ("x := 1\0", DiagnosticCode::NulCharacter),
        ("/* \0 */", DiagnosticCode::NulCharacter),
        ("x := \u{FEFF}1", DiagnosticCode::MisplacedByteOrderMark),
    ] {
        let error = session.classify_str(text).expect_err("input is malformed");
        match error {
            ClassifyError::MalformedInput(diagnostic) => assert_eq!(diagnostic.code, code),
            other => panic!("expected malformed input for {text:?}, got {other:?}"),
        }
    }
}

#[test]
fn leading_bom_is_ignored() {
    let classification = Session::default()
        .classify_str("\u{FEFF}x := 1")
        .expect("classification should not fail");
    assert!(classification.is_complete());
}

#[test]
fn budgets_surface_as_internal_faults() {
    let tight_tokens = Session::new(ClassifyOptions {
        max_tokens: 2,
        ..ClassifyOptions::default()
    });
    match tight_tokens.classify_str("a := b") {
        Err(ClassifyError::InternalFault(InternalFault::Parser(error))) => {
            assert_eq!(error.kind, ParseErrorKind::TokenLimitExceeded);
        }
        other => panic!("expected a token budget fault, got {other:?}"),
    }

    let shallow = Session::new(ClassifyOptions {
        max_nesting: 3,
        ..ClassifyOptions::default()
    });
    let error = shallow
        .classify_str("f(g(h(i(1))))")
        .expect_err("nesting budget should be exceeded");
    assert!(!error.is_malformed_input());
}

#[test]
fn diagnostic_budget_limits_reported_problems() {
    let input = "1 1\n)\n)\n)";
    let all = Session::default()
        .classify_str(input)
        .expect("classification should not fail");
    assert_eq!(all.diagnostics().len(), 4);

    let capped = Session::new(ClassifyOptions {
        max_diagnostics: 2,
        ..ClassifyOptions::default()
    })
    .classify_str(input)
    .expect("classification should not fail");
    assert_eq!(capped.diagnostics().len(), 2);

    let floor = Session::new(ClassifyOptions {
        max_diagnostics: 0,
        ..ClassifyOptions::default()
    })
    .classify_str(input)
    .expect("classification should not fail");
    assert_eq!(floor.diagnostics().len(), 1);
    assert!(floor.is_syntax_error());
}

#[test]
fn classification_serializes_flags_and_details() {
    let complete = Session::default()
        .classify_str("x := 1")
        .expect("classification should not fail");
    assert_eq!(complete.statement(), Some(StatementKind::ShortVarDecl));
    let value = serde_json::to_value(&complete).expect("classification serializes");
    assert_eq!(value["is_eof"], json!(false));
    assert_eq!(value["is_syntax_error"], json!(false));
    assert_eq!(value["verdict"], json!("complete"));
    assert_eq!(value["statement"], json!("ShortVarDecl"));
    assert_eq!(value["diagnostics"], json!([]));

    let pending = Session::default()
        .classify_str("if true {")
        .expect("classification should not fail");
    let value = serde_json::to_value(&pending).expect("classification serializes");
    assert_eq!(value["is_eof"], json!(true));
    assert_eq!(value["verdict"], json!("need_more_input"));
    assert_eq!(value["pending"], json!("UnclosedBrace"));
    assert_eq!(value["diagnostics"][0]["offending"], json!("EndOfInput"));
}

#[test]
fn sessions_are_shareable_and_stateless() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Session>();

    let session = Session::default();
    let first = session.classify_str("3 4").expect("classification should not fail");
    let second = session.classify_str("3 4").expect("classification should not fail");
    assert_eq!(first, second);
    assert_eq!(first.tokens_scanned(), second.tokens_scanned());
}

fn classify_on_small_stack(
    options: ClassifyOptions,
    input: String,
) -> Result<gifront::Classification, ClassifyError> {
    std::thread::Builder::new()
        .stack_size(2 * 1024 * 1024)
        .spawn(move || Session::new(options).classify_str(&input))
        .expect("thread should start")
        .join()
        .expect("classification should not abort the thread")
}

fn assert_nesting_fault(result: Result<gifront::Classification, ClassifyError>) {
    match result {
        Err(ClassifyError::InternalFault(InternalFault::Parser(error))) => {
            assert_eq!(error.kind, ParseErrorKind::NestingLimitExceeded);
        }
        other => panic!("expected a nesting budget fault, got {other:?}"),
    }
}

#[test]
fn pathological_nesting_is_a_fault_on_a_small_stack() {
    for input in [
        "(".repeat(10_000),
        "{".repeat(10_000),
        format!("x := {}", "[".repeat(5_000)),
        "f(".repeat(5_000),
    ] {
        assert_nesting_fault(classify_on_small_stack(ClassifyOptions::default(), input));
    }
}

#[test]
fn configured_nesting_budget_is_capped() {
    let options = ClassifyOptions {
        max_nesting: usize::MAX,
        ..ClassifyOptions::default()
    };
    assert_nesting_fault(classify_on_small_stack(options, "(".repeat(5_000)));
}
