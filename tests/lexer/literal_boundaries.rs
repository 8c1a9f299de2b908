use gifront::lexer::{DiagnosticCode, LexStep, Lexer, RecoverableLexError, TokenKind};

fn last_step(input: &str) -> LexStep {
    let mut lexer = Lexer::new(input);
    lexer
        .collect_steps()
        .expect("scan should succeed")
        .into_iter()
        .rev()
        .find(|step| {
            !matches!(step, LexStep::Token(token) if matches!(token.kind, TokenKind::Semicolon(_)))
        })
        .expect("input should produce a step")
}

fn truncated_code(input: &str) -> DiagnosticCode {
    match last_step(input) {
        LexStep::Truncated(_, error) | LexStep::Incomplete(error) => error.diagnostic().code,
        other => panic!("expected a truncated step for {input:?}, got {other:?}"),
    }
}

fn invalid_code(input: &str) -> DiagnosticCode {
    let mut lexer = Lexer::new(input);
    let steps = lexer.collect_steps().expect("scan should succeed");
    steps
        .into_iter()
        .find_map(|step| match step {
            LexStep::Invalid(token, diagnostic) => {
                assert_eq!(token.kind, TokenKind::Illegal);
                Some(diagnostic.code)
            }
            _ => None,
        })
        .unwrap_or_else(|| panic!("expected an invalid step for {input:?}"))
}

#[test]
fn unterminated_literals_at_end_of_input_are_truncated() {
    assert_eq!(truncated_code("\"abc"), DiagnosticCode::UnterminatedString);
    assert_eq!(truncated_code("\"abc\\"), DiagnosticCode::UnterminatedString);
    assert_eq!(truncated_code("`abc\nxyz"), DiagnosticCode::UnterminatedRawString);
    assert_eq!(truncated_code("'a"), DiagnosticCode::UnterminatedRune);
    assert_eq!(truncated_code("x /* open"), DiagnosticCode::UnterminatedComment);
}

#[test]
fn numbers_still_needing_digits_are_truncated() {
    for input in ["0x", "0b", "1e", "1e+", "0x1.", "1_", "08"] {
        assert_eq!(
            truncated_code(input),
            DiagnosticCode::IncompleteNumber,
            "input {input:?}"
        );
    }
}

#[test]
fn truncated_step_ends_the_stream_without_semicolon() {
    let mut lexer = Lexer::new("x := \"open");
    let steps = lexer.collect_steps().expect("scan should succeed");
    assert!(matches!(
        steps.last(),
        Some(LexStep::Truncated(_, RecoverableLexError::UnterminatedString(_)))
    ));
    assert_eq!(
        lexer.next_token().expect("scan should succeed"),
        LexStep::EndOfInput
    );
}

#[test]
fn never_valid_text_is_reported_as_illegal_token() {
    assert_eq!(invalid_code("@"), DiagnosticCode::InvalidCharacter);
    assert_eq!(invalid_code("a $ b"), DiagnosticCode::InvalidCharacter);
    assert_eq!(invalid_code("?"), DiagnosticCode::InvalidCharacter);
    assert_eq!(invalid_code("\"ab\ncd\""), DiagnosticCode::NewlineInString);
    assert_eq!(invalid_code("'a\n'"), DiagnosticCode::NewlineInRune);
    assert_eq!(invalid_code("''"), DiagnosticCode::EmptyRune);
    assert_eq!(invalid_code("'ab'"), DiagnosticCode::RuneTooLong);
    assert_eq!(invalid_code("\"\\q\""), DiagnosticCode::InvalidEscape);
    assert_eq!(invalid_code("0b2"), DiagnosticCode::InvalidDigit);
    assert_eq!(invalid_code("08\n"), DiagnosticCode::InvalidDigit);
    assert_eq!(invalid_code("1__0"), DiagnosticCode::MisplacedSeparator);
    assert_eq!(invalid_code("0x;"), DiagnosticCode::MalformedNumber);
}

#[test]
fn legacy_octal_with_fraction_is_a_float() {
    let mut lexer = Lexer::new("08.5");
    let steps = lexer.collect_steps().expect("scan should succeed");
    assert!(matches!(
        &steps[0],
        LexStep::Token(token) if token.lexeme == "08.5"
    ));
}
