use gifront::lexer::{LexStep, Lexer, SemicolonKind, TokenKind};

fn semicolons(input: &str) -> Vec<SemicolonKind> {
    let mut lexer = Lexer::new(input);
    let steps = lexer.collect_steps().expect("scan should succeed");
    steps
        .into_iter()
        .filter_map(|step| match step {
            LexStep::Token(token) => match token.kind {
                TokenKind::Semicolon(kind) => Some(kind),
                _ => None,
            },
            _ => None,
        })
        .collect()
}

#[test]
fn inserts_semicolon_after_line_ending_tokens() {
    for input in [
        "x\n", "42\n", "\"s\"\n", "break\n", "continue\n", "fallthrough\n", "return\n",
        "i++\n", "i--\n", "f()\n", "a[0]\n", "{}\n",
    ] {
        assert_eq!(
            semicolons(input),
            vec![SemicolonKind::Newline],
            "input {input:?}"
        );
    }
}

#[test]
fn no_semicolon_after_operators_and_openers() {
    for input in ["3 *\n", "a,\n", "x :=\n", "f(\n", "if x {\n", "go\n", "a.\n"] {
        assert!(semicolons(input).is_empty(), "input {input:?}");
    }
}

#[test]
fn end_of_input_semicolon_is_marked() {
    assert_eq!(semicolons("x"), vec![SemicolonKind::EndOfInput]);
    assert_eq!(semicolons("x\n"), vec![SemicolonKind::Newline]);
    assert_eq!(semicolons("x; y"), vec![
        SemicolonKind::Explicit,
        SemicolonKind::EndOfInput
    ]);
}

#[test]
fn multi_line_block_comment_acts_like_newline() {
    assert_eq!(semicolons("x /* a\n b */ y"), vec![
        SemicolonKind::Newline,
        SemicolonKind::EndOfInput
    ]);
    assert_eq!(semicolons("x /* same line */ + y"), vec![
        SemicolonKind::EndOfInput
    ]);
}

#[test]
fn line_comment_keeps_the_newline_semicolon() {
    assert_eq!(semicolons("x // note\ny"), vec![
        SemicolonKind::Newline,
        SemicolonKind::EndOfInput
    ]);
}

#[test]
fn newline_semicolon_spans_the_newline() {
    let mut lexer = Lexer::new("ab\n");
    let steps = lexer.collect_steps().expect("scan should succeed");
    let LexStep::Token(token) = &steps[1] else {
        panic!("expected the inserted semicolon");
    };
    assert_eq!(token.kind, TokenKind::Semicolon(SemicolonKind::Newline));
    assert_eq!(token.lexeme, "\n");
    assert_eq!(
        (token.span.start.as_usize(), token.span.end.as_usize()),
        (2, 3)
    );
}

#[test]
fn written_semicolon_is_a_token() {
    let mut lexer = Lexer::new("x;\ny");
    let steps = lexer.collect_steps().expect("scan should succeed");
    let LexStep::Token(token) = &steps[1] else {
        panic!("expected the written semicolon");
    };
    assert_eq!(token.kind, TokenKind::Semicolon(SemicolonKind::Explicit));
    assert_eq!(token.lexeme, ";");
    assert_eq!(
        (token.span.start.as_usize(), token.span.end.as_usize()),
        (1, 2)
    );
    assert_eq!(semicolons("x;\ny"), vec![
        SemicolonKind::Explicit,
        SemicolonKind::EndOfInput
    ]);
    assert_eq!(semicolons("for i := 0; i <"), vec![SemicolonKind::Explicit]);
}
