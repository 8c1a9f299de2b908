use gifront::lexer::{Keyword, LexStep, Lexer, LiteralKind, OperatorKind, SemicolonKind, TokenKind};

fn collect_tokens(input: &str) -> Vec<(TokenKind, String)> {
    let mut lexer = Lexer::new(input);
    let mut tokens = Vec::new();
    loop {
        match lexer.next_token().expect("scan should succeed") {
            LexStep::Token(token) => tokens.push((token.kind, token.lexeme)),
            LexStep::EndOfInput => break,
            other => panic!("unexpected step {other:?}"),
        }
    }
    tokens
}

fn kinds(input: &str) -> Vec<TokenKind> {
    collect_tokens(input).into_iter().map(|(kind, _)| kind).collect()
}

#[test]
fn scans_operators_with_longest_match() {
    let tokens = collect_tokens("&^= &^ <<= << <- := ... ... ++ += != ! && & ~");
    let expected = vec![
        (TokenKind::Operator(OperatorKind::AndNotAssign), "&^="),
        (TokenKind::Operator(OperatorKind::AndNot), "&^"),
        (TokenKind::Operator(OperatorKind::ShlAssign), "<<="),
        (TokenKind::Operator(OperatorKind::Shl), "<<"),
        (TokenKind::Operator(OperatorKind::Arrow), "<-"),
        (TokenKind::Operator(OperatorKind::Define), ":="),
        (TokenKind::Operator(OperatorKind::Ellipsis), "..."),
        (TokenKind::Operator(OperatorKind::Ellipsis), "..."),
        (TokenKind::Operator(OperatorKind::Inc), "++"),
        (TokenKind::Operator(OperatorKind::AddAssign), "+="),
        (TokenKind::Operator(OperatorKind::Neq), "!="),
        (TokenKind::Operator(OperatorKind::Not), "!"),
        (TokenKind::Operator(OperatorKind::LogicalAnd), "&&"),
        (TokenKind::Operator(OperatorKind::And), "&"),
        (TokenKind::Operator(OperatorKind::Tilde), "~"),
    ];
    let expected: Vec<(TokenKind, String)> = expected
        .into_iter()
        .map(|(kind, lexeme)| (kind, lexeme.to_string()))
        .collect();
    assert_eq!(tokens, expected);
}

#[test]
fn distinguishes_keywords_from_identifiers() {
    assert_eq!(
        kinds("func funcs range _x ä"),
        vec![
            TokenKind::Keyword(Keyword::Func),
            TokenKind::Identifier,
            TokenKind::Keyword(Keyword::Range),
            TokenKind::Identifier,
            TokenKind::Identifier,
            TokenKind::Semicolon(SemicolonKind::EndOfInput),
        ]
    );
}

#[test]
fn classifies_numeric_literals() {
    let literals: Vec<TokenKind> = kinds("42 0x1F 0o17 0b1010 017 1_000 3.14 .5 1e9 0x1p-2 2i 1.5i")
        .into_iter()
        .filter(|kind| !matches!(kind, TokenKind::Semicolon(_)))
        .collect();
    assert_eq!(
        literals,
        vec![
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Int),
            TokenKind::Literal(LiteralKind::Float),
            TokenKind::Literal(LiteralKind::Float),
            TokenKind::Literal(LiteralKind::Float),
            TokenKind::Literal(LiteralKind::Float),
            TokenKind::Literal(LiteralKind::Imaginary),
            TokenKind::Literal(LiteralKind::Imaginary),
        ]
    );
}

#[test]
fn scans_string_and_rune_literals_with_escapes() {
    let tokens = collect_tokens(r#""a\"b\n" `raw \n` '\'' '\x41' '本'"#);
    let lexemes: Vec<&str> = tokens
        .iter()
        .filter(|(kind, _)| matches!(kind, TokenKind::Literal(_)))
        .map(|(_, lexeme)| lexeme.as_str())
        .collect();
    assert_eq!(
        lexemes,
        vec![r#""a\"b\n""#, r"`raw \n`", r"'\''", r"'\x41'", "'本'"]
    );
}

#[test]
fn skips_comments_and_keeps_spans_in_bytes() {
    let mut lexer = Lexer::new("/* c */ x // tail");
    let LexStep::Token(token) = lexer.next_token().expect("scan should succeed") else {
        panic!("expected a token");
    };
    assert_eq!(token.kind, TokenKind::Identifier);
    assert_eq!(token.span.start.as_usize(), 8);
    assert_eq!(token.span.end.as_usize(), 9);
}

#[test]
fn skips_leading_byte_order_mark() {
    assert_eq!(
        kinds("\u{FEFF}x"),
        vec![
            TokenKind::Identifier,
            TokenKind::Semicolon(SemicolonKind::EndOfInput),
        ]
    );
}
