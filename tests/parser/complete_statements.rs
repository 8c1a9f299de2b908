use gifront::parser::{
    DeclKind, DiagnosticCollector, ParseOptions, ParseStep, Parser, StatementKind,
};

fn statement_kind(input: &str) -> StatementKind {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input(input, ParseOptions::default(), &mut collector);
    let report = parser.parse_top_level().expect("parse should not fault");
    match report.step {
        ParseStep::Complete(statement) => statement.kind,
        other => panic!("expected a complete statement for {input:?}, got {other:?}"),
    }
}

#[test]
fn simple_statements() {
    let cases = [
        ("x := 1", StatementKind::ShortVarDecl),
        ("a, b := 1, 2", StatementKind::ShortVarDecl),
        ("x = 2", StatementKind::Assignment),
        ("x += 2", StatementKind::Assignment),
        ("a[i], b.c = 1, 2", StatementKind::Assignment),
        ("x++", StatementKind::IncDec),
        ("x--", StatementKind::IncDec),
        ("ch <- 1", StatementKind::Send),
        ("f(1, 2)", StatementKind::Expression),
        ("3 * \n 4", StatementKind::Expression),
        ("fmt.Println(\"hi\")", StatementKind::Expression),
        ("<-done", StatementKind::Expression),
        ("L: x++", StatementKind::Labeled),
    ];
    for (input, expected) in cases {
        assert_eq!(statement_kind(input), expected, "input {input:?}");
    }
}

#[test]
fn keyword_statements() {
    let cases = [
        ("go f()", StatementKind::Go),
        ("defer wg.Done()", StatementKind::Defer),
        ("return", StatementKind::Return),
        ("return 1, nil", StatementKind::Return),
        ("break", StatementKind::Break),
        ("continue outer", StatementKind::Continue),
        ("goto done", StatementKind::Goto),
        ("fallthrough", StatementKind::Fallthrough),
        ("{ x := 1; _ = x }", StatementKind::Block),
    ];
    for (input, expected) in cases {
        assert_eq!(statement_kind(input), expected, "input {input:?}");
    }
}

#[test]
fn control_flow_statements() {
    let cases = [
        ("if x > 0 { y() } else { z() }", StatementKind::If),
        ("if err := f(); err != nil {\n\treturn\n}", StatementKind::If),
        ("if a {\n} else if b {\n} else {\n}", StatementKind::If),
        ("for i := 0; i < 3; i++ {}", StatementKind::For),
        ("for k, v := range m {\n\t_, _ = k, v\n}", StatementKind::For),
        ("for range ch {}", StatementKind::For),
        ("for {}", StatementKind::For),
        ("for x < 10 {\n\tx *= 2\n}", StatementKind::For),
        ("switch x {\ncase 1, 2:\n\tf()\ndefault:\n}", StatementKind::Switch),
        ("switch {\ncase x > 1:\n\tfallthrough\ncase x > 0:\n}", StatementKind::Switch),
        ("switch v := x.(type) {\ncase int, string:\n\t_ = v\n}", StatementKind::TypeSwitch),
        ("switch x.(type) {\ncase nil:\n}", StatementKind::TypeSwitch),
        ("select {\ncase v := <-ch:\n\t_ = v\ncase out <- 1:\ndefault:\n}", StatementKind::Select),
    ];
    for (input, expected) in cases {
        assert_eq!(statement_kind(input), expected, "input {input:?}");
    }
}

#[test]
fn declarations() {
    let cases = [
        ("import \"fmt\"", DeclKind::Import),
        ("import (\n\t\"fmt\"\n\tstr \"strings\"\n)", DeclKind::Import),
        ("const c = 1", DeclKind::Const),
        ("const (\n\tA = iota\n\tB\n)", DeclKind::Const),
        ("var v int", DeclKind::Var),
        ("var a, b = 1, 2", DeclKind::Var),
        ("var (\n\ta = 1\n\tb string\n)", DeclKind::Var),
        ("type T struct {\n\tA int\n\tB, C string `json:\"b\"`\n}", DeclKind::Type),
        ("type A = B", DeclKind::Type),
        ("type S interface {\n\tString() string\n}", DeclKind::Type),
        ("type F func(int) (string, error)", DeclKind::Type),
        ("func f(a, b int) (int, error) {\n\treturn a, nil\n}", DeclKind::Func),
        ("func f()", DeclKind::Func),
        ("func (p *T) M() {}", DeclKind::Method),
        ("func f(args ...string) {}", DeclKind::Func),
    ];
    for (input, expected) in cases {
        assert_eq!(
            statement_kind(input),
            StatementKind::Declaration(expected),
            "input {input:?}"
        );
    }
}

#[test]
fn composite_literals_follow_header_rules() {
    let cases = [
        ("x := []int{1, 2, 3}", StatementKind::ShortVarDecl),
        ("p := Point{X: 1, Y: 2}", StatementKind::ShortVarDecl),
        ("m := map[string]int{\"a\": 1}", StatementKind::ShortVarDecl),
        ("grid := [...][2]int{{1, 2}, {3, 4}}", StatementKind::ShortVarDecl),
        ("for _, x := range []int{1, 2} {}", StatementKind::For),
        ("if x == (T{}) {}", StatementKind::If),
        ("if f(T{}) {}", StatementKind::If),
        ("switch x {\ncase T{}:\n}", StatementKind::Switch),
    ];
    for (input, expected) in cases {
        assert_eq!(statement_kind(input), expected, "input {input:?}");
    }
}

#[test]
fn function_literals_at_the_prompt() {
    assert_eq!(statement_kind("func() {}()"), StatementKind::Expression);
    assert_eq!(
        statement_kind("func(x int) int { return x }(1)"),
        StatementKind::Expression
    );
    assert_eq!(
        statement_kind("f := func() {\n\tprintln()\n}"),
        StatementKind::ShortVarDecl
    );
}

#[test]
fn complete_report_records_end_of_input() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input("x := 1\n", ParseOptions::default(), &mut collector);
    let report = parser.parse_top_level().expect("parse should not fault");
    assert!(report.observed_end_of_input);
    assert_eq!(report.tokens_scanned, 4);
    assert!(collector.is_empty());
}
