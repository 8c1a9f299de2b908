use gifront::parser::{
    DiagnosticCollector, DiagnosticKind, DiagnosticListener, ParseOptions, ParseStep, Parser,
};

#[test]
fn recovery_reports_each_broken_statement() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input("3 4\n)\n+ +\n", ParseOptions::default(), &mut collector);
    let report = parser.parse_top_level().expect("parse should not fault");
    assert!(matches!(report.step, ParseStep::SyntaxError(_)));

    let recovered = parser.recover().expect("recovery should not fault");
    assert_eq!(recovered, 2);
    assert_eq!(collector.len(), 3);

    let lines: Vec<u32> = collector
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.position.line)
        .collect();
    assert_eq!(lines, vec![1, 2, 4]);
}

#[test]
fn recovery_adds_nothing_when_the_rest_parses() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input(
        "3 4\nx := 1\nif x > 0 {\n\tx--\n}\n",
        ParseOptions::default(),
        &mut collector,
    );
    parser.parse_top_level().expect("parse should not fault");
    assert_eq!(parser.recover().expect("recovery should not fault"), 0);
    assert_eq!(collector.len(), 1);
}

#[test]
fn recovery_skips_bracketed_separators() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input(
        "x := 1 2 {\n\ta := 1\n}\n)",
        ParseOptions::default(),
        &mut collector,
    );
    parser.parse_top_level().expect("parse should not fault");
    assert_eq!(parser.recover().expect("recovery should not fault"), 1);
    assert_eq!(collector.diagnostics()[1].position.line, 4);
}

#[test]
fn diagnostic_budget_caps_recovery() {
    let options = ParseOptions {
        max_diagnostics: 2,
        ..ParseOptions::default()
    };
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input("1 1\n)\n)\n)\n", options, &mut collector);
    parser.parse_top_level().expect("parse should not fault");
    assert_eq!(parser.recover().expect("recovery should not fault"), 1);
    assert_eq!(collector.len(), 2);
}

#[test]
fn saturated_listener_stops_recovery() {
    let mut collector = DiagnosticCollector::with_limit(1);
    let mut parser = Parser::for_input("1 1\n)\n", ParseOptions::default(), &mut collector);
    parser.parse_top_level().expect("parse should not fault");
    assert_eq!(parser.recover().expect("recovery should not fault"), 0);
    assert!(collector.is_saturated());
    assert_eq!(collector.len(), 1);
}

#[test]
fn lexer_diagnostics_are_tagged_during_recovery() {
    let mut collector = DiagnosticCollector::new();
    let mut parser = Parser::for_input("1 1\ny := $\n", ParseOptions::default(), &mut collector);
    parser.parse_top_level().expect("parse should not fault");
    parser.recover().expect("recovery should not fault");
    let kinds: Vec<DiagnosticKind> = collector
        .diagnostics()
        .iter()
        .map(|diagnostic| diagnostic.kind)
        .collect();
    assert_eq!(kinds, vec![DiagnosticKind::Parser, DiagnosticKind::Lexer]);
}
