use gifront::parser::{DiagnosticCollector, ParseOptions, ParseStep, Parser};
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 256;

fn statement_soup() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("x"), Just("1"), Just(":="), Just("="), Just("+"), Just("*"), Just(","),
            Just("("), Just(")"), Just("["), Just("]"), Just("{"), Just("}"), Just(";"),
            Just("\n"), Just(" "), Just("if"), Just("for"), Just("func"), Just("switch"),
            Just("case"), Just(":"), Just("range"), Just("struct"), Just("\"s\""),
            Just(".("), Just("type"), Just("<-"), Just("..."), Just("else"),
        ],
        0..48,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES),
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let mut collector = DiagnosticCollector::new();
        let mut parser = Parser::for_input(&input, ParseOptions::default(), &mut collector);
        match parser.parse_top_level() {
            Ok(report) => {
                if matches!(report.step, ParseStep::SyntaxError(_)) {
                    let _ = parser.recover();
                }
            }
            Err(error) => prop_assert!(error.is_fault()),
        }
    }

    #[test]
    fn every_verdict_reports_a_consistent_diagnostic(input in statement_soup()) {
        let mut collector = DiagnosticCollector::new();
        let mut parser = Parser::for_input(&input, ParseOptions::default(), &mut collector);
        let Ok(report) = parser.parse_top_level() else {
            return Ok(());
        };
        match report.step {
            ParseStep::Complete(_) => {
                prop_assert!(report.observed_end_of_input);
                prop_assert!(collector.is_empty());
            }
            ParseStep::NeedMoreInput(_) => {
                prop_assert!(report.observed_end_of_input);
                prop_assert_eq!(collector.len(), 1);
                prop_assert!(collector.diagnostics()[0].offending.is_end_of_input());
            }
            ParseStep::SyntaxError(_) => {
                prop_assert_eq!(collector.len(), 1);
            }
        }
    }
}
