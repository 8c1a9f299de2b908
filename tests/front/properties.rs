use gifront::front::{ClassifyError, Session, SourceFragment};
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 256;

const SYNTAX_ERROR_PREFIXES: &[&str] = &[
    "3 4 ",
    "3 * * ",
    "a,b := \n , ",
    "2 / ++ ",
    "3 \n 4 ",
    "x := ) ",
    "if {} ",
    "3; 4 ",
    "if x := 1; {} ",
    "for i := 0; i < 3; i++ ) ",
];

fn go_fragment() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("a"), Just("b"), Just("3"), Just(":="), Just("="), Just("+"), Just("*"),
            Just(","), Just("("), Just(")"), Just("{"), Just("}"), Just("["), Just("]"),
            Just("\n"), Just(" "), Just("if"), Just("for"), Just("func"), Just("return"),
            Just("\""), Just("`"), Just("/*"), Just("."), Just(";"), Just("++"),
        ],
        0..40,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn arbitrary_bytes_never_panic(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES),
    ) {
        let session = Session::default();
        let _ = SourceFragment::from_bytes(&bytes).and_then(|fragment| session.classify(&fragment));
    }

    #[test]
    fn classification_is_idempotent(input in go_fragment()) {
        let session = Session::default();
        prop_assert_eq!(session.classify_str(&input), session.classify_str(&input));
    }

    #[test]
    fn never_both_eof_and_syntax_error(input in go_fragment()) {
        if let Ok(classification) = Session::default().classify_str(&input) {
            prop_assert_ne!(classification.result().flags(), (true, true));
        }
    }

    #[test]
    fn classification_matches_exactly_one_outcome(input in go_fragment()) {
        match Session::default().classify_str(&input) {
            Ok(classification) => {
                let outcomes = [
                    classification.is_complete(),
                    classification.is_eof(),
                    classification.is_syntax_error(),
                ];
                prop_assert_eq!(outcomes.iter().filter(|hit| **hit).count(), 1);
            }
            Err(ClassifyError::InternalFault(_)) => {}
            Err(ClassifyError::MalformedInput(diagnostic)) => {
                prop_assert!(false, "generated text is well encoded: {diagnostic:?}");
            }
        }
    }

    #[test]
    fn syntax_errors_survive_any_suffix(
        prefix in proptest::sample::select(SYNTAX_ERROR_PREFIXES),
        suffix in "[ -~\n]{0,32}",
    ) {
        let input = format!("{prefix}{suffix}");
        match Session::default().classify_str(&input) {
            Ok(classification) => prop_assert!(
                classification.is_syntax_error(),
                "{input:?} lost its syntax error"
            ),
            Err(error) => prop_assert!(!error.is_malformed_input()),
        }
    }
}
