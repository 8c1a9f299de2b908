use gifront::lexer::{LexStep, Lexer, TokenKind};
use proptest::prelude::*;

const MAX_INPUT_BYTES: usize = 256;
const MAX_STEPS: usize = 2048;

fn go_like_text() -> impl Strategy<Value = String> {
    proptest::collection::vec(
        prop_oneof![
            Just("x"), Just("42"), Just("0x"), Just("1e"), Just("\""), Just("'"),
            Just("`"), Just("/*"), Just("*/"), Just("//"), Just("\n"), Just(" "),
            Just("+"), Just("++"), Just(":="), Just("{"), Just("}"), Just("("),
            Just(")"), Just("func"), Just("return"), Just("\\"), Just("_"), Just("."),
        ],
        0..64,
    )
    .prop_map(|parts| parts.concat())
}

proptest! {
    #[test]
    fn scanning_terminates_without_panicking(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES),
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let mut lexer = Lexer::new(&input);
        let mut steps = 0usize;

        loop {
            match lexer.next_token() {
                Ok(LexStep::EndOfInput) | Err(_) => break,
                Ok(_) => {}
            }
            steps += 1;
            prop_assert!(steps <= MAX_STEPS, "lexer did not terminate on {input:?}");
        }
    }

    #[test]
    fn token_spans_are_ordered_and_in_bounds(input in go_like_text()) {
        let mut lexer = Lexer::new(&input);
        let Ok(steps) = lexer.collect_steps() else {
            return Ok(());
        };

        let mut previous_end = 0usize;
        for step in &steps {
            let token = match step {
                LexStep::Token(token) | LexStep::Truncated(token, _) | LexStep::Invalid(token, _) => token,
                LexStep::Incomplete(_) | LexStep::EndOfInput => continue,
            };
            let start = token.span.start.as_usize();
            let end = token.span.end.as_usize();
            prop_assert!(start <= end);
            prop_assert!(end <= input.len());
            prop_assert!(start >= previous_end, "overlapping spans in {input:?}");
            if !matches!(token.kind, TokenKind::Semicolon(_)) {
                prop_assert_eq!(&input[start..end], token.lexeme.as_str());
            }
            previous_end = end;
        }
    }

    #[test]
    fn truncation_only_happens_at_the_end(input in go_like_text()) {
        let mut lexer = Lexer::new(&input);
        let Ok(steps) = lexer.collect_steps() else {
            return Ok(());
        };

        for (index, step) in steps.iter().enumerate() {
            if matches!(step, LexStep::Truncated(..) | LexStep::Incomplete(_)) {
                prop_assert_eq!(index + 1, steps.len(), "steps after truncation in {:?}", input);
            }
        }
    }
}
