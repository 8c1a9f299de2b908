use gifront::front::{ClassificationResult, InternalFault, ParseOutcome, Verdict, classify_outcome};

fn outcome(reached: bool, mismatch: bool, well_formed: bool) -> ParseOutcome {
    ParseOutcome {
        reached_end_of_input: reached,
        saw_mismatch_before_eof: mismatch,
        tree_is_well_formed_statement: well_formed,
    }
}

#[test]
fn consistent_signals_map_to_one_verdict() {
    assert_eq!(
        classify_outcome(outcome(true, false, true)),
        Ok(ClassificationResult::COMPLETE)
    );
    assert_eq!(
        classify_outcome(outcome(true, false, false)),
        Ok(ClassificationResult::NEED_MORE_INPUT)
    );
    assert_eq!(
        classify_outcome(outcome(false, true, false)),
        Ok(ClassificationResult::SYNTAX_ERROR)
    );
}

#[test]
fn contradictory_signals_are_internal_faults() {
    for signals in [
        outcome(true, true, false),
        outcome(true, true, true),
        outcome(false, true, true),
        outcome(false, false, true),
        outcome(false, false, false),
    ] {
        assert_eq!(
            classify_outcome(signals),
            Err(InternalFault::ConflictingSignals { outcome: signals }),
            "signals {signals:?}"
        );
    }
}

#[test]
fn both_flags_cannot_be_constructed() {
    assert_eq!(
        ClassificationResult::new(true, true),
        Err(InternalFault::InvalidClassification)
    );
    assert_eq!(
        ClassificationResult::new(true, false),
        Ok(ClassificationResult::NEED_MORE_INPUT)
    );
}

#[test]
fn verdicts_follow_the_flags() {
    assert_eq!(ClassificationResult::COMPLETE.verdict(), Verdict::Complete);
    assert_eq!(
        ClassificationResult::NEED_MORE_INPUT.verdict(),
        Verdict::NeedMoreInput
    );
    assert_eq!(
        ClassificationResult::SYNTAX_ERROR.verdict(),
        Verdict::SyntaxError
    );
    assert!(ClassificationResult::COMPLETE.is_complete());
    assert_eq!(ClassificationResult::SYNTAX_ERROR.flags(), (false, true));
    assert_eq!(Verdict::NeedMoreInput.to_string(), "need-more-input");
}
