use gifront::repl::{History, HistoryRange};

fn history_of(lines: &[&str]) -> History {
    let mut history = History::new(None);
    for line in lines {
        history.record(line);
    }
    history
}

#[test]
fn statements_are_recorded_line_by_line() {
    let mut history = History::new(None);
    history.record("if x {\n\tx++\n}\n");
    assert_eq!(history.entries(), ["if x {", "\tx++", "}"]);
    assert_eq!(history.get(1), Some("if x {"));
    assert_eq!(history.get(0), None);
    assert_eq!(history.get(4), None);
}

#[test]
fn limit_drops_the_oldest_entries() {
    let mut history = History::new(Some(3));
    for line in ["a", "b", "c", "d"] {
        history.record(line);
    }
    assert_eq!(history.entries(), ["b", "c", "d"]);
}

#[test]
fn replay_joins_selected_entries() {
    let history = history_of(&["a := 1", "b := 2", "c := 3"]);
    assert_eq!(
        history
            .replay(HistoryRange::span(Some(2), None))
            .expect("range is valid"),
        "b := 2\nc := 3"
    );
    assert_eq!(
        history
            .replay(HistoryRange::span(None, Some(1)))
            .expect("range is valid"),
        "a := 1"
    );
}

#[test]
fn out_of_range_selections_are_rejected() {
    let history = history_of(&["a", "b"]);
    let error = history
        .replay(HistoryRange::single(5))
        .expect_err("entry 5 does not exist");
    assert_eq!(
        error.to_string(),
        "bad history request: entry 5 out of range (history has 2)"
    );
    let error = history
        .replay(HistoryRange::span(Some(2), Some(1)))
        .expect_err("range is reversed");
    assert_eq!(error.to_string(), "bad history request: end before beginning");
    assert!(history.replay(HistoryRange::single(0)).is_err());
    assert!(History::new(None).replay(HistoryRange::span(None, None)).is_err());
}

#[test]
fn remove_returns_resolved_bounds() {
    let mut history = history_of(&["a", "b", "c", "d"]);
    assert_eq!(
        history
            .remove(HistoryRange::span(Some(2), Some(3)))
            .expect("range is valid"),
        (2, 3)
    );
    assert_eq!(history.entries(), ["a", "d"]);
    assert_eq!(
        history
            .remove(HistoryRange::span(None, None))
            .expect("range is valid"),
        (1, 2)
    );
    assert!(history.is_empty());
}

#[test]
fn listing_is_numbered() {
    let mut history = History::new(None);
    assert_eq!(history.render(), "history: empty");
    history.record("x := 1");
    history.record("y := 2");
    assert_eq!(history.render(), "history:\n001: x := 1\n002: y := 2");
    history.clear();
    assert_eq!(history.len(), 0);
}

#[test]
fn ranges_parse_open_ends() {
    assert_eq!(
        HistoryRange::parse(" 4 ").expect("valid entry"),
        HistoryRange::single(4)
    );
    assert!(!HistoryRange::parse("4").expect("valid entry").is_range());
    assert!(HistoryRange::parse("-").expect("open range").is_range());
    let error = HistoryRange::parse("x").expect_err("not a number");
    assert_eq!(
        error.to_string(),
        "bad history request: could not convert 'x' to an entry number"
    );
}
