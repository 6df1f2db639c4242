use std::time::Duration;

use twister::kernel::round::{RoundMachine, RoundOutcome, RoundStatus};
use twister::kernel::time::Timestamp;

fn at(ms: u64) -> Timestamp {
    Timestamp::from_millis(ms)
}

fn machine() -> RoundMachine {
    RoundMachine::new(5, Duration::from_secs(60))
}

#[test]
fn test_start_resets_score_and_timer() {
    let mut round = machine();
    assert_eq!(round.status(), RoundStatus::Idle);

    let id = round.start(at(1_000));
    assert!(id.is_some());
    assert_eq!(round.status(), RoundStatus::Playing);
    assert_eq!(round.score(), 0);
    assert_eq!(round.time_left(), Duration::from_secs(60));

    assert!(round.start(at(2_000)).is_none(), "only Idle can start");
}

#[test]
fn test_success_fires_exactly_once() {
    let mut round = machine();
    round.start(at(0));

    let mut outcomes = Vec::new();
    for i in 0..8u64 {
        if let Some(outcome) = round.record_statement("red lorry yellow lorry", true, at(1_000 + i * 2_000)) {
            outcomes.push(outcome);
        }
    }

    assert_eq!(outcomes.len(), 1);
    assert!(matches!(outcomes[0], RoundOutcome::Won { score: 5, .. }));
    assert_eq!(round.status(), RoundStatus::Success);
    assert_eq!(round.score(), 5, "score frozen after success");
    assert_eq!(round.statements().len(), 5, "statements after the round are not logged");

    // A late timeout does not turn a win into a loss.
    assert!(round.tick(at(61_000)).is_none());
    assert_eq!(round.status(), RoundStatus::Success);
}

#[test]
fn test_timeout_fails_with_zero_left() {
    let mut round = machine();
    round.start(at(0));

    assert!(round.tick(at(59_999)).is_none());
    assert_eq!(round.status(), RoundStatus::Playing);
    assert_eq!(round.state().seconds_left(), 1);

    let outcome = round.tick(at(60_000));
    assert!(matches!(outcome, Some(RoundOutcome::Lost { score: 0, .. })));
    assert_eq!(round.status(), RoundStatus::Failed);
    assert!(round.time_left().is_zero());

    assert!(round.tick(at(70_000)).is_none(), "Failed fires once");
}

#[test]
fn test_timer_follows_wall_clock_not_tick_count() {
    let mut round = machine();
    round.start(at(10_000));

    // One late tick after a long host pause.
    round.tick(at(55_000));
    assert_eq!(round.time_left(), Duration::from_secs(15));

    // Many rapid ticks do not speed the clock up.
    for _ in 0..100 {
        round.tick(at(55_050));
    }
    assert_eq!(round.time_left(), Duration::from_millis(14_950));
    assert_eq!(round.state().seconds_left(), 15);
}

#[test]
fn test_misses_are_logged_but_not_scored() {
    let mut round = machine();
    round.start(at(0));

    round.record_statement("blue bus", false, at(1_000));
    round.record_statement("red lorry yellow lorry", true, at(2_000));

    assert_eq!(round.score(), 1);
    let log = round.statements();
    assert_eq!(log.len(), 2);
    assert_eq!(log[0].text, "blue bus");
    assert!(!log[0].is_match);
    assert!(log[1].is_match);
    assert_eq!(log[1].timestamp, at(2_000));
}

#[test]
fn test_statements_outside_playing_are_ignored() {
    let mut round = machine();

    assert!(round.record_statement("red lorry", true, at(0)).is_none());
    assert_eq!(round.score(), 0);
    assert!(round.statements().is_empty());
}

#[test]
fn test_recent_statements_view_is_bounded() {
    let mut round = RoundMachine::new(100, Duration::from_secs(60));
    round.start(at(0));

    for i in 0..12u64 {
        round.record_statement(&format!("attempt {}", i), false, at(i * 100));
    }

    assert_eq!(round.statements().len(), 12, "full log retained");
    let recent = round.recent_statements();
    assert_eq!(recent.len(), 10);
    assert_eq!(recent[0].text, "attempt 2");
    assert_eq!(recent[9].text, "attempt 11");
}

#[test]
fn test_reset_and_replay() {
    let mut round = machine();
    let first = round.start(at(0)).unwrap();
    for i in 0..5u64 {
        round.record_statement("red lorry", true, at(i * 2_000));
    }
    assert_eq!(round.status(), RoundStatus::Success);

    assert!(round.reset());
    assert_eq!(round.status(), RoundStatus::Idle);
    assert_eq!(round.score(), 0);
    assert!(round.statements().is_empty());
    assert_eq!(round.time_left(), Duration::from_secs(60));
    assert!(!round.reset(), "already Idle");

    let second = round.start(at(100_000)).unwrap();
    assert_ne!(first, second);

    // Success can fire again in the new round.
    let mut won = 0;
    for i in 0..5u64 {
        if round.record_statement("red lorry", true, at(100_000 + i * 2_000)).is_some() {
            won += 1;
        }
    }
    assert_eq!(won, 1);
}

#[test]
fn test_state_version_counts_mutations() {
    let mut round = machine();
    let v0 = round.state().version;

    round.start(at(0));
    round.record_statement("red lorry", true, at(10));

    // Started + Statement + Scored
    assert_eq!(round.state().version, v0 + 3);
}
