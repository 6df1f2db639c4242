mod common;

use common::{at, final_text, playing_reactor};
use twister::config::GameConfig;
use twister::kernel::event::{Event, SpeechEvent};
use twister::kernel::telemetry::event::{FaultKind, TelemetryEvent};
use twister::services::phrase::Twister;

#[test]
fn test_statement_and_round_counters() {
    let mut reactor = playing_reactor("Red lorry, yellow lorry.", GameConfig::default(), 0);

    reactor.tick_step(vec![final_text("blue bus")], at(500));
    for i in 0..5u64 {
        reactor.tick_step(
            vec![final_text("red lorry yellow lorry"), final_text("red lorry yellow lorry")],
            at(1_000 + i * 2_000),
        );
    }

    let snap = reactor.telemetry.snapshot();
    assert_eq!(snap.statement_stats.processed, 6);
    assert_eq!(snap.statement_stats.matched, 5);
    // The last copy arrives after the win stopped listening.
    assert_eq!(snap.statement_stats.duplicates, 4);
    assert!((snap.statement_stats.match_rate - 5.0 / 6.0).abs() < 1e-9);
    assert_eq!(snap.round_stats.started, 1);
    assert_eq!(snap.round_stats.won, 1);
    assert_eq!(snap.round_stats.lost, 0);
}

#[test]
fn test_restart_and_fault_counters() {
    let mut reactor = playing_reactor("Red lorry, yellow lorry.", GameConfig::default(), 0);

    reactor.tick_step(vec![Event::Speech(SpeechEvent::Ended)], at(1_000));
    reactor.tick_step(vec![Event::Speech(SpeechEvent::Error("not-allowed".into()))], at(2_000));

    let snap = reactor.telemetry.snapshot();
    assert_eq!(snap.session_stats.restarts, 1);
    assert_eq!(snap.session_stats.total_restart_delay_ms, 250);
    assert_eq!(snap.session_stats.faults, 1);
    assert_eq!(snap.session_stats.permission_faults, 1);
    assert!(reactor
        .telemetry
        .events()
        .any(|e| matches!(e, TelemetryEvent::RecognitionFault { kind: FaultKind::PermissionDenied })));
}

#[test]
fn test_fallback_phrase_is_counted() {
    let mut reactor = playing_reactor("Red lorry, yellow lorry.", GameConfig::default(), 0);

    reactor.tick_step(vec![Event::PhraseReady(Twister::fallback())], at(1_000));

    assert_eq!(reactor.telemetry.snapshot().phrase_fallbacks, 1);
    assert_eq!(reactor.telemetry.snapshot().round_stats.started, 1);
}

#[test]
fn test_events_carry_no_spoken_text() {
    let mut reactor = playing_reactor("Red lorry, yellow lorry.", GameConfig::default(), 0);

    reactor.tick_step(vec![final_text("zebra quokka platypus")], at(1_000));
    reactor.tick_step(vec![final_text("red lorry yellow lorry")], at(3_000));

    for event in reactor.telemetry.events() {
        let json = serde_json::to_string(event).unwrap();
        assert!(!json.contains("zebra"), "telemetry leaked user content: {}", json);
        assert!(!json.contains("lorry"), "telemetry leaked the target phrase: {}", json);
    }
}
