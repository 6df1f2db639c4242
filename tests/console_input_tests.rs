use twister::input::console::{parse_line, ConsoleInput};
use twister::kernel::event::{Event, ResultBatch, RoundCommand, SpeechEvent};
use twister::kernel::effect::SideEffect;
use twister::kernel::round::RoundOutcome;
use twister::outputs::console::render;
use twister::services::phrase::Difficulty;

#[test]
fn test_commands() {
    assert!(matches!(parse_line("/start"), ConsoleInput::Event(Event::Command(RoundCommand::Start))));
    assert!(matches!(parse_line(" /retry "), ConsoleInput::Event(Event::Command(RoundCommand::RetrySame))));
    assert!(matches!(parse_line("/stop"), ConsoleInput::Event(Event::Command(RoundCommand::Stop))));
    assert!(matches!(
        parse_line("/next hard"),
        ConsoleInput::Event(Event::Command(RoundCommand::NextPhrase(Difficulty::Hard)))
    ));
    assert!(matches!(
        parse_line("/next"),
        ConsoleInput::Event(Event::Command(RoundCommand::NextPhrase(Difficulty::Medium)))
    ));
    assert_eq!(parse_line("/quit"), ConsoleInput::Quit);
    assert_eq!(parse_line("/dance"), ConsoleInput::Ignored);
    assert_eq!(parse_line("   "), ConsoleInput::Ignored);
}

#[test]
fn test_speech_lines() {
    match parse_line("red lorry yellow lorry") {
        ConsoleInput::Event(Event::Speech(SpeechEvent::Result(batch))) => {
            assert_eq!(batch, ResultBatch::single("red lorry yellow lorry", true));
        }
        other => panic!("unexpected {:?}", other),
    }

    match parse_line("~red lorry") {
        ConsoleInput::Event(Event::Speech(SpeechEvent::Result(batch))) => {
            assert!(!batch.results[0].is_final);
            assert_eq!(batch.results[0].transcript(), Some("red lorry"));
        }
        other => panic!("unexpected {:?}", other),
    }

    match parse_line("!not-allowed") {
        ConsoleInput::Event(Event::Speech(SpeechEvent::Error(code))) => assert_eq!(code, "not-allowed"),
        other => panic!("unexpected {:?}", other),
    }
}

#[test]
fn test_render_hides_internal_effects() {
    assert_eq!(render(&SideEffect::Log("internal".into())), None);
    assert_eq!(render(&SideEffect::RequestPhrase(Difficulty::Easy)), None);
    assert_eq!(render(&SideEffect::TimerUpdated { seconds_left: 37 }), None);
    assert_eq!(render(&SideEffect::TimerUpdated { seconds_left: 30 }), Some("  30s left".to_string()));

    let line = render(&SideEffect::StatementSpoken { text: "red lorry".into(), is_match: true }).unwrap();
    assert!(line.contains("+1"));

    let won = RoundOutcome::Won { round_id: uuid::Uuid::nil(), score: 5 };
    assert!(render(&SideEffect::RoundFinished(won)).unwrap().contains("5"));
}
