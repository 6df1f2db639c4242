use tracing::{debug, info};

use super::effect::SideEffect;
use super::event::{Event, RoundCommand, Utterance};
use super::recognition::{RecognitionSession, SessionOutput, SpeechSource};
use super::round::{RoundMachine, RoundOutcome, RoundStatus};
use super::speech::{PhraseMatcher, StatementVerdict};
use super::telemetry::event::{FaultKind, TelemetryEvent};
use super::telemetry::recorder::TelemetryRecorder;
use super::time::{Tick, Timestamp};
use crate::config::GameConfig;
use crate::services::phrase::Twister;

/// Single owner of all mutable game state.
///
/// Recognition events, player commands and timer polls are all applied
/// through `tick_step`, one batch at a time, so dedup and scoring order is
/// exactly the arrival order.
pub struct Reactor<S: SpeechSource> {
    pub session: RecognitionSession<S>,
    pub matcher: PhraseMatcher,
    pub round: RoundMachine,
    pub telemetry: TelemetryRecorder,
    pub tick: Tick,
    phrase: Option<Twister>,
    last_seconds_shown: Option<u64>,
}

impl<S: SpeechSource> Reactor<S> {
    pub fn new(source: S, config: GameConfig) -> Self {
        Self {
            session: RecognitionSession::new(source, config.restart_delay, config.max_auto_restarts),
            matcher: PhraseMatcher::new(config.dedup_bucket_ms),
            round: RoundMachine::new(config.target_score, config.round_duration),
            telemetry: TelemetryRecorder::new(),
            tick: Tick::new(),
            phrase: None,
            last_seconds_shown: None,
        }
    }

    pub fn phrase(&self) -> Option<&Twister> {
        self.phrase.as_ref()
    }

    /// Advances the kernel by one step. Returns SideEffects to be executed by the driver.
    /// MUST NOT await I/O or timers.
    ///
    /// The round timer is evaluated before the batch so that statements
    /// delivered after the deadline cannot score.
    pub fn tick_step(&mut self, events: Vec<Event>, now: Timestamp) -> Vec<SideEffect> {
        self.tick = self.tick.next();
        let mut effects = Vec::new();

        // === 1. TIMER ===
        self.poll_timer(now, &mut effects);

        // === 2. EVENTS (arrival order) ===
        for event in events {
            match event {
                Event::Speech(speech) => {
                    let outputs = self.session.handle(speech, now);
                    self.absorb(outputs, now, &mut effects);
                }
                Event::Command(command) => self.on_command(command, now, &mut effects),
                Event::PhraseReady(twister) => self.set_phrase(twister, now, &mut effects),
            }
        }

        // === 3. RESTARTS ===
        let outputs = self.session.poll(now);
        self.absorb(outputs, now, &mut effects);

        effects
    }

    /// Installs a new target phrase. Any running round is abandoned.
    fn set_phrase(&mut self, twister: Twister, now: Timestamp, effects: &mut Vec<SideEffect>) {
        info!("New phrase ({:?}, {}): {}", twister.difficulty, twister.theme, twister.text);
        if twister.is_fallback() {
            self.telemetry.record(TelemetryEvent::PhraseFallback);
        }

        self.end_round(now, effects);
        self.matcher.set_target(&twister.text);
        effects.push(SideEffect::PhraseChanged(twister.clone()));
        self.phrase = Some(twister);
    }

    fn on_command(&mut self, command: RoundCommand, now: Timestamp, effects: &mut Vec<SideEffect>) {
        debug!("Command: {:?}", command);

        match command {
            RoundCommand::Start => self.start_round(now, effects),
            RoundCommand::RetrySame => {
                self.end_round(now, effects);
                self.matcher.reset();
            }
            RoundCommand::NextPhrase(difficulty) => {
                self.end_round(now, effects);
                effects.push(SideEffect::RequestPhrase(difficulty));
            }
            RoundCommand::Stop => self.end_round(now, effects),
        }
    }

    fn start_round(&mut self, now: Timestamp, effects: &mut Vec<SideEffect>) {
        if self.matcher.normalized_target().is_empty() {
            effects.push(SideEffect::Log("No phrase to play yet".to_string()));
            return;
        }

        let before = self.round.status();
        if before == RoundStatus::Playing {
            // Manual retry after a recognizer fault; the round keeps its clock.
            let outputs = self.session.start();
            self.absorb(outputs, now, effects);
            return;
        }
        if self.round.start(now).is_none() {
            effects.push(SideEffect::Log(format!("Cannot start a round while {:?}", before)));
            return;
        }
        self.record_round_transition(before);

        self.last_seconds_shown = None;
        let outputs = self.session.start();
        self.absorb(outputs, now, effects);
    }

    /// Back to Idle and stop listening. Safe to call in any state.
    fn end_round(&mut self, now: Timestamp, effects: &mut Vec<SideEffect>) {
        let before = self.round.status();
        if self.round.reset() {
            self.record_round_transition(before);
        }
        self.last_seconds_shown = None;

        let outputs = self.session.stop();
        self.absorb(outputs, now, effects);
    }

    fn poll_timer(&mut self, now: Timestamp, effects: &mut Vec<SideEffect>) {
        let before = self.round.status();
        let outcome = self.round.tick(now);

        if before == RoundStatus::Playing {
            let seconds_left = self.round.state().seconds_left();
            if self.last_seconds_shown != Some(seconds_left) {
                self.last_seconds_shown = Some(seconds_left);
                effects.push(SideEffect::TimerUpdated { seconds_left });
            }
        }

        if let Some(outcome) = outcome {
            self.record_round_transition(before);
            self.finish_round(outcome, now, effects);
        }
    }

    fn absorb(&mut self, outputs: Vec<SessionOutput>, now: Timestamp, effects: &mut Vec<SideEffect>) {
        for output in outputs {
            match output {
                SessionOutput::TranscriptUpdated(text) => effects.push(SideEffect::TranscriptUpdated(text)),
                SessionOutput::FinalUtterance(utterance) => self.process_utterance(utterance, now, effects),
                SessionOutput::StateChanged { from, to } => {
                    self.telemetry.record(TelemetryEvent::SessionTransition { from, to, tick: self.tick });
                }
                SessionOutput::RestartScheduled { attempt, delay } => {
                    self.telemetry.record(TelemetryEvent::RestartScheduled {
                        attempt,
                        delay_ms: delay.as_millis() as u64,
                    });
                    effects.push(SideEffect::Log(format!(
                        "Recognizer ended; restart #{} in {}ms",
                        attempt,
                        delay.as_millis()
                    )));
                }
                SessionOutput::ListeningStarted => self.matcher.reset(),
                SessionOutput::Fault(err) => {
                    self.telemetry.record(TelemetryEvent::RecognitionFault { kind: FaultKind::from(&err) });
                    effects.push(SideEffect::RecognitionFault(err));
                }
            }
        }
    }

    /// Dedup -> match -> score.
    fn process_utterance(&mut self, utterance: Utterance, now: Timestamp, effects: &mut Vec<SideEffect>) {
        match self.matcher.evaluate(&utterance.raw_text, utterance.arrival) {
            StatementVerdict::Blank => {}
            StatementVerdict::Duplicate => {
                debug!("Suppressed duplicate statement");
                self.telemetry.record(TelemetryEvent::DuplicateSuppressed);
            }
            StatementVerdict::Evaluated { is_match } => {
                self.telemetry.record(TelemetryEvent::StatementProcessed { matched: is_match });
                effects.push(SideEffect::StatementSpoken {
                    text: utterance.raw_text.clone(),
                    is_match,
                });

                let before = self.round.status();
                if let Some(outcome) = self.round.record_statement(&utterance.raw_text, is_match, utterance.arrival) {
                    self.record_round_transition(before);
                    self.finish_round(outcome, now, effects);
                }
            }
        }
    }

    /// Round reached Success or Failed: report once and stop listening.
    fn finish_round(&mut self, outcome: RoundOutcome, now: Timestamp, effects: &mut Vec<SideEffect>) {
        effects.push(SideEffect::RoundFinished(outcome));
        let outputs = self.session.stop();
        self.absorb(outputs, now, effects);
    }

    fn record_round_transition(&mut self, from: RoundStatus) {
        let to = self.round.status();
        if from != to {
            self.telemetry.record(TelemetryEvent::RoundTransition { from, to, tick: self.tick });
        }
    }
}
