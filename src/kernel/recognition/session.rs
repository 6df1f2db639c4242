use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use super::error::{EngineError, RecognitionError};
use super::source::SpeechSource;
use crate::kernel::event::{ResultBatch, SpeechEvent, Utterance};
use crate::kernel::time::Timestamp;

/// Observable state of the recognizer as the kernel understands it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SessionState {
    Stopped,
    /// Start issued, engine has not confirmed yet.
    Starting,
    Recording,
    /// Terminal until an explicit `start()`. The cause is in `last_error`.
    Error,
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Stopped
    }
}

/// Inputs to the session state graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionSignal {
    StartRequested,
    /// Engine said it was already running when asked to start.
    AlreadyRunning,
    EngineStarted,
    EngineEnded,
    StopRequested,
    FatalFault,
}

pub struct SessionGraph;

impl SessionGraph {
    /// Pure function: (Current State, Signal) -> New State.
    /// Returns None when the signal leaves the state unchanged.
    pub fn transition(current: SessionState, signal: SessionSignal) -> Option<SessionState> {
        use SessionSignal::*;
        use SessionState::*;

        match (current, signal) {
            (Stopped, StartRequested) | (Error, StartRequested) => Some(Starting),

            (Starting, AlreadyRunning) => Some(Recording),
            (Starting, EngineStarted) => Some(Recording),

            (Starting, EngineEnded) | (Recording, EngineEnded) => Some(Stopped),

            (Starting, StopRequested) | (Recording, StopRequested) | (Error, StopRequested) => Some(Stopped),

            (Error, FatalFault) => None,
            (_, FatalFault) => Some(Error),

            // Late Ended after stop, Started while already recording, etc.
            _ => None,
        }
    }
}

/// What one call into the session produced, in order.
#[derive(Debug, Clone, PartialEq)]
pub enum SessionOutput {
    /// Display-only interim text. Never matched, never deduplicated.
    TranscriptUpdated(String),
    /// Committed text to run through dedup and matching.
    FinalUtterance(Utterance),
    StateChanged { from: SessionState, to: SessionState },
    RestartScheduled { attempt: u32, delay: Duration },
    /// A start (manual or automatic) was issued to the engine.
    ListeningStarted,
    Fault(RecognitionError),
}

/// Explicit finite-state owner of the speech engine handle.
///
/// `desired_listening` records what the caller asked for, which is distinct
/// from what the engine is currently doing. Auto-restarts consult it when
/// they fire, not when they are scheduled.
pub struct RecognitionSession<S: SpeechSource> {
    source: S,
    state: SessionState,
    desired_listening: bool,
    restart_at: Option<Timestamp>,
    consecutive_restarts: u32,
    restart_delay: Duration,
    max_auto_restarts: u32,
    last_error: Option<RecognitionError>,
    /// The engine was told to stop and has not confirmed with `Ended` yet.
    stale_end_pending: bool,
}

impl<S: SpeechSource> RecognitionSession<S> {
    pub fn new(source: S, restart_delay: Duration, max_auto_restarts: u32) -> Self {
        Self {
            source,
            state: SessionState::Stopped,
            desired_listening: false,
            restart_at: None,
            consecutive_restarts: 0,
            restart_delay,
            max_auto_restarts,
            last_error: None,
            stale_end_pending: false,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn is_listening_desired(&self) -> bool {
        self.desired_listening
    }

    pub fn last_error(&self) -> Option<&RecognitionError> {
        self.last_error.as_ref()
    }

    pub fn pending_restart(&self) -> Option<Timestamp> {
        self.restart_at
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Caller wants to listen. No-op while already starting or recording.
    pub fn start(&mut self) -> Vec<SessionOutput> {
        let mut out = Vec::new();
        self.desired_listening = true;
        self.restart_at = None;

        if matches!(self.state, SessionState::Starting | SessionState::Recording) {
            return out;
        }

        self.consecutive_restarts = 0;
        self.last_error = None;
        self.issue_start(&mut out);
        out
    }

    /// Caller no longer wants to listen. Cancels any pending restart.
    pub fn stop(&mut self) -> Vec<SessionOutput> {
        let mut out = Vec::new();
        self.desired_listening = false;
        self.restart_at = None;

        if self.state == SessionState::Stopped {
            return out;
        }

        if matches!(self.state, SessionState::Starting | SessionState::Recording) {
            self.source.stop();
            self.stale_end_pending = true;
        }
        self.apply(SessionSignal::StopRequested, &mut out);
        out
    }

    /// Ingest one engine event.
    pub fn handle(&mut self, event: SpeechEvent, now: Timestamp) -> Vec<SessionOutput> {
        let mut out = Vec::new();

        match event {
            SpeechEvent::Started => {
                self.consecutive_restarts = 0;
                self.stale_end_pending = false;
                self.apply(SessionSignal::EngineStarted, &mut out);
            }
            SpeechEvent::Ended => self.on_ended(now, &mut out),
            SpeechEvent::Result(batch) => self.on_result(batch, now, &mut out),
            SpeechEvent::Error(code) => self.on_error(RecognitionError::from_code(&code), &mut out),
        }

        out
    }

    /// Fires a due restart. Called on every kernel tick.
    pub fn poll(&mut self, now: Timestamp) -> Vec<SessionOutput> {
        let mut out = Vec::new();

        let Some(due) = self.restart_at else {
            return out;
        };
        if now < due {
            return out;
        }
        self.restart_at = None;

        if !self.desired_listening {
            debug!("Dropping restart: listening no longer desired");
            return out;
        }
        if self.state != SessionState::Stopped {
            return out;
        }

        info!("Restarting recognizer (attempt {})", self.consecutive_restarts);
        self.issue_start(&mut out);
        out
    }

    fn issue_start(&mut self, out: &mut Vec<SessionOutput>) {
        self.apply(SessionSignal::StartRequested, out);
        out.push(SessionOutput::ListeningStarted);

        match self.source.start() {
            Ok(()) => {}
            Err(EngineError::AlreadyStarted) => {
                debug!("Recognizer reported double start; treating as running");
                self.apply(SessionSignal::AlreadyRunning, out);
            }
            Err(err) => {
                warn!("Recognizer start failed: {}", err);
                self.fail(RecognitionError::from(err), out);
            }
        }
    }

    fn on_ended(&mut self, now: Timestamp, out: &mut Vec<SessionOutput>) {
        if self.stale_end_pending {
            self.stale_end_pending = false;
            // Belongs to the engine run that was stopped, not the one starting now.
            if self.state != SessionState::Recording {
                debug!("Ignoring Ended from a stopped engine run");
                return;
            }
        }

        self.apply(SessionSignal::EngineEnded, out);

        if !self.desired_listening || self.state != SessionState::Stopped {
            return;
        }

        if self.consecutive_restarts >= self.max_auto_restarts {
            warn!("Recognizer keeps ending; giving up after {} restarts", self.consecutive_restarts);
            self.fail(
                RecognitionError::RestartLimit { attempts: self.consecutive_restarts },
                out,
            );
            return;
        }

        self.consecutive_restarts += 1;
        let backoff = 1u32 << (self.consecutive_restarts - 1).min(4);
        let delay = self.restart_delay * backoff;
        self.restart_at = Some(now.after(delay));
        out.push(SessionOutput::RestartScheduled {
            attempt: self.consecutive_restarts,
            delay,
        });
    }

    fn on_result(&mut self, batch: ResultBatch, now: Timestamp, out: &mut Vec<SessionOutput>) {
        if !self.desired_listening {
            debug!("Ignoring result batch while not listening");
            return;
        }
        // Some engines deliver results before announcing start.
        if self.state == SessionState::Starting {
            self.apply(SessionSignal::EngineStarted, out);
        }

        let mut interim = String::new();
        for result in batch.results.iter().skip(batch.result_index) {
            let Some(text) = result.transcript() else {
                continue;
            };

            if result.is_final {
                if text.trim().is_empty() {
                    continue;
                }
                out.push(SessionOutput::FinalUtterance(Utterance {
                    raw_text: text.trim().to_string(),
                    is_final: true,
                    arrival: now,
                }));
            } else {
                interim.push_str(text);
            }
        }

        let interim = interim.trim();
        if !interim.is_empty() {
            out.push(SessionOutput::TranscriptUpdated(interim.to_string()));
        }
    }

    fn on_error(&mut self, err: RecognitionError, out: &mut Vec<SessionOutput>) {
        if err.is_benign() {
            debug!("Benign recognizer error: {}", err);
            return;
        }

        warn!("Recognizer error: {}", err);
        self.fail(err, out);
    }

    /// User-visible errors end the session. Network errors are not fatal in
    /// kind, but they still wait for the player to act before retrying.
    fn fail(&mut self, err: RecognitionError, out: &mut Vec<SessionOutput>) {
        self.desired_listening = false;
        self.restart_at = None;
        if matches!(self.state, SessionState::Starting | SessionState::Recording) {
            self.source.stop();
            self.stale_end_pending = true;
        }
        self.last_error = Some(err.clone());
        self.apply(SessionSignal::FatalFault, out);
        out.push(SessionOutput::Fault(err));
    }

    fn apply(&mut self, signal: SessionSignal, out: &mut Vec<SessionOutput>) {
        if let Some(next) = SessionGraph::transition(self.state, signal) {
            let from = self.state;
            self.state = next;
            debug!("Recognition session {:?} -> {:?}", from, next);
            out.push(SessionOutput::StateChanged { from, to: next });
        }
    }
}
