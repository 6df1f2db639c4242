use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};

use crate::kernel::event::{Event, ResultBatch, RoundCommand, SpeechEvent};
use crate::kernel::recognition::{EngineError, SpeechSource};
use crate::services::phrase::Difficulty;

/// Stand-in recognizer for terminals: typed lines play the role of
/// recognized speech. Lifecycle signals are echoed back through the kernel
/// channel the way a real engine would deliver them.
pub struct ConsoleSpeechSource {
    tx: mpsc::Sender<Event>,
    running: bool,
}

impl ConsoleSpeechSource {
    pub fn new(tx: mpsc::Sender<Event>) -> Self {
        Self { tx, running: false }
    }
}

impl SpeechSource for ConsoleSpeechSource {
    fn start(&mut self) -> Result<(), EngineError> {
        if self.running {
            return Err(EngineError::AlreadyStarted);
        }
        self.tx
            .try_send(Event::Speech(SpeechEvent::Started))
            .map_err(|e| EngineError::Unavailable(e.to_string()))?;
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        if !self.running {
            return;
        }
        self.running = false;
        if let Err(e) = self.tx.try_send(Event::Speech(SpeechEvent::Ended)) {
            error!("Failed to deliver Ended: {}", e);
        }
    }
}

/// What one typed line means.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsoleInput {
    Event(Event),
    Quit,
    Ignored,
}

/// Line grammar:
/// `/start`, `/retry`, `/stop`, `/next [easy|medium|hard]`, `/quit`,
/// `~text` for interim speech, `!code` for an engine error, anything else
/// is a final utterance.
pub fn parse_line(line: &str) -> ConsoleInput {
    let line = line.trim();
    if line.is_empty() {
        return ConsoleInput::Ignored;
    }

    if let Some(cmd) = line.strip_prefix('/') {
        let mut parts = cmd.split_whitespace();
        let command = match parts.next().unwrap_or("") {
            "start" => RoundCommand::Start,
            "retry" => RoundCommand::RetrySame,
            "stop" => RoundCommand::Stop,
            "next" => {
                let difficulty = parts
                    .next()
                    .and_then(|d| d.parse::<Difficulty>().ok())
                    .unwrap_or_default();
                RoundCommand::NextPhrase(difficulty)
            }
            "quit" | "exit" => return ConsoleInput::Quit,
            _ => return ConsoleInput::Ignored,
        };
        return ConsoleInput::Event(Event::Command(command));
    }

    if let Some(interim) = line.strip_prefix('~') {
        return ConsoleInput::Event(Event::Speech(SpeechEvent::Result(ResultBatch::single(interim, false))));
    }

    if let Some(code) = line.strip_prefix('!') {
        return ConsoleInput::Event(Event::Speech(SpeechEvent::Error(code.trim().to_string())));
    }

    ConsoleInput::Event(Event::Speech(SpeechEvent::Result(ResultBatch::single(line, true))))
}

/// Reads stdin until EOF, `/quit` or cancellation.
pub async fn run_stdin_reader(tx: mpsc::Sender<Event>, shutdown: CancellationToken) {
    let reader = BufReader::new(tokio::io::stdin());
    let mut lines = reader.lines();

    loop {
        let line = tokio::select! {
            _ = shutdown.cancelled() => break,
            line = lines.next_line() => line,
        };

        let line = match line {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!("Failed to read stdin: {}", e);
                break;
            }
        };

        match parse_line(&line) {
            ConsoleInput::Event(event) => {
                if let Err(e) = tx.send(event).await {
                    error!("Failed to send input: {}", e);
                    break;
                }
            }
            ConsoleInput::Quit => break,
            ConsoleInput::Ignored => {}
        }
    }

    info!("Console input closed");
    shutdown.cancel();
}
