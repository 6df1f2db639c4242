#![allow(dead_code)]

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;

use twister::config::GameConfig;
use twister::kernel::event::{Event, ResultBatch, RoundCommand, SpeechEvent};
use twister::kernel::recognition::{EngineError, SpeechSource};
use twister::kernel::time::Timestamp;
use twister::services::phrase::{Difficulty, Twister};
use twister::Reactor;

/// Scripted recognizer that only counts what the kernel asks of it.
#[derive(Debug, Default)]
pub struct MockSpeechSource {
    pub starts: u32,
    pub stops: u32,
    pub running: bool,
    pub start_error: Option<EngineError>,
}

impl SpeechSource for MockSpeechSource {
    fn start(&mut self) -> Result<(), EngineError> {
        self.starts += 1;
        if let Some(err) = self.start_error.clone() {
            return Err(err);
        }
        if self.running {
            return Err(EngineError::AlreadyStarted);
        }
        self.running = true;
        Ok(())
    }

    fn stop(&mut self) {
        self.stops += 1;
        self.running = false;
    }
}

pub fn at(ms: u64) -> Timestamp {
    Timestamp::from_millis(ms)
}

pub fn sample_twister(text: &str) -> Twister {
    Twister {
        text: text.to_string(),
        difficulty: Difficulty::Easy,
        theme: "Test".to_string(),
    }
}

pub fn final_text(text: &str) -> Event {
    Event::Speech(SpeechEvent::Result(ResultBatch::single(text, true)))
}

pub fn interim_text(text: &str) -> Event {
    Event::Speech(SpeechEvent::Result(ResultBatch::single(text, false)))
}

pub fn command(cmd: RoundCommand) -> Event {
    Event::Command(cmd)
}

/// Reactor with `phrase` loaded, a round started at `start_ms` and the
/// recognizer confirmed as recording.
pub fn playing_reactor(phrase: &str, config: GameConfig, start_ms: u64) -> Reactor<MockSpeechSource> {
    let mut reactor = Reactor::new(MockSpeechSource::default(), config);
    reactor.tick_step(vec![Event::PhraseReady(sample_twister(phrase))], at(start_ms));
    reactor.tick_step(
        vec![command(RoundCommand::Start), Event::Speech(SpeechEvent::Started)],
        at(start_ms),
    );
    reactor
}

/// One-shot HTTP server answering a single request with `status` and `body`.
/// Returns the base URL.
pub async fn serve_once(status: &'static str, body: String) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        read_request(&mut socket).await;

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status,
            body.len(),
            body
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.ok();
    });

    format!("http://{}", addr)
}

/// Drains headers and a Content-Length body so closing does not reset the connection.
async fn read_request(socket: &mut tokio::net::TcpStream) {
    let mut buf = Vec::new();
    let mut chunk = [0u8; 1024];

    loop {
        let n = socket.read(&mut chunk).await.unwrap_or(0);
        if n == 0 {
            return;
        }
        buf.extend_from_slice(&chunk[..n]);

        let Some(header_end) = find(&buf, b"\r\n\r\n") else {
            continue;
        };
        let headers = String::from_utf8_lossy(&buf[..header_end]).to_ascii_lowercase();
        let content_length = headers
            .lines()
            .find_map(|l| l.strip_prefix("content-length:"))
            .and_then(|v| v.trim().parse::<usize>().ok())
            .unwrap_or(0);

        if buf.len() >= header_end + 4 + content_length {
            return;
        }
    }
}

fn find(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    haystack.windows(needle.len()).position(|w| w == needle)
}
