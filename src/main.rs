use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use twister::config::{GameConfig, PhraseServiceConfig};
use twister::input::console::{run_stdin_reader, ConsoleSpeechSource};
use twister::kernel::effect::SideEffect;
use twister::kernel::event::Event;
use twister::kernel::time::Timestamp;
use twister::outputs::console::render;
use twister::services::phrase::{Difficulty, PhraseService};
use twister::Reactor;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 1. Setup Logging
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::from_default_env())
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let difficulty = match std::env::args().nth(1) {
        Some(arg) => arg.parse::<Difficulty>().map_err(anyhow::Error::msg)?,
        None => Difficulty::default(),
    };

    tracing::info!("Tongue twister kernel booting ({})...", difficulty);

    // 2. Setup Reactor + Channels
    let config = GameConfig::default();
    let (tx, mut rx) = mpsc::channel::<Event>(100);
    let mut reactor = Reactor::new(ConsoleSpeechSource::new(tx.clone()), config.clone());
    let phrases = PhraseService::new(PhraseServiceConfig::from_env());
    let shutdown = CancellationToken::new();

    // 3. First phrase
    request_phrase(&phrases, difficulty, tx.clone());

    // 4. Input Reader (Stdin)
    tokio::spawn(run_stdin_reader(tx.clone(), shutdown.clone()));

    {
        let shutdown = shutdown.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                shutdown.cancel();
            }
        });
    }

    println!("Commands: /start /retry /next [easy|medium|hard] /stop /quit. Anything else counts as speech.");

    let mut cadence = tokio::time::interval(config.tick_interval);
    cadence.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

    tracing::info!("Kernel loop active.");

    loop {
        tokio::select! {
            _ = shutdown.cancelled() => break,
            _ = cadence.tick() => {}
        }

        // 1. Drain Events
        let mut events = Vec::new();
        while let Ok(event) = rx.try_recv() {
            events.push(event);
        }

        // 2. Kernel Step
        let effects = reactor.tick_step(events, Timestamp::now());

        // 3. Handle Side Effects
        for effect in effects {
            if let Some(line) = render(&effect) {
                println!("{}", line);
            }

            match effect {
                SideEffect::Log(msg) => tracing::info!("{}", msg),
                SideEffect::RequestPhrase(difficulty) => request_phrase(&phrases, difficulty, tx.clone()),
                _ => {}
            }
        }
    }

    let snapshot = reactor.telemetry.snapshot();
    tracing::info!(
        "Session summary: {} statements, {:.0}% matched, {} duplicates, {} won / {} lost, {} restarts",
        snapshot.statement_stats.processed,
        snapshot.statement_stats.match_rate * 100.0,
        snapshot.statement_stats.duplicates,
        snapshot.round_stats.won,
        snapshot.round_stats.lost,
        snapshot.session_stats.restarts,
    );
    if snapshot.session_stats.faults > 0 {
        tracing::warn!("{} recognizer faults this session", snapshot.session_stats.faults);
    }

    Ok(())
}

/// Phrase generation runs off the kernel timeline and re-enters as an event.
fn request_phrase(phrases: &PhraseService, difficulty: Difficulty, tx: mpsc::Sender<Event>) {
    let phrases = phrases.clone();
    tokio::spawn(async move {
        let twister = phrases.generate_twister(difficulty).await;
        if let Err(e) = tx.send(Event::PhraseReady(twister)).await {
            tracing::error!("Failed to deliver phrase: {}", e);
        }
    });
}
