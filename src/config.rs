use std::time::Duration;

use crate::kernel::time::TICK_MS;

/// Points needed to win a round.
pub const TARGET_SCORE: u32 = 5;
/// Round length in seconds.
pub const ROUND_DURATION_SECS: u64 = 60;
/// Width of a dedup bucket.
pub const DEDUP_BUCKET_MS: u64 = 2_000;
/// Base delay before re-arming a recognizer that ended on its own.
pub const RESTART_DELAY_MS: u64 = 250;
/// Consecutive auto-restarts allowed without the engine reporting `Started`.
pub const MAX_AUTO_RESTARTS: u32 = 5;
/// Entries shown by the statement history view.
pub const STATEMENT_DISPLAY_LIMIT: usize = 10;

const DEFAULT_LLM_URL: &str = "http://localhost:8080";
const DEFAULT_LLM_TIMEOUT_MS: u64 = 5_000;

/// Game rules. Fixed at build time; `Default` is the only constructor the
/// driver uses. Tests build custom values directly.
#[derive(Debug, Clone)]
pub struct GameConfig {
    pub target_score: u32,
    pub round_duration: Duration,
    pub dedup_bucket_ms: u64,
    pub restart_delay: Duration,
    pub max_auto_restarts: u32,
    pub tick_interval: Duration,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            target_score: TARGET_SCORE,
            round_duration: Duration::from_secs(ROUND_DURATION_SECS),
            dedup_bucket_ms: DEDUP_BUCKET_MS,
            restart_delay: Duration::from_millis(RESTART_DELAY_MS),
            max_auto_restarts: MAX_AUTO_RESTARTS,
            tick_interval: Duration::from_millis(TICK_MS),
        }
    }
}

/// Where the phrase generator lives.
#[derive(Debug, Clone)]
pub struct PhraseServiceConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl Default for PhraseServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_LLM_URL.to_string(),
            timeout: Duration::from_millis(DEFAULT_LLM_TIMEOUT_MS),
        }
    }
}

impl PhraseServiceConfig {
    /// Reads `TWISTER_LLM_URL` and `TWISTER_LLM_TIMEOUT_MS`, falling back to
    /// defaults for anything unset or unparsable.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("TWISTER_LLM_URL") {
            let url = url.trim().trim_end_matches('/');
            if !url.is_empty() {
                config.base_url = url.to_string();
            }
        }

        if let Some(ms) = std::env::var("TWISTER_LLM_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.trim().parse::<u64>().ok())
        {
            config.timeout = Duration::from_millis(ms);
        }

        config
    }
}
