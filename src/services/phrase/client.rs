use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{Difficulty, Twister};
use crate::config::PhraseServiceConfig;

#[derive(Debug, Error)]
pub enum PhraseError {
    #[error("phrase request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("phrase server returned {0}")]
    Status(StatusCode),
    #[error("phrase payload is not valid JSON: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("phrase payload incomplete: {0}")]
    Malformed(String),
}

/// HTTP client for a llama-server style `/completion` endpoint.
#[derive(Clone)]
pub struct PhraseService {
    client: Client,
    base_url: String,
}

#[derive(Serialize)]
struct CompletionRequest {
    prompt: String,
    stream: bool,
    n_predict: usize,
    temperature: f32,
    json_schema: serde_json::Value,
}

#[derive(Deserialize)]
struct CompletionResponse {
    content: String,
}

/// Generator output before validation. Every field is required in practice.
#[derive(Deserialize)]
struct RawTwister {
    text: Option<String>,
    difficulty: Option<String>,
    theme: Option<String>,
}

impl PhraseService {
    pub fn new(config: PhraseServiceConfig) -> Self {
        Self {
            client: Client::builder()
                .timeout(config.timeout)
                .build()
                .unwrap_or_default(),
            base_url: config.base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Never fails. Any transport, status or payload problem yields the
    /// fixed fallback phrase.
    pub async fn generate_twister(&self, difficulty: Difficulty) -> Twister {
        match self.try_generate(difficulty).await {
            Ok(twister) => twister,
            Err(e) => {
                warn!("Phrase generation failed, using fallback: {}", e);
                Twister::fallback()
            }
        }
    }

    pub async fn try_generate(&self, difficulty: Difficulty) -> Result<Twister, PhraseError> {
        let prompt = format!(
            "Write one original English tongue twister.\nDifficulty: {} ({}).\nReturn ONLY a JSON object with keys \"text\", \"difficulty\" and \"theme\".",
            difficulty,
            difficulty.prompt_hint()
        );

        let request_body = CompletionRequest {
            prompt,
            stream: false,
            n_predict: 96,
            temperature: 0.9,
            json_schema: json!({
                "type": "object",
                "properties": {
                    "text": { "type": "string" },
                    "difficulty": { "type": "string", "enum": ["Easy", "Medium", "Hard"] },
                    "theme": { "type": "string" }
                },
                "required": ["text", "difficulty", "theme"]
            }),
        };

        let response = self
            .client
            .post(format!("{}/completion", self.base_url))
            .json(&request_body)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(PhraseError::Status(response.status()));
        }

        let completion: CompletionResponse = response.json().await?;
        debug!("Phrase completion: {}", completion.content);
        parse_twister(&completion.content)
    }
}

/// Pulls the first JSON object out of model output and validates it.
pub fn parse_twister(content: &str) -> Result<Twister, PhraseError> {
    let start = content.find('{');
    let end = content.rfind('}');
    let body = match (start, end) {
        (Some(s), Some(e)) if s < e => &content[s..=e],
        _ => return Err(PhraseError::Malformed("no JSON object in completion".to_string())),
    };

    let raw: RawTwister = serde_json::from_str(body)?;

    let text = non_blank(raw.text).ok_or_else(|| PhraseError::Malformed("missing text".to_string()))?;
    let theme = non_blank(raw.theme).ok_or_else(|| PhraseError::Malformed("missing theme".to_string()))?;
    let difficulty = non_blank(raw.difficulty)
        .ok_or_else(|| PhraseError::Malformed("missing difficulty".to_string()))?
        .parse::<Difficulty>()
        .map_err(PhraseError::Malformed)?;

    Ok(Twister { text, difficulty, theme })
}

fn non_blank(field: Option<String>) -> Option<String> {
    field
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
