//! Summarization adapter: turns outcome records into one short paragraph
//! via an OpenAI-compatible chat-completions endpoint.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::LlmConfig;
use crate::errors::SummaryError;
use crate::graph::OutcomeSummary;

/// Returned without calling the service when there is nothing to summarize.
pub const NO_OUTCOMES_FALLBACK: &str = "No outcomes to summarize.";

/// Returned when the service answers with empty content.
pub const EMPTY_REPLY_FALLBACK: &str = "Unable to generate summary.";

const SUMMARY_PERSONA: &str = "You are an analyst summarizing decision outcomes. \
Be concise and insightful. Focus on patterns and key takeaways. \
Keep your response to 2-3 sentences.";

const SUMMARY_MAX_TOKENS: u32 = 150;

/// Seam to the external text-generation service.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, SummaryError>;
}

#[derive(Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

#[derive(Serialize, Deserialize)]
struct ChatMessage {
    role: String,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

/// Chat-completions client over `reqwest`. One instance lives for the
/// process; `reqwest::Client` pools connections internally.
pub struct OpenRouterClient {
    http: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
    model: String,
}

impl OpenRouterClient {
    /// Construction never fails; a missing API key surfaces per-call so the
    /// rest of the dashboard keeps working without one.
    pub fn new(config: &LlmConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        }
    }
}

#[async_trait]
impl TextGenerator for OpenRouterClient {
    async fn generate(
        &self,
        system: &str,
        user: &str,
        max_tokens: u32,
    ) -> Result<String, SummaryError> {
        let api_key = self.api_key.as_deref().ok_or(SummaryError::MissingApiKey)?;
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage {
                    role: "system".to_string(),
                    content: system.to_string(),
                },
                ChatMessage {
                    role: "user".to_string(),
                    content: user.to_string(),
                },
            ],
            max_tokens,
        };

        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .bearer_auth(api_key)
            .json(&request)
            .send()
            .await?
            .error_for_status()?;

        let reply: ChatResponse = response.json().await?;
        let content = reply
            .choices
            .into_iter()
            .next()
            .ok_or_else(|| SummaryError::UnexpectedResponse("no choices in reply".to_string()))?
            .message
            .content;
        Ok(content)
    }
}

/// Summarize outcome records into one short paragraph.
///
/// Empty input short-circuits to [`NO_OUTCOMES_FALLBACK`] without touching
/// the service; an empty reply becomes [`EMPTY_REPLY_FALLBACK`]. Service
/// failures propagate unchanged — no retries, the caller decides how to
/// degrade.
pub async fn summarize_outcomes(
    generator: &dyn TextGenerator,
    outcomes: &[OutcomeSummary],
) -> Result<String, SummaryError> {
    if outcomes.is_empty() {
        return Ok(NO_OUTCOMES_FALLBACK.to_string());
    }

    let digest = outcomes
        .iter()
        .map(outcome_line)
        .collect::<Vec<_>>()
        .join("\n");
    let prompt = format!("Summarize these outcomes from recent decisions:\n\n{digest}");

    let text = generator
        .generate(SUMMARY_PERSONA, &prompt, SUMMARY_MAX_TOKENS)
        .await?;
    if text.trim().is_empty() {
        Ok(EMPTY_REPLY_FALLBACK.to_string())
    } else {
        Ok(text)
    }
}

// Missing fields become literal placeholders so no line ever carries an
// empty fragment.
fn outcome_line(outcome: &OutcomeSummary) -> String {
    let name = outcome.outcome.as_deref().unwrap_or("Unknown outcome");
    let description = outcome.description.as_deref().unwrap_or("No description");
    let decisions = if outcome.decisions.is_empty() {
        "unknown".to_string()
    } else {
        outcome.decisions.join(", ")
    };
    format!("- {name}: {description} (from decisions: {decisions})")
}
