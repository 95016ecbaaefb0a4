//! Groq chat-completions streaming client
//!
//! Drives the OpenAI-compatible `/chat/completions` endpoint with
//! `stream: true` and yields the delta fragments as they arrive. The
//! response is server-sent events: `data: {json}` lines that may be split
//! across network chunks, terminated by `data: [DONE]`.

use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

use rigscan_common::{render, Error, HardwareProfile, Result, UsageProfile};

use crate::llm::{ChunkStream, RecommendationGenerator};

/// Groq OpenAI-compatible chat completions endpoint
const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";

/// Model used when the config does not override it
const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Sampling temperature; low for consistent, factual recommendations
const TEMPERATURE: f64 = 0.3;

/// Generation length cap
const MAX_TOKENS: u32 = 1024;

/// Connect timeout. No total request timeout: the response is an
/// open-ended stream and deadlines belong to the surrounding transport.
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Streaming recommendation client for the Groq API
pub struct GroqGenerator {
    http_client: Client,
    /// Credential is optional at construction and validated at first use,
    /// so the service can start without one and fail per-request instead.
    api_key: Option<String>,
    model: String,
}

impl GroqGenerator {
    /// Create a generator. `api_key` and `model` come from the resolved
    /// config; a missing model falls back to the default.
    pub fn new(api_key: Option<String>, model: Option<String>) -> Self {
        Self {
            http_client: Client::builder()
                .connect_timeout(CONNECT_TIMEOUT)
                .build()
                .unwrap_or_default(),
            api_key,
            model: model.unwrap_or_else(|| DEFAULT_MODEL.to_string()),
        }
    }

    fn api_key(&self) -> Result<&str> {
        match self.api_key.as_deref() {
            Some(key) if !key.trim().is_empty() => Ok(key),
            _ => Err(Error::Config(
                "Groq API key not configured. Set GROQ_API_KEY or groq_api_key \
                 in the rigscan config file."
                    .to_string(),
            )),
        }
    }
}

#[async_trait]
impl RecommendationGenerator for GroqGenerator {
    async fn open_stream(
        &self,
        profile: &HardwareProfile,
        usage: UsageProfile,
    ) -> Result<ChunkStream> {
        let api_key = self.api_key()?;
        let prompt = build_prompt(profile, usage);

        let body = ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: &prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
            stream: true,
        };

        debug!(model = %self.model, usage = %usage, "opening generation stream");

        let response = self
            .http_client
            .post(GROQ_API_URL)
            .bearer_auth(api_key.trim())
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Generation(format!("Groq request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Groq returned an error status");
            return Err(Error::Generation(format!(
                "Groq returned {status}: {body}"
            )));
        }

        let mut bytes = response.bytes_stream();
        let stream = async_stream::stream! {
            let mut buffer = String::new();
            while let Some(chunk) = bytes.next().await {
                let chunk = match chunk {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        yield Err(Error::Generation(format!("stream read failed: {e}")));
                        return;
                    }
                };
                buffer.push_str(&String::from_utf8_lossy(&chunk));

                // Events are newline-delimited; a network chunk may end
                // mid-line, so only complete lines are consumed.
                while let Some(pos) = buffer.find('\n') {
                    let line: String = buffer.drain(..=pos).collect();
                    match parse_sse_line(line.trim()) {
                        SseLine::Delta(text) => yield Ok(text),
                        SseLine::Done => return,
                        SseLine::Skip => {}
                    }
                }
            }
        };

        Ok(Box::pin(stream))
    }
}

enum SseLine {
    /// A content fragment to forward
    Delta(String),
    /// End-of-stream marker
    Done,
    /// Comment, empty delta, or noise
    Skip,
}

/// Interpret one complete SSE line from the completions stream.
fn parse_sse_line(line: &str) -> SseLine {
    let Some(data) = line.strip_prefix("data: ") else {
        return SseLine::Skip;
    };
    if data == "[DONE]" {
        return SseLine::Done;
    }
    match serde_json::from_str::<StreamChunk>(data) {
        Ok(parsed) => {
            let delta = parsed
                .choices
                .into_iter()
                .next()
                .and_then(|choice| choice.delta.content);
            match delta {
                Some(text) if !text.is_empty() => SseLine::Delta(text),
                _ => SseLine::Skip,
            }
        }
        Err(e) => {
            warn!(error = %e, "skipping unparseable stream event");
            SseLine::Skip
        }
    }
}

/// Build the generation prompt from the canonical profile.
///
/// The section skeleton is fixed so every report renders the same way in
/// the web client regardless of model mood.
fn build_prompt(profile: &HardwareProfile, usage: UsageProfile) -> String {
    let usage_context = match usage {
        UsageProfile::Gaming => "focused on gaming performance",
        UsageProfile::Work => "focused on productivity and work tasks",
        UsageProfile::ContentCreation => "focused on content creation and media production",
        UsageProfile::General => "for general computer use",
    };

    format!(
        "You are a PC hardware expert. Analyze this system and produce structured, \
concrete, actionable optimization recommendations {usage_context}, in Markdown.

{summary}

Output constraints (Markdown):
- Be factual, concise, and precise.
- Structure the answer with exactly these sections:

# Summary

# Quick Wins

# Settings & Drivers

# Upgrades

## Budget tier

## Mid tier

## High tier

# Expected Gains

Expected content:
- **Summary**: 2-3 sentences on overall condition (strengths/weaknesses).
- **Quick Wins**: 3-5 free, immediate actions as a bullet list, with the key action in **bold**.
- **Settings & Drivers**: 3-5 key settings or driver updates as a bullet list.
- **Upgrades**: up to 3 upgrades per budget tier suited to the usage profile, \
with price ranges and compatibility (yes/no).
- **Expected Gains**: a table with columns Tier, Upgrade, Average gain.

Important:
- If information is incomplete (e.g. no GPU detected), suggest what to verify.
- Adapt priorities to the usage profile.
- Never invent precise part references that were not detected; stay generic but useful.
",
        summary = render::profile_summary(profile),
    )
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    max_tokens: u32,
    stream: bool,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct StreamChunk {
    choices: Vec<StreamChoice>,
}

#[derive(Debug, Deserialize)]
struct StreamChoice {
    delta: StreamDelta,
}

#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}
