// Gemini generateContent client using reqwest.
//
// One non-streaming POST per scouting request, with the Google Search
// grounding tool enabled so the response carries citation metadata alongside
// the reply text. There is no retry loop and no queue; timeout policy is
// whatever the transport defaults to.

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::Config;
use crate::llm::{extract, prompt, ScoutError};
use crate::profile::PlayerProfile;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta";

// ---------------------------------------------------------------------------
// Wire types
// ---------------------------------------------------------------------------

/// Top-level shape of a generateContent response. Only the fields the
/// extractor needs are modeled; everything else is ignored.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct GenerateContentResponse {
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Candidate {
    #[serde(default)]
    pub content: Content,
    #[serde(default)]
    pub grounding_metadata: GroundingMetadata,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Content {
    #[serde(default)]
    pub parts: Vec<Part>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct Part {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct GroundingMetadata {
    #[serde(default)]
    pub grounding_chunks: Vec<GroundingChunk>,
}

/// One grounding reference candidate. Chunks without a `web` entry, or with
/// an empty uri or title, are dropped during extraction.
#[derive(Debug, Default, Deserialize)]
pub struct GroundingChunk {
    #[serde(default)]
    pub web: Option<WebSource>,
}

#[derive(Debug, Default, Deserialize)]
pub struct WebSource {
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub title: String,
}

impl GenerateContentResponse {
    /// Concatenated reply text of the first candidate plus its grounding
    /// chunks. Fails with `EmptyReply` when there is no candidate.
    fn into_text_and_grounding(mut self) -> Result<(String, Vec<GroundingChunk>), ScoutError> {
        if self.candidates.is_empty() {
            return Err(ScoutError::EmptyReply);
        }
        let candidate = self.candidates.swap_remove(0);
        let text: String = candidate
            .content
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        Ok((text, candidate.grounding_metadata.grounding_chunks))
    }
}

// ---------------------------------------------------------------------------
// GeminiClient
// ---------------------------------------------------------------------------

/// Low-level Gemini API client holding an explicit, injected API key.
/// There is no ambient credential lookup at call time.
pub struct GeminiClient {
    http: reqwest::Client,
    api_key: String,
    model: String,
    temperature: f64,
    max_output_tokens: u32,
    base_url: String,
}

impl GeminiClient {
    pub fn new(api_key: String, model: String, temperature: f64, max_output_tokens: u32) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            model,
            temperature,
            max_output_tokens,
            base_url: GEMINI_API_BASE.to_string(),
        }
    }

    /// Point the client at a different endpoint (tests use a local mock).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The generateContent request body: the scouting prompt, the Google
    /// Search grounding tool, and a low temperature favoring factual
    /// consistency. Building the request has no side effects.
    pub(crate) fn build_request_body(
        scout_prompt: &str,
        temperature: f64,
        max_output_tokens: u32,
    ) -> Value {
        serde_json::json!({
            "contents": [{ "role": "user", "parts": [{ "text": scout_prompt }] }],
            "tools": [{ "googleSearch": {} }],
            "generationConfig": {
                "temperature": temperature,
                "maxOutputTokens": max_output_tokens
            }
        })
    }

    /// Run one scouting request for `query` and extract the profile.
    pub async fn generate_profile(&self, query: &str) -> Result<PlayerProfile, ScoutError> {
        if self.api_key.is_empty() {
            return Err(ScoutError::MissingApiKey);
        }

        let scout_prompt = prompt::build_scout_prompt(query);
        let body =
            Self::build_request_body(&scout_prompt, self.temperature, self.max_output_tokens);
        let url = format!("{}/models/{}:generateContent", self.base_url, self.model);

        debug!(model = %self.model, query, "sending generateContent request");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(%status, "Gemini API returned error status");
            return Err(ScoutError::Api { status, body });
        }

        let reply: GenerateContentResponse = response.json().await?;
        let (text, chunks) = reply.into_text_and_grounding()?;
        debug!(
            reply_len = text.len(),
            grounding_chunks = chunks.len(),
            "received reply"
        );

        extract::extract_profile(&text, &chunks)
    }
}

// ---------------------------------------------------------------------------
// ScoutClient wrapper
// ---------------------------------------------------------------------------

/// High-level wrapper that is either an active Gemini client or disabled
/// because no API key was configured. The disabled variant fails every
/// request immediately, before any network activity.
pub enum ScoutClient {
    Active(GeminiClient),
    Disabled,
}

impl ScoutClient {
    /// Build a client from config. Returns `Active` when a non-empty API key
    /// is present in credentials, otherwise `Disabled`.
    pub fn from_config(config: &Config) -> Self {
        match &config.credentials.gemini_api_key {
            Some(key) if !key.is_empty() => ScoutClient::Active(GeminiClient::new(
                key.clone(),
                config.gemini.model.clone(),
                config.gemini.temperature,
                config.gemini.max_output_tokens,
            )),
            _ => ScoutClient::Disabled,
        }
    }

    pub async fn generate_profile(&self, query: &str) -> Result<PlayerProfile, ScoutError> {
        match self {
            ScoutClient::Active(client) => client.generate_profile(query).await,
            ScoutClient::Disabled => Err(ScoutError::MissingApiKey),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
