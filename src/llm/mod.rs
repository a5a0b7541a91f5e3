// Gemini client, scouting prompt, and response extraction.

pub mod client;
pub mod extract;
pub mod prompt;

pub use client::{GeminiClient, ScoutClient};
pub use extract::extract_profile;

use reqwest::StatusCode;
use thiserror::Error;

/// Failures on the scouting request path. Every failure propagates to the
/// caller as a distinguishable kind; nothing here is caught and swallowed,
/// and nothing is retried.
#[derive(Debug, Error)]
pub enum ScoutError {
    /// No API key was configured. Surfaced before any network attempt.
    #[error(
        "Gemini API key is missing; set gemini_api_key in config/credentials.toml \
         or the GEMINI_API_KEY environment variable"
    )]
    MissingApiKey,

    /// The underlying HTTP call failed. Original cause preserved.
    #[error("request to the Gemini API failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("Gemini API returned status {status}: {body}")]
    Api { status: StatusCode, body: String },

    /// The response carried no candidate text at all.
    #[error("Gemini reply contained no candidate text")]
    EmptyReply,

    /// The reply text held no parseable JSON, fenced or bare. This failure
    /// mode often correlates with ambiguous queries, hence the hint.
    #[error(
        "AI response format error; try adding a disambiguating year or club \
         to the query (e.g. \"Rooney 2008\")"
    )]
    ResponseFormat,
}
