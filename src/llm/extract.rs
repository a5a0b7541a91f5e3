// Response extraction: locate the JSON payload in the reply text, parse it,
// and attach the grounding citations.
//
// The model is asked to wrap its JSON in a ```json fence, but replies
// sometimes arrive bare. Both paths land on the same parse, and any parse
// failure maps to the single `ResponseFormat` kind so callers see one
// uniform failure mode.

use tracing::warn;

use crate::llm::client::GroundingChunk;
use crate::llm::ScoutError;
use crate::profile::{CitationSource, PlayerProfile};

const FENCE_OPEN: &str = "```json";
const FENCE_CLOSE: &str = "```";

/// Inner text of the first ```json fenced block, trimmed, or `None` when no
/// complete fence exists. Later fences are ignored.
pub(crate) fn find_fenced_json(text: &str) -> Option<&str> {
    let start = text.find(FENCE_OPEN)? + FENCE_OPEN.len();
    let rest = &text[start..];
    let end = rest.find(FENCE_CLOSE)?;
    Some(rest[..end].trim())
}

/// Project grounding chunks into citation sources, keeping only entries with
/// both a non-empty URI and a non-empty title. Order is preserved.
pub(crate) fn collect_sources(chunks: &[GroundingChunk]) -> Vec<CitationSource> {
    chunks
        .iter()
        .filter_map(|chunk| chunk.web.as_ref())
        .filter(|web| !web.uri.is_empty() && !web.title.is_empty())
        .map(|web| CitationSource {
            title: web.title.clone(),
            uri: web.uri.clone(),
        })
        .collect()
}

/// Turn a raw reply plus grounding metadata into a typed profile.
///
/// The returned profile's `sources` field is always the filtered projection
/// of `chunks`; anything sources-like inside the JSON body is discarded.
/// Pure with respect to its inputs, so identical inputs yield structurally
/// equal profiles.
pub fn extract_profile(
    text: &str,
    chunks: &[GroundingChunk],
) -> Result<PlayerProfile, ScoutError> {
    let sources = collect_sources(chunks);

    let payload = find_fenced_json(text).unwrap_or(text);
    let mut profile: PlayerProfile = serde_json::from_str(payload).map_err(|err| {
        warn!(%err, fenced = payload.len() != text.len(), "reply JSON failed to parse");
        ScoutError::ResponseFormat
    })?;

    profile.sources = sources;
    Ok(profile)
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
