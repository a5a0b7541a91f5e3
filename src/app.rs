// Search session orchestration.
//
// The UI issues at most one search the user cares about at a time, but a new
// search may start while an older one is still in flight. Each spawned fetch
// carries a generation number; `handle_event` discards results from stale
// generations so a slow old response can never overwrite a newer one.

use std::sync::Arc;

use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::llm::{ScoutClient, ScoutError};
use crate::profile::PlayerProfile;

/// The one user-facing failure message. The presentation layer never
/// inspects which error kind occurred; the hint about adding a year covers
/// the common ambiguous-query case.
pub const USER_FACING_ERROR: &str =
    "Could not scout this player. Try adding a year (e.g. \"Rooney 2008\").";

/// Result of one spawned fetch, tagged with the generation that started it.
#[derive(Debug)]
pub struct SearchEvent {
    pub generation: u64,
    pub query: String,
    pub outcome: Result<PlayerProfile, ScoutError>,
}

/// Owns the single "current profile" slot and the generation counter.
///
/// u64 overflow is not a practical concern: at one search per second it
/// would take ~584 billion years to wrap.
pub struct SearchSession {
    client: Arc<ScoutClient>,
    events_tx: mpsc::Sender<SearchEvent>,
    generation: u64,
    in_flight: bool,
    current: Option<PlayerProfile>,
    last_error: Option<String>,
}

impl SearchSession {
    pub fn new(client: Arc<ScoutClient>, events_tx: mpsc::Sender<SearchEvent>) -> Self {
        Self {
            client,
            events_tx,
            generation: 0,
            in_flight: false,
            current: None,
            last_error: None,
        }
    }

    /// Start a search for `query`. Empty or whitespace-only queries are
    /// rejected before anything is spawned. Returns the generation assigned
    /// to the new search, which supersedes any in-flight one.
    pub fn begin_search(&mut self, query: &str) -> Option<u64> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }

        self.generation += 1;
        self.in_flight = true;
        let generation = self.generation;
        info!(generation, query, "starting search");

        let client = Arc::clone(&self.client);
        let tx = self.events_tx.clone();
        let query = query.to_string();
        tokio::spawn(async move {
            let outcome = client.generate_profile(&query).await;
            // Receiver dropped means the session is gone; nothing to do.
            let _ = tx.send(SearchEvent { generation, query, outcome }).await;
        });

        Some(generation)
    }

    /// Apply a fetch result. Returns `false` when the event belonged to a
    /// superseded generation and was discarded.
    pub fn handle_event(&mut self, event: SearchEvent) -> bool {
        if event.generation != self.generation {
            debug!(
                event_generation = event.generation,
                current_generation = self.generation,
                "discarding stale search result"
            );
            return false;
        }

        self.in_flight = false;
        match event.outcome {
            Ok(profile) => {
                info!(generation = event.generation, name = %profile.name, "search succeeded");
                self.current = Some(profile);
                self.last_error = None;
            }
            Err(err) => {
                warn!(generation = event.generation, query = %event.query, %err, "search failed");
                self.current = None;
                self.last_error = Some(USER_FACING_ERROR.to_string());
            }
        }
        true
    }

    pub fn current(&self) -> Option<&PlayerProfile> {
        self.current.as_ref()
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn disabled_session() -> (SearchSession, mpsc::Receiver<SearchEvent>) {
        let (tx, rx) = mpsc::channel(8);
        (SearchSession::new(Arc::new(ScoutClient::Disabled), tx), rx)
    }

    fn ok_event(generation: u64, name: &str) -> SearchEvent {
        SearchEvent {
            generation,
            query: name.to_string(),
            outcome: Ok(PlayerProfile {
                name: name.to_string(),
                ..Default::default()
            }),
        }
    }

    #[tokio::test]
    async fn empty_query_is_rejected_without_a_generation_bump() {
        let (mut session, mut rx) = disabled_session();

        assert_eq!(session.begin_search(""), None);
        assert_eq!(session.begin_search("   "), None);
        assert_eq!(session.generation(), 0);
        assert!(!session.is_in_flight());
        assert!(rx.try_recv().is_err(), "nothing should have been spawned");
    }

    #[tokio::test]
    async fn generations_increase_monotonically() {
        let (mut session, _rx) = disabled_session();

        assert_eq!(session.begin_search("Zidane"), Some(1));
        assert_eq!(session.begin_search("Buffon"), Some(2));
        assert_eq!(session.generation(), 2);
        assert!(session.is_in_flight());
    }

    #[tokio::test]
    async fn current_generation_result_is_committed() {
        let (mut session, _rx) = disabled_session();
        session.begin_search("Zidane");

        assert!(session.handle_event(ok_event(1, "Zinedine Zidane")));
        assert_eq!(session.current().unwrap().name, "Zinedine Zidane");
        assert!(session.last_error().is_none());
        assert!(!session.is_in_flight());
    }

    #[tokio::test]
    async fn stale_result_never_overwrites_a_newer_one() {
        let (mut session, _rx) = disabled_session();
        session.begin_search("Zidane"); // generation 1
        session.begin_search("Buffon"); // generation 2 supersedes

        // The slow generation-1 reply arrives after generation 2 started.
        assert!(!session.handle_event(ok_event(1, "Zinedine Zidane")));
        assert!(session.current().is_none());
        assert!(session.is_in_flight(), "generation 2 is still pending");

        assert!(session.handle_event(ok_event(2, "Gianluigi Buffon")));
        assert_eq!(session.current().unwrap().name, "Gianluigi Buffon");
    }

    #[tokio::test]
    async fn failure_clears_the_profile_and_sets_the_user_message() {
        let (mut session, _rx) = disabled_session();
        session.begin_search("Zidane");
        session.handle_event(ok_event(1, "Zinedine Zidane"));

        session.begin_search("nobody");
        let applied = session.handle_event(SearchEvent {
            generation: 2,
            query: "nobody".into(),
            outcome: Err(ScoutError::ResponseFormat),
        });

        assert!(applied);
        assert!(session.current().is_none(), "stale profile must not linger");
        assert_eq!(session.last_error(), Some(USER_FACING_ERROR));
    }

    #[tokio::test]
    async fn disabled_client_produces_a_failed_event() {
        let (mut session, mut rx) = disabled_session();
        session.begin_search("Zidane");

        let event = rx.recv().await.expect("spawned task should report");
        assert_eq!(event.generation, 1);
        assert!(matches!(event.outcome, Err(ScoutError::MissingApiKey)));

        session.handle_event(event);
        assert_eq!(session.last_error(), Some(USER_FACING_ERROR));
    }

    #[tokio::test]
    async fn success_then_failure_then_success_round_trip() {
        let (mut session, _rx) = disabled_session();

        session.begin_search("a");
        session.handle_event(ok_event(1, "A"));
        assert!(session.current().is_some());

        session.begin_search("b");
        session.handle_event(SearchEvent {
            generation: 2,
            query: "b".into(),
            outcome: Err(ScoutError::EmptyReply),
        });
        assert!(session.current().is_none());

        session.begin_search("c");
        session.handle_event(ok_event(3, "C"));
        assert_eq!(session.current().unwrap().name, "C");
        assert!(session.last_error().is_none());
    }
}
